//! Граф полигональной карты
//!
//! Три вида сущностей образуют один неориентированный планарный граф:
//! - [`Center`] — ячейка Вороного (вершина Делоне), по одной на точку
//! - [`Corner`] — вершина Вороного, общая для сходящихся в ней ячеек
//! - [`Edge`] — пара двойственных рёбер Делоне/Вороного
//!
//! Сущности хранятся в трёх плотных массивах внутри [`Map`]; все перекрёстные
//! ссылки — индексы в эти массивы. Топология строится один раз в [`builder`] и
//! дальше не меняется: этапы конвейера правят только скалярные поля и флаги.

pub mod builder;
pub mod corner_index;

use serde::Serialize;

use crate::biome::Biome;
use crate::error::MapError;
use crate::geometry::Point;

pub use builder::build_graph;
pub use corner_index::{CORNER_TOLERANCE_SQ, CornerIndex};

#[derive(Debug, Clone, Serialize)]
pub struct Center {
    pub index: usize,
    pub point: Point,
    pub water: bool,
    pub ocean: bool,
    pub coast: bool,
    pub border: bool,
    pub elevation: f64,
    pub moisture: f64,
    pub biome: Option<Biome>,

    pub neighbors: Vec<usize>,
    pub borders: Vec<usize>,
    pub corners: Vec<usize>,
}

impl Center {
    #[must_use]
    pub fn new(index: usize, point: Point) -> Self {
        Self {
            index,
            point,
            water: false,
            ocean: false,
            coast: false,
            border: false,
            elevation: 0.0,
            moisture: 0.0,
            biome: None,
            neighbors: Vec::new(),
            borders: Vec::new(),
            corners: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Corner {
    pub index: usize,
    pub point: Point,
    pub water: bool,
    pub ocean: bool,
    pub coast: bool,
    /// Лежит на границе области генерации
    pub border: bool,
    pub elevation: f64,
    pub moisture: f64,

    pub touches: Vec<usize>,
    pub protrudes: Vec<usize>,
    pub adjacent: Vec<usize>,

    pub river: u32,
    /// Соседний угол с наименьшей высотой (или сам угол в локальном минимуме)
    pub downslope: usize,
    /// Угол, в который в итоге стекает вода
    pub watershed: usize,
    pub watershed_size: usize,
}

impl Corner {
    #[must_use]
    pub fn new(index: usize, point: Point, border: bool) -> Self {
        Self {
            index,
            point,
            water: false,
            ocean: false,
            coast: false,
            border,
            elevation: 0.0,
            moisture: 0.0,
            touches: Vec::new(),
            protrudes: Vec::new(),
            adjacent: Vec::new(),
            river: 0,
            downslope: index,
            watershed: index,
            watershed_size: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    pub index: usize,
    /// Концы ребра Делоне
    pub d0: Option<usize>,
    pub d1: Option<usize>,
    /// Концы ребра Вороного
    pub v0: Option<usize>,
    pub v1: Option<usize>,
    /// `None`, если хотя бы один конец Вороного не определён
    pub midpoint: Option<Point>,
    pub river: u32,
}

impl Edge {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            d0: None,
            d1: None,
            v0: None,
            v1: None,
            midpoint: None,
            river: 0,
        }
    }
}

/// Полигональная карта: владелец всех трёх массивов
#[derive(Debug, Clone, Serialize)]
pub struct Map {
    pub size: f64,
    pub centers: Vec<Center>,
    pub corners: Vec<Corner>,
    pub edges: Vec<Edge>,
}

impl Map {
    #[must_use]
    pub fn new(size: f64) -> Self {
        Self {
            size,
            centers: Vec::new(),
            corners: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Ребро, соединяющее два соседних угла
    #[must_use]
    pub fn edge_between(&self, q: usize, s: usize) -> Option<usize> {
        if q == s {
            return None;
        }
        self.corners[q].protrudes.iter().copied().find(|&e| {
            let edge = &self.edges[e];
            (edge.v0 == Some(q) && edge.v1 == Some(s)) || (edge.v0 == Some(s) && edge.v1 == Some(q))
        })
    }

    /// Внутренние углы: не океан и не побережье.
    /// По ним перераспределяются высота и влажность.
    #[must_use]
    pub fn land_corners(&self) -> Vec<usize> {
        self.corners
            .iter()
            .filter(|q| !q.ocean && !q.coast)
            .map(|q| q.index)
            .collect()
    }

    /// Проверяет инварианты смежности.
    ///
    /// Нарушение означает испорченные входные данные тесселяции и считается фатальным.
    pub fn validate(&self) -> Result<(), MapError> {
        let broken = |kind, index, reason: String| MapError::BrokenAdjacency {
            kind,
            index,
            reason,
        };

        for p in &self.centers {
            check_list(&p.neighbors, self.centers.len(), Some(p.index))
                .map_err(|r| broken("center", p.index, format!("neighbors: {r}")))?;
            check_list(&p.corners, self.corners.len(), None)
                .map_err(|r| broken("center", p.index, format!("corners: {r}")))?;
            for &r in &p.neighbors {
                if !self.centers[r].neighbors.contains(&p.index) {
                    return Err(broken("center", p.index, format!("neighbor {r} is not mutual")));
                }
            }
            for &q in &p.corners {
                if !self.corners[q].touches.contains(&p.index) {
                    return Err(broken("center", p.index, format!("corner {q} does not touch back")));
                }
            }
        }

        for q in &self.corners {
            check_list(&q.adjacent, self.corners.len(), Some(q.index))
                .map_err(|r| broken("corner", q.index, format!("adjacent: {r}")))?;
            check_list(&q.touches, self.centers.len(), None)
                .map_err(|r| broken("corner", q.index, format!("touches: {r}")))?;
            for &s in &q.adjacent {
                if !self.corners[s].adjacent.contains(&q.index) {
                    return Err(broken("corner", q.index, format!("adjacent {s} is not mutual")));
                }
            }
            for &p in &q.touches {
                if !self.centers[p].corners.contains(&q.index) {
                    return Err(broken("corner", q.index, format!("center {p} does not list it")));
                }
            }
        }

        for e in &self.edges {
            let ends = [e.d0, e.d1].into_iter().flatten().all(|d| d < self.centers.len())
                && [e.v0, e.v1].into_iter().flatten().all(|v| v < self.corners.len());
            if !ends {
                return Err(broken("edge", e.index, "endpoint out of range".to_string()));
            }
        }
        Ok(())
    }
}

fn check_list(list: &[usize], len: usize, own: Option<usize>) -> Result<(), String> {
    for (i, &x) in list.iter().enumerate() {
        if x >= len {
            return Err(format!("index {x} out of range"));
        }
        if Some(x) == own {
            return Err("contains itself".to_string());
        }
        if list[..i].contains(&x) {
            return Err(format!("duplicate {x}"));
        }
    }
    Ok(())
}

/// Среднее значение по углам каждого полигона (0.0 для полигона без углов)
#[must_use]
pub fn average_over_corners<F>(map: &Map, value: F) -> Vec<f64>
where
    F: Fn(&Corner) -> f64 + Sync,
{
    let mean = |p: &Center| {
        if p.corners.is_empty() {
            return 0.0;
        }
        let sum: f64 = p.corners.iter().map(|&q| value(&map.corners[q])).sum();
        sum / p.corners.len() as f64
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        map.centers.par_iter().map(mean).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        map.centers.iter().map(mean).collect()
    }
}
