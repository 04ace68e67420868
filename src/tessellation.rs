//! Источники тесселяции
//!
//! Граф строится не из самой диаграммы, а из списка точек и двойственных рёбер
//! ([`DualEdge`]). Здесь же лежат две реализации: диаграмма Вороного на
//! `voronoice` и регулярная квадратная решётка для детерминированных сценариев.

use std::collections::HashMap;

use rand::Rng;
use voronoice::{BoundingBox, VoronoiBuilder};

use crate::error::MapError;
use crate::geometry::Point;

/// Ребро Делоне вместе с двойственным ребром Вороного.
/// Любой конец может быть `Point::UNDEFINED`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualEdge {
    pub delaunay: (Point, Point),
    pub voronoi: (Point, Point),
}

pub trait Tessellation {
    fn sites(&self) -> &[Point];
    fn dual_edges(&self) -> &[DualEdge];
}

/// Равномерно распределённые точки в `[0, size)²`
pub fn sample_points<R: Rng + ?Sized>(count: usize, size: f64, rng: &mut R) -> Vec<Point> {
    (0..count)
        .map(|_| Point::new(rng.gen_range(0.0..size), rng.gen_range(0.0..size)))
        .collect()
}

/// Диаграмма Вороного, обрезанная по квадрату `[0, size]²`
#[derive(Debug, Clone)]
pub struct VoronoiTessellation {
    sites: Vec<Point>,
    edges: Vec<DualEdge>,
}

impl VoronoiTessellation {
    pub fn new(points: &[Point], size: f64, lloyd_iterations: usize) -> Result<Self, MapError> {
        if points.len() < 3 {
            return Err(MapError::Tessellation(format!(
                "need at least 3 points, got {}",
                points.len()
            )));
        }
        let voronoi = VoronoiBuilder::default()
            .set_sites(
                points
                    .iter()
                    .map(|p| voronoice::Point { x: p.x, y: p.y })
                    .collect(),
            )
            .set_bounding_box(BoundingBox::new(
                voronoice::Point {
                    x: size / 2.0,
                    y: size / 2.0,
                },
                size,
                size,
            ))
            .set_lloyd_relaxation_iterations(lloyd_iterations)
            .build()
            .ok_or_else(|| {
                MapError::Tessellation(format!("no diagram for {} points", points.len()))
            })?;

        let sites: Vec<Point> = voronoi
            .sites()
            .iter()
            .map(|p| Point::new(snap(p.x, size), snap(p.y, size)))
            .collect();

        // Сторона полигона, встреченная второй раз, разделяет две ячейки
        let mut edges: Vec<DualEdge> = Vec::new();
        let mut by_side: HashMap<[i64; 4], usize> = HashMap::new();

        for cell in voronoi.iter_cells() {
            let site = sites[cell.site()];
            let vertices: Vec<Point> = cell
                .iter_vertices()
                .map(|p| Point::new(snap(p.x, size), snap(p.y, size)))
                .collect();

            for (i, &a) in vertices.iter().enumerate() {
                let b = vertices[(i + 1) % vertices.len()];
                if a.distance_sq(b) < f64::EPSILON {
                    continue;
                }
                let key = side_key(a, b);
                if let Some(&e) = by_side.get(&key) {
                    edges[e].delaunay.1 = site;
                } else {
                    by_side.insert(key, edges.len());
                    edges.push(DualEdge {
                        delaunay: (site, Point::UNDEFINED),
                        voronoi: (a, b),
                    });
                }
            }
        }

        Ok(Self { sites, edges })
    }
}

impl Tessellation for VoronoiTessellation {
    fn sites(&self) -> &[Point] {
        &self.sites
    }

    fn dual_edges(&self) -> &[DualEdge] {
        &self.edges
    }
}

/// Прижимает координату к границе области, если она отличается на погрешность вычислений
fn snap(v: f64, size: f64) -> f64 {
    let eps = 1e-9 * size.max(1.0);
    if v.abs() < eps {
        0.0
    } else if (v - size).abs() < eps {
        size
    } else {
        v
    }
}

fn side_key(a: Point, b: Point) -> [i64; 4] {
    let q = |v: f64| (v * 1e6).round() as i64;
    let (ka, kb) = ([q(a.x), q(a.y)], [q(b.x), q(b.y)]);
    if ka <= kb {
        [ka[0], ka[1], kb[0], kb[1]]
    } else {
        [kb[0], kb[1], ka[0], ka[1]]
    }
}

/// Квадратная решётка `n×n` ячеек: точки в центрах клеток.
///
/// При `clipped == true` внешний контур замыкается рёбрами по границе области.
/// Иначе крайние рёбра Вороного уходят в бесконечность (конец `UNDEFINED`),
/// и ни один угол не лежит на границе.
#[derive(Debug, Clone)]
pub struct RegularGrid {
    sites: Vec<Point>,
    edges: Vec<DualEdge>,
}

impl RegularGrid {
    #[must_use]
    pub fn new(n: usize, size: f64, clipped: bool) -> Self {
        let cell = size / n as f64;
        let coord = |i: usize| if i == n { size } else { i as f64 * cell };
        let site = |i: usize, j: usize| Point::new((i as f64 + 0.5) * cell, (j as f64 + 0.5) * cell);
        let vertex = |i: usize, j: usize| {
            let open = !clipped && (i == 0 || i == n || j == 0 || j == n);
            if open {
                Point::UNDEFINED
            } else {
                Point::new(coord(i), coord(j))
            }
        };

        let mut sites = Vec::with_capacity(n * n);
        for j in 0..n {
            for i in 0..n {
                sites.push(site(i, j));
            }
        }

        let mut edges = Vec::new();
        // Вертикальные стороны между соседями по x
        for j in 0..n {
            for i in 1..n {
                edges.push(DualEdge {
                    delaunay: (site(i - 1, j), site(i, j)),
                    voronoi: (vertex(i, j), vertex(i, j + 1)),
                });
            }
        }
        // Горизонтальные стороны между соседями по y
        for j in 1..n {
            for i in 0..n {
                edges.push(DualEdge {
                    delaunay: (site(i, j - 1), site(i, j)),
                    voronoi: (vertex(i, j), vertex(i + 1, j)),
                });
            }
        }

        if clipped {
            for k in 0..n {
                let sides = [
                    (site(k, 0), vertex(k, 0), vertex(k + 1, 0)),
                    (site(k, n - 1), vertex(k, n), vertex(k + 1, n)),
                    (site(0, k), vertex(0, k), vertex(0, k + 1)),
                    (site(n - 1, k), vertex(n, k), vertex(n, k + 1)),
                ];
                for (s, a, b) in sides {
                    edges.push(DualEdge {
                        delaunay: (s, Point::UNDEFINED),
                        voronoi: (a, b),
                    });
                }
            }
        }

        Self { sites, edges }
    }
}

impl Tessellation for RegularGrid {
    fn sites(&self) -> &[Point] {
        &self.sites
    }

    fn dual_edges(&self) -> &[DualEdge] {
        &self.edges
    }
}
