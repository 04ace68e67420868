//! Высота углов и полигонов
//!
//! Сначала углы делятся на сушу и воду по полю суши, затем высота растёт от
//! границы карты как "расстояние до берега": шаг по суше стоит дороже шага по
//! воде. После классификации воды сырые значения переносятся на целевую
//! гипсометрическую кривую.

use std::collections::VecDeque;

use rand::Rng;

use crate::graph::{Map, average_over_corners};
use crate::island::IslandShape;

/// Цена любого шага релаксации
const STEP_COST: f64 = 0.01;
/// Добавка за шаг суша→суша
const LAND_STEP_COST: f64 = 1.0;

/// Назначает `water` по полю суши и распространяет высоту от граничных углов.
///
/// Релаксация с повторными посещениями: угол снова попадает в очередь при каждом
/// улучшении. Углы, недостижимые от границы, остаются с `f64::INFINITY`.
pub fn assign_corner_elevations<S, R>(map: &mut Map, shape: &S, jitter: f64, rng: &mut R)
where
    S: IslandShape + ?Sized,
    R: Rng + ?Sized,
{
    let mut queue = VecDeque::new();

    for q in &mut map.corners {
        q.water = !shape.is_land(q.point);
        if q.border {
            q.elevation = 0.0;
            queue.push_back(q.index);
        } else {
            q.elevation = f64::INFINITY;
        }
    }

    while let Some(q) = queue.pop_front() {
        for i in 0..map.corners[q].adjacent.len() {
            let s = map.corners[q].adjacent[i];
            let mut new_elevation = map.corners[q].elevation + STEP_COST;
            if !map.corners[q].water && !map.corners[s].water {
                new_elevation += LAND_STEP_COST;
                if jitter > 0.0 {
                    new_elevation += rng.gen_range(0.0..jitter);
                }
            }
            if new_elevation < map.corners[s].elevation {
                map.corners[s].elevation = new_elevation;
                queue.push_back(s);
            }
        }
    }
}

/// Переносит высоту внутренних углов на кривую `x = √s − √(s·(1 − y))`.
///
/// `y` — доля ранга угла среди внутренних углов; нулевой ранг отдан береговой
/// линии, поэтому внутренний угол никогда не получает ровно 0.
/// Углы океана и побережья после этого прижимаются к 0.
pub fn redistribute_elevations(map: &mut Map, scale: f64) {
    let scale = scale.max(1.0);
    let mut locations = map.land_corners();
    locations.sort_by(|&a, &b| map.corners[a].elevation.total_cmp(&map.corners[b].elevation));

    let n = locations.len() as f64;
    for (i, &q) in locations.iter().enumerate() {
        let y = (i + 1) as f64 / n;
        let x = (scale.sqrt() - (scale * (1.0 - y)).sqrt()).min(1.0);
        map.corners[q].elevation = x;
    }

    for q in &mut map.corners {
        if q.ocean || q.coast {
            q.elevation = 0.0;
        }
    }
}

/// Высота полигона равна среднему по его углам
pub fn assign_center_elevations(map: &mut Map) {
    let means = average_over_corners(map, |q| q.elevation);
    for (p, elevation) in map.centers.iter_mut().zip(means) {
        p.elevation = elevation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::graph::build_graph;
    use crate::tessellation::RegularGrid;
    use approx::assert_relative_eq;
    use rand::SeedableRng;

    fn grid_map(n: usize) -> Map {
        build_graph(&RegularGrid::new(n, 100.0, true), 100.0).unwrap()
    }

    #[test]
    fn water_everywhere_keeps_steps_cheap() {
        let mut map = grid_map(4);
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
        assign_corner_elevations(&mut map, &|_: Point| false, 0.0, &mut rng);

        // Центральный узел (50, 50) в двух шагах от границы
        let center = map
            .corners
            .iter()
            .find(|q| q.point == Point::new(50.0, 50.0))
            .unwrap();
        assert_relative_eq!(center.elevation, 0.02, epsilon = 1e-12);
        assert!(map.corners.iter().all(|q| q.water));
    }

    #[test]
    fn land_steps_cost_more() {
        let mut map = grid_map(4);
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
        assign_corner_elevations(&mut map, &|_: Point| true, 0.0, &mut rng);

        let center = map
            .corners
            .iter()
            .find(|q| q.point == Point::new(50.0, 50.0))
            .unwrap();
        assert_relative_eq!(center.elevation, 2.02, epsilon = 1e-12);
        assert!(map.corners.iter().filter(|q| q.border).all(|q| q.elevation == 0.0));
    }

    #[test]
    fn jitter_only_raises_land_steps() {
        let mut plain = grid_map(4);
        let mut jittered = grid_map(4);
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(2);
        assign_corner_elevations(&mut plain, &|_: Point| true, 0.0, &mut rng);
        assign_corner_elevations(&mut jittered, &|_: Point| true, 0.5, &mut rng);

        for (a, b) in plain.corners.iter().zip(&jittered.corners) {
            assert!(b.elevation >= a.elevation);
            assert!(b.elevation <= a.elevation + 2.0 * 0.5 + 1e-12);
        }
    }

    #[test]
    fn redistribution_is_monotone_and_bounded() {
        let mut map = grid_map(1);
        // Четыре угла одной клетки: делаем три внутренними
        for (i, q) in map.corners.iter_mut().enumerate() {
            q.elevation = [5.0, 1.0, 3.0, 0.0][i];
            q.coast = i == 3;
        }
        redistribute_elevations(&mut map, 1.1);

        let e: Vec<f64> = map.corners.iter().map(|q| q.elevation).collect();
        assert_eq!(e[3], 0.0);
        assert!(e[1] > 0.0 && e[1] < e[2] && e[2] < e[0]);
        assert!(e[0] <= 1.0);
        // Верхний ранг: y = 1 → √1.1 > 1 → обрезается до 1
        assert_relative_eq!(e[0], 1.0);
        let expected = 1.1_f64.sqrt() - (1.1_f64 * (1.0 - 1.0 / 3.0)).sqrt();
        assert_relative_eq!(e[1], expected, epsilon = 1e-12);
    }

    #[test]
    fn center_elevation_is_corner_mean() {
        let mut map = grid_map(1);
        for (i, q) in map.corners.iter_mut().enumerate() {
            q.elevation = i as f64;
        }
        assign_center_elevations(&mut map);
        assert_relative_eq!(map.centers[0].elevation, 1.5);
    }
}
