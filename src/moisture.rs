//! Влажность
//!
//! Устроена так же, как высота: источники (пресная вода и реки) распространяют
//! влажность с затуханием, затем значения внутренних углов переносятся на
//! равномерную шкалу по рангу.

use std::collections::VecDeque;

use crate::config::MoistureSettings;
use crate::graph::{Map, average_over_corners};

/// Наибольшее допустимое затухание: при 1.0 распространение не сходится
const MAX_DECAY: f64 = 0.99;

/// Распространяет влажность от пресной воды и рек; океан и побережье получают 1.0
pub fn assign_corner_moisture(map: &mut Map, settings: &MoistureSettings) {
    let decay = settings.decay.clamp(0.0, MAX_DECAY);
    let mut queue = VecDeque::new();

    for q in &mut map.corners {
        if (q.water || q.river > 0) && !q.ocean {
            q.moisture = if q.river > 0 {
                (settings.river_factor * f64::from(q.river)).min(settings.river_cap)
            } else {
                1.0
            };
            queue.push_back(q.index);
        } else {
            q.moisture = 0.0;
        }
    }

    while let Some(q) = queue.pop_front() {
        let new_moisture = map.corners[q].moisture * decay;
        for i in 0..map.corners[q].adjacent.len() {
            let r = map.corners[q].adjacent[i];
            if new_moisture > map.corners[r].moisture {
                map.corners[r].moisture = new_moisture;
                queue.push_back(r);
            }
        }
    }

    for q in &mut map.corners {
        if q.ocean || q.coast {
            q.moisture = 1.0;
        }
    }
}

/// Линейная шкала по рангу для внутренних углов: `moisture = i / (N − 1)`
pub fn redistribute_moisture(map: &mut Map) {
    let mut locations = map.land_corners();
    locations.sort_by(|&a, &b| map.corners[a].moisture.total_cmp(&map.corners[b].moisture));

    let denom = locations.len().saturating_sub(1).max(1) as f64;
    for (i, &q) in locations.iter().enumerate() {
        map.corners[q].moisture = i as f64 / denom;
    }
}

/// Средняя влажность углов полигона, каждый угол не больше 1.0
pub fn assign_center_moisture(map: &mut Map) {
    let means = average_over_corners(map, |q| q.moisture.min(1.0));
    for (p, moisture) in map.centers.iter_mut().zip(means) {
        p.moisture = moisture;
    }
}
