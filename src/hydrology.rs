use std::collections::VecDeque;

use crate::graph::Map;

/// Определяет океан, озёра и побережье.
///
/// Полигоны, касающиеся границы карты, — океан. Полигон — вода, если доля его
/// водных углов не меньше `lake_threshold`. Океан растекается по соседним водным
/// полигонам; оставшаяся вода внутри суши — озёра.
pub fn assign_ocean_coast_and_land(map: &mut Map, lake_threshold: f64) {
    let Map {
        centers, corners, ..
    } = map;
    let mut queue = VecDeque::new();

    for p in centers.iter_mut() {
        let mut num_water = 0;
        for &q in &p.corners {
            if corners[q].border {
                p.border = true;
                p.ocean = true;
            }
            if corners[q].water {
                num_water += 1;
            }
        }
        if p.ocean {
            queue.push_back(p.index);
        }
        p.water = p.ocean || f64::from(num_water) >= p.corners.len() as f64 * lake_threshold;
    }

    while let Some(p) = queue.pop_front() {
        for i in 0..centers[p].neighbors.len() {
            let r = centers[p].neighbors[i];
            if centers[r].water && !centers[r].ocean {
                centers[r].ocean = true;
                queue.push_back(r);
            }
        }
    }

    // Побережье: есть соседи и в океане, и на суше
    let coast: Vec<bool> = centers
        .iter()
        .map(|p| {
            let ocean = p.neighbors.iter().any(|&r| centers[r].ocean);
            let land = p.neighbors.iter().any(|&r| !centers[r].water);
            ocean && land
        })
        .collect();
    for (p, coast) in centers.iter_mut().zip(coast) {
        p.coast = coast;
    }

    // Угол — океан, если все его полигоны океан; побережье, если есть и океан, и суша.
    // Угол среди одной суши сухой, даже если поле суши считало его водой.
    for q in corners.iter_mut() {
        let num_ocean = q.touches.iter().filter(|&&p| centers[p].ocean).count();
        let num_land = q.touches.iter().filter(|&&p| !centers[p].water).count();
        q.ocean = num_ocean == q.touches.len();
        q.coast = num_ocean > 0 && num_land > 0;
        q.water = q.border || (num_land != q.touches.len() && !q.coast);
    }
}
