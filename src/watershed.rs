//! Направление стока и водоразделы

use tracing::{debug, warn};

use crate::error::MapError;
use crate::graph::Map;

/// Для каждого угла выбирает самого низкого соседа.
///
/// При равных высотах остаётся первый найденный; угол без более низких соседей
/// указывает сам на себя.
pub fn calculate_downslopes(map: &mut Map) {
    let downslopes: Vec<usize> = map
        .corners
        .iter()
        .map(|q| {
            let mut r = q.index;
            for &s in &q.adjacent {
                if map.corners[s].elevation < map.corners[r].elevation {
                    r = s;
                }
            }
            r
        })
        .collect();

    for (q, r) in map.corners.iter_mut().zip(downslopes) {
        q.downslope = r;
    }
}

/// Проверяет, что цепочки `downslope` заканчиваются неподвижной точкой
pub fn check_downslope_acyclic(map: &Map) -> Result<(), MapError> {
    const UNSEEN: u8 = 0;
    const ON_PATH: u8 = 1;
    const DONE: u8 = 2;

    let mut state = vec![UNSEEN; map.corners.len()];
    let mut path = Vec::new();

    for start in 0..map.corners.len() {
        let mut q = start;
        while state[q] == UNSEEN {
            state[q] = ON_PATH;
            path.push(q);
            let next = map.corners[q].downslope;
            if next == q {
                break;
            }
            q = next;
        }
        if state[q] == ON_PATH && map.corners[q].downslope != q {
            return Err(MapError::DownslopeCycle { corner: q });
        }
        for p in path.drain(..) {
            state[p] = DONE;
        }
    }
    Ok(())
}

/// Находит водораздел каждого угла: последний угол суши на пути вниз по склону.
///
/// Итерации ограничены `max_iterations`; если за это время указатели не сошлись,
/// выводится предупреждение и используется достигнутое состояние.
/// Возвращает число выполненных проходов.
pub fn calculate_watersheds(map: &mut Map, max_iterations: usize) -> Result<usize, MapError> {
    check_downslope_acyclic(map)?;

    // Начальный водораздел: один шаг вниз по склону
    for q in &mut map.corners {
        q.watershed = if q.ocean || q.coast { q.index } else { q.downslope };
    }

    let mut passes = 0;
    let mut converged = false;
    while passes < max_iterations {
        passes += 1;
        let mut changed = false;
        for q in 0..map.corners.len() {
            let corner = &map.corners[q];
            if corner.ocean || corner.coast || map.corners[corner.watershed].coast {
                continue;
            }
            let r = map.corners[corner.downslope].watershed;
            if !map.corners[r].ocean && r != corner.watershed {
                map.corners[q].watershed = r;
                changed = true;
            }
        }
        if !changed {
            converged = true;
            break;
        }
    }

    if converged {
        debug!(passes, "watersheds converged");
    } else {
        warn!(passes, "watersheds did not converge, keeping partial roots");
    }

    let mut sizes = vec![0; map.corners.len()];
    for q in &map.corners {
        sizes[q.watershed] += 1;
    }
    for (q, size) in map.corners.iter_mut().zip(sizes) {
        q.watershed_size = size;
    }
    Ok(passes)
}
