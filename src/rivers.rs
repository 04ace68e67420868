use rand::Rng;
use tracing::debug;

use crate::config::RiverSettings;
use crate::error::MapError;
use crate::graph::Map;

/// Жёсткий предел числа попыток заложить исток
pub const MAX_RIVER_TRIALS: usize = 1_000_000;

/// Прокладывает реки вниз по склону от случайных истоков.
///
/// Исток — случайный угол не в океане, с высотой в полосе
/// `[min_source_elevation, max_source_elevation]`. Путь идёт по `downslope` до
/// побережья или локального минимума. Каждый пройденный угол и ребро получают
/// +1 к `river` за каждую реку, поэтому при слиянии рек поток суммируется.
/// Возвращает число проложенных рек.
pub fn create_rivers<R: Rng + ?Sized>(
    map: &mut Map,
    settings: &RiverSettings,
    rng: &mut R,
) -> Result<usize, MapError> {
    if map.corners.is_empty() {
        return Ok(0);
    }

    let trials = ((map.size * settings.trials_per_unit).round().max(0.0) as usize).min(MAX_RIVER_TRIALS);
    let mut rivers = 0;

    for _ in 0..trials {
        let start = rng.gen_range(0..map.corners.len());
        let source = &map.corners[start];
        if source.ocean
            || source.elevation < settings.min_source_elevation
            || source.elevation > settings.max_source_elevation
        {
            continue;
        }

        let mut q = start;
        let mut steps = 0;
        while !map.corners[q].coast {
            let next = map.corners[q].downslope;
            if next == q {
                break;
            }
            steps += 1;
            if steps > map.corners.len() {
                return Err(MapError::DownslopeCycle { corner: start });
            }
            if q == start {
                map.corners[q].river += 1;
            }
            if let Some(e) = map.edge_between(q, next) {
                map.edges[e].river += 1;
            }
            map.corners[next].river += 1;
            q = next;
        }
        if steps > 0 {
            rivers += 1;
        }
    }

    debug!(trials, rivers, "rivers traced");
    Ok(rivers)
}
