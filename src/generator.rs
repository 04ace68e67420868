//! Конвейер генерации
//!
//! Этапы выполняются строго по порядку, каждый читает только поля,
//! окончательно заполненные предыдущими:
//! граф → высота → вода → перераспределение высоты → сток и водоразделы →
//! реки → влажность → биомы.

use rand::{Rng, SeedableRng};
use tracing::{info, info_span};

use crate::biome::assign_biomes;
use crate::config::GenerationParams;
use crate::elevation::{assign_center_elevations, assign_corner_elevations, redistribute_elevations};
use crate::error::MapError;
use crate::graph::{Map, build_graph};
use crate::hydrology::assign_ocean_coast_and_land;
use crate::island::{IslandShape, NoiseIsland};
use crate::moisture::{assign_center_moisture, assign_corner_moisture, redistribute_moisture};
use crate::rivers::create_rivers;
use crate::tessellation::{Tessellation, VoronoiTessellation, sample_points};
use crate::watershed::{calculate_downslopes, calculate_watersheds};

/// Прогоняет весь конвейер над готовой тесселяцией и полем суши.
///
/// Случайность (добавка к высоте и истоки рек) берётся только из `rng`,
/// поэтому при одинаковом сиде результат воспроизводим.
pub fn generate_map<T, S, R>(
    params: &GenerationParams,
    tessellation: &T,
    shape: &S,
    rng: &mut R,
) -> Result<Map, MapError>
where
    T: Tessellation + ?Sized,
    S: IslandShape + ?Sized,
    R: Rng + ?Sized,
{
    let mut map = {
        let _span = info_span!("graph").entered();
        build_graph(tessellation, params.size)?
    };

    {
        let _span = info_span!("elevation").entered();
        assign_corner_elevations(&mut map, shape, params.elevation.jitter, rng);
    }

    {
        let _span = info_span!("hydrology").entered();
        assign_ocean_coast_and_land(&mut map, params.hydrology.lake_threshold);
    }

    {
        let _span = info_span!("redistribution").entered();
        redistribute_elevations(&mut map, params.elevation.redistribution_scale);
        assign_center_elevations(&mut map);
    }

    {
        let _span = info_span!("watersheds").entered();
        calculate_downslopes(&mut map);
        calculate_watersheds(&mut map, params.hydrology.watershed_iterations)?;
    }

    let rivers = {
        let _span = info_span!("rivers").entered();
        create_rivers(&mut map, &params.rivers, rng)?
    };

    {
        let _span = info_span!("moisture").entered();
        assign_corner_moisture(&mut map, &params.moisture);
        redistribute_moisture(&mut map);
        assign_center_moisture(&mut map);
    }

    {
        let _span = info_span!("biomes").entered();
        assign_biomes(&mut map);
    }

    info!(
        centers = map.centers.len(),
        corners = map.corners.len(),
        edges = map.edges.len(),
        rivers,
        "map generated"
    );
    Ok(map)
}

/// Генерирует карту по параметрам: случайные точки, диаграмма Вороного
/// с релаксацией Ллойда и шумовой остров.
pub fn generate(params: &GenerationParams) -> Result<Map, MapError> {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(params.seed);
    let points = sample_points(params.point_count, params.size, &mut rng);
    let tessellation = VoronoiTessellation::new(&points, params.size, params.lloyd_iterations)?;
    let island = NoiseIsland::new(params.seed, params.size, &params.island);
    generate_map(params, &tessellation, &island, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::Biome;
    use crate::geometry::Point;
    use crate::tessellation::RegularGrid;

    #[test]
    fn grid_pipeline_fills_every_stage() {
        let params = GenerationParams {
            size: 100.0,
            ..GenerationParams::default()
        };
        let grid = RegularGrid::new(8, 100.0, true);
        let shape = |p: Point| p.distance_sq(Point::new(50.0, 50.0)) < 35.0 * 35.0;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);

        let map = generate_map(&params, &grid, &shape, &mut rng).unwrap();

        assert!(map.centers.iter().all(|p| p.biome.is_some()));
        assert!(map.centers.iter().any(|p| p.biome == Some(Biome::Ocean)));
        assert!(map.centers.iter().any(|p| !p.water));
        assert!(map.corners.iter().all(|q| q.elevation.is_finite()));
    }

    #[test]
    fn empty_point_set_is_an_error() {
        let params = GenerationParams {
            point_count: 0,
            ..GenerationParams::default()
        };
        assert!(generate(&params).is_err());
    }
}
