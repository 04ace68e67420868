use serde::{Deserialize, Serialize};

use crate::graph::{Center, Map};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Biome {
    Ocean,
    Marsh,
    Ice,
    Lake,
    Beach,
    Snow,
    Tundra,
    Bare,
    Scorched,
    Taiga,
    Shrubland,
    TemperateDesert,
    TemperateRainForest,
    TemperateDeciduousForest,
    Grassland,
    SubtropicalDesert,
    TropicalRainForest,
    TropicalSeasonalForest,
}

impl Biome {
    pub const ALL: [Biome; 18] = [
        Biome::Ocean,
        Biome::Marsh,
        Biome::Ice,
        Biome::Lake,
        Biome::Beach,
        Biome::Snow,
        Biome::Tundra,
        Biome::Bare,
        Biome::Scorched,
        Biome::Taiga,
        Biome::Shrubland,
        Biome::TemperateDesert,
        Biome::TemperateRainForest,
        Biome::TemperateDeciduousForest,
        Biome::Grassland,
        Biome::SubtropicalDesert,
        Biome::TropicalRainForest,
        Biome::TropicalSeasonalForest,
    ];

    /// Метка биома, например `"TEMPERATE_DESERT"`
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Biome::Ocean => "OCEAN",
            Biome::Marsh => "MARSH",
            Biome::Ice => "ICE",
            Biome::Lake => "LAKE",
            Biome::Beach => "BEACH",
            Biome::Snow => "SNOW",
            Biome::Tundra => "TUNDRA",
            Biome::Bare => "BARE",
            Biome::Scorched => "SCORCHED",
            Biome::Taiga => "TAIGA",
            Biome::Shrubland => "SHRUBLAND",
            Biome::TemperateDesert => "TEMPERATE_DESERT",
            Biome::TemperateRainForest => "TEMPERATE_RAIN_FOREST",
            Biome::TemperateDeciduousForest => "TEMPERATE_DECIDUOUS_FOREST",
            Biome::Grassland => "GRASSLAND",
            Biome::SubtropicalDesert => "SUBTROPICAL_DESERT",
            Biome::TropicalRainForest => "TROPICAL_RAIN_FOREST",
            Biome::TropicalSeasonalForest => "TROPICAL_SEASONAL_FOREST",
        }
    }

    /// Водные биомы и пляж
    #[must_use]
    pub fn is_aquatic(self) -> bool {
        matches!(
            self,
            Biome::Ocean | Biome::Marsh | Biome::Ice | Biome::Lake | Biome::Beach
        )
    }

    /// Таблица биомов: флаги воды проверяются первыми, затем пояса высоты и влажности
    #[must_use]
    pub fn classify(ocean: bool, water: bool, coast: bool, elevation: f64, moisture: f64) -> Biome {
        if ocean {
            Biome::Ocean
        } else if water {
            if elevation < 0.1 {
                Biome::Marsh
            } else if elevation > 0.8 {
                Biome::Ice
            } else {
                Biome::Lake
            }
        } else if coast {
            Biome::Beach
        } else if elevation > 0.8 {
            if moisture > 0.50 {
                Biome::Snow
            } else if moisture > 0.33 {
                Biome::Tundra
            } else if moisture > 0.16 {
                Biome::Bare
            } else {
                Biome::Scorched
            }
        } else if elevation > 0.6 {
            if moisture > 0.66 {
                Biome::Taiga
            } else if moisture > 0.33 {
                Biome::Shrubland
            } else {
                Biome::TemperateDesert
            }
        } else if elevation > 0.3 {
            if moisture > 0.83 {
                Biome::TemperateRainForest
            } else if moisture > 0.50 {
                Biome::TemperateDeciduousForest
            } else if moisture > 0.16 {
                Biome::Grassland
            } else {
                Biome::TemperateDesert
            }
        } else if moisture > 0.66 {
            Biome::TropicalRainForest
        } else if moisture > 0.33 {
            Biome::TropicalSeasonalForest
        } else if moisture > 0.16 {
            Biome::Grassland
        } else {
            Biome::SubtropicalDesert
        }
    }

    #[must_use]
    pub fn of_center(p: &Center) -> Biome {
        Biome::classify(p.ocean, p.water, p.coast, p.elevation, p.moisture)
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Назначает биом каждому полигону
pub fn assign_biomes(map: &mut Map) {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        map.centers
            .par_iter_mut()
            .for_each(|p| p.biome = Some(Biome::of_center(p)));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for p in &mut map.centers {
            p.biome = Some(Biome::of_center(p));
        }
    }
}
