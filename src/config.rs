// src/config.rs
//! Конфигурация генерации карты
//!
//! Этот модуль определяет все параметры, управляющие генерацией полигональной карты:
//! - Размер области и число точек
//! - Форму острова (шумовое поле суши)
//! - Рельеф, гидрологию, реки и влажность
//!
//! Все структуры поддерживают сериализацию в TOML/JSON для удобной настройки через конфигурационные файлы.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::MapError;

/// Параметры формы острова
///
/// Поле шума нормируется в `[0, 1]`; точка считается сушей, если значение шума
/// больше `threshold + falloff * r²`, где `r` — расстояние от центра карты в долях полуразмера.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IslandSettings {
    /// Базовый порог суши
    #[serde(default = "default_land_threshold")]
    pub threshold: f32,

    /// Рост порога к краям карты (0.0 = без спада, остров может касаться краёв)
    #[serde(default = "default_land_falloff")]
    pub falloff: f32,

    /// Частота шума в единицах области
    #[serde(default = "default_noise_frequency")]
    pub frequency: f32,

    /// Количество октав FBm
    #[serde(default = "default_noise_octaves")]
    pub octaves: i32,
}

fn default_land_threshold() -> f32 {
    0.3
}
fn default_land_falloff() -> f32 {
    0.3
}
fn default_noise_frequency() -> f32 {
    0.008
}
fn default_noise_octaves() -> i32 {
    4
}

impl Default for IslandSettings {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            falloff: 0.3,
            frequency: 0.008,
            octaves: 4,
        }
    }
}

/// Настройки рельефа
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElevationSettings {
    /// Верхняя граница случайной добавки к шагу суша→суша (0.0 = детерминированно)
    #[serde(default)]
    pub jitter: f64,

    /// Крутизна целевой гипсометрической кривой (должна быть > 1.0)
    #[serde(default = "default_redistribution_scale")]
    pub redistribution_scale: f64,
}

fn default_redistribution_scale() -> f64 {
    1.1
}

impl Default for ElevationSettings {
    fn default() -> Self {
        Self {
            jitter: 0.0,
            redistribution_scale: 1.1,
        }
    }
}

/// Настройки классификации воды
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HydrologySettings {
    /// Доля водных углов, начиная с которой полигон считается водой (озером)
    #[serde(default = "default_lake_threshold")]
    pub lake_threshold: f64,

    /// Максимум проходов уточнения водоразделов
    #[serde(default = "default_watershed_iterations")]
    pub watershed_iterations: usize,
}

fn default_lake_threshold() -> f64 {
    0.3
}
fn default_watershed_iterations() -> usize {
    100
}

impl Default for HydrologySettings {
    fn default() -> Self {
        Self {
            lake_threshold: 0.3,
            watershed_iterations: 100,
        }
    }
}

/// Настройки рек
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiverSettings {
    /// Число попыток на единицу размера карты (0.5 → size / 2 истоков)
    #[serde(default = "default_trials_per_unit")]
    pub trials_per_unit: f64,

    /// Нижняя граница высоты истока
    #[serde(default = "default_min_source_elevation")]
    pub min_source_elevation: f64,

    /// Верхняя граница высоты истока
    #[serde(default = "default_max_source_elevation")]
    pub max_source_elevation: f64,
}

fn default_trials_per_unit() -> f64 {
    0.5
}
fn default_min_source_elevation() -> f64 {
    0.3
}
fn default_max_source_elevation() -> f64 {
    0.9
}

impl Default for RiverSettings {
    fn default() -> Self {
        Self {
            trials_per_unit: 0.5,
            min_source_elevation: 0.3,
            max_source_elevation: 0.9,
        }
    }
}

/// Настройки влажности
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoistureSettings {
    /// Множитель затухания на каждом шаге распространения
    #[serde(default = "default_moisture_decay")]
    pub decay: f64,

    /// Влажность на единицу речного потока
    #[serde(default = "default_river_moisture")]
    pub river_factor: f64,

    /// Предел влажности у реки
    #[serde(default = "default_river_moisture_cap")]
    pub river_cap: f64,
}

fn default_moisture_decay() -> f64 {
    0.9
}
fn default_river_moisture() -> f64 {
    0.2
}
fn default_river_moisture_cap() -> f64 {
    3.0
}

impl Default for MoistureSettings {
    fn default() -> Self {
        Self {
            decay: 0.9,
            river_factor: 0.2,
            river_cap: 3.0,
        }
    }
}

/// Основные параметры генерации карты
///
/// Полная конфигурация для генерации одной карты. Поддерживает загрузку из TOML-файлов.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationParams {
    /// Сид генератора случайных чисел (детерминированная генерация)
    pub seed: u64,

    /// Сторона квадратной области генерации (по умолчанию 512)
    #[serde(default = "default_size")]
    pub size: f64,

    /// Количество точек (полигонов) (по умолчанию 600)
    #[serde(default = "default_point_count")]
    pub point_count: usize,

    /// Итерации релаксации Ллойда перед построением графа
    #[serde(default = "default_lloyd_iterations")]
    pub lloyd_iterations: usize,

    #[serde(default)]
    pub island: IslandSettings,

    #[serde(default)]
    pub elevation: ElevationSettings,

    #[serde(default)]
    pub hydrology: HydrologySettings,

    #[serde(default)]
    pub rivers: RiverSettings,

    #[serde(default)]
    pub moisture: MoistureSettings,
}

impl GenerationParams {
    /// Загружает параметры из TOML-файла
    ///
    /// # Пример
    /// ```toml
    /// # world.toml
    /// seed = 42
    /// size = 1024.0
    /// point_count = 2000
    ///
    /// [hydrology]
    /// lake_threshold = 0.4
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let contents = fs::read_to_string(path)?;
        let params: Self = toml::from_str(&contents)?;
        Ok(params)
    }
}

fn default_size() -> f64 {
    512.0
}
fn default_point_count() -> usize {
    600
}
fn default_lloyd_iterations() -> usize {
    3
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            seed: 0,
            size: 512.0,
            point_count: 600,
            lloyd_iterations: 3,
            island: IslandSettings::default(),
            elevation: ElevationSettings::default(),
            hydrology: HydrologySettings::default(),
            rivers: RiverSettings::default(),
            moisture: MoistureSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let params: GenerationParams = toml::from_str("seed = 7").unwrap();
        assert_eq!(params.seed, 7);
        assert_eq!(params.size, 512.0);
        assert_eq!(params.point_count, 600);
        assert_eq!(params.hydrology, HydrologySettings::default());
        assert_eq!(params.rivers, RiverSettings::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let params: GenerationParams = toml::from_str(
            r"
            seed = 1
            [rivers]
            min_source_elevation = 0.5
            ",
        )
        .unwrap();
        assert_eq!(params.rivers.min_source_elevation, 0.5);
        assert_eq!(params.rivers.max_source_elevation, 0.9);
        assert_eq!(params.rivers.trials_per_unit, 0.5);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 42\npoint_count = 100\n[hydrology]\nlake_threshold = 0.5").unwrap();

        let params = GenerationParams::from_toml_file(file.path()).unwrap();
        assert_eq!(params.seed, 42);
        assert_eq!(params.point_count, 100);
        assert_eq!(params.hydrology.lake_threshold, 0.5);
        assert_eq!(params.hydrology.watershed_iterations, 100);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GenerationParams::from_toml_file("/nonexistent/polymap.toml").unwrap_err();
        assert!(matches!(err, MapError::Io(_)));
    }

    #[test]
    fn missing_seed_is_rejected() {
        let err = toml::from_str::<GenerationParams>("size = 10.0").unwrap_err();
        assert!(err.to_string().contains("seed"));
    }
}
