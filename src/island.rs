use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

use crate::config::IslandSettings;
use crate::geometry::Point;

/// Поле суши: решает, является ли точка области сушей
pub trait IslandShape {
    fn is_land(&self, point: Point) -> bool;
}

impl<F> IslandShape for F
where
    F: Fn(Point) -> bool,
{
    fn is_land(&self, point: Point) -> bool {
        self(point)
    }
}

/// Остров из фрактального шума с радиальным спадом к краям карты
pub struct NoiseIsland {
    noise: FastNoiseLite,
    size: f64,
    threshold: f32,
    falloff: f32,
}

impl NoiseIsland {
    #[must_use]
    pub fn new(seed: u64, size: f64, settings: &IslandSettings) -> Self {
        let mut noise = FastNoiseLite::new();
        noise.set_seed(Some(seed as i32));
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_fractal_type(Some(FractalType::FBm));
        noise.set_fractal_octaves(Some(settings.octaves));
        noise.set_frequency(Some(settings.frequency));

        Self {
            noise,
            size,
            threshold: settings.threshold,
            falloff: settings.falloff,
        }
    }

    /// Значение шума в точке, приведённое к `[0, 1]`
    #[must_use]
    pub fn sample(&self, point: Point) -> f32 {
        let v = self.noise.get_noise_2d(point.x as f32, point.y as f32);
        ((v + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

impl IslandShape for NoiseIsland {
    fn is_land(&self, point: Point) -> bool {
        // Координаты в [-1, 1]: порог растёт к краям, поэтому суша собирается в центре
        let qx = (point.x / self.size * 2.0 - 1.0) as f32;
        let qy = (point.y / self.size * 2.0 - 1.0) as f32;
        self.sample(point) > self.threshold + self.falloff * (qx * qx + qy * qy)
    }
}
