use serde::{Deserialize, Serialize};

/// Точка на плоскости области генерации `[0, size]²`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Зарезервированная пара координат "здесь нет вершины".
    /// Координаты области неотрицательны, поэтому коллизий не бывает.
    pub const UNDEFINED: Point = Point { x: -1.0, y: -1.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_undefined(self) -> bool {
        self.x < 0.0 || self.y < 0.0
    }

    /// `None` для маркера `UNDEFINED`
    #[must_use]
    pub fn defined(self) -> Option<Point> {
        if self.is_undefined() { None } else { Some(self) }
    }

    #[must_use]
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[must_use]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Точный ключ позиции для хеш-таблиц (побитовое совпадение координат)
    #[must_use]
    pub fn bits_key(self) -> (u64, u64) {
        (self.x.to_bits(), self.y.to_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_components_are_undefined() {
        assert!(Point::UNDEFINED.is_undefined());
        assert!(Point::new(-0.5, 3.0).is_undefined());
        assert!(Point::new(3.0, -0.5).is_undefined());
        assert_eq!(Point::new(0.0, 0.0).defined(), Some(Point::new(0.0, 0.0)));
        assert_eq!(Point::UNDEFINED.defined(), None);
    }

    #[test]
    fn lerp_half_is_midpoint() {
        let m = Point::new(0.0, 10.0).lerp(Point::new(4.0, 2.0), 0.5);
        assert_eq!(m, Point::new(2.0, 6.0));
    }
}
