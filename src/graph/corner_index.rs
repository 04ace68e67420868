use std::collections::HashMap;

use crate::geometry::Point;
use crate::graph::Corner;

/// Квадрат расстояния, ниже которого две вершины Вороного считаются одним углом.
///
/// Используется грубый допуск 0.01: он склеивает вершины, которые разные ячейки
/// вычислили с разной погрешностью. Корзины по `floor(x)` шириной 1.0 больше
/// радиуса допуска (0.1), поэтому поиска в соседних корзинах достаточно.
pub const CORNER_TOLERANCE_SQ: f64 = 1e-2;

/// Пространственный индекс углов: корзины по целой части координаты `x`
#[derive(Debug, Default)]
pub struct CornerIndex {
    size: f64,
    buckets: HashMap<i64, Vec<usize>>,
}

impl CornerIndex {
    #[must_use]
    pub fn new(size: f64) -> Self {
        Self {
            size,
            buckets: HashMap::new(),
        }
    }

    /// Находит угол в пределах допуска или создаёт новый.
    ///
    /// Для маркера `Point::UNDEFINED` угол не создаётся и возвращается `None`.
    pub fn lookup_or_insert(&mut self, corners: &mut Vec<Corner>, point: Point) -> Option<usize> {
        let point = point.defined()?;
        let bucket = point.x.floor() as i64;

        for b in bucket - 1..=bucket + 1 {
            let Some(list) = self.buckets.get(&b) else {
                continue;
            };
            if let Some(&q) = list
                .iter()
                .find(|&&q| corners[q].point.distance_sq(point) < CORNER_TOLERANCE_SQ)
            {
                return Some(q);
            }
        }

        let index = corners.len();
        let border = point.x == 0.0 || point.x == self.size || point.y == 0.0 || point.y == self.size;
        corners.push(Corner::new(index, point, border));
        self.buckets.entry(bucket).or_default().push(index);
        Some(index)
    }
}
