//! Ошибки генерации карты
//!
//! Внутри конвейера восстанавливаемых ошибок почти нет: некорректные стороны
//! рёбер и неопределённые вершины молча пропускаются. Сюда попадают только
//! ошибки ввода-вывода и нарушения инвариантов графа, которые означают порчу
//! входных данных.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tessellation failed: {0}")]
    Tessellation(String),

    #[error("Broken adjacency at {kind} {index}: {reason}")]
    BrokenAdjacency {
        kind: &'static str,
        index: usize,
        reason: String,
    },

    #[error("Downslope cycle detected starting at corner {corner}")]
    DownslopeCycle { corner: usize },
}
