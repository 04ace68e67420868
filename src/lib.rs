pub mod biome;
pub mod config;
pub mod elevation;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod graph;
pub mod hydrology;
pub mod island;
pub mod logging;
pub mod moisture;
pub mod regions;
pub mod rivers;
pub mod tessellation;
pub mod watershed;

pub use biome::Biome;
pub use config::GenerationParams;
pub use error::MapError;
pub use generator::{generate, generate_map};
pub use geometry::Point;
pub use graph::{Center, Corner, Edge, Map};
pub use regions::{MapSummary, summarize};
