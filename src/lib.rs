//! Seed-and-grow biome map generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod biomes;
pub mod config;
pub mod error;
pub mod export;
pub mod grid_export;
pub mod growth;
pub mod tilemap;
pub mod world;

pub use biomes::{BiomeGrid, BiomeLabel};
pub use config::GeneratorConfig;
pub use error::{ConfigError, GenerationError, GridError};
pub use world::{generate, GeneratedMap, Generator};
