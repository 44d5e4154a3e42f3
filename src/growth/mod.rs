//! Seed planting, biome assignment and frontier expansion.
//!
//! Stages run in order against one [`BiomeGrid`](crate::biomes::BiomeGrid)
//! and one RNG stream: [`plant_seeds`] → [`assign_biomes`] → [`expand_frontiers`].

pub mod assignment;
pub mod expansion;
pub mod planting;
pub mod sampling;
pub mod types;

pub use assignment::assign_biomes;
pub use expansion::{expand_frontiers, ExpansionStats, RoundReport};
pub use planting::{plant_seeds, plant_seeds_with};
pub use sampling::weighted_index;
pub use types::{Direction, Frontier, Seed, SeedPoint};
