//! Generation driver
//!
//! Resolves the configuration, then runs planting, biome assignment and
//! frontier expansion against one grid and one RNG stream. The finished map
//! is bundled into [`GeneratedMap`] for renderers and exporters.

use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::biomes::{calculate_biome_stats, count_seed_markers, BiomeGrid, BiomeStats};
use crate::config::{GenerationMode, GenerationParams, GeneratorConfig};
use crate::error::GenerationError;
use crate::export::MapSnapshot;
use crate::growth::{self, ExpansionStats, RoundReport, Seed};

/// A finished map with everything needed to render or reproduce it.
#[derive(Clone, Debug)]
pub struct GeneratedMap {
    /// Final labels
    pub grid: BiomeGrid,
    /// Seeds in row-major order with their biomes
    pub seeds: Vec<Seed>,
    pub stats: ExpansionStats,
    /// Parameters the map was generated with
    pub params: GenerationParams,
}

impl GeneratedMap {
    pub fn scale(&self) -> usize {
        self.params.scale
    }

    /// Read-only copy for renderers.
    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot::new(&self.grid)
    }

    pub fn biome_stats(&self) -> BiomeStats {
        calculate_biome_stats(&self.grid)
    }
}

/// Validated generator, ready to run.
#[derive(Clone, Debug)]
pub struct Generator {
    params: GenerationParams,
    mode: GenerationMode,
}

impl Generator {
    /// Validate `config` and resolve its mode. Nothing is generated yet.
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        let params = config.validate()?;
        let mode = GenerationMode::from_str(&params.mode)
            .ok_or_else(|| GenerationError::UnsupportedMode(params.mode.clone()))?;
        Ok(Self { params, mode })
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    pub fn generate(&self, rng: &mut ChaCha8Rng) -> Result<GeneratedMap, GenerationError> {
        self.generate_observed(rng, None)
    }

    /// Generate, calling `observer` after every expansion round.
    pub fn generate_observed(
        &self,
        rng: &mut ChaCha8Rng,
        observer: Option<&mut dyn FnMut(&RoundReport, &BiomeGrid)>,
    ) -> Result<GeneratedMap, GenerationError> {
        match self.mode {
            GenerationMode::SeedBiome => self.generate_seed_biome(rng, observer),
            // Extension point: continents are not grown yet
            GenerationMode::SeedContinental => {
                Err(GenerationError::UnsupportedMode(self.mode.name().to_string()))
            }
        }
    }

    fn generate_seed_biome(
        &self,
        rng: &mut ChaCha8Rng,
        observer: Option<&mut dyn FnMut(&RoundReport, &BiomeGrid)>,
    ) -> Result<GeneratedMap, GenerationError> {
        let params = &self.params;
        let mut grid = BiomeGrid::square(params.scale);

        let points = growth::plant_seeds(&mut grid, params.seed_count, rng)?;
        info!(seeds = points.len(), scale = params.scale, "seeds planted");

        let seeds = growth::assign_biomes(&mut grid, points, &params.biome_weights, rng)?;
        warn_on_seed_markers(&grid, "assignment");

        let stats = growth::expand_frontiers(
            &mut grid,
            &seeds,
            &params.direction_weights,
            params.rolls,
            rng,
            observer,
        )?;
        warn_on_seed_markers(&grid, "expansion");

        Ok(GeneratedMap {
            grid,
            seeds,
            stats,
            params: params.clone(),
        })
    }
}

/// Validate `config` and generate a map with `rng`.
pub fn generate(
    config: &GeneratorConfig,
    rng: &mut ChaCha8Rng,
) -> Result<GeneratedMap, GenerationError> {
    Generator::new(config)?.generate(rng)
}

fn warn_on_seed_markers(grid: &BiomeGrid, stage: &str) {
    let leftover = count_seed_markers(grid);
    if !leftover.is_empty() {
        warn!(stage, count = leftover.len(), cells = ?leftover, "seed markers left on grid");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biomes::BiomeLabel;
    use crate::config::RollsSetting;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn config(scale: i64, fill: Option<f64>) -> GeneratorConfig {
        GeneratorConfig {
            scale,
            percent_fill: fill,
            ..Default::default()
        }
    }

    #[test]
    fn test_seed_count_matches_fill_and_distinct() {
        for (scale, fill) in [(4, Some(0.0625)), (5, Some(0.08)), (10, Some(0.3)), (6, None)] {
            let mut rng = ChaCha8Rng::seed_from_u64(1234);
            let map = generate(&config(scale, fill), &mut rng).unwrap();

            let expected = match fill {
                Some(p) => (p * (scale * scale) as f64).floor() as usize,
                None => 1,
            };
            assert_eq!(map.seeds.len(), expected);
            let unique: HashSet<_> = map.seeds.iter().map(|s| s.point).collect();
            assert_eq!(unique.len(), expected);
        }
    }

    #[test]
    fn test_no_seed_marker_survives() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut cfg = config(20, Some(0.05));
        cfg.rolls = Some(RollsSetting::Random(true));
        let map = generate(&cfg, &mut rng).unwrap();
        assert!(count_seed_markers(&map.grid).is_empty());
        assert!(map
            .grid
            .iter()
            .all(|(_, _, l)| l.is_null() || l.is_concrete()));
    }

    #[test]
    fn test_single_forest_seed_scenario() {
        let mut cfg = config(4, Some(0.0625));
        cfg.rolls = Some(RollsSetting::Count(1));
        cfg.biome_dist = vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut sizes = Vec::new();
        let mut observe = |_: &RoundReport, g: &BiomeGrid| {
            sizes.push(g.iter().filter(|(_, _, &l)| l == BiomeLabel::Forest).count());
        };
        let map = Generator::new(&cfg)
            .unwrap()
            .generate_observed(&mut rng, Some(&mut observe))
            .unwrap();

        assert_eq!(map.seeds.len(), 1);
        assert_eq!(map.seeds[0].biome, BiomeLabel::Forest);
        let forest = map.grid.iter().filter(|(_, _, &l)| l == BiomeLabel::Forest).count();
        assert_eq!(forest, 1 + map.stats.cells_grown);
        assert!(map.grid.iter().all(|(_, _, &l)| l == BiomeLabel::Forest || l.is_null()));
        // One claim per frontier cell per round
        let mut previous = 1;
        for size in sizes {
            assert!(size <= previous * 2);
            previous = size;
        }
    }

    #[test]
    fn test_same_seed_same_map() {
        let mut cfg = config(24, Some(0.02));
        cfg.rolls = Some(RollsSetting::Random(true));
        cfg.direct_dist.insert("U".to_string(), 0.7);

        let a = generate(&cfg, &mut ChaCha8Rng::seed_from_u64(555)).unwrap();
        let b = generate(&cfg, &mut ChaCha8Rng::seed_from_u64(555)).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.seeds, b.seeds);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_zero_fill_leaves_grid_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let map = generate(&config(5, Some(0.0)), &mut rng).unwrap();
        assert!(map.seeds.is_empty());
        assert!(map.grid.iter().all(|(_, _, l)| l.is_null()));
        assert_eq!(map.biome_stats().coverage(), 0.0);
    }

    #[test]
    fn test_continental_mode_is_unsupported() {
        let mut cfg = config(5, None);
        cfg.mode = "seed-continental".to_string();
        let generator = Generator::new(&cfg).unwrap();
        let result = generator.generate(&mut ChaCha8Rng::seed_from_u64(0));
        assert!(matches!(result, Err(GenerationError::UnsupportedMode(m)) if m == "seed-continental"));
    }

    #[test]
    fn test_unknown_mode_rejected_up_front() {
        let mut cfg = config(5, None);
        cfg.mode = "voronoi".to_string();
        assert!(matches!(Generator::new(&cfg), Err(GenerationError::UnsupportedMode(_))));
    }

    #[test]
    fn test_config_errors_surface() {
        let result = generate(&config(-3, None), &mut ChaCha8Rng::seed_from_u64(0));
        assert!(matches!(result, Err(GenerationError::Config(_))));
    }

    #[test]
    fn test_full_fill_plants_every_cell() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let map = generate(&config(6, Some(1.0)), &mut rng).unwrap();
        assert_eq!(map.seeds.len(), 36);
        assert_eq!(map.stats.cells_grown, 0);
        assert!(map.grid.iter().all(|(_, _, l)| l.is_concrete()));
    }
}
