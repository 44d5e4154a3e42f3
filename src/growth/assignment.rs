use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::biomes::{BiomeGrid, BiomeLabel};
use crate::config::BiomeWeights;
use crate::error::{ConfigError, GenerationError};

use super::sampling::weighted_index;
use super::types::{Seed, SeedPoint};

/// Bind every planted seed to a biome drawn from `weights`, replacing its
/// seed marker on the grid.
///
/// Seeds are sorted row-major first so the draw order (and with it the
/// expansion order) depends only on the RNG seed and the seed positions.
pub fn assign_biomes(
    grid: &mut BiomeGrid,
    mut points: Vec<SeedPoint>,
    weights: &BiomeWeights,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<Seed>, GenerationError> {
    points.sort();

    let seeds = points
        .into_iter()
        .map(|point| -> Result<Seed, GenerationError> {
            let idx = weighted_index(rng, weights.as_slice())
                .ok_or(ConfigError::ZeroTotalWeight("biome-dist"))?;
            let biome = BiomeLabel::CONCRETE[idx];
            grid.set(point.row, point.col, biome)?;
            Ok(Seed { point, biome })
        })
        .collect::<Result<Vec<_>, GenerationError>>()?;

    debug!(seeds = seeds.len(), "biomes assigned");
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biomes::count_seed_markers;
    use crate::growth::planting::plant_seeds;
    use rand::SeedableRng;

    #[test]
    fn test_every_seed_gets_concrete_biome() {
        let mut grid = BiomeGrid::square(8);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let points = plant_seeds(&mut grid, 20, &mut rng).unwrap();

        let seeds = assign_biomes(&mut grid, points, &BiomeWeights::uniform(), &mut rng).unwrap();
        assert_eq!(seeds.len(), 20);
        for seed in &seeds {
            assert!(seed.biome.is_concrete());
            assert_eq!(*grid.get(seed.point.row, seed.point.col).unwrap(), seed.biome);
        }
        assert!(count_seed_markers(&grid).is_empty());
    }

    #[test]
    fn test_seeds_come_back_sorted() {
        let mut grid = BiomeGrid::square(4);
        let points = vec![
            SeedPoint { row: 3, col: 1 },
            SeedPoint { row: 0, col: 2 },
            SeedPoint { row: 3, col: 0 },
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let seeds = assign_biomes(&mut grid, points, &BiomeWeights::uniform(), &mut rng).unwrap();
        let order: Vec<_> = seeds.iter().map(|s| (s.point.row, s.point.col)).collect();
        assert_eq!(order, vec![(0, 2), (3, 0), (3, 1)]);
    }

    #[test]
    fn test_single_weight_forces_biome() {
        let mut grid = BiomeGrid::square(6);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let points = plant_seeds(&mut grid, 10, &mut rng).unwrap();
        let weights = BiomeWeights([0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);

        let seeds = assign_biomes(&mut grid, points, &weights, &mut rng).unwrap();
        assert!(seeds.iter().all(|s| s.biome == BiomeLabel::Water));
    }

    #[test]
    fn test_zero_weights_fail() {
        let mut grid = BiomeGrid::square(2);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let points = vec![SeedPoint { row: 0, col: 0 }];
        let result = assign_biomes(&mut grid, points, &BiomeWeights([0.0; 6]), &mut rng);
        assert!(matches!(result, Err(GenerationError::Config(_))));
    }
}
