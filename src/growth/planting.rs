use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::biomes::{BiomeGrid, BiomeLabel};
use crate::error::GenerationError;

use super::types::SeedPoint;

/// Plant `count` seeds at random free cells, marking each with
/// [`BiomeLabel::SeedMarker`].
///
/// Each seed draws a row then a column uniformly. If that cell is taken the
/// seed moves to the next free cell in row-major order, wrapping from the
/// last cell back to `(0, 0)`. Fails with
/// [`GenerationError::CapacityExhausted`] once every cell has been checked
/// without finding room; the grid is then partially seeded and must be
/// discarded.
pub fn plant_seeds(
    grid: &mut BiomeGrid,
    count: usize,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<SeedPoint>, GenerationError> {
    let (height, width) = (grid.height, grid.width);
    plant_seeds_with(grid, count, || {
        let row = rng.gen_range(0..height);
        let col = rng.gen_range(0..width);
        (row, col)
    })
}

/// [`plant_seeds`] with an explicit source of candidate coordinates.
pub fn plant_seeds_with<F>(
    grid: &mut BiomeGrid,
    count: usize,
    mut next_candidate: F,
) -> Result<Vec<SeedPoint>, GenerationError>
where
    F: FnMut() -> (usize, usize),
{
    let mut seeds = Vec::with_capacity(count);
    let exhausted = |planted: usize| GenerationError::CapacityExhausted {
        requested: count,
        planted,
    };

    for _ in 0..count {
        if grid.is_empty() {
            return Err(exhausted(seeds.len()));
        }

        let (row, col) = next_candidate();
        let start = grid.index(row, col)?;
        let idx = find_free_cell(grid, start).ok_or_else(|| exhausted(seeds.len()))?;

        let (row, col) = grid.coords(idx);
        if idx != start {
            debug!(row, col, "seed relocated by scan");
        }
        grid.set(row, col, BiomeLabel::SeedMarker)?;
        seeds.push(SeedPoint { row, col });
    }

    debug!(planted = seeds.len(), "seeds planted");
    Ok(seeds)
}

/// First null cell at or after `start` in row-major order, wrapping once.
fn find_free_cell(grid: &BiomeGrid, start: usize) -> Option<usize> {
    let total = grid.len();
    (0..total)
        .map(|offset| (start + offset) % total)
        .find(|&idx| grid.at(idx).is_null())
}
