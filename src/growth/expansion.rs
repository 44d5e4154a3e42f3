//! Randomized flood fill from assigned seeds.
//!
//! Every cluster keeps a frontier of cells that may still grow. All
//! clusters advance in lockstep rounds, in seed order. For each frontier
//! cell a round:
//!
//! 1. collects candidate neighbours (Up, Right, Down, Left) that are inside
//!    the grid, still `Null`, and carry a positive direction weight;
//! 2. retires the cell if there are none;
//! 3. otherwise picks how many neighbours to claim (fixed or random rolls)
//!    and draws them by weight without replacement, labelling each with the
//!    cluster biome;
//! 4. carries the cell and every claimed neighbour into the next frontier.
//!
//! A cluster whose next frontier is empty retires. Only `Null` cells are
//! ever written, so the first cluster to reach a contested cell keeps it.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::biomes::{BiomeGrid, BiomeLabel};
use crate::config::{DirectionWeights, Rolls};
use crate::error::GenerationError;

use super::sampling::weighted_index;
use super::types::{Direction, Frontier, Seed};

/// Summary of one finished round, passed to round observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundReport {
    /// 1-based round number
    pub round: usize,
    /// Clusters still active after this round
    pub active_clusters: usize,
    /// Cells claimed during this round
    pub cells_grown: usize,
}

/// Totals for a full expansion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ExpansionStats {
    /// Clusters at the start (one per seed)
    pub clusters: usize,
    /// Rounds executed, including the final round in which nothing grew
    pub rounds: usize,
    /// Rounds in which at least one cell was claimed
    pub growth_rounds: usize,
    /// Cells claimed across all rounds (seeds excluded)
    pub cells_grown: usize,
}

/// Grow every seed's cluster until all frontiers are retired.
///
/// `observer` is called after each round with its report and the grid.
pub fn expand_frontiers(
    grid: &mut BiomeGrid,
    seeds: &[Seed],
    weights: &DirectionWeights,
    rolls: Rolls,
    rng: &mut ChaCha8Rng,
    mut observer: Option<&mut dyn FnMut(&RoundReport, &BiomeGrid)>,
) -> Result<ExpansionStats, GenerationError> {
    let mut frontiers = seeds
        .iter()
        .map(|seed| -> Result<Frontier, GenerationError> {
            let origin = grid.index(seed.point.row, seed.point.col)?;
            Ok(Frontier::new(seed.biome, origin))
        })
        .collect::<Result<Vec<_>, GenerationError>>()?;

    let mut stats = ExpansionStats {
        clusters: frontiers.len(),
        ..Default::default()
    };

    while !frontiers.is_empty() {
        let mut grown = 0;
        for frontier in frontiers.iter_mut() {
            let mut next = Vec::with_capacity(frontier.cells.len() * 2);
            for &cell in &frontier.cells {
                grown += grow_cell(grid, cell, frontier.biome, weights, rolls, rng, &mut next)?;
            }
            frontier.cells = next;
        }
        frontiers.retain(|f| !f.is_retired());

        stats.rounds += 1;
        stats.cells_grown += grown;
        if grown > 0 {
            stats.growth_rounds += 1;
        }

        let report = RoundReport {
            round: stats.rounds,
            active_clusters: frontiers.len(),
            cells_grown: grown,
        };
        debug!(
            round = report.round,
            active = report.active_clusters,
            grown = report.cells_grown,
            "expansion round"
        );
        if let Some(observe) = observer.as_deref_mut() {
            observe(&report, &*grid);
        }
    }

    info!(
        clusters = stats.clusters,
        rounds = stats.rounds,
        cells = stats.cells_grown,
        "frontier expansion complete"
    );
    Ok(stats)
}

/// Grow one frontier cell, pushing survivors into `next`. Returns cells claimed.
fn grow_cell(
    grid: &mut BiomeGrid,
    cell: usize,
    biome: BiomeLabel,
    weights: &DirectionWeights,
    rolls: Rolls,
    rng: &mut ChaCha8Rng,
    next: &mut Vec<usize>,
) -> Result<usize, GenerationError> {
    let mut candidates = candidate_directions(grid, cell, weights);
    if candidates.is_empty() {
        return Ok(0);
    }

    let draws = match rolls {
        Rolls::Fixed(n) => n.min(candidates.len()),
        Rolls::Random => rng.gen_range(1..=candidates.len()),
    };

    next.push(cell);
    let mut claimed = 0;
    for _ in 0..draws {
        let pool: Vec<f64> = candidates.iter().map(|&(dir, _)| weights.weight(dir)).collect();
        let Some(pick) = weighted_index(rng, &pool) else {
            break;
        };
        let (_, target) = candidates.remove(pick);
        let (row, col) = grid.coords(target);
        grid.set(row, col, biome)?;
        next.push(target);
        claimed += 1;
    }

    Ok(claimed)
}

/// Neighbours of `cell` a cluster may grow into, in [`Direction::ALL`] order.
pub(crate) fn candidate_directions(
    grid: &BiomeGrid,
    cell: usize,
    weights: &DirectionWeights,
) -> Vec<(Direction, usize)> {
    let (row, col) = grid.coords(cell);
    Direction::ALL
        .iter()
        .filter(|&&dir| weights.weight(dir) > 0.0)
        .filter_map(|&dir| {
            let (dr, dc) = dir.offset();
            let (nr, nc) = (row as isize + dr, col as isize + dc);
            if !grid.contains_signed(nr, nc) {
                return None;
            }
            let target = grid.index(nr as usize, nc as usize).ok()?;
            grid.at(target).is_null().then_some((dir, target))
        })
        .collect()
}
