//! Biome labels held by every grid cell.

use std::collections::HashMap;

use crate::tilemap::Tilemap;

/// Label of a single grid cell.
///
/// `Null` marks an unfilled cell. `SeedMarker` only exists while seeds are
/// being planted and is replaced by a concrete biome before expansion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum BiomeLabel {
    Forest,
    Grassland,
    Desert,
    Snowy,
    Mountain,
    Water,
    #[default]
    Null,
    SeedMarker,
}

/// Grid of biome labels, the arena every generation stage writes into.
pub type BiomeGrid = Tilemap<BiomeLabel>;

/// Number of concrete biomes a seed can be assigned.
pub const BIOME_COUNT: usize = 6;

impl BiomeLabel {
    /// Concrete biomes in weight order (`biome-dist` index order).
    pub const CONCRETE: [BiomeLabel; BIOME_COUNT] = [
        BiomeLabel::Forest,
        BiomeLabel::Grassland,
        BiomeLabel::Desert,
        BiomeLabel::Snowy,
        BiomeLabel::Mountain,
        BiomeLabel::Water,
    ];

    /// True for the six assignable biomes.
    pub fn is_concrete(&self) -> bool {
        !matches!(self, BiomeLabel::Null | BiomeLabel::SeedMarker)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, BiomeLabel::Null)
    }

    /// Raster colour of the label.
    pub fn color(&self) -> [u8; 3] {
        match self {
            BiomeLabel::Forest => [50, 100, 30],
            BiomeLabel::Grassland => [90, 200, 20],
            BiomeLabel::Desert => [230, 200, 150],
            BiomeLabel::Snowy => [170, 230, 240],
            BiomeLabel::Mountain => [120, 120, 120],
            BiomeLabel::Water => [10, 10, 250],
            BiomeLabel::Null => [0, 0, 0],
            // Never present in a finished map; white makes a leak obvious
            BiomeLabel::SeedMarker => [255, 255, 255],
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BiomeLabel::Forest => "Forest",
            BiomeLabel::Grassland => "Grassland",
            BiomeLabel::Desert => "Desert",
            BiomeLabel::Snowy => "Snowy",
            BiomeLabel::Mountain => "Mountain",
            BiomeLabel::Water => "Water",
            BiomeLabel::Null => "Unfilled",
            BiomeLabel::SeedMarker => "Seed",
        }
    }
}

/// Per-label cell counts of a grid.
#[derive(Clone, Debug, Default)]
pub struct BiomeStats {
    pub counts: HashMap<BiomeLabel, usize>,
    pub total_cells: usize,
}

impl BiomeStats {
    pub fn count(&self, label: BiomeLabel) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    /// Cells holding a concrete biome.
    pub fn filled(&self) -> usize {
        BiomeLabel::CONCRETE.iter().map(|&b| self.count(b)).sum()
    }

    /// Fraction of the grid holding a concrete biome (0.0-1.0).
    pub fn coverage(&self) -> f64 {
        if self.total_cells == 0 {
            0.0
        } else {
            self.filled() as f64 / self.total_cells as f64
        }
    }
}

/// Count cells per label.
pub fn calculate_biome_stats(grid: &BiomeGrid) -> BiomeStats {
    let mut counts = HashMap::new();
    for (_, _, &label) in grid.iter() {
        *counts.entry(label).or_insert(0) += 1;
    }
    BiomeStats {
        counts,
        total_cells: grid.len(),
    }
}

/// Coordinates of any cell still carrying a [`BiomeLabel::SeedMarker`].
pub fn count_seed_markers(grid: &BiomeGrid) -> Vec<(usize, usize)> {
    grid.iter()
        .filter(|(_, _, &label)| label == BiomeLabel::SeedMarker)
        .map(|(row, col, _)| (row, col))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_label_is_null() {
        let grid = BiomeGrid::square(3);
        assert!(grid.iter().all(|(_, _, l)| l.is_null()));
    }

    #[test]
    fn test_concrete_order_and_flags() {
        assert_eq!(BiomeLabel::CONCRETE[0], BiomeLabel::Forest);
        assert_eq!(BiomeLabel::CONCRETE[5], BiomeLabel::Water);
        assert!(BiomeLabel::CONCRETE.iter().all(|b| b.is_concrete()));
        assert!(!BiomeLabel::Null.is_concrete());
        assert!(!BiomeLabel::SeedMarker.is_concrete());
    }

    #[test]
    fn test_color_table() {
        assert_eq!(BiomeLabel::Forest.color(), [50, 100, 30]);
        assert_eq!(BiomeLabel::Grassland.color(), [90, 200, 20]);
        assert_eq!(BiomeLabel::Desert.color(), [230, 200, 150]);
        assert_eq!(BiomeLabel::Snowy.color(), [170, 230, 240]);
        assert_eq!(BiomeLabel::Mountain.color(), [120, 120, 120]);
        assert_eq!(BiomeLabel::Water.color(), [10, 10, 250]);
        assert_eq!(BiomeLabel::Null.color(), [0, 0, 0]);
    }

    #[test]
    fn test_stats_and_marker_scan() {
        let mut grid = BiomeGrid::square(2);
        grid.set(0, 0, BiomeLabel::Forest).unwrap();
        grid.set(1, 1, BiomeLabel::SeedMarker).unwrap();

        let stats = calculate_biome_stats(&grid);
        assert_eq!(stats.count(BiomeLabel::Forest), 1);
        assert_eq!(stats.count(BiomeLabel::Null), 2);
        assert_eq!(stats.filled(), 1);
        assert!((stats.coverage() - 0.25).abs() < 1e-9);

        assert_eq!(count_seed_markers(&grid), vec![(1, 1)]);
    }
}
