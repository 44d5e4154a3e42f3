use crate::biomes::BiomeLabel;

/// Axis-aligned growth direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Evaluation order for candidate neighbours.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// Key used in `direct-dist`.
    pub fn key(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Right => 'R',
            Direction::Down => 'D',
            Direction::Left => 'L',
        }
    }

    /// Parse a `direct-dist` key (`U`, `up`, ...).
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "u" | "up" => Some(Direction::Up),
            "r" | "right" => Some(Direction::Right),
            "d" | "down" => Some(Direction::Down),
            "l" | "left" => Some(Direction::Left),
            _ => None,
        }
    }

    /// `(d_row, d_col)` offset of the neighbour in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// Grid coordinate of a planted seed. Orders row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct SeedPoint {
    pub row: usize,
    pub col: usize,
}

/// A planted seed bound to its biome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Seed {
    pub point: SeedPoint,
    pub biome: BiomeLabel,
}

/// Growable edge of one cluster: flat grid indices tagged with the cluster biome.
#[derive(Clone, Debug)]
pub struct Frontier {
    pub biome: BiomeLabel,
    pub cells: Vec<usize>,
}

impl Frontier {
    pub fn new(biome: BiomeLabel, origin: usize) -> Self {
        Self {
            biome,
            cells: vec![origin],
        }
    }

    /// An empty frontier is retired.
    pub fn is_retired(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_keys_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_key(&dir.key().to_string()), Some(dir));
        }
        assert_eq!(Direction::from_key("left"), Some(Direction::Left));
        assert_eq!(Direction::from_key("x"), None);
    }

    #[test]
    fn test_seed_points_sort_row_major() {
        let mut points = vec![
            SeedPoint { row: 2, col: 0 },
            SeedPoint { row: 0, col: 3 },
            SeedPoint { row: 0, col: 1 },
        ];
        points.sort();
        assert_eq!(
            points,
            vec![
                SeedPoint { row: 0, col: 1 },
                SeedPoint { row: 0, col: 3 },
                SeedPoint { row: 2, col: 0 },
            ]
        );
    }
}
