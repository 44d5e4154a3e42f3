use crate::error::GridError;

/// A bounded 2D grid stored as a flat row-major array.
///
/// Unlike a world map there is no wrapping: every access outside
/// `[0, height) x [0, width)` is rejected with [`GridError::OutOfBounds`].
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }

    /// Square grid with side `scale`, every cell at its default value.
    pub fn square(scale: usize) -> Self {
        Self::new(scale, scale)
    }
}

impl<T: Clone> Tilemap<T> {
    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Bounds check for signed offsets (neighbour lookups).
    pub fn contains_signed(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && self.contains(row as usize, col as usize)
    }

    /// Flat index of `(row, col)`.
    pub fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if self.contains(row, col) {
            Ok(row * self.width + col)
        } else {
            Err(GridError::OutOfBounds {
                row: row as isize,
                col: col as isize,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Inverse of [`Tilemap::index`].
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (idx / self.width, idx % self.width)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&T, GridError> {
        let idx = self.index(row, col)?;
        Ok(&self.data[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), GridError> {
        let idx = self.index(row, col)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Cell by flat index. Indices come from [`Tilemap::index`], so they are in range.
    pub fn at(&self, idx: usize) -> &T {
        &self.data[idx]
    }

    /// Iterate over all cells in row-major order as `(row, col, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let row = idx / width;
            let col = idx % width;
            (row, col, val)
        })
    }

    /// Rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.width.max(1))
    }
}
