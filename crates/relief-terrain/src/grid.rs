//! Square elevation grids and their visited masks.

use std::ops::{Index, IndexMut};

use crate::error::{TerrainError, TerrainResult};
use crate::params::EdgeSide;

/// A square, row-major grid of elevations indexed by `(row, column)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ElevationGrid {
    size: usize,
    cells: Vec<f32>,
}

impl ElevationGrid {
    /// A `size x size` grid of zeros.
    pub fn new(size: usize) -> Self {
        Self::filled(size, 0.0)
    }

    /// A `size x size` grid with every cell set to `value`.
    pub fn filled(size: usize, value: f32) -> Self {
        Self {
            size,
            cells: vec![value; size * size],
        }
    }

    /// Build a grid from nested rows.
    ///
    /// # Errors
    ///
    /// [`TerrainError::InvalidGridSize`] if there are no rows and
    /// [`TerrainError::DimensionMismatch`] if any row length differs from the
    /// row count.
    pub fn from_rows(rows: &[Vec<f32>]) -> TerrainResult<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(TerrainError::InvalidGridSize(0));
        }
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(TerrainError::DimensionMismatch {
                expected: size,
                actual: row.len(),
            });
        }
        Ok(Self {
            size,
            cells: rows.concat(),
        })
    }

    /// Cells per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Elevation at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.cells[row * self.size + col]
    }

    /// Set the elevation at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is out of range.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.cells[row * self.size + col] = value;
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    /// One column, copied.
    pub fn column(&self, col: usize) -> Vec<f32> {
        (0..self.size).map(|row| self.get(row, col)).collect()
    }

    /// The samples along one boundary edge, ordered by increasing index.
    pub fn edge(&self, side: EdgeSide) -> Vec<f32> {
        let last = self.size - 1;
        match side {
            EdgeSide::Top => self.row(0).to_vec(),
            EdgeSide::Left => self.column(0),
            EdgeSide::Bottom => self.row(last).to_vec(),
            EdgeSide::Right => self.column(last),
        }
    }

    /// Smallest and largest elevation, or `None` for an empty grid.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.cells.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.cells.iter().copied()
    }

    /// Mutable iterator over all cells in row-major order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut f32> {
        self.cells.iter_mut()
    }

    /// Cells as a flat row-major slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.cells
    }

    /// Copy into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.cells.chunks(self.size).map(<[f32]>::to_vec).collect()
    }
}

impl Index<(usize, usize)> for ElevationGrid {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.cells[row * self.size + col]
    }
}

impl IndexMut<(usize, usize)> for ElevationGrid {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.cells[row * self.size + col]
    }
}

/// Tracks which cells already hold their final value during generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitedMask {
    size: usize,
    cells: Vec<bool>,
}

impl VisitedMask {
    /// A `size x size` mask with nothing visited.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Cells per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `(row, col)` has been fixed.
    #[inline]
    pub fn is_visited(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.size + col]
    }

    /// Mark `(row, col)` as fixed.
    #[inline]
    pub fn mark(&mut self, row: usize, col: usize) {
        self.cells[row * self.size + col] = true;
    }

    /// Number of fixed cells.
    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v).count()
    }

    /// Returns `true` once every cell has been fixed.
    pub fn all_visited(&self) -> bool {
        self.cells.iter().all(|&v| v)
    }
}
