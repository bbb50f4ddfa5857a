//! Heightmap normalization and range bookkeeping.
//!
//! A normalized grid holds values in `[0, 1]`; the range returned alongside
//! it is the vertical world scale, so `denormalize(v, min, range)` recovers
//! the raw elevation.

use crate::error::{TerrainError, TerrainResult};
use crate::grid::ElevationGrid;

/// Rescale `grid` to `[0, 1]` using its observed minimum and maximum.
///
/// Returns the observed `max - min`.
///
/// # Errors
///
/// [`TerrainError::DegenerateNormalization`] when every cell holds the same
/// value (or the grid is empty). The grid is left untouched.
pub fn normalize(grid: &mut ElevationGrid) -> TerrainResult<f32> {
    let (min, max) = grid
        .min_max()
        .ok_or(TerrainError::DegenerateNormalization { min: 0.0, max: 0.0 })?;
    normalize_with_bounds(grid, min, max)
}

/// Rescale `grid` from the caller-supplied `[min, max]` to `[0, 1]`.
///
/// Cells outside the bounds map outside `[0, 1]`; no clamping is applied.
/// Returns `max - min`.
///
/// # Errors
///
/// [`TerrainError::DegenerateNormalization`] when `min == max`,
/// [`TerrainError::InvalidRange`] when `min > max` and
/// [`TerrainError::NonFiniteParameter`] for NaN or infinite bounds. The grid is
/// left untouched on error.
pub fn normalize_with_bounds(grid: &mut ElevationGrid, min: f32, max: f32) -> TerrainResult<f32> {
    if !min.is_finite() || !max.is_finite() {
        return Err(TerrainError::NonFiniteParameter {
            name: "normalization bounds",
        });
    }
    if min > max {
        return Err(TerrainError::InvalidRange {
            name: "normalization",
            min,
            max,
        });
    }
    let range = max - min;
    if range == 0.0 {
        return Err(TerrainError::DegenerateNormalization { min, max });
    }

    for cell in grid.iter_mut() {
        *cell = (*cell - min) / range;
    }
    Ok(range)
}

/// Linearly map `value` from the interval `from` onto the interval `to`.
///
/// A zero-width `from` interval maps everything to `to.0`.
pub fn map_range(value: f32, from: (f32, f32), to: (f32, f32)) -> f32 {
    let span = from.1 - from.0;
    if span == 0.0 {
        return to.0;
    }
    to.0 + (value - from.0) * (to.1 - to.0) / span
}

/// Recover a raw elevation from a normalized value.
#[inline]
pub fn denormalize(value: f32, min: f32, range: f32) -> f32 {
    value * range + min
}

/// Running minimum and maximum across several grids.
///
/// Used to size a shared world scale for tiles that were generated
/// independently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightRange {
    min: f32,
    max: f32,
}

impl Default for HeightRange {
    fn default() -> Self {
        Self::new()
    }
}

impl HeightRange {
    /// An empty range that any value will widen.
    pub fn new() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        }
    }

    /// Widen the range to include `value`.
    pub fn include(&mut self, value: f32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Widen the range to include every cell of `grid`.
    pub fn include_grid(&mut self, grid: &ElevationGrid) {
        if let Some((min, max)) = grid.min_max() {
            self.include(min);
            self.include(max);
        }
    }

    /// Whether nothing has been included yet.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// `(min, max)` seen so far.
    pub fn bounds(&self) -> Option<(f32, f32)> {
        (!self.is_empty()).then_some((self.min, self.max))
    }

    /// `max - min`, or `None` when empty.
    pub fn span(&self) -> Option<f32> {
        self.bounds().map(|(min, max)| max - min)
    }
}
