//! Terrain generation error types.

use crate::params::EdgeSide;

/// Errors raised while validating inputs or post-processing a heightmap.
///
/// Every error is detected before the output grid is handed back, so a caller
/// never observes a partially generated heightmap.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// The size exponent `N` is outside the supported range.
    #[error("invalid size exponent {exponent}: expected 1..={max}", max = crate::params::MAX_EXPONENT)]
    InvalidExponent {
        /// The rejected exponent.
        exponent: u32,
    },

    /// A `(min, max)` parameter pair has `min > max`.
    #[error("invalid {name} range: min {min} is greater than max {max}")]
    InvalidRange {
        /// Name of the offending parameter pair.
        name: &'static str,
        /// Lower bound supplied.
        min: f32,
        /// Upper bound supplied.
        max: f32,
    },

    /// Roughness must lie in `[0, 1]`.
    #[error("roughness {0} is outside [0, 1]")]
    RoughnessOutOfRange(f32),

    /// A scalar parameter is NaN or infinite.
    #[error("parameter {name} must be finite")]
    NonFiniteParameter {
        /// Name of the offending parameter.
        name: &'static str,
    },

    /// A preset edge does not have exactly `size` samples.
    #[error("preset {side} edge has {actual} samples, expected {expected}")]
    EdgeLengthMismatch {
        /// Edge carrying the wrong number of samples.
        side: EdgeSide,
        /// Grid size the edge must match.
        expected: usize,
        /// Number of samples supplied.
        actual: usize,
    },

    /// An edge index outside `0..4` was marked as preset.
    #[error("edge index {0} is not one of 0 (top), 1 (left), 2 (bottom), 3 (right)")]
    InvalidEdgeIndex(usize),

    /// An edge was marked as preset but carries no values.
    #[error("{0} edge is marked as preset but no values were supplied")]
    MissingPresetEdge(EdgeSide),

    /// A grid size that is unusable for the requested operation.
    #[error("invalid grid size {0}")]
    InvalidGridSize(usize),

    /// Two grids or matrices that must agree in size do not.
    #[error("dimension mismatch: expected {expected}x{expected}, got {actual}x{actual}")]
    DimensionMismatch {
        /// Size the operation was configured for.
        expected: usize,
        /// Size actually supplied.
        actual: usize,
    },

    /// Normalization over a zero-width value range.
    #[error("cannot normalize over a zero-width range [{min}, {max}]")]
    DegenerateNormalization {
        /// Lower bound of the range.
        min: f32,
        /// Upper bound of the range.
        max: f32,
    },

    /// The FFT engine only supports positive power-of-two sizes.
    #[error("unsupported transform size {0}: must be a positive power of two")]
    UnsupportedTransformSize(usize),
}

/// Convenience alias used throughout the crate.
pub type TerrainResult<T> = Result<T, TerrainError>;
