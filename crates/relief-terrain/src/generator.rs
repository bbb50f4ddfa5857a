//! Algorithm dispatch and the generation entry points.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diamond_square::diamond_square;
use crate::error::TerrainResult;
use crate::grid::ElevationGrid;
use crate::midpoint::midpoint_displacement;
use crate::normalize::{normalize, normalize_with_bounds};
use crate::params::GenerationParams;
use crate::seed::{RandomSource, UniformSource};
use crate::spectral::{SpectralParams, synthesize};

/// The three interchangeable heightmap algorithms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Recursive midpoint displacement on a `2^N + 1` grid.
    MidpointDisplacement,
    /// Iterative diamond-square on a `2^N + 1` grid.
    #[default]
    DiamondSquares,
    /// Spectral synthesis on a `2^N` grid.
    FastFourierTransform,
}

impl Algorithm {
    /// All algorithms in declaration order.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::MidpointDisplacement,
        Algorithm::DiamondSquares,
        Algorithm::FastFourierTransform,
    ];

    /// Short lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::MidpointDisplacement => "midpoint",
            Algorithm::DiamondSquares => "diamond-square",
            Algorithm::FastFourierTransform => "fft",
        }
    }

    /// Side length of the grid this algorithm produces for `params`.
    pub fn output_size(self, params: &GenerationParams) -> usize {
        match self {
            Algorithm::FastFourierTransform => params.spectral_size(),
            _ => params.size(),
        }
    }

    /// Whether the algorithm honors preset edges and height clamping.
    pub fn supports_stitching(self) -> bool {
        self != Algorithm::FastFourierTransform
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An algorithm name that matched none of the known spellings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm '{0}': expected midpoint, diamond-square or fft")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "midpoint" | "midpoint-displacement" | "midpointdisplacement" => {
                Ok(Algorithm::MidpointDisplacement)
            }
            "diamond-square" | "diamond-squares" | "diamondsquares" | "ds" => {
                Ok(Algorithm::DiamondSquares)
            }
            "fft" | "spectral" | "fast-fourier-transform" | "fastfouriertransform" => {
                Ok(Algorithm::FastFourierTransform)
            }
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Generate a raw heightmap.
///
/// A `seed` of [`crate::RANDOM_SEED`] picks a fresh seed; the effective seed
/// is logged so the run can be reproduced.
///
/// # Errors
///
/// Any validation error from [`GenerationParams::validate`]. Nothing is
/// allocated before validation succeeds.
pub fn generate(
    algorithm: Algorithm,
    params: &GenerationParams,
    seed: u64,
) -> TerrainResult<ElevationGrid> {
    params.validate()?;
    let mut rng = RandomSource::from_seed(seed);
    tracing::info!(
        %algorithm,
        size = algorithm.output_size(params),
        seed = rng.seed(),
        "generating heightmap"
    );
    generate_with(algorithm, params, &mut rng)
}

/// Generate a raw heightmap drawing randomness from `rng`.
///
/// # Errors
///
/// Any validation error from [`GenerationParams::validate`].
pub fn generate_with(
    algorithm: Algorithm,
    params: &GenerationParams,
    rng: &mut impl UniformSource,
) -> TerrainResult<ElevationGrid> {
    params.validate()?;
    if !algorithm.supports_stitching() && params.preset_edges.is_some() {
        tracing::warn!(%algorithm, "preset edges are ignored by spectral synthesis");
    }

    let grid = match algorithm {
        Algorithm::MidpointDisplacement => midpoint_displacement(params, rng)?,
        Algorithm::DiamondSquares => diamond_square(params, rng)?,
        Algorithm::FastFourierTransform => {
            synthesize(&SpectralParams::from_generation(params), rng)?
        }
    };
    Ok(grid)
}

/// How [`generate_normalized`] rescales the raw grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Normalization {
    /// Rescale by the grid's observed minimum and maximum.
    #[default]
    Observed,
    /// Rescale by the parameters' `[min_height, max_height]`.
    HeightBounds,
    /// Keep raw elevations.
    None,
}

/// A generated grid plus the scale needed to map it back to world heights.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedHeightmap {
    /// Normalized (or raw, for [`Normalization::None`]) elevations.
    pub grid: ElevationGrid,
    /// Vertical world scale: `world = value * range + offset`.
    pub range: f32,
    /// Elevation that normalized `0.0` corresponds to.
    pub offset: f32,
    /// Effective seed of the run.
    pub seed: u64,
}

impl NormalizedHeightmap {
    /// World elevation of the cell at `(row, col)`.
    pub fn world_height(&self, row: usize, col: usize) -> f32 {
        crate::normalize::denormalize(self.grid.get(row, col), self.offset, self.range)
    }
}

/// Generate and normalize a heightmap in one call.
///
/// # Errors
///
/// Validation errors, plus
/// [`crate::TerrainError::DegenerateNormalization`] when the requested
/// normalization has a zero-width range (for example a perfectly flat grid).
pub fn generate_normalized(
    algorithm: Algorithm,
    params: &GenerationParams,
    seed: u64,
    normalization: Normalization,
) -> TerrainResult<NormalizedHeightmap> {
    params.validate()?;
    let mut rng = RandomSource::from_seed(seed);
    let seed = rng.seed();
    tracing::info!(
        %algorithm,
        size = algorithm.output_size(params),
        seed,
        ?normalization,
        "generating heightmap"
    );

    let mut grid = generate_with(algorithm, params, &mut rng)?;
    let (range, offset) = match normalization {
        Normalization::Observed => {
            let min = grid.min_max().map_or(0.0, |(min, _)| min);
            (normalize(&mut grid)?, min)
        }
        Normalization::HeightBounds => (
            normalize_with_bounds(&mut grid, params.min_height, params.max_height)?,
            params.min_height,
        ),
        Normalization::None => (1.0, 0.0),
    };

    Ok(NormalizedHeightmap {
        grid,
        range,
        offset,
        seed,
    })
}
