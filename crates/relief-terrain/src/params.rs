//! Generation parameters shared by every algorithm.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TerrainError, TerrainResult};
use crate::seed::UniformSource;

/// Largest accepted size exponent (`2^14 + 1` cells per side).
pub const MAX_EXPONENT: u32 = 14;

/// One of the four boundary edges of a square tile.
///
/// The discriminant is the edge index used when stitching tiles together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeSide {
    /// Row 0.
    Top = 0,
    /// Column 0.
    Left = 1,
    /// Last row.
    Bottom = 2,
    /// Last column.
    Right = 3,
}

impl EdgeSide {
    /// All edges in index order.
    pub const ALL: [EdgeSide; 4] = [
        EdgeSide::Top,
        EdgeSide::Left,
        EdgeSide::Bottom,
        EdgeSide::Right,
    ];

    /// The edge index (0 = top, 1 = left, 2 = bottom, 3 = right).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up an edge by index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The edge of a neighboring tile that coincides with this one.
    pub fn opposite(self) -> Self {
        match self {
            EdgeSide::Top => EdgeSide::Bottom,
            EdgeSide::Left => EdgeSide::Right,
            EdgeSide::Bottom => EdgeSide::Top,
            EdgeSide::Right => EdgeSide::Left,
        }
    }
}

impl fmt::Display for EdgeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EdgeSide::Top => "top",
            EdgeSide::Left => "left",
            EdgeSide::Bottom => "bottom",
            EdgeSide::Right => "right",
        };
        f.write_str(name)
    }
}

/// Boundary values copied verbatim from already generated neighbors.
///
/// Edges are applied in index order, so where two preset edges meet at a
/// corner the later edge's value wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetEdges {
    edges: [Option<Vec<f32>>; 4],
}

impl PresetEdges {
    /// No preset edges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset `side` to the given values.
    pub fn with_edge(mut self, side: EdgeSide, values: Vec<f32>) -> Self {
        self.edges[side.index()] = Some(values);
        self
    }

    /// Build from an array of four optional sequences and the list of edge
    /// indices that are actually preset.
    ///
    /// Entries whose index is not listed are ignored.
    ///
    /// # Errors
    ///
    /// [`TerrainError::InvalidEdgeIndex`] for an index outside `0..4` and
    /// [`TerrainError::MissingPresetEdge`] for a listed edge without values.
    pub fn from_indexed(edges: [Option<Vec<f32>>; 4], sides: &[usize]) -> TerrainResult<Self> {
        let mut edges = edges;
        let mut preset = Self::new();
        for &index in sides {
            let side = EdgeSide::from_index(index).ok_or(TerrainError::InvalidEdgeIndex(index))?;
            let values = edges[index]
                .take()
                .or_else(|| preset.edges[index].clone())
                .ok_or(TerrainError::MissingPresetEdge(side))?;
            preset.edges[index] = Some(values);
        }
        Ok(preset)
    }

    /// Values preset on `side`, if any.
    pub fn edge(&self, side: EdgeSide) -> Option<&[f32]> {
        self.edges[side.index()].as_deref()
    }

    /// Preset edges in index order.
    pub fn sides(&self) -> impl Iterator<Item = EdgeSide> + '_ {
        EdgeSide::ALL
            .into_iter()
            .filter(|side| self.edges[side.index()].is_some())
    }

    /// Returns `true` if no edge is preset.
    pub fn is_empty(&self) -> bool {
        self.edges.iter().all(Option::is_none)
    }

    fn validate(&self, size: usize) -> TerrainResult<()> {
        for side in self.sides() {
            let values = self.edges[side.index()].as_deref().unwrap_or_default();
            if values.len() != size {
                return Err(TerrainError::EdgeLengthMismatch {
                    side,
                    expected: size,
                    actual: values.len(),
                });
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(TerrainError::NonFiniteParameter {
                    name: "preset_edges",
                });
            }
        }
        Ok(())
    }
}

/// Immutable-per-call configuration for a single heightmap generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Size exponent `N`: displacement grids are `2^N + 1` cells per side,
    /// spectral grids `2^N`.
    pub exponent: u32,
    /// Scale of the random corner seeds, relative to the grid size.
    pub initial_altitudes: f32,
    /// Multiplier applied to every random displacement.
    pub amplitude: f32,
    /// Per-level decay of the displacement scale, in `[0, 1]`.
    pub roughness: f32,
    /// Steepness of the spectral power-law filter.
    pub roughness_factor: f32,
    /// Lower clamp bound for displaced cells.
    pub min_height: f32,
    /// Upper clamp bound for displaced cells.
    pub max_height: f32,
    /// Lower bound of the uniform displacement sample.
    pub min_random_range: f32,
    /// Upper bound of the uniform displacement sample.
    pub max_random_range: f32,
    /// Boundary values shared with existing neighbor tiles.
    pub preset_edges: Option<PresetEdges>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            exponent: 5,
            initial_altitudes: 0.0,
            amplitude: 100.0,
            roughness: 0.5,
            roughness_factor: 2.0,
            min_height: -100.0,
            max_height: 300.0,
            min_random_range: -1.0,
            max_random_range: 1.0,
            preset_edges: None,
        }
    }
}

impl GenerationParams {
    /// Side length of a displacement-family grid: `2^N + 1`.
    pub fn size(&self) -> usize {
        (1usize << self.exponent) + 1
    }

    /// Side length of a spectral grid: `2^N`.
    pub fn spectral_size(&self) -> usize {
        1usize << self.exponent
    }

    /// Attach preset boundary edges.
    pub fn with_preset_edges(mut self, edges: PresetEdges) -> Self {
        self.preset_edges = (!edges.is_empty()).then_some(edges);
        self
    }

    /// Check every invariant the algorithms rely on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint as a [`TerrainError`].
    pub fn validate(&self) -> TerrainResult<()> {
        if self.exponent == 0 || self.exponent > MAX_EXPONENT {
            return Err(TerrainError::InvalidExponent {
                exponent: self.exponent,
            });
        }

        let scalars = [
            ("initial_altitudes", self.initial_altitudes),
            ("amplitude", self.amplitude),
            ("roughness", self.roughness),
            ("roughness_factor", self.roughness_factor),
            ("min_height", self.min_height),
            ("max_height", self.max_height),
            ("min_random_range", self.min_random_range),
            ("max_random_range", self.max_random_range),
        ];
        if let Some(&(name, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TerrainError::NonFiniteParameter { name });
        }

        if !(0.0..=1.0).contains(&self.roughness) {
            return Err(TerrainError::RoughnessOutOfRange(self.roughness));
        }
        if self.min_height > self.max_height {
            return Err(TerrainError::InvalidRange {
                name: "height",
                min: self.min_height,
                max: self.max_height,
            });
        }
        if self.min_random_range > self.max_random_range {
            return Err(TerrainError::InvalidRange {
                name: "random",
                min: self.min_random_range,
                max: self.max_random_range,
            });
        }

        if let Some(edges) = &self.preset_edges {
            edges.validate(self.size())?;
        }
        Ok(())
    }

    /// The displacement added to a cell at the given scale.
    #[inline]
    pub(crate) fn perturbation(&self, rng: &mut impl UniformSource, scale: f32) -> f32 {
        rng.sample(self.min_random_range, self.max_random_range) * self.amplitude * scale
    }

    /// Clamp a value into `[min_height, max_height]`.
    #[inline]
    pub(crate) fn clamp_height(&self, value: f32) -> f32 {
        value.clamp(self.min_height, self.max_height)
    }
}
