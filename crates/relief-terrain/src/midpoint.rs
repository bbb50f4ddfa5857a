//! Recursive midpoint displacement.
//!
//! Each call resolves one quadrant: the four edge midpoints are set to the
//! average of their two adjacent corners, the center to the average of all
//! eight surrounding points, each plus a random displacement whose scale
//! decays by `roughness` per recursion level.

use crate::boundary::initialize_boundary;
use crate::error::TerrainResult;
use crate::grid::{ElevationGrid, VisitedMask};
use crate::params::GenerationParams;
use crate::seed::UniformSource;

/// Generate a `2^N + 1` heightmap by midpoint displacement.
///
/// # Errors
///
/// Any validation error from [`GenerationParams::validate`].
pub fn midpoint_displacement(
    params: &GenerationParams,
    rng: &mut impl UniformSource,
) -> TerrainResult<ElevationGrid> {
    let (mut grid, mut visited) = initialize_boundary(params, rng)?;
    let last = params.size() - 1;
    let scale = params.size() as f32 * params.roughness;

    let mut pass = Displacement {
        grid: &mut grid,
        visited: &mut visited,
        params,
        rng,
    };
    pass.displace(0, 0, last, last, scale);

    tracing::debug!(size = params.size(), "midpoint displacement complete");
    Ok(grid)
}

/// Mutable state threaded through the recursion.
struct Displacement<'a, R> {
    grid: &'a mut ElevationGrid,
    visited: &'a mut VisitedMask,
    params: &'a GenerationParams,
    rng: &'a mut R,
}

impl<R: UniformSource> Displacement<'_, R> {
    fn displace(&mut self, x1: usize, y1: usize, x2: usize, y2: usize, scale: f32) {
        if x2 - x1 <= 1 || y2 - y1 <= 1 {
            return;
        }

        let mx = (x1 + x2) / 2;
        let my = (y1 + y2) / 2;

        let top_left = self.grid.get(x1, y1);
        let top_right = self.grid.get(x1, y2);
        let bottom_left = self.grid.get(x2, y1);
        let bottom_right = self.grid.get(x2, y2);

        // Averages are taken from the corners before any midpoint is written.
        self.settle(x1, my, (top_left + top_right) / 2.0, scale);
        self.settle(mx, y1, (top_left + bottom_left) / 2.0, scale);
        self.settle(x2, my, (bottom_left + bottom_right) / 2.0, scale);
        self.settle(mx, y2, (bottom_right + top_right) / 2.0, scale);

        let center = (self.grid.get(x1, my)
            + self.grid.get(x2, my)
            + self.grid.get(mx, y1)
            + self.grid.get(mx, y2)
            + top_left
            + top_right
            + bottom_left
            + bottom_right)
            / 8.0;
        self.settle(mx, my, center, scale);

        let scale = scale * self.params.roughness;
        self.displace(x1, y1, mx, my, scale);
        self.displace(mx, y1, x2, my, scale);
        self.displace(x1, my, mx, y2, scale);
        self.displace(mx, my, x2, y2, scale);
    }

    /// Fix `(row, col)` to `base` plus a displacement unless it is already fixed.
    fn settle(&mut self, row: usize, col: usize, base: f32, scale: f32) {
        if self.visited.is_visited(row, col) {
            return;
        }
        let value = base + self.params.perturbation(&mut *self.rng, scale);
        self.grid.set(row, col, self.params.clamp_height(value));
        self.visited.mark(row, col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TerrainError;
    use crate::params::{EdgeSide, PresetEdges};
    use crate::seed::RandomSource;

    /// Always returns the midpoint of the requested range.
    struct Centered;

    impl UniformSource for Centered {
        fn sample(&mut self, min: f32, max: f32) -> f32 {
            (min + max) / 2.0
        }
    }

    fn params() -> GenerationParams {
        GenerationParams {
            exponent: 5,
            initial_altitudes: 1.0,
            amplitude: 1.0,
            roughness: 0.5,
            min_height: -100.0,
            max_height: 300.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_output_within_height_bounds() {
        let params = GenerationParams {
            amplitude: 4.0,
            roughness: 0.9,
            min_height: -20.0,
            max_height: 20.0,
            ..params()
        };
        let grid = midpoint_displacement(&params, &mut RandomSource::from_seed(11)).unwrap();
        assert_eq!(grid.size(), 33);
        for v in grid.iter() {
            assert!((-20.0..=20.0).contains(&v), "Value {v} escaped the clamp");
        }
    }

    #[test]
    fn test_same_seed_is_bit_identical() {
        let a = midpoint_displacement(&params(), &mut RandomSource::from_seed(42)).unwrap();
        let b = midpoint_displacement(&params(), &mut RandomSource::from_seed(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_cell_is_resolved() {
        // Unresolved cells would keep their initial zero.
        let params = GenerationParams {
            exponent: 3,
            ..params()
        };
        let size = params.size();
        let edges = PresetEdges::new()
            .with_edge(EdgeSide::Top, vec![8.0; size])
            .with_edge(EdgeSide::Bottom, vec![8.0; size]);
        let grid = midpoint_displacement(&params.with_preset_edges(edges), &mut Centered).unwrap();
        for v in grid.iter() {
            assert!(
                (v - 8.0).abs() < 1e-5,
                "Averages of a constant boundary must stay constant, got {v}"
            );
        }
    }

    #[test]
    fn test_preset_edge_survives_generation() {
        let base = params();
        let size = base.size();
        let top: Vec<f32> = (0..size).map(|i| (i as f32 * 0.37).sin() * 50.0).collect();
        let params = base.with_preset_edges(PresetEdges::new().with_edge(EdgeSide::Top, top.clone()));

        let grid = midpoint_displacement(&params, &mut RandomSource::from_seed(5)).unwrap();
        assert_eq!(grid.edge(EdgeSide::Top), top);
    }

    #[test]
    fn test_inverted_height_range_is_an_error() {
        let params = GenerationParams {
            min_height: 10.0,
            max_height: -10.0,
            ..params()
        };
        let err = midpoint_displacement(&params, &mut RandomSource::from_seed(3)).unwrap_err();
        assert!(matches!(err, TerrainError::InvalidRange { name: "height", .. }));
    }

    #[test]
    fn test_zero_roughness_interpolates_corners() {
        let params = GenerationParams {
            exponent: 2,
            roughness: 0.0,
            ..params()
        };
        // scale = size * roughness = 0, so nothing is ever displaced.
        let grid = midpoint_displacement(&params, &mut RandomSource::from_seed(8)).unwrap();
        let (min, max) = grid.min_max().unwrap();
        let corners = [
            grid.get(0, 0),
            grid.get(0, 4),
            grid.get(4, 0),
            grid.get(4, 4),
        ];
        let lo = corners.iter().copied().fold(f32::INFINITY, f32::min);
        let hi = corners.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!(min >= lo - 1e-5 && max <= hi + 1e-5);
    }
}
