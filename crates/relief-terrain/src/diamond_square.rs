//! Iterative diamond-square subdivision.
//!
//! Each level runs a diamond step (centers of squares) followed by a square
//! step (centers of diamonds), then halves the step size and decays the
//! displacement scale by `roughness`.

use crate::boundary::initialize_boundary;
use crate::error::TerrainResult;
use crate::grid::{ElevationGrid, VisitedMask};
use crate::params::GenerationParams;
use crate::seed::UniformSource;

/// Generate a `2^N + 1` heightmap by diamond-square subdivision.
///
/// # Errors
///
/// Any validation error from [`GenerationParams::validate`].
pub fn diamond_square(
    params: &GenerationParams,
    rng: &mut impl UniformSource,
) -> TerrainResult<ElevationGrid> {
    let (mut grid, mut visited) = initialize_boundary(params, rng)?;
    let size = params.size();
    let mut scale = params.roughness * size as f32;

    let mut square_size = size - 1;
    while square_size > 1 {
        let mid = square_size / 2;
        diamond_step(&mut grid, &mut visited, params, rng, square_size, scale);
        square_step(&mut grid, &mut visited, params, rng, square_size, scale);
        tracing::trace!(square_size, scale, "diamond-square level complete");

        scale *= params.roughness;
        square_size = mid;
    }

    tracing::debug!(size, "diamond-square complete");
    Ok(grid)
}

fn diamond_step(
    grid: &mut ElevationGrid,
    visited: &mut VisitedMask,
    params: &GenerationParams,
    rng: &mut impl UniformSource,
    square_size: usize,
    scale: f32,
) {
    let size = grid.size();
    let mid = square_size / 2;

    for x in (0..size - 1).step_by(square_size) {
        for z in (0..size - 1).step_by(square_size) {
            let (cx, cz) = (x + mid, z + mid);
            if visited.is_visited(cx, cz) {
                continue;
            }
            let average = (grid.get(x, z)
                + grid.get(x + square_size, z)
                + grid.get(x + square_size, z + square_size)
                + grid.get(x, z + square_size))
                / 4.0;
            let value = average + params.perturbation(rng, scale);
            grid.set(cx, cz, params.clamp_height(value));
            visited.mark(cx, cz);
        }
    }
}

fn square_step(
    grid: &mut ElevationGrid,
    visited: &mut VisitedMask,
    params: &GenerationParams,
    rng: &mut impl UniformSource,
    square_size: usize,
    scale: f32,
) {
    let size = grid.size();
    let mid = square_size / 2;

    for x in (0..size).step_by(mid) {
        let z_start = if (x / mid) % 2 == 0 { mid } else { 0 };
        for z in (z_start..size).step_by(square_size) {
            if visited.is_visited(x, z) {
                continue;
            }
            let value = neighbor_average(grid, x, z, mid) + params.perturbation(rng, scale);
            grid.set(x, z, params.clamp_height(value));
            visited.mark(x, z);
        }
    }
}

/// Average of the in-bounds neighbors at distance `distance` along each axis.
///
/// Cells on the grid boundary have fewer than four neighbors; the divisor is
/// the number of neighbors actually summed.
pub(crate) fn neighbor_average(grid: &ElevationGrid, x: usize, z: usize, distance: usize) -> f32 {
    let size = grid.size();
    let mut sum = 0.0;
    let mut count = 0u32;

    if x >= distance {
        sum += grid.get(x - distance, z);
        count += 1;
    }
    if z >= distance {
        sum += grid.get(x, z - distance);
        count += 1;
    }
    if x + distance < size {
        sum += grid.get(x + distance, z);
        count += 1;
    }
    if z + distance < size {
        sum += grid.get(x, z + distance);
        count += 1;
    }

    if count == 0 { 0.0 } else { sum / count as f32 }
}
