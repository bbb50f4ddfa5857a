//! Corner seeding and tile-edge stitching.
//!
//! A new tile starts with its four corners fixed. Edges shared with already
//! generated neighbors are copied verbatim so the seam between the tiles is
//! exact; any corner not covered by a preset edge is seeded randomly.

use crate::error::TerrainResult;
use crate::grid::{ElevationGrid, VisitedMask};
use crate::params::{EdgeSide, GenerationParams, PresetEdges};
use crate::seed::UniformSource;

/// Create the grid and visited mask for a displacement-family generation.
///
/// # Errors
///
/// Any validation error from [`GenerationParams::validate`], including a
/// preset edge whose length differs from `params.size()`.
pub fn initialize_boundary(
    params: &GenerationParams,
    rng: &mut impl UniformSource,
) -> TerrainResult<(ElevationGrid, VisitedMask)> {
    params.validate()?;
    let size = params.size();
    let mut grid = ElevationGrid::new(size);
    let mut visited = VisitedMask::new(size);

    if let Some(edges) = &params.preset_edges {
        apply_preset_edges(edges, &mut grid, &mut visited);
    }

    let last = size - 1;
    for (row, col) in [(0, 0), (0, last), (last, 0), (last, last)] {
        if visited.is_visited(row, col) {
            continue;
        }
        let seed = rng.sample(params.min_random_range, params.max_random_range)
            * params.initial_altitudes
            * size as f32;
        grid.set(row, col, params.clamp_height(seed));
        visited.mark(row, col);
    }

    Ok((grid, visited))
}

fn apply_preset_edges(edges: &PresetEdges, grid: &mut ElevationGrid, visited: &mut VisitedMask) {
    let last = grid.size() - 1;
    for side in edges.sides() {
        let Some(values) = edges.edge(side) else {
            continue;
        };
        for (j, &value) in values.iter().enumerate() {
            let (row, col) = match side {
                EdgeSide::Top => (0, j),
                EdgeSide::Left => (j, 0),
                EdgeSide::Bottom => (last, j),
                EdgeSide::Right => (j, last),
            };
            grid.set(row, col, value);
            visited.mark(row, col);
        }
    }
}

/// Collect the boundaries a new tile must share with its existing neighbors.
///
/// `neighbors` is indexed by [`EdgeSide`]: the tile above, to the left,
/// below and to the right. Each present neighbor contributes its opposite
/// edge (the tile above shares its bottom row, and so on). Returns `None`
/// when no neighbor exists.
pub fn neighbor_edges(neighbors: [Option<&ElevationGrid>; 4]) -> Option<PresetEdges> {
    let edges = EdgeSide::ALL
        .into_iter()
        .zip(neighbors)
        .filter_map(|(side, neighbor)| neighbor.map(|grid| (side, grid)))
        .fold(PresetEdges::new(), |edges, (side, grid)| {
            edges.with_edge(side, grid.edge(side.opposite()))
        });
    (!edges.is_empty()).then_some(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TerrainError;
    use crate::seed::RandomSource;

    fn corner_params() -> GenerationParams {
        GenerationParams {
            exponent: 3,
            initial_altitudes: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_only_corners_visited_without_presets() {
        let params = corner_params();
        let (grid, visited) = initialize_boundary(&params, &mut RandomSource::from_seed(9)).unwrap();
        let last = params.size() - 1;

        assert_eq!(visited.visited_count(), 4);
        for (r, c) in [(0, 0), (0, last), (last, 0), (last, last)] {
            assert!(visited.is_visited(r, c));
        }
        let bound = params.initial_altitudes * params.size() as f32;
        for (r, c) in [(0, 0), (0, last), (last, 0), (last, last)] {
            assert!(grid.get(r, c).abs() <= bound);
        }
    }

    #[test]
    fn test_corner_seeds_are_clamped() {
        let params = GenerationParams {
            initial_altitudes: 5.0,
            min_height: -1.0,
            max_height: 1.0,
            ..corner_params()
        };
        let (grid, _) = initialize_boundary(&params, &mut RandomSource::from_seed(4)).unwrap();
        assert!(grid.iter().all(|v| (-1.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_preset_edge_copied_and_marked() {
        let base = corner_params();
        let left: Vec<f32> = (0..base.size()).map(|i| i as f32 * 0.5).collect();
        let params = base.with_preset_edges(PresetEdges::new().with_edge(EdgeSide::Left, left.clone()));

        let (grid, visited) = initialize_boundary(&params, &mut RandomSource::from_seed(1)).unwrap();
        let last = params.size() - 1;

        assert_eq!(grid.edge(EdgeSide::Left), left);
        assert!((0..params.size()).all(|r| visited.is_visited(r, 0)));
        // Two corners come from the preset edge, two are seeded.
        assert_eq!(visited.visited_count(), params.size() + 2);
        assert!(visited.is_visited(0, last));
        assert!(visited.is_visited(last, last));
    }

    #[test]
    fn test_all_four_edges_preset_consumes_no_randomness() {
        struct Forbidden;
        impl UniformSource for Forbidden {
            fn sample(&mut self, _: f32, _: f32) -> f32 {
                panic!("no corner should need a random seed");
            }
        }

        let base = corner_params();
        let size = base.size();
        let edges = EdgeSide::ALL
            .into_iter()
            .fold(PresetEdges::new(), |e, side| e.with_edge(side, vec![side.index() as f32; size]));
        let params = base.with_preset_edges(edges);

        let (grid, visited) = initialize_boundary(&params, &mut Forbidden).unwrap();
        assert_eq!(visited.visited_count(), 4 * size - 4);
        // Right (index 3) is applied last and owns both of its corners.
        assert_eq!(grid.get(0, size - 1), 3.0);
        assert_eq!(grid.get(size - 1, size - 1), 3.0);
        // Bottom (index 2) overwrites the left edge's bottom corner.
        assert_eq!(grid.get(size - 1, 0), 2.0);
    }

    #[test]
    fn test_inverted_height_range_rejected() {
        let params = GenerationParams {
            min_height: 10.0,
            max_height: -10.0,
            ..corner_params()
        };
        let result = initialize_boundary(&params, &mut RandomSource::from_seed(2));
        assert!(matches!(
            result,
            Err(TerrainError::InvalidRange { name: "height", .. })
        ));
    }

    #[test]
    fn test_overlong_preset_edge_rejected() {
        let base = corner_params();
        let size = base.size();
        let params = base.with_preset_edges(
            PresetEdges::new().with_edge(EdgeSide::Top, vec![1.0; size + 7]),
        );
        let result = initialize_boundary(&params, &mut RandomSource::from_seed(2));
        assert!(matches!(
            result,
            Err(TerrainError::EdgeLengthMismatch { side: EdgeSide::Top, expected, actual })
                if expected == size && actual == size + 7
        ));
    }

    #[test]
    fn test_neighbor_edges_take_opposite_boundaries() {
        let rows: Vec<Vec<f32>> = (0..3)
            .map(|r| (0..3).map(|c| (r * 3 + c) as f32).collect())
            .collect();
        let above = ElevationGrid::from_rows(&rows).unwrap();
        let right = ElevationGrid::filled(3, 9.0);

        let edges = neighbor_edges([Some(&above), None, None, Some(&right)]).unwrap();
        assert_eq!(edges.edge(EdgeSide::Top), Some(&[6.0, 7.0, 8.0][..]));
        assert_eq!(edges.edge(EdgeSide::Right), Some(&[9.0, 9.0, 9.0][..]));
        assert_eq!(edges.edge(EdgeSide::Left), None);
    }

    #[test]
    fn test_neighbor_edges_none_without_neighbors() {
        assert!(neighbor_edges([None, None, None, None]).is_none());
    }
}
