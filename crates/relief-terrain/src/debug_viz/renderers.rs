//! Heightmap renderers.

use serde::{Deserialize, Serialize};

use super::image::{DebugImage, Rgba};
use crate::grid::ElevationGrid;

/// How a heightmap preview is colored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreviewStyle {
    /// Elevation bands from deep water to snow.
    #[default]
    Terrain,
    /// Black (lowest) to white (highest).
    Grayscale,
}

/// Map a normalized height in `[0, 1]` to a banded terrain color.
///
/// `sea_level` is also normalized. Bands: deep water, shallow water, beach,
/// lowlands, mountains, snow.
pub fn height_to_color(normalized: f32, sea_level: f32) -> Rgba {
    let sea_level = sea_level.clamp(0.0, 0.55);

    if normalized < sea_level * 0.5 {
        [0, 0, 128, 255]
    } else if normalized < sea_level {
        [30, 80, 200, 255]
    } else if normalized < sea_level + 0.02 {
        [220, 200, 130, 255]
    } else if normalized < 0.55 {
        let t = ((normalized - sea_level) / (0.55 - sea_level)).clamp(0.0, 1.0);
        [
            (30.0 + t * 80.0) as u8,
            (160.0 - t * 40.0) as u8,
            (30.0 + t * 20.0) as u8,
            255,
        ]
    } else if normalized < 0.75 {
        let t = (normalized - 0.55) / 0.2;
        [
            (110.0 + t * 40.0) as u8,
            (120.0 - t * 50.0) as u8,
            (50.0 + t * 20.0) as u8,
            255,
        ]
    } else {
        let t = ((normalized - 0.75) / 0.25).min(1.0);
        let base = (150.0 + t * 105.0) as u8;
        [base, base, base, 255]
    }
}

/// Scale `value` into `[0, 1]` by the grid's observed range.
///
/// A flat grid renders as mid-gray rather than failing.
fn unit_scaler(grid: &ElevationGrid) -> impl Fn(f32) -> f32 {
    let (min, max) = grid.min_max().unwrap_or((0.0, 0.0));
    let range = max - min;
    move |value| {
        if range > 0.0 {
            ((value - min) / range).clamp(0.0, 1.0)
        } else {
            0.5
        }
    }
}

/// Render a color-banded preview; pixel `(x, y)` is cell `(row y, column x)`.
pub fn render_heightmap_debug(grid: &ElevationGrid, sea_level: f32) -> DebugImage {
    let scale = unit_scaler(grid);
    let size = grid.size() as u32;
    DebugImage::from_fn(size, size, |x, y| {
        height_to_color(scale(grid.get(y as usize, x as usize)), sea_level)
    })
}

/// Render a grayscale preview.
pub fn render_grayscale(grid: &ElevationGrid) -> DebugImage {
    let scale = unit_scaler(grid);
    let size = grid.size() as u32;
    DebugImage::from_fn(size, size, |x, y| {
        let level = (scale(grid.get(y as usize, x as usize)) * 255.0).round() as u8;
        [level, level, level, 255]
    })
}

/// Render with the requested style.
pub fn render_preview(grid: &ElevationGrid, style: PreviewStyle, sea_level: f32) -> DebugImage {
    match style {
        PreviewStyle::Terrain => render_heightmap_debug(grid, sea_level),
        PreviewStyle::Grayscale => render_grayscale(grid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{Algorithm, generate};
    use crate::params::GenerationParams;

    #[test]
    fn test_color_bands_ordered_by_height() {
        let deep = height_to_color(0.05, 0.4);
        let shallow = height_to_color(0.3, 0.4);
        let beach = height_to_color(0.41, 0.4);
        let snow = height_to_color(1.0, 0.4);

        assert_eq!(deep, [0, 0, 128, 255]);
        assert_eq!(shallow, [30, 80, 200, 255]);
        assert_eq!(beach, [220, 200, 130, 255]);
        assert_eq!(snow, [255, 255, 255, 255]);
    }

    #[test]
    fn test_zero_sea_level_has_no_water() {
        let color = height_to_color(0.0, 0.0);
        assert_ne!(color, [0, 0, 128, 255]);
        assert_ne!(color, [30, 80, 200, 255]);
    }

    #[test]
    fn test_heightmap_render_matches_grid_size_and_varies() {
        let params = GenerationParams {
            exponent: 6,
            initial_altitudes: 1.0,
            amplitude: 2.0,
            roughness: 0.6,
            ..Default::default()
        };
        let grid = generate(Algorithm::DiamondSquares, &params, 42).unwrap();
        let image = render_heightmap_debug(&grid, 0.4);

        assert_eq!(image.dimensions(), (65, 65));
        assert!(
            image.unique_color_count() > 5,
            "Generated terrain should span several color bands, got {}",
            image.unique_color_count()
        );
    }

    #[test]
    fn test_grayscale_maps_extremes_to_black_and_white() {
        let grid = ElevationGrid::from_rows(&[vec![-5.0, 0.0], vec![2.5, 5.0]]).unwrap();
        let image = render_grayscale(&grid);

        assert_eq!(image.get_pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(1, 1), [255, 255, 255, 255]);
        // Pixel (x = 0, y = 1) is row 1, column 0.
        assert_eq!(image.get_pixel(0, 1), [191, 191, 191, 255]);
    }

    #[test]
    fn test_flat_grid_renders_mid_gray() {
        let image = render_preview(&ElevationGrid::filled(4, 3.0), PreviewStyle::Grayscale, 0.4);
        assert_eq!(image.unique_color_count(), 1);
        assert_eq!(image.get_pixel(2, 2), [128, 128, 128, 255]);
    }
}
