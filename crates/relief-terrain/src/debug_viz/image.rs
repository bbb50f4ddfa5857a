//! Row-major RGBA pixel buffer.

use hashbrown::HashSet;

/// One pixel as `[r, g, b, a]`.
pub type Rgba = [u8; 4];

/// An 8-bit RGBA image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DebugImage {
    /// A transparent black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Build an image by evaluating `color(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut color: impl FnMut(u32, u32) -> Rgba) -> Self {
        let mut image = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                image.set_pixel(x, y, color(x, y));
            }
        }
        image
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let idx = self.offset(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&color);
    }

    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_pixel(&self, x: u32, y: u32) -> Rgba {
        let idx = self.offset(x, y);
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA bytes, `width * height * 4` long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Nearest-neighbor upscale by an integer `factor`.
    ///
    /// Small grids (33x33) are unreadable at native size.
    pub fn upscaled(&self, factor: u32) -> Self {
        let factor = factor.max(1);
        Self::from_fn(self.width * factor, self.height * factor, |x, y| {
            self.get_pixel(x / factor, y / factor)
        })
    }

    /// Number of distinct colors, ignoring alpha.
    pub fn unique_color_count(&self) -> usize {
        self.pixels
            .chunks_exact(4)
            .map(|p| (p[0], p[1], p[2]))
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_image_dimensions() {
        let image = DebugImage::new(33, 17);
        assert_eq!(image.dimensions(), (33, 17));
        assert_eq!(image.as_bytes().len(), 33 * 17 * 4);
    }

    #[test]
    fn test_set_pixel_writes_row_major() {
        let mut image = DebugImage::new(10, 10);
        image.set_pixel(3, 5, [255, 128, 64, 255]);

        let idx = (5 * 10 + 3) * 4;
        assert_eq!(&image.as_bytes()[idx..idx + 4], &[255, 128, 64, 255]);
        assert_eq!(image.get_pixel(3, 5), [255, 128, 64, 255]);
    }

    #[test]
    fn test_upscale_replicates_pixels() {
        let image = DebugImage::from_fn(2, 1, |x, _| if x == 0 { [255, 0, 0, 255] } else { [0, 0, 255, 255] });
        let big = image.upscaled(3);

        assert_eq!(big.dimensions(), (6, 3));
        assert_eq!(big.get_pixel(2, 2), [255, 0, 0, 255]);
        assert_eq!(big.get_pixel(3, 0), [0, 0, 255, 255]);
    }

    #[test]
    fn test_unique_color_count_ignores_alpha() {
        let mut image = DebugImage::new(4, 1);
        image.set_pixel(0, 0, [255, 0, 0, 255]);
        image.set_pixel(1, 0, [0, 255, 0, 255]);
        image.set_pixel(2, 0, [255, 0, 0, 10]);
        image.set_pixel(3, 0, [0, 0, 255, 255]);
        assert_eq!(image.unique_color_count(), 3);
    }
}
