//! Spectral synthesis: white noise shaped by a radial power-law filter.
//!
//! The noise is moved into the frequency domain, every bin is divided by
//! `frequency^(roughness_factor * (1 - roughness))`, and the result is
//! transformed back. Higher `roughness_factor` or lower `roughness` attenuates
//! high frequencies more strongly and yields smoother terrain. No height
//! clamping is applied; normalization is the only range control.

use crate::error::{TerrainError, TerrainResult};
use crate::fft::{ComplexMatrix, Fft2d};
use crate::grid::ElevationGrid;
use crate::params::GenerationParams;
use crate::seed::{UniformSource, det_pow, det_sqrt};

/// Parameters of a spectral synthesis run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpectralParams {
    /// Side length; must be a power of two.
    pub size: usize,
    /// Noise amplitude; samples are scaled by `amplitude * size`.
    pub amplitude: f32,
    /// Roughness in `[0, 1]`; `1` disables the filter entirely.
    pub roughness: f32,
    /// Steepness of the power-law filter.
    pub roughness_factor: f32,
}

impl SpectralParams {
    /// Spectral parameters for a `2^N` grid derived from shared parameters.
    pub fn from_generation(params: &GenerationParams) -> Self {
        Self {
            size: params.spectral_size(),
            amplitude: params.amplitude,
            roughness: params.roughness,
            roughness_factor: params.roughness_factor,
        }
    }

    /// Exponent applied to the radial frequency of each bin.
    pub fn filter_exponent(&self) -> f64 {
        f64::from(self.roughness_factor) * (1.0 - f64::from(self.roughness))
    }

    /// Check the size and scalar parameters.
    ///
    /// # Errors
    ///
    /// [`TerrainError::UnsupportedTransformSize`] for a size that is not a
    /// positive power of two, [`TerrainError::RoughnessOutOfRange`] and
    /// [`TerrainError::NonFiniteParameter`] for bad scalars.
    pub fn validate(&self) -> TerrainResult<()> {
        if !self.size.is_power_of_two() {
            return Err(TerrainError::UnsupportedTransformSize(self.size));
        }
        for (name, value) in [
            ("amplitude", self.amplitude),
            ("roughness", self.roughness),
            ("roughness_factor", self.roughness_factor),
        ] {
            if !value.is_finite() {
                return Err(TerrainError::NonFiniteParameter { name });
            }
        }
        if !(0.0..=1.0).contains(&self.roughness) {
            return Err(TerrainError::RoughnessOutOfRange(self.roughness));
        }
        Ok(())
    }
}

/// Uniform `[0, 1)` noise scaled by `scale`.
pub fn white_noise(size: usize, scale: f32, rng: &mut impl UniformSource) -> ElevationGrid {
    let mut grid = ElevationGrid::new(size);
    for cell in grid.iter_mut() {
        *cell = rng.sample(0.0, 1.0) * scale;
    }
    grid
}

/// Divide every bin `(x, z)` by `sqrt(x^2 + z^2)^exponent`.
///
/// The zero-frequency bin is treated as frequency 1 and passes unchanged.
pub fn attenuate(spectrum: &mut ComplexMatrix, exponent: f64) {
    let size = spectrum.size();
    for x in 0..size {
        for z in 0..size {
            let frequency = det_sqrt((x * x + z * z) as f64);
            let frequency = if frequency == 0.0 { 1.0 } else { frequency };
            let value = spectrum[(x, z)];
            spectrum[(x, z)] = value / det_pow(frequency, exponent);
        }
    }
}

/// Synthesize an isotropic fractal surface.
///
/// # Errors
///
/// Any error from [`SpectralParams::validate`].
pub fn synthesize(params: &SpectralParams, rng: &mut impl UniformSource) -> TerrainResult<ElevationGrid> {
    params.validate()?;
    let fft = Fft2d::new(params.size)?;

    let noise = white_noise(params.size, params.amplitude * params.size as f32, rng);
    let mut spectrum = fft.forward(&noise)?;
    attenuate(&mut spectrum, params.filter_exponent());
    let grid = fft.inverse(&spectrum)?;

    tracing::debug!(
        size = params.size,
        exponent = params.filter_exponent(),
        "spectral synthesis complete"
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft::Complex;
    use crate::seed::RandomSource;

    fn params() -> SpectralParams {
        SpectralParams {
            size: 64,
            amplitude: 10.0,
            roughness: 0.5,
            roughness_factor: 2.0,
        }
    }

    /// Mean absolute difference between horizontally and vertically adjacent
    /// cells, relative to the grid's mean magnitude.
    fn relative_jaggedness(grid: &ElevationGrid) -> f64 {
        let n = grid.size();
        let mut total = 0.0;
        let mut count = 0usize;
        for r in 0..n {
            for c in 0..n {
                if c + 1 < n {
                    total += f64::from((grid.get(r, c + 1) - grid.get(r, c)).abs());
                    count += 1;
                }
                if r + 1 < n {
                    total += f64::from((grid.get(r + 1, c) - grid.get(r, c)).abs());
                    count += 1;
                }
            }
        }
        let mean: f64 = grid.iter().map(|v| f64::from(v.abs())).sum::<f64>() / (n * n) as f64;
        total / count as f64 / mean
    }

    #[test]
    fn test_output_shape() {
        let grid = synthesize(&params(), &mut RandomSource::from_seed(42)).unwrap();
        assert_eq!(grid.size(), 64);
        assert!(grid.iter().all(|v| v.is_finite() && v >= 0.0));
    }

    #[test]
    fn test_smoother_than_source_noise() {
        let params = params();
        let noise = white_noise(
            params.size,
            params.amplitude * params.size as f32,
            &mut RandomSource::from_seed(42),
        );
        let surface = synthesize(&params, &mut RandomSource::from_seed(42)).unwrap();

        let noise_jag = relative_jaggedness(&noise);
        let surface_jag = relative_jaggedness(&surface);
        assert!(
            surface_jag < noise_jag * 0.5,
            "Filtered surface should be much smoother: noise={noise_jag}, surface={surface_jag}"
        );
    }

    #[test]
    fn test_full_roughness_reproduces_noise() {
        // Exponent 0 leaves the spectrum untouched.
        let params = SpectralParams {
            size: 16,
            roughness: 1.0,
            ..params()
        };
        let noise = white_noise(16, params.amplitude * 16.0, &mut RandomSource::from_seed(3));
        let surface = synthesize(&params, &mut RandomSource::from_seed(3)).unwrap();
        for (a, b) in noise.iter().zip(surface.iter()) {
            assert!((a - b).abs() <= 1e-3 * a.max(1.0), "{a} vs {b}");
        }
    }

    #[test]
    fn test_attenuate_leaves_dc_and_scales_bins() {
        let mut spectrum = ComplexMatrix::zeros(4);
        spectrum[(0, 0)] = Complex::new(8.0, 0.0);
        spectrum[(0, 2)] = Complex::new(4.0, 4.0);
        spectrum[(3, 0)] = Complex::new(9.0, 0.0);
        attenuate(&mut spectrum, 1.0);

        assert_eq!(spectrum[(0, 0)], Complex::new(8.0, 0.0));
        assert_eq!(spectrum[(0, 2)], Complex::new(2.0, 2.0));
        assert_eq!(spectrum[(3, 0)], Complex::new(3.0, 0.0));
    }

    #[test]
    fn test_validate_rejects_bad_size_and_roughness() {
        assert_eq!(
            SpectralParams {
                size: 33,
                ..params()
            }
            .validate(),
            Err(TerrainError::UnsupportedTransformSize(33))
        );
        assert_eq!(
            SpectralParams {
                roughness: -0.1,
                ..params()
            }
            .validate(),
            Err(TerrainError::RoughnessOutOfRange(-0.1))
        );
    }

    #[test]
    fn test_same_seed_is_bit_identical() {
        let a = synthesize(&params(), &mut RandomSource::from_seed(9)).unwrap();
        let b = synthesize(&params(), &mut RandomSource::from_seed(9)).unwrap();
        assert_eq!(a, b);
    }
}
