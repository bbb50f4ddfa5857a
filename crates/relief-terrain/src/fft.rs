//! Square 2D Fourier transforms built from a radix-2 1D transform.
//!
//! The 2D transform is separable: transform every row, transpose, transform
//! every row again (which is the column transform of the original), then
//! transpose back so spectra are indexed `[row_frequency][column_frequency]`.

use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};

use crate::error::{TerrainError, TerrainResult};
use crate::grid::ElevationGrid;
use crate::seed::{det_cos, det_sin};

// ---------------------------------------------------------------------------
// Complex numbers
// ---------------------------------------------------------------------------

/// A complex number with `f64` components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex {
    /// Zero.
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    /// Creates a new complex number.
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Creates a complex number from polar coordinates.
    pub fn from_polar(magnitude: f64, phase: f64) -> Self {
        Self {
            re: magnitude * det_cos(phase),
            im: magnitude * det_sin(phase),
        }
    }

    /// Magnitude (absolute value).
    pub fn norm(&self) -> f64 {
        libm::hypot(self.re, self.im)
    }

    /// Complex conjugate.
    pub fn conj(&self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }
}

impl Add for Complex {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.re * rhs, self.im * rhs)
    }
}

impl Div<f64> for Complex {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.re / rhs, self.im / rhs)
    }
}

// ---------------------------------------------------------------------------
// Complex matrices
// ---------------------------------------------------------------------------

/// A square, row-major matrix of complex values.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexMatrix {
    size: usize,
    data: Vec<Complex>,
}

impl ComplexMatrix {
    /// A `size x size` matrix of zeros.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            data: vec![Complex::ZERO; size * size],
        }
    }

    /// Lift a real grid into the complex plane (imaginary parts zero).
    pub fn from_real(grid: &ElevationGrid) -> Self {
        Self {
            size: grid.size(),
            data: grid
                .iter()
                .map(|v| Complex::new(f64::from(v), 0.0))
                .collect(),
        }
    }

    /// Cells per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[Complex] {
        let start = row * self.size;
        &self.data[start..start + self.size]
    }

    /// One row as a mutable slice.
    pub fn row_mut(&mut self, row: usize) -> &mut [Complex] {
        let start = row * self.size;
        &mut self.data[start..start + self.size]
    }

    /// Swap rows and columns: element `[l][k]` becomes element `[k][l]`.
    pub fn transpose(&self) -> Self {
        let n = self.size;
        let mut out = Self::zeros(n);
        for l in 0..n {
            for k in 0..n {
                out.data[k * n + l] = self.data[l * n + k];
            }
        }
        out
    }

    /// Iterate over all values in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Complex> {
        self.data.iter()
    }

    /// Mutable iterator over all values in row-major order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Complex> {
        self.data.iter_mut()
    }
}

impl Index<(usize, usize)> for ComplexMatrix {
    type Output = Complex;

    fn index(&self, (row, col): (usize, usize)) -> &Complex {
        &self.data[row * self.size + col]
    }
}

impl IndexMut<(usize, usize)> for ComplexMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Complex {
        &mut self.data[row * self.size + col]
    }
}

// ---------------------------------------------------------------------------
// 1D transform
// ---------------------------------------------------------------------------

/// Direction of a transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Inverse,
}

/// In-place iterative Cooley-Tukey radix-2 transform.
///
/// Unscaled in both directions; `x.len()` must be a power of two.
fn fft_in_place(x: &mut [Complex], direction: Direction) {
    let n = x.len();
    if n <= 1 {
        return;
    }

    // Bit-reversal permutation
    let mut j = 0;
    for i in 0..n {
        if i < j {
            x.swap(i, j);
        }
        let mut m = n >> 1;
        while m >= 1 && j >= m {
            j -= m;
            m >>= 1;
        }
        j += m;
    }

    let sign = match direction {
        Direction::Forward => -1.0,
        Direction::Inverse => 1.0,
    };

    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let wn = Complex::from_polar(1.0, sign * 2.0 * std::f64::consts::PI / len as f64);

        for start in (0..n).step_by(len) {
            let mut w = Complex::new(1.0, 0.0);
            for k in 0..half {
                let t = x[start + k + half] * w;
                let u = x[start + k];
                x[start + k] = u + t;
                x[start + k + half] = u - t;
                w = w * wn;
            }
        }

        len <<= 1;
    }
}

// ---------------------------------------------------------------------------
// 2D transform
// ---------------------------------------------------------------------------

/// Forward/inverse 2D transform for `size x size` matrices.
///
/// Stateless beyond its configured size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fft2d {
    size: usize,
}

impl Fft2d {
    /// Configure a transform for `size x size` inputs.
    ///
    /// # Errors
    ///
    /// [`TerrainError::UnsupportedTransformSize`] unless `size` is a positive
    /// power of two.
    pub fn new(size: usize) -> TerrainResult<Self> {
        if !size.is_power_of_two() {
            return Err(TerrainError::UnsupportedTransformSize(size));
        }
        Ok(Self { size })
    }

    /// Configured side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward 2D transform of a real grid. No scaling is applied.
    ///
    /// # Errors
    ///
    /// [`TerrainError::DimensionMismatch`] if the grid size differs from the
    /// configured size.
    pub fn forward(&self, grid: &ElevationGrid) -> TerrainResult<ComplexMatrix> {
        self.check(grid.size())?;
        let mut matrix = ComplexMatrix::from_real(grid);
        self.separable_pass(&mut matrix, Direction::Forward, 1.0);
        Ok(matrix)
    }

    /// Inverse 2D transform, returning the complex result.
    ///
    /// The intermediate is divided by `size * size` between the row and
    /// column passes.
    ///
    /// # Errors
    ///
    /// [`TerrainError::DimensionMismatch`] if the matrix size differs from the
    /// configured size.
    pub fn inverse_complex(&self, spectrum: &ComplexMatrix) -> TerrainResult<ComplexMatrix> {
        self.check(spectrum.size())?;
        let mut matrix = spectrum.clone();
        let n = self.size as f64;
        self.separable_pass(&mut matrix, Direction::Inverse, n * n);
        Ok(matrix)
    }

    /// Inverse 2D transform, keeping the absolute value of each real part.
    ///
    /// Residual imaginary components from rounding are discarded.
    ///
    /// # Errors
    ///
    /// [`TerrainError::DimensionMismatch`] if the matrix size differs from the
    /// configured size.
    pub fn inverse(&self, spectrum: &ComplexMatrix) -> TerrainResult<ElevationGrid> {
        let matrix = self.inverse_complex(spectrum)?;
        let mut grid = ElevationGrid::new(self.size);
        for (cell, value) in grid.iter_mut().zip(matrix.iter()) {
            *cell = value.re.abs() as f32;
        }
        Ok(grid)
    }

    /// Rows, transpose (dividing by `divisor`), rows, transpose back.
    fn separable_pass(&self, matrix: &mut ComplexMatrix, direction: Direction, divisor: f64) {
        for row in 0..self.size {
            fft_in_place(matrix.row_mut(row), direction);
        }

        let mut transposed = matrix.transpose();
        if divisor != 1.0 {
            for value in transposed.iter_mut() {
                *value = *value / divisor;
            }
        }
        for row in 0..self.size {
            fft_in_place(transposed.row_mut(row), direction);
        }

        *matrix = transposed.transpose();
    }

    fn check(&self, actual: usize) -> TerrainResult<()> {
        if actual != self.size {
            return Err(TerrainError::DimensionMismatch {
                expected: self.size,
                actual,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{RandomSource, UniformSource};

    fn random_grid(size: usize, seed: u64, min: f32, max: f32) -> ElevationGrid {
        let mut rng = RandomSource::from_seed(seed);
        let mut grid = ElevationGrid::new(size);
        for cell in grid.iter_mut() {
            *cell = rng.sample(min, max);
        }
        grid
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        for size in [0, 3, 33, 100] {
            assert_eq!(
                Fft2d::new(size),
                Err(TerrainError::UnsupportedTransformSize(size))
            );
        }
        assert!(Fft2d::new(1).is_ok());
        assert!(Fft2d::new(64).is_ok());
    }

    #[test]
    fn test_rejects_mismatched_input() {
        let fft = Fft2d::new(8).unwrap();
        assert_eq!(
            fft.forward(&ElevationGrid::new(4)),
            Err(TerrainError::DimensionMismatch {
                expected: 8,
                actual: 4
            })
        );
    }

    #[test]
    fn test_complex_arithmetic() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);
        assert_eq!(a + b, Complex::new(4.0, 1.0));
        assert_eq!(a - b, Complex::new(-2.0, 3.0));
        assert_eq!(a * b, Complex::new(5.0, 5.0));
        assert_eq!(a * 2.0, Complex::new(2.0, 4.0));
        assert_eq!(a / 2.0, Complex::new(0.5, 1.0));
        assert_eq!(a.conj(), Complex::new(1.0, -2.0));
        assert!((Complex::new(3.0, 4.0).norm() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_1d_transform_of_impulse_is_flat() {
        let mut x = vec![Complex::ZERO; 8];
        x[0] = Complex::new(1.0, 0.0);
        fft_in_place(&mut x, Direction::Forward);
        for v in &x {
            assert!((v.re - 1.0).abs() < 1e-12 && v.im.abs() < 1e-12);
        }
    }

    #[test]
    fn test_dc_component_is_grid_sum() {
        let grid = random_grid(16, 3, 0.0, 1.0);
        let sum: f64 = grid.iter().map(f64::from).sum();
        let spectrum = Fft2d::new(16).unwrap().forward(&grid).unwrap();
        assert!((spectrum[(0, 0)].re - sum).abs() < 1e-6);
        assert!(spectrum[(0, 0)].im.abs() < 1e-6);
    }

    #[test]
    fn test_spectrum_orientation_matches_rows() {
        // Rows alternate in sign, columns are constant: all energy sits at
        // row frequency n/2, column frequency 0.
        let n = 8;
        let rows: Vec<Vec<f32>> = (0..n)
            .map(|r| vec![if r % 2 == 0 { 1.0 } else { -1.0 }; n])
            .collect();
        let grid = ElevationGrid::from_rows(&rows).unwrap();
        let spectrum = Fft2d::new(n).unwrap().forward(&grid).unwrap();

        assert!((spectrum[(n / 2, 0)].re - (n * n) as f64).abs() < 1e-9);
        assert!(spectrum[(0, n / 2)].norm() < 1e-9);
    }

    #[test]
    fn test_round_trip_reconstructs_non_negative_grid() {
        let grid = random_grid(32, 17, 0.0, 250.0);
        let fft = Fft2d::new(32).unwrap();
        let restored = fft.inverse(&fft.forward(&grid).unwrap()).unwrap();

        for (original, back) in grid.iter().zip(restored.iter()) {
            let tolerance = 1e-3 * original.abs().max(1.0);
            assert!(
                (original - back).abs() <= tolerance,
                "Round trip drifted: {original} vs {back}"
            );
        }
    }

    #[test]
    fn test_complex_round_trip_preserves_sign() {
        let grid = random_grid(16, 29, -5.0, 5.0);
        let fft = Fft2d::new(16).unwrap();
        let restored = fft.inverse_complex(&fft.forward(&grid).unwrap()).unwrap();

        for (original, back) in grid.iter().zip(restored.iter()) {
            assert!((f64::from(original) - back.re).abs() < 1e-4);
            assert!(back.im.abs() < 1e-4);
        }
    }

    #[test]
    fn test_transpose_swaps_indices() {
        let mut m = ComplexMatrix::zeros(3);
        m[(0, 2)] = Complex::new(7.0, 1.0);
        let t = m.transpose();
        assert_eq!(t[(2, 0)], Complex::new(7.0, 1.0));
        assert_eq!(t[(0, 2)], Complex::ZERO);
    }
}
