//! Deterministic seeded randomness.
//!
//! Every stochastic decision made during generation goes through a
//! [`UniformSource`] handed to the generation call. There is no process-wide
//! generator, so two calls on different threads never share a stream and a
//! fixed seed reproduces the same grid bit for bit.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed value meaning "pick an arbitrary, non-reproducible seed".
pub const RANDOM_SEED: u64 = 0;

/// A stream of uniformly distributed samples.
pub trait UniformSource {
    /// Draw a sample uniformly distributed over `[min, max)`.
    ///
    /// When `min == max` the range is degenerate and `min` is returned.
    fn sample(&mut self, min: f32, max: f32) -> f32;
}

/// ChaCha8-backed [`UniformSource`] with a reportable seed.
#[derive(Clone, Debug)]
pub struct RandomSource {
    rng: ChaCha8Rng,
    seed: u64,
}

impl RandomSource {
    /// Create a source from an explicit seed.
    ///
    /// [`RANDOM_SEED`] (`0`) draws a fresh seed from the thread RNG; the seed
    /// actually used is available through [`RandomSource::seed`].
    pub fn from_seed(seed: u64) -> Self {
        let seed = if seed == RANDOM_SEED {
            let mut thread_rng = rand::rng();
            loop {
                let candidate: u64 = thread_rng.random();
                if candidate != RANDOM_SEED {
                    break candidate;
                }
            }
        } else {
            seed
        };

        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The effective seed of this stream.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl UniformSource for RandomSource {
    #[inline]
    fn sample(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..max)
    }
}

/// Derive the seed of a tile from the world seed and its tile coordinate.
///
/// Uses SipHash (via std's `DefaultHasher`) to spread the inputs over `u64`.
/// Never returns [`RANDOM_SEED`], so derived seeds are always reproducible.
pub fn derive_tile_seed(world_seed: u64, tile_x: i32, tile_z: i32) -> u64 {
    let mut hasher = DefaultHasher::new();
    world_seed.hash(&mut hasher);
    tile_x.hash(&mut hasher);
    tile_z.hash(&mut hasher);
    match hasher.finish() {
        RANDOM_SEED => 1,
        seed => seed,
    }
}

/// Deterministic square root using libm (not platform libc).
#[inline]
pub(crate) fn det_sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

/// Deterministic power using libm.
#[inline]
pub(crate) fn det_pow(base: f64, exponent: f64) -> f64 {
    libm::pow(base, exponent)
}

/// Deterministic sine using libm.
#[inline]
pub(crate) fn det_sin(x: f64) -> f64 {
    libm::sin(x)
}

/// Deterministic cosine using libm.
#[inline]
pub(crate) fn det_cos(x: f64) -> f64 {
    libm::cos(x)
}
