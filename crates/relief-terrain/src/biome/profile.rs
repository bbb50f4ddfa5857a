//! Biome profile: parameter ranges sampled once per tile.

use serde::{Deserialize, Serialize};

use crate::params::GenerationParams;
use crate::seed::UniformSource;

/// A closed interval a parameter is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A range that always yields `value`.
    pub const fn fixed(value: f32) -> Self {
        Self::new(value, value)
    }

    /// Draw a value uniformly from the range.
    pub fn sample(&self, rng: &mut impl UniformSource) -> f32 {
        rng.sample(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Parameter ranges describing one kind of terrain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeProfile {
    /// Registry key, e.g. `"mountain"`.
    pub name: String,
    pub initial_altitudes: ParamRange,
    pub amplitude: ParamRange,
    pub roughness: ParamRange,
    /// Range the lower displacement bound is drawn from.
    pub min_random_range: ParamRange,
    /// Range the upper displacement bound is drawn from.
    pub max_random_range: ParamRange,
}

impl BiomeProfile {
    /// A profile with the default displacement bounds.
    pub fn new(
        name: impl Into<String>,
        initial_altitudes: ParamRange,
        amplitude: ParamRange,
        roughness: ParamRange,
    ) -> Self {
        Self {
            name: name.into(),
            initial_altitudes,
            amplitude,
            roughness,
            min_random_range: ParamRange::new(-1.0, 0.0),
            max_random_range: ParamRange::new(0.0, 1.0),
        }
    }

    /// Low, gently rolling ground.
    pub fn plain() -> Self {
        Self::new(
            "plain",
            ParamRange::new(0.0, 0.25),
            ParamRange::new(0.1, 0.5),
            ParamRange::new(0.05, 0.2),
        )
    }

    /// Rolling hills biased upward: displacements never dip far below the
    /// local average.
    pub fn hill() -> Self {
        Self {
            min_random_range: ParamRange::new(-0.5, 0.0),
            ..Self::new(
                "hill",
                ParamRange::new(0.0, 1.0),
                ParamRange::new(1.0, 1.5),
                ParamRange::new(0.05, 0.25),
            )
        }
    }

    /// Tall, rough relief.
    pub fn mountain() -> Self {
        Self::new(
            "mountain",
            ParamRange::new(0.0, 1.0),
            ParamRange::new(1.0, 2.0),
            ParamRange::new(0.25, 0.4),
        )
    }

    /// Nearly flat terrain close to sea level.
    pub fn coast() -> Self {
        Self::new(
            "coast",
            ParamRange::new(0.0, 0.1),
            ParamRange::new(0.1, 0.5),
            ParamRange::new(0.05, 0.2),
        )
    }

    /// The built-in profiles.
    pub fn defaults() -> [BiomeProfile; 4] {
        [Self::plain(), Self::hill(), Self::mountain(), Self::coast()]
    }

    /// Draw one parameter set for a tile of exponent `exponent`.
    ///
    /// Each range is sampled once, in field order, so a seeded `rng` always
    /// yields the same parameters.
    pub fn sample_params(
        &self,
        exponent: u32,
        min_height: f32,
        max_height: f32,
        rng: &mut impl UniformSource,
    ) -> GenerationParams {
        GenerationParams {
            exponent,
            initial_altitudes: self.initial_altitudes.sample(rng),
            amplitude: self.amplitude.sample(rng),
            roughness: self.roughness.sample(rng),
            min_random_range: self.min_random_range.sample(rng),
            max_random_range: self.max_random_range.sample(rng),
            min_height,
            max_height,
            ..Default::default()
        }
    }
}
