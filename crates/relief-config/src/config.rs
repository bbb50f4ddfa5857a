//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use relief_terrain::debug_viz::PreviewStyle;
use relief_terrain::{Algorithm, BiomeRegistry, GenerationParams, Normalization, UniformSource};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Heightmap generation settings.
    pub generation: GenerationConfig,
    /// What happens to the generated grid.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Heightmap generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Which algorithm to run.
    pub algorithm: Algorithm,
    /// Seed for the random source (0 = pick one and log it).
    pub seed: u64,
    /// Size exponent `N`.
    pub exponent: u32,
    /// Scale of the random corner seeds.
    pub initial_altitudes: f32,
    /// Displacement multiplier.
    pub amplitude: f32,
    /// Per-level displacement decay, `[0, 1]`.
    pub roughness: f32,
    /// Spectral filter steepness.
    pub roughness_factor: f32,
    /// Lower height clamp.
    pub min_height: f32,
    /// Upper height clamp.
    pub max_height: f32,
    /// Lower bound of the displacement sample.
    pub min_random_range: f32,
    /// Upper bound of the displacement sample.
    pub max_random_range: f32,
    /// Biome profile to sample amplitude, roughness, jitter and displacement
    /// bounds from instead of the literal values above.
    pub biome: Option<String>,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// How the raw grid is rescaled.
    pub normalization: Normalization,
    /// Write a PNG preview here when set.
    pub preview_path: Option<PathBuf>,
    /// Coloring of the preview.
    pub preview_style: PreviewStyle,
    /// Integer upscale factor of the preview.
    pub preview_scale: u32,
    /// Normalized water line used by the terrain preview style.
    pub sea_level: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::DiamondSquares,
            seed: 0,
            exponent: 7,
            initial_altitudes: 1.0,
            amplitude: 1.0,
            roughness: 0.5,
            roughness_factor: 2.0,
            min_height: -100.0,
            max_height: 300.0,
            min_random_range: -1.0,
            max_random_range: 1.0,
            biome: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            normalization: Normalization::Observed,
            preview_path: None,
            preview_style: PreviewStyle::Terrain,
            preview_scale: 4,
            sea_level: 0.35,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Parameter conversion ---

impl GenerationConfig {
    /// Build validated parameters from the literal values.
    pub fn to_params(&self) -> Result<GenerationParams, ConfigError> {
        let params = GenerationParams {
            exponent: self.exponent,
            initial_altitudes: self.initial_altitudes,
            amplitude: self.amplitude,
            roughness: self.roughness,
            roughness_factor: self.roughness_factor,
            min_height: self.min_height,
            max_height: self.max_height,
            min_random_range: self.min_random_range,
            max_random_range: self.max_random_range,
            preset_edges: None,
        };
        params.validate()?;
        Ok(params)
    }

    /// Build validated parameters, sampling them from the configured biome
    /// when one is set.
    pub fn resolve_params(
        &self,
        registry: &BiomeRegistry,
        rng: &mut impl UniformSource,
    ) -> Result<GenerationParams, ConfigError> {
        let Some(name) = &self.biome else {
            return self.to_params();
        };
        let profile = registry
            .profile(name)
            .ok_or_else(|| ConfigError::UnknownBiome(name.clone()))?;

        let params = GenerationParams {
            roughness_factor: self.roughness_factor,
            ..profile.sample_params(self.exponent, self.min_height, self.max_height, rng)
        };
        params.validate()?;
        log::debug!("Sampled {name} parameters: {params:?}");
        Ok(params)
    }
}

/// Default config directory: `<platform config dir>/relief`, or `./config`
/// when the platform has none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("relief"))
        .unwrap_or_else(|| PathBuf::from("config"))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Returns `Some(new_config)` if the file on disk differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
