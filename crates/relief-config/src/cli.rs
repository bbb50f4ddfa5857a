//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use relief_terrain::Algorithm;

use crate::Config;

/// Generate a procedural terrain heightmap.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "relief", about = "Procedural terrain heightmap generator")]
pub struct CliArgs {
    /// Algorithm: midpoint, diamond-square or fft.
    #[arg(long)]
    pub algorithm: Option<Algorithm>,

    /// Random seed (0 picks one and logs it).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Size exponent N (grid is 2^N + 1, or 2^N for fft).
    #[arg(long)]
    pub exponent: Option<u32>,

    /// Displacement amplitude.
    #[arg(long)]
    pub amplitude: Option<f32>,

    /// Roughness in [0, 1].
    #[arg(long)]
    pub roughness: Option<f32>,

    /// Spectral filter steepness.
    #[arg(long)]
    pub roughness_factor: Option<f32>,

    /// Sample parameters from a biome profile (plain, hill, mountain, coast).
    #[arg(long)]
    pub biome: Option<String>,

    /// Write a PNG preview to this path.
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let generation = &mut self.generation;
        if let Some(algorithm) = args.algorithm {
            generation.algorithm = algorithm;
        }
        if let Some(seed) = args.seed {
            generation.seed = seed;
        }
        if let Some(exponent) = args.exponent {
            generation.exponent = exponent;
        }
        if let Some(amplitude) = args.amplitude {
            generation.amplitude = amplitude;
        }
        if let Some(roughness) = args.roughness {
            generation.roughness = roughness;
        }
        if let Some(factor) = args.roughness_factor {
            generation.roughness_factor = factor;
        }
        if let Some(ref biome) = args.biome {
            generation.biome = Some(biome.clone());
        }
        if let Some(ref path) = args.preview {
            self.output.preview_path = Some(path.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
