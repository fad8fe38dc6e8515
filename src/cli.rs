//! Command-line argument parsing.

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::params::{ModeRotation, RenderConfig, Variant};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "wavescope")]
#[command(about = "Real-time waveform visualizer for audio files", long_about = None)]
pub struct Args {
    /// Audio file to play (a file can also be dropped onto the window)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Visualization variant: simple (default), extended
    #[arg(long, value_name = "VARIANT", default_value = "simple")]
    pub variant: String,

    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "1280")]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "720")]
    pub height: u32,

    /// Extended variant: time each mode stays on screen (milliseconds)
    #[arg(long, value_name = "MS", default_value = "5000")]
    pub switch_interval_ms: u64,

    /// Seed for colors and jitter (random each run if omitted)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

impl Args {
    /// Parse visualization variant from command-line arguments
    pub fn parse_variant(&self) -> Variant {
        match self.variant.to_lowercase().as_str() {
            "simple" => Variant::Simple,
            "extended" => Variant::Extended,
            other => {
                tracing::warn!("Unknown variant '{}', using simple", other);
                Variant::Simple
            }
        }
    }

    /// Surface configuration from window arguments
    pub fn render_config(&self) -> Result<RenderConfig, ConfigError> {
        let config = RenderConfig {
            window_width: self.width,
            window_height: self.height,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn mode_rotation(&self) -> Result<ModeRotation, ConfigError> {
        let rotation = ModeRotation::from_millis(self.switch_interval_ms);
        rotation.validate()?;
        Ok(rotation)
    }

    /// Random provider for the simple variant
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
