//! Audio analysis configuration.

use crate::error::ConfigError;

/// Time-domain analyser configuration
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// Analysis window size in samples (must be a power of 2)
    /// Default: 2048, which yields a 1024-sample snapshot
    pub window_size: usize,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self { window_size: 2048 }
    }
}

impl AnalyserConfig {
    /// Number of time-domain samples handed to the drawing routines each frame
    pub fn snapshot_len(&self) -> usize {
        self.window_size / 2
    }

    /// Validate configuration (window must be a power of 2, at least 32)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.window_size.is_power_of_two() || self.window_size < 32 {
            return Err(ConfigError::AnalysisWindow(self.window_size));
        }
        Ok(())
    }
}
