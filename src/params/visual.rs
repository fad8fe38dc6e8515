//! Drawing routine styles and mode rotation timing.

use std::time::Duration;

use crate::error::ConfigError;

/// Which set of drawing routines the frame loop selects from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Randomly colored, jittered waveform only
    #[default]
    Simple,

    /// Waveform, kaleidoscope and abstract routines, rotated on a timer
    Extended,
}

/// Waveform stroke parameters
#[derive(Debug, Clone)]
pub struct WaveformStyle {
    /// Stroke width (pixels)
    pub line_width: f32,

    /// Stroke color for the extended variant (sRGB)
    pub fixed_rgb: [u8; 3],

    /// Translucent copies drawn on top of the main stroke (simple variant)
    pub overlay_count: usize,

    /// Alpha of each translucent copy (0..1)
    pub overlay_alpha: f32,

    /// Maximum jitter of a copy on each axis (pixels, ±)
    pub jitter_px: f32,
}

impl Default for WaveformStyle {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            fixed_rgb: [0, 200, 255],
            overlay_count: 2,
            overlay_alpha: 0.5,
            jitter_px: 10.0,
        }
    }
}

/// Kaleidoscope and abstract routine parameters
#[derive(Debug, Clone)]
pub struct RadialStyle {
    /// Kaleidoscope base radius as a fraction of min(width, height)
    /// 0.25 keeps a full-scale sample (255) inside the surface
    pub kaleidoscope_radius_fraction: f32,

    /// Abstract routine base radius (pixels, not surface-relative)
    pub abstract_radius_px: f32,

    /// Disk radius drawn per point by the abstract routine (pixels)
    pub dot_radius_px: f32,

    /// Radial line width (pixels)
    pub line_width: f32,

    /// Saturation of the hue rotation (0..1)
    pub saturation: f32,

    /// Lightness of the hue rotation (0..1)
    pub lightness: f32,
}

impl Default for RadialStyle {
    fn default() -> Self {
        Self {
            kaleidoscope_radius_fraction: 0.25,
            abstract_radius_px: 50.0,
            dot_radius_px: 5.0,
            line_width: 2.0,
            saturation: 1.0,
            lightness: 0.5,
        }
    }
}

/// Extended variant mode rotation
#[derive(Debug, Clone)]
pub struct ModeRotation {
    /// Minimum time a mode stays active before the next tick switches it
    pub switch_interval: Duration,
}

impl Default for ModeRotation {
    fn default() -> Self {
        Self {
            switch_interval: Duration::from_millis(5000),
        }
    }
}

impl ModeRotation {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            switch_interval: Duration::from_millis(ms),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.switch_interval.is_zero() {
            return Err(ConfigError::SwitchInterval);
        }
        Ok(())
    }
}
