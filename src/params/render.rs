//! Surface configuration.

use crate::error::ConfigError;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels), fixed for the whole session
    pub window_width: u32,

    /// Window height (pixels), fixed for the whole session
    pub window_height: u32,

    /// Background color painted at the start of every frame (sRGB)
    pub background_rgb: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            background_rgb: [17, 17, 17],
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::SurfaceSize {
                width: self.window_width,
                height: self.window_height,
            });
        }
        Ok(())
    }
}
