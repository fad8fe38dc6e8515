//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (pixels, milliseconds, samples)
//! - Documented ranges and meanings
//! - `validate()` where a value can be out of range

mod audio;
mod render;
mod visual;

// Re-export all types
pub use audio::AnalyserConfig;
pub use render::RenderConfig;
pub use visual::{ModeRotation, RadialStyle, Variant, WaveformStyle};
