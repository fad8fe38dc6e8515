//! Drawing routines and the commands they produce.
//!
//! Routines never touch the GPU. Each one maps a time-domain snapshot to a
//! list of [`DrawCommand`]s in surface pixel coordinates (origin top-left,
//! y down), which the renderer tessellates and draws.

mod radial;
mod selector;
mod waveform;

use glam::Vec2;

pub use radial::{angle_of, hue_of, AbstractDots, Kaleidoscope};
pub use selector::{Mode, ModeClock, RenderSelector};
pub use waveform::Waveform;

/// Fill or stroke color
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// 8-bit sRGB channels plus straight alpha (0..1)
    Rgba { r: u8, g: u8, b: u8, a: f32 },

    /// Hue in degrees, saturation and lightness in 0..1
    Hsl {
        hue_deg: f32,
        saturation: f32,
        lightness: f32,
    },
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgba { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::Rgba { r, g, b, a }
    }

    pub const fn hsl(hue_deg: f32, saturation: f32, lightness: f32) -> Self {
        Self::Hsl {
            hue_deg,
            saturation,
            lightness,
        }
    }

    /// sRGB-encoded channels in 0..1, alpha last
    pub fn to_srgba(self) -> [f32; 4] {
        match self {
            Self::Rgba { r, g, b, a } => [
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
                a.clamp(0.0, 1.0),
            ],
            Self::Hsl {
                hue_deg,
                saturation,
                lightness,
            } => {
                let [r, g, b] = hsl_to_rgb(hue_deg, saturation, lightness);
                [r, g, b, 1.0]
            }
        }
    }

    /// Linear-light channels for an sRGB render target
    pub fn to_linear(self) -> [f32; 4] {
        let [r, g, b, a] = self.to_srgba();
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a]
    }
}

fn hsl_to_rgb(hue_deg: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    let h = hue_deg.rem_euclid(360.0) / 60.0;

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - chroma / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    [r + m, g + m, b + m]
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// One drawing operation on the surface
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Paint the whole surface
    Clear(Color),

    /// Open polyline through `points`
    Stroke {
        points: Vec<Vec2>,
        color: Color,
        width: f32,
    },

    /// Filled disk
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
}

/// Drawing surface dimensions (pixels), fixed at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A drawing routine selectable by the frame loop
#[derive(Debug, Clone)]
pub enum Routine {
    Waveform(Waveform),
    Kaleidoscope(Kaleidoscope),
    Abstract(AbstractDots),
}

impl Routine {
    /// Append this routine's commands for one snapshot to `out`
    pub fn draw<R: rand::Rng + ?Sized>(
        &self,
        samples: &[u8],
        surface: SurfaceSize,
        rng: &mut R,
        out: &mut Vec<DrawCommand>,
    ) {
        match self {
            Self::Waveform(routine) => routine.draw(samples, surface, rng, out),
            Self::Kaleidoscope(routine) => routine.draw(samples, surface, out),
            Self::Abstract(routine) => routine.draw(samples, surface, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hsl_primaries() {
        let red = Color::hsl(0.0, 1.0, 0.5).to_srgba();
        assert_relative_eq!(red[0], 1.0);
        assert_relative_eq!(red[1], 0.0);
        assert_relative_eq!(red[2], 0.0);

        let green = Color::hsl(120.0, 1.0, 0.5).to_srgba();
        assert_relative_eq!(green[0], 0.0);
        assert_relative_eq!(green[1], 1.0);
        assert_relative_eq!(green[2], 0.0);

        let blue = Color::hsl(240.0, 1.0, 0.5).to_srgba();
        assert_relative_eq!(blue[0], 0.0);
        assert_relative_eq!(blue[1], 0.0);
        assert_relative_eq!(blue[2], 1.0);
    }

    #[test]
    fn test_hsl_wraps_full_turn() {
        let a = Color::hsl(360.0, 1.0, 0.5).to_srgba();
        let b = Color::hsl(0.0, 1.0, 0.5).to_srgba();
        assert_eq!(a, b);
    }

    #[test]
    fn test_srgb_to_linear_endpoints() {
        let white = Color::rgb(255, 255, 255).to_linear();
        assert_relative_eq!(white[0], 1.0, epsilon = 1e-6);

        let black = Color::rgb(0, 0, 0).to_linear();
        assert_eq!(black, [0.0, 0.0, 0.0, 1.0]);

        // Mid grey is darker in linear light
        let grey = Color::rgb(128, 128, 128).to_linear();
        assert!(grey[0] < 0.5);
    }
}
