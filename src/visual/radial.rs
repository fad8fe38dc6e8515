//! Radial routines: kaleidoscope lines and abstract dots.
//!
//! Both place sample `i` of `N` at angle `(i / N) * 2π` around the surface
//! center and color it with hue `(i / N) * 360`. Amplitude scales the
//! distance from the center, with 128 (silence) landing on the base radius.

use glam::Vec2;
use std::f32::consts::TAU;

use super::{Color, DrawCommand, SurfaceSize};
use crate::params::RadialStyle;

/// Angle (radians) of sample `index` out of `count`
pub fn angle_of(index: usize, count: usize) -> f32 {
    index as f32 / count as f32 * TAU
}

/// Hue (degrees) of sample `index` out of `count`
pub fn hue_of(index: usize, count: usize) -> f32 {
    index as f32 / count as f32 * 360.0
}

fn radial_point(center: Vec2, index: usize, count: usize, distance: f32) -> Vec2 {
    center + Vec2::from_angle(angle_of(index, count)) * distance
}

/// Radial lines from the center, one per sample
#[derive(Debug, Clone)]
pub struct Kaleidoscope {
    style: RadialStyle,
}

impl Kaleidoscope {
    pub fn new(style: RadialStyle) -> Self {
        Self { style }
    }

    /// Base radius for a surface (distance drawn for a silent sample)
    pub fn base_radius(&self, surface: SurfaceSize) -> f32 {
        surface.width.min(surface.height) * self.style.kaleidoscope_radius_fraction
    }

    pub fn draw(&self, samples: &[u8], surface: SurfaceSize, out: &mut Vec<DrawCommand>) {
        let count = samples.len();
        let center = surface.center();
        let radius = self.base_radius(surface);

        out.extend(samples.iter().enumerate().map(|(i, &sample)| {
            let length = sample as f32 / 128.0 * radius;
            DrawCommand::Stroke {
                points: vec![center, radial_point(center, i, count, length)],
                color: Color::hsl(hue_of(i, count), self.style.saturation, self.style.lightness),
                width: self.style.line_width,
            }
        }));
    }
}

/// Small disks scattered on a fixed-scale ring
#[derive(Debug, Clone)]
pub struct AbstractDots {
    style: RadialStyle,
}

impl AbstractDots {
    pub fn new(style: RadialStyle) -> Self {
        Self { style }
    }

    pub fn draw(&self, samples: &[u8], surface: SurfaceSize, out: &mut Vec<DrawCommand>) {
        let count = samples.len();
        let center = surface.center();

        out.extend(samples.iter().enumerate().map(|(i, &sample)| {
            let distance = sample as f32 / 128.0 * self.style.abstract_radius_px;
            DrawCommand::FillCircle {
                center: radial_point(center, i, count, distance),
                radius: self.style.dot_radius_px,
                color: Color::hsl(hue_of(i, count), self.style.saturation, self.style.lightness),
            }
        }));
    }
}
