//! Oscilloscope-style waveform trace.

use glam::Vec2;
use rand::Rng;

use super::{Color, DrawCommand, SurfaceSize};
use crate::params::WaveformStyle;

/// Amplitude value of a silent sample
const CENTER: f32 = 128.0;

/// Waveform routine, either randomly colored with jittered copies or fixed
#[derive(Debug, Clone)]
pub struct Waveform {
    style: WaveformStyle,
    randomized: bool,
}

impl Waveform {
    /// Random color every frame plus translucent jittered copies
    pub fn randomized(style: WaveformStyle) -> Self {
        Self {
            style,
            randomized: true,
        }
    }

    /// Fixed color, single stroke
    pub fn fixed(style: WaveformStyle) -> Self {
        Self {
            style,
            randomized: false,
        }
    }

    /// Compute the polyline for a snapshot, shifted by `offset`
    ///
    /// Sample `i` of `N` lands at `x = i * width / N`; amplitude maps so that
    /// 128 sits on the vertical center and 0/256 on the top/bottom edges. The
    /// trace always ends at the right edge on the (offset) center line.
    pub fn trace(samples: &[u8], surface: SurfaceSize, offset: Vec2) -> Vec<Vec2> {
        let mut points = Vec::with_capacity(samples.len() + 1);
        if !samples.is_empty() {
            let slice_width = surface.width / samples.len() as f32;
            let half_height = surface.height / 2.0;

            for (i, &sample) in samples.iter().enumerate() {
                let x = i as f32 * slice_width;
                let y = sample as f32 / CENTER * half_height;
                points.push(Vec2::new(x, y) + offset);
            }
        }

        // Closing segment keeps no horizontal jitter
        points.push(Vec2::new(surface.width, surface.height / 2.0 + offset.y));
        points
    }

    pub fn draw<R: Rng + ?Sized>(
        &self,
        samples: &[u8],
        surface: SurfaceSize,
        rng: &mut R,
        out: &mut Vec<DrawCommand>,
    ) {
        if !self.randomized {
            let [r, g, b] = self.style.fixed_rgb;
            out.push(DrawCommand::Stroke {
                points: Self::trace(samples, surface, Vec2::ZERO),
                color: Color::rgb(r, g, b),
                width: self.style.line_width,
            });
            return;
        }

        let r: u8 = rng.gen();
        let g: u8 = rng.gen();
        let b: u8 = rng.gen();

        out.push(DrawCommand::Stroke {
            points: Self::trace(samples, surface, Vec2::ZERO),
            color: Color::rgb(r, g, b),
            width: self.style.line_width,
        });

        for _ in 0..self.style.overlay_count {
            let offset = Vec2::new(self.jitter(rng), self.jitter(rng));
            out.push(DrawCommand::Stroke {
                points: Self::trace(samples, surface, offset),
                color: Color::rgba(r, g, b, self.style.overlay_alpha),
                width: self.style.line_width,
            });
        }
    }

    fn jitter<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let j = self.style.jitter_px;
        if j > 0.0 {
            rng.gen_range(-j..j)
        } else {
            0.0
        }
    }
}
