//! Draw commands to triangle lists.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use std::f32::consts::TAU;

use crate::visual::{Color, DrawCommand};

/// Segments used to approximate a filled disk
pub const CIRCLE_SEGMENTS: usize = 24;

/// Vertex data for 2D geometry (pixel position + linear RGBA)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// One frame's geometry
#[derive(Debug, Default)]
pub struct Tessellation {
    pub vertices: Vec<Vertex>,
    /// Linear RGBA from the last `Clear` command, if any
    pub clear: Option<[f32; 4]>,
}

impl Tessellation {
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.clear = None;
    }

    /// Replace contents with the geometry for `commands`
    pub fn build(&mut self, commands: &[DrawCommand]) {
        self.clear();
        for command in commands {
            match command {
                DrawCommand::Clear(color) => {
                    // A clear wipes anything drawn before it
                    self.vertices.clear();
                    self.clear = Some(color.to_linear());
                }
                DrawCommand::Stroke {
                    points,
                    color,
                    width,
                } => self.stroke(points, *color, *width),
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => self.fill_circle(*center, *radius, *color),
            }
        }
    }

    /// One quad per segment; zero-length segments are skipped
    fn stroke(&mut self, points: &[Vec2], color: Color, width: f32) {
        let color = color.to_linear();
        let half = width / 2.0;

        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let Some(dir) = (b - a).try_normalize() else {
                continue;
            };
            let normal = dir.perp() * half;

            let corners = [a + normal, a - normal, b + normal, b - normal];
            for index in [0, 1, 2, 2, 1, 3] {
                self.vertices.push(Vertex {
                    position: corners[index].to_array(),
                    color,
                });
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let color = color.to_linear();
        let rim = |k: usize| {
            center + Vec2::from_angle(k as f32 / CIRCLE_SEGMENTS as f32 * TAU) * radius
        };

        for k in 0..CIRCLE_SEGMENTS {
            for p in [center, rim(k), rim(k + 1)] {
                self.vertices.push(Vertex {
                    position: p.to_array(),
                    color,
                });
            }
        }
    }
}
