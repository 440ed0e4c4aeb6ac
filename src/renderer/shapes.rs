//! Mesh builders for 2D primitives
//!
//! All meshes are built around the model origin; placement, rotation and
//! zoom come from the per-draw model matrix.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::body::Rgb;

/// Corner colors of a rectangle, counter-clockwise from bottom-left
#[derive(Debug, Clone, Copy)]
pub struct Corners {
    pub bottom_left: Rgb,
    pub bottom_right: Rgb,
    pub top_right: Rgb,
    pub top_left: Rgb,
}

impl Corners {
    pub const fn solid(color: Rgb) -> Self {
        Self {
            bottom_left: color,
            bottom_right: color,
            top_right: color,
            top_left: color,
        }
    }

    pub const fn new(bottom_left: Rgb, bottom_right: Rgb, top_right: Rgb, top_left: Rgb) -> Self {
        Self {
            bottom_left,
            bottom_right,
            top_right,
            top_left,
        }
    }
}

/// Two triangles covering a `size.x` by `size.y` rectangle
pub fn rectangle(size: Vec2, corners: Corners) -> Vec<Vertex> {
    let w = size.x * 0.5;
    let h = size.y * 0.5;
    vec![
        Vertex::new(-w, -h, corners.bottom_left),
        Vertex::new(w, -h, corners.bottom_right),
        Vertex::new(w, h, corners.top_right),
        Vertex::new(w, h, corners.top_right),
        Vertex::new(-w, h, corners.top_left),
        Vertex::new(-w, -h, corners.bottom_left),
    ]
}

/// Filled disc as a triangle fan of `parts` wedges
pub fn circle(radius: f32, color: Rgb, parts: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((parts * 3) as usize);
    let step = 2.0 * PI / parts.max(1) as f32;

    for i in 0..parts {
        let theta1 = i as f32 * step;
        let theta2 = theta1 + step;

        vertices.push(Vertex::new(0.0, 0.0, color));
        vertices.push(Vertex::new(radius * theta1.cos(), radius * theta1.sin(), color));
        vertices.push(Vertex::new(radius * theta2.cos(), radius * theta2.sin(), color));
    }

    vertices
}
