//! Shared sprite model
//!
//! Every drawable entity carries a `Body`: where it is, how big it is, how it
//! is rotated, and which mesh draws it. Kind-specific status lives on the
//! owning entity type.

use glam::Vec2;

/// Opaque handle to GPU geometry, issued by a `Canvas`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MeshId(pub u32);

/// RGB color in [0, 1]
pub type Rgb = [f32; 3];

/// Palette used by the scene
pub mod palette {
    use super::Rgb;

    pub const RED: Rgb = [1.0, 0.0, 0.0];
    pub const GREEN: Rgb = [0.0, 1.0, 0.0];
    pub const BLUE: Rgb = [0.0, 0.0, 1.0];
    pub const BLACK: Rgb = [0.0, 0.0, 0.0];
    pub const YELLOW: Rgb = [1.0, 1.0, 0.0];
    pub const SKY_BLUE: Rgb = [0.0, 1.0, 1.0];
    pub const MOON_WHITE: Rgb = [224.0 / 255.0, 224.0 / 255.0, 224.0 / 255.0];
    pub const BACKGROUND: Rgb = [128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0];
}

/// What an entity is, for draw ordering and zoom multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Basket,
    CannonBase,
    CannonBarrel,
    Laser,
    Brick,
    Mirror,
    Obstacle,
    Segment,
    Background,
    Pip,
}

/// Pose, footprint and appearance of a sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// World-space center
    pub pos: Vec2,
    /// Axis-aligned (width, height) before rotation
    pub size: Vec2,
    /// Degrees, counter-clockwise about the center
    pub angle: f32,
    pub mesh: MeshId,
    /// Base color (informational once meshed)
    pub color: Rgb,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, mesh: MeshId, color: Rgb) -> Self {
        Self {
            pos,
            size,
            angle: 0.0,
            mesh,
            color,
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// True when `point` lies inside the 1×1 grab square centered on this body
    pub fn grab_square_contains(&self, point: Vec2) -> bool {
        (point.x - self.pos.x).abs() <= 0.5 && (point.y - self.pos.y).abs() <= 0.5
    }
}

/// Read access shared by all drawable entities
pub trait Sprite {
    fn kind(&self) -> SpriteKind;

    fn body(&self) -> &Body;

    /// Kind-specific status as a small integer (see each entity type)
    fn status(&self) -> u8 {
        0
    }

    /// Hidden sprites are neither drawn nor collided
    fn is_visible(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grab_square() {
        let body = Body::new(Vec2::new(1.0, -3.5), Vec2::ONE, MeshId(0), palette::RED);
        assert!(body.grab_square_contains(Vec2::new(1.4, -3.1)));
        assert!(body.grab_square_contains(Vec2::new(0.5, -4.0)));
        assert!(!body.grab_square_contains(Vec2::new(1.6, -3.5)));
    }

    #[test]
    fn test_half_extents() {
        let body = Body::new(Vec2::ZERO, Vec2::new(1.0, 0.3), MeshId(0), palette::SKY_BLUE);
        assert_eq!(body.half_extents(), Vec2::new(0.5, 0.15));
    }
}
