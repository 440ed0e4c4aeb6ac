//! View transform: pan, zoom and the fixed orthographic camera
//!
//! Zoom is a uniform scale about the world origin applied after translation,
//! so zooming also pushes sprites away from the center.

use glam::{Mat4, Vec2, Vec3};

use crate::consts::FIELD_HALF_EXTENT;
use crate::sim::body::{Body, SpriteKind};

/// Player-controlled view offset and zoom level
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub pan: Vec2,
    pub zoom_level: u32,
}

impl Camera {
    pub fn zoom_in(&mut self) {
        self.zoom_level = self.zoom_level.saturating_add(1);
    }

    /// Never goes below zero
    pub fn zoom_out(&mut self) {
        self.zoom_level = self.zoom_level.saturating_sub(1);
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.pan += Vec2::new(dx, dy);
    }

    /// Uniform scale for a sprite kind at the current zoom level
    pub fn scale_for(&self, kind: SpriteKind) -> f32 {
        if self.zoom_level == 0 {
            1.0
        } else {
            zoom_multiplier(kind) * self.zoom_level as f32
        }
    }

    /// Scale · Translate(pos + pan) · RotateZ(angle)
    pub fn model(&self, kind: SpriteKind, body: &Body) -> Mat4 {
        // The laser's x already carries the horizontal pan
        let offset = match kind {
            SpriteKind::Laser => Vec2::new(0.0, self.pan.y),
            _ => self.pan,
        };
        let pos = body.pos + offset;
        Mat4::from_scale(Vec3::splat(self.scale_for(kind)))
            * Mat4::from_translation(Vec3::new(pos.x, pos.y, 0.0))
            * Mat4::from_rotation_z(body.angle.to_radians())
    }

    /// Full model-view-projection for one sprite
    pub fn mvp(&self, kind: SpriteKind, body: &Body) -> Mat4 {
        view_projection() * self.model(kind, body)
    }
}

/// Per-kind zoom multiplier
pub fn zoom_multiplier(kind: SpriteKind) -> f32 {
    match kind {
        SpriteKind::Brick | SpriteKind::Laser => 1.3,
        SpriteKind::Obstacle | SpriteKind::Pip | SpriteKind::Segment => 1.1,
        SpriteKind::Background => 1.01,
        SpriteKind::Basket | SpriteKind::CannonBase | SpriteKind::CannonBarrel | SpriteKind::Mirror => 1.05,
    }
}

/// Orthographic [-4, 4]² projection with the eye at (0, 0, 3)
pub fn view_projection() -> Mat4 {
    let e = FIELD_HALF_EXTENT;
    let projection = Mat4::orthographic_rh(-e, e, -e, e, 0.1, 500.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y);
    projection * view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PAN_STEP;
    use crate::sim::body::{MeshId, palette};

    fn body_at(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::ONE, MeshId(0), palette::RED)
    }

    #[test]
    fn test_zoom_floor() {
        let mut cam = Camera::default();
        cam.zoom_out();
        assert_eq!(cam.zoom_level, 0);
        cam.zoom_in();
        cam.zoom_in();
        assert_eq!(cam.zoom_level, 2);
        assert!((cam.scale_for(SpriteKind::Brick) - 2.6).abs() < 1e-6);
        assert!((cam.scale_for(SpriteKind::Basket) - 2.1).abs() < 1e-6);
    }

    #[test]
    fn test_unzoomed_scale_is_identity() {
        let cam = Camera::default();
        for kind in [SpriteKind::Brick, SpriteKind::Background, SpriteKind::Segment] {
            assert_eq!(cam.scale_for(kind), 1.0);
        }
    }

    #[test]
    fn test_model_applies_pan() {
        let mut cam = Camera::default();
        cam.pan_by(PAN_STEP, PAN_STEP);
        let m = cam.model(SpriteKind::Mirror, &body_at(1.0, 1.0));
        let p = m.transform_point3(Vec3::ZERO);
        assert!((p.x - 1.1).abs() < 1e-6);
        assert!((p.y - 1.1).abs() < 1e-6);

        // laser x is already panned
        let p = cam.model(SpriteKind::Laser, &body_at(1.0, 1.0)).transform_point3(Vec3::ZERO);
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_field_corners_map_to_clip_edges() {
        let vp = view_projection();
        let corner = vp.project_point3(Vec3::new(4.0, 4.0, 0.0));
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
        assert!(corner.z >= 0.0 && corner.z <= 1.0);
    }
}
