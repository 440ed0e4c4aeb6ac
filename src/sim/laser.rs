//! Laser projectile lifecycle
//!
//! A single shared projectile. While idle it rides the cannon muzzle; once
//! fired its heading is frozen except for mirror reflections, and any hit,
//! obstacle contact or exit from the field snaps it back to the muzzle.

use glam::Vec2;

use super::body::{Body, Sprite, SpriteKind};
use crate::consts::LASER_SPEED;
use crate::{heading, normalize_degrees};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaserState {
    /// Attached to the cannon muzzle
    #[default]
    Idle,
    InFlight,
}

#[derive(Debug, Clone)]
pub struct Laser {
    pub body: Body,
    /// Displacement per nominal tick
    pub vel: Vec2,
    pub state: LaserState,
}

impl Laser {
    pub fn new(body: Body) -> Self {
        Self {
            body,
            vel: Vec2::ZERO,
            state: LaserState::Idle,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state == LaserState::Idle
    }

    /// Follow the barrel while idle. The horizontal pan is folded into x.
    pub fn track(&mut self, barrel: &Body, pan_x: f32) {
        self.body.pos = Vec2::new(barrel.pos.x + pan_x, barrel.pos.y);
        self.body.angle = barrel.angle;
    }

    /// Launch from the muzzle with the barrel's heading; ignored while in flight
    pub fn fire(&mut self, barrel: &Body, pan_x: f32) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.track(barrel, pan_x);
        self.refresh_velocity();
        self.state = LaserState::InFlight;
        true
    }

    /// Return to the muzzle
    pub fn reset(&mut self, barrel: &Body, pan_x: f32) {
        self.state = LaserState::Idle;
        self.vel = Vec2::ZERO;
        self.track(barrel, pan_x);
    }

    /// Move along the current heading, scaled by the frame multiplier
    pub fn advance(&mut self, dt: f32) {
        if self.is_idle() {
            return;
        }
        self.refresh_velocity();
        self.body.pos += self.vel * dt;
    }

    /// Bounce off a mirror: heading gains twice the mirror angle, then the
    /// laser steps once along the new heading to clear the surface.
    pub fn reflect(&mut self, mirror_angle: f32, dt: f32) {
        self.body.angle = normalize_degrees(self.body.angle + 2.0 * mirror_angle);
        self.refresh_velocity();
        self.body.pos += self.vel * dt;
    }

    fn refresh_velocity(&mut self) {
        self.vel = heading(self.body.angle) * LASER_SPEED;
    }
}

impl Sprite for Laser {
    fn kind(&self) -> SpriteKind {
        SpriteKind::Laser
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn status(&self) -> u8 {
        match self.state {
            LaserState::Idle => 0,
            LaserState::InFlight => 1,
        }
    }

    /// Only drawn while travelling
    fn is_visible(&self) -> bool {
        !self.is_idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::{MeshId, palette};

    fn barrel(x: f32, y: f32, angle: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::splat(0.4), MeshId(1), palette::RED).with_angle(angle)
    }

    fn laser() -> Laser {
        Laser::new(Body::new(
            Vec2::ZERO,
            Vec2::new(1.0, 0.1),
            MeshId(2),
            palette::BLUE,
        ))
    }

    #[test]
    fn test_fire_copies_barrel_heading() {
        let mut l = laser();
        assert!(l.fire(&barrel(-3.0, 1.0, 30.0), 0.2));
        assert_eq!(l.state, LaserState::InFlight);
        assert!((l.body.pos.x - (-2.8)).abs() < 1e-6);
        assert_eq!(l.body.pos.y, 1.0);
        assert_eq!(l.body.angle, 30.0);
    }

    #[test]
    fn test_fire_ignored_in_flight() {
        let mut l = laser();
        l.fire(&barrel(-3.0, 0.0, 0.0), 0.0);
        l.advance(1.0);
        let pos = l.body.pos;
        assert!(!l.fire(&barrel(-3.0, 2.0, 90.0), 0.0));
        assert_eq!(l.body.pos, pos);
        assert_eq!(l.body.angle, 0.0);
    }

    #[test]
    fn test_advance_scales_by_dt() {
        let mut l = laser();
        l.fire(&barrel(0.0, 0.0, 0.0), 0.0);
        l.advance(2.0);
        assert!((l.body.pos.x - 0.6).abs() < 1e-6);
        assert!(l.body.pos.y.abs() < 1e-6);
    }

    #[test]
    fn test_idle_does_not_advance() {
        let mut l = laser();
        l.track(&barrel(-3.0, 0.5, 0.0), 0.0);
        l.advance(1.0);
        assert_eq!(l.body.pos, Vec2::new(-3.0, 0.5));
    }

    #[test]
    fn test_reflect_off_upper_mirror() {
        let mut l = laser();
        l.fire(&barrel(2.4, 2.0, 0.0), 0.0);
        l.reflect(135.0, 1.0);
        assert_eq!(l.body.angle, 270.0);
        assert!((l.body.pos.x - 2.4).abs() < 1e-5);
        assert!((l.body.pos.y - 1.7).abs() < 1e-5);
    }

    #[test]
    fn test_reset_snaps_to_barrel() {
        let mut l = laser();
        l.fire(&barrel(-3.0, 0.0, 20.0), 0.0);
        l.advance(5.0);
        l.reset(&barrel(-3.0, 1.5, 40.0), 0.3);
        assert!(l.is_idle());
        assert!((l.body.pos.x - (-2.7)).abs() < 1e-6);
        assert_eq!(l.body.pos.y, 1.5);
        assert_eq!(l.body.angle, 40.0);
        assert!(!l.is_visible());
    }
}
