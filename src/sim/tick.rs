//! Per-frame simulation
//!
//! Wall-clock driven: laser motion scales with the frame multiplier, while
//! bricks and the obstacle move a fixed step per frame.

use super::collision;
use super::spawn;
use super::state::{GameEvent, GameState};
use crate::hud;
use crate::input;

/// Run one frame at wall-clock time `now`: drag, motion, collisions, HUD.
/// Does nothing once the game is over.
pub fn advance(state: &mut GameState, now: f64) -> Vec<GameEvent> {
    if state.is_over() {
        return Vec::new();
    }

    state.clock.tick(now);
    let dt = state.clock.frame_scale();

    input::apply_drag(state);
    simulate(state, dt);
    let events = collision::resolve(state, dt);
    for event in &events {
        log::debug!("{:?}", event);
    }

    hud::refresh(state);
    events
}

/// `advance` followed by the spawn check, for callers without a draw step
pub fn frame(state: &mut GameState, now: f64) -> Vec<GameEvent> {
    let events = advance(state, now);
    spawn::maybe_spawn(state, now);
    events
}

/// Move everything that moves on its own
pub fn simulate(state: &mut GameState, dt: f32) {
    let pan_x = state.camera.pan.x;
    let scene = &mut state.scene;

    for basket in scene.baskets.iter_mut() {
        basket.clamp_x(pan_x);
    }
    let cannon_y = scene.cannon.y();
    scene.cannon.set_y(cannon_y);

    for brick in scene.bricks.iter_mut() {
        brick.fall();
    }

    for obstacle in scene.obstacles.values_mut() {
        obstacle.step();
    }

    scene.track_laser(pan_x);
    scene.laser.advance(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingCanvas;
    use crate::settings::Settings;
    use crate::sim::state::{BrickKind, GamePhase};
    use glam::Vec2;

    const FRAME: f64 = 1.0 / 60.0;

    fn state() -> GameState {
        let mut canvas = RecordingCanvas::default();
        GameState::new(&mut canvas, &Settings::default(), 0.0).unwrap()
    }

    #[test]
    fn test_brick_falls_fixed_step() {
        let mut s = state();
        let id = s.add_brick(BrickKind::Red, Vec2::new(0.0, 3.0));
        // a long frame still drops only one step
        advance(&mut s, 0.5);
        let y = s.scene.brick(id).unwrap().body.pos.y;
        assert!((y - 2.99).abs() < 1e-6);
    }

    #[test]
    fn test_laser_scales_with_frame_time() {
        let mut s = state();
        s.scene.cannon.set_y(-2.0);
        s.scene.laser.fire(&s.scene.cannon.barrel, 0.0);
        advance(&mut s, 2.0 * FRAME);
        let x = s.scene.laser.body.pos.x;
        assert!((x - (-3.0 + 0.6)).abs() < 1e-4);
    }

    #[test]
    fn test_idle_laser_follows_pan() {
        let mut s = state();
        s.camera.pan_by(crate::consts::PAN_STEP, 0.0);
        advance(&mut s, FRAME);
        assert!((s.scene.laser.body.pos.x - (-2.9)).abs() < 1e-6);
    }

    #[test]
    fn test_game_over_halts() {
        let mut s = state();
        s.phase = GamePhase::GameOver;
        let id = s.add_brick(BrickKind::Black, Vec2::new(0.0, 3.0));
        assert!(frame(&mut s, 10.0).is_empty());
        assert_eq!(s.scene.brick(id).unwrap().body.pos.y, 3.0);
        assert_eq!(s.scene.bricks.len(), 1);
    }

    #[test]
    fn test_frame_spawns_on_cadence() {
        let mut s = state();
        frame(&mut s, 1.0);
        assert!(s.scene.bricks.is_empty());
        frame(&mut s, 1.5);
        assert_eq!(s.scene.bricks.len(), 3);
    }
}
