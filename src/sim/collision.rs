//! Collision detection and resolution
//!
//! Every contact uses the same center-distance test against both summed
//! half extents. Resolution runs in a fixed stage order and each stage
//! retires or resets its participants before the next one looks at them.

use super::body::Body;
use super::state::{BrickKind, GameEvent, GameState};
use crate::consts::{DROP_Y, FIELD_HALF_EXTENT, FLOOR_Y};

/// Center distance below both the summed half widths and summed half heights
pub fn overlaps(a: &Body, b: &Body) -> bool {
    let d = a.pos.distance(b.pos);
    let (ha, hb) = (a.half_extents(), b.half_extents());
    d < ha.x + hb.x && d < ha.y + hb.y
}

/// Resolve one frame of contacts. `dt` is the frame multiplier used for the
/// post-reflection step.
pub fn resolve(state: &mut GameState, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let pan_x = state.camera.pan.x;
    let scene = &mut state.scene;

    // 1. baskets too close block each other
    scene.baskets.update_overlap();

    // 2. mirrors
    if !scene.laser.is_idle() {
        for (name, mirror) in scene.mirrors.iter() {
            if overlaps(&scene.laser.body, &mirror.body) {
                scene.laser.reflect(mirror.body.angle, dt);
                events.push(GameEvent::LaserReflected {
                    mirror: name.to_string(),
                    angle: scene.laser.body.angle,
                });
            }
        }
    }

    // 3. moving obstacle
    if !scene.laser.is_idle()
        && scene
            .obstacles
            .values()
            .any(|o| overlaps(&scene.laser.body, &o.body))
    {
        scene.laser.reset(&scene.cannon.barrel, pan_x);
        events.push(GameEvent::LaserBlocked);
    }

    // 4. laser against live bricks
    if !scene.laser.is_idle() {
        for brick in scene.bricks.iter_mut().filter(|b| b.is_live()) {
            if overlaps(&scene.laser.body, &brick.body) {
                brick.retire();
                scene.laser.reset(&scene.cannon.barrel, pan_x);
                if brick.kind == BrickKind::Black {
                    state.score += 1;
                }
                events.push(GameEvent::BrickShot {
                    id: brick.id,
                    kind: brick.kind,
                });
                break;
            }
        }
    }

    // 5. floor: catch or lose a life
    let mut lives_lost = 0u8;
    for brick in scene.bricks.iter_mut().filter(|b| b.is_live()) {
        if brick.body.pos.y > FLOOR_Y {
            continue;
        }
        match brick.kind.basket() {
            Some(color) => {
                if scene.baskets.get(color).can_catch(brick) {
                    brick.retire();
                    state.score += 1;
                    events.push(GameEvent::BrickCaught {
                        id: brick.id,
                        kind: brick.kind,
                    });
                }
            }
            None => {
                brick.retire();
                lives_lost += 1;
                events.push(GameEvent::LifeLost { id: brick.id });
            }
        }
    }

    // 6. out of play
    for brick in scene.bricks.iter_mut().filter(|b| b.is_live()) {
        if brick.body.pos.y <= DROP_Y {
            brick.retire();
            events.push(GameEvent::BrickDropped { id: brick.id });
        }
    }

    // 7. laser left the field
    let pos = scene.laser.body.pos;
    if !scene.laser.is_idle() && (pos.x.abs() > FIELD_HALF_EXTENT || pos.y.abs() > FIELD_HALF_EXTENT) {
        scene.laser.reset(&scene.cannon.barrel, pan_x);
        events.push(GameEvent::LaserLost);
    }

    for _ in 0..lives_lost {
        state.lose_life();
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingCanvas;
    use crate::settings::Settings;
    use crate::sim::body::{MeshId, palette};
    use crate::sim::state::BasketStatus;
    use glam::Vec2;

    fn state() -> GameState {
        let mut canvas = RecordingCanvas::default();
        GameState::new(&mut canvas, &Settings::default(), 0.0).unwrap()
    }

    fn body(x: f32, y: f32, w: f32, h: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(w, h), MeshId(0), palette::BLUE)
    }

    #[test]
    fn test_overlap_needs_both_axes() {
        let laser = body(0.0, 0.0, 1.0, 0.1);
        // within half-width sum (0.6) but not half-height sum (0.15)
        assert!(!overlaps(&laser, &body(0.3, 0.0, 0.2, 0.2)));
        assert!(overlaps(&laser, &body(0.1, 0.0, 0.2, 0.2)));
    }

    #[test]
    fn test_overlapping_baskets_refuse_catch() {
        let mut s = state();
        s.scene.baskets.red.body.pos.x = 0.0;
        s.scene.baskets.green.body.pos.x = 0.9;
        let id = s.add_brick(BrickKind::Red, Vec2::new(0.0, -2.8));
        let events = resolve(&mut s, 1.0);
        assert_eq!(s.scene.baskets.red.status, BasketStatus::Blocked);
        assert_eq!(s.scene.baskets.green.status, BasketStatus::Blocked);
        assert!(s.scene.brick(id).unwrap().is_live());
        assert!(events.is_empty());
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_wrong_basket_misses() {
        let mut s = state();
        s.scene.baskets.red.body.pos.x = 2.0;
        s.scene.baskets.green.body.pos.x = -2.0;
        let id = s.add_brick(BrickKind::Green, Vec2::new(2.0, -2.85));
        resolve(&mut s, 1.0);
        assert!(s.scene.brick(id).unwrap().is_live());
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_black_floor_costs_life() {
        let mut s = state();
        let id = s.add_brick(BrickKind::Black, Vec2::new(1.0, -2.8));
        let events = resolve(&mut s, 1.0);
        assert_eq!(events, vec![GameEvent::LifeLost { id }]);
        assert_eq!(s.lives, 4);
    }

    #[test]
    fn test_shot_black_scores_red_does_not() {
        let mut s = state();
        let black = s.add_brick(BrickKind::Black, Vec2::new(0.0, 1.0));
        s.scene.laser.fire(&s.scene.cannon.barrel, 0.0);
        s.scene.laser.body.pos = Vec2::new(0.05, 1.0);
        resolve(&mut s, 1.0);
        assert!(!s.scene.brick(black).unwrap().is_live());
        assert_eq!(s.score, 1);
        assert!(s.scene.laser.is_idle());

        let red = s.add_brick(BrickKind::Red, Vec2::new(0.0, 1.0));
        s.scene.laser.fire(&s.scene.cannon.barrel, 0.0);
        s.scene.laser.body.pos = Vec2::new(0.05, 1.0);
        resolve(&mut s, 1.0);
        assert!(!s.scene.brick(red).unwrap().is_live());
        assert_eq!(s.score, 1);
    }

    #[test]
    fn test_idle_laser_never_hits() {
        let mut s = state();
        let id = s.add_brick(BrickKind::Black, Vec2::new(-3.0, 0.0));
        resolve(&mut s, 1.0);
        assert!(s.scene.brick(id).unwrap().is_live());
    }

    #[test]
    fn test_obstacle_blocks_laser() {
        let mut s = state();
        s.scene.laser.fire(&s.scene.cannon.barrel, 0.0);
        s.scene.laser.body.pos = Vec2::new(-2.1, 0.3);
        let events = resolve(&mut s, 1.0);
        assert_eq!(events, vec![GameEvent::LaserBlocked]);
        assert!(s.scene.laser.is_idle());
    }

    #[test]
    fn test_drop_below_field() {
        let mut s = state();
        s.scene.baskets.red.body.pos.x = 3.0;
        let id = s.add_brick(BrickKind::Red, Vec2::new(-3.0, -3.2));
        let events = resolve(&mut s, 1.0);
        assert_eq!(events, vec![GameEvent::BrickDropped { id }]);
    }

    #[test]
    fn test_laser_off_field_resets() {
        let mut s = state();
        s.scene.laser.fire(&s.scene.cannon.barrel, 0.0);
        s.scene.laser.body.pos = Vec2::new(4.2, 0.0);
        let events = resolve(&mut s, 1.0);
        assert_eq!(events, vec![GameEvent::LaserLost]);
        assert_eq!(s.scene.laser.body.pos, s.scene.cannon.barrel.pos);
    }
}
