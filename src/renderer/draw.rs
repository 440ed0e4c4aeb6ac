//! Scene draw pass
//!
//! Fixed order: baskets, cannon, mirrors, laser, bricks, scoreboard,
//! background, obstacle, level pips. Hidden sprites are skipped.

use super::canvas::Canvas;
use crate::camera::Camera;
use crate::sim::body::{Sprite, SpriteKind};
use crate::sim::state::{GameState, Part};

fn draw_sprite(canvas: &mut dyn Canvas, camera: &Camera, sprite: &dyn Sprite) {
    if sprite.is_visible() {
        let body = sprite.body();
        canvas.draw(body.mesh, camera.mvp(sprite.kind(), body));
    }
}

/// Queue every visible sprite of the current frame
pub fn draw_scene(canvas: &mut dyn Canvas, state: &GameState) {
    let camera = &state.camera;
    let scene = &state.scene;

    for basket in scene.baskets.iter() {
        draw_sprite(canvas, camera, basket);
    }

    let base = Part {
        kind: SpriteKind::CannonBase,
        body: &scene.cannon.base,
    };
    let barrel = Part {
        kind: SpriteKind::CannonBarrel,
        body: &scene.cannon.barrel,
    };
    draw_sprite(canvas, camera, &base);
    draw_sprite(canvas, camera, &barrel);

    for mirror in scene.mirrors.values() {
        draw_sprite(canvas, camera, mirror);
    }

    draw_sprite(canvas, camera, &scene.laser);

    for brick in &scene.bricks {
        draw_sprite(canvas, camera, brick);
    }
    for segment in scene.scoreboard.values() {
        draw_sprite(canvas, camera, segment);
    }
    for decoration in scene.background.values() {
        draw_sprite(canvas, camera, decoration);
    }
    for obstacle in scene.obstacles.values() {
        draw_sprite(canvas, camera, obstacle);
    }
    for pip in scene.level_pips.values() {
        draw_sprite(canvas, camera, pip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingCanvas;
    use crate::settings::Settings;
    use crate::sim::state::BrickKind;
    use glam::Vec2;

    #[test]
    fn test_draw_counts() {
        let mut canvas = RecordingCanvas::default();
        let mut state = GameState::new(&mut canvas, &Settings::default(), 0.0).unwrap();

        draw_scene(&mut canvas, &state);
        // score "00" and lives "5" light 6 + 6 + 5 segments; idle laser hidden
        let lit_segments = state.scene.scoreboard.values().filter(|s| s.lit).count();
        assert_eq!(lit_segments, 6 + 6 + 5);
        assert_eq!(canvas.draws.len(), 2 + 2 + 2 + lit_segments + 5 + 1 + 1);

        canvas.clear_draws();
        let id = state.add_brick(BrickKind::Red, Vec2::new(0.0, 3.0));
        state.scene.laser.fire(&state.scene.cannon.barrel, 0.0);
        draw_scene(&mut canvas, &state);
        let with_brick = canvas.draws.len();

        canvas.clear_draws();
        state.scene.bricks.iter_mut().find(|b| b.id == id).unwrap().retire();
        draw_scene(&mut canvas, &state);
        assert_eq!(canvas.draws.len(), with_brick - 1);
    }

    #[test]
    fn test_bricks_share_color_mesh() {
        let mut canvas = RecordingCanvas::default();
        let mut state = GameState::new(&mut canvas, &Settings::default(), 0.0).unwrap();
        state.add_brick(BrickKind::Black, Vec2::new(0.0, 3.0));
        state.add_brick(BrickKind::Black, Vec2::new(1.0, 3.0));
        let meshes_before = canvas.meshes.len();
        draw_scene(&mut canvas, &state);
        assert_eq!(canvas.meshes.len(), meshes_before);
        let black = state.scene.brick_meshes.black;
        assert_eq!(canvas.draws.iter().filter(|(m, _)| *m == black).count(), 2);
    }
}
