//! Opening scene layout
//!
//! Creates every fixed actor and HUD part, uploading one mesh each through
//! the canvas. Bricks share one mesh per color.

use glam::Vec2;

use super::body::{Body, Rgb, palette};
use super::laser::Laser;
use super::registry::{Registry, RegistryError};
use super::state::{
    Basket, BasketColor, BasketStatus, Baskets, BrickKind, BrickMeshes, Cannon, Decoration, Mirror,
    Obstacle, ObstacleDirection, Pip, Scene, Segment,
};
use crate::consts::{BRICK_SIZE, FIELD_HALF_EXTENT, FLOOR_Y};
use crate::hud::{DigitSlot, SegmentPos};
use crate::renderer::Canvas;
use crate::renderer::shapes::{self, Corners};

const MOON_PARTS: u32 = 15;

/// Geometry of one seven-segment digit
struct DigitLayout {
    center_x: f32,
    left_x: f32,
    right_x: f32,
    rows: [f32; 3],
    upper_y: f32,
    lower_y: f32,
    bar: Vec2,
    upright: Vec2,
    /// The lives digit's upper-left bar is slightly thicker
    upper_left: Vec2,
}

impl DigitLayout {
    fn score(center_x: f32) -> Self {
        let upright = Vec2::new(0.02, 0.5);
        Self {
            center_x,
            left_x: center_x - 0.2,
            right_x: center_x + 0.2,
            rows: [3.8, 3.3, 2.8],
            upper_y: 3.55,
            lower_y: 3.05,
            bar: Vec2::new(0.4, 0.02),
            upright,
            upper_left: upright,
        }
    }

    fn lives() -> Self {
        Self {
            center_x: -3.45,
            left_x: -3.6,
            right_x: -3.3,
            rows: [3.8, 3.4, 3.0],
            upper_y: 3.6,
            lower_y: 3.2,
            bar: Vec2::new(0.3, 0.02),
            upright: Vec2::new(0.02, 0.4),
            upper_left: Vec2::new(0.03, 0.4),
        }
    }

    fn place(&self, position: SegmentPos) -> (Vec2, Vec2) {
        match position {
            SegmentPos::Top => (Vec2::new(self.center_x, self.rows[0]), self.bar),
            SegmentPos::Center => (Vec2::new(self.center_x, self.rows[1]), self.bar),
            SegmentPos::Bottom => (Vec2::new(self.center_x, self.rows[2]), self.bar),
            SegmentPos::UpperLeft => (Vec2::new(self.left_x, self.upper_y), self.upper_left),
            SegmentPos::UpperRight => (Vec2::new(self.right_x, self.upper_y), self.upright),
            SegmentPos::LowerLeft => (Vec2::new(self.left_x, self.lower_y), self.upright),
            SegmentPos::LowerRight => (Vec2::new(self.right_x, self.lower_y), self.upright),
        }
    }
}

fn rect_body(canvas: &mut dyn Canvas, pos: Vec2, size: Vec2, corners: Corners) -> Body {
    let mesh = canvas.create_mesh(&shapes::rectangle(size, corners));
    Body::new(pos, size, mesh, corners.bottom_left)
}

fn solid_body(canvas: &mut dyn Canvas, x: f32, y: f32, w: f32, h: f32, color: Rgb) -> Body {
    rect_body(canvas, Vec2::new(x, y), Vec2::new(w, h), Corners::solid(color))
}

fn basket(canvas: &mut dyn Canvas, color: BasketColor, x: f32) -> Basket {
    let rgb = match color {
        BasketColor::Red => palette::RED,
        BasketColor::Green => palette::GREEN,
    };
    Basket {
        color,
        body: solid_body(canvas, x, -3.5, 1.0, 1.0, rgb),
        status: BasketStatus::Free,
    }
}

fn background(canvas: &mut dyn Canvas) -> Result<Registry<Decoration>, RegistryError> {
    let mut background = Registry::new();

    let moon_mesh = canvas.create_mesh(&shapes::circle(0.4, palette::MOON_WHITE, MOON_PARTS));
    let moon = Body::new(Vec2::new(2.3, 3.0), Vec2::splat(0.8), moon_mesh, palette::MOON_WHITE);
    background.insert("moon", Decoration { body: moon })?;

    for (name, x) in [("star1", 1.0), ("star2", -1.0)] {
        let body = solid_body(canvas, x, 3.5, 0.3, 0.3, palette::YELLOW).with_angle(45.0);
        background.insert(name, Decoration { body })?;
    }

    let life = solid_body(canvas, -3.8, 3.4, 0.2, 0.2, palette::BLACK).with_angle(45.0);
    background.insert("life", Decoration { body: life })?;

    let floor = rect_body(
        canvas,
        Vec2::new(0.0, FLOOR_Y),
        Vec2::new(2.0 * FIELD_HALF_EXTENT, 0.02),
        Corners::new(palette::YELLOW, palette::SKY_BLUE, palette::SKY_BLUE, palette::YELLOW),
    );
    background.insert("floor", Decoration { body: floor })?;

    Ok(background)
}

fn scoreboard(canvas: &mut dyn Canvas) -> Result<Registry<Segment>, RegistryError> {
    let mut scoreboard = Registry::new();
    for slot in DigitSlot::ALL {
        let layout = match slot {
            DigitSlot::ScoreUnits => DigitLayout::score(3.6),
            DigitSlot::ScoreTens => DigitLayout::score(3.0),
            DigitSlot::Lives => DigitLayout::lives(),
        };
        for position in SegmentPos::ALL {
            let (pos, size) = layout.place(position);
            let body = rect_body(canvas, pos, size, Corners::solid(palette::BLUE));
            let name = format!("{}{}", position.prefix(), slot.index());
            scoreboard.insert(
                name,
                Segment {
                    slot,
                    position,
                    body,
                    lit: false,
                },
            )?;
        }
    }
    Ok(scoreboard)
}

fn level_pips(canvas: &mut dyn Canvas) -> Result<Registry<Pip>, RegistryError> {
    let mut pips = Registry::new();
    for (rank, x) in [(1u8, -3.6), (2, -3.45), (3, -3.3)] {
        let body = solid_body(canvas, x, 2.8, 0.1, 0.1, palette::YELLOW);
        pips.insert(format!("speed{rank}"), Pip { rank, body, lit: false })?;
    }
    Ok(pips)
}

/// Build the opening scene
pub fn bootstrap(canvas: &mut dyn Canvas) -> Result<Scene, RegistryError> {
    let background = background(canvas)?;

    let mut obstacles = Registry::new();
    let obstacle = rect_body(
        canvas,
        Vec2::new(-2.1, 0.0),
        Vec2::new(0.2, 1.5),
        Corners::new(palette::YELLOW, palette::RED, palette::RED, palette::YELLOW),
    );
    obstacles.insert(
        "move1",
        Obstacle {
            body: obstacle,
            direction: ObstacleDirection::Up,
        },
    )?;

    let baskets = Baskets {
        red: basket(canvas, BasketColor::Red, 0.6),
        green: basket(canvas, BasketColor::Green, -0.6),
    };

    let cannon = Cannon {
        base: rect_body(
            canvas,
            Vec2::new(-3.6, 0.0),
            Vec2::splat(0.8),
            Corners::new(palette::BLUE, palette::RED, palette::BLUE, palette::RED),
        ),
        barrel: rect_body(
            canvas,
            Vec2::new(-3.0, 0.0),
            Vec2::splat(0.4),
            Corners::new(palette::RED, palette::BLUE, palette::RED, palette::BLUE),
        ),
    };

    let mut mirrors = Registry::new();
    for (name, y, angle) in [("mirror1", 2.0, 135.0), ("mirror2", -1.0, 45.0)] {
        let body = solid_body(canvas, 2.5, y, 1.0, 0.3, palette::SKY_BLUE).with_angle(angle);
        mirrors.insert(name, Mirror { body })?;
    }

    let scoreboard = scoreboard(canvas)?;
    let level_pips = level_pips(canvas)?;

    let mut laser = Laser::new(solid_body(canvas, 0.0, 0.0, 1.0, 0.1, palette::BLUE));
    laser.track(&cannon.barrel, 0.0);

    let mut brick_mesh = |kind: BrickKind| {
        canvas.create_mesh(&shapes::rectangle(
            Vec2::splat(BRICK_SIZE),
            Corners::solid(kind.color()),
        ))
    };
    let brick_meshes = BrickMeshes {
        red: brick_mesh(BrickKind::Red),
        green: brick_mesh(BrickKind::Green),
        black: brick_mesh(BrickKind::Black),
    };

    Ok(Scene {
        baskets,
        cannon,
        laser,
        bricks: Vec::new(),
        brick_meshes,
        scoreboard,
        mirrors,
        background,
        obstacles,
        level_pips,
    })
}
