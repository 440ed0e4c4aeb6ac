//! Brick Breaker - catch falling blocks, shoot the black ones
//!
//! Core modules:
//! - `sim`: Frame simulation (entities, spawner, laser, collisions, game state)
//! - `input`: Event queue and key/mouse command mapping
//! - `hud`: Seven-segment scoreboard and level pips
//! - `camera`: Pan/zoom view transform
//! - `renderer`: Mesh creation and wgpu drawing
//! - `settings`: Boot-time configuration

pub mod camera;
pub mod error;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::InitError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Frame delta multiplier; normalizes laser motion to a nominal 60 Hz
    pub const FRAME_RATE_SCALE: f64 = 60.0;

    /// Play field half extent in world units (field is [-4, 4]²)
    pub const FIELD_HALF_EXTENT: f32 = 4.0;
    /// Reference window size used by the cursor transform
    pub const CURSOR_PIXELS_PER_UNIT: f64 = 75.0;

    /// Lives at the start of a run
    pub const STARTING_LIVES: u8 = 5;

    /// Brick fall speed per level step (per frame, not time scaled)
    pub const FALL_SPEED_STEP: f32 = 0.01;
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_LEVEL: u8 = 3;

    /// Brick footprint
    pub const BRICK_SIZE: f32 = 0.2;
    /// Bricks at or below this height are checked against the baskets
    pub const FLOOR_Y: f32 = -2.8;
    /// Bricks at or below this height are out of play
    pub const DROP_Y: f32 = -3.1;
    /// Horizontal catch tolerance around a basket center
    pub const CATCH_REACH: f32 = 0.5;
    /// Baskets closer than this block each other
    pub const BASKET_OVERLAP_DISTANCE: f32 = 1.0;

    /// Basket x clamp (upper bound is shifted left by the horizontal pan)
    pub const BASKET_X_LIMIT: f32 = 3.5;
    /// Cannon vertical travel
    pub const CANNON_MIN_Y: f32 = -2.3;
    pub const CANNON_MAX_Y: f32 = 2.25;

    /// Laser speed per nominal tick
    pub const LASER_SPEED: f32 = 0.30;

    /// Moving obstacle step per frame and turnaround heights
    pub const OBSTACLE_STEP: f32 = 0.05;
    pub const OBSTACLE_TOP: f32 = 3.1;
    pub const OBSTACLE_BOTTOM: f32 = -3.1;

    /// Keyboard nudge sizes
    pub const BASKET_NUDGE: f32 = 0.1;
    pub const CANNON_NUDGE: f32 = 0.1;
    pub const CANNON_TURN_DEGREES: f32 = 10.0;
    pub const PAN_STEP: f32 = 0.1;

    /// Spawn cadence and placement
    pub const SPAWN_INTERVAL_SECS: f64 = 1.5;
    pub const SPAWN_BATCH: u32 = 3;
    pub const SPAWN_MIN_X: f32 = -2.0;
    pub const SPAWN_MAX_X: f32 = 2.0;
    pub const SPAWN_MIN_Y: f32 = 3.1;
    pub const SPAWN_MAX_Y: f32 = 3.8;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit heading for an angle in degrees (counter-clockwise from +x)
#[inline]
pub fn heading(angle_degrees: f32) -> glam::Vec2 {
    let radians = angle_degrees.to_radians();
    glam::Vec2::new(radians.cos(), radians.sin())
}
