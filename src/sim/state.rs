//! Game state and entity types
//!
//! Everything the frame loop mutates lives in one `GameState` passed by
//! reference; there are no process-wide globals.

use glam::Vec2;

use super::body::{Body, MeshId, Rgb, Sprite, SpriteKind, palette};
use super::laser::Laser;
use super::registry::{Registry, RegistryError};
use super::spawn::Spawner;
use crate::camera::Camera;
use crate::consts::*;
use crate::hud::{DigitSlot, SegmentPos};
use crate::input::InputState;
use crate::renderer::Canvas;
use crate::settings::Settings;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Lives exhausted; simulation halted
    GameOver,
}

/// Something that happened during collision resolution
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Brick landed in the matching basket
    BrickCaught { id: u32, kind: BrickKind },
    /// Laser destroyed a brick
    BrickShot { id: u32, kind: BrickKind },
    /// Black brick reached the floor
    LifeLost { id: u32 },
    /// Brick fell out of play uncaught
    BrickDropped { id: u32 },
    /// Laser bounced off a mirror
    LaserReflected { mirror: String, angle: f32 },
    /// Laser hit the moving obstacle
    LaserBlocked,
    /// Laser left the field
    LaserLost,
}

// ============================================================================
// BRICKS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrickKind {
    Red,
    Green,
    Black,
}

impl BrickKind {
    pub const ALL: [BrickKind; 3] = [BrickKind::Black, BrickKind::Red, BrickKind::Green];

    pub fn color(self) -> Rgb {
        match self {
            BrickKind::Red => palette::RED,
            BrickKind::Green => palette::GREEN,
            BrickKind::Black => palette::BLACK,
        }
    }

    /// Basket that may catch this brick (black bricks must never be caught)
    pub fn basket(self) -> Option<BasketColor> {
        match self {
            BrickKind::Red => Some(BasketColor::Red),
            BrickKind::Green => Some(BasketColor::Green),
            BrickKind::Black => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickStatus {
    Falling,
    /// Consumed: not drawn, never collides
    Retired,
}

#[derive(Debug, Clone)]
pub struct Brick {
    pub id: u32,
    pub kind: BrickKind,
    pub body: Body,
    /// Per-frame drop distance
    pub fall_speed: f32,
    pub status: BrickStatus,
}

impl Brick {
    /// Registry-style name: the decimal spawn counter
    pub fn name(&self) -> String {
        self.id.to_string()
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.status == BrickStatus::Falling
    }

    pub fn retire(&mut self) {
        self.status = BrickStatus::Retired;
    }

    pub fn fall(&mut self) {
        if self.is_live() {
            self.body.pos.y -= self.fall_speed;
        }
    }
}

impl Sprite for Brick {
    fn kind(&self) -> SpriteKind {
        SpriteKind::Brick
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn status(&self) -> u8 {
        match self.status {
            BrickStatus::Falling => 0,
            BrickStatus::Retired => 1,
        }
    }

    fn is_visible(&self) -> bool {
        self.is_live()
    }
}

/// Shared meshes, one per brick color
#[derive(Debug, Clone, Copy, Default)]
pub struct BrickMeshes {
    pub red: MeshId,
    pub green: MeshId,
    pub black: MeshId,
}

impl BrickMeshes {
    pub fn get(&self, kind: BrickKind) -> MeshId {
        match kind {
            BrickKind::Red => self.red,
            BrickKind::Green => self.green,
            BrickKind::Black => self.black,
        }
    }
}

// ============================================================================
// BASKETS AND CANNON
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasketColor {
    Red,
    Green,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BasketStatus {
    #[default]
    Free,
    /// Overlapping the other basket; refuses catches this frame
    Blocked,
}

#[derive(Debug, Clone)]
pub struct Basket {
    pub color: BasketColor,
    pub body: Body,
    pub status: BasketStatus,
}

impl Basket {
    /// Keep the center on screen. The upper bound is applied first so an
    /// inverted range (large pan) settles on the left edge.
    pub fn clamp_x(&mut self, pan_x: f32) {
        let x = self.body.pos.x.min(BASKET_X_LIMIT - pan_x);
        self.body.pos.x = x.max(-BASKET_X_LIMIT);
    }

    pub fn can_catch(&self, brick: &Brick) -> bool {
        self.status == BasketStatus::Free
            && brick.kind.basket() == Some(self.color)
            && (brick.body.pos.x - self.body.pos.x).abs() <= CATCH_REACH
    }
}

impl Sprite for Basket {
    fn kind(&self) -> SpriteKind {
        SpriteKind::Basket
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn status(&self) -> u8 {
        match self.status {
            BasketStatus::Free => 0,
            BasketStatus::Blocked => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Baskets {
    pub red: Basket,
    pub green: Basket,
}

impl Baskets {
    pub fn get(&self, color: BasketColor) -> &Basket {
        match color {
            BasketColor::Red => &self.red,
            BasketColor::Green => &self.green,
        }
    }

    pub fn get_mut(&mut self, color: BasketColor) -> &mut Basket {
        match color {
            BasketColor::Red => &mut self.red,
            BasketColor::Green => &mut self.green,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Basket> {
        [&self.red, &self.green].into_iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Basket> {
        [&mut self.red, &mut self.green].into_iter()
    }

    /// Mark both baskets blocked while they sit too close together
    pub fn update_overlap(&mut self) {
        let gap = (self.red.body.pos.x - self.green.body.pos.x).abs();
        let status = if gap < BASKET_OVERLAP_DISTANCE {
            BasketStatus::Blocked
        } else {
            BasketStatus::Free
        };
        self.red.status = status;
        self.green.status = status;
    }
}

/// Side-mounted cannon: a fixed base and a rotating barrel sharing one height
#[derive(Debug, Clone)]
pub struct Cannon {
    pub base: Body,
    pub barrel: Body,
}

impl Cannon {
    pub fn y(&self) -> f32 {
        self.barrel.pos.y
    }

    pub fn set_y(&mut self, y: f32) {
        let y = y.min(CANNON_MAX_Y).max(CANNON_MIN_Y);
        self.base.pos.y = y;
        self.barrel.pos.y = y;
    }

    pub fn nudge_y(&mut self, dy: f32) {
        self.set_y(self.y() + dy);
    }

    pub fn turn(&mut self, degrees: f32) {
        self.barrel.angle += degrees;
    }
}

// ============================================================================
// FIXTURES AND HUD PARTS
// ============================================================================

/// Static reflector
#[derive(Debug, Clone)]
pub struct Mirror {
    pub body: Body,
}

impl Sprite for Mirror {
    fn kind(&self) -> SpriteKind {
        SpriteKind::Mirror
    }

    fn body(&self) -> &Body {
        &self.body
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObstacleDirection {
    #[default]
    Up,
    Down,
}

/// Vertically oscillating bar that swallows the laser
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub body: Body,
    pub direction: ObstacleDirection,
}

impl Obstacle {
    /// Move one step, turning around at the top and bottom of the field
    pub fn step(&mut self) {
        match self.direction {
            ObstacleDirection::Up => self.body.pos.y += OBSTACLE_STEP,
            ObstacleDirection::Down => self.body.pos.y -= OBSTACLE_STEP,
        }
        if self.body.pos.y >= OBSTACLE_TOP {
            self.direction = ObstacleDirection::Down;
        } else if self.body.pos.y <= OBSTACLE_BOTTOM {
            self.direction = ObstacleDirection::Up;
        }
    }
}

impl Sprite for Obstacle {
    fn kind(&self) -> SpriteKind {
        SpriteKind::Obstacle
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn status(&self) -> u8 {
        match self.direction {
            ObstacleDirection::Up => 0,
            ObstacleDirection::Down => 1,
        }
    }
}

/// Scenery drawn behind nothing in particular; never collides
#[derive(Debug, Clone)]
pub struct Decoration {
    pub body: Body,
}

impl Sprite for Decoration {
    fn kind(&self) -> SpriteKind {
        SpriteKind::Background
    }

    fn body(&self) -> &Body {
        &self.body
    }
}

/// One bar of a seven-segment digit
#[derive(Debug, Clone)]
pub struct Segment {
    pub slot: DigitSlot,
    pub position: SegmentPos,
    pub body: Body,
    pub lit: bool,
}

impl Sprite for Segment {
    fn kind(&self) -> SpriteKind {
        SpriteKind::Segment
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn status(&self) -> u8 {
        self.lit as u8
    }

    fn is_visible(&self) -> bool {
        self.lit
    }
}

/// Level indicator square; lit when the level reaches its rank
#[derive(Debug, Clone)]
pub struct Pip {
    pub rank: u8,
    pub body: Body,
    pub lit: bool,
}

impl Sprite for Pip {
    fn kind(&self) -> SpriteKind {
        SpriteKind::Pip
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn status(&self) -> u8 {
        self.lit as u8
    }

    fn is_visible(&self) -> bool {
        self.lit
    }
}

/// Borrowed view of a body that has no entity type of its own (cannon parts)
pub struct Part<'a> {
    pub kind: SpriteKind,
    pub body: &'a Body,
}

impl Sprite for Part<'_> {
    fn kind(&self) -> SpriteKind {
        self.kind
    }

    fn body(&self) -> &Body {
        self.body
    }
}

// ============================================================================
// SCENE, LEVEL, CLOCK
// ============================================================================

/// All entities grouped by role
#[derive(Debug, Clone)]
pub struct Scene {
    pub baskets: Baskets,
    pub cannon: Cannon,
    pub laser: Laser,
    /// Spawned bricks in spawn order; retired ones are pruned at the next spawn
    pub bricks: Vec<Brick>,
    pub brick_meshes: BrickMeshes,
    pub scoreboard: Registry<Segment>,
    pub mirrors: Registry<Mirror>,
    pub background: Registry<Decoration>,
    pub obstacles: Registry<Obstacle>,
    pub level_pips: Registry<Pip>,
}

impl Scene {
    pub fn brick(&self, id: u32) -> Option<&Brick> {
        self.bricks.iter().find(|b| b.id == id)
    }

    pub fn live_bricks(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_live())
    }

    /// Snap the laser to the muzzle if it is idle
    pub fn track_laser(&mut self, pan_x: f32) {
        if self.laser.is_idle() {
            self.laser.track(&self.cannon.barrel, pan_x);
        }
    }
}

/// Difficulty level, 1..=3; each step adds 0.01 to the per-frame fall speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Level(u8);

impl Default for Level {
    fn default() -> Self {
        Level(MIN_LEVEL)
    }
}

impl Level {
    pub fn new(level: u8) -> Self {
        Level(level.clamp(MIN_LEVEL, MAX_LEVEL))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn fall_speed(self) -> f32 {
        FALL_SPEED_STEP * self.0 as f32
    }

    pub fn raised(self) -> Self {
        Level::new(self.0.saturating_add(1))
    }

    pub fn lowered(self) -> Self {
        Level::new(self.0.saturating_sub(1))
    }
}

/// Wall-clock frame timing (seconds)
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    pub current: f64,
    pub previous: f64,
}

impl Clock {
    pub fn starting_at(now: f64) -> Self {
        Self {
            current: now,
            previous: now,
        }
    }

    pub fn tick(&mut self, now: f64) {
        self.previous = self.current;
        self.current = now;
    }

    /// Frame delta as a multiple of a nominal 60 Hz tick
    pub fn frame_scale(&self) -> f32 {
        ((self.current - self.previous) * FRAME_RATE_SCALE) as f32
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// The whole game context
#[derive(Debug, Clone)]
pub struct GameState {
    pub scene: Scene,
    pub score: u32,
    pub lives: u8,
    pub level: Level,
    pub camera: Camera,
    pub input: InputState,
    pub clock: Clock,
    pub spawner: Spawner,
    pub phase: GamePhase,
}

impl GameState {
    /// Build the opening scene, creating every mesh through `canvas`
    pub fn new(canvas: &mut dyn Canvas, settings: &Settings, now: f64) -> Result<Self, RegistryError> {
        let scene = super::scene::bootstrap(canvas)?;
        let mut state = Self {
            scene,
            score: 0,
            lives: settings.starting_lives,
            level: Level::default(),
            camera: Camera::default(),
            input: InputState::default(),
            clock: Clock::starting_at(now),
            spawner: Spawner::from_settings(&settings.spawn, now),
            phase: GamePhase::Playing,
        };
        crate::hud::refresh(&mut state);
        Ok(state)
    }

    /// Current per-frame fall speed for newly spawned bricks
    pub fn brick_fall_speed(&self) -> f32 {
        self.level.fall_speed()
    }

    /// Change level and re-sync every live brick to the new speed
    pub fn set_level(&mut self, level: Level) {
        if level == self.level {
            return;
        }
        self.level = level;
        let speed = level.fall_speed();
        for brick in self.scene.bricks.iter_mut().filter(|b| b.is_live()) {
            brick.fall_speed = speed;
        }
        log::info!("Level {} (fall speed {:.2})", level.get(), speed);
    }

    /// Add a falling brick at `pos`, returning its id
    pub fn add_brick(&mut self, kind: BrickKind, pos: Vec2) -> u32 {
        let id = self.spawner.next_id();
        let body = Body::new(
            pos,
            Vec2::splat(BRICK_SIZE),
            self.scene.brick_meshes.get(kind),
            kind.color(),
        );
        self.scene.bricks.push(Brick {
            id,
            kind,
            body,
            fall_speed: self.brick_fall_speed(),
            status: BrickStatus::Falling,
        });
        id
    }

    /// Take a life; halts the game at zero
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            log::info!("Game over with score {}", self.score);
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingCanvas;

    fn new_state() -> GameState {
        let mut canvas = RecordingCanvas::default();
        GameState::new(&mut canvas, &Settings::default(), 0.0).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = new_state();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 5);
        assert_eq!(state.level.get(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.scene.bricks.is_empty());
        assert!(state.scene.laser.is_idle());
    }

    #[test]
    fn test_level_bounds() {
        let level = Level::default();
        assert_eq!(level.lowered().get(), 1);
        assert_eq!(level.raised().raised().raised().get(), 3);
        assert!((Level::new(2).fall_speed() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_set_level_resyncs_live_bricks_only() {
        let mut state = new_state();
        let live = state.add_brick(BrickKind::Red, Vec2::new(0.0, 3.3));
        let gone = state.add_brick(BrickKind::Black, Vec2::new(1.0, 3.3));
        state.scene.bricks.iter_mut().find(|b| b.id == gone).unwrap().retire();

        state.set_level(Level::new(3));
        assert!((state.scene.brick(live).unwrap().fall_speed - 0.03).abs() < 1e-6);
        assert!((state.scene.brick(gone).unwrap().fall_speed - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_lose_life_ends_game_at_zero() {
        let mut state = new_state();
        for _ in 0..4 {
            state.lose_life();
        }
        assert_eq!(state.phase, GamePhase::Playing);
        state.lose_life();
        assert_eq!(state.lives, 0);
        assert!(state.is_over());
        state.lose_life();
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_basket_clamp_inverted_range() {
        let mut state = new_state();
        let basket = &mut state.scene.baskets.red;
        basket.body.pos.x = 5.0;
        basket.clamp_x(0.5);
        assert_eq!(basket.body.pos.x, 3.0);
        basket.clamp_x(8.0);
        assert_eq!(basket.body.pos.x, -3.5);
    }

    #[test]
    fn test_cannon_clamp() {
        let mut state = new_state();
        let cannon = &mut state.scene.cannon;
        cannon.set_y(10.0);
        assert_eq!(cannon.y(), CANNON_MAX_Y);
        assert_eq!(cannon.base.pos.y, CANNON_MAX_Y);
        cannon.nudge_y(-10.0);
        assert_eq!(cannon.y(), CANNON_MIN_Y);
    }

    #[test]
    fn test_obstacle_turns_around() {
        let mut obstacle = Obstacle {
            body: Body::new(Vec2::new(-2.1, 3.06), Vec2::new(0.2, 1.5), MeshId(0), palette::YELLOW),
            direction: ObstacleDirection::Up,
        };
        obstacle.step();
        assert_eq!(obstacle.direction, ObstacleDirection::Down);
        assert_eq!(obstacle.status(), 1);
        obstacle.step();
        assert!(obstacle.body.pos.y < 3.1);
    }

    #[test]
    fn test_obstacle_turns_around_at_bottom() {
        let mut obstacle = Obstacle {
            body: Body::new(Vec2::new(-2.1, -3.08), Vec2::new(0.2, 1.5), MeshId(0), palette::YELLOW),
            direction: ObstacleDirection::Down,
        };
        obstacle.step();
        assert_eq!(obstacle.direction, ObstacleDirection::Up);
        assert_eq!(obstacle.status(), 0);
        obstacle.step();
        assert!((obstacle.body.pos.y - (-3.08)).abs() < 1e-5);
        assert_eq!(obstacle.direction, ObstacleDirection::Up);
    }

    #[test]
    fn test_clock_frame_scale() {
        let mut clock = Clock::starting_at(1.0);
        clock.tick(1.0 + 1.0 / 60.0);
        assert!((clock.frame_scale() - 1.0).abs() < 1e-4);
    }
}
