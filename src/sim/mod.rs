//! Game simulation
//!
//! Everything that decides what happens in a frame. No windowing or GPU
//! types; meshes are opaque handles created through a `Canvas`.

pub mod body;
pub mod collision;
pub mod laser;
pub mod registry;
pub mod scene;
pub mod spawn;
pub mod state;
pub mod tick;

pub use body::{Body, MeshId, Sprite, SpriteKind};
pub use collision::{overlaps, resolve};
pub use laser::{Laser, LaserState};
pub use registry::{Registry, RegistryError};
pub use spawn::{Spawner, maybe_spawn};
pub use state::{
    Basket, BasketColor, BasketStatus, Brick, BrickKind, BrickStatus, Cannon, Clock, GameEvent,
    GamePhase, GameState, Level, Mirror, Obstacle, ObstacleDirection, Scene,
};
pub use tick::{advance, frame, simulate};
