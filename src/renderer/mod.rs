//! Rendering
//!
//! The game talks to a `Canvas`; `gpu::Renderer` is the wgpu implementation
//! and `RecordingCanvas` the headless one.

pub mod canvas;
pub mod draw;
pub mod gpu;
pub mod shapes;
pub mod vertex;

pub use canvas::{Canvas, RecordingCanvas};
pub use draw::draw_scene;
pub use gpu::{Renderer, ShaderSources};
pub use vertex::Vertex;
