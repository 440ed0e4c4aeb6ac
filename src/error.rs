//! Startup failures
//!
//! Everything that can go wrong before the first frame. Once the loop is
//! running the game has no recoverable errors of its own.

use std::path::PathBuf;

use thiserror::Error;

use crate::sim::registry::RegistryError;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("cannot read shader {}: {source}", path.display())]
    ShaderRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("shader {} failed to compile: {message}", path.display())]
    ShaderCompile { path: PathBuf, message: String },

    #[error("scene setup failed: {0}")]
    Scene(#[from] RegistryError),
}
