//! Drawing seam between the game and the GPU
//!
//! The game only ever creates colored triangle-list meshes and draws them
//! with a full MVP matrix. `RecordingCanvas` stands in for the GPU in tests.

use glam::Mat4;

use super::vertex::Vertex;
use crate::sim::body::MeshId;

pub trait Canvas {
    /// Upload a triangle list and return its handle
    fn create_mesh(&mut self, vertices: &[Vertex]) -> MeshId;

    /// Queue one draw of `mesh` with the given model-view-projection
    fn draw(&mut self, mesh: MeshId, mvp: Mat4);
}

/// In-memory canvas that remembers meshes and draw calls
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    pub meshes: Vec<Vec<Vertex>>,
    pub draws: Vec<(MeshId, Mat4)>,
}

impl RecordingCanvas {
    pub fn mesh(&self, id: MeshId) -> Option<&[Vertex]> {
        self.meshes.get(id.0 as usize).map(Vec::as_slice)
    }

    /// Forget recorded draws (meshes are kept)
    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn create_mesh(&mut self, vertices: &[Vertex]) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(vertices.to_vec());
        id
    }

    fn draw(&mut self, mesh: MeshId, mvp: Mat4) {
        self.draws.push((mesh, mvp));
    }
}
