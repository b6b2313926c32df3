/// Terrain mesh handle
///
/// The engine does not generate terrain; callers build the packed vertex
/// data however they like (heightmap, noise, loaded file) and upload it
/// here. Flat shading comes from the provoking-vertex convention, so the
/// terrain can share vertices between triangles and use an index buffer.

use crate::device::context::{GraphicsContext, MeshHandle, VertexLayout};
use crate::engine_debug;
use crate::error::Result;
use crate::scene::vertex_data::{self, TerrainVertex};

/// An uploaded terrain mesh
pub struct Terrain {
    mesh: MeshHandle,
    vertex_count: u32,
    uses_indices: bool,
}

impl Terrain {
    /// Upload packed terrain vertices, optionally with an index buffer.
    ///
    /// When indices are given the draw count is the index count,
    /// otherwise the vertex count.
    pub fn new(
        ctx: &mut dyn GraphicsContext,
        vertices: &[TerrainVertex],
        indices: Option<&[u32]>,
    ) -> Result<Terrain> {
        let mesh = ctx.create_mesh(
            vertex_data::as_bytes(vertices),
            &VertexLayout::terrain(),
            indices,
        )?;
        let uses_indices = indices.is_some();
        let vertex_count = match indices {
            Some(indices) => indices.len() as u32,
            None => vertices.len() as u32,
        };
        engine_debug!(
            "lowpoly::Terrain",
            "Uploaded terrain mesh: {} vertices, indexed: {}",
            vertex_count,
            uses_indices
        );
        Ok(Terrain {
            mesh,
            vertex_count,
            uses_indices,
        })
    }

    /// The uploaded mesh
    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    /// Number of vertices (or indices, when indexed) to draw
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Whether the mesh is drawn through an index buffer
    pub fn uses_indices(&self) -> bool {
        self.uses_indices
    }

    /// Delete the mesh. Called once by the render engine on shutdown.
    pub fn delete(self, ctx: &mut dyn GraphicsContext) -> Result<()> {
        ctx.delete_mesh(self.mesh)
    }
}

#[cfg(test)]
#[path = "terrain_tests.rs"]
mod tests;
