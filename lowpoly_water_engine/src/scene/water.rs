/// Water mesh generation and the water tile
///
/// The water is a flat grid where every triangle owns its three vertices,
/// so nothing is interpolated across triangles and the shading stays flat.
/// Each vertex stores, besides its own x,z grid position, the offsets to
/// the other two vertices of its triangle. The vertex shader uses those
/// offsets to reach the partner vertices and compute a per-triangle normal
/// after the waves have displaced everything.

use glam::Vec2;

use crate::device::context::{GraphicsContext, MeshHandle, VertexLayout};
use crate::engine_debug;
use crate::error::Result;
use crate::scene::vertex_data::{self, WaterVertex};

// 2 triangles per grid square, 3 unshared vertices each
const VERTICES_PER_SQUARE: u32 = 6;

/// The water surface: an uploaded grid mesh plus its world height
pub struct WaterTile {
    mesh: MeshHandle,
    vertex_count: u32,
    height: f32,
}

impl WaterTile {
    /// Generate the grid mesh and upload it.
    ///
    /// # Arguments
    ///
    /// * `grid_count` - grid squares along each edge; one grid unit is one
    ///   world unit
    /// * `height` - world Y the water is rendered at
    pub fn generate(
        ctx: &mut dyn GraphicsContext,
        grid_count: u32,
        height: f32,
    ) -> Result<WaterTile> {
        let vertices = generate_vertices(grid_count);
        let vertex_count = vertices.len() as u32;
        let mesh = ctx.create_mesh(
            vertex_data::as_bytes(&vertices),
            &VertexLayout::water(),
            None,
        )?;
        engine_debug!(
            "lowpoly::WaterTile",
            "Generated water mesh: {}x{} grid, {} vertices",
            grid_count,
            grid_count,
            vertex_count
        );
        Ok(WaterTile {
            mesh,
            vertex_count,
            height,
        })
    }

    /// The uploaded mesh
    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    /// Number of vertices to draw (no indices)
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// World Y the water is rendered at
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Delete the mesh. Called once by the render engine on shutdown.
    pub fn delete(self, ctx: &mut dyn GraphicsContext) -> Result<()> {
        ctx.delete_mesh(self.mesh)
    }
}

/// Generate the vertex data for a water grid of `grid_count` squares per
/// edge. Pure; the result is uploaded separately.
pub fn generate_vertices(grid_count: u32) -> Vec<WaterVertex> {
    let total = (grid_count * grid_count * VERTICES_PER_SQUARE) as usize;
    let mut vertices = Vec::with_capacity(total);
    for row in 0..grid_count {
        for col in 0..grid_count {
            let corners = corner_positions(col, row);
            store_triangle(&corners, &mut vertices, true);
            store_triangle(&corners, &mut vertices, false);
        }
    }
    vertices
}

/// Corner positions of one grid square:
/// 0 = top left, 1 = bottom left, 2 = top right, 3 = bottom right
fn corner_positions(col: u32, row: u32) -> [Vec2; 4] {
    let (x, z) = (col as f32, row as f32);
    [
        Vec2::new(x, z),
        Vec2::new(x, z + 1.0),
        Vec2::new(x + 1.0, z),
        Vec2::new(x + 1.0, z + 1.0),
    ]
}

/// Store the three vertices of the left or right triangle of a square.
///
/// Each vertex carries the offsets to the other two vertices of its
/// triangle, in winding order starting from itself.
fn store_triangle(corners: &[Vec2; 4], out: &mut Vec<WaterVertex>, left: bool) {
    let index0 = if left { 0 } else { 2 };
    let index1 = 1;
    let index2 = if left { 2 } else { 3 };
    out.push(make_vertex(corners, index0, index1, index2));
    out.push(make_vertex(corners, index1, index2, index0));
    out.push(make_vertex(corners, index2, index0, index1));
}

fn make_vertex(corners: &[Vec2; 4], current: usize, other1: usize, other2: usize) -> WaterVertex {
    let position = corners[current];
    let offset1 = corners[other1] - position;
    let offset2 = corners[other2] - position;
    WaterVertex {
        position: [position.x, position.y],
        // Grid squares are unit-sized, so the offsets are exactly -1, 0 or 1
        indicators: [
            offset1.x as i8,
            offset1.y as i8,
            offset2.x as i8,
            offset2.y as i8,
        ],
    }
}

#[cfg(test)]
#[path = "water_tests.rs"]
mod tests;
