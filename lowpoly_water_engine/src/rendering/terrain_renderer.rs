/// Terrain draw logic
///
/// Thin by design: bind the mesh, load the uniforms, draw. The clip plane
/// is a parameter because the same renderer serves all three passes with
/// different planes.

use glam::Vec4;

use crate::camera::camera::Camera;
use crate::device::context::GraphicsContext;
use crate::error::Result;
use crate::rendering::shader::TerrainShading;
use crate::scene::light::Light;
use crate::scene::terrain::Terrain;

/// Renders terrain meshes through a [`TerrainShading`] program
pub struct TerrainRenderer {
    shader: Box<dyn TerrainShading>,
}

impl TerrainRenderer {
    pub fn new(shader: Box<dyn TerrainShading>) -> Self {
        Self { shader }
    }

    /// Draw the terrain with the given clip plane.
    ///
    /// A plane of (0,0,0,0) keeps every vertex; the reflection and
    /// refraction passes pass planes that cut at the water surface.
    pub fn render(
        &mut self,
        ctx: &mut dyn GraphicsContext,
        terrain: &Terrain,
        camera: &dyn Camera,
        light: &Light,
        clip_plane: Vec4,
    ) -> Result<()> {
        ctx.bind_mesh(terrain.mesh())?;
        self.shader.start();
        self.shader.load_clip_plane(clip_plane);
        self.shader.load_light(light);
        self.shader.load_projection_view(camera.projection_view_matrix());

        if terrain.uses_indices() {
            ctx.draw_elements(terrain.vertex_count())?;
        } else {
            ctx.draw_arrays(terrain.vertex_count())?;
        }

        ctx.unbind_mesh()?;
        self.shader.stop();
        Ok(())
    }

    /// Delete the shader program
    pub fn cleanup(&mut self) {
        self.shader.cleanup();
    }
}

#[cfg(test)]
#[path = "terrain_renderer_tests.rs"]
mod tests;
