/// Water draw logic
///
/// Most of the effect lives in the water shader; this renderer loads the
/// uniforms, binds the three pass textures, and draws the grid with alpha
/// blending enabled for the soft shoreline edges.

use glam::Vec2;

use crate::camera::camera::Camera;
use crate::device::context::{GraphicsContext, ResourceId};
use crate::error::Result;
use crate::rendering::shader::{
    WaterShading, DEPTH_TEX_UNIT, REFLECT_TEX_UNIT, REFRACT_TEX_UNIT,
};
use crate::scene::light::Light;
use crate::scene::water::WaterTile;

/// Wave time advance per rendered frame
const WAVE_SPEED: f32 = 0.002;

/// Renders the water tile through a [`WaterShading`] program
pub struct WaterRenderer {
    shader: Box<dyn WaterShading>,
    time: f32,
}

impl WaterRenderer {
    pub fn new(shader: Box<dyn WaterShading>) -> Self {
        Self { shader, time: 0.0 }
    }

    /// Current wave time, advanced once per render
    pub fn wave_time(&self) -> f32 {
        self.time
    }

    /// Draw the water using the color and depth images produced by the
    /// reflection and refraction passes.
    ///
    /// Drawn with `draw_arrays`: no vertices are shared, so indices would
    /// be pointless.
    pub fn render(
        &mut self,
        ctx: &mut dyn GraphicsContext,
        water: &WaterTile,
        camera: &dyn Camera,
        light: &Light,
        reflection_texture: ResourceId,
        refraction_texture: ResourceId,
        depth_texture: ResourceId,
    ) -> Result<()> {
        ctx.bind_mesh(water.mesh())?;
        ctx.set_alpha_blending(true)?;
        self.prepare_shader(water, camera, light);

        ctx.bind_texture_to_unit(reflection_texture, REFLECT_TEX_UNIT)?;
        ctx.bind_texture_to_unit(refraction_texture, REFRACT_TEX_UNIT)?;
        ctx.bind_texture_to_unit(depth_texture, DEPTH_TEX_UNIT)?;

        ctx.draw_arrays(water.vertex_count())?;

        ctx.unbind_mesh()?;
        self.shader.stop();
        ctx.set_alpha_blending(false)
    }

    /// Delete the shader program
    pub fn cleanup(&mut self) {
        self.shader.cleanup();
    }

    fn prepare_shader(&mut self, water: &WaterTile, camera: &dyn Camera, light: &Light) {
        self.shader.start();
        self.time += WAVE_SPEED;
        self.shader.load_wave_time(self.time);
        self.shader.load_camera(
            camera.projection_view_matrix(),
            camera.position(),
            Vec2::new(camera.near_plane(), camera.far_plane()),
        );
        self.shader.load_light(light);
        self.shader.load_height(water.height());
    }
}

#[cfg(test)]
#[path = "water_renderer_tests.rs"]
mod tests;
