/// RenderEngine - the three-pass pipeline for one frame
///
/// A frame is rendered in three passes. The reflection pass draws the
/// scene through the mirrored camera into the reflection FBO, clipped so
/// only geometry above the water survives. The refraction pass draws the
/// scene from the normal camera into the half-resolution refraction FBO,
/// clipped to geometry below the water. The main pass then draws terrain
/// and water to the screen, with the water shader sampling the two color
/// images and the refraction depth image.

use glam::Vec4;

use crate::camera::camera::Camera;
use crate::device::attachment::Attachment;
use crate::device::context::{GraphicsContext, PixelFormat, ProvokingVertex};
use crate::device::framebuffer::{Fbo, FboConfig};
use crate::error::Result;
use crate::rendering::shader::{TerrainShading, WaterShading};
use crate::rendering::terrain_renderer::TerrainRenderer;
use crate::rendering::water_renderer::WaterRenderer;
use crate::scene::light::Light;
use crate::scene::terrain::Terrain;
use crate::scene::water::WaterTile;
use crate::{engine_debug, engine_info};

/// Pushes the reflection clip plane slightly below the surface so the
/// clipped edge is hidden under the water
const REFLECT_OFFSET: f32 = 0.1;
/// Pushes the refraction clip plane above the surface so the refraction
/// image extends past the shoreline
const REFRACT_OFFSET: f32 = 1.0;

/// Clear color of every pass
const CLEAR_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

/// Orchestrates the reflection, refraction and main passes of a frame
pub struct RenderEngine {
    terrain_renderer: TerrainRenderer,
    water_renderer: WaterRenderer,
    reflection_fbo: Fbo,
    refraction_fbo: Fbo,
}

impl RenderEngine {
    /// Create the engine and the two pass framebuffers.
    ///
    /// The refraction FBO is created at half the surface resolution for
    /// performance, and with a texture depth attachment so the water
    /// shader can sample scene depth. The reflection FBO is full
    /// resolution with a render buffer depth attachment, which is never
    /// sampled.
    pub fn new(
        ctx: &mut dyn GraphicsContext,
        terrain_shader: Box<dyn TerrainShading>,
        water_shader: Box<dyn WaterShading>,
    ) -> Result<RenderEngine> {
        let (width, height) = ctx.surface_size();
        let refraction_fbo = Self::create_pass_fbo(ctx, width / 2, height / 2, true)?;
        let reflection_fbo = Self::create_pass_fbo(ctx, width, height, false)?;
        engine_info!(
            "lowpoly::RenderEngine",
            "Render engine ready: reflection {}x{}, refraction {}x{}",
            reflection_fbo.width(),
            reflection_fbo.height(),
            refraction_fbo.width(),
            refraction_fbo.height()
        );
        Ok(RenderEngine {
            terrain_renderer: TerrainRenderer::new(terrain_shader),
            water_renderer: WaterRenderer::new(water_shader),
            reflection_fbo,
            refraction_fbo,
        })
    }

    /// The reflection pass target
    pub fn reflection_fbo(&self) -> &Fbo {
        &self.reflection_fbo
    }

    /// The refraction pass target
    pub fn refraction_fbo(&self) -> &Fbo {
        &self.refraction_fbo
    }

    /// Render one frame.
    ///
    /// The clip-distance test is enabled only around the two off-screen
    /// passes; the main pass renders the whole scene unclipped.
    pub fn render(
        &mut self,
        ctx: &mut dyn GraphicsContext,
        terrain: &Terrain,
        water: &WaterTile,
        camera: &mut dyn Camera,
        light: &Light,
    ) -> Result<()> {
        ctx.set_clip_plane(true)?;
        self.reflection_pass(ctx, terrain, camera, light, water.height())?;
        self.refraction_pass(ctx, terrain, camera, light, water.height())?;
        ctx.set_clip_plane(false)?;
        self.main_pass(ctx, terrain, water, camera, light)
    }

    /// Release the framebuffers and shader programs.
    ///
    /// Consumes the engine: rendering after close (or closing twice) is a
    /// compile error.
    pub fn close(mut self, ctx: &mut dyn GraphicsContext) -> Result<()> {
        engine_debug!("lowpoly::RenderEngine", "Closing render engine");
        self.reflection_fbo.release(ctx)?;
        self.refraction_fbo.release(ctx)?;
        self.terrain_renderer.cleanup();
        self.water_renderer.cleanup();
        Ok(())
    }

    /// Clear the bound target and restore the per-pass raster defaults.
    ///
    /// The first-vertex provoking convention makes flat varyings come
    /// from the first vertex of each triangle, which is what the packed
    /// terrain normals assume.
    fn prepare(&self, ctx: &mut dyn GraphicsContext) -> Result<()> {
        ctx.clear_color_and_depth(CLEAR_COLOR)?;
        ctx.set_provoking_vertex(ProvokingVertex::First)?;
        ctx.set_culling(true)?;
        ctx.set_depth_test(true)?;
        ctx.set_multisample(true)
    }

    /// Render the mirrored scene into the reflection FBO, keeping only
    /// geometry above the water (offset slightly below it).
    ///
    /// The camera's previous reflection state is restored afterwards even
    /// if it was already reflected.
    fn reflection_pass(
        &mut self,
        ctx: &mut dyn GraphicsContext,
        terrain: &Terrain,
        camera: &mut dyn Camera,
        light: &Light,
        water_height: f32,
    ) -> Result<()> {
        self.reflection_fbo.bind_for_render(ctx, 0)?;
        let was_reflected = camera.is_reflected();
        camera.set_reflected(true);
        self.prepare(ctx)?;
        let plane = Vec4::new(0.0, 1.0, 0.0, -water_height + REFLECT_OFFSET);
        let result = self.terrain_renderer.render(ctx, terrain, camera, light, plane);
        camera.set_reflected(was_reflected);
        result?;
        self.reflection_fbo.unbind_after_render(ctx)
    }

    /// Render the scene into the refraction FBO, keeping only geometry
    /// below the water (offset above it so the image reaches past the
    /// shoreline).
    fn refraction_pass(
        &mut self,
        ctx: &mut dyn GraphicsContext,
        terrain: &Terrain,
        camera: &dyn Camera,
        light: &Light,
        water_height: f32,
    ) -> Result<()> {
        self.refraction_fbo.bind_for_render(ctx, 0)?;
        self.prepare(ctx)?;
        let plane = Vec4::new(0.0, -1.0, 0.0, water_height + REFRACT_OFFSET);
        self.terrain_renderer
            .render(ctx, terrain, camera, light, plane)?;
        self.refraction_fbo.unbind_after_render(ctx)
    }

    /// Render terrain and water to the screen, unclipped
    fn main_pass(
        &mut self,
        ctx: &mut dyn GraphicsContext,
        terrain: &Terrain,
        water: &WaterTile,
        camera: &dyn Camera,
        light: &Light,
    ) -> Result<()> {
        self.prepare(ctx)?;
        self.terrain_renderer
            .render(ctx, terrain, camera, light, Vec4::ZERO)?;
        self.water_renderer.render(
            ctx,
            water,
            camera,
            light,
            self.reflection_fbo.color_buffer(0)?,
            self.refraction_fbo.color_buffer(0)?,
            self.refraction_fbo.depth_buffer()?,
        )
    }

    /// Build the target for one off-screen pass: a texture color
    /// attachment at slot 0 plus a depth attachment, texture-backed when
    /// the pass's depth is sampled later.
    fn create_pass_fbo(
        ctx: &mut dyn GraphicsContext,
        width: u32,
        height: u32,
        texture_depth: bool,
    ) -> Result<Fbo> {
        let depth = if texture_depth {
            Attachment::texture(PixelFormat::DEPTH_COMPONENT24)
        } else {
            Attachment::render_buffer(PixelFormat::DEPTH_COMPONENT24)
        };
        FboConfig::new()
            .add_color_attachment(0, Attachment::texture(PixelFormat::RGBA8))
            .add_depth_attachment(depth)
            .build(ctx, width, height, 0)
    }
}

#[cfg(test)]
#[path = "render_engine_tests.rs"]
mod tests;
