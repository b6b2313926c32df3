/// Rendering module - shader contracts, per-mesh renderers and the
/// three-pass render engine

// Module declarations
pub mod render_engine;
pub mod shader;
pub mod terrain_renderer;
pub mod water_renderer;

// Re-exports
pub use render_engine::RenderEngine;
pub use shader::{
    ShaderProgram, TerrainShading, WaterShading, DEPTH_TEX_UNIT, REFLECT_TEX_UNIT,
    REFRACT_TEX_UNIT,
};
pub use terrain_renderer::TerrainRenderer;
pub use water_renderer::WaterRenderer;

// Recording shader doubles shared by the renderer tests
#[cfg(test)]
pub mod test_shaders;
