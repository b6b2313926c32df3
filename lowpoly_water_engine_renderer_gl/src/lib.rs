/*!
# Lowpoly Water Engine - OpenGL Renderer Backend

OpenGL implementation of the lowpoly water engine traits, built on the
`glow` bindings.

The backend provides [`GlContext`], a [`GraphicsContext`] over a loaded
OpenGL 3.3 core context, plus the compiled terrain and water shader
programs implementing the engine's shading traits. The GL context object
must stay on the thread that made the native context current.

[`GraphicsContext`]: lowpoly_water_engine::lowpoly::device::GraphicsContext
*/

// OpenGL implementation modules
mod gl_context;
mod shader_program;
mod terrain_shader;
mod water_shader;

pub use gl_context::GlContext;
pub use shader_program::GlProgram;
pub use terrain_shader::GlTerrainShader;
pub use water_shader::GlWaterShader;
