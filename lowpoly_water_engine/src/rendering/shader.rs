/// Shader contracts between the renderers and the backends
///
/// The core crate never touches shader source or uniform locations; it
/// drives these traits and the backend crate implements them over its
/// compiled programs. Uniform loads are plain method calls so the
/// renderers read like the uniform list of the shader they drive.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::scene::light::Light;

/// Texture unit the water shader samples the reflection color from
pub const REFLECT_TEX_UNIT: u32 = 0;
/// Texture unit the water shader samples the refraction color from
pub const REFRACT_TEX_UNIT: u32 = 1;
/// Texture unit the water shader samples the refraction depth from
pub const DEPTH_TEX_UNIT: u32 = 2;

/// Common lifecycle of a shader program
pub trait ShaderProgram {
    /// Make this program current
    fn start(&mut self);

    /// Stop using this program
    fn stop(&mut self);

    /// Delete the program. Called once when the render engine closes.
    fn cleanup(&mut self);
}

/// Uniform interface of the terrain shader
pub trait TerrainShading: ShaderProgram {
    /// Clip plane equation; (0,0,0,0) disables clipping in the shader
    fn load_clip_plane(&mut self, plane: Vec4);

    /// Directional light parameters
    fn load_light(&mut self, light: &Light);

    /// Combined projection * view matrix
    fn load_projection_view(&mut self, matrix: Mat4);
}

/// Uniform interface of the water shader
pub trait WaterShading: ShaderProgram {
    /// Camera matrices, position and depth range. The near/far planes are
    /// needed to linearize the sampled depth texture.
    fn load_camera(&mut self, projection_view: Mat4, position: Vec3, near_far: Vec2);

    /// Directional light parameters
    fn load_light(&mut self, light: &Light);

    /// World Y of the water plane
    fn load_height(&mut self, height: f32);

    /// Ever-increasing wave time driving the distortion animation
    fn load_wave_time(&mut self, time: f32);
}
