/// GlProgram - compile/link wrapper for one shader program
///
/// Compiles a vertex/fragment pair, links it, and exposes typed uniform
/// loads. Uniform locations are looked up once at construction by the
/// shader wrappers; a name the linker optimized away simply loads nowhere.
use std::rc::Rc;

use glow::HasContext;

use glam::{Mat4, Vec2, Vec3, Vec4};
use lowpoly_water_engine::engine_warn;
use lowpoly_water_engine::lowpoly::{Error, Result};

pub struct GlProgram {
    gl: Rc<glow::Context>,
    program: glow::Program,
}

impl GlProgram {
    /// Compile and link a program from GLSL source.
    ///
    /// # Errors
    ///
    /// Returns a backend error carrying the compile or link log.
    pub fn new(gl: Rc<glow::Context>, vertex_source: &str, fragment_source: &str) -> Result<Self> {
        let vertex = compile_shader(&gl, glow::VERTEX_SHADER, vertex_source)?;
        let fragment = match compile_shader(&gl, glow::FRAGMENT_SHADER, fragment_source) {
            Ok(fragment) => fragment,
            Err(error) => {
                unsafe { gl.delete_shader(vertex) };
                return Err(error);
            }
        };

        let program = unsafe { gl.create_program() }.map_err(Error::BackendError)?;
        unsafe {
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);
            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(Error::BackendError(format!("program link failed: {}", log)));
            }
        }
        Ok(Self { gl, program })
    }

    /// Location of a uniform, warning if the name is unknown
    pub fn uniform_location(&self, name: &str) -> Option<glow::UniformLocation> {
        let location = unsafe { self.gl.get_uniform_location(self.program, name) };
        if location.is_none() {
            engine_warn!("lowpoly::gl::Program", "uniform '{}' not found", name);
        }
        location
    }

    pub fn start(&self) {
        unsafe { self.gl.use_program(Some(self.program)) };
    }

    pub fn stop(&self) {
        unsafe { self.gl.use_program(None) };
    }

    pub fn cleanup(&self) {
        unsafe { self.gl.delete_program(self.program) };
    }

    // ===== UNIFORM LOADS =====

    pub fn load_mat4(&self, location: Option<&glow::UniformLocation>, value: Mat4) {
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(location, false, &value.to_cols_array());
        }
    }

    pub fn load_vec2(&self, location: Option<&glow::UniformLocation>, value: Vec2) {
        unsafe { self.gl.uniform_2_f32(location, value.x, value.y) };
    }

    pub fn load_vec3(&self, location: Option<&glow::UniformLocation>, value: Vec3) {
        unsafe { self.gl.uniform_3_f32(location, value.x, value.y, value.z) };
    }

    pub fn load_vec4(&self, location: Option<&glow::UniformLocation>, value: Vec4) {
        unsafe {
            self.gl
                .uniform_4_f32(location, value.x, value.y, value.z, value.w);
        }
    }

    pub fn load_f32(&self, location: Option<&glow::UniformLocation>, value: f32) {
        unsafe { self.gl.uniform_1_f32(location, value) };
    }

    pub fn load_i32(&self, location: Option<&glow::UniformLocation>, value: i32) {
        unsafe { self.gl.uniform_1_i32(location, value) };
    }
}

fn compile_shader(gl: &glow::Context, stage: u32, source: &str) -> Result<glow::Shader> {
    let shader = unsafe { gl.create_shader(stage) }.map_err(Error::BackendError)?;
    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(Error::BackendError(format!(
                "shader compile failed: {}",
                log
            )));
        }
    }
    Ok(shader)
}
