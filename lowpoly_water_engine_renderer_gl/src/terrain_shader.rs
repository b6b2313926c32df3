/// Terrain shader program
///
/// Lighting is computed per vertex. The terrain mesh gives every triangle
/// its own three vertices carrying the face normal, so the interpolated
/// result is constant across each triangle and the shading stays flat.
use std::rc::Rc;

use glam::{Mat4, Vec4};
use lowpoly_water_engine::lowpoly::render::{ShaderProgram, TerrainShading};
use lowpoly_water_engine::lowpoly::scene::Light;
use lowpoly_water_engine::lowpoly::Result;

use crate::shader_program::GlProgram;

const VERTEX_SOURCE: &str = r#"#version 330 core

layout(location = 0) in vec3 in_position;
layout(location = 1) in vec4 in_normal;
layout(location = 2) in vec4 in_color;

out vec4 pass_color;

uniform mat4 projectionViewMatrix;
uniform vec4 plane;
uniform vec3 lightDirection;
uniform vec3 lightColor;
uniform vec2 lightBias;

vec3 calculateLighting(vec3 normal) {
    float brightness = max(dot(-lightDirection, normal), 0.0);
    return lightColor * (lightBias.x + brightness * lightBias.y);
}

void main() {
    gl_ClipDistance[0] = dot(vec4(in_position, 1.0), plane);
    gl_Position = projectionViewMatrix * vec4(in_position, 1.0);
    vec3 lighting = calculateLighting(normalize(in_normal.xyz));
    pass_color = vec4(in_color.rgb * lighting, in_color.a);
}
"#;

const FRAGMENT_SOURCE: &str = r#"#version 330 core

in vec4 pass_color;

out vec4 out_color;

void main() {
    out_color = pass_color;
}
"#;

/// Compiled terrain program with its uniform locations
pub struct GlTerrainShader {
    program: GlProgram,
    projection_view: Option<glow::UniformLocation>,
    plane: Option<glow::UniformLocation>,
    light_direction: Option<glow::UniformLocation>,
    light_color: Option<glow::UniformLocation>,
    light_bias: Option<glow::UniformLocation>,
}

impl GlTerrainShader {
    pub fn new(gl: Rc<glow::Context>) -> Result<Self> {
        let program = GlProgram::new(gl, VERTEX_SOURCE, FRAGMENT_SOURCE)?;
        let projection_view = program.uniform_location("projectionViewMatrix");
        let plane = program.uniform_location("plane");
        let light_direction = program.uniform_location("lightDirection");
        let light_color = program.uniform_location("lightColor");
        let light_bias = program.uniform_location("lightBias");
        Ok(Self {
            program,
            projection_view,
            plane,
            light_direction,
            light_color,
            light_bias,
        })
    }
}

impl ShaderProgram for GlTerrainShader {
    fn start(&mut self) {
        self.program.start();
    }

    fn stop(&mut self) {
        self.program.stop();
    }

    fn cleanup(&mut self) {
        self.program.cleanup();
    }
}

impl TerrainShading for GlTerrainShader {
    fn load_clip_plane(&mut self, plane: Vec4) {
        self.program.load_vec4(self.plane.as_ref(), plane);
    }

    fn load_light(&mut self, light: &Light) {
        self.program
            .load_vec3(self.light_direction.as_ref(), light.direction());
        self.program
            .load_vec3(self.light_color.as_ref(), light.color());
        self.program
            .load_vec2(self.light_bias.as_ref(), light.bias());
    }

    fn load_projection_view(&mut self, matrix: Mat4) {
        self.program.load_mat4(self.projection_view.as_ref(), matrix);
    }
}
