/// Water shader program
///
/// The vertex shader reconstructs the two partner vertices of each
/// triangle from the indicator offsets, displaces all three with the wave
/// function, and derives the triangle normal from the displaced
/// positions. Every vertex of a triangle computes the same normal, so the
/// shading is flat without any flat varyings. The fragment shader samples
/// the reflection and refraction images in screen space, mixes them with
/// a fresnel term, and softens the shoreline using the sampled scene
/// depth.
use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3};
use lowpoly_water_engine::lowpoly::render::{
    ShaderProgram, WaterShading, DEPTH_TEX_UNIT, REFLECT_TEX_UNIT, REFRACT_TEX_UNIT,
};
use lowpoly_water_engine::lowpoly::scene::Light;
use lowpoly_water_engine::lowpoly::Result;

use crate::shader_program::GlProgram;

const VERTEX_SOURCE: &str = r#"#version 330 core

layout(location = 0) in vec2 in_position;
layout(location = 1) in vec4 in_indicators;

out vec4 pass_clipSpaceGrid;
out vec4 pass_clipSpaceReal;
out vec3 pass_normal;
out vec3 pass_toCameraVector;
out vec3 pass_diffuse;
out vec3 pass_specular;

uniform mat4 projectionViewMatrix;
uniform float height;
uniform vec3 cameraPos;
uniform float waveTime;
uniform vec3 lightDirection;
uniform vec3 lightColor;
uniform vec2 lightBias;

const float PI = 3.1415926535;
const float waveLength = 4.0;
const float waveAmplitude = 0.2;
const float specularReflectivity = 0.4;
const float shineDamper = 20.0;

float generateOffset(float x, float z, float val1, float val2) {
    float radiansX = ((mod(x + z * x * val1, waveLength) / waveLength)
            + waveTime * mod(x * 0.8 + z, 1.5)) * 2.0 * PI;
    float radiansZ = ((mod(val2 * (z * x + x * z), waveLength) / waveLength)
            + waveTime * 2.0 * mod(x, 2.0)) * 2.0 * PI;
    return waveAmplitude * 0.5 * (sin(radiansZ) + cos(radiansX));
}

vec3 applyDistortion(vec3 vertex) {
    float xDistortion = generateOffset(vertex.x, vertex.z, 0.2, 0.1);
    float yDistortion = generateOffset(vertex.x, vertex.z, 0.1, 0.3);
    float zDistortion = generateOffset(vertex.x, vertex.z, 0.15, 0.2);
    return vertex + vec3(xDistortion, yDistortion, zDistortion);
}

vec3 calcNormal(vec3 vertex0, vec3 vertex1, vec3 vertex2) {
    vec3 tangent = vertex1 - vertex0;
    vec3 bitangent = vertex2 - vertex0;
    return normalize(cross(tangent, bitangent));
}

vec3 calculateDiffuse(vec3 normal) {
    float brightness = max(dot(-lightDirection, normal), 0.0);
    return lightColor * (lightBias.x + brightness * lightBias.y);
}

vec3 calculateSpecular(vec3 toCamVector, vec3 normal) {
    vec3 reflectedLight = reflect(lightDirection, normal);
    float specularFactor = max(dot(reflectedLight, toCamVector), 0.0);
    specularFactor = pow(specularFactor, shineDamper);
    return specularFactor * specularReflectivity * lightColor;
}

void main() {
    vec3 currentVertex = vec3(in_position.x, height, in_position.y);
    vec3 vertex1 = currentVertex + vec3(in_indicators.x, 0.0, in_indicators.y);
    vec3 vertex2 = currentVertex + vec3(in_indicators.z, 0.0, in_indicators.w);

    pass_clipSpaceGrid = projectionViewMatrix * vec4(currentVertex, 1.0);

    currentVertex = applyDistortion(currentVertex);
    vertex1 = applyDistortion(vertex1);
    vertex2 = applyDistortion(vertex2);

    pass_normal = calcNormal(currentVertex, vertex1, vertex2);

    pass_clipSpaceReal = projectionViewMatrix * vec4(currentVertex, 1.0);
    gl_Position = pass_clipSpaceReal;

    pass_toCameraVector = normalize(cameraPos - currentVertex);
    pass_diffuse = calculateDiffuse(pass_normal);
    pass_specular = calculateSpecular(pass_toCameraVector, pass_normal);
}
"#;

const FRAGMENT_SOURCE: &str = r#"#version 330 core

in vec4 pass_clipSpaceGrid;
in vec4 pass_clipSpaceReal;
in vec3 pass_normal;
in vec3 pass_toCameraVector;
in vec3 pass_diffuse;
in vec3 pass_specular;

out vec4 out_color;

uniform sampler2D reflectionTexture;
uniform sampler2D refractionTexture;
uniform sampler2D depthTexture;
uniform vec2 nearFarPlanes;

const vec3 waterColor = vec3(0.604, 0.867, 0.851);
const float fresnelReflectivity = 0.5;
const float minBlueness = 0.4;
const float maxBlueness = 0.8;
const float murkyDepth = 14.0;
const float edgeSoftness = 1.0;

vec2 clipSpaceToTexCoords(vec4 clipSpace) {
    vec2 ndc = clipSpace.xy / clipSpace.w;
    return clamp(ndc / 2.0 + 0.5, 0.002, 0.998);
}

float toLinearDepth(float zDepth) {
    float near = nearFarPlanes.x;
    float far = nearFarPlanes.y;
    return 2.0 * near * far / (far + near - (2.0 * zDepth - 1.0) * (far - near));
}

float calculateWaterDepth(vec2 texCoords) {
    float floorDistance = toLinearDepth(texture(depthTexture, texCoords).r);
    float fragDistance = toLinearDepth(gl_FragCoord.z);
    return floorDistance - fragDistance;
}

float calculateFresnel() {
    vec3 viewVector = normalize(pass_toCameraVector);
    vec3 normal = normalize(pass_normal);
    float refractiveFactor = max(dot(viewVector, normal), 0.0);
    refractiveFactor = pow(refractiveFactor, fresnelReflectivity);
    return clamp(refractiveFactor, 0.0, 1.0);
}

vec3 applyMurkiness(vec3 refractColor, float waterDepth) {
    float murkyFactor = clamp(waterDepth / murkyDepth, 0.0, 1.0);
    float murkiness = minBlueness + murkyFactor * (maxBlueness - minBlueness);
    return mix(refractColor, waterColor, murkiness);
}

void main() {
    vec2 texCoordsGrid = clipSpaceToTexCoords(pass_clipSpaceGrid);
    vec2 texCoordsReal = clipSpaceToTexCoords(pass_clipSpaceReal);

    vec2 refractionTexCoords = texCoordsGrid;
    vec2 reflectionTexCoords = vec2(texCoordsGrid.x, 1.0 - texCoordsGrid.y);
    float waterDepth = calculateWaterDepth(texCoordsReal);

    vec3 refractColor = texture(refractionTexture, refractionTexCoords).rgb;
    vec3 reflectColor = texture(reflectionTexture, reflectionTexCoords).rgb;
    refractColor = applyMurkiness(refractColor, waterDepth);
    reflectColor = mix(reflectColor, waterColor, minBlueness);

    vec3 finalColor = mix(reflectColor, refractColor, calculateFresnel());
    finalColor = finalColor * pass_diffuse + pass_specular;

    out_color = vec4(finalColor, clamp(waterDepth / edgeSoftness, 0.0, 1.0));
}
"#;

/// Compiled water program with its uniform locations
pub struct GlWaterShader {
    program: GlProgram,
    projection_view: Option<glow::UniformLocation>,
    camera_pos: Option<glow::UniformLocation>,
    near_far_planes: Option<glow::UniformLocation>,
    height: Option<glow::UniformLocation>,
    wave_time: Option<glow::UniformLocation>,
    light_direction: Option<glow::UniformLocation>,
    light_color: Option<glow::UniformLocation>,
    light_bias: Option<glow::UniformLocation>,
}

impl GlWaterShader {
    /// Compile the program and point the three samplers at their fixed
    /// texture units.
    pub fn new(gl: Rc<glow::Context>) -> Result<Self> {
        let program = GlProgram::new(gl, VERTEX_SOURCE, FRAGMENT_SOURCE)?;
        let shader = Self {
            projection_view: program.uniform_location("projectionViewMatrix"),
            camera_pos: program.uniform_location("cameraPos"),
            near_far_planes: program.uniform_location("nearFarPlanes"),
            height: program.uniform_location("height"),
            wave_time: program.uniform_location("waveTime"),
            light_direction: program.uniform_location("lightDirection"),
            light_color: program.uniform_location("lightColor"),
            light_bias: program.uniform_location("lightBias"),
            program,
        };
        shader.link_texture_units();
        Ok(shader)
    }

    fn link_texture_units(&self) {
        let reflection = self.program.uniform_location("reflectionTexture");
        let refraction = self.program.uniform_location("refractionTexture");
        let depth = self.program.uniform_location("depthTexture");
        self.program.start();
        self.program
            .load_i32(reflection.as_ref(), REFLECT_TEX_UNIT as i32);
        self.program
            .load_i32(refraction.as_ref(), REFRACT_TEX_UNIT as i32);
        self.program.load_i32(depth.as_ref(), DEPTH_TEX_UNIT as i32);
        self.program.stop();
    }
}

impl ShaderProgram for GlWaterShader {
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

impl WaterShading for GlWaterShader {
    fn load_camera(&mut self, projection_view: Mat4, position: Vec3, near_far: Vec2) {
        self.program
            .load_mat4(self.projection_view.as_ref(), projection_view);
        self.program.load_vec3(self.camera_pos.as_ref(), position);
        self.program
            .load_vec2(self.near_far_planes.as_ref(), near_far);
    }

    fn load_light(&mut self, light: &Light) {
        self.program
            .load_vec3(self.light_direction.as_ref(), light.direction());
        self.program
            .load_vec3(self.light_color.as_ref(), light.color());
        self.program
            .load_vec2(self.light_bias.as_ref(), light.bias());
    }

    fn load_height(&mut self, height: f32) {
        self.program.load_f32(self.height.as_ref(), height);
    }

    fn load_wave_time(&mut self, time: f32) {
        self.program.load_f32(self.wave_time.as_ref(), time);
    }
}
