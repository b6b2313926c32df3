/// Terrain generation for the demo scene
///
/// A seeded multi-octave value noise produces the heightmap. The mesh
/// gives every triangle its own three vertices carrying the face normal,
/// so lighting is constant per triangle (the low-poly look); vertex
/// colors still come from per-corner elevation so the bands blend.

use glam::Vec3;

use lowpoly_water_engine::lowpoly::device::GraphicsContext;
use lowpoly_water_engine::lowpoly::scene::Terrain;
use lowpoly_water_engine::lowpoly::scene::vertex_data::{pack_normal, TerrainVertex};
use lowpoly_water_engine::lowpoly::Result;

use crate::configs;

/// Seeded value-noise heightmap
pub struct HeightGenerator {
    seed: u32,
    octaves: u32,
    amplitude: f32,
    roughness: f32,
}

impl HeightGenerator {
    pub fn new(seed: u32, octaves: u32, amplitude: f32, roughness: f32) -> Self {
        Self {
            seed,
            octaves,
            amplitude,
            roughness,
        }
    }

    /// Height at integer grid coordinates
    pub fn height(&self, x: i32, z: i32) -> f32 {
        let mut total = 0.0;
        let divisor = (1 << (self.octaves - 1)) as f32;
        for octave in 0..self.octaves {
            let frequency = (1 << octave) as f32 / divisor;
            let amplitude = self.roughness.powi(octave as i32) * self.amplitude;
            total += self.interpolated_noise(x as f32 * frequency, z as f32 * frequency) * amplitude;
        }
        total
    }

    fn raw_noise(&self, x: i32, z: i32) -> f32 {
        let mut n = (x as i64)
            .wrapping_mul(49_632)
            .wrapping_add((z as i64).wrapping_mul(325_176))
            .wrapping_add(self.seed as i64) as i32;
        n = (n << 13) ^ n;
        let m = (n as i64)
            .wrapping_mul(
                (n as i64)
                    .wrapping_mul(n as i64)
                    .wrapping_mul(15_731)
                    .wrapping_add(789_221),
            )
            .wrapping_add(1_376_312_589);
        1.0 - ((m & 0x7fff_ffff) as f32 / 1_073_741_824.0)
    }

    fn smooth_noise(&self, x: i32, z: i32) -> f32 {
        let corners = (self.raw_noise(x - 1, z - 1)
            + self.raw_noise(x + 1, z - 1)
            + self.raw_noise(x - 1, z + 1)
            + self.raw_noise(x + 1, z + 1))
            / 16.0;
        let sides = (self.raw_noise(x - 1, z)
            + self.raw_noise(x + 1, z)
            + self.raw_noise(x, z - 1)
            + self.raw_noise(x, z + 1))
            / 8.0;
        corners + sides + self.raw_noise(x, z) / 4.0
    }

    fn interpolated_noise(&self, x: f32, z: f32) -> f32 {
        let int_x = x.floor() as i32;
        let int_z = z.floor() as i32;
        let frac_x = x - int_x as f32;
        let frac_z = z - int_z as f32;

        let v1 = self.smooth_noise(int_x, int_z);
        let v2 = self.smooth_noise(int_x + 1, int_z);
        let v3 = self.smooth_noise(int_x, int_z + 1);
        let v4 = self.smooth_noise(int_x + 1, int_z + 1);

        let i1 = cosine_interpolate(v1, v2, frac_x);
        let i2 = cosine_interpolate(v3, v4, frac_x);
        cosine_interpolate(i1, i2, frac_z)
    }
}

fn cosine_interpolate(a: f32, b: f32, blend: f32) -> f32 {
    let factor = (1.0 - (blend * std::f32::consts::PI).cos()) * 0.5;
    a * (1.0 - factor) + b * factor
}

/// Color for an elevation, blended between the configured bands
pub fn color_for_height(height: f32) -> [u8; 4] {
    let colors = &configs::TERRAIN_COLORS;
    let spread = configs::COLOR_SPREAD;

    // Normalize to [0,1], then stretch the configured spread over it
    let value = (height + configs::AMPLITUDE) / (configs::AMPLITUDE * 2.0);
    let value = ((value - (0.5 - spread / 2.0)) / spread).clamp(0.0, 0.9999);

    let scaled = value * (colors.len() - 1) as f32;
    let first = scaled.floor() as usize;
    let blend = scaled - first as f32;
    let low = colors[first];
    let high = colors[first + 1];
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * blend).round() as u8;
    [mix(low[0], high[0]), mix(low[1], high[1]), mix(low[2], high[2]), 255]
}

/// Generate the demo terrain and upload it
pub fn generate_terrain(ctx: &mut dyn GraphicsContext, grid_count: u32) -> Result<Terrain> {
    let generator = HeightGenerator::new(
        configs::SEED,
        configs::OCTAVES,
        configs::AMPLITUDE,
        configs::ROUGHNESS,
    );

    // Heights and colors at each grid corner
    let side = (grid_count + 1) as usize;
    let mut heights = vec![0.0f32; side * side];
    for z in 0..side {
        for x in 0..side {
            heights[z * side + x] = generator.height(x as i32, z as i32);
        }
    }
    let corner = |x: usize, z: usize| -> Vec3 {
        Vec3::new(x as f32, heights[z * side + x], z as f32)
    };

    let mut vertices = Vec::with_capacity((grid_count * grid_count * 6) as usize);
    let mut push_triangle = |a: Vec3, b: Vec3, c: Vec3| {
        let normal = pack_normal((b - a).cross(c - a).normalize());
        for position in [a, b, c] {
            vertices.push(TerrainVertex {
                position: position.to_array(),
                packed_normal: normal,
                color: color_for_height(position.y),
            });
        }
    };
    for z in 0..grid_count as usize {
        for x in 0..grid_count as usize {
            let top_left = corner(x, z);
            let bottom_left = corner(x, z + 1);
            let top_right = corner(x + 1, z);
            let bottom_right = corner(x + 1, z + 1);
            push_triangle(top_left, bottom_left, top_right);
            push_triangle(top_right, bottom_left, bottom_right);
        }
    }

    Terrain::new(ctx, &vertices, None)
}
