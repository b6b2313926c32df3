/// Demo configuration constants

use glam::{Vec2, Vec3};

pub const WIDTH: u32 = 1280;
pub const HEIGHT: u32 = 720;

/// Fraction of the height range each terrain color band covers
pub const COLOR_SPREAD: f32 = 0.45;
/// Terrain color bands from lowest to highest elevation
pub const TERRAIN_COLORS: [[u8; 3]; 7] = [
    [201, 178, 99],
    [164, 155, 98],
    [164, 155, 98],
    [229, 219, 164],
    [135, 184, 82],
    [120, 120, 120],
    [200, 200, 210],
];

pub const LIGHT_DIRECTION: Vec3 = Vec3::new(0.3, -1.0, 0.5);
pub const LIGHT_COLOR: Vec3 = Vec3::new(1.0, 0.95, 0.95);
pub const LIGHT_BIAS: Vec2 = Vec2::new(0.3, 0.8);

/// Grid squares along each edge of the terrain and water meshes
pub const WORLD_SIZE: u32 = 200;
pub const SEED: u32 = 10_164_313;

/// Terrain noise parameters
pub const AMPLITUDE: f32 = 30.0;
pub const ROUGHNESS: f32 = 0.4;
pub const OCTAVES: u32 = 5;

pub const WATER_HEIGHT: f32 = -1.0;
