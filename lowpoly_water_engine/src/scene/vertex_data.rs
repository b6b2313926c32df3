/// Packed vertex formats shared by the mesh generators and the backends
///
/// Both meshes use tightly packed vertices to keep the upload small: the
/// water vertex carries only a 2-D position plus triangle-neighbor
/// indicators, the terrain vertex packs its normal into a single
/// 2_10_10_10_REV word and its color into four bytes.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One water vertex: grid-space x,z plus offsets to the two other
/// vertices of its triangle (in grid units, as signed bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct WaterVertex {
    /// x and z grid position (height comes from a shader uniform)
    pub position: [f32; 2],
    /// x/z offset to partner vertex 1, then x/z offset to partner vertex 2
    pub indicators: [i8; 4],
}

/// One terrain vertex: position, packed normal, rgba color
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    /// Normal in signed 2_10_10_10_REV layout
    pub packed_normal: u32,
    pub color: [u8; 4],
}

/// Pack a unit vector into the signed 2_10_10_10_REV layout.
///
/// Each component is clamped to [-1, 1] and quantized to 10 signed bits;
/// the two alpha bits stay zero.
pub fn pack_normal(normal: Vec3) -> u32 {
    let quantize = |v: f32| -> u32 {
        let clamped = v.clamp(-1.0, 1.0);
        ((clamped * 511.0).round() as i32 as u32) & 0x3FF
    };
    (quantize(normal.z) << 20) | (quantize(normal.y) << 10) | quantize(normal.x)
}

/// View a vertex slice as raw bytes for upload
pub fn as_bytes<V: Pod>(vertices: &[V]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
#[path = "vertex_data_tests.rs"]
mod tests;
