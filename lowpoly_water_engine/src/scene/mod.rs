/// Scene module - lights, terrain, water and packed vertex data

// Module declarations
pub mod light;
pub mod terrain;
pub mod vertex_data;
pub mod water;

// Re-exports
pub use light::Light;
pub use terrain::Terrain;
pub use water::WaterTile;
