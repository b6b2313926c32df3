/// Camera module - camera contract and the orbiting scene camera

// Module declarations
pub mod camera;
pub mod scene_camera;

// Re-exports
pub use camera::Camera;
pub use scene_camera::SceneCamera;
