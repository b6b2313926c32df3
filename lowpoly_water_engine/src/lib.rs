/*!
# Lowpoly Water Engine

Core traits and types for a small multi-pass water rendering engine.

This crate provides the platform-agnostic API: a graphics context trait
modelling the single global framebuffer binding slot, the attachment and
framebuffer (FBO) model, the three-pass render engine (reflection,
refraction, main), cameras, and scene data. Backend implementations
(OpenGL via `glow`) live in separate plugin crates and implement the
[`device::GraphicsContext`] trait.

## Architecture

- **GraphicsContext**: the explicit context object through which every
  bind/unbind/draw flows
- **Attachment / Fbo / FboConfig**: off-screen render target model
- **RenderEngine**: per-frame reflection → refraction → main orchestration
- **TerrainRenderer / WaterRenderer**: per-pass draw logic over shader
  contracts

Backend implementations provide concrete types that implement these traits.
*/

// Internal modules
mod engine;
mod error;
pub mod log;

pub mod camera;
pub mod device;
pub mod rendering;
pub mod scene;

// Main lowpoly namespace module
pub mod lowpoly {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
        // Note: engine_* macros are NOT re-exported here - they are exported at the crate root
    }

    // Device sub-module with the context and framebuffer model
    pub mod device {
        pub use crate::device::*;
    }

    // Render sub-module with the pass orchestration and renderers
    pub mod render {
        pub use crate::rendering::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }
}

// Re-export math library at crate root
pub use glam;
