/// Device module - graphics context trait and the framebuffer model

// Module declarations
pub mod attachment;
pub mod context;
pub mod framebuffer;

// Re-export everything from context.rs
pub use context::*;

// Re-export the framebuffer model
pub use attachment::*;
pub use framebuffer::*;

// Mock graphics context for tests (no GPU required)
#[cfg(test)]
pub mod mock_context;
