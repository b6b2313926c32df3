/// Directional light shared by the terrain and water shaders

use glam::{Vec2, Vec3};

/// A single directional light.
///
/// The bias vector splits lighting into an ambient and a diffuse share:
/// `bias.x` is the flat ambient amount, `bias.y` scales the
/// direction-dependent diffuse amount.
#[derive(Debug, Clone)]
pub struct Light {
    direction: Vec3,
    color: Vec3,
    bias: Vec2,
}

impl Light {
    /// Create a light. The direction is normalized here so shaders can use
    /// it directly.
    pub fn new(direction: Vec3, color: Vec3, bias: Vec2) -> Self {
        Self {
            direction: direction.normalize(),
            color,
            bias,
        }
    }

    /// Normalized direction the light travels in
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Light color
    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// Ambient/diffuse lighting split
    pub fn bias(&self) -> Vec2 {
        self.bias
    }
}

#[cfg(test)]
#[path = "light_tests.rs"]
mod tests;
