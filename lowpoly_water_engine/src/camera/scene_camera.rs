/// SceneCamera - perspective camera with a reflection toggle
///
/// Holds a position and pitch/yaw orientation and derives its matrices on
/// demand. While reflected, the camera's position is mirrored about the
/// water plane and its pitch is negated, so the reflection pass sees the
/// scene from under the surface looking up.

use glam::{Mat4, Vec3};

use super::camera::Camera;

/// Vertical field of view in degrees
pub const FOV_DEGREES: f32 = 70.0;
/// Near clipping distance
pub const NEAR_PLANE: f32 = 0.4;
/// Far clipping distance
pub const FAR_PLANE: f32 = 2500.0;

/// Perspective camera for the water scene
#[derive(Debug, Clone)]
pub struct SceneCamera {
    position: Vec3,
    /// Pitch in degrees, positive looks down
    pitch: f32,
    /// Yaw in degrees around the world Y axis
    yaw: f32,
    aspect_ratio: f32,
    water_height: f32,
    reflected: bool,
}

impl SceneCamera {
    /// Create a camera at the origin looking down negative Z.
    ///
    /// # Arguments
    ///
    /// * `aspect_ratio` - surface width / height
    /// * `water_height` - world Y of the water plane, the mirror for the
    ///   reflection state
    pub fn new(aspect_ratio: f32, water_height: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            pitch: 0.0,
            yaw: 0.0,
            aspect_ratio,
            water_height,
            reflected: false,
        }
    }

    /// Move the camera
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set pitch in degrees (positive looks down)
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    /// Set yaw in degrees
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    /// Update the aspect ratio after a surface resize
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Pitch in degrees for the current reflection state
    pub fn pitch(&self) -> f32 {
        if self.reflected {
            -self.pitch
        } else {
            self.pitch
        }
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    fn view_for(&self, position: Vec3, pitch: f32) -> Mat4 {
        Mat4::from_rotation_x(pitch.to_radians())
            * Mat4::from_rotation_y(self.yaw.to_radians())
            * Mat4::from_translation(-position)
    }
}

impl Camera for SceneCamera {
    fn view_matrix(&self) -> Mat4 {
        self.view_for(self.position(), self.pitch())
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            FOV_DEGREES.to_radians(),
            self.aspect_ratio,
            NEAR_PLANE,
            FAR_PLANE,
        )
    }

    fn position(&self) -> Vec3 {
        if self.reflected {
            // Mirror about the water plane
            Vec3::new(
                self.position.x,
                2.0 * self.water_height - self.position.y,
                self.position.z,
            )
        } else {
            self.position
        }
    }

    fn near_plane(&self) -> f32 {
        NEAR_PLANE
    }

    fn far_plane(&self) -> f32 {
        FAR_PLANE
    }

    fn is_reflected(&self) -> bool {
        self.reflected
    }

    fn set_reflected(&mut self, reflected: bool) {
        self.reflected = reflected;
    }
}

#[cfg(test)]
#[path = "scene_camera_tests.rs"]
mod tests;
