/// Camera contract used by the render engine.
///
/// The reflection pass renders the scene through the same camera flipped
/// below the water surface. Instead of constructing a second camera, the
/// render engine toggles the reflection flag around the pass and the
/// camera answers with its mirrored matrices while the flag is set.

use glam::{Mat4, Vec3};

/// View/projection source for all render passes.
///
/// Implementations must answer [`Camera::projection_view_matrix`] with the
/// mirrored view while [`Camera::is_reflected`] is set; everything else
/// about how the matrices are produced is up to the implementation.
pub trait Camera {
    /// View matrix for the current reflection state
    fn view_matrix(&self) -> Mat4;

    /// Projection matrix (perspective)
    fn projection_matrix(&self) -> Mat4;

    /// Combined projection * view for the current reflection state
    fn projection_view_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space camera position for the current reflection state
    fn position(&self) -> Vec3;

    /// Near clipping distance
    fn near_plane(&self) -> f32;

    /// Far clipping distance
    fn far_plane(&self) -> f32;

    /// Whether the camera currently answers with mirrored matrices
    fn is_reflected(&self) -> bool;

    /// Switch between normal and mirrored matrices
    fn set_reflected(&mut self, reflected: bool);
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
