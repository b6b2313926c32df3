use super::*;
use glam::{Mat4, Vec3};

struct FixedCamera {
    view: Mat4,
    projection: Mat4,
    reflected: bool,
}

impl Camera for FixedCamera {
    fn view_matrix(&self) -> Mat4 {
        self.view
    }

    fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    fn position(&self) -> Vec3 {
        Vec3::ZERO
    }

    fn near_plane(&self) -> f32 {
        0.4
    }

    fn far_plane(&self) -> f32 {
        2500.0
    }

    fn is_reflected(&self) -> bool {
        self.reflected
    }

    fn set_reflected(&mut self, reflected: bool) {
        self.reflected = reflected;
    }
}

#[test]
fn test_projection_view_is_projection_times_view() {
    let camera = FixedCamera {
        view: Mat4::from_translation(Vec3::new(0.0, -3.0, 0.0)),
        projection: Mat4::from_scale(Vec3::new(2.0, 2.0, 2.0)),
        reflected: false,
    };
    let expected = camera.projection_matrix() * camera.view_matrix();
    assert_eq!(camera.projection_view_matrix(), expected);
}

#[test]
fn test_reflection_flag_round_trips() {
    let mut camera = FixedCamera {
        view: Mat4::IDENTITY,
        projection: Mat4::IDENTITY,
        reflected: false,
    };
    camera.set_reflected(true);
    assert!(camera.is_reflected());
    camera.set_reflected(false);
    assert!(!camera.is_reflected());
}
