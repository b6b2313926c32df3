use super::*;
use glam::{Vec2, Vec3};

#[test]
fn test_direction_is_normalized() {
    let light = Light::new(
        Vec3::new(0.3, -1.0, 0.5),
        Vec3::new(1.0, 0.95, 0.95),
        Vec2::new(0.3, 0.8),
    );
    assert!((light.direction().length() - 1.0).abs() < 1e-6);
    // Orientation is preserved
    assert!(light.direction().y < 0.0);
}

#[test]
fn test_color_and_bias_pass_through() {
    let light = Light::new(Vec3::NEG_Y, Vec3::new(1.0, 0.95, 0.95), Vec2::new(0.3, 0.8));
    assert_eq!(light.color(), Vec3::new(1.0, 0.95, 0.95));
    assert_eq!(light.bias(), Vec2::new(0.3, 0.8));
}
