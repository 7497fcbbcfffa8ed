//! Small vector and scalar helpers shared by the solvers and the renderer

use glam::{Vec2, Vec3};

/// Smallest depth denominator accepted by the perspective divide
const MIN_PERSPECTIVE_DENOMINATOR: f32 = 1.0e-3;

/// Linear interpolation between `a` and `b`
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Perspective scale factor `focal / (focal + depth)`.
///
/// Points at or behind the eye collapse towards the centre instead of flipping.
pub fn perspective_scale(focal_distance: f32, depth: f32) -> f32 {
    let denominator = (focal_distance + depth).max(MIN_PERSPECTIVE_DENOMINATOR);
    focal_distance / denominator
}

/// Project a point with simple perspective division.
///
/// `screen = center + world.xy * focal / (focal + world.z)`
pub fn project(center: Vec2, world: Vec3, focal_distance: f32) -> Vec2 {
    center + world.truncate() * perspective_scale(focal_distance, world.z)
}

/// Point on a circle of `radius` at `angle` radians
pub fn circle_point(radius: f32, angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * radius
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f32, decimals: i32) -> f32 {
    let scale = 10f32.powi(decimals);
    (value * scale).round() / scale
}

/// Wrap `value` into `[0, period)`
pub fn wrap(value: f32, period: f32) -> f32 {
    let wrapped = value.rem_euclid(period);
    // rem_euclid can return `period` itself for tiny negative inputs
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
    }

    #[test]
    fn test_perspective_scale() {
        assert_eq!(perspective_scale(800.0, 0.0), 1.0);
        assert!(perspective_scale(800.0, 40.0) < 1.0); // farther is smaller
        assert!(perspective_scale(800.0, -40.0) > 1.0);
        assert!(perspective_scale(800.0, -800.0).is_finite());
    }

    #[test]
    fn test_project_centre() {
        let center = Vec2::new(400.0, 300.0);
        assert_eq!(project(center, Vec3::ZERO, 800.0), center);
        let p = project(center, Vec3::new(100.0, 0.0, 800.0), 800.0);
        assert!((p.x - 450.0).abs() < 1e-4);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-2.005, 1), -2.0);
        assert_eq!(round_to(199.96, 1), 200.0);
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(370.0, 365.0), 5.0);
        assert_eq!(wrap(-5.0, 365.0), 360.0);
        assert!(wrap(-1e-9, 365.0) < 365.0);
    }
}
