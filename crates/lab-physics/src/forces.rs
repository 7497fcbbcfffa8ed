//! Force laws for the point-mass chain
//!
//! Masses are implicitly 1, so forces are applied directly as velocity changes.

use glam::Vec2;

/// Hookean force on the point at `from` exerted by a spring attached at `to`.
/// F = k * (|to - from| - rest) along the unit vector towards `to`.
///
/// A fully collapsed spring has no direction and contributes nothing.
pub fn spring_force(from: Vec2, to: Vec2, stiffness: f32, rest_length: f32) -> Vec2 {
    let delta = to - from;
    let length = delta.length();
    if length == 0.0 {
        return Vec2::ZERO;
    }
    delta * (stiffness * (length - rest_length) / length)
}

/// Potential energy stored in a spring of the given length
pub fn spring_potential(length: f32, stiffness: f32, rest_length: f32) -> f32 {
    let stretch = length - rest_length;
    0.5 * stiffness * stretch * stretch
}

/// Linear velocity damping
pub fn damping_force(velocity: Vec2, damping: f32) -> Vec2 {
    -velocity * damping
}

/// Spring-damper pulling a single coordinate back to its anchor
pub fn anchor_force(displacement: f32, velocity: f32, stiffness: f32, damping: f32) -> f32 {
    -stiffness * displacement - damping * velocity
}
