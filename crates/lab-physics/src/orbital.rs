//! Two-body barycentric decomposition
//!
//! The barycenter is the coordinate origin. Each body orbits it at a radius
//! fixed by the lever-arm balance r_a·m_a = r_b·m_b, half a turn apart.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::constants::*;
use crate::vector::{circle_point, wrap};

/// Distance of each body from the barycenter for a given separation.
///
/// Masses are clamped to [`MIN_MASS`] so the split is always defined.
pub fn barycentric_radii(mass_a: f32, mass_b: f32, separation: f32) -> (f32, f32) {
    let mass_a = mass_a.max(MIN_MASS);
    let mass_b = mass_b.max(MIN_MASS);
    let total = mass_a + mass_b;
    (separation * mass_b / total, separation * mass_a / total)
}

/// Unit direction at `angle` in the XZ plane, counter-clockwise seen from above
fn orbit_direction(angle: f32) -> Vec3 {
    let p = circle_point(1.0, angle);
    Vec3::new(p.x, 0.0, -p.y)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    /// The heavier body (Earth)
    Primary,
    /// The lighter body (Moon)
    Secondary,
}

/// Which point the scene is drawn around
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceFrame {
    /// The barycenter stays still and both bodies orbit it
    Barycentric,
    /// The chosen body sits at the origin
    BodyFixed(Body),
}

/// Scene positions of the two bodies and the barycenter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPositions {
    pub primary: Vec3,
    pub secondary: Vec3,
    pub barycenter: Vec3,
}

impl BodyPositions {
    fn shifted(self, offset: Vec3) -> Self {
        Self {
            primary: self.primary - offset,
            secondary: self.secondary - offset,
            barycenter: self.barycenter - offset,
        }
    }
}

/// Earth–Moon style two-body system
#[derive(Debug, Clone)]
pub struct BarycenterSystem {
    pub primary_mass: f32,
    pub base_secondary_mass: f32,
    mass_multiplier: f32,
    pub separation: f32,
    /// Orbital phase of the secondary (radians)
    pub phase: f32,
    speed: f32,
    pub primary_spin: f32,
    pub secondary_spin: f32,
    pub frame: ReferenceFrame,
}

impl Default for BarycenterSystem {
    fn default() -> Self {
        Self {
            primary_mass: EARTH_MOON_MASS_RATIO,
            base_secondary_mass: 1.0,
            mass_multiplier: 1.0,
            separation: EARTH_MOON_SEPARATION,
            phase: 0.0,
            speed: 1.0,
            primary_spin: 0.0,
            secondary_spin: 0.0,
            frame: ReferenceFrame::Barycentric,
        }
    }
}

impl BarycenterSystem {
    pub const MULTIPLIER_RANGE: (f32, f32) = (0.1, 100.0);
    pub const SPEED_RANGE: (f32, f32) = (0.0, 3.0);

    pub fn mass_multiplier(&self) -> f32 {
        self.mass_multiplier
    }

    /// Scale the secondary's mass; radii follow immediately
    pub fn set_mass_multiplier(&mut self, multiplier: f32) {
        let (lo, hi) = Self::MULTIPLIER_RANGE;
        self.mass_multiplier = multiplier.clamp(lo, hi);
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        let (lo, hi) = Self::SPEED_RANGE;
        self.speed = speed.clamp(lo, hi);
    }

    pub fn secondary_mass(&self) -> f32 {
        self.base_secondary_mass * self.mass_multiplier
    }

    /// Primary to secondary mass ratio
    pub fn mass_ratio(&self) -> f32 {
        self.primary_mass.max(MIN_MASS) / self.secondary_mass().max(MIN_MASS)
    }

    /// `(r_primary, r_secondary)`
    pub fn radii(&self) -> (f32, f32) {
        barycentric_radii(self.primary_mass, self.secondary_mass(), self.separation)
    }

    /// Whether the barycenter lies inside a primary of the given radius
    pub fn barycenter_inside_primary(&self, primary_radius: f32) -> bool {
        self.radii().0 < primary_radius
    }

    /// Positions in the barycentric frame, orbiting in the XZ plane
    pub fn barycentric_positions(&self) -> BodyPositions {
        let (r_primary, r_secondary) = self.radii();
        BodyPositions {
            primary: orbit_direction(self.primary_phase()) * r_primary,
            secondary: orbit_direction(self.phase) * r_secondary,
            barycenter: Vec3::ZERO,
        }
    }

    /// Positions in the selected reference frame
    pub fn positions(&self) -> BodyPositions {
        let positions = self.barycentric_positions();
        match self.frame {
            ReferenceFrame::Barycentric => positions,
            ReferenceFrame::BodyFixed(Body::Primary) => positions.shifted(positions.primary),
            ReferenceFrame::BodyFixed(Body::Secondary) => positions.shifted(positions.secondary),
        }
    }

    /// Phase of the primary, half a turn behind the secondary
    pub fn primary_phase(&self) -> f32 {
        wrap(self.phase + PI, TAU)
    }
}

impl crate::Simulation for BarycenterSystem {
    fn tick(&mut self, dt: f32) {
        let rate = self.speed * dt;
        self.phase = wrap(self.phase + BARYCENTER_ORBIT_RATE * rate, TAU);
        self.primary_spin = wrap(self.primary_spin + EARTH_SPIN_RATE * rate, TAU);
        self.secondary_spin = wrap(self.secondary_spin + MOON_SPIN_RATE * rate, TAU);
    }

    fn reset(&mut self) {
        log::debug!("resetting barycenter system");
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Simulation;

    #[test]
    fn test_lever_balance() {
        let mut system = BarycenterSystem::default();
        for m in [0.1, 0.5, 1.0, 7.3, 81.3, 100.0] {
            system.set_mass_multiplier(m);
            let (r_a, r_b) = system.radii();
            let lhs = r_a * system.primary_mass;
            let rhs = r_b * system.secondary_mass();
            assert!((lhs - rhs).abs() < 1e-3 * lhs.max(1.0), "m={}", m);
            assert!((r_a + r_b - EARTH_MOON_SEPARATION).abs() < 1e-4);
        }
    }

    #[test]
    fn test_earth_moon_barycenter_inside_earth() {
        let system = BarycenterSystem::default();
        let (r_earth, _) = system.radii();
        assert!((r_earth - 30.0 / 82.3).abs() < 1e-4);
        assert!(system.barycenter_inside_primary(EARTH_BODY_RADIUS));
    }

    #[test]
    fn test_heavy_secondary_moves_barycenter_out() {
        let mut system = BarycenterSystem::default();
        system.set_mass_multiplier(100.0);
        assert!(!system.barycenter_inside_primary(EARTH_BODY_RADIUS));
    }

    #[test]
    fn test_zero_mass_is_clamped() {
        let (r_a, r_b) = barycentric_radii(0.0, 0.0, 10.0);
        assert!((r_a - 5.0).abs() < 1e-5);
        assert!((r_b - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_bodies_opposite() {
        let mut system = BarycenterSystem::default();
        system.phase = 1.0;
        let p = system.positions();
        let cross = p.primary.cross(p.secondary).length();
        assert!(cross < 1e-4);
        assert!(p.primary.dot(p.secondary) < 0.0);
    }

    #[test]
    fn test_primary_half_turn_behind() {
        let mut system = BarycenterSystem::default();
        for phase in [0.0, 1.0, 3.5, 6.0] {
            system.phase = phase;
            let primary = system.barycentric_positions().primary;
            let angle = wrap((-primary.z).atan2(primary.x), TAU);
            let expected = system.primary_phase();
            let diff = (angle - expected).abs();
            assert!(diff < 1e-4 || (diff - TAU).abs() < 1e-4, "phase {}", phase);
        }
    }

    #[test]
    fn test_body_fixed_frame_is_shift() {
        let mut system = BarycenterSystem::default();
        system.phase = 0.7;
        let base = system.barycentric_positions();
        system.frame = ReferenceFrame::BodyFixed(Body::Primary);
        let fixed = system.positions();
        assert_eq!(fixed.primary, Vec3::ZERO);
        assert!(((fixed.secondary - fixed.primary) - (base.secondary - base.primary)).length() < 1e-5);
        assert!((fixed.barycenter + base.primary).length() < 1e-5);
    }

    #[test]
    fn test_tick_advances_phase() {
        let mut system = BarycenterSystem::default();
        system.set_speed(2.0);
        system.tick(1.0);
        assert!((system.phase - 1.0).abs() < 1e-5);
        system.set_speed(0.0);
        system.tick(1.0);
        assert!((system.phase - 1.0).abs() < 1e-5);
    }
}
