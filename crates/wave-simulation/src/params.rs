//! Wave chain parameters for runtime tuning

use glam::Vec2;

use crate::zones::ZoneThresholds;

/// Which axis the boundary drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveMode {
    /// Perpendicular displacement (y)
    #[default]
    Transverse,
    /// Along-chain displacement (x), producing compressions and rarefactions
    Longitudinal,
}

impl WaveMode {
    pub fn label(self) -> &'static str {
        match self {
            WaveMode::Transverse => "Transverse",
            WaveMode::Longitudinal => "Longitudinal",
        }
    }
}

/// Slider ranges exposed to the UI
pub const TENSION_RANGE: (f32, f32) = (0.05, 0.5);
pub const DAMPING_RANGE: (f32, f32) = (0.01, 0.1);
pub const FREQUENCY_RANGE: (f32, f32) = (0.05, 0.3);

/// Explicit integration with unit mass and unit step diverges for k >= 1
pub const MAX_STABLE_TENSION: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    pub node_count: usize,
    pub rest_spacing: f32,
    /// Spring constant k
    pub tension: f32,
    /// Velocity damping per step
    pub damping: f32,
    /// Auto-oscillation angular frequency per step
    pub frequency: f32,
    /// Integrator steps per rendered frame
    pub substeps: u32,

    // Free boundary spring-damper
    pub boundary_stiffness: f32,
    pub boundary_damping: f32,

    // Auto-oscillation amplitudes
    pub transverse_amplitude: f32,
    pub longitudinal_amplitude: f32,

    // Pulse
    pub pulse_velocity: f32,
    pub pulse_shift: [f32; 2],

    // Drag limits on the driven coordinate
    pub transverse_drag_limit: Vec2,
    pub longitudinal_drag_limit: Vec2,

    pub zones: ZoneThresholds,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            node_count: 60,
            rest_spacing: 12.0,
            tension: 0.2,
            damping: 0.04,
            frequency: 0.1,
            substeps: 2,

            boundary_stiffness: 0.1,
            boundary_damping: 0.1,

            transverse_amplitude: 80.0,
            longitudinal_amplitude: 60.0,

            pulse_velocity: 25.0,      // upward flick of node 0
            pulse_shift: [40.0, 20.0], // shove of nodes 0 and 1

            transverse_drag_limit: Vec2::new(-200.0, 200.0),
            longitudinal_drag_limit: Vec2::new(-50.0, 100.0),

            zones: ZoneThresholds::default(),
        }
    }
}

impl WaveParams {
    /// Force every field into a range the integrator can run with
    pub fn clamped(mut self) -> Self {
        self.node_count = self.node_count.max(2);
        self.rest_spacing = self.rest_spacing.max(f32::EPSILON);
        self.tension = self.tension.clamp(0.0, MAX_STABLE_TENSION);
        self.damping = self.damping.clamp(0.0, 1.0);
        self.frequency = self.frequency.max(0.0);
        self.substeps = self.substeps.max(1);
        self.boundary_stiffness = self.boundary_stiffness.clamp(0.0, MAX_STABLE_TENSION);
        self.boundary_damping = self.boundary_damping.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_within_slider_ranges() {
        let p = WaveParams::default();
        assert!(p.tension >= TENSION_RANGE.0 && p.tension <= TENSION_RANGE.1);
        assert!(p.damping >= DAMPING_RANGE.0 && p.damping <= DAMPING_RANGE.1);
        assert!(p.frequency >= FREQUENCY_RANGE.0 && p.frequency <= FREQUENCY_RANGE.1);
        assert_eq!(p.clamped(), p);
    }

    #[test]
    fn test_clamped() {
        let p = WaveParams {
            node_count: 0,
            tension: 5.0,
            damping: -1.0,
            substeps: 0,
            ..Default::default()
        }
        .clamped();
        assert_eq!(p.node_count, 2);
        assert_eq!(p.tension, MAX_STABLE_TENSION);
        assert_eq!(p.damping, 0.0);
        assert_eq!(p.substeps, 1);
    }
}
