//! Mass-spring wave integrator
//!
//! Semi-implicit (symplectic) Euler with unit mass and unit step: every
//! interior velocity is updated from the current positions, then every
//! position from the new velocities. The integrator runs `substeps` times per
//! rendered frame.

use glam::Vec2;
use lab_physics::{anchor_force, damping_force, spring_force, spring_potential, Simulation};

use crate::node::{rest_chain, WaveNode};
use crate::params::{WaveMode, WaveParams};
use crate::zones::{detect_chain_zones, Zone};

/// Nominal display rate that one rendered frame represents
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// Frames `tick` will run to catch up after a stall; the rest of the backlog is dropped
pub const MAX_CATCHUP_FRAMES: u32 = 4;

/// What moves the first node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drive {
    /// Free end returning to rest through its own spring-damper
    Idle,
    /// Forced by a sinusoid of the configured frequency
    Auto,
    /// Held by the pointer
    Manual,
    /// A pulse was just applied; behaves as `Idle` and returns to it after one step
    Perturbed,
}

/// Slinky-style wave chain
#[derive(Debug, Clone)]
pub struct WaveSimulation {
    params: WaveParams,
    mode: WaveMode,
    drive: Drive,
    nodes: Vec<WaveNode>,
    /// Integrator steps since the last reset; phase of the auto driver
    step_count: u64,
    accumulator: f32,
}

impl WaveSimulation {
    pub fn new(params: WaveParams, mode: WaveMode) -> Self {
        let params = params.clamped();
        let nodes = rest_chain(params.node_count, params.rest_spacing);
        log::debug!(
            "wave chain: {} nodes, {:?}, k={}, damping={}",
            params.node_count,
            mode,
            params.tension,
            params.damping
        );
        Self {
            params,
            mode,
            drive: Drive::Idle,
            nodes,
            step_count: 0,
            accumulator: 0.0,
        }
    }

    /// Start from an arbitrary chain state; the last node is still the wall
    pub fn from_nodes(params: WaveParams, mode: WaveMode, nodes: Vec<WaveNode>) -> Self {
        let mut params = params.clamped();
        params.node_count = nodes.len().max(2);
        let mut simulation = Self::new(params, mode);
        if nodes.len() >= 2 {
            simulation.nodes = nodes;
        }
        simulation
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    /// Apply new parameters. A different chain layout rebuilds the chain.
    pub fn set_params(&mut self, params: WaveParams) {
        let params = params.clamped();
        let relayout = params.node_count != self.params.node_count
            || params.rest_spacing != self.params.rest_spacing;
        self.params = params;
        if relayout {
            self.reset_nodes();
        }
    }

    pub fn mode(&self) -> WaveMode {
        self.mode
    }

    /// Switch excitation axis; the chain is rebuilt at rest
    pub fn set_mode(&mut self, mode: WaveMode) {
        if mode == self.mode {
            return;
        }
        log::debug!("wave mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.reset_nodes();
    }

    pub fn drive(&self) -> Drive {
        self.drive
    }

    pub fn is_auto(&self) -> bool {
        self.drive == Drive::Auto
    }

    /// Turn the sinusoidal driver on or off. Turning it on releases any drag.
    pub fn set_auto(&mut self, enabled: bool) {
        self.drive = match (enabled, self.drive) {
            (true, _) => Drive::Auto,
            (false, Drive::Auto) => Drive::Idle,
            (false, other) => other,
        };
    }

    /// Flick (transverse) or shove (longitudinal) the driven end
    pub fn trigger_pulse(&mut self) {
        let [shift_0, shift_1] = self.params.pulse_shift;
        match self.mode {
            WaveMode::Transverse => self.nodes[0].velocity.y = self.params.pulse_velocity,
            WaveMode::Longitudinal => {
                self.nodes[0].position.x += shift_0;
                self.nodes[1].position.x += shift_1;
            }
        }
        if self.drive == Drive::Idle {
            self.drive = Drive::Perturbed;
        }
    }

    /// Grab the driven end. Stops auto-oscillation.
    pub fn begin_drag(&mut self) {
        self.drive = Drive::Manual;
    }

    /// Move the held end to a chain-space pointer position.
    ///
    /// Only the driven coordinate follows the pointer, clamped to the drag limits.
    pub fn drag_to(&mut self, pointer: Vec2) {
        if self.drive != Drive::Manual {
            return;
        }
        let node = &mut self.nodes[0];
        match self.mode {
            WaveMode::Transverse => {
                let limit = self.params.transverse_drag_limit;
                node.position.y = pointer.y.clamp(limit.x, limit.y);
                node.velocity.y = 0.0;
            }
            WaveMode::Longitudinal => {
                let limit = self.params.longitudinal_drag_limit;
                node.position.x = pointer.x.clamp(limit.x, limit.y);
                node.velocity.x = 0.0;
            }
        }
    }

    pub fn end_drag(&mut self) {
        if self.drive == Drive::Manual {
            self.drive = Drive::Idle;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drive == Drive::Manual
    }

    pub fn nodes(&self) -> &[WaveNode] {
        &self.nodes
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Compression and rarefaction zones; always empty in transverse mode
    pub fn zones(&self) -> Vec<Zone> {
        match self.mode {
            WaveMode::Longitudinal => detect_chain_zones(&self.nodes, &self.params.zones),
            WaveMode::Transverse => Vec::new(),
        }
    }

    /// Kinetic energy of every node plus potential energy of every spring
    pub fn energy(&self) -> f32 {
        let kinetic: f32 = self.nodes.iter().map(WaveNode::kinetic_energy).sum();
        let potential: f32 = self
            .nodes
            .windows(2)
            .map(|pair| {
                let length = pair[0].position.distance(pair[1].position);
                spring_potential(length, self.params.tension, self.params.rest_spacing)
            })
            .sum();
        kinetic + potential
    }

    /// One integrator step
    pub fn step(&mut self) {
        self.step_count += 1;
        self.apply_boundary();

        let last = self.nodes.len() - 1;
        self.nodes[last].pin();

        let k = self.params.tension;
        let rest = self.params.rest_spacing;
        let damping = self.params.damping;

        for i in 1..last {
            let prev = self.nodes[i - 1].position;
            let next = self.nodes[i + 1].position;
            let node = &mut self.nodes[i];
            let force = spring_force(node.position, prev, k, rest)
                + spring_force(node.position, next, k, rest)
                + damping_force(node.velocity, damping);
            node.velocity += force;
        }

        for node in &mut self.nodes[1..last] {
            node.position += node.velocity;
        }

        if self.drive == Drive::Perturbed {
            self.drive = Drive::Idle;
        }
    }

    fn apply_boundary(&mut self) {
        let phase = (self.step_count as f64 * self.params.frequency as f64).sin() as f32;
        let params = &self.params;
        let node = &mut self.nodes[0];

        match (self.drive, self.mode) {
            (Drive::Auto, WaveMode::Transverse) => {
                node.position.y = phase * params.transverse_amplitude;
                node.velocity.y = 0.0;
            }
            (Drive::Auto, WaveMode::Longitudinal) => {
                node.position.x = node.rest_x + phase * params.longitudinal_amplitude;
                node.velocity.x = 0.0;
            }
            // The pointer handler already placed the node
            (Drive::Manual, _) => {}
            (Drive::Idle | Drive::Perturbed, WaveMode::Transverse) => {
                node.velocity.y += anchor_force(
                    node.position.y,
                    node.velocity.y,
                    params.boundary_stiffness,
                    params.boundary_damping,
                );
                node.position.y += node.velocity.y;
            }
            (Drive::Idle | Drive::Perturbed, WaveMode::Longitudinal) => {
                node.velocity.x += anchor_force(
                    node.position.x - node.rest_x,
                    node.velocity.x,
                    params.boundary_stiffness,
                    params.boundary_damping,
                );
                node.position.x += node.velocity.x;
            }
        }
    }

    /// One rendered frame: `substeps` integrator steps
    pub fn advance_frame(&mut self) {
        for _ in 0..self.params.substeps {
            self.step();
        }
    }

    fn reset_nodes(&mut self) {
        self.nodes = rest_chain(self.params.node_count, self.params.rest_spacing);
        self.step_count = 0;
        self.accumulator = 0.0;
        if matches!(self.drive, Drive::Manual | Drive::Perturbed) {
            self.drive = Drive::Idle;
        }
    }
}

impl Default for WaveSimulation {
    fn default() -> Self {
        Self::new(WaveParams::default(), WaveMode::default())
    }
}

impl Simulation for WaveSimulation {
    /// Convert wall-clock time into whole frames at [`FRAME_DT`]
    fn tick(&mut self, dt: f32) {
        self.accumulator += dt.max(0.0);
        let mut frames = 0;
        while self.accumulator >= FRAME_DT && frames < MAX_CATCHUP_FRAMES {
            self.advance_frame();
            self.accumulator -= FRAME_DT;
            frames += 1;
        }
        if self.accumulator >= FRAME_DT {
            log::trace!("dropping {:.3}s of wave backlog", self.accumulator);
            self.accumulator %= FRAME_DT;
        }
    }

    fn reset(&mut self) {
        self.drive = Drive::Idle;
        self.reset_nodes();
    }
}
