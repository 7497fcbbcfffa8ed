//! Point masses of the wave chain

use glam::Vec2;

/// A unit point mass. `x` runs along the chain, `y` is transverse displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveNode {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Along-chain coordinate at equilibrium
    pub rest_x: f32,
}

impl WaveNode {
    pub fn at_rest(rest_x: f32) -> Self {
        Self {
            position: Vec2::new(rest_x, 0.0),
            velocity: Vec2::ZERO,
            rest_x,
        }
    }

    pub fn rest_position(&self) -> Vec2 {
        Vec2::new(self.rest_x, 0.0)
    }

    /// Offset from the rest position
    pub fn displacement(&self) -> Vec2 {
        self.position - self.rest_position()
    }

    /// Snap to rest with zero velocity
    pub fn pin(&mut self) {
        self.position = self.rest_position();
        self.velocity = Vec2::ZERO;
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.velocity.length_squared()
    }
}

/// A fresh chain of `count` nodes spaced `spacing` apart, starting at x = 0
pub fn rest_chain(count: usize, spacing: f32) -> Vec<WaveNode> {
    (0..count)
        .map(|i| WaveNode::at_rest(i as f32 * spacing))
        .collect()
}
