//! # Wave Simulation
//!
//! A chain of unit point masses joined by Hookean springs, driven at one end
//! and pinned to a wall at the other. Used for the transverse and longitudinal
//! slinky demonstrations.

pub mod node;
pub mod params;
pub mod simulation;
pub mod zones;

pub use node::*;
pub use params::*;
pub use simulation::*;
pub use zones::*;
