//! # Lab Physics
//!
//! Physics behind the lab simulations: spring forces for the wave chain, the
//! thin lens and mirror equation, two-body barycenters, the seasonal
//! declination approximation and a toy solar system.

pub mod constants;
pub mod forces;
pub mod optics;
pub mod orbital;
pub mod seasons;
pub mod solar;
pub mod vector;

pub use constants::*;
pub use forces::*;
pub use optics::*;
pub use orbital::*;
pub use seasons::*;
pub use solar::*;
pub use vector::*;

/// A simulation core that owns its state and is advanced by the host's scheduler.
///
/// Every call happens on the host's frame thread; nothing is shared between instances.
pub trait Simulation {
    /// Advance the state by `dt` seconds of wall-clock time.
    fn tick(&mut self, dt: f32);

    /// Return to the initial configuration.
    fn reset(&mut self);
}
