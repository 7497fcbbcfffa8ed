//! # Lab Renderer
//!
//! Turns simulation state into screen-space shapes. Nothing here touches the
//! GPU; the host paints each [`Frame`] with its own backend.

pub mod camera;
pub mod optics;
pub mod orbits;
pub mod primitives;
pub mod slinky;
pub mod starfield;

pub use camera::*;
pub use optics::*;
pub use orbits::*;
pub use primitives::*;
pub use slinky::*;
pub use starfield::*;
