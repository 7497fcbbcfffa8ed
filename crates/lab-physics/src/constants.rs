//! Constants for the lab simulations
//!
//! Values are tuned for on-screen clarity, not physical accuracy. Distances are
//! in scene units, angles in degrees unless stated otherwise.

/// Days in the simulated (non-leap) year
pub const DAYS_PER_YEAR: f32 = 365.0;

/// Earth axial tilt used for the declination curve
pub const AXIAL_TILT_DEG: f32 = 23.44;

/// Days between the December solstice and January 1st
/// Shifts the declination cosine so its minimum lands on day 355
pub const DECLINATION_PHASE_DAYS: f32 = 10.0;

/// Hours of daylight gained or lost at full declination
pub const DAY_LENGTH_SWING_HOURS: f32 = 2.5;

/// Latitude at which noon sun elevation is reported
pub const REFERENCE_LATITUDE_DEG: f32 = 45.0;

/// Simulated days per second at playback speed 1
pub const DAYS_PER_SECOND: f32 = 20.0;

/// Radius of the Earth sphere in the seasons scene
pub const SEASONS_EARTH_RADIUS: f32 = 7.0;

/// Radius of the Earth's orbit in the seasons scene
pub const SEASONS_ORBIT_RADIUS: f32 = 40.0;

/// Earth spin rate in the seasons scene (rad/s)
pub const SEASONS_SPIN_RATE: f32 = 0.5;

/// Earth to Moon mass ratio
pub const EARTH_MOON_MASS_RATIO: f32 = 81.3;

/// Earth–Moon separation in scene units
pub const EARTH_MOON_SEPARATION: f32 = 30.0;

/// Radius of the Earth sphere in the barycenter scene
pub const EARTH_BODY_RADIUS: f32 = 1.5;

/// Radius of the Moon sphere in the barycenter scene
pub const MOON_BODY_RADIUS: f32 = 0.4;

/// Orbital angular speed of the two-body system at playback speed 1 (rad/s)
pub const BARYCENTER_ORBIT_RATE: f32 = 0.5;

/// Spin rates for the two bodies (rad/s)
pub const EARTH_SPIN_RATE: f32 = 0.5;
pub const MOON_SPIN_RATE: f32 = 0.05;

/// Lower bound for any mass fed into the barycentric solver
pub const MIN_MASS: f32 = 1.0e-3;

/// Smallest allowed object distance
pub const MIN_OBJECT_DISTANCE: f32 = 0.1;

/// Smallest allowed focal length magnitude
pub const MIN_FOCAL_LENGTH: f32 = 0.1;

/// Object arrow height on the optics bench
pub const OBJECT_HEIGHT: f32 = 60.0;

/// |p - |f|| below which a converging element is treated as imaging at infinity
pub const INFINITY_BAND: f32 = 0.5;

/// |q| above which the image is treated as being at infinity
pub const MAX_IMAGE_DISTANCE: f32 = 5000.0;

/// Tolerance on |M| around 1 for a "same size" image
pub const SAME_SIZE_TOLERANCE: f32 = 0.05;

/// Minimum |q - f| for inverting an image distance back to an object distance
pub const IMAGE_INVERSION_GUARD: f32 = 0.1;

/// Angular speed scale applied to each planet's relative orbit speed
pub const SOLAR_ANGULAR_SCALE: f32 = 0.1;
