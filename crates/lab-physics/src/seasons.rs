//! Earth's seasons from a fixed axial tilt
//!
//! Day-of-year drives both the orbital position and the solar declination.
//! The formulas are classroom approximations: no equation of time, no refraction.

use std::f32::consts::TAU;
use std::fmt;

use glam::Vec3;

use crate::constants::*;
use crate::vector::wrap;

/// Solar declination in degrees: −tilt · cos(2π (day + 10) / 365)
pub fn solar_declination(day_of_year: f32, tilt_deg: f32) -> f32 {
    -tilt_deg * (TAU / DAYS_PER_YEAR * (day_of_year + DECLINATION_PHASE_DAYS)).cos()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    Northern,
    Southern,
}

impl Hemisphere {
    fn sign(self) -> f32 {
        match self {
            Hemisphere::Northern => 1.0,
            Hemisphere::Southern => -1.0,
        }
    }
}

/// Approximate hours of daylight: 12 ± (declination / tilt) · 2.5
pub fn day_length_hours(declination_deg: f32, tilt_deg: f32, hemisphere: Hemisphere) -> f32 {
    if tilt_deg == 0.0 {
        return 12.0;
    }
    12.0 + hemisphere.sign() * (declination_deg / tilt_deg) * DAY_LENGTH_SWING_HOURS
}

/// Noon sun elevation in degrees: 90 − latitude ± declination
pub fn sun_elevation(latitude_deg: f32, declination_deg: f32, hemisphere: Hemisphere) -> f32 {
    90.0 - latitude_deg + hemisphere.sign() * declination_deg
}

/// Orbital angle in radians, offset so the solstices line up with the declination curve
pub fn orbital_angle(day_of_year: f32) -> f32 {
    (day_of_year + DECLINATION_PHASE_DAYS) / DAYS_PER_YEAR * TAU
}

/// Position on the orbit in the XZ plane
pub fn orbital_position(day_of_year: f32, radius: f32) -> Vec3 {
    let angle = orbital_angle(day_of_year);
    Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Astronomical season in the northern hemisphere
    pub fn northern(day_of_year: f32) -> Self {
        match wrap(day_of_year, DAYS_PER_YEAR) as u32 {
            80..=171 => Season::Spring,
            172..=263 => Season::Summer,
            264..=354 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Season::Spring => Season::Autumn,
            Season::Summer => Season::Winter,
            Season::Autumn => Season::Spring,
            Season::Winter => Season::Summer,
        }
    }

    pub fn in_hemisphere(day_of_year: f32, hemisphere: Hemisphere) -> Self {
        let season = Self::northern(day_of_year);
        match hemisphere {
            Hemisphere::Northern => season,
            Hemisphere::Southern => season.opposite(),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        };
        write!(f, "{}", name)
    }
}

const MONTHS: [(&str, u32); 12] = [
    ("January", 31),
    ("February", 28),
    ("March", 31),
    ("April", 30),
    ("May", 31),
    ("June", 30),
    ("July", 31),
    ("August", 31),
    ("September", 30),
    ("October", 31),
    ("November", 30),
    ("December", 31),
];

/// Calendar date for a day-of-year in a non-leap year, day 0 being January 1
pub fn date_string(day_of_year: f32) -> String {
    let mut remaining = wrap(day_of_year, DAYS_PER_YEAR) as u32;
    for (month, days) in MONTHS {
        if remaining < days {
            return format!("{} {}", month, remaining + 1);
        }
        remaining -= days;
    }
    // Only reachable through float rounding right at the wrap point
    "December 31".to_string()
}

/// Everything the seasons view displays besides the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonReadout {
    pub date: String,
    pub declination: f32,
    pub northern_season: Season,
    pub southern_season: Season,
    pub northern_day_length: f32,
    pub southern_day_length: f32,
    pub northern_elevation: f32,
    pub southern_elevation: f32,
}

/// A tilted Earth on a circular orbit, driven by day-of-year
#[derive(Debug, Clone)]
pub struct SeasonalOrbit {
    day: f32,
    pub orbit_radius: f32,
    pub latitude_deg: f32,
    speed: f32,
    pub playing: bool,
    /// Earth's rotation about its own axis (radians)
    pub spin: f32,
}

impl Default for SeasonalOrbit {
    fn default() -> Self {
        Self {
            day: 172.0,
            orbit_radius: SEASONS_ORBIT_RADIUS,
            latitude_deg: REFERENCE_LATITUDE_DEG,
            speed: 0.2,
            playing: false,
            spin: 0.0,
        }
    }
}

impl SeasonalOrbit {
    pub const SPEED_RANGE: (f32, f32) = (0.1, 2.0);

    pub fn day(&self) -> f32 {
        self.day
    }

    /// Scrub to a day; playback pauses so the scrub sticks
    pub fn set_day(&mut self, day: f32) {
        self.day = wrap(day, DAYS_PER_YEAR);
        self.playing = false;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        let (lo, hi) = Self::SPEED_RANGE;
        self.speed = speed.clamp(lo, hi);
    }

    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    /// Axial tilt in degrees; it never precesses
    pub fn tilt_deg(&self) -> f32 {
        AXIAL_TILT_DEG
    }

    pub fn declination(&self) -> f32 {
        solar_declination(self.day, self.tilt_deg())
    }

    pub fn position(&self) -> Vec3 {
        orbital_position(self.day, self.orbit_radius)
    }

    pub fn readout(&self) -> SeasonReadout {
        let declination = self.declination();
        SeasonReadout {
            date: date_string(self.day),
            declination,
            northern_season: Season::in_hemisphere(self.day, Hemisphere::Northern),
            southern_season: Season::in_hemisphere(self.day, Hemisphere::Southern),
            northern_day_length: day_length_hours(declination, self.tilt_deg(), Hemisphere::Northern),
            southern_day_length: day_length_hours(declination, self.tilt_deg(), Hemisphere::Southern),
            northern_elevation: sun_elevation(self.latitude_deg, declination, Hemisphere::Northern),
            southern_elevation: sun_elevation(self.latitude_deg, declination, Hemisphere::Southern),
        }
    }
}

impl crate::Simulation for SeasonalOrbit {
    fn tick(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        self.day = wrap(self.day + dt * DAYS_PER_SECOND * self.speed, DAYS_PER_YEAR);
        self.spin = wrap(self.spin + dt * SEASONS_SPIN_RATE * self.speed.max(0.5), TAU);
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
