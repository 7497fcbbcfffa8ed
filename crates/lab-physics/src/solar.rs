//! Toy solar system: eight planets on circular, coplanar orbits
//!
//! Sizes, distances and speeds are relative and hand-picked for the scene.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::constants::SOLAR_ANGULAR_SCALE;

/// Fact sheet shown when a planet is selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanetStats {
    pub mass: &'static str,
    pub gravity: &'static str,
    pub temperature: &'static str,
    pub diameter: &'static str,
    pub moons: &'static str,
    pub day: &'static str,
    pub year: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Planet {
    pub id: &'static str,
    pub name: &'static str,
    /// sRGB
    pub color: [u8; 3],
    /// Relative radius
    pub size: f32,
    /// Orbit radius
    pub distance: f32,
    /// Relative orbit speed
    pub speed: f32,
    pub description: &'static str,
    pub stats: PlanetStats,
}

/// Radius of the sun sphere
pub const SUN_RADIUS: f32 = 4.0;

pub const PLANET_COUNT: usize = 8;

pub static PLANETS: [Planet; PLANET_COUNT] = [
    Planet {
        id: "mercury",
        name: "Mercury",
        color: [0x94, 0xa3, 0xb8],
        size: 0.8,
        distance: 10.0,
        speed: 1.5,
        description: "The smallest planet in our solar system and closest to the Sun. It zips around the Sun faster than any other planet.",
        stats: PlanetStats {
            mass: "0.33 x 10^24 kg",
            gravity: "3.7 m/s²",
            temperature: "167°C",
            diameter: "4,879 km",
            moons: "0",
            day: "59 Earth days",
            year: "88 Earth days",
        },
    },
    Planet {
        id: "venus",
        name: "Venus",
        color: [0xfd, 0xe0, 0x47],
        size: 1.5,
        distance: 15.0,
        speed: 1.2,
        description: "Spins in the opposite direction to most planets and is the hottest planet due to its thick atmosphere.",
        stats: PlanetStats {
            mass: "4.87 x 10^24 kg",
            gravity: "8.87 m/s²",
            temperature: "464°C",
            diameter: "12,104 km",
            moons: "0",
            day: "243 Earth days",
            year: "225 Earth days",
        },
    },
    Planet {
        id: "earth",
        name: "Earth",
        color: [0x3b, 0x82, 0xf6],
        size: 1.6,
        distance: 22.0,
        speed: 1.0,
        description: "Our home planet, the only place we know of so far that's inhabited by living things.",
        stats: PlanetStats {
            mass: "5.97 x 10^24 kg",
            gravity: "9.8 m/s²",
            temperature: "15°C",
            diameter: "12,742 km",
            moons: "1",
            day: "24 hours",
            year: "365 days",
        },
    },
    Planet {
        id: "mars",
        name: "Mars",
        color: [0xef, 0x44, 0x44],
        size: 1.1,
        distance: 30.0,
        speed: 0.8,
        description: "A dusty, cold, desert world with a very thin atmosphere. It is known as the Red Planet.",
        stats: PlanetStats {
            mass: "0.64 x 10^24 kg",
            gravity: "3.71 m/s²",
            temperature: "-65°C",
            diameter: "6,779 km",
            moons: "2",
            day: "24.6 hours",
            year: "687 days",
        },
    },
    Planet {
        id: "jupiter",
        name: "Jupiter",
        color: [0xd9, 0x77, 0x06],
        size: 4.5,
        distance: 45.0,
        speed: 0.5,
        description: "More than twice as massive as all the other planets combined. The Great Red Spot is a centuries-old storm.",
        stats: PlanetStats {
            mass: "1898 x 10^24 kg",
            gravity: "24.79 m/s²",
            temperature: "-110°C",
            diameter: "139,820 km",
            moons: "95",
            day: "9.9 hours",
            year: "11.9 Earth years",
        },
    },
    Planet {
        id: "saturn",
        name: "Saturn",
        color: [0xfc, 0xd3, 0x4d],
        size: 3.8,
        distance: 65.0,
        speed: 0.4,
        description: "Adorned with a dazzling, complex system of icy rings. It is a gas giant made mostly of hydrogen and helium.",
        stats: PlanetStats {
            mass: "568 x 10^24 kg",
            gravity: "10.44 m/s²",
            temperature: "-140°C",
            diameter: "116,460 km",
            moons: "146",
            day: "10.7 hours",
            year: "29.4 Earth years",
        },
    },
    Planet {
        id: "uranus",
        name: "Uranus",
        color: [0x22, 0xd3, 0xee],
        size: 2.5,
        distance: 85.0,
        speed: 0.3,
        description: "Rotates at a nearly 90-degree angle from the plane of its orbit. It has a blue-green color from methane.",
        stats: PlanetStats {
            mass: "86.8 x 10^24 kg",
            gravity: "8.69 m/s²",
            temperature: "-195°C",
            diameter: "50,724 km",
            moons: "28",
            day: "17 hours",
            year: "84 Earth years",
        },
    },
    Planet {
        id: "neptune",
        name: "Neptune",
        color: [0x3b, 0x82, 0xf6],
        size: 2.4,
        distance: 105.0,
        speed: 0.2,
        description: "The first planet located through mathematical calculations. Dark, cold, and whipped by supersonic winds.",
        stats: PlanetStats {
            mass: "102 x 10^24 kg",
            gravity: "11.15 m/s²",
            temperature: "-200°C",
            diameter: "49,244 km",
            moons: "16",
            day: "16 hours",
            year: "165 Earth years",
        },
    },
];

/// Orbiting planets with random start angles and an optional selection
#[derive(Debug, Clone)]
pub struct SolarSystem {
    elapsed: f32,
    start_angles: [f32; PLANET_COUNT],
    selected: Option<usize>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::with_rng(&mut rand::rng())
    }

    /// Start angles are drawn from `rng`, so a seeded generator gives a fixed layout
    pub fn with_rng<R: Rng>(rng: &mut R) -> Self {
        let mut start_angles = [0.0; PLANET_COUNT];
        for angle in &mut start_angles {
            *angle = rng.random::<f32>() * TAU;
        }
        Self {
            elapsed: 0.0,
            start_angles,
            selected: None,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Orbit angle of planet `index` in radians, `None` past the last planet
    pub fn angle(&self, index: usize) -> Option<f32> {
        let planet = PLANETS.get(index)?;
        Some(self.elapsed * planet.speed * SOLAR_ANGULAR_SCALE + self.start_angles[index])
    }

    /// Position of planet `index` in the ecliptic (XZ) plane
    pub fn position(&self, index: usize) -> Option<Vec3> {
        let angle = self.angle(index)?;
        let distance = PLANETS[index].distance;
        Some(Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance))
    }

    pub fn positions(&self) -> impl Iterator<Item = (&'static Planet, Vec3)> + '_ {
        PLANETS
            .iter()
            .enumerate()
            .filter_map(move |(i, planet)| Some((planet, self.position(i)?)))
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_planet(&self) -> Option<&'static Planet> {
        self.selected.map(|i| &PLANETS[i])
    }

    /// Select by index; out-of-range indices clear the selection
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < PLANET_COUNT);
    }

    pub fn select_by_id(&mut self, id: &str) -> bool {
        let index = PLANETS.iter().position(|p| p.id.eq_ignore_ascii_case(id));
        if index.is_some() {
            self.selected = index;
        }
        index.is_some()
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl crate::Simulation for SolarSystem {
    fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
        self.selected = None;
    }
}
