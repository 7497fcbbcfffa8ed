//! Lab configuration file.
//!
//! Every field is optional; anything left out keeps the simulation's own
//! default. The file is applied once at startup.

use std::fs;
use std::path::Path;

use lab_physics::{Body, ElementKind, ReferenceFrame, PLANETS};
use serde::{Deserialize, Serialize};
use wave_simulation::WaveMode;

use crate::error::ConfigError;
use crate::lab::{Lab, Model};

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    800
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WaveModeConfig {
    Transverse,
    Longitudinal,
}

impl From<WaveModeConfig> for WaveMode {
    fn from(mode: WaveModeConfig) -> Self {
        match mode {
            WaveModeConfig::Transverse => WaveMode::Transverse,
            WaveModeConfig::Longitudinal => WaveMode::Longitudinal,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WaveConfig {
    pub mode: Option<WaveModeConfig>,
    pub tension: Option<f32>,
    pub damping: Option<f32>,
    pub frequency: Option<f32>,
    pub substeps: Option<u32>,
    /// Start with the sinusoidal driver running
    pub auto: Option<bool>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ElementConfig {
    Convex,
    Concave,
    Plane,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BenchConfig {
    pub element: Option<ElementConfig>,
    /// Focal length magnitude; the element type gives the sign
    pub focal_length: Option<f32>,
    pub object_distance: Option<f32>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FrameConfig {
    Barycentric,
    Earth,
    Moon,
}

impl From<FrameConfig> for ReferenceFrame {
    fn from(frame: FrameConfig) -> Self {
        match frame {
            FrameConfig::Barycentric => ReferenceFrame::Barycentric,
            FrameConfig::Earth => ReferenceFrame::BodyFixed(Body::Primary),
            FrameConfig::Moon => ReferenceFrame::BodyFixed(Body::Secondary),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BarycenterConfig {
    pub mass_multiplier: Option<f32>,
    pub speed: Option<f32>,
    pub frame: Option<FrameConfig>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeasonsConfig {
    pub day: Option<f32>,
    pub speed: Option<f32>,
    pub latitude: Option<f32>,
    pub playing: Option<bool>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolarConfig {
    /// Planet id to select at startup
    pub selected: Option<String>,
}

/// Complete lab configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LabConfig {
    pub model: Option<Model>,
    pub window: WindowConfig,
    pub wave: WaveConfig,
    pub lens: BenchConfig,
    pub mirror: BenchConfig,
    pub barycenter: BarycenterConfig,
    pub seasons: SeasonsConfig,
    pub solar: SolarConfig,
}

fn check_finite(name: &str, value: Option<f32>) -> Result<(), ConfigError> {
    match value {
        Some(v) if !v.is_finite() => Err(ConfigError::Invalid(format!(
            "{} must be a finite number",
            name
        ))),
        _ => Ok(()),
    }
}

fn check_positive(name: &str, value: Option<f32>) -> Result<(), ConfigError> {
    check_finite(name, value)?;
    match value {
        Some(v) if v <= 0.0 => Err(ConfigError::Invalid(format!(
            "{} must be positive, got {}",
            name, v
        ))),
        _ => Ok(()),
    }
}

impl LabConfig {
    /// Load and validate a configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: LabConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(
                "window size must be non-zero".to_string(),
            ));
        }

        check_positive("wave.tension", self.wave.tension)?;
        check_finite("wave.damping", self.wave.damping)?;
        if self.wave.damping.is_some_and(|d| d < 0.0) {
            return Err(ConfigError::Invalid(
                "wave.damping must not be negative".to_string(),
            ));
        }
        check_finite("wave.frequency", self.wave.frequency)?;
        if let Some(substeps) = self.wave.substeps {
            if !(1..=16).contains(&substeps) {
                return Err(ConfigError::Invalid(format!(
                    "wave.substeps must be between 1 and 16, got {}",
                    substeps
                )));
            }
        }

        for (name, bench) in [("lens", &self.lens), ("mirror", &self.mirror)] {
            check_positive(&format!("{}.focal_length", name), bench.focal_length)?;
            check_positive(&format!("{}.object_distance", name), bench.object_distance)?;
        }
        if self.lens.element == Some(ElementConfig::Plane) {
            return Err(ConfigError::Invalid(
                "lens.element cannot be a plane".to_string(),
            ));
        }

        check_positive("barycenter.mass_multiplier", self.barycenter.mass_multiplier)?;
        check_finite("barycenter.speed", self.barycenter.speed)?;
        check_finite("seasons.day", self.seasons.day)?;
        check_finite("seasons.speed", self.seasons.speed)?;
        check_finite("seasons.latitude", self.seasons.latitude)?;

        if let Some(id) = &self.solar.selected {
            if !PLANETS.iter().any(|p| p.id.eq_ignore_ascii_case(id)) {
                return Err(ConfigError::Invalid(format!("unknown planet '{}'", id)));
            }
        }
        Ok(())
    }

    /// Push the configured values into the simulations
    pub fn apply(&self, lab: &mut Lab) {
        if let Some(model) = self.model {
            lab.select(model);
        }

        let wave = &self.wave;
        let mut params = *lab.wave.params();
        params.tension = wave.tension.unwrap_or(params.tension);
        params.damping = wave.damping.unwrap_or(params.damping);
        params.frequency = wave.frequency.unwrap_or(params.frequency);
        params.substeps = wave.substeps.unwrap_or(params.substeps);
        lab.wave.set_params(params);
        if let Some(mode) = wave.mode {
            lab.wave.set_mode(mode.into());
        }
        if let Some(auto) = wave.auto {
            lab.wave.set_auto(auto);
        }

        apply_bench(&self.lens, false, &mut lab.lens);
        apply_bench(&self.mirror, true, &mut lab.mirror);

        let barycenter = &self.barycenter;
        if let Some(multiplier) = barycenter.mass_multiplier {
            lab.barycenter.set_mass_multiplier(multiplier);
        }
        if let Some(speed) = barycenter.speed {
            lab.barycenter.set_speed(speed);
        }
        if let Some(frame) = barycenter.frame {
            lab.barycenter.frame = frame.into();
        }

        let seasons = &self.seasons;
        if let Some(latitude) = seasons.latitude {
            lab.seasons.latitude_deg = latitude;
        }
        if let Some(speed) = seasons.speed {
            lab.seasons.set_speed(speed);
        }
        if let Some(day) = seasons.day {
            lab.seasons.set_day(day);
        }
        if let Some(playing) = seasons.playing {
            lab.seasons.playing = playing;
        }

        if let Some(id) = &self.solar.selected {
            lab.solar.select_by_id(id);
        }
        log::debug!("config applied");
    }
}

fn apply_bench(config: &BenchConfig, mirror: bool, bench: &mut lab_physics::OpticsBench) {
    if let Some(element) = config.element {
        let kind = match (mirror, element) {
            (false, ElementConfig::Convex) => ElementKind::ConvexLens,
            (false, _) => ElementKind::ConcaveLens,
            (true, ElementConfig::Concave) => ElementKind::ConcaveMirror,
            (true, ElementConfig::Convex) => ElementKind::ConvexMirror,
            (true, ElementConfig::Plane) => ElementKind::PlaneMirror,
        };
        bench.set_kind(kind);
    }
    if let Some(focal) = config.focal_length {
        bench.set_focal_magnitude(focal);
    }
    if let Some(distance) = config.object_distance {
        bench.set_object_distance(distance);
    }
}
