//! The set of simulations and which one is on screen

use std::fmt;
use std::str::FromStr;

use lab_physics::{BarycenterSystem, OpticsBench, SeasonalOrbit, Simulation, SolarSystem};
use serde::{Deserialize, Serialize};
use wave_simulation::WaveSimulation;

/// Catalog entries, identified by their kebab-case id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Model {
    #[default]
    SlinkyLab,
    ThinLensLab,
    ConcaveMirror,
    BarycenterLab,
    EarthSeasons,
    SolarSystem,
}

impl Model {
    pub const ALL: [Model; 6] = [
        Model::SlinkyLab,
        Model::ThinLensLab,
        Model::ConcaveMirror,
        Model::BarycenterLab,
        Model::EarthSeasons,
        Model::SolarSystem,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Model::SlinkyLab => "slinky-lab",
            Model::ThinLensLab => "thin-lens-lab",
            Model::ConcaveMirror => "concave-mirror",
            Model::BarycenterLab => "barycenter-lab",
            Model::EarthSeasons => "earth-seasons",
            Model::SolarSystem => "solar-system",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Model::SlinkyLab => "Slinky Wave Lab",
            Model::ThinLensLab => "Thin Lens Lab",
            Model::ConcaveMirror => "Mirror Lab",
            Model::BarycenterLab => "Gravity Lab: Barycenter",
            Model::EarthSeasons => "Earth Seasons & Tilt",
            Model::SolarSystem => "Solar System Explorer",
        }
    }

    /// Whether the model is drawn with the 3D orbit camera
    pub fn is_orbital(self) -> bool {
        matches!(
            self,
            Model::BarycenterLab | Model::EarthSeasons | Model::SolarSystem
        )
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModel(pub String);

impl fmt::Display for UnknownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = Model::ALL.iter().map(|m| m.id()).collect();
        write!(f, "unknown model '{}', expected one of: {}", self.0, ids.join(", "))
    }
}

impl std::error::Error for UnknownModel {}

impl FromStr for Model {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Model::ALL
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownModel(wanted.to_string()))
    }
}

/// One instance of every simulation. Only the active one advances.
#[derive(Debug, Clone)]
pub struct Lab {
    active: Model,
    pub wave: WaveSimulation,
    pub lens: OpticsBench,
    pub mirror: OpticsBench,
    pub barycenter: BarycenterSystem,
    pub seasons: SeasonalOrbit,
    pub solar: SolarSystem,
}

impl Lab {
    pub fn new(active: Model) -> Self {
        Self {
            active,
            wave: WaveSimulation::default(),
            lens: OpticsBench::lens(),
            mirror: OpticsBench::mirror(),
            barycenter: BarycenterSystem::default(),
            seasons: SeasonalOrbit::default(),
            solar: SolarSystem::new(),
        }
    }

    pub fn active(&self) -> Model {
        self.active
    }

    pub fn select(&mut self, model: Model) {
        if model != self.active {
            log::info!("switching to {} ({})", model.title(), model);
            self.active = model;
        }
    }

    /// The active simulation behind the common tick interface
    pub fn active_simulation(&mut self) -> &mut dyn Simulation {
        match self.active {
            Model::SlinkyLab => &mut self.wave,
            Model::ThinLensLab => &mut self.lens,
            Model::ConcaveMirror => &mut self.mirror,
            Model::BarycenterLab => &mut self.barycenter,
            Model::EarthSeasons => &mut self.seasons,
            Model::SolarSystem => &mut self.solar,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.active_simulation().tick(dt);
    }

    pub fn reset_active(&mut self) {
        log::debug!("resetting {}", self.active);
        self.active_simulation().reset();
    }

    /// The optics bench for the active model, if it is an optics model
    pub fn bench_mut(&mut self) -> Option<&mut OpticsBench> {
        match self.active {
            Model::ThinLensLab => Some(&mut self.lens),
            Model::ConcaveMirror => Some(&mut self.mirror),
            _ => None,
        }
    }
}

impl Default for Lab {
    fn default() -> Self {
        Self::new(Model::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_ids_round_trip() {
        for model in Model::ALL {
            assert_eq!(model.id().parse::<Model>(), Ok(model));
            assert_eq!(model.to_string(), model.id());
        }
        assert_eq!(" Solar-System ".parse::<Model>(), Ok(Model::SolarSystem));
    }

    #[test]
    fn test_unknown_model() {
        let err = "quantum-foam".parse::<Model>().unwrap_err();
        assert_eq!(err, UnknownModel("quantum-foam".to_string()));
        assert!(err.to_string().contains("slinky-lab"));
    }

    #[test]
    fn test_serde_ids() {
        let json = serde_json::to_string(&Model::ThinLensLab).unwrap();
        assert_eq!(json, "\"thin-lens-lab\"");
        let model: Model = serde_json::from_str("\"earth-seasons\"").unwrap();
        assert_eq!(model, Model::EarthSeasons);
    }

    #[test]
    fn test_only_active_model_ticks() {
        let mut lab = Lab::new(Model::SlinkyLab);
        lab.barycenter.set_speed(1.0);
        lab.tick(1.0);
        assert_eq!(lab.barycenter.phase, 0.0);
        assert!(lab.wave.step_count() > 0);

        lab.select(Model::BarycenterLab);
        let steps = lab.wave.step_count();
        lab.tick(1.0);
        assert!(lab.barycenter.phase > 0.0);
        assert_eq!(lab.wave.step_count(), steps);
    }

    #[test]
    fn test_reset_active_only() {
        let mut lab = Lab::new(Model::SolarSystem);
        lab.tick(2.0);
        lab.select(Model::BarycenterLab);
        lab.tick(2.0);
        lab.reset_active();
        assert_eq!(lab.barycenter.phase, 0.0);
        assert_eq!(lab.solar.elapsed(), 2.0);
    }

    #[test]
    fn test_bench_for_optics_models() {
        let mut lab = Lab::new(Model::ConcaveMirror);
        assert!(lab.bench_mut().is_some_and(|b| b.is_mirror_bench()));
        lab.select(Model::EarthSeasons);
        assert!(lab.bench_mut().is_none());
    }
}
