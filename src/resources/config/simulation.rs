use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::environment::WindConfig;
use crate::utils::SimError;

/// Per-runway departure settings layered over the scenario.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DepartureRunwayOverride {
    pub airport: String,
    pub runway: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Departures per hour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<f64>,
    /// Exit categories that should not be launched from this runway.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_categories: Vec<String>,
}

/// Per-arrival-group settings layered over the scenario.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArrivalGroupOverride {
    pub airport: String,
    pub group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Arrivals per hour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

/// Run parameters for a training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for all traffic randomness; drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Sim seconds per wallclock second.
    pub sim_rate: f64,
    /// Total aircraft the spawner may launch.
    pub launches: u32,
    /// Challenge used by runways that do not set their own.
    pub departure_challenge: f64,
    /// Run 45 seconds of traffic before the session starts.
    pub prespawn: bool,
    /// Radar returns kept per aircraft.
    pub track_history: usize,
    /// Departures further than this from their airport are removed (nm).
    pub departure_cull_nm: f64,
    pub wind: Option<WindConfig>,
    pub departure_runways: Vec<DepartureRunwayOverride>,
    pub arrival_groups: Vec<ArrivalGroupOverride>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            sim_rate: 1.0,
            launches: 30,
            departure_challenge: 0.25,
            prespawn: true,
            track_history: 10,
            departure_cull_nm: 200.0,
            wind: None,
            departure_runways: Vec::new(),
            arrival_groups: Vec::new(),
        }
    }
}

impl SimulationConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let file = std::fs::File::open(path)?;
        let config: SimulationConfig = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    /// `<config dir>/tracon/sim.yaml`, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tracon").join("sim.yaml"))
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.sim_rate.is_finite() && self.sim_rate > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "sim_rate must be positive, got {}",
                self.sim_rate
            )));
        }
        let challenges = std::iter::once(self.departure_challenge)
            .chain(self.departure_runways.iter().filter_map(|r| r.challenge));
        for c in challenges {
            if !(0.0..=1.0).contains(&c) {
                return Err(SimError::InvalidConfig(format!(
                    "departure challenge must be in [0, 1], got {}",
                    c
                )));
            }
        }
        let rates = self
            .departure_runways
            .iter()
            .filter_map(|r| r.rate)
            .chain(self.arrival_groups.iter().filter_map(|g| g.rate));
        for rate in rates {
            if !(rate.is_finite() && rate >= 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "spawn rate must be non-negative, got {}",
                    rate
                )));
            }
        }
        Ok(())
    }

    pub fn departure_runway(&self, airport: &str, runway: &str) -> Option<&DepartureRunwayOverride> {
        self.departure_runways
            .iter()
            .find(|r| r.airport == airport && r.runway == runway)
    }

    pub fn arrival_group(&self, airport: &str, group: &str) -> Option<&ArrivalGroupOverride> {
        self.arrival_groups
            .iter()
            .find(|g| g.airport == airport && g.group == group)
    }
}
