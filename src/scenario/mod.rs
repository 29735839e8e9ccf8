//! Scenario files: the airports, routes, approaches and traffic flows a
//! session is built from.

pub mod validate;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::components::{Approach, ApproachRef, WaypointList};
use crate::resources::WindConfig;
use crate::utils::{LatLong, NavFrame, SimError};

pub use validate::validate_scenario;

fn enabled_by_default() -> bool {
    true
}

/// A controller position other aircraft can be handed off to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controller {
    pub callsign: String,
    #[serde(default)]
    pub sector_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
}

/// Airline (and optionally fleet and origin) that flies a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineRef {
    pub icao: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fleet: Option<String>,
    /// Origin airport for arrivals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airport: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrival {
    pub name: String,
    pub waypoints: WaypointList,
    /// Replacement routes used when the keyed arrival runway is active.
    #[serde(default)]
    pub runway_waypoints: BTreeMap<String, WaypointList>,
    #[serde(default)]
    pub route: String,
    pub initial_controller: String,
    pub initial_altitude: i32,
    #[serde(default)]
    pub cleared_altitude: Option<i32>,
    pub initial_speed: i32,
    #[serde(default)]
    pub speed_restriction: Option<i32>,
    #[serde(default)]
    pub expect_approach: Option<String>,
    #[serde(default)]
    pub scratchpad: Option<String>,
    pub airlines: Vec<AirlineRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalGroup {
    pub name: String,
    /// Arrivals per hour.
    pub rate: f64,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub arrivals: Vec<Arrival>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Departure {
    pub exit: String,
    pub destination: String,
    #[serde(default)]
    pub altitude: Option<i32>,
    #[serde(default)]
    pub route: String,
    pub airlines: Vec<AirlineRef>,
    #[serde(skip)]
    pub exit_location: LatLong,
}

/// Initial procedure from a runway to an exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitRoute {
    /// Filed route text, e.g. the SID name.
    pub route: String,
    pub cleared_altitude: i32,
    pub waypoints: WaypointList,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartureRunway {
    pub runway: String,
    /// Field elevation at the runway (ft).
    pub altitude: i32,
    /// Departures per hour.
    pub rate: f64,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub challenge: Option<f64>,
    pub exit_routes: BTreeMap<String, ExitRoute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalRunway {
    pub runway: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    #[serde(rename = "ICAO")]
    pub icao: String,
    #[serde(default)]
    pub location: Option<LatLong>,
    /// Controller tracking departures at spawn.
    #[serde(default)]
    pub departure_controller: String,
    #[serde(default)]
    pub named_locations: BTreeMap<String, LatLong>,
    #[serde(default)]
    pub arrival_groups: Vec<ArrivalGroup>,
    #[serde(default)]
    pub approaches: Vec<Approach>,
    #[serde(default)]
    pub departures: Vec<Departure>,
    #[serde(default)]
    pub exit_categories: BTreeMap<String, String>,
    #[serde(default)]
    pub scratchpads: BTreeMap<String, String>,
    #[serde(default)]
    pub departure_runways: Vec<DepartureRunway>,
    #[serde(default)]
    pub arrival_runways: Vec<ArrivalRunway>,
}

impl Airport {
    /// Category of an exit; exits without one share the empty category.
    pub fn exit_category(&self, exit: &str) -> &str {
        self.exit_categories
            .get(exit)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn approach_index(&self, name: &str) -> Option<usize> {
        self.approaches
            .iter()
            .position(|a| a.short_name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// The user's controller callsign.
    pub callsign: String,
    #[serde(default)]
    pub magnetic_variation: f64,
    #[serde(default)]
    pub wind: WindConfig,
    #[serde(default)]
    pub center: Option<LatLong>,
    #[serde(default)]
    pub controllers: Vec<Controller>,
    pub airports: Vec<Airport>,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let scenario: Scenario = serde_json::from_reader(std::io::BufReader::new(file))?;
        info!(
            "loaded scenario {} with {} airports",
            path.display(),
            scenario.airports.len()
        );
        Ok(scenario)
    }

    pub fn airport(&self, icao: &str) -> Option<&Airport> {
        self.airports.iter().find(|ap| ap.icao == icao)
    }

    /// Match a controller by callsign or sector id.
    pub fn controller(&self, id: &str) -> Option<&Controller> {
        self.controllers
            .iter()
            .find(|c| c.callsign == id || (!c.sector_id.is_empty() && c.sector_id == id))
    }

    pub fn approach(&self, r: &ApproachRef) -> Option<&Approach> {
        self.airport(&r.airport)?.approaches.get(r.index)
    }

    /// Explicit center, or the mean of the airport locations.
    pub fn center(&self) -> LatLong {
        if let Some(c) = self.center {
            return c;
        }
        let located: Vec<LatLong> = self.airports.iter().filter_map(|ap| ap.location).collect();
        if located.is_empty() {
            return LatLong::default();
        }
        let n = located.len() as f64;
        LatLong::new(
            located.iter().map(|p| p.latitude).sum::<f64>() / n,
            located.iter().map(|p| p.longitude).sum::<f64>() / n,
        )
    }

    pub fn nav_frame(&self) -> NavFrame {
        NavFrame::centered_on(self.center(), self.magnetic_variation)
    }
}
