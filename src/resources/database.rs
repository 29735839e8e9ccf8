use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::components::AircraftPerformance;
use crate::utils::{LatLong, SimError};

/// Anything that can turn a name into a location.
pub trait Locator {
    fn locate(&self, name: &str) -> Option<LatLong>;
}

impl Locator for BTreeMap<String, LatLong> {
    fn locate(&self, name: &str) -> Option<LatLong> {
        self.get(name).copied()
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, SimError> {
    let file = std::fs::File::open(path)?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}

/// Performance envelopes keyed by ICAO type.
#[derive(Debug, Clone, Default)]
pub struct PerformanceDb {
    aircraft: BTreeMap<String, AircraftPerformance>,
}

#[derive(Deserialize)]
struct RawPerformanceDb {
    aircraft: Vec<AircraftPerformance>,
}

impl PerformanceDb {
    pub fn from_records(records: impl IntoIterator<Item = AircraftPerformance>) -> Self {
        Self {
            aircraft: records
                .into_iter()
                .map(|perf| (perf.icao.clone(), perf))
                .collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let raw: RawPerformanceDb = serde_json::from_str(json)?;
        Ok(Self::from_records(raw.aircraft))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let raw: RawPerformanceDb = read_json(path.as_ref())?;
        let db = Self::from_records(raw.aircraft);
        info!("loaded {} aircraft performance records", db.len());
        Ok(db)
    }

    pub fn get(&self, icao: &str) -> Option<&AircraftPerformance> {
        self.aircraft.get(icao)
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }
}

/// One `[icao, count]` entry of an airline fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, u32)", into = "(String, u32)")]
pub struct FleetEntry {
    pub icao: String,
    pub count: u32,
}

impl From<(String, u32)> for FleetEntry {
    fn from((icao, count): (String, u32)) -> Self {
        Self { icao, count }
    }
}

impl From<FleetEntry> for (String, u32) {
    fn from(entry: FleetEntry) -> Self {
        (entry.icao, entry.count)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CallsignFormats {
    #[serde(default, alias = "callsignFormats")]
    pub formats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airline {
    pub icao: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub callsign: CallsignFormats,
    #[serde(default)]
    pub fleets: BTreeMap<String, Vec<FleetEntry>>,
}

pub const DEFAULT_FLEET: &str = "default";

impl Airline {
    /// The named fleet, or the `default` fleet when no name is given.
    pub fn fleet(&self, name: Option<&str>) -> Option<&[FleetEntry]> {
        self.fleets
            .get(name.unwrap_or(DEFAULT_FLEET))
            .map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AirlineDb {
    airlines: BTreeMap<String, Airline>,
}

#[derive(Deserialize)]
struct RawAirlineDb {
    airlines: Vec<Airline>,
}

impl AirlineDb {
    pub fn from_records(records: impl IntoIterator<Item = Airline>) -> Self {
        Self {
            airlines: records
                .into_iter()
                .map(|al| (al.icao.to_uppercase(), al))
                .collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let raw: RawAirlineDb = serde_json::from_str(json)?;
        Ok(Self::from_records(raw.airlines))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let raw: RawAirlineDb = read_json(path.as_ref())?;
        let db = Self::from_records(raw.airlines);
        info!("loaded {} airlines", db.len());
        Ok(db)
    }

    pub fn get(&self, icao: &str) -> Option<&Airline> {
        self.airlines.get(&icao.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.airlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airlines.is_empty()
    }
}

/// Global fixes, navaids and airports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavDatabase {
    #[serde(default)]
    pub fixes: BTreeMap<String, LatLong>,
    #[serde(default)]
    pub navaids: BTreeMap<String, LatLong>,
    #[serde(default)]
    pub airports: BTreeMap<String, LatLong>,
}

impl NavDatabase {
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let db: NavDatabase = read_json(path.as_ref())?;
        info!(
            "loaded {} fixes, {} navaids, {} airports",
            db.fixes.len(),
            db.navaids.len(),
            db.airports.len()
        );
        Ok(db)
    }
}

impl Locator for NavDatabase {
    fn locate(&self, name: &str) -> Option<LatLong> {
        self.fixes
            .get(name)
            .or_else(|| self.navaids.get(name))
            .or_else(|| self.airports.get(name))
            .copied()
    }
}

/// The read-only reference data a simulation is built against.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub performance: PerformanceDb,
    pub airlines: AirlineDb,
    pub nav: NavDatabase,
}
