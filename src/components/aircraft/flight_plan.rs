use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlightRules {
    #[default]
    #[serde(rename = "IFR")]
    Ifr,
    #[serde(rename = "VFR")]
    Vfr,
}

/// Filed flight plan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlightPlan {
    pub rules: FlightRules,
    /// ICAO type, possibly carrying an `H/` or `J/` wake prefix.
    pub aircraft_type: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    /// Filed cruise altitude (ft).
    pub altitude: i32,
    pub route: String,
}

impl FlightPlan {
    /// Aircraft type with any wake prefix or equipment suffix removed.
    pub fn base_type(&self) -> &str {
        let t = self.aircraft_type.as_str();
        let t = t
            .strip_prefix("H/")
            .or_else(|| t.strip_prefix("J/"))
            .unwrap_or(t);
        t.split('/').next().unwrap_or(t)
    }
}
