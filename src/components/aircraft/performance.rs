use serde::{Deserialize, Serialize};

/// Climb, descent and speed-change rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRates {
    /// Rated climb (ft/min).
    pub climb: f64,
    /// Rated descent (ft/min).
    pub descent: f64,
    /// Acceleration (kts per two seconds).
    pub accelerate: f64,
    /// Deceleration (kts per two seconds).
    pub decelerate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RunwayLengths {
    #[serde(default)]
    pub takeoff: f64,
    #[serde(default)]
    pub landing: f64,
}

/// Indicated airspeeds (kts).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSpeeds {
    pub min: f64,
    pub landing: f64,
    pub cruise: f64,
    pub max: f64,
}

/// Static performance envelope for one ICAO aircraft type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftPerformance {
    pub name: String,
    pub icao: String,
    #[serde(rename = "weightClass")]
    pub weight_class: String,
    pub ceiling: f64,
    pub rate: PerformanceRates,
    #[serde(default)]
    pub runway: RunwayLengths,
    pub speed: PerformanceSpeeds,
}

impl AircraftPerformance {
    /// Flight plan type string, with the `H/` or `J/` wake prefix for heavy and super types.
    pub fn flight_plan_type(&self) -> String {
        match self.weight_class.as_str() {
            "H" => format!("H/{}", self.icao),
            "J" => format!("J/{}", self.icao),
            _ => self.icao.clone(),
        }
    }

    /// Lowest indicated airspeed at which the aircraft is considered flying.
    pub fn airborne_speed(&self) -> f64 {
        crate::utils::AIRBORNE_SPEED_FACTOR * self.speed.min
    }

    /// Climb rate, less a margin for high performers once above 5,000 ft.
    pub fn climb_rate(&self, altitude: f64) -> f64 {
        use crate::utils::constants::{
            HIGH_PERFORMANCE_CLIMB, HIGH_PERFORMANCE_CLIMB_ALTITUDE,
            HIGH_PERFORMANCE_CLIMB_REDUCTION,
        };
        if self.rate.climb >= HIGH_PERFORMANCE_CLIMB && altitude > HIGH_PERFORMANCE_CLIMB_ALTITUDE
        {
            self.rate.climb - HIGH_PERFORMANCE_CLIMB_REDUCTION
        } else {
            self.rate.climb
        }
    }
}
