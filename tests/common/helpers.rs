use chrono::{DateTime, TimeZone, Utc};
use tracon::{
    components::{Aircraft, FlightPlan, Waypoint},
    resources::SimulationConfig,
    utils::LatLong,
};

use super::fixtures::create_test_reference;

/// Fixed wallclock origin so runs are comparable.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Seeded configuration with no pre-warm, so tests start from an empty sky.
pub fn create_test_config(seed: u64) -> SimulationConfig {
    SimulationConfig {
        seed: Some(seed),
        prespawn: false,
        ..Default::default()
    }
}

/// An A320 inbound to KAAA, tracked by the user, at `position`.
pub fn create_test_arrival(callsign: &str, position: LatLong) -> Aircraft {
    let perf = create_test_reference()
        .performance
        .get("A320")
        .cloned()
        .unwrap();
    let plan = FlightPlan {
        aircraft_type: "A320".to_string(),
        departure_airport: "KORD".to_string(),
        arrival_airport: "KAAA".to_string(),
        altitude: 39000,
        route: "STAR1".to_string(),
        ..Default::default()
    };
    let mut ac = Aircraft::new(callsign, plan, perf);
    ac.position = position;
    ac.altitude = 5000.0;
    ac.ias = 180.0;
    ac.tracking_controller = "APP".to_string();
    ac
}

pub fn waypoint(fix: &str, latitude: f64, longitude: f64) -> Waypoint {
    Waypoint::at(fix, LatLong::new(latitude, longitude))
}
