use approx::assert_abs_diff_eq;
use tracon::{components::Aircraft, Simulation};

/// Check the per-aircraft invariants that must hold after every tick.
#[track_caller]
pub fn assert_fleet_valid(sim: &Simulation) {
    for ac in sim.fleet() {
        assert!(
            (0.0..360.0).contains(&ac.heading),
            "{}: heading {} out of range",
            ac.callsign,
            ac.heading
        );
        assert!(
            ac.assigned_altitude.is_none() || ac.crossing_altitude.is_none(),
            "{}: both assigned and crossing altitude set",
            ac.callsign
        );
        assert!(
            ac.assigned_speed.is_none() || ac.crossing_speed.is_none(),
            "{}: both assigned and crossing speed set",
            ac.callsign
        );
        assert!(ac.altitude.is_finite(), "{}: altitude not finite", ac.callsign);
        assert!(ac.ias >= 0.0, "{}: negative airspeed", ac.callsign);
        assert!(
            ac.position.latitude.is_finite() && ac.position.longitude.is_finite(),
            "{}: position not finite",
            ac.callsign
        );
    }
}

/// Compare the fixes of an aircraft's pending route.
#[track_caller]
pub fn assert_fixes(ac: &Aircraft, expected: &[&str]) {
    let fixes: Vec<&str> = ac.waypoints.iter().map(|wp| wp.fix.as_str()).collect();
    assert_eq!(fixes, expected, "{}: unexpected route", ac.callsign);
}

/// Headings compared across the 0/360 seam.
#[track_caller]
pub fn assert_heading_near(actual: f64, expected: f64, tolerance: f64) {
    let diff = (actual - expected + 540.0).rem_euclid(360.0) - 180.0;
    assert_abs_diff_eq!(diff, 0.0, epsilon = tolerance);
}
