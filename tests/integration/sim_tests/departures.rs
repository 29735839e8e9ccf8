use approx::assert_relative_eq;
use tracon::{resources::SimEvent, utils::LatLong};

use crate::common::{
    assert_fleet_valid, create_test_config, TestSimBuilder, CHALLENGE_SCENARIO,
    DEPARTURE_SCENARIO,
};

#[test]
fn test_simple_departure() {
    let mut t = TestSimBuilder::new(DEPARTURE_SCENARIO)
        .with_launches(1)
        .build();

    t.step();
    let added = t.added();
    assert_eq!(added.len(), 1);
    let callsign = added[0].clone();
    {
        let ac = t.aircraft(&callsign);
        assert_eq!(ac.position, LatLong::new(40.0, -73.0));
        assert_relative_eq!(ac.altitude, 100.0);
        assert_eq!(ac.assigned_altitude, Some(5000));
        assert_eq!(ac.flight_plan.route, "DEP1 EAST J42");
        assert_eq!(ac.flight_plan.arrival_airport, "KBOS");
        assert_eq!(ac.scratchpad, "E");
        assert_eq!(ac.tracking_controller, "APP");
        assert!(ac.is_departure);
        assert!(ac.callsign.starts_with("JBU"));
    }

    // A320 climbs at 2000 ft/min
    t.run_seconds(60);
    let ac = t.aircraft(&callsign);
    assert_relative_eq!(ac.altitude, 2100.0, epsilon = 1e-6);
    assert!(ac.ias > 143.0);
    assert_eq!(t.sim.fleet_size(), 1);
    assert_eq!(t.sim.remaining_launches(), 0);
    assert_fleet_valid(&t.sim);
}

#[test]
fn test_challenge_keeps_exit_category() {
    let mut t = TestSimBuilder::new(CHALLENGE_SCENARIO)
        .with_launches(20)
        .build();
    t.run_seconds(40);

    let added = t.added();
    assert!(added.len() >= 10, "only {} launches", added.len());
    let categories: Vec<char> = added
        .iter()
        .map(|cs| t.aircraft(cs).scratchpad.chars().next().unwrap())
        .collect();
    assert!(
        categories.iter().all(|c| *c == categories[0]),
        "categories drifted: {:?}",
        categories
    );
}

#[test]
fn test_departures_culled_far_from_airport() {
    let config = tracon::resources::SimulationConfig {
        departure_cull_nm: 5.0,
        launches: 1,
        ..create_test_config(3)
    };
    let mut t = TestSimBuilder::new(DEPARTURE_SCENARIO)
        .with_config(config)
        .build();
    t.step();
    let callsign = t.added()[0].clone();

    t.run_seconds(240);
    assert!(t.sim.aircraft(&callsign).is_none());
    assert!(t.events.contains(&SimEvent::Removed { callsign }));
}

#[test]
fn test_radar_tracks_every_five_seconds() {
    let mut t = TestSimBuilder::new(DEPARTURE_SCENARIO)
        .with_launches(1)
        .build();
    t.step();
    let callsign = t.added()[0].clone();
    t.run_seconds(60);

    let ac = t.aircraft(&callsign);
    assert_eq!(ac.tracks.len(), 10);
    let times: Vec<i64> = ac.tracks.iter().map(|tr| tr.time.timestamp()).collect();
    assert!(times.windows(2).all(|w| w[1] - w[0] == 5));
}
