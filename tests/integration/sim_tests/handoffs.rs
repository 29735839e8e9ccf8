use pretty_assertions::assert_eq;
use tracon::{resources::SimEvent, utils::LatLong};

use crate::common::{create_test_arrival, TestSimBuilder, APPROACH_SCENARIO, BUSY_SCENARIO};

#[test]
fn test_handoff_auto_accept() {
    let mut t = TestSimBuilder::new(APPROACH_SCENARIO).build();
    t.add(create_test_arrival("JBU10", LatLong::new(39.5, -73.5)));

    t.sim.handoff("JBU10", "BOS").unwrap();
    assert_eq!(t.aircraft("JBU10").outbound_handoff_controller, "BOS");
    let offered = t.sim.now();

    let accepted = SimEvent::AcceptedHandoff {
        callsign: "JBU10".to_string(),
        controller: "BOS".to_string(),
    };
    let steps = t.run_until(15, |_| false);
    assert!(steps.is_none());
    assert_eq!(t.events.iter().filter(|e| **e == accepted).count(), 1);

    let ac = t.aircraft("JBU10");
    assert_eq!(ac.tracking_controller, "BOS");
    assert_eq!(ac.outbound_handoff_controller, "");
    assert!(t.sim.handoff_deadline("JBU10").is_none());

    // Replay to find the exact second it fired
    let mut t = TestSimBuilder::new(APPROACH_SCENARIO).build();
    t.add(create_test_arrival("JBU10", LatLong::new(39.5, -73.5)));
    t.sim.handoff("JBU10", "BOS").unwrap();
    let steps = t
        .run_until(15, |sim| sim.aircraft("JBU10").unwrap().tracking_controller == "BOS")
        .unwrap();
    assert!((2..=11).contains(&steps), "accepted after {} s", steps);
    assert_eq!(t.sim.now() - offered, chrono::Duration::seconds(steps as i64));
}

#[test]
fn test_handoff_by_sector_id() {
    let mut t = TestSimBuilder::new(APPROACH_SCENARIO).build();
    t.add(create_test_arrival("JBU10", LatLong::new(39.5, -73.5)));
    t.sim.handoff("JBU10", "B").unwrap();
    assert_eq!(t.aircraft("JBU10").outbound_handoff_controller, "BOS");
}

#[test]
fn test_drop_track_cancels_pending_handoff() {
    let mut t = TestSimBuilder::new(APPROACH_SCENARIO).build();
    t.add(create_test_arrival("JBU10", LatLong::new(39.5, -73.5)));
    t.sim.handoff("JBU10", "BOS").unwrap();
    t.sim.drop_track("JBU10").unwrap();
    t.run_seconds(15);

    let ac = t.aircraft("JBU10");
    assert_eq!(ac.tracking_controller, "");
    assert!(!t
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::AcceptedHandoff { .. })));

    t.sim.initiate_track("JBU10").unwrap();
    assert_eq!(t.aircraft("JBU10").tracking_controller, "APP");
}

#[test]
fn test_arrival_offered_to_user_at_spawn() {
    let mut t = TestSimBuilder::new(BUSY_SCENARIO).with_launches(10).build();
    t.run_seconds(20);

    let arrival = t
        .sim
        .fleet()
        .find(|ac| !ac.is_departure)
        .map(|ac| ac.callsign.clone())
        .expect("no arrival launched");
    {
        let ac = t.aircraft(&arrival);
        assert_eq!(ac.tracking_controller, "BOS");
        assert_eq!(ac.inbound_handoff_controller, "APP");
        assert_eq!(ac.crossing_altitude, Some(6000));
        assert_eq!(ac.crossing_speed, Some(250));
    }
    assert!(t.events.contains(&SimEvent::OfferedHandoff {
        callsign: arrival.clone(),
        from: "BOS".to_string(),
        to: "APP".to_string(),
    }));

    t.sim.accept_handoff(&arrival).unwrap();
    let ac = t.aircraft(&arrival);
    assert_eq!(ac.tracking_controller, "APP");
    assert_eq!(ac.inbound_handoff_controller, "");
}
