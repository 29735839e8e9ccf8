use chrono::Duration;
use std::collections::BTreeSet;
use tracon::{
    components::{Aircraft, TurnDirection},
    resources::SimEvent,
    utils::LatLong,
};

use crate::common::{
    assert_fleet_valid, create_test_arrival, t0, waypoint, TestSimBuilder, APPROACH_SCENARIO,
    BUSY_SCENARIO,
};

fn snapshot(sim: &tracon::Simulation) -> Vec<Aircraft> {
    sim.fleet().cloned().collect()
}

#[test]
fn test_busy_traffic_keeps_invariants() {
    let mut t = TestSimBuilder::new(BUSY_SCENARIO)
        .with_prespawn(true)
        .with_launches(40)
        .with_seed(11)
        .build();
    assert!(t.sim.fleet_size() > 0, "prespawn launched nothing");

    let mut live: BTreeSet<String> = t.sim.fleet().map(|ac| ac.callsign.clone()).collect();
    for _ in 0..900 {
        t.step();
        assert_fleet_valid(&t.sim);
        for event in t.take_events() {
            match event {
                SimEvent::Added { callsign } => {
                    assert!(live.insert(callsign.clone()), "{} launched twice", callsign)
                }
                SimEvent::Removed { callsign } => {
                    live.remove(&callsign);
                }
                _ => {}
            }
        }
    }
    let fleet: BTreeSet<String> = t.sim.fleet().map(|ac| ac.callsign.clone()).collect();
    assert_eq!(live, fleet);
}

#[test]
fn test_pause_is_idempotent() {
    let mut t = TestSimBuilder::new(BUSY_SCENARIO)
        .with_prespawn(true)
        .build();
    t.run_seconds(10);
    t.take_events();

    t.sim.toggle_pause(t.wallclock);
    assert!(t.sim.is_paused());
    let before = snapshot(&t.sim);
    let now = t.sim.now();

    t.advance(Duration::seconds(30));
    t.advance(Duration::seconds(300));
    assert_eq!(snapshot(&t.sim), before);
    assert_eq!(t.sim.now(), now);
    assert!(t.take_events().is_empty());

    // Time spent paused is never simulated
    t.sim.toggle_pause(t.wallclock);
    t.step();
    assert_eq!(t.sim.now() - now, Duration::seconds(1));
}

#[test]
fn test_rate_scaling() {
    let mut t = TestSimBuilder::new(BUSY_SCENARIO).with_rate(4.0).build();
    t.advance(Duration::seconds(10));
    assert_eq!(t.sim.now() - t0(), Duration::seconds(40));

    t.sim.set_sim_rate(0.5);
    t.advance(Duration::milliseconds(250));
    assert_eq!(t.sim.now() - t0(), Duration::milliseconds(40_125));
}

#[test]
fn test_catch_up_flies_every_second() {
    // One 4 s tick must fly the same as four 1 s ticks
    let build = || {
        let mut t = TestSimBuilder::new(APPROACH_SCENARIO).build();
        let mut ac = create_test_arrival("JBU1", LatLong::new(39.7, -73.3));
        ac.waypoints = vec![waypoint("KRSTL", 39.882149, -73.153844).with_altitude(3000)];
        t.add(ac);
        let mut ac = create_test_arrival("DAL2", LatLong::new(39.9, -72.8));
        ac.heading = 250.0;
        ac.assigned_heading = Some(200.0);
        ac.turn_direction = TurnDirection::Right;
        t.add(ac);
        t
    };
    let mut coarse = build();
    let mut fine = build();
    coarse.advance(Duration::seconds(4));
    fine.run_seconds(4);
    assert_eq!(snapshot(&coarse.sim), snapshot(&fine.sim));
    assert_eq!(coarse.sim.now(), fine.sim.now());
}

#[test]
fn test_reproducible_with_seed() {
    let build = || {
        TestSimBuilder::new(BUSY_SCENARIO)
            .with_prespawn(true)
            .with_seed(42)
            .build()
    };
    let mut a = build();
    let mut b = build();
    assert_eq!(a.sim.seed(), 42);
    assert_eq!(snapshot(&a.sim), snapshot(&b.sim));

    for i in 0..300 {
        a.step();
        b.step();
        if i == 30 {
            let first = a.sim.fleet().next().map(|ac| ac.callsign.clone());
            if let Some(cs) = first {
                let _ = a.sim.assign_heading(&cs, 180, TurnDirection::Left);
                let _ = b.sim.assign_heading(&cs, 180, TurnDirection::Left);
                let _ = a.sim.handoff(&cs, "N");
                let _ = b.sim.handoff(&cs, "N");
            }
        }
        assert_eq!(snapshot(&a.sim), snapshot(&b.sim), "diverged at step {}", i);
    }
    assert_eq!(a.take_events(), b.take_events());
}
