use approx::assert_abs_diff_eq;
use tracon::{
    components::TurnDirection,
    utils::{signed_point_line_distance, LatLong},
};

use crate::common::{
    assert_fixes, assert_heading_near, create_test_arrival, waypoint, TestSimBuilder,
    APPROACH_SCENARIO,
};

// 8 nm west and 12 nm south of the threshold, south-west of the 045 course
fn vector_position() -> LatLong {
    let nm_per_longitude = 60.0 * 40.0_f64.to_radians().cos();
    LatLong::new(39.8, -73.0 - 8.0 / nm_per_longitude)
}

#[test]
fn test_ils_intercept_and_capture() {
    let mut t = TestSimBuilder::new(APPROACH_SCENARIO).build();
    let mut ac = create_test_arrival("JBU101", vector_position());
    ac.heading = 10.0;
    ac.altitude = 3000.0;
    ac.waypoints = vec![
        waypoint("ROSLY", 39.9, -73.3),
        waypoint("ENTRY", 40.3, -73.6),
    ];
    t.add(ac);

    t.sim.assign_heading("JBU101", 10, TurnDirection::Shortest).unwrap();
    t.sim.expect_approach("JBU101", "I1").unwrap();
    t.sim.cleared_approach("JBU101", "I1").unwrap();
    {
        let ac = t.aircraft("JBU101");
        assert!(ac.cleared_approach);
        assert_eq!(ac.assigned_speed, None);
        // Vectored: the splice waits for the localizer
        assert_fixes(ac, &["ROSLY", "ENTRY"]);
    }

    let frame = *t.sim.frame();
    let faf = frame.to_nm(LatLong::new(39.941074, -73.076922));
    let rwy = frame.to_nm(LatLong::new(40.0, -73.0));
    let side = |pos: LatLong| signed_point_line_distance(frame.to_nm(pos), faf, rwy);
    let start_side = side(vector_position());

    let steps = t.run_until(200, |sim| {
        sim.aircraft("JBU101").unwrap().assigned_heading != Some(10.0)
    });
    assert!(steps.is_some(), "never intercepted");
    {
        let ac = t.aircraft("JBU101");
        assert_heading_near(ac.assigned_heading.unwrap(), 45.0, 0.01);
        assert!(ac.waypoints.is_empty());
        // Turned in before crossing the course
        let offset = side(ac.position);
        assert_eq!(offset.signum(), start_side.signum());
        assert!(offset.abs() < 0.5, "intercepted {} nm from course", offset);
    }

    let steps = t.run_until(60, |sim| !sim.aircraft("JBU101").unwrap().waypoints.is_empty());
    assert!(steps.is_some(), "never established");
    let ac = t.aircraft("JBU101");
    // KRSTL is just behind the intercept point
    let krstl = frame.to_nm(LatLong::new(39.882149, -73.153844));
    let forward = frame.heading_vector(ac.heading);
    assert!((krstl - frame.to_nm(ac.position)).dot(&forward) < 0.0);
    assert_fixes(ac, &["FAF", "_RWY1"]);
    assert_eq!(ac.assigned_heading, None);
    assert_eq!(ac.assigned_altitude, None);
    assert_eq!(ac.crossing_altitude, Some(2000));
}

// Half the KRSTL-threshold distance again beyond KRSTL, on the course
fn extended_final() -> LatLong {
    LatLong::new(
        39.882149 + 0.5 * (39.882149 - 40.0),
        -73.153844 + 0.5 * (-73.153844 + 73.0),
    )
}

#[test]
fn test_capture_skips_fixes_above_aircraft() {
    for (altitude, expected, crossing) in [
        (2500.0, &["FAF", "_RWY1"][..], 2000),
        (3500.0, &["KRSTL", "FAF", "_RWY1"][..], 3000),
    ] {
        let mut t = TestSimBuilder::new(APPROACH_SCENARIO).build();
        let mut ac = create_test_arrival("DAL7", extended_final());
        ac.heading = 45.0;
        ac.altitude = altitude;
        t.add(ac);

        t.sim.assign_heading("DAL7", 45, TurnDirection::Shortest).unwrap();
        t.sim.expect_approach("DAL7", "I1").unwrap();
        t.sim.cleared_approach("DAL7", "I1").unwrap();

        let steps = t.run_until(5, |sim| !sim.aircraft("DAL7").unwrap().waypoints.is_empty());
        assert!(steps.is_some(), "never established at {} ft", altitude);
        let ac = t.aircraft("DAL7");
        assert_fixes(ac, expected);
        assert_eq!(ac.crossing_altitude, Some(crossing));
        assert_eq!(ac.assigned_heading, None);
    }
}

#[test]
fn test_crossing_restriction_met_at_fix() {
    let mut t = TestSimBuilder::new(APPROACH_SCENARIO).build();
    let mut ac = create_test_arrival("DAL202", LatLong::new(40.0 - 10.0 / 60.0, -73.0));
    ac.heading = 0.0;
    ac.altitude = 5000.0;
    ac.ias = 164.0;
    ac.assigned_speed = Some(164);
    ac.crossing_altitude = Some(3000);
    ac.waypoints = vec![
        waypoint("FIX", 40.0, -73.0).with_altitude(3000),
        waypoint("NEXT", 40.2, -73.0),
    ];
    t.add(ac);

    t.step();
    let first = t.aircraft("DAL202").altitude;
    assert!(first < 5000.0 && first > 5000.0 - 1800.0 / 60.0);

    let steps = t.run_until(300, |sim| {
        sim.aircraft("DAL202").unwrap().waypoints[0].fix == "NEXT"
    });
    assert!(steps.is_some(), "never reached FIX");
    let ac = t.aircraft("DAL202");
    assert_abs_diff_eq!(ac.altitude, 3000.0, epsilon = 50.0);
    assert_eq!(ac.crossing_altitude, None);
    assert_eq!(ac.assigned_altitude, Some(3000));
}

#[test]
fn test_direct_to_approach_fix() {
    let mut t = TestSimBuilder::new(APPROACH_SCENARIO).build();
    let mut ac = create_test_arrival("JBU303", LatLong::new(39.7, -73.3));
    ac.waypoints = vec![waypoint("ENTRY", 39.6, -73.4)];
    t.add(ac);

    t.sim.assign_heading("JBU303", 90, TurnDirection::Right).unwrap();
    t.sim.expect_approach("JBU303", "I1").unwrap();
    t.sim.direct_fix("JBU303", "KRSTL").unwrap();
    {
        let ac = t.aircraft("JBU303");
        assert_fixes(ac, &["KRSTL"]);
        assert_eq!(ac.assigned_heading, None);
        assert_eq!(ac.turn_direction, TurnDirection::Shortest);
    }

    t.sim.cleared_approach("JBU303", "I1").unwrap();
    assert_fixes(t.aircraft("JBU303"), &["KRSTL", "FAF", "_RWY1"]);

    // Flies the approach fixes and lands on final
    let steps = t.run_until(600, |sim| {
        sim.aircraft("JBU303").unwrap().waypoints.len() == 1
    });
    assert!(steps.is_some());
    assert!(t.aircraft("JBU303").on_final);
}
