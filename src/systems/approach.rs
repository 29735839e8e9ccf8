use crate::components::{Aircraft, TurnDirection, Waypoint};
use crate::scenario::Scenario;
use crate::utils::{
    heading_difference, signed_point_line_distance, NavFrame, CAPTURE_DISTANCE_NM,
    CAPTURE_HEADING_TOLERANCE,
};

/// Pick up the approach fixes once a cleared aircraft is established on the
/// final approach course.
///
/// Only fixes ahead of the aircraft and at or below its altitude are kept.
/// Returns `true` when the route was replaced.
pub fn capture_approach(ac: &mut Aircraft, scenario: &Scenario, frame: &NavFrame) -> bool {
    if !ac.cleared_approach || !ac.waypoints.is_empty() {
        return false;
    }
    let Some(approach) = ac.approach.as_ref().and_then(|r| scenario.approach(r)) else {
        return false;
    };
    let (Some(heading), Some((a, b)), Some(first)) = (
        approach.heading(frame),
        approach.final_segment(),
        approach.waypoints.first(),
    ) else {
        return false;
    };

    if heading_difference(ac.heading, heading) >= CAPTURE_HEADING_TOLERANCE {
        return false;
    }
    let pos = frame.to_nm(ac.position);
    if signed_point_line_distance(pos, frame.to_nm(a), frame.to_nm(b)).abs() >= CAPTURE_DISTANCE_NM
    {
        return false;
    }

    let forward = frame.heading_vector(ac.heading);
    let ahead: Vec<Waypoint> = first
        .iter()
        .filter(|wp| (frame.to_nm(wp.location) - pos).dot(&forward) > 0.0)
        .filter(|wp| wp.altitude.map_or(true, |alt| alt as f64 <= ac.altitude))
        .cloned()
        .collect();
    if ahead.is_empty() {
        return false;
    }

    tracing::info!(
        "{}: established on {}, {} fixes ahead",
        ac.callsign,
        approach.short_name,
        ahead.len()
    );
    ac.waypoints = ahead;
    ac.assigned_heading = None;
    ac.assigned_altitude = None;
    ac.turn_direction = TurnDirection::Shortest;
    ac.load_next_restrictions();
    true
}
