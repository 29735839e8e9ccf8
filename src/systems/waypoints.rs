use crate::components::{Aircraft, TurnDirection, Waypoint};
use crate::utils::{nm_distance, WAYPOINT_ARRIVAL_RADIUS_NM};

/// Advance past the next waypoint once the aircraft is within its arrival
/// radius. Returns the waypoint that was passed so its commands can be run.
///
/// Aircraft flying an assigned heading are not following the route and
/// never pass fixes.
pub fn follow_waypoints(ac: &mut Aircraft) -> Option<Waypoint> {
    if ac.assigned_heading.is_some() {
        return None;
    }
    let wp = ac.next_waypoint()?;
    if nm_distance(ac.position, wp.location) >= WAYPOINT_ARRIVAL_RADIUS_NM {
        return None;
    }

    let passed = ac.waypoints.remove(0);
    match passed.heading {
        Some(heading) => {
            // Fly the outbound heading until the controller says otherwise
            ac.promote_crossing_restrictions();
            ac.assigned_heading = Some(heading as f64);
            ac.turn_direction = TurnDirection::Shortest;
        }
        None => ac.waypoint_update(),
    }
    tracing::debug!("{}: passed {}", ac.callsign, passed.fix);
    Some(passed)
}
