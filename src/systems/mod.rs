mod approach;
mod dynamics;
mod handoff;
pub mod spawn;
mod waypoints;

pub use approach::capture_approach;
pub use dynamics::{
    update_airspeed, update_altitude, update_heading, update_position, waypoint_eta,
    FlightContext,
};
pub use handoff::HandoffTimers;
pub use waypoints::follow_waypoints;

use crate::components::{Aircraft, Waypoint};

/// Fly one second: airspeed, altitude, heading, position, approach capture,
/// then route advance. Returns the waypoint passed, if any.
pub fn step_aircraft(ac: &mut Aircraft, ctx: &FlightContext) -> Option<Waypoint> {
    update_airspeed(ac, ctx.scenario);
    update_altitude(ac);
    update_heading(ac, ctx);
    update_position(ac, ctx);
    capture_approach(ac, ctx.scenario, ctx.frame);
    follow_waypoints(ac)
}
