pub mod aircraft;
pub mod approach;
pub mod waypoint;

pub use aircraft::{
    Aircraft, AircraftPerformance, FlightPlan, FlightRules, PerformanceRates, PerformanceSpeeds,
    RadarTrack, RunwayLengths, TurnDirection,
};
pub use approach::{Approach, ApproachRef, ApproachType};
pub use waypoint::{parse_waypoints, Waypoint, WaypointCommand, WaypointList};
