use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::components::{
    aircraft::{AircraftPerformance, FlightPlan},
    approach::ApproachRef,
    waypoint::Waypoint,
};
use crate::utils::{LatLong, TAS_GAIN_PER_1000_FT};

/// Direction of a controller-assigned turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnDirection {
    Left,
    #[default]
    Shortest,
    Right,
}

impl TurnDirection {
    pub fn sign(&self) -> i32 {
        match self {
            TurnDirection::Left => -1,
            TurnDirection::Shortest => 0,
            TurnDirection::Right => 1,
        }
    }
}

/// A sampled radar return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarTrack {
    pub position: LatLong,
    pub altitude: i32,
    pub groundspeed: i32,
    /// True heading.
    pub heading: f64,
    pub time: DateTime<Utc>,
}

/// A simulated aircraft.
///
/// Assigned values come from the controller and apply immediately; crossing
/// values are to be met at the next waypoint. At most one of each pair is
/// set at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub callsign: String,
    pub squawk: u16,
    pub flight_plan: FlightPlan,
    pub scratchpad: String,
    pub performance: AircraftPerformance,

    /// Current position.
    pub position: LatLong,
    /// Magnetic heading in [0, 360).
    pub heading: f64,
    /// Altitude (ft MSL).
    pub altitude: f64,
    /// Indicated airspeed (kts).
    pub ias: f64,
    /// Groundspeed over the last flight update (kts).
    pub groundspeed: f64,

    pub assigned_altitude: Option<i32>,
    pub assigned_speed: Option<i32>,
    pub assigned_heading: Option<f64>,
    pub turn_direction: TurnDirection,
    pub crossing_altitude: Option<i32>,
    pub crossing_speed: Option<i32>,

    /// Pending route; the first entry is the fix being flown to.
    pub waypoints: Vec<Waypoint>,
    pub approach: Option<ApproachRef>,
    pub cleared_approach: bool,
    pub on_final: bool,

    /// Controller owning the track; empty when untracked.
    pub tracking_controller: String,
    pub inbound_handoff_controller: String,
    pub outbound_handoff_controller: String,

    pub is_departure: bool,
    pub tracks: VecDeque<RadarTrack>,
}

impl Aircraft {
    pub fn new(
        callsign: impl Into<String>,
        flight_plan: FlightPlan,
        performance: AircraftPerformance,
    ) -> Self {
        Self {
            callsign: callsign.into(),
            squawk: 0,
            flight_plan,
            scratchpad: String::new(),
            performance,
            position: LatLong::default(),
            heading: 0.0,
            altitude: 0.0,
            ias: 0.0,
            groundspeed: 0.0,
            assigned_altitude: None,
            assigned_speed: None,
            assigned_heading: None,
            turn_direction: TurnDirection::Shortest,
            crossing_altitude: None,
            crossing_speed: None,
            waypoints: Vec::new(),
            approach: None,
            cleared_approach: false,
            on_final: false,
            tracking_controller: String::new(),
            inbound_handoff_controller: String::new(),
            outbound_handoff_controller: String::new(),
            is_departure: false,
            tracks: VecDeque::new(),
        }
    }

    pub fn is_airborne(&self) -> bool {
        self.ias >= self.performance.airborne_speed()
    }

    /// True airspeed: two percent over IAS per thousand feet.
    pub fn tas(&self) -> f64 {
        self.ias * (1.0 + TAS_GAIN_PER_1000_FT * self.altitude / 1000.0)
    }

    pub fn next_waypoint(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }

    pub fn is_tracked_by(&self, controller: &str) -> bool {
        self.tracking_controller == controller
    }

    /// Reaching a fix turns its crossing restrictions into assignments.
    pub fn promote_crossing_restrictions(&mut self) {
        if self.assigned_altitude.is_none() {
            self.assigned_altitude = self.crossing_altitude;
        }
        self.crossing_altitude = None;

        if self.assigned_speed.is_none() {
            self.assigned_speed = self.crossing_speed;
        }
        self.crossing_speed = None;
    }

    /// Take the next waypoint's restrictions as crossing targets, replacing
    /// any assignment on the same axis.
    pub fn load_next_restrictions(&mut self) {
        let (altitude, speed) = match self.waypoints.first() {
            Some(wp) => (wp.altitude, wp.speed),
            None => return,
        };
        if let Some(alt) = altitude {
            self.crossing_altitude = Some(alt);
            self.assigned_altitude = None;
        }
        if let Some(spd) = speed {
            self.crossing_speed = Some(spd);
            self.assigned_speed = None;
        }
    }

    /// Bookkeeping after the aircraft passes a fix that has already been
    /// removed from the route.
    pub fn waypoint_update(&mut self) {
        self.promote_crossing_restrictions();
        self.load_next_restrictions();
        self.assigned_heading = None;
        self.turn_direction = TurnDirection::Shortest;
        if self.cleared_approach {
            self.on_final = true;
        }
    }

    pub fn add_track(&mut self, track: RadarTrack, history: usize) {
        self.tracks.push_back(track);
        while self.tracks.len() > history.max(1) {
            self.tracks.pop_front();
        }
    }
}
