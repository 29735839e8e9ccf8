use serde::{Deserialize, Serialize};

use crate::components::waypoint::{Waypoint, WaypointList};
use crate::utils::{LatLong, NavFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApproachType {
    #[serde(rename = "ILS")]
    Ils,
    #[serde(rename = "RNAV")]
    Rnav,
}

/// An instrument approach. Each waypoint set is an alternative path ending
/// at the runway threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approach {
    pub short_name: String,
    pub full_name: String,
    #[serde(rename = "type")]
    pub approach_type: ApproachType,
    pub waypoints: Vec<WaypointList>,
}

/// Key of an approach in the scenario's per-airport approach table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproachRef {
    pub airport: String,
    pub index: usize,
}

impl Approach {
    /// Final two waypoints of the first set.
    pub fn final_segment(&self) -> Option<(LatLong, LatLong)> {
        let set = self.waypoints.first()?.as_slice();
        match set {
            [.., a, b] => Some((a.location, b.location)),
            _ => None,
        }
    }

    /// Magnetic course of the final segment.
    pub fn heading(&self, frame: &NavFrame) -> Option<f64> {
        self.final_segment().map(|(a, b)| frame.heading(a, b))
    }

    /// Waypoints following the first occurrence of `fix` in any set.
    pub fn remaining_after(&self, fix: &str) -> Option<&[Waypoint]> {
        self.waypoints.iter().find_map(|set| {
            set.iter()
                .position(|wp| wp.fix == fix)
                .map(|i| &set.as_slice()[i + 1..])
        })
    }

    /// The waypoint named `fix` in any set.
    pub fn find_fix(&self, fix: &str) -> Option<&Waypoint> {
        self.waypoints
            .iter()
            .flat_map(|set| set.iter())
            .find(|wp| wp.fix == fix)
    }
}
