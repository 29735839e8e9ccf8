use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::{LatLong, SimError};

/// Actions run atomically when an aircraft reaches a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaypointCommand {
    /// Offer the aircraft to the user.
    Handoff,
    /// Remove the aircraft from the simulation.
    Delete,
}

/// One step of a route.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Waypoint {
    pub fix: String,
    /// Resolved when the scenario is loaded.
    pub location: LatLong,
    /// Crossing altitude (ft).
    pub altitude: Option<i32>,
    /// Crossing speed (kts).
    pub speed: Option<i32>,
    /// Heading to fly after reaching the fix.
    pub heading: Option<i32>,
    pub commands: Vec<WaypointCommand>,
}

impl Waypoint {
    pub fn new(fix: impl Into<String>) -> Self {
        Self {
            fix: fix.into(),
            ..Default::default()
        }
    }

    pub fn at(fix: impl Into<String>, location: LatLong) -> Self {
        Self {
            fix: fix.into(),
            location,
            ..Default::default()
        }
    }

    pub fn with_altitude(mut self, altitude: i32) -> Self {
        self.altitude = Some(altitude);
        self
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_heading(mut self, heading: i32) -> Self {
        self.heading = Some(heading);
        self
    }

    pub fn with_command(mut self, command: WaypointCommand) -> Self {
        self.commands.push(command);
        self
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fix)?;
        if let Some(alt) = self.altitude {
            write!(f, "@a{}", alt)?;
        }
        if let Some(spd) = self.speed {
            write!(f, "@s{}", spd)?;
        }
        if let Some(hdg) = self.heading {
            write!(f, " #{}", hdg)?;
        }
        for cmd in &self.commands {
            match cmd {
                WaypointCommand::Handoff => write!(f, " @")?,
                WaypointCommand::Delete => write!(f, " *")?,
            }
        }
        Ok(())
    }
}

fn parse_attribute(wp: &mut Waypoint, attr: &str, token: &str) -> Result<(), SimError> {
    let bad = || SimError::WaypointParse(format!("{}: invalid attribute \"{}\"", token, attr));
    let (kind, value) = attr.split_at(attr.chars().next().map_or(0, char::len_utf8));
    let value: i32 = value.parse().map_err(|_| bad())?;
    match kind {
        "a" | "A" => wp.altitude = Some(value),
        "s" | "S" => wp.speed = Some(value),
        _ => return Err(bad()),
    }
    Ok(())
}

fn previous<'a>(waypoints: &'a mut [Waypoint], token: &str) -> Result<&'a mut Waypoint, SimError> {
    waypoints.last_mut().ok_or_else(|| {
        SimError::WaypointParse(format!("{}: must follow a fix", token))
    })
}

/// Parse a whitespace-separated route such as `_RWY31L #310 CLIMB@a3000 WAVEY @ EXIT *`.
///
/// Fix names are not resolved here; locations stay zero until the scenario
/// is validated.
pub fn parse_waypoints(route: &str) -> Result<Vec<Waypoint>, SimError> {
    let mut waypoints: Vec<Waypoint> = Vec::new();

    for token in route.split_whitespace() {
        match token {
            "@" => previous(&mut waypoints, token)?
                .commands
                .push(WaypointCommand::Handoff),
            "*" => previous(&mut waypoints, token)?
                .commands
                .push(WaypointCommand::Delete),
            _ if token.starts_with('#') => {
                let heading: i32 = token[1..].parse().map_err(|_| {
                    SimError::WaypointParse(format!("{}: invalid heading", token))
                })?;
                if !(1..=360).contains(&heading) {
                    return Err(SimError::WaypointParse(format!(
                        "{}: heading must be in 1-360",
                        token
                    )));
                }
                previous(&mut waypoints, token)?.heading = Some(heading);
            }
            _ => {
                let mut fields = token.split(['@', '/']);
                let fix = fields.next().unwrap_or_default();
                if fix.is_empty() {
                    return Err(SimError::WaypointParse(format!("{}: missing fix", token)));
                }
                let mut wp = Waypoint::new(fix);
                for attr in fields {
                    parse_attribute(&mut wp, attr, token)?;
                }
                waypoints.push(wp);
            }
        }
    }

    Ok(waypoints)
}

/// A route as written in scenario files: a single string in the waypoint
/// grammar.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WaypointList(pub Vec<Waypoint>);

impl WaypointList {
    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Waypoint> {
        self.0.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Waypoint] {
        &self.0
    }
}

impl FromStr for WaypointList {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_waypoints(s).map(WaypointList)
    }
}

impl fmt::Display for WaypointList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(" "))
    }
}

impl Serialize for WaypointList {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WaypointList {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
