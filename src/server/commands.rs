use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::components::TurnDirection;
use crate::utils::SimError;
use crate::world::Simulation;

/// One controller instruction, as typed after a callsign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlCommand {
    /// Altitude in feet.
    Altitude(i32),
    Heading {
        heading: i32,
        turn: TurnDirection,
    },
    /// Turn by a number of degrees from the current heading.
    Turn {
        degrees: i32,
        turn: TurnDirection,
    },
    Speed(i32),
    Direct(String),
    Expect(String),
    Cleared(String),
    Track,
    Drop,
    Handoff(String),
    Accept,
    CancelHandoff,
    Scratchpad(String),
    Delete,
    Pause,
    Info,
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandLine {
    pub callsign: String,
    pub commands: Vec<ControlCommand>,
}

fn number(token: &str, digits: &str) -> Result<i32, SimError> {
    digits
        .parse::<i32>()
        .map_err(|_| SimError::Unable(format!("bad number in {}", token)))
}

fn argument(token: &str, rest: &str) -> Result<String, SimError> {
    if rest.is_empty() {
        return Err(SimError::Unable(format!("{} needs an argument", token)));
    }
    Ok(rest.to_string())
}

impl FromStr for ControlCommand {
    type Err = SimError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.to_uppercase();
        let t = token.as_str();

        match t {
            "TRACK" => return Ok(ControlCommand::Track),
            "DROP" => return Ok(ControlCommand::Drop),
            "ACCEPT" => return Ok(ControlCommand::Accept),
            "CANCEL" => return Ok(ControlCommand::CancelHandoff),
            "X" => return Ok(ControlCommand::Delete),
            "P" => return Ok(ControlCommand::Pause),
            "INFO" => return Ok(ControlCommand::Info),
            _ => {}
        }

        // Relative turns: 20L, 15R
        if t.starts_with(|c: char| c.is_ascii_digit()) {
            let (digits, turn) = if let Some(digits) = t.strip_suffix('L') {
                (digits, TurnDirection::Left)
            } else if let Some(digits) = t.strip_suffix('R') {
                (digits, TurnDirection::Right)
            } else {
                return Err(SimError::Unable(format!("unknown command {}", t)));
            };
            return Ok(ControlCommand::Turn {
                degrees: number(t, digits)?,
                turn,
            });
        }

        if let Some(rest) = t.strip_prefix("HO") {
            return Ok(ControlCommand::Handoff(argument(t, rest)?));
        }
        if let Some(rest) = t.strip_prefix("SP") {
            return Ok(ControlCommand::Scratchpad(argument(t, rest)?));
        }

        let mut chars = t.chars();
        let Some(first) = chars.next() else {
            return Err(SimError::Unable("empty command".to_string()));
        };
        let rest = chars.as_str();
        match first {
            'A' => number(t, rest)?
                .checked_mul(100)
                .map(ControlCommand::Altitude)
                .ok_or_else(|| SimError::Unable(format!("altitude out of range in {}", t))),
            'H' => Ok(ControlCommand::Heading {
                heading: number(t, rest)?,
                turn: TurnDirection::Shortest,
            }),
            'L' => Ok(ControlCommand::Heading {
                heading: number(t, rest)?,
                turn: TurnDirection::Left,
            }),
            'R' => Ok(ControlCommand::Heading {
                heading: number(t, rest)?,
                turn: TurnDirection::Right,
            }),
            'S' => Ok(ControlCommand::Speed(number(t, rest)?)),
            'D' => Ok(ControlCommand::Direct(argument(t, rest)?)),
            'E' => Ok(ControlCommand::Expect(argument(t, rest)?)),
            'C' => Ok(ControlCommand::Cleared(argument(t, rest)?)),
            _ => Err(SimError::Unable(format!("unknown command {}", t))),
        }
    }
}

impl FromStr for CommandLine {
    type Err = SimError;

    /// `CALLSIGN CMD [CMD...]`, e.g. `JBU123 A50 H270 S210`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let callsign = tokens
            .next()
            .ok_or_else(|| SimError::Unable("empty command line".to_string()))?
            .to_uppercase();
        let commands = tokens
            .map(str::parse)
            .collect::<Result<Vec<ControlCommand>, _>>()?;
        if commands.is_empty() {
            return Err(SimError::Unable(format!("{}: no commands given", callsign)));
        }
        Ok(Self { callsign, commands })
    }
}

impl ControlCommand {
    /// Run the command against `callsign`. `Info` returns its summary.
    pub fn apply(
        &self,
        sim: &mut Simulation,
        callsign: &str,
        wallclock: DateTime<Utc>,
    ) -> Result<Option<String>, SimError> {
        match self {
            ControlCommand::Altitude(alt) => sim.assign_altitude(callsign, *alt)?,
            ControlCommand::Heading { heading, turn } => {
                sim.assign_heading(callsign, *heading, *turn)?
            }
            ControlCommand::Turn {
                degrees,
                turn: TurnDirection::Left,
            } => sim.turn_left(callsign, *degrees)?,
            ControlCommand::Turn { degrees, .. } => sim.turn_right(callsign, *degrees)?,
            ControlCommand::Speed(kts) => sim.assign_speed(callsign, *kts)?,
            ControlCommand::Direct(fix) => sim.direct_fix(callsign, fix)?,
            ControlCommand::Expect(name) => sim.expect_approach(callsign, name)?,
            ControlCommand::Cleared(name) => sim.cleared_approach(callsign, name)?,
            ControlCommand::Track => sim.initiate_track(callsign)?,
            ControlCommand::Drop => sim.drop_track(callsign)?,
            ControlCommand::Handoff(target) => sim.handoff(callsign, target)?,
            ControlCommand::Accept => sim.accept_handoff(callsign)?,
            ControlCommand::CancelHandoff => sim.cancel_handoff(callsign)?,
            ControlCommand::Scratchpad(text) => sim.set_scratchpad(callsign, text)?,
            ControlCommand::Delete => sim.delete_aircraft(callsign)?,
            ControlCommand::Pause => sim.toggle_pause(wallclock),
            ControlCommand::Info => return sim.describe(callsign).map(Some),
        }
        Ok(None)
    }
}

impl CommandLine {
    /// Apply each command in order, stopping at the first failure.
    pub fn apply(
        &self,
        sim: &mut Simulation,
        wallclock: DateTime<Utc>,
    ) -> Result<Vec<String>, SimError> {
        let mut output = Vec::new();
        for command in &self.commands {
            if let Some(text) = command.apply(sim, &self.callsign, wallclock)? {
                output.push(text);
            }
        }
        Ok(output)
    }
}
