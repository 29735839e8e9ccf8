//! Controller instructions. Every command either succeeds and posts its
//! events, or returns an error and leaves the aircraft untouched.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::{debug, info};

use crate::components::{Aircraft, ApproachRef, ApproachType, TurnDirection, Waypoint};
use crate::resources::{EventStream, SimEvent};
use crate::utils::{normalize_heading, SimError};

use super::Simulation;

fn lookup<'a>(
    fleet: &'a mut BTreeMap<String, Aircraft>,
    callsign: &str,
) -> Result<&'a mut Aircraft, SimError> {
    fleet
        .get_mut(callsign)
        .ok_or_else(|| SimError::NoAircraftForCallsign(callsign.to_string()))
}

fn pilot_says(events: &mut EventStream, callsign: &str, contents: String) {
    debug!("{}: {}", callsign, contents);
    events.post(SimEvent::TextMessage {
        sender: callsign.to_string(),
        contents,
    });
}

fn modified(events: &mut EventStream, callsign: &str) {
    events.post(SimEvent::Modified {
        callsign: callsign.to_string(),
    });
}

fn require_track(ac: &Aircraft, user: &str) -> Result<(), SimError> {
    if ac.tracking_controller != user {
        return Err(SimError::OtherControllerHasTrack(ac.callsign.clone()));
    }
    Ok(())
}

impl Simulation {
    pub fn assign_altitude(&mut self, callsign: &str, altitude: i32) -> Result<(), SimError> {
        if altitude <= 0 {
            return Err(SimError::Unable(format!("altitude {}", altitude)));
        }
        let ac = lookup(&mut self.aircraft, callsign)?;
        let target = altitude as f64;
        let readback = if target > ac.altitude {
            format!("climb and maintain {}", altitude)
        } else if target == ac.altitude {
            format!("maintain {}", altitude)
        } else {
            format!("descend and maintain {}", altitude)
        };
        ac.assigned_altitude = Some(altitude);
        ac.crossing_altitude = None;
        pilot_says(&mut self.events, callsign, readback);
        modified(&mut self.events, callsign);
        Ok(())
    }

    /// Heading 0 is read as 360.
    pub fn assign_heading(
        &mut self,
        callsign: &str,
        heading: i32,
        turn: TurnDirection,
    ) -> Result<(), SimError> {
        let heading = if heading == 0 { 360 } else { heading };
        if !(1..=360).contains(&heading) {
            return Err(SimError::Unable(format!("heading {}", heading)));
        }
        let ac = lookup(&mut self.aircraft, callsign)?;
        let readback = match turn {
            TurnDirection::Right => format!("turn right heading {}", heading),
            TurnDirection::Shortest => format!("fly heading {}", heading),
            TurnDirection::Left => format!("turn left heading {}", heading),
        };
        ac.assigned_heading = Some(heading as f64);
        ac.turn_direction = turn;
        pilot_says(&mut self.events, callsign, readback);
        modified(&mut self.events, callsign);
        Ok(())
    }

    pub fn turn_left(&mut self, callsign: &str, degrees: i32) -> Result<(), SimError> {
        self.relative_turn(callsign, degrees, TurnDirection::Left)
    }

    pub fn turn_right(&mut self, callsign: &str, degrees: i32) -> Result<(), SimError> {
        self.relative_turn(callsign, degrees, TurnDirection::Right)
    }

    fn relative_turn(
        &mut self,
        callsign: &str,
        degrees: i32,
        turn: TurnDirection,
    ) -> Result<(), SimError> {
        if !(1..360).contains(&degrees) {
            return Err(SimError::Unable(format!("turn {} degrees", degrees)));
        }
        let ac = lookup(&mut self.aircraft, callsign)?;
        let heading = normalize_heading(ac.heading + (turn.sign() * degrees) as f64);
        let heading = if heading == 0.0 { 360.0 } else { heading };
        let side = if turn == TurnDirection::Left {
            "left"
        } else {
            "right"
        };
        ac.assigned_heading = Some(heading);
        ac.turn_direction = turn;
        pilot_says(
            &mut self.events,
            callsign,
            format!("turn {} degrees {}", degrees, side),
        );
        modified(&mut self.events, callsign);
        Ok(())
    }

    /// A speed of zero cancels all speed restrictions.
    pub fn assign_speed(&mut self, callsign: &str, speed: i32) -> Result<(), SimError> {
        if speed < 0 {
            return Err(SimError::Unable(format!("speed {}", speed)));
        }
        let ac = lookup(&mut self.aircraft, callsign)?;
        let readback = if speed == 0 {
            ac.assigned_speed = None;
            "cancel speed restrictions".to_string()
        } else {
            ac.assigned_speed = Some(speed);
            let perf = &ac.performance.speed;
            if (speed as f64) < perf.min {
                format!("maintain {} knots, best we can do is {}", speed, perf.min)
            } else if (speed as f64) > perf.max {
                format!("maintain {} knots, best we can do is {}", speed, perf.max)
            } else {
                format!("maintain {} knots", speed)
            }
        };
        ac.crossing_speed = None;
        pilot_says(&mut self.events, callsign, readback);
        modified(&mut self.events, callsign);
        Ok(())
    }

    /// Proceed direct to `fix`, either further along the route or on the
    /// expected approach.
    pub fn direct_fix(&mut self, callsign: &str, fix: &str) -> Result<(), SimError> {
        let fix = fix.to_uppercase();
        let ac = lookup(&mut self.aircraft, callsign)?;

        if let Some(i) = ac.waypoints.iter().position(|wp| wp.fix == fix) {
            ac.waypoints.drain(..i);
        } else {
            let on_approach = ac
                .approach
                .as_ref()
                .and_then(|r| self.scenario.approach(r))
                .and_then(|appr| appr.find_fix(&fix))
                .cloned();
            match on_approach {
                Some(wp) => ac.waypoints = vec![wp],
                None => return Err(SimError::FixNotFoundInRoute(fix)),
            }
        }
        ac.assigned_heading = None;
        ac.turn_direction = TurnDirection::Shortest;
        pilot_says(&mut self.events, callsign, format!("direct {}", fix));
        modified(&mut self.events, callsign);
        Ok(())
    }

    fn resolve_approach(&self, ac: &Aircraft, name: &str) -> Result<ApproachRef, SimError> {
        let arrival = &ac.flight_plan.arrival_airport;
        if arrival.is_empty() {
            return Err(SimError::NoFlightPlan(ac.callsign.clone()));
        }
        let airport = self
            .scenario
            .airport(arrival)
            .ok_or_else(|| SimError::ArrivalAirportUnknown(arrival.clone()))?;
        let index = airport
            .approach_index(name)
            .ok_or_else(|| SimError::UnknownApproach(name.to_string()))?;
        Ok(ApproachRef {
            airport: airport.icao.clone(),
            index,
        })
    }

    pub fn expect_approach(&mut self, callsign: &str, name: &str) -> Result<(), SimError> {
        let ac = self
            .aircraft
            .get(callsign)
            .ok_or_else(|| SimError::NoAircraftForCallsign(callsign.to_string()))?;
        let approach_ref = self.resolve_approach(ac, name)?;
        let full_name = self
            .scenario
            .approach(&approach_ref)
            .map(|a| a.full_name.clone())
            .unwrap_or_else(|| name.to_string());

        let ac = lookup(&mut self.aircraft, callsign)?;
        ac.approach = Some(approach_ref);
        pilot_says(
            &mut self.events,
            callsign,
            format!("we'll expect the {} approach", full_name),
        );
        modified(&mut self.events, callsign);
        Ok(())
    }

    /// Clear for an approach. ILS clearances need either an assigned heading
    /// (the localizer is intercepted later) or a route through one of the
    /// approach fixes; RNAV clearances need the latter.
    pub fn cleared_approach(&mut self, callsign: &str, name: &str) -> Result<(), SimError> {
        let ac = self
            .aircraft
            .get(callsign)
            .ok_or_else(|| SimError::NoAircraftForCallsign(callsign.to_string()))?;
        let approach_ref = self.resolve_approach(ac, name)?;
        let approach = self
            .scenario
            .approach(&approach_ref)
            .ok_or_else(|| SimError::UnknownApproach(name.to_string()))?;

        let mut preamble = String::new();
        match &ac.approach {
            None => {
                preamble = "you never told us to expect an approach, but ok, ".to_string();
            }
            Some(expected) if *expected != approach_ref => {
                let expected_name = self
                    .scenario
                    .approach(expected)
                    .map(|a| a.full_name.clone())
                    .unwrap_or_default();
                pilot_says(
                    &mut self.events,
                    callsign,
                    format!(
                        "but you cleared us for the {} approach, but told us to expect {}",
                        approach.full_name, expected_name
                    ),
                );
                return Err(SimError::ClearedForUnexpectedApproach(name.to_string()));
            }
            Some(_) => {}
        }

        if ac.cleared_approach {
            pilot_says(
                &mut self.events,
                callsign,
                format!("you already cleared us for the {} approach", approach.full_name),
            );
            return Ok(());
        }

        // Remaining approach fixes when the route already leads onto the approach
        let direct: Option<Vec<Waypoint>> = ac
            .next_waypoint()
            .and_then(|wp| approach.remaining_after(&wp.fix))
            .map(|rest| rest.to_vec());
        let on_heading = ac.assigned_heading.is_some();

        let splice = match (approach.approach_type, on_heading, direct) {
            (ApproachType::Ils, true, _) => None,
            (_, _, Some(rest)) => Some(rest),
            (ApproachType::Ils, false, None) => {
                pilot_says(
                    &mut self.events,
                    callsign,
                    "we need either direct or a heading to intercept".to_string(),
                );
                return Err(SimError::NotOnApproachCourse(callsign.to_string()));
            }
            (ApproachType::Rnav, _, None) => {
                pilot_says(
                    &mut self.events,
                    callsign,
                    "we need direct to a fix on the approach".to_string(),
                );
                return Err(SimError::NotOnApproachCourse(callsign.to_string()));
            }
        };
        let full_name = approach.full_name.clone();

        let ac = lookup(&mut self.aircraft, callsign)?;
        if let Some(rest) = splice {
            ac.waypoints.truncate(1);
            ac.waypoints.extend(rest);
        }
        ac.approach = Some(approach_ref);
        ac.assigned_speed = None;
        ac.cleared_approach = true;
        info!("{}: cleared {}", callsign, full_name);
        pilot_says(
            &mut self.events,
            callsign,
            format!("{}cleared {} approach", preamble, full_name),
        );
        modified(&mut self.events, callsign);
        Ok(())
    }

    pub fn initiate_track(&mut self, callsign: &str) -> Result<(), SimError> {
        let user = self.scenario.callsign.clone();
        let ac = lookup(&mut self.aircraft, callsign)?;
        if !ac.tracking_controller.is_empty() && ac.tracking_controller != user {
            return Err(SimError::OtherControllerHasTrack(callsign.to_string()));
        }
        ac.tracking_controller = user.clone();
        self.events.post(SimEvent::InitiatedTrack {
            callsign: callsign.to_string(),
            controller: user,
        });
        modified(&mut self.events, callsign);
        Ok(())
    }

    pub fn drop_track(&mut self, callsign: &str) -> Result<(), SimError> {
        let user = self.scenario.callsign.clone();
        let ac = lookup(&mut self.aircraft, callsign)?;
        require_track(ac, &user)?;
        ac.tracking_controller.clear();
        ac.outbound_handoff_controller.clear();
        self.handoffs.cancel(callsign);
        self.events.post(SimEvent::DroppedTrack {
            callsign: callsign.to_string(),
            controller: user,
        });
        modified(&mut self.events, callsign);
        Ok(())
    }

    /// Offer the aircraft to another controller, who accepts automatically
    /// a few seconds later.
    pub fn handoff(&mut self, callsign: &str, controller: &str) -> Result<(), SimError> {
        let user = self.scenario.callsign.clone();
        let target = self
            .scenario
            .controller(controller)
            .map(|c| c.callsign.clone())
            .ok_or_else(|| SimError::NoController(controller.to_string()))?;
        let ac = lookup(&mut self.aircraft, callsign)?;
        require_track(ac, &user)?;

        ac.outbound_handoff_controller = target.clone();
        let deadline = self.handoffs.schedule(callsign, self.clock.now(), &mut self.rng);
        debug!("{}: handoff to {} accepts at {}", callsign, target, deadline);
        self.events.post(SimEvent::OfferedHandoff {
            callsign: callsign.to_string(),
            from: user,
            to: target,
        });
        modified(&mut self.events, callsign);
        Ok(())
    }

    pub fn accept_handoff(&mut self, callsign: &str) -> Result<(), SimError> {
        let user = self.scenario.callsign.clone();
        let ac = lookup(&mut self.aircraft, callsign)?;
        if ac.inbound_handoff_controller != user {
            return Err(SimError::NotBeingHandedOffToMe(callsign.to_string()));
        }
        ac.inbound_handoff_controller.clear();
        ac.tracking_controller = user.clone();
        self.events.post(SimEvent::AcceptedHandoff {
            callsign: callsign.to_string(),
            controller: user,
        });
        modified(&mut self.events, callsign);
        Ok(())
    }

    pub fn cancel_handoff(&mut self, callsign: &str) -> Result<(), SimError> {
        let user = self.scenario.callsign.clone();
        let ac = lookup(&mut self.aircraft, callsign)?;
        require_track(ac, &user)?;
        ac.outbound_handoff_controller.clear();
        self.handoffs.cancel(callsign);
        modified(&mut self.events, callsign);
        Ok(())
    }

    pub fn set_scratchpad(&mut self, callsign: &str, scratchpad: &str) -> Result<(), SimError> {
        let user = self.scenario.callsign.clone();
        let ac = lookup(&mut self.aircraft, callsign)?;
        require_track(ac, &user)?;
        ac.scratchpad = scratchpad.to_uppercase();
        modified(&mut self.events, callsign);
        Ok(())
    }

    pub fn delete_aircraft(&mut self, callsign: &str) -> Result<(), SimError> {
        if !self.remove_aircraft(callsign) {
            return Err(SimError::NoAircraftForCallsign(callsign.to_string()));
        }
        info!("{}: deleted by controller", callsign);
        Ok(())
    }

    /// Pause or resume. Wallclock time that passes while paused is never
    /// simulated.
    pub fn toggle_pause(&mut self, wallclock: DateTime<Utc>) {
        self.clock.toggle_pause(wallclock);
        info!(
            "simulation {}",
            if self.clock.is_paused() {
                "paused"
            } else {
                "resumed"
            }
        );
    }

    /// One-line summary of an aircraft's clearance and route.
    pub fn describe(&self, callsign: &str) -> Result<String, SimError> {
        let ac = self
            .aircraft
            .get(callsign)
            .ok_or_else(|| SimError::NoAircraftForCallsign(callsign.to_string()))?;

        let mut s = format!(
            "{} {} {}->{} alt {:.0} ias {:.0} gs {:.0} hdg {:03.0}",
            ac.callsign,
            ac.flight_plan.aircraft_type,
            ac.flight_plan.departure_airport,
            ac.flight_plan.arrival_airport,
            ac.altitude,
            ac.ias,
            ac.groundspeed,
            ac.heading
        );
        if let Some(alt) = ac.assigned_altitude {
            let _ = write!(s, ", assigned alt {}", alt);
        }
        if let Some(alt) = ac.crossing_altitude {
            let _ = write!(s, ", cross at {}", alt);
        }
        if let Some(spd) = ac.assigned_speed {
            let _ = write!(s, ", assigned speed {}", spd);
        }
        if let Some(spd) = ac.crossing_speed {
            let _ = write!(s, ", cross at {} kts", spd);
        }
        if let Some(hdg) = ac.assigned_heading {
            let _ = write!(s, ", heading {:.0}", hdg);
            if ac.turn_direction != TurnDirection::Shortest {
                let _ = write!(s, " turn {:?}", ac.turn_direction);
            }
        }
        if let Some(appr) = ac.approach.as_ref().and_then(|r| self.scenario.approach(r)) {
            let _ = write!(
                s,
                ", {} {}",
                if ac.cleared_approach {
                    "cleared"
                } else {
                    "expecting"
                },
                appr.short_name
            );
        }
        if !ac.tracking_controller.is_empty() {
            let _ = write!(s, ", track {}", ac.tracking_controller);
        }
        let route: Vec<String> = ac.waypoints.iter().map(ToString::to_string).collect();
        let _ = write!(s, ", route [{}]", route.join(" "));
        Ok(s)
    }
}
