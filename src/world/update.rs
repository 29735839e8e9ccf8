use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::components::{RadarTrack, WaypointCommand};
use crate::resources::SimEvent;
use crate::systems::spawn::{make_arrival, make_departure, sample_departure, ScheduleKind, Spawned};
use crate::systems::{step_aircraft, FlightContext};
use crate::utils::{
    nm_distance, normalize_heading, sample, SimError, FLIGHT_UPDATE_INTERVAL_SECS,
    SPAWN_ATTEMPTS, TRACK_UPDATE_INTERVAL_SECS,
};

use super::Simulation;

impl Simulation {
    /// Advance sim-time by the scaled wallclock delta and run everything
    /// that came due. Does nothing while paused.
    pub fn tick(&mut self, wallclock: DateTime<Utc>) {
        if self.clock.is_paused() {
            return;
        }
        self.clock.advance(wallclock);
        let now = self.clock.now();
        self.update_state(now);
    }

    pub(super) fn update_state(&mut self, now: DateTime<Utc>) {
        self.accept_expired_handoffs(now);

        let step = Duration::seconds(FLIGHT_UPDATE_INTERVAL_SECS);
        while now - self.last_flight_update >= step {
            self.last_flight_update = self.last_flight_update + step;
            self.update_flights();
        }

        if now - self.last_track_update >= Duration::seconds(TRACK_UPDATE_INTERVAL_SECS) {
            self.last_track_update = now;
            self.update_tracks(now);
        }

        self.spawn_due(now);
    }

    fn accept_expired_handoffs(&mut self, now: DateTime<Utc>) {
        for callsign in self.handoffs.expire(now) {
            let Some(ac) = self.aircraft.get_mut(&callsign) else {
                continue;
            };
            if ac.outbound_handoff_controller.is_empty() {
                continue;
            }
            let controller = std::mem::take(&mut ac.outbound_handoff_controller);
            ac.tracking_controller = controller.clone();
            info!("{}: handoff accepted by {}", callsign, controller);
            self.events.post(SimEvent::AcceptedHandoff {
                callsign: callsign.clone(),
                controller,
            });
            self.events.post(SimEvent::Modified { callsign });
        }
    }

    fn update_flights(&mut self) {
        let wind = self.environment.sample_wind(&mut self.rng);
        let callsigns: Vec<String> = self.aircraft.keys().cloned().collect();
        for callsign in callsigns {
            let Some(ac) = self.aircraft.get_mut(&callsign) else {
                continue;
            };
            let ctx = FlightContext {
                scenario: &self.scenario,
                frame: &self.frame,
                wind,
            };
            if let Some(passed) = step_aircraft(ac, &ctx) {
                self.run_waypoint_commands(&callsign, &passed.commands);
            }
        }
    }

    /// Run the commands attached to a fix, stopping if the aircraft is deleted.
    pub(super) fn run_waypoint_commands(&mut self, callsign: &str, commands: &[WaypointCommand]) {
        for command in commands {
            match command {
                WaypointCommand::Handoff => {
                    let Some(ac) = self.aircraft.get_mut(callsign) else {
                        return;
                    };
                    ac.inbound_handoff_controller = self.scenario.callsign.clone();
                    self.events.post(SimEvent::OfferedHandoff {
                        callsign: callsign.to_string(),
                        from: ac.tracking_controller.clone(),
                        to: self.scenario.callsign.clone(),
                    });
                }
                WaypointCommand::Delete => {
                    info!("{}: deleted at end of route", callsign);
                    self.remove_aircraft(callsign);
                    return;
                }
            }
        }
    }

    pub(super) fn remove_aircraft(&mut self, callsign: &str) -> bool {
        self.handoffs.cancel(callsign);
        if self.aircraft.remove(callsign).is_some() {
            self.events.post(SimEvent::Removed {
                callsign: callsign.to_string(),
            });
            true
        } else {
            false
        }
    }

    fn update_tracks(&mut self, now: DateTime<Utc>) {
        let history = self.config.track_history;
        let mut culled = Vec::new();
        for (callsign, ac) in self.aircraft.iter_mut() {
            ac.add_track(
                RadarTrack {
                    position: ac.position,
                    altitude: ac.altitude.round() as i32,
                    groundspeed: ac.groundspeed.round() as i32,
                    heading: normalize_heading(ac.heading - self.frame.magnetic_variation),
                    time: now,
                },
                history,
            );

            let far_away = ac.is_departure
                && self
                    .scenario
                    .airport(&ac.flight_plan.departure_airport)
                    .and_then(|ap| ap.location)
                    .map_or(false, |loc| {
                        nm_distance(ac.position, loc) > self.config.departure_cull_nm
                    });
            if far_away {
                culled.push(callsign.clone());
            } else {
                self.events.post(SimEvent::Modified {
                    callsign: callsign.clone(),
                });
            }
        }
        for callsign in culled {
            debug!("{}: departure left the area", callsign);
            self.remove_aircraft(&callsign);
        }
    }

    fn spawn_due(&mut self, now: DateTime<Utc>) {
        for i in 0..self.schedules.len() {
            if self.remaining_launches == 0 {
                return;
            }
            if !self.schedules[i].is_due(now) {
                continue;
            }
            self.spawn_from_schedule(i);
            self.schedules[i].reschedule(now, &mut self.rng);
        }
    }

    fn spawn_from_schedule(&mut self, index: usize) {
        for _ in 0..SPAWN_ATTEMPTS {
            let result = match self.schedules[index].kind.clone() {
                ScheduleKind::Departure { airport, runway } => {
                    self.build_departure(index, &airport, &runway)
                }
                ScheduleKind::Arrival { airport, group } => self.build_arrival(&airport, &group),
            };
            match result {
                Ok((spawned, _)) if self.aircraft.contains_key(&spawned.aircraft.callsign) => {
                    debug!("{}: callsign in use, resampling", spawned.aircraft.callsign);
                }
                Ok((spawned, departure)) => {
                    if departure.is_some() {
                        self.schedules[index].last_departure = departure;
                    }
                    self.launch(spawned);
                    return;
                }
                Err(err) => {
                    warn!(
                        "{}: skipping spawn: {}",
                        self.schedules[index].airport(),
                        err
                    );
                    return;
                }
            }
        }
        warn!(
            "{}: no free callsign after {} attempts",
            self.schedules[index].airport(),
            SPAWN_ATTEMPTS
        );
    }

    fn build_departure(
        &mut self,
        index: usize,
        airport: &str,
        runway: &str,
    ) -> Result<(Spawned, Option<usize>), SimError> {
        let ap = self
            .scenario
            .airport(airport)
            .ok_or_else(|| SimError::Unable(format!("{}: airport not in scenario", airport)))?;
        let rwy = ap
            .departure_runways
            .iter()
            .find(|r| r.runway == runway)
            .ok_or_else(|| SimError::Unable(format!("{}: no runway {}", airport, runway)))?;
        let chosen = sample_departure(&mut self.rng, ap, runway, &self.schedules[index])
            .ok_or_else(|| {
                SimError::Unable(format!("{} runway {}: no eligible departures", airport, runway))
            })?;
        let spawned = make_departure(
            &mut self.rng,
            &self.reference,
            &self.frame,
            ap,
            rwy,
            &ap.departures[chosen],
        )?;
        Ok((spawned, Some(chosen)))
    }

    fn build_arrival(
        &mut self,
        airport: &str,
        group: &str,
    ) -> Result<(Spawned, Option<usize>), SimError> {
        let ap = self
            .scenario
            .airport(airport)
            .ok_or_else(|| SimError::Unable(format!("{}: airport not in scenario", airport)))?;
        let grp = ap
            .arrival_groups
            .iter()
            .find(|g| g.name == group)
            .ok_or_else(|| SimError::Unable(format!("{}: no arrival group {}", airport, group)))?;
        let arrival = sample(&mut self.rng, &grp.arrivals)
            .ok_or_else(|| SimError::Unable(format!("{}: arrival group {} is empty", airport, group)))?;
        let spawned = make_arrival(&mut self.rng, &self.reference, &self.frame, ap, arrival)?;
        Ok((spawned, None))
    }

    fn launch(&mut self, spawned: Spawned) {
        let Spawned { aircraft, commands } = spawned;
        let callsign = aircraft.callsign.clone();
        info!(
            "launched {} {} {} -> {}",
            callsign,
            aircraft.flight_plan.aircraft_type,
            aircraft.flight_plan.departure_airport,
            aircraft.flight_plan.arrival_airport
        );
        self.aircraft.insert(callsign.clone(), aircraft);
        self.remaining_launches = self.remaining_launches.saturating_sub(1);
        self.events.post(SimEvent::Added {
            callsign: callsign.clone(),
        });
        self.run_waypoint_commands(&callsign, &commands);
    }
}
