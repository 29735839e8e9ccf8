use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::collections::BTreeSet;

use crate::resources::SimulationConfig;
use crate::scenario::Scenario;
use crate::utils::PRESPAWN_SECONDS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleKind {
    Departure { airport: String, runway: String },
    Arrival { airport: String, group: String },
}

/// Launch timing for one departure runway or arrival group.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSchedule {
    pub kind: ScheduleKind,
    /// Aircraft per hour; zero disables the schedule.
    pub rate: f64,
    pub enabled: bool,
    pub challenge: f64,
    pub disabled_categories: BTreeSet<String>,
    pub next_spawn: DateTime<Utc>,
    /// Index into the airport's departures of the previous launch.
    pub last_departure: Option<usize>,
}

impl SpawnSchedule {
    pub fn new(kind: ScheduleKind, rate: f64, start: DateTime<Utc>) -> Self {
        Self {
            kind,
            rate,
            enabled: true,
            challenge: 0.0,
            disabled_categories: BTreeSet::new(),
            next_spawn: start,
            last_departure: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.enabled && self.rate > 0.0
    }

    pub fn average_interval_secs(&self) -> Option<f64> {
        (self.rate > 0.0).then(|| 3600.0 / self.rate)
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.is_active() && self.next_spawn <= now
    }

    /// Offset the first launch uniformly within half an interval of
    /// `start`, pulled back by the pre-warm period.
    pub fn initialize<R: Rng + ?Sized>(&mut self, start: DateTime<Utc>, rng: &mut R) {
        let offset = match self.average_interval_secs() {
            Some(avg) => rng.gen_range(-avg / 2.0..avg / 2.0),
            None => 0.0,
        };
        self.next_spawn = start + secs(offset) - Duration::seconds(PRESPAWN_SECONDS);
    }

    /// Next launch between 0.7 and 1.3 average intervals from `now`.
    pub fn reschedule<R: Rng + ?Sized>(&mut self, now: DateTime<Utc>, rng: &mut R) {
        if let Some(avg) = self.average_interval_secs() {
            self.next_spawn = now + secs(rng.gen_range(0.7 * avg..1.3 * avg));
        }
    }

    pub fn airport(&self) -> &str {
        match &self.kind {
            ScheduleKind::Departure { airport, .. } | ScheduleKind::Arrival { airport, .. } => {
                airport
            }
        }
    }
}

fn secs(s: f64) -> Duration {
    Duration::milliseconds((s * 1000.0).round() as i64)
}

/// Schedules for every departure runway and arrival group, in scenario
/// order: per airport, departure runways first and then arrival groups.
pub fn build_schedules<R: Rng + ?Sized>(
    scenario: &Scenario,
    config: &SimulationConfig,
    start: DateTime<Utc>,
    rng: &mut R,
) -> Vec<SpawnSchedule> {
    let mut schedules = Vec::new();
    for ap in &scenario.airports {
        for rwy in &ap.departure_runways {
            let ovr = config.departure_runway(&ap.icao, &rwy.runway);
            let kind = ScheduleKind::Departure {
                airport: ap.icao.clone(),
                runway: rwy.runway.clone(),
            };
            let mut s = SpawnSchedule::new(kind, ovr.and_then(|o| o.rate).unwrap_or(rwy.rate), start);
            s.enabled = ovr.and_then(|o| o.enabled).unwrap_or(rwy.enabled);
            s.challenge = ovr
                .and_then(|o| o.challenge)
                .or(rwy.challenge)
                .unwrap_or(config.departure_challenge);
            if let Some(o) = ovr {
                s.disabled_categories = o.disabled_categories.iter().cloned().collect();
            }
            s.initialize(start, rng);
            schedules.push(s);
        }
        for group in &ap.arrival_groups {
            let ovr = config.arrival_group(&ap.icao, &group.name);
            let kind = ScheduleKind::Arrival {
                airport: ap.icao.clone(),
                group: group.name.clone(),
            };
            let mut s =
                SpawnSchedule::new(kind, ovr.and_then(|o| o.rate).unwrap_or(group.rate), start);
            s.enabled = ovr.and_then(|o| o.enabled).unwrap_or(group.enabled);
            s.initialize(start, rng);
            schedules.push(s);
        }
    }
    schedules
}
