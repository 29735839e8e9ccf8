use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::collections::BTreeMap;

use crate::utils::{HANDOFF_DELAY_SPREAD_SECS, HANDOFF_MIN_DELAY_SECS};

/// Pending automatic acceptances of handoffs the user initiated, keyed by
/// callsign.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandoffTimers {
    deadlines: BTreeMap<String, DateTime<Utc>>,
}

impl HandoffTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arrange for the receiving controller to accept between 2 and 11
    /// seconds from `now`. Replaces any timer already running for the
    /// aircraft.
    pub fn schedule<R: Rng + ?Sized>(
        &mut self,
        callsign: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> DateTime<Utc> {
        let delay = HANDOFF_MIN_DELAY_SECS + rng.gen_range(0..HANDOFF_DELAY_SPREAD_SECS);
        let deadline = now + Duration::seconds(delay);
        self.deadlines.insert(callsign.to_string(), deadline);
        deadline
    }

    pub fn cancel(&mut self, callsign: &str) -> bool {
        self.deadlines.remove(callsign).is_some()
    }

    pub fn deadline(&self, callsign: &str) -> Option<DateTime<Utc>> {
        self.deadlines.get(callsign).copied()
    }

    /// Remove and return, in callsign order, every timer that is due.
    pub fn expire(&mut self, now: DateTime<Utc>) -> Vec<String> {
        let due: Vec<String> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(callsign, _)| callsign.clone())
            .collect();
        for callsign in &due {
            self.deadlines.remove(callsign);
        }
        due
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
