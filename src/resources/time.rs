use chrono::{DateTime, Duration, Utc};

/// Maps wallclock time onto simulation time.
///
/// The wallclock is only used to measure how much time passed between
/// calls; everything downstream reads `now()`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimClock {
    current: DateTime<Utc>,
    last_wallclock: DateTime<Utc>,
    rate: f64,
    paused: bool,
}

impl SimClock {
    pub fn new(start: DateTime<Utc>, rate: f64) -> Self {
        Self {
            current: start,
            last_wallclock: start,
            rate: rate.max(0.0),
            paused: false,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.current
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate.max(0.0);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance by the scaled wallclock delta since the previous call and
    /// return the sim-time that elapsed. Does nothing while paused.
    pub fn advance(&mut self, wallclock: DateTime<Utc>) -> Duration {
        if self.paused {
            return Duration::zero();
        }

        let elapsed = (wallclock - self.last_wallclock).max(Duration::zero());
        self.last_wallclock = wallclock;

        let nanos = elapsed.num_nanoseconds().unwrap_or(i64::MAX) as f64 * self.rate;
        let scaled = Duration::nanoseconds(nanos.round().min(i64::MAX as f64) as i64);
        self.current = self.current + scaled;
        scaled
    }

    /// Flip the pause flag; the wallclock reference restarts at `wallclock`
    /// so time spent paused is never simulated.
    pub fn toggle_pause(&mut self, wallclock: DateTime<Utc>) {
        self.paused = !self.paused;
        self.last_wallclock = wallclock;
    }
}
