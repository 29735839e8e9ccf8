//! Traffic generation: when to launch, what to launch, and how to build it.

mod construct;
mod sampling;
mod schedule;

pub use construct::{make_arrival, make_departure, Spawned};
pub use sampling::{sample_airline_aircraft, sample_callsign, sample_departure};
pub use schedule::{build_schedules, ScheduleKind, SpawnSchedule};
