pub mod config;
pub mod database;
pub mod environment;
pub mod events;
mod time;

pub use config::{ArrivalGroupOverride, DepartureRunwayOverride, SimulationConfig, WindConfig};
pub use database::{
    Airline, AirlineDb, CallsignFormats, FleetEntry, Locator, NavDatabase, PerformanceDb,
    ReferenceData,
};
pub use environment::EnvironmentResource;
pub use events::{EventStream, SimEvent, SubscriberId};
pub use time::SimClock;
