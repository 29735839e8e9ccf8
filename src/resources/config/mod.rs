pub mod environment;
pub mod simulation;

pub use environment::WindConfig;
pub use simulation::{ArrivalGroupOverride, DepartureRunwayOverride, SimulationConfig};
