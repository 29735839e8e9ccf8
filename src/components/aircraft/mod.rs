pub mod flight_plan;
pub mod performance;
pub mod state;

pub use flight_plan::{FlightPlan, FlightRules};
pub use performance::{AircraftPerformance, PerformanceRates, PerformanceSpeeds, RunwayLengths};
pub use state::{Aircraft, RadarTrack, TurnDirection};
