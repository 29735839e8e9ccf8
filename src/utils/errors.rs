use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    InvalidConfig(String),

    #[error("No aircraft with callsign {0}")]
    NoAircraftForCallsign(String),

    #[error("No controller {0}")]
    NoController(String),

    #[error("{0}: no flight plan filed")]
    NoFlightPlan(String),

    #[error("{0}: another controller has the track")]
    OtherControllerHasTrack(String),

    #[error("{0}: not being handed off to us")]
    NotBeingHandedOffToMe(String),

    #[error("Arrival airport {0} is not in the scenario")]
    ArrivalAirportUnknown(String),

    #[error("Unknown approach {0}")]
    UnknownApproach(String),

    #[error("Cleared for {0}, which was not the expected approach")]
    ClearedForUnexpectedApproach(String),

    #[error("{0}: not on course for the approach")]
    NotOnApproachCourse(String),

    #[error("{0}: fix not found in route")]
    FixNotFoundInRoute(String),

    #[error("Invalid waypoint: {0}")]
    WaypointParse(String),

    #[error("Invalid latitude/longitude: {0}")]
    LatLongParse(String),

    #[error("Aircraft type {0} not in performance database")]
    UnknownAircraftType(String),

    #[error("Unable: {0}")]
    Unable(String),

    #[error("Scenario validation failed:\n{}", .0.join("\n"))]
    ScenarioValidation(Vec<String>),
}

/// Collects load-time problems under a `/`-separated context path so every
/// error in a scenario is reported at once.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    hierarchy: Vec<String>,
    errors: Vec<String>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, context: impl Into<String>) {
        self.hierarchy.push(context.into());
    }

    pub fn pop(&mut self) {
        self.hierarchy.pop();
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        if self.hierarchy.is_empty() {
            self.errors.push(message.to_string());
        } else {
            self.errors
                .push(format!("{}: {}", self.hierarchy.join(" / "), message));
        }
    }

    /// Run `f` with `context` pushed, popping it afterwards.
    pub fn scoped<T>(&mut self, context: impl Into<String>, f: impl FnOnce(&mut Self) -> T) -> T {
        self.push(context);
        let result = f(self);
        self.pop();
        result
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_result(self) -> Result<(), SimError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SimError::ScenarioValidation(self.errors))
        }
    }
}
