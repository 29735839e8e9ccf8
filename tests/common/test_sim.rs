use chrono::{DateTime, Duration, Utc};
use tracon::{
    components::Aircraft,
    resources::{ReferenceData, SimEvent, SimulationConfig, SubscriberId},
    scenario::Scenario,
    Simulation,
};

use super::{
    fixtures::create_test_reference,
    helpers::{create_test_config, t0},
};

// Builder for creating a test simulation with customizable configuration
pub struct TestSimBuilder {
    scenario: String,
    reference: ReferenceData,
    config: SimulationConfig,
    start: DateTime<Utc>,
}

impl TestSimBuilder {
    pub fn new(scenario: &str) -> Self {
        Self {
            scenario: scenario.to_string(),
            reference: create_test_reference(),
            config: create_test_config(1),
            start: t0(),
        }
    }

    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_launches(mut self, launches: u32) -> Self {
        self.config.launches = launches;
        self
    }

    pub fn with_prespawn(mut self, prespawn: bool) -> Self {
        self.config.prespawn = prespawn;
        self
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.config.sim_rate = rate;
        self
    }

    pub fn build(self) -> TestSim {
        let scenario = Scenario::from_json_str(&self.scenario).unwrap();
        let mut sim = Simulation::new(scenario, self.reference, self.config, self.start).unwrap();
        let subscriber = sim.subscribe();
        TestSim {
            sim,
            subscriber,
            wallclock: self.start,
            events: Vec::new(),
        }
    }
}

/// A simulation driven on a synthetic wallclock, one second per tick.
pub struct TestSim {
    pub sim: Simulation,
    pub subscriber: SubscriberId,
    pub wallclock: DateTime<Utc>,
    /// Every event seen since the last `take_events`.
    pub events: Vec<SimEvent>,
}

impl TestSim {
    pub fn step(&mut self) {
        self.advance(Duration::seconds(1));
    }

    pub fn advance(&mut self, wallclock_delta: Duration) {
        self.wallclock = self.wallclock + wallclock_delta;
        self.sim.tick(self.wallclock);
        let new_events = self.sim.events(self.subscriber);
        self.events.extend(new_events);
    }

    pub fn run_seconds(&mut self, seconds: u32) {
        for _ in 0..seconds {
            self.step();
        }
    }

    /// Step until `done` holds, at most `limit` seconds. Returns the number
    /// of steps taken, or `None` if the limit was hit.
    pub fn run_until(&mut self, limit: u32, mut done: impl FnMut(&Simulation) -> bool) -> Option<u32> {
        for i in 1..=limit {
            self.step();
            if done(&self.sim) {
                return Some(i);
            }
        }
        None
    }

    pub fn take_events(&mut self) -> Vec<SimEvent> {
        let pending = self.sim.events(self.subscriber);
        self.events.extend(pending);
        std::mem::take(&mut self.events)
    }

    pub fn add(&mut self, aircraft: Aircraft) {
        self.sim.add_aircraft(aircraft).unwrap();
        self.take_events();
    }

    pub fn aircraft(&self, callsign: &str) -> &Aircraft {
        self.sim
            .aircraft(callsign)
            .unwrap_or_else(|| panic!("no aircraft {}", callsign))
    }

    /// Callsigns of every aircraft added since the last `take_events`.
    pub fn added(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SimEvent::Added { callsign } => Some(callsign.clone()),
                _ => None,
            })
            .collect()
    }
}
