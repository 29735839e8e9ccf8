//! The simulation aggregate: every piece of mutable state a session has,
//! advanced by [`Simulation::tick`] and changed by controller commands.

pub mod commands;
mod update;

use chrono::{DateTime, Duration, Utc};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use tracing::info;

use crate::components::Aircraft;
use crate::resources::{
    EnvironmentResource, EventStream, ReferenceData, SimClock, SimEvent, SimulationConfig,
    SubscriberId,
};
use crate::scenario::{validate_scenario, Scenario};
use crate::systems::spawn::{build_schedules, SpawnSchedule};
use crate::systems::HandoffTimers;
use crate::utils::{NavFrame, RngManager, SimError, PRESPAWN_SECONDS};

const TRAFFIC_STREAM: &str = "traffic";

pub struct Simulation {
    scenario: Scenario,
    reference: ReferenceData,
    config: SimulationConfig,
    frame: NavFrame,
    environment: EnvironmentResource,
    clock: SimClock,
    seed: u64,
    rng: ChaCha8Rng,

    aircraft: BTreeMap<String, Aircraft>,
    handoffs: HandoffTimers,
    schedules: Vec<SpawnSchedule>,
    remaining_launches: u32,

    last_flight_update: DateTime<Utc>,
    last_track_update: DateTime<Utc>,
    events: EventStream,
}

impl Simulation {
    /// Validate the scenario against the reference data and set up a session
    /// whose sim-time starts at `wallclock`.
    ///
    /// Unless disabled in the config, the first 45 seconds of traffic are
    /// flown before this returns so the user does not start with an empty
    /// scope.
    pub fn new(
        mut scenario: Scenario,
        reference: ReferenceData,
        config: SimulationConfig,
        wallclock: DateTime<Utc>,
    ) -> Result<Self, SimError> {
        config.validate()?;
        validate_scenario(&mut scenario, &reference, &config)?;

        let rngs = match config.seed {
            Some(seed) => RngManager::new(seed),
            None => RngManager::from_entropy(),
        };
        let mut rng = rngs.get_rng(TRAFFIC_STREAM);

        let frame = scenario.nav_frame();
        let wind = config.wind.unwrap_or(scenario.wind);
        let schedules = build_schedules(&scenario, &config, wallclock, &mut rng);

        info!(
            "simulation for {} with {} airports, {} spawn schedules, seed {}",
            scenario.callsign,
            scenario.airports.len(),
            schedules.len(),
            rngs.master_seed()
        );

        let mut sim = Self {
            frame,
            environment: EnvironmentResource::new(wind),
            clock: SimClock::new(wallclock, config.sim_rate),
            seed: rngs.master_seed(),
            rng,
            aircraft: BTreeMap::new(),
            handoffs: HandoffTimers::new(),
            schedules,
            remaining_launches: config.launches,
            last_flight_update: wallclock,
            last_track_update: wallclock,
            events: EventStream::new(),
            scenario,
            reference,
            config,
        };
        if sim.config.prespawn {
            sim.prespawn();
        }
        Ok(sim)
    }

    // Fly the pre-warm period second by second so launches scheduled before
    // the session starts are already airborne
    fn prespawn(&mut self) {
        let now = self.clock.now();
        let start = now - Duration::seconds(PRESPAWN_SECONDS);
        self.last_flight_update = start;
        self.last_track_update = start;
        for i in 1..=PRESPAWN_SECONDS {
            self.update_state(start + Duration::seconds(i));
        }
        info!("prespawn launched {} aircraft", self.aircraft.len());
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn sim_rate(&self) -> f64 {
        self.clock.rate()
    }

    pub fn set_sim_rate(&mut self, rate: f64) {
        self.clock.set_rate(rate);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The user's controller callsign.
    pub fn user_callsign(&self) -> &str {
        &self.scenario.callsign
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn frame(&self) -> &NavFrame {
        &self.frame
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn aircraft(&self, callsign: &str) -> Option<&Aircraft> {
        self.aircraft.get(callsign)
    }

    /// Every live aircraft, in callsign order.
    pub fn fleet(&self) -> impl Iterator<Item = &Aircraft> {
        self.aircraft.values()
    }

    pub fn fleet_size(&self) -> usize {
        self.aircraft.len()
    }

    pub fn remaining_launches(&self) -> u32 {
        self.remaining_launches
    }

    pub fn schedules(&self) -> &[SpawnSchedule] {
        &self.schedules
    }

    pub fn handoff_deadline(&self, callsign: &str) -> Option<DateTime<Utc>> {
        self.handoffs.deadline(callsign)
    }

    pub fn subscribe(&mut self) -> SubscriberId {
        self.events.subscribe()
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.events.unsubscribe(id);
    }

    /// Events posted since the subscriber last asked.
    pub fn events(&mut self, id: SubscriberId) -> Vec<SimEvent> {
        self.events.get(id)
    }

    /// Insert an aircraft built outside the spawner, e.g. by a host restoring
    /// a drill. Fails if the callsign is taken.
    pub fn add_aircraft(&mut self, aircraft: Aircraft) -> Result<(), SimError> {
        if self.aircraft.contains_key(&aircraft.callsign) {
            return Err(SimError::Unable(format!(
                "{}: callsign already in use",
                aircraft.callsign
            )));
        }
        let callsign = aircraft.callsign.clone();
        self.aircraft.insert(callsign.clone(), aircraft);
        self.events.post(SimEvent::Added { callsign });
        Ok(())
    }
}
