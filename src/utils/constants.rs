pub const NM_PER_DEGREE_LATITUDE: f64 = 60.0;
pub const EARTH_RADIUS_M: f64 = 6_371_000.0; // m
pub const NM_PER_METER: f64 = 0.000_539_957;

// Flight model limits
pub const MAX_TURN_RATE: f64 = 3.0; // deg/s
pub const AIRBORNE_SPEED_FACTOR: f64 = 1.1; // multiple of V_min
pub const TAS_GAIN_PER_1000_FT: f64 = 0.02;
pub const SPEED_LIMIT_BELOW_10K: f64 = 250.0; // kts
pub const SPEED_LIMIT_ALTITUDE: f64 = 10_000.0; // ft
pub const FINAL_APPROACH_SPEED_CAP: f64 = 210.0; // kts
pub const HIGH_PERFORMANCE_CLIMB: f64 = 2500.0; // ft/min
pub const HIGH_PERFORMANCE_CLIMB_ALTITUDE: f64 = 5000.0; // ft
pub const HIGH_PERFORMANCE_CLIMB_REDUCTION: f64 = 500.0; // ft/min

// Route following and approach capture
pub const WAYPOINT_ARRIVAL_RADIUS_NM: f64 = 0.75;
pub const LOCALIZER_INTERCEPT_WINDOW: f64 = 40.0; // deg
pub const CAPTURE_HEADING_TOLERANCE: f64 = 2.0; // deg
pub const CAPTURE_DISTANCE_NM: f64 = 0.2;

// Simulation cadences
pub const FLIGHT_UPDATE_INTERVAL_SECS: i64 = 1;
pub const TRACK_UPDATE_INTERVAL_SECS: i64 = 5;
pub const PRESPAWN_SECONDS: i64 = 45;

// Spawning
pub const ARRIVAL_FILED_ALTITUDE: i32 = 39_000;
pub const MAX_SQUAWK: u16 = 0o7000;
pub const SPAWN_ATTEMPTS: usize = 10;
pub const HANDOFF_MIN_DELAY_SECS: i64 = 2;
pub const HANDOFF_DELAY_SPREAD_SECS: i64 = 10;

/// Flight numbers that are never handed out to simulated traffic.
pub const BLOCKED_CALLSIGNS: &[&str] = &[
    "AAL11", "UAL175", "AAL77", "UAL93", "MAS17", "MAS370", "GWI18G", "GWI9525", "MSR990",
    "FDX705", "AFR8969", "PAA1736", "KLM4805", "JAL123", "AIC182", "AAL191", "PAA103", "KAL007",
    "AAL587", "CAL140", "TWA800", "SWR111", "KAL801", "AFR447", "CAL611", "LOT5055", "ICE001",
];
