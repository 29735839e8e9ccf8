//! Scenario JSON used across the integration tests. Every airport sits at
//! 40N 73W with no magnetic variation so headings read as true.

/// One runway launching one departure a second via exit EAST.
pub const DEPARTURE_SCENARIO: &str = r#"{
    "callsign": "APP",
    "controllers": [{"callsign": "BOS", "sector_id": "B"}],
    "airports": [{
        "ICAO": "KAAA",
        "location": "40.0,-73.0",
        "departure_controller": "APP",
        "named_locations": {
            "_RWY1": "40.0,-73.0",
            "_CLIMB": "40.4,-73.0",
            "EAST": "40.5,-72.0"
        },
        "scratchpads": {"EAST": "E"},
        "departures": [
            {"exit": "EAST", "destination": "KBOS", "route": "J42", "airlines": [{"icao": "JBU"}]}
        ],
        "departure_runways": [{
            "runway": "1", "altitude": 100, "rate": 3600,
            "exit_routes": {
                "EAST": {"route": "DEP1", "cleared_altitude": 5000, "waypoints": "_RWY1 _CLIMB"}
            }
        }]
    }]
}"#;

/// Two exit categories, two exits each, on a runway with full challenge.
pub const CHALLENGE_SCENARIO: &str = r#"{
    "callsign": "APP",
    "airports": [{
        "ICAO": "KAAA",
        "location": "40.0,-73.0",
        "named_locations": {
            "_RWY1": "40.0,-73.0",
            "A1": "40.5,-72.5",
            "A2": "40.5,-72.4",
            "B1": "39.5,-73.5",
            "B2": "39.5,-73.6"
        },
        "exit_categories": {"A1": "A", "A2": "A", "B1": "B", "B2": "B"},
        "scratchpads": {"A1": "A1", "A2": "A2", "B1": "B1", "B2": "B2"},
        "departures": [
            {"exit": "A1", "destination": "KBOS", "airlines": [{"icao": "JBU"}]},
            {"exit": "A2", "destination": "KBOS", "airlines": [{"icao": "JBU"}]},
            {"exit": "B1", "destination": "KPHL", "airlines": [{"icao": "DAL"}]},
            {"exit": "B2", "destination": "KPHL", "airlines": [{"icao": "DAL"}]}
        ],
        "departure_runways": [{
            "runway": "1", "altitude": 20, "rate": 3600, "challenge": 1.0,
            "exit_routes": {
                "A1": {"route": "X", "cleared_altitude": 5000, "waypoints": "_RWY1 #10"},
                "A2": {"route": "X", "cleared_altitude": 5000, "waypoints": "_RWY1 #10"},
                "B1": {"route": "X", "cleared_altitude": 5000, "waypoints": "_RWY1 #10"},
                "B2": {"route": "X", "cleared_altitude": 5000, "waypoints": "_RWY1 #10"}
            }
        }]
    }]
}"#;

/// No traffic of its own; tests place aircraft by hand. The ILS runs up
/// the 045 course into _RWY1 from KRSTL (10 nm out) and FAF (5 nm out).
pub const APPROACH_SCENARIO: &str = r#"{
    "callsign": "APP",
    "controllers": [{"callsign": "BOS", "sector_id": "B"}],
    "airports": [{
        "ICAO": "KAAA",
        "location": "40.0,-73.0",
        "named_locations": {
            "_RWY1": "40.0,-73.0",
            "FAF": "39.941074,-73.076922",
            "KRSTL": "39.882149,-73.153844",
            "ROSLY": "39.9,-73.3"
        },
        "approaches": [
            {"short_name": "I1", "full_name": "ILS Runway 1", "type": "ILS",
             "waypoints": ["KRSTL@a3000 FAF@a2000 _RWY1"]},
            {"short_name": "R1", "full_name": "RNAV Runway 1", "type": "RNAV",
             "waypoints": ["ROSLY@a3000 FAF@a2000 _RWY1"]}
        ]
    }]
}"#;

/// Departures and arrivals on both ends of a small terminal area.
pub const BUSY_SCENARIO: &str = r#"{
    "callsign": "APP",
    "wind": {"direction": 270, "speed": 15, "gust": 10},
    "controllers": [{"callsign": "BOS", "sector_id": "B"}, {"callsign": "NY_CTR", "sector_id": "N"}],
    "airports": [{
        "ICAO": "KAAA",
        "location": "40.0,-73.0",
        "departure_controller": "APP",
        "named_locations": {
            "_RWY1": "40.0,-73.0",
            "FAF": "39.941074,-73.076922",
            "KRSTL": "39.882149,-73.153844",
            "ENTRY": "40.6,-73.8",
            "NORTH": "41.0,-73.0",
            "MID": "40.2,-73.4"
        },
        "exit_categories": {"MERIT": "East", "NORTH": "North"},
        "approaches": [
            {"short_name": "I1", "full_name": "ILS Runway 1", "type": "ILS",
             "waypoints": ["KRSTL@a3000 FAF@a2000 _RWY1"]}
        ],
        "departures": [
            {"exit": "MERIT", "destination": "KBOS", "route": "J42", "airlines": [{"icao": "JBU"}]},
            {"exit": "NORTH", "destination": "KALB", "airlines": [{"icao": "DAL"}, {"icao": "JBU", "fleet": "long"}]}
        ],
        "departure_runways": [{
            "runway": "1", "altitude": 20, "rate": 40, "challenge": 0.5,
            "exit_routes": {
                "MERIT": {"route": "DEP1", "cleared_altitude": 5000, "waypoints": "_RWY1 #40"},
                "NORTH": {"route": "DEP1", "cleared_altitude": 7000, "waypoints": "_RWY1 #10"}
            }
        }],
        "arrival_runways": [{"runway": "1"}],
        "arrival_groups": [{"name": "West", "rate": 30, "arrivals": [{
            "name": "ENTRY1",
            "waypoints": "ENTRY @ MID@a6000 KRSTL@a3000",
            "route": "STAR1",
            "initial_controller": "BOS",
            "initial_altitude": 12000,
            "initial_speed": 280,
            "speed_restriction": 250,
            "expect_approach": "I1",
            "airlines": [{"icao": "DAL", "airport": "KORD"}, {"icao": "JBU", "airport": "KFLL"}]
        }]}]
    }]
}"#;
