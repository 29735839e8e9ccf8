use std::collections::{BTreeMap, BTreeSet};

use super::{AirlineRef, Scenario};
use crate::components::Waypoint;
use crate::resources::{Locator, NavDatabase, ReferenceData, SimulationConfig};
use crate::utils::{ErrorCollector, LatLong, SimError};

const MAX_SPEED_RESTRICTION: i32 = 300;

/// Resolves names against the global database, then the airport's named
/// locations, then as a literal latitude/longitude.
struct ScenarioLocator<'a> {
    nav: &'a NavDatabase,
    local: &'a BTreeMap<String, LatLong>,
}

impl Locator for ScenarioLocator<'_> {
    fn locate(&self, name: &str) -> Option<LatLong> {
        self.nav
            .locate(name)
            .or_else(|| self.local.locate(name))
            .or_else(|| name.parse().ok())
    }
}

fn resolve_waypoints(
    waypoints: &mut [Waypoint],
    locator: &impl Locator,
    min_len: usize,
    e: &mut ErrorCollector,
) {
    if waypoints.len() < min_len {
        e.error(format!("at least {} waypoints are required", min_len));
    }
    for wp in waypoints.iter_mut() {
        match locator.locate(&wp.fix) {
            Some(p) => wp.location = p,
            None => e.error(format!("unknown fix \"{}\"", wp.fix)),
        }
        if let Some(spd) = wp.speed {
            if !(1..=MAX_SPEED_RESTRICTION).contains(&spd) {
                e.error(format!("{}: speed restriction {} out of range", wp.fix, spd));
            }
        }
        if let Some(alt) = wp.altitude {
            if alt <= 0 {
                e.error(format!("{}: altitude restriction must be positive", wp.fix));
            }
        }
    }
}

fn check_airlines(airlines: &[AirlineRef], reference: &ReferenceData, e: &mut ErrorCollector) {
    if airlines.is_empty() {
        e.error("no airlines specified");
    }
    for al in airlines {
        let Some(airline) = reference.airlines.get(&al.icao) else {
            e.error(format!("airline \"{}\" not in database", al.icao));
            continue;
        };
        let Some(fleet) = airline.fleet(al.fleet.as_deref()) else {
            e.error(format!(
                "airline \"{}\" has no \"{}\" fleet",
                al.icao,
                al.fleet.as_deref().unwrap_or(crate::resources::database::DEFAULT_FLEET)
            ));
            continue;
        };
        if fleet.iter().all(|f| f.count == 0) {
            e.error(format!("airline \"{}\" fleet is empty", al.icao));
        }
        for entry in fleet {
            if reference.performance.get(&entry.icao).is_none() {
                e.error(format!(
                    "airline \"{}\": aircraft \"{}\" not in performance database",
                    al.icao, entry.icao
                ));
            }
        }
    }
}

fn check_positive(value: Option<i32>, what: &str, e: &mut ErrorCollector) {
    if let Some(v) = value {
        if v <= 0 {
            e.error(format!("{} must be positive or omitted, got {}", what, v));
        }
    }
}

/// Resolve every location in the scenario and cross-check it against the
/// reference databases and the run configuration.
///
/// All problems are collected and returned together as
/// [`SimError::ScenarioValidation`].
pub fn validate_scenario(
    scenario: &mut Scenario,
    reference: &ReferenceData,
    config: &SimulationConfig,
) -> Result<(), SimError> {
    let mut e = ErrorCollector::new();

    if scenario.callsign.is_empty() {
        e.error("user callsign is empty");
    }
    if scenario.airports.is_empty() {
        e.error("no airports defined");
    }

    let controllers: BTreeSet<String> = scenario
        .controllers
        .iter()
        .map(|c| c.callsign.clone())
        .chain(std::iter::once(scenario.callsign.clone()))
        .collect();
    let known_controller = |id: &str| {
        controllers.contains(id) || scenario.controllers.iter().any(|c| c.sector_id == id)
    };

    // Checks that only read the scenario run first so the borrow of
    // `scenario.controllers` ends before locations are written
    for ap in &scenario.airports {
        e.push(ap.icao.clone());
        if !ap.departure_controller.is_empty() && !known_controller(&ap.departure_controller) {
            e.error(format!(
                "departure controller \"{}\" unknown",
                ap.departure_controller
            ));
        }
        for group in &ap.arrival_groups {
            e.push(group.name.clone());
            for arr in &group.arrivals {
                e.push(arr.name.clone());
                if !known_controller(&arr.initial_controller) {
                    e.error(format!(
                        "initial controller \"{}\" unknown",
                        arr.initial_controller
                    ));
                }
                if let Some(appr) = &arr.expect_approach {
                    if ap.approach_index(appr).is_none() {
                        e.error(format!("expected approach \"{}\" unknown", appr));
                    }
                }
                e.pop();
            }
            e.pop();
        }
        e.pop();
    }

    for ap in scenario.airports.iter_mut() {
        e.push(ap.icao.clone());
        let locator = ScenarioLocator {
            nav: &reference.nav,
            local: &ap.named_locations,
        };

        if ap.location.is_none() {
            ap.location = locator.locate(&ap.icao);
            if ap.location.is_none() {
                e.error("airport location unknown");
            }
        }

        let mut short_names = BTreeSet::new();
        for appr in ap.approaches.iter_mut() {
            e.push(format!("approach {}", appr.short_name));
            if !short_names.insert(appr.short_name.to_uppercase()) {
                e.error("duplicate approach name");
            }
            if appr.waypoints.is_empty() {
                e.error("no waypoints");
            }
            for set in appr.waypoints.iter_mut() {
                resolve_waypoints(&mut set.0, &locator, 2, &mut e);
            }
            e.pop();
        }

        for group in ap.arrival_groups.iter_mut() {
            e.push(group.name.clone());
            if !(group.rate.is_finite() && group.rate >= 0.0) {
                e.error(format!("invalid rate {}", group.rate));
            }
            if group.arrivals.is_empty() {
                e.error("no arrivals");
            }
            for arr in group.arrivals.iter_mut() {
                e.push(arr.name.clone());
                resolve_waypoints(&mut arr.waypoints.0, &locator, 2, &mut e);
                for (rwy, wps) in arr.runway_waypoints.iter_mut() {
                    e.scoped(format!("runway {}", rwy), |e| {
                        resolve_waypoints(&mut wps.0, &locator, 2, e)
                    });
                }
                check_positive(arr.cleared_altitude, "cleared_altitude", &mut e);
                check_positive(arr.speed_restriction, "speed_restriction", &mut e);
                if arr.initial_altitude <= 0 {
                    e.error("initial_altitude must be positive");
                }
                if arr.initial_speed <= 0 {
                    e.error("initial_speed must be positive");
                }
                check_airlines(&arr.airlines, reference, &mut e);
                e.pop();
            }
            e.pop();
        }

        e.push("departures");
        for dep in ap.departures.iter_mut() {
            e.push(dep.exit.clone());
            match locator.locate(&dep.exit) {
                Some(p) => dep.exit_location = p,
                None => e.error(format!("unknown exit fix \"{}\"", dep.exit)),
            }
            if dep.destination.is_empty() {
                e.error("no destination");
            }
            check_positive(dep.altitude, "altitude", &mut e);
            check_airlines(&dep.airlines, reference, &mut e);
            e.pop();
        }
        e.pop();

        let exits: BTreeSet<String> = ap.departures.iter().map(|d| d.exit.clone()).collect();
        for rwy in ap.departure_runways.iter_mut() {
            e.push(format!("runway {}", rwy.runway));
            if !(rwy.rate.is_finite() && rwy.rate >= 0.0) {
                e.error(format!("invalid rate {}", rwy.rate));
            }
            if let Some(c) = rwy.challenge {
                if !(0.0..=1.0).contains(&c) {
                    e.error(format!("challenge {} not in [0, 1]", c));
                }
            }
            for exit in &exits {
                if !rwy.exit_routes.contains_key(exit) {
                    e.error(format!("no exit route for \"{}\"", exit));
                }
            }
            for (exit, route) in rwy.exit_routes.iter_mut() {
                e.push(format!("exit route {}", exit));
                resolve_waypoints(&mut route.waypoints.0, &locator, 1, &mut e);
                if route.cleared_altitude <= 0 {
                    e.error("cleared_altitude must be positive");
                }
                e.pop();
            }
            e.pop();
        }

        e.pop();
    }

    for ovr in &config.departure_runways {
        let found = scenario
            .airport(&ovr.airport)
            .map(|ap| ap.departure_runways.iter().any(|r| r.runway == ovr.runway))
            .unwrap_or(false);
        if !found {
            e.error(format!(
                "config: departure runway {} {} not in scenario",
                ovr.airport, ovr.runway
            ));
        }
    }
    for ovr in &config.arrival_groups {
        let found = scenario
            .airport(&ovr.airport)
            .map(|ap| ap.arrival_groups.iter().any(|g| g.name == ovr.group))
            .unwrap_or(false);
        if !found {
            e.error(format!(
                "config: arrival group {} {} not in scenario",
                ovr.airport, ovr.group
            ));
        }
    }

    e.into_result()
}
