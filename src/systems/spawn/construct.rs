use rand::Rng;
use tracing::warn;

use crate::components::{
    Aircraft, ApproachRef, FlightPlan, FlightRules, Waypoint, WaypointCommand,
};
use crate::resources::ReferenceData;
use crate::scenario::{Airport, Arrival, Departure, DepartureRunway};
use crate::utils::{NavFrame, SimError, ARRIVAL_FILED_ALTITUDE, MAX_SQUAWK};

use super::sampling::{sample_airline_aircraft, sample_callsign};

/// A freshly built aircraft and the commands attached to its first fix,
/// which the caller runs once the aircraft is in the fleet.
#[derive(Debug, Clone)]
pub struct Spawned {
    pub aircraft: Aircraft,
    pub commands: Vec<WaypointCommand>,
}

fn sample_squawk<R: Rng + ?Sized>(rng: &mut R) -> u16 {
    rng.gen_range(0..MAX_SQUAWK)
}

/// Put the aircraft on its first fix pointing at the second (or along the
/// first fix's outbound heading) and drop the first fix from the route.
fn place_at_first_waypoint(ac: &mut Aircraft, frame: &NavFrame) -> Vec<WaypointCommand> {
    if ac.waypoints.is_empty() {
        return Vec::new();
    }
    let first = ac.waypoints.remove(0);
    ac.position = first.location;
    if let Some(heading) = first.heading {
        ac.heading = heading as f64 % 360.0;
        ac.assigned_heading = Some(heading as f64);
    } else if let Some(next) = ac.waypoints.first() {
        ac.heading = frame.heading(first.location, next.location);
    }

    if let Some(next) = ac.waypoints.first() {
        if ac.assigned_altitude.is_none() {
            if let Some(alt) = next.altitude {
                ac.crossing_altitude = Some(alt);
            }
        }
        if ac.assigned_speed.is_none() {
            if let Some(spd) = next.speed {
                ac.crossing_speed = Some(spd);
            }
        }
    }

    let mut commands = first.commands;
    if commands.contains(&WaypointCommand::Delete) {
        warn!("{}: ignoring delete at spawn fix {}", ac.callsign, first.fix);
        commands.retain(|c| *c != WaypointCommand::Delete);
    }
    commands
}

pub fn make_departure<R: Rng + ?Sized>(
    rng: &mut R,
    reference: &ReferenceData,
    frame: &NavFrame,
    airport: &Airport,
    runway: &DepartureRunway,
    departure: &Departure,
) -> Result<Spawned, SimError> {
    let exit_route = runway.exit_routes.get(&departure.exit).ok_or_else(|| {
        SimError::Unable(format!(
            "{} runway {}: no exit route for {}",
            airport.icao, runway.runway, departure.exit
        ))
    })?;
    let (_, airline, perf) = sample_airline_aircraft(rng, reference, &departure.airlines)?;
    let callsign = sample_callsign(rng, airline)
        .ok_or_else(|| SimError::Unable(format!("{}: no callsign available", airline.icao)))?;

    let altitude = departure
        .altitude
        .unwrap_or_else(|| 28000 + 1000 * rng.gen_range(0..13));
    let flight_plan = FlightPlan {
        rules: FlightRules::Ifr,
        aircraft_type: perf.flight_plan_type(),
        departure_airport: airport.icao.clone(),
        arrival_airport: departure.destination.clone(),
        altitude,
        route: format!("{} {} {}", exit_route.route, departure.exit, departure.route)
            .trim()
            .to_string(),
    };

    let mut ac = Aircraft::new(callsign, flight_plan, perf.clone());
    ac.squawk = sample_squawk(rng);
    ac.waypoints = exit_route.waypoints.0.clone();
    ac.waypoints
        .push(Waypoint::at(departure.exit.clone(), departure.exit_location));
    ac.altitude = runway.altitude as f64;
    ac.assigned_altitude = Some(exit_route.cleared_altitude);
    ac.ias = perf.airborne_speed();
    ac.scratchpad = airport
        .scratchpads
        .get(&departure.exit)
        .cloned()
        .unwrap_or_default();
    ac.tracking_controller = airport.departure_controller.clone();
    ac.is_departure = true;

    let commands = place_at_first_waypoint(&mut ac, frame);
    Ok(Spawned {
        aircraft: ac,
        commands,
    })
}

pub fn make_arrival<R: Rng + ?Sized>(
    rng: &mut R,
    reference: &ReferenceData,
    frame: &NavFrame,
    airport: &Airport,
    arrival: &Arrival,
) -> Result<Spawned, SimError> {
    let (choice, airline, perf) = sample_airline_aircraft(rng, reference, &arrival.airlines)?;
    let callsign = sample_callsign(rng, airline)
        .ok_or_else(|| SimError::Unable(format!("{}: no callsign available", airline.icao)))?;

    let flight_plan = FlightPlan {
        rules: FlightRules::Ifr,
        aircraft_type: perf.flight_plan_type(),
        departure_airport: choice.airport.clone().unwrap_or_default(),
        arrival_airport: airport.icao.clone(),
        altitude: ARRIVAL_FILED_ALTITUDE,
        route: arrival.route.clone(),
    };

    let mut ac = Aircraft::new(callsign, flight_plan, perf.clone());
    ac.squawk = sample_squawk(rng);

    // First active runway with its own routing wins
    let waypoints = airport
        .arrival_runways
        .iter()
        .filter(|r| r.enabled)
        .find_map(|r| arrival.runway_waypoints.get(&r.runway))
        .unwrap_or(&arrival.waypoints);
    ac.waypoints = waypoints.0.clone();

    ac.altitude = arrival.initial_altitude as f64;
    ac.ias = (arrival.initial_speed as f64).min(perf.speed.cruise);
    ac.assigned_altitude = arrival.cleared_altitude;
    ac.crossing_speed = arrival.speed_restriction;
    ac.tracking_controller = arrival.initial_controller.clone();
    if let Some(scratchpad) = &arrival.scratchpad {
        ac.scratchpad = scratchpad.clone();
    }
    if let Some(name) = &arrival.expect_approach {
        ac.approach = airport.approach_index(name).map(|index| ApproachRef {
            airport: airport.icao.clone(),
            index,
        });
    }

    let commands = place_at_first_waypoint(&mut ac, frame);
    Ok(Spawned {
        aircraft: ac,
        commands,
    })
}
