use rand::Rng;

use crate::components::AircraftPerformance;
use crate::resources::{Airline, ReferenceData};
use crate::scenario::{AirlineRef, Airport};
use crate::utils::{sample, sample_weighted, SimError, BLOCKED_CALLSIGNS};

use super::schedule::SpawnSchedule;

const DEFAULT_CALLSIGN_FORMAT: &str = "####";
const CALLSIGN_TRIES: usize = 100;

/// Draw a flight number from the airline's formats: `#` is a digit and `@`
/// a letter. All-zero numbers and blocked callsigns are redrawn.
pub fn sample_callsign<R: Rng + ?Sized>(rng: &mut R, airline: &Airline) -> Option<String> {
    let default = [DEFAULT_CALLSIGN_FORMAT.to_string()];
    let formats = if airline.callsign.formats.is_empty() {
        &default[..]
    } else {
        &airline.callsign.formats[..]
    };

    for _ in 0..CALLSIGN_TRIES {
        let format = sample(rng, formats)?;
        let mut number = String::new();
        let mut nonzero = false;
        for ch in format.chars() {
            match ch {
                '#' => {
                    let d = rng.gen_range(0..10u8);
                    nonzero |= d != 0;
                    number.push(char::from(b'0' + d));
                }
                '@' => {
                    nonzero = true;
                    number.push(char::from(b'A' + rng.gen_range(0..26u8)));
                }
                other => number.push(other),
            }
        }
        if !nonzero {
            continue;
        }
        let callsign = format!("{}{}", airline.icao.to_uppercase(), number);
        if BLOCKED_CALLSIGNS.contains(&callsign.as_str()) {
            continue;
        }
        return Some(callsign);
    }
    None
}

/// An airline from `airlines` and an aircraft from its fleet, weighted by
/// the fleet counts.
pub fn sample_airline_aircraft<'a, R: Rng + ?Sized>(
    rng: &mut R,
    reference: &'a ReferenceData,
    airlines: &'a [AirlineRef],
) -> Result<(&'a AirlineRef, &'a Airline, &'a AircraftPerformance), SimError> {
    let choice = sample(rng, airlines)
        .ok_or_else(|| SimError::Unable("no airlines to sample".to_string()))?;
    let airline = reference
        .airlines
        .get(&choice.icao)
        .ok_or_else(|| SimError::Unable(format!("{}: unknown airline", choice.icao)))?;
    let fleet = airline.fleet(choice.fleet.as_deref()).ok_or_else(|| {
        SimError::Unable(format!(
            "{}: no fleet {}",
            choice.icao,
            choice.fleet.as_deref().unwrap_or("default")
        ))
    })?;
    let entry = sample_weighted(rng, fleet, |e| e.count)
        .ok_or_else(|| SimError::Unable(format!("{}: fleet is empty", choice.icao)))?;
    let perf = reference
        .performance
        .get(&entry.icao)
        .ok_or_else(|| SimError::UnknownAircraftType(entry.icao.clone()))?;
    Ok((choice, airline, perf))
}

/// Choose the next departure for a runway, biased toward the previous one
/// by the schedule's challenge.
///
/// With probability `challenge / 2` the previous departure repeats; with
/// the same probability another departure sharing its exit category is
/// drawn. Otherwise any departure whose category is enabled and that has an
/// exit route from this runway may be picked.
pub fn sample_departure<R: Rng + ?Sized>(
    rng: &mut R,
    airport: &Airport,
    runway: &str,
    schedule: &SpawnSchedule,
) -> Option<usize> {
    let exit_routes = &airport
        .departure_runways
        .iter()
        .find(|r| r.runway == runway)?
        .exit_routes;

    if let Some(last) = schedule
        .last_departure
        .filter(|&i| i < airport.departures.len())
    {
        let u: f64 = rng.gen();
        if u < schedule.challenge / 2.0 {
            return Some(last);
        }
        if u < schedule.challenge {
            let category = airport.exit_category(&airport.departures[last].exit);
            let others: Vec<usize> = airport
                .departures
                .iter()
                .enumerate()
                .filter(|(i, d)| {
                    *i != last
                        && airport.exit_category(&d.exit) == category
                        && exit_routes.contains_key(&d.exit)
                })
                .map(|(i, _)| i)
                .collect();
            return Some(sample(rng, &others).copied().unwrap_or(last));
        }
    }

    let candidates: Vec<usize> = airport
        .departures
        .iter()
        .enumerate()
        .filter(|(_, d)| {
            exit_routes.contains_key(&d.exit)
                && !schedule
                    .disabled_categories
                    .contains(airport.exit_category(&d.exit))
        })
        .map(|(i, _)| i)
        .collect();
    sample(rng, &candidates).copied()
}
