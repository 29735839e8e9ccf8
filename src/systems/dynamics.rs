use nalgebra::Vector2;

use crate::components::{Aircraft, ApproachType, TurnDirection};
use crate::scenario::Scenario;
use crate::utils::{
    heading_difference, left_turn, lerp, nm_distance, normalize_heading, ray_line_intersection,
    right_turn, shortest_turn, NavFrame, FINAL_APPROACH_SPEED_CAP, LOCALIZER_INTERCEPT_WINDOW,
    MAX_TURN_RATE, SPEED_LIMIT_ALTITUDE, SPEED_LIMIT_BELOW_10K, WAYPOINT_ARRIVAL_RADIUS_NM,
};

/// Read-only inputs to one second of flight.
#[derive(Debug, Clone, Copy)]
pub struct FlightContext<'a> {
    pub scenario: &'a Scenario,
    pub frame: &'a NavFrame,
    /// Wind drift for this second, (east, north) in nm.
    pub wind: Vector2<f64>,
}

/// Seconds until the next waypoint's arrival radius is reached, or `None`
/// without a waypoint or speed.
pub fn waypoint_eta(ac: &Aircraft) -> Option<f64> {
    let wp = ac.next_waypoint()?;
    let dist = (nm_distance(ac.position, wp.location) - WAYPOINT_ARRIVAL_RADIUS_NM).max(0.0);
    let speed = if ac.groundspeed < 1.0 {
        ac.tas()
    } else {
        ac.groundspeed
    };
    if speed <= 0.0 {
        return None;
    }
    Some(dist / speed * 3600.0)
}

fn destination_distance(ac: &Aircraft, scenario: &Scenario) -> Option<f64> {
    let airport = scenario.airport(&ac.flight_plan.arrival_airport)?;
    airport.location.map(|loc| nm_distance(ac.position, loc))
}

// Rates are per two seconds; one step is one second
fn converge_airspeed(ac: &mut Aircraft, target: f64) {
    let rate = &ac.performance.rate;
    if ac.ias < target {
        ac.ias = (ac.ias + rate.accelerate / 2.0).min(target);
    } else if ac.ias > target {
        ac.ias = (ac.ias - rate.decelerate / 2.0).max(target);
    }
}

pub fn update_airspeed(ac: &mut Aircraft, scenario: &Scenario) {
    let speed = ac.performance.speed;

    if ac.on_final {
        if let Some(dist) = destination_distance(ac, scenario) {
            if dist < 1.0 {
                converge_airspeed(ac, speed.landing);
                return;
            }
            if dist < 5.0 || (dist < 10.0 && ac.assigned_speed.is_none()) {
                let approach_speed = FINAL_APPROACH_SPEED_CAP.min(speed.cruise);
                let target = lerp(speed.landing, approach_speed, (dist - 1.0) / 9.0).min(ac.ias);
                converge_airspeed(ac, target);
                return;
            }
        }
    }

    if let Some(assigned) = ac.assigned_speed {
        let target = (assigned as f64).max(speed.min).min(speed.max);
        converge_airspeed(ac, target);
    } else if let Some(crossing) = ac.crossing_speed {
        let delta = crossing as f64 - ac.ias;
        let per_second = match waypoint_eta(ac) {
            Some(eta) if eta > 1.0 => delta / eta,
            _ => delta,
        };
        let rate = ac.performance.rate;
        if per_second > 0.0 {
            ac.ias += per_second.min(rate.accelerate / 2.0);
        } else {
            ac.ias -= (-per_second).min(rate.decelerate / 2.0);
        }
    } else {
        let mut target = speed.cruise;
        if ac.altitude < SPEED_LIMIT_ALTITUDE {
            target = target.min(SPEED_LIMIT_BELOW_10K);
        }
        converge_airspeed(ac, target);
    }
}

pub fn update_altitude(ac: &mut Aircraft) {
    if !ac.is_airborne() {
        return;
    }
    let (target, crossing) = match (ac.assigned_altitude, ac.crossing_altitude) {
        (Some(alt), _) => (alt as f64, false),
        (None, Some(alt)) => (alt as f64, true),
        (None, None) => return,
    };
    let diff = target - ac.altitude;
    if diff == 0.0 {
        return;
    }

    let rated = if diff > 0.0 {
        ac.performance.climb_rate(ac.altitude)
    } else {
        ac.performance.rate.descent
    };
    // ft/min
    let rate = if crossing {
        match waypoint_eta(ac) {
            Some(eta) if eta > 0.0 => (diff.abs() / (eta / 60.0)).min(rated),
            _ => rated,
        }
    } else {
        rated
    };

    let step = rate / 60.0;
    if diff.abs() <= step {
        ac.altitude = target;
    } else {
        ac.altitude += step * diff.signum();
    }
}

/// Turn onto the localizer when an ILS-cleared aircraft on a vector is about
/// to cross the final approach course.
fn intercept_localizer(ac: &mut Aircraft, ctx: &FlightContext) {
    if !ac.cleared_approach || ac.assigned_heading.is_none() {
        return;
    }
    let Some(approach) = ac.approach.as_ref().and_then(|r| ctx.scenario.approach(r)) else {
        return;
    };
    if approach.approach_type != ApproachType::Ils {
        return;
    }
    let (Some(approach_heading), Some((a, b))) =
        (approach.heading(ctx.frame), approach.final_segment())
    else {
        return;
    };

    let delta = heading_difference(ac.heading, approach_heading);
    if delta >= LOCALIZER_INTERCEPT_WINDOW {
        return;
    }

    let speed = if ac.groundspeed < 1.0 {
        ac.tas()
    } else {
        ac.groundspeed
    };
    let ground = ctx.frame.heading_vector(ac.heading) * (speed / 3600.0);
    let frame = ctx.frame;
    let Some(eta) = ray_line_intersection(
        frame.to_nm(ac.position),
        ground,
        frame.to_nm(a),
        frame.to_nm(b),
    ) else {
        return;
    };
    if eta < 0.0 {
        return;
    }

    if eta < delta / MAX_TURN_RATE / 2.0 {
        tracing::debug!(
            "{}: intercepting localizer, eta {:.1}s, turn {:.1}",
            ac.callsign,
            eta,
            delta
        );
        ac.assigned_heading = Some(approach_heading);
        ac.turn_direction = TurnDirection::Shortest;
        ac.waypoints.clear();
    }
}

pub fn update_heading(ac: &mut Aircraft, ctx: &FlightContext) {
    intercept_localizer(ac, ctx);

    let (target, turn) = if let Some(target) = ac.assigned_heading {
        let turn = match ac.turn_direction {
            TurnDirection::Left => left_turn(ac.heading, target),
            TurnDirection::Right => right_turn(ac.heading, target),
            TurnDirection::Shortest => shortest_turn(ac.heading, target),
        };
        (target, turn)
    } else if let Some(wp) = ac.next_waypoint() {
        let target = ctx.frame.heading(ac.position, wp.location);
        (target, shortest_turn(ac.heading, target))
    } else {
        return;
    };

    // Snap once the remaining turn fits in one step so float error can
    // never leave a directed turn one epsilon short of a full circle
    if heading_difference(ac.heading, target) < 1e-6 || turn.abs() < MAX_TURN_RATE {
        ac.heading = normalize_heading(target);
    } else {
        ac.heading = normalize_heading(ac.heading + turn);
    }
}

pub fn update_position(ac: &mut Aircraft, ctx: &FlightContext) {
    let start = ctx.frame.to_nm(ac.position);
    let mut end = start + ctx.frame.heading_vector(ac.heading) * (ac.tas() / 3600.0);
    if ac.is_airborne() {
        end += ctx.wind;
    }
    ac.position = ctx.frame.from_nm(end);
    ac.groundspeed = (end - start).norm() * 3600.0;
}
