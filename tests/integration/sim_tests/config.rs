use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;
use tracon::{
    resources::{DepartureRunwayOverride, SimulationConfig},
    scenario::Scenario,
    systems::spawn::ScheduleKind,
    utils::SimError,
    Simulation,
};

use crate::common::{
    create_test_config, create_test_reference, t0, TestSimBuilder, DEPARTURE_SCENARIO,
};

fn kaaa_runway_override(enabled: Option<bool>, rate: Option<f64>) -> DepartureRunwayOverride {
    DepartureRunwayOverride {
        airport: "KAAA".to_string(),
        runway: "1".to_string(),
        enabled,
        rate,
        ..Default::default()
    }
}

#[test]
fn test_saved_config_drives_schedules() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = create_test_config(3);
    config.sim_rate = 2.0;
    config
        .departure_runways
        .push(kaaa_runway_override(None, Some(12.0)));

    let file = NamedTempFile::new()?;
    config.save(file.path())?;
    let loaded = SimulationConfig::load(file.path())?;
    assert_eq!(loaded, config);

    let scenario = Scenario::from_json_str(DEPARTURE_SCENARIO)?;
    let sim = Simulation::new(scenario, create_test_reference(), loaded, t0())?;

    assert_eq!(sim.sim_rate(), 2.0);
    assert_eq!(sim.seed(), 3);
    let schedule = &sim.schedules()[0];
    assert_eq!(
        schedule.kind,
        ScheduleKind::Departure {
            airport: "KAAA".to_string(),
            runway: "1".to_string()
        }
    );
    assert_eq!(schedule.rate, 12.0);
    assert!(schedule.enabled);
    Ok(())
}

#[test]
fn test_disabled_runway_never_launches() {
    let mut config = create_test_config(5);
    config
        .departure_runways
        .push(kaaa_runway_override(Some(false), None));

    let mut t = TestSimBuilder::new(DEPARTURE_SCENARIO)
        .with_config(config)
        .build();
    assert!(!t.sim.schedules()[0].is_active());

    t.run_seconds(300);
    assert_eq!(t.sim.fleet_size(), 0);
    assert!(t.added().is_empty());
}

#[test]
fn test_unknown_override_rejected() {
    let mut config = create_test_config(1);
    config.departure_runways.push(DepartureRunwayOverride {
        airport: "KAAA".to_string(),
        runway: "36".to_string(),
        ..Default::default()
    });

    let scenario = Scenario::from_json_str(DEPARTURE_SCENARIO).unwrap();
    let err = Simulation::new(scenario, create_test_reference(), config, t0()).err();
    match err {
        Some(SimError::ScenarioValidation(errors)) => {
            assert!(errors.iter().any(|e| e.contains("KAAA 36")), "{:?}", errors);
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}
