use chrono::Utc;
use clap::Parser;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::{
    io::{self, BufRead},
    path::PathBuf,
    thread,
    time::Duration,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tracon::{
    resources::{AirlineDb, NavDatabase, PerformanceDb, ReferenceData, SimEvent, SimulationConfig},
    scenario::Scenario,
    server::CommandLine,
    Simulation,
};

const TICK: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "tracon_sim", about = "Terminal-area ATC traffic simulator")]
struct Args {
    /// Scenario JSON
    scenario: PathBuf,

    /// Aircraft performance database JSON
    #[arg(long = "performance")]
    performance: PathBuf,

    /// Airline database JSON
    #[arg(long = "airlines")]
    airlines: PathBuf,

    /// Navigation database JSON
    #[arg(long = "nav")]
    nav: Option<PathBuf>,

    /// Simulation settings (YAML)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Fixed random seed
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Sim-time rate multiplier
    #[arg(short = 'r', long = "rate")]
    rate: Option<f64>,
}

fn load_config(args: &Args) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => match SimulationConfig::default_path().filter(|p| p.exists()) {
            Some(path) => {
                info!("using settings from {}", path.display());
                SimulationConfig::load(path)?
            }
            None => SimulationConfig::default(),
        },
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(rate) = args.rate {
        config.sim_rate = rate;
    }
    Ok(config)
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (s, r) = crossbeam_channel::unbounded();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if s.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("stdin: {}", e);
                    break;
                }
            }
        }
    });
    r
}

fn print_event(sim: &Simulation, event: &SimEvent) {
    match event {
        SimEvent::Modified { .. } => {}
        SimEvent::TextMessage { sender, contents } => println!("{}: {}", sender, contents),
        SimEvent::Added { callsign } => {
            if let Some(ac) = sim.aircraft(callsign) {
                println!(
                    "+ {} {} {}->{}",
                    callsign,
                    ac.flight_plan.aircraft_type,
                    ac.flight_plan.departure_airport,
                    ac.flight_plan.arrival_airport
                );
            }
        }
        other => println!("{:?}", other),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let reference = ReferenceData {
        performance: PerformanceDb::load(&args.performance)?,
        airlines: AirlineDb::load(&args.airlines)?,
        nav: match &args.nav {
            Some(path) => NavDatabase::load(path)?,
            None => NavDatabase::default(),
        },
    };
    let scenario = Scenario::load(&args.scenario)?;

    let mut sim = Simulation::new(scenario, reference, config, Utc::now())?;
    let subscriber = sim.subscribe();
    info!(
        "{} controlling, seed {}, {} aircraft in the air",
        sim.user_callsign(),
        sim.seed(),
        sim.fleet_size()
    );

    let input = spawn_stdin_reader();
    loop {
        match input.recv_timeout(TICK) {
            Ok(line) if line.trim().eq_ignore_ascii_case("quit") => break,
            Ok(line) if line.trim().is_empty() => {}
            Ok(line) => match line.parse::<CommandLine>() {
                Ok(command) => match command.apply(&mut sim, Utc::now()) {
                    Ok(output) => output.iter().for_each(|text| println!("{}", text)),
                    Err(e) => println!("{}: {}", command.callsign, e),
                },
                Err(e) => println!("{}", e),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                info!("input closed");
                break;
            }
        }

        sim.tick(Utc::now());
        for event in sim.events(subscriber) {
            print_event(&sim, &event);
        }
    }
    Ok(())
}
