//! Text front end for hosts: one input line becomes one or more controller
//! commands against a [`Simulation`](crate::world::Simulation).

mod commands;

pub use commands::{CommandLine, ControlCommand};
