mod approaches;
mod config;
mod departures;
mod handoffs;
mod invariants;
