#[path = "../common/mod.rs"]
mod common;

mod sim_tests;
