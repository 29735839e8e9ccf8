pub mod components;
pub mod resources;
pub mod scenario;
pub mod server;
pub mod systems;
pub mod utils;
pub mod world;

pub use world::Simulation;
