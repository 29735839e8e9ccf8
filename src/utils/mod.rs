pub mod constants;
pub mod errors;
pub mod geo;
pub mod math;
pub mod rng;

pub use constants::*;
pub use errors::*;
pub use geo::*;
pub use math::*;
pub use rng::*;
