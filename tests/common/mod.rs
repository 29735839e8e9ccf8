mod assertions;
mod fixtures;
mod helpers;
mod test_sim;

// Re-export
pub use assertions::{assert_fleet_valid, assert_fixes, assert_heading_near};

pub use helpers::*;

pub use fixtures::*;
pub use test_sim::{TestSim, TestSimBuilder};
