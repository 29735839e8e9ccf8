mod scenarios;

// Re-export test fixtures
pub use reference::*;
pub use scenarios::*;
