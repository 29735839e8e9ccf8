use serde::{Deserialize, Serialize};

/// Uniform surface wind.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindConfig {
    /// Direction the wind blows from (degrees true).
    pub direction: f64,
    /// Steady speed (kts).
    pub speed: f64,
    /// Extra gust speed above `speed` (kts).
    #[serde(default)]
    pub gust: f64,
}

impl WindConfig {
    pub fn calm() -> Self {
        Self::default()
    }

    pub fn is_calm(&self) -> bool {
        self.speed <= 0.0 && self.gust <= 0.0
    }
}
