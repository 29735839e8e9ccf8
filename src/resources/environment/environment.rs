use nalgebra::Vector2;
use rand::Rng;

use crate::resources::config::environment::WindConfig;
use crate::utils::deg_to_rad;

/// Wind applied to airborne aircraft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentResource {
    wind: WindConfig,
}

impl EnvironmentResource {
    pub fn new(wind: WindConfig) -> Self {
        Self { wind }
    }

    pub fn wind(&self) -> &WindConfig {
        &self.wind
    }

    /// Sample one second of wind drift as an (east, north) displacement in nm.
    /// Gusts vary uniformly between the steady speed and speed plus gust.
    pub fn sample_wind<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2<f64> {
        if self.wind.is_calm() {
            return Vector2::zeros();
        }

        let speed = if self.wind.gust > 0.0 {
            rng.gen_range(self.wind.speed..=self.wind.speed + self.wind.gust)
        } else {
            self.wind.speed
        };

        // Direction is where the wind comes from; the drift is downwind
        let d = deg_to_rad(self.wind.direction + 180.0);
        Vector2::new(d.sin(), d.cos()) * (speed / 3600.0)
    }
}
