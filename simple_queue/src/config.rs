//! Simulation parameters, loadable from TOML.
//!
//! ```toml
//! duration = 1800       # seconds
//! arrival_chance = 5    # 1-in-5 chance of an arrival each second
//! service_rate = 10.0   # items per minute
//! seed = 42
//! runs = 1
//! ```
//!
//! Missing keys fall back to [`SimulationConfig::chocolate_factory`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub duration: usize,       // ticks (seconds)
    pub arrival_chance: usize, // N in a 1-in-N arrival chance per tick
    pub service_rate: f64,     // items per minute
    pub seed: u64,
    pub runs: usize, // run i is seeded with seed + i
}

impl SimulationConfig {
    /// 30 minutes of a factory with a 1-in-5 chance of producing a chocolate
    /// every second, eaten at 10 per minute.
    pub fn chocolate_factory() -> Self {
        SimulationConfig {
            duration: 1800,
            arrival_chance: 5,
            service_rate: 10.0,
            seed: 42,
            runs: 1,
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arrival_chance == 0 {
            return Err(ConfigError::Invalid(
                "arrival_chance must be at least 1".to_string(),
            ));
        }
        if !self.service_rate.is_finite() || self.service_rate <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "service_rate must be positive, got {}",
                self.service_rate
            )));
        }
        if self.runs == 0 {
            return Err(ConfigError::Invalid("runs must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn seed_for_run(&self, run: usize) -> u64 {
        self.seed.wrapping_add(run as u64)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::chocolate_factory()
    }
}
