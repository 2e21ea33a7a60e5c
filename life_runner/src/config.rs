// config.rs - Runner settings: TOML file first, then environment overrides

use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::Duration;

use packed_life::BoardConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub board: BoardConfig,
    /// Milliseconds between generations
    pub tick_interval_ms: u64,
    /// Stop after this many generations (0 runs until interrupted)
    pub max_generations: u64,
    /// Named pattern to seed; random fill when unset
    pub pattern: Option<String>,
    /// Top-left corner for `pattern`
    pub origin: (usize, usize),
    /// Live-cell probability for the random fill
    pub density: f64,
    /// Seed for the random fill (fresh entropy when unset)
    pub seed: Option<u64>,
    /// Print the board every N generations (0 never)
    pub render_every: u64,
    pub stop_on_cycle: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            tick_interval_ms: 200,
            max_generations: 0,
            pattern: None,
            origin: (1, 1),
            density: 0.33,
            seed: None,
            render_every: 10,
            stop_on_cycle: true,
        }
    }
}

impl RunnerConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads `path` when given, then applies `LIFE_TICK_MS` and
    /// `LIFE_MAX_GENERATIONS` from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let mut config = match path {
            Some(path) => Self::from_toml(&fs::read_to_string(path)?)?,
            None => Self::default(),
        };

        if let Ok(ms) = env::var("LIFE_TICK_MS") {
            if let Ok(ms) = ms.parse() {
                config.tick_interval_ms = ms;
            } else {
                tracing::warn!(value = %ms, "ignoring unparsable LIFE_TICK_MS");
            }
        }
        if let Ok(max) = env::var("LIFE_MAX_GENERATIONS") {
            if let Ok(max) = max.parse() {
                config.max_generations = max;
            } else {
                tracing::warn!(value = %max, "ignoring unparsable LIFE_MAX_GENERATIONS");
            }
        }

        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}
