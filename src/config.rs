use std::{env, time::Duration};

use anyhow::{bail, Context};

use crate::{Coords, GridInt};

pub const DEFAULT_GRID_SIZE: GridInt = 30;
pub const DEFAULT_START: Coords = (10, 10);
pub const INITIAL_TICK_RATE_HZ: f64 = 5.0;
pub const TICK_RATE_INCREMENT_HZ: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Cells per side of the square playfield.
    pub size: GridInt,
    pub start: Coords,
    pub initial_rate_hz: f64,
    /// Added to the tick rate on every food consumption, uncapped.
    pub rate_increment_hz: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            size: DEFAULT_GRID_SIZE,
            start: DEFAULT_START,
            initial_rate_hz: INITIAL_TICK_RATE_HZ,
            rate_increment_hz: TICK_RATE_INCREMENT_HZ,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = GameConfig::default();

        if let Ok(value) = env::var("SNAKE_GRID_SIZE") {
            config.size = value
                .trim()
                .parse()
                .with_context(|| format!("SNAKE_GRID_SIZE is not an integer: {:?}", value))?;
        }

        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        // Food spawns in [1, size - 2], which is empty below 3
        if self.size < 3 {
            bail!("grid size must be at least 3, got {}", self.size);
        }

        if !self.contains(self.start) {
            bail!("start cell {:?} is outside a {}x{} grid", self.start, self.size, self.size);
        }

        if !(self.initial_rate_hz.is_finite() && self.initial_rate_hz > 0.0) {
            bail!("initial tick rate must be positive, got {}", self.initial_rate_hz);
        }

        if !(self.rate_increment_hz.is_finite() && self.rate_increment_hz >= 0.0) {
            bail!("tick rate increment must not be negative, got {}", self.rate_increment_hz);
        }

        Ok(())
    }

    pub fn contains(&self, (x, y): Coords) -> bool {
        (0..self.size).contains(&x) && (0..self.size).contains(&y)
    }

    pub fn tick_interval(rate_hz: f64) -> Duration {
        Duration::from_secs_f64(1.0 / rate_hz)
    }
}
