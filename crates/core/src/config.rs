//! Per-session tunables.

use crate::types::{DEFAULT_DROP_SPEED, SPAWN_X, SPEED_INCREASE_AMOUNT, SPEED_INCREASE_INTERVAL_MS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Fall speed at session start, tiles/second. Must be positive.
    pub initial_speed: f64,
    pub speed_increase_interval_ms: u64,
    pub speed_increase_amount: f64,
    /// Column new pieces spawn in.
    pub spawn_x: i32,
}

impl SessionConfig {
    pub fn with_initial_speed(mut self, speed: f64) -> Self {
        self.initial_speed = speed;
        self
    }

    pub fn with_speed_increase(mut self, interval_ms: u64, amount: f64) -> Self {
        self.speed_increase_interval_ms = interval_ms;
        self.speed_increase_amount = amount;
        self
    }

    pub fn with_spawn_x(mut self, spawn_x: i32) -> Self {
        self.spawn_x = spawn_x;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_speed: DEFAULT_DROP_SPEED,
            speed_increase_interval_ms: SPEED_INCREASE_INTERVAL_MS,
            speed_increase_amount: SPEED_INCREASE_AMOUNT,
            spawn_x: SPAWN_X,
        }
    }
}
