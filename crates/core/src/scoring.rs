//! Scoring module - line-clear points and speed progression
//!
//! Points for a freeze come from the classic table, scaled by the current
//! speed level. Speed itself is independent of scoring: it rises by a fixed
//! amount on a fixed wall-clock interval.

use crate::types::{
    DEFAULT_DROP_SPEED, LINE_SCORES, SPEED_INCREASE_AMOUNT, SPEED_INCREASE_INTERVAL_MS,
};

/// Speed level used as the score multiplier: `floor(speed)`.
pub fn speed_level(speed: f64) -> u32 {
    speed.floor().max(0.0) as u32
}

/// Calculate line clear score
/// lines: number of rows cleared by one freeze
/// level: `floor(speed)`
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level.saturating_add(1))
}

/// Wall-clock speed escalation.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedRamp {
    speed: f64,
    initial: f64,
    interval_ms: u64,
    amount: f64,
    last_increase_ms: u64,
}

impl SpeedRamp {
    pub fn new(initial: f64, interval_ms: u64, amount: f64, now_ms: u64) -> Self {
        Self {
            speed: initial,
            initial,
            interval_ms,
            amount,
            last_increase_ms: now_ms,
        }
    }

    /// Current fall speed in tiles/second.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Raise speed once if more than one interval passed since the last raise.
    ///
    /// Returns true if the speed changed.
    pub fn update(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_increase_ms) > self.interval_ms {
            self.speed += self.amount;
            self.last_increase_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Back to the initial speed, timing from `now_ms`.
    pub fn reset(&mut self, now_ms: u64) {
        self.speed = self.initial;
        self.last_increase_ms = now_ms;
    }
}

impl Default for SpeedRamp {
    fn default() -> Self {
        Self::new(
            DEFAULT_DROP_SPEED,
            SPEED_INCREASE_INTERVAL_MS,
            SPEED_INCREASE_AMOUNT,
            0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        // Level 0
        assert_eq!(calculate_line_score(0, 0), 0);
        assert_eq!(calculate_line_score(1, 0), 40);
        assert_eq!(calculate_line_score(2, 0), 100);
        assert_eq!(calculate_line_score(3, 0), 300);
        assert_eq!(calculate_line_score(4, 0), 1200);

        // Level 1
        assert_eq!(calculate_line_score(2, 1), 200);
        assert_eq!(calculate_line_score(4, 5), 1200 * 6);

        // Out of table
        assert_eq!(calculate_line_score(5, 3), 0);
    }

    #[test]
    fn test_speed_level_floors() {
        assert_eq!(speed_level(1.0), 1);
        assert_eq!(speed_level(1.5), 1);
        assert_eq!(speed_level(2.0), 2);
        assert_eq!(speed_level(0.5), 0);
    }

    #[test]
    fn test_speed_ramp_interval() {
        let mut ramp = SpeedRamp::new(1.0, 5000, 0.5, 0);

        assert!(!ramp.update(5000));
        assert_eq!(ramp.speed(), 1.0);

        assert!(ramp.update(5001));
        assert_eq!(ramp.speed(), 1.5);

        // One raise per check, even after a long gap.
        assert!(ramp.update(30_000));
        assert_eq!(ramp.speed(), 2.0);
        assert!(!ramp.update(30_001));

        ramp.reset(40_000);
        assert_eq!(ramp.speed(), 1.0);
        assert!(!ramp.update(45_000));
    }
}
