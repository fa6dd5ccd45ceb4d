//! Match configuration.
//!
//! Everything here is presentation pacing or RNG seeding. None of it changes
//! the outcome of a move: a match played with `MatchConfig::instant()` and
//! the same seed ends exactly like one played with the default delays.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::Pacing;

/// Match configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Dice shake before the roll is revealed (default: 1000 ms).
    pub roll_delay_ms: u64,

    /// Pause before each single-square step (default: 250 ms).
    pub step_delay_ms: u64,

    /// Pause before a snake/ladder jump (default: 500 ms).
    pub snap_pause_ms: u64,

    /// Pause on the final square before the turn ends (default: 500 ms).
    pub settle_delay_ms: u64,

    /// Automated-player think time before it rolls (default: 2000 ms).
    pub think_delay_ms: u64,

    /// Dice seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            roll_delay_ms: 1000,
            step_delay_ms: 250,
            snap_pause_ms: 500,
            settle_delay_ms: 500,
            think_delay_ms: 2000,
            seed: None,
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// No pauses anywhere. For tests, simulations and benchmarks.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            roll_delay_ms: 0,
            step_delay_ms: 0,
            snap_pause_ms: 0,
            settle_delay_ms: 0,
            think_delay_ms: 0,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_roll_delay_ms(mut self, ms: u64) -> Self {
        self.roll_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn with_step_delay_ms(mut self, ms: u64) -> Self {
        self.step_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn with_snap_pause_ms(mut self, ms: u64) -> Self {
        self.snap_pause_ms = ms;
        self
    }

    #[must_use]
    pub fn with_settle_delay_ms(mut self, ms: u64) -> Self {
        self.settle_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn with_think_delay_ms(mut self, ms: u64) -> Self {
        self.think_delay_ms = ms;
        self
    }

    /// Pacing durations for the driver.
    #[must_use]
    pub fn pacing(&self) -> Pacing {
        Pacing {
            roll_delay: Duration::from_millis(self.roll_delay_ms),
            step_delay: Duration::from_millis(self.step_delay_ms),
            snap_pause: Duration::from_millis(self.snap_pause_ms),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            think_delay: Duration::from_millis(self.think_delay_ms),
        }
    }
}
