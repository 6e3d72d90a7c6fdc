//! Session configuration
//!
//! Values come from [`SessionConfig::default`] or the environment:
//!
//! - `TUI_2048_TARGET`: score that wins the session (default: 2048)
//! - `TUI_2048_SEED`: seed for the spawn RNG (default: random)
//! - `TUI_2048_RANDOM_OPENING`: "1" or "true" to open with two random tiles
//!   instead of the fixed opening

use crate::types::DEFAULT_WIN_TARGET;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub win_target: u32,
    /// `None` seeds the RNG from system entropy
    pub seed: Option<u64>,
    pub random_opening: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            win_target: DEFAULT_WIN_TARGET,
            seed: None,
            random_opening: false,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let win_target = lookup("TUI_2048_TARGET")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&t: &u32| t > 0)
            .unwrap_or(DEFAULT_WIN_TARGET);

        let seed = lookup("TUI_2048_SEED").and_then(|s| s.trim().parse().ok());

        let random_opening = lookup("TUI_2048_RANDOM_OPENING")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            win_target,
            seed,
            random_opening,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_win_target(mut self, win_target: u32) -> Self {
        self.win_target = win_target;
        self
    }
}
