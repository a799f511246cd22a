//! Runtime settings for the terminal binary.
//!
//! Everything comes from environment variables so the game screen never has
//! to share the terminal with a CLI parser's output:
//!
//! - `BLOCKFALL_SEED`: u32 seed for a reproducible piece order
//! - `BLOCKFALL_LOG`: file to write logs to (no logging without it)
//! - `BLOCKFALL_LOG_LEVEL`: `error`, `warn`, `info`, `debug` or `trace`

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use tracing::Level;

pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const LOG_VAR: &str = "BLOCKFALL_LOG";
pub const LOG_LEVEL_VAR: &str = "BLOCKFALL_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Fixed seed, or None to seed from the clock.
    pub seed: Option<u32>,
    pub log_path: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            seed: None,
            log_path: None,
            log_level: Level::INFO,
        }
    }
}

impl RunSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns a variable's value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(raw) = non_empty(lookup(SEED_VAR)) {
            let seed = raw
                .parse::<u32>()
                .with_context(|| format!("{SEED_VAR} must be an unsigned 32-bit integer, got {raw:?}"))?;
            settings.seed = Some(seed);
        }

        settings.log_path = non_empty(lookup(LOG_VAR)).map(PathBuf::from);

        if let Some(raw) = non_empty(lookup(LOG_LEVEL_VAR)) {
            settings.log_level = Level::from_str(&raw)
                .map_err(|_| anyhow!("{LOG_LEVEL_VAR}: unknown level {raw:?}"))?;
        }

        Ok(settings)
    }

    /// The configured seed, or one derived from `fallback_nanos`.
    pub fn seed_or(&self, fallback_nanos: u128) -> u32 {
        self.seed
            .unwrap_or_else(|| (fallback_nanos ^ (fallback_nanos >> 32)) as u32)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
