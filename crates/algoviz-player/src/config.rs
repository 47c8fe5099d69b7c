//! Playback and session configuration.
//!
//! Reads environment variables:
//! - `ALGOVIZ_BASE_INTERVAL_MS`: tick interval at speed 1 (default: 1000)
//! - `ALGOVIZ_AUTO_RESET_MS`: delay before rewinding after the last step
//!   (default: unset, no auto-reset)
//! - `ALGOVIZ_MAX_STEPS`: step limit per trace (default: 10000)

use std::time::Duration;

use algoviz_core::TraceConfig;
use tracing::warn;

pub const BASE_INTERVAL_ENV: &str = "ALGOVIZ_BASE_INTERVAL_MS";
pub const AUTO_RESET_ENV: &str = "ALGOVIZ_AUTO_RESET_MS";
pub const MAX_STEPS_ENV: &str = "ALGOVIZ_MAX_STEPS";

/// Timer settings for a [`Playback`](crate::Playback).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Delay between ticks at speed 1. Default: 1 second.
    pub base_interval: Duration,
    /// When set, playback rewinds to the first step this long after
    /// finishing.
    pub auto_reset_delay: Option<Duration>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            base_interval: Duration::from_millis(1000),
            auto_reset_delay: None,
        }
    }
}

/// Everything a [`Session`](crate::Session) needs to know up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    pub playback: PlaybackConfig,
    pub trace: TraceConfig,
}

impl SessionConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Unset keys keep their
    /// defaults; unparsable or zero values log a warning and do the same.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = SessionConfig::default();

        if let Some(ms) = positive(&lookup, BASE_INTERVAL_ENV) {
            config.playback.base_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = positive(&lookup, AUTO_RESET_ENV) {
            config.playback.auto_reset_delay = Some(Duration::from_millis(ms));
        }
        if let Some(max) = positive(&lookup, MAX_STEPS_ENV) {
            match usize::try_from(max) {
                Ok(max) => config.trace.max_steps = max,
                Err(_) => warn!(key = MAX_STEPS_ENV, value = max, "value too large, using default"),
            }
        }

        config
    }
}

fn positive(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(0) => {
            warn!(key, "value must be greater than zero, using default");
            None
        }
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, value = %raw, error = %err, "invalid value, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> SessionConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SessionConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = from_pairs(&[]);
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.playback.base_interval, Duration::from_secs(1));
        assert_eq!(config.playback.auto_reset_delay, None);
        assert_eq!(config.trace.max_steps, 10_000);
    }

    #[test]
    fn reads_all_keys() {
        let config = from_pairs(&[
            (BASE_INTERVAL_ENV, "250"),
            (AUTO_RESET_ENV, "1500"),
            (MAX_STEPS_ENV, "64"),
        ]);
        assert_eq!(config.playback.base_interval, Duration::from_millis(250));
        assert_eq!(config.playback.auto_reset_delay, Some(Duration::from_millis(1500)));
        assert_eq!(config.trace.max_steps, 64);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = from_pairs(&[
            (BASE_INTERVAL_ENV, "fast"),
            (AUTO_RESET_ENV, "-5"),
            (MAX_STEPS_ENV, "0"),
        ]);
        assert_eq!(config, SessionConfig::default());
    }
}
