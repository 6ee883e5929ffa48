//! Turn Timing Configuration
//!
//! Durations are written in seconds in JSON and held as `Duration` in memory.

use std::path::Path;
use std::time::Duration;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::timer::duration_from_secs;
use crate::DEFAULT_TIME_BETWEEN_TURNS;

/// What happens to `next_turn_delay` once a turn end has used it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayMode {
    /// The extra delay applies to every turn end until changed.
    #[default]
    Persistent,
    /// The extra delay applies to the next turn end only, then resets to zero.
    OneShot,
}

impl DelayMode {
    /// Stable tag, used for hashing.
    #[inline]
    pub fn tag(self) -> u8 {
        match self {
            DelayMode::Persistent => 0,
            DelayMode::OneShot => 1,
        }
    }
}

/// Configuration for a turn controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnConfig {
    /// Fixed pause between a turn ending and the next one starting.
    #[serde(with = "secs")]
    pub time_between_turns: Duration,
    /// Extra pause added on top of `time_between_turns`.
    #[serde(with = "secs")]
    pub next_turn_delay: Duration,
    /// Whether `next_turn_delay` survives a turn end.
    pub delay_mode: DelayMode,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            time_between_turns: DEFAULT_TIME_BETWEEN_TURNS,
            next_turn_delay: Duration::ZERO,
            delay_mode: DelayMode::Persistent,
        }
    }
}

impl TurnConfig {
    /// Build a config from seconds.
    pub fn from_secs(time_between_turns: f64, next_turn_delay: f64) -> Result<Self, ConfigError> {
        let config = Self {
            time_between_turns: duration_from_secs(time_between_turns)
                .ok_or(ConfigError::InvalidSeconds { field: "time_between_turns", value: time_between_turns })?,
            next_turn_delay: duration_from_secs(next_turn_delay)
                .ok_or(ConfigError::InvalidSeconds { field: "next_turn_delay", value: next_turn_delay })?,
            delay_mode: DelayMode::Persistent,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: TurnConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the timing rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_between_turns.is_zero() {
            return Err(ConfigError::ZeroTimeBetweenTurns);
        }
        Ok(())
    }

    /// Full inter-turn pause armed at the next turn end.
    #[inline]
    pub fn turn_end_delay(&self) -> Duration {
        self.time_between_turns.saturating_add(self.next_turn_delay)
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The inter-turn pause must be positive.
    #[error("time_between_turns must be greater than zero")]
    ZeroTimeBetweenTurns,

    /// A seconds value was negative, NaN or infinite.
    #[error("invalid {field}: {value} is not a non-negative number of seconds")]
    InvalidSeconds {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Malformed JSON.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config file could not be read.
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize `Duration` as fractional seconds.
mod secs {
    use std::time::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        crate::core::timer::duration_from_secs(secs).ok_or_else(|| {
            serde::de::Error::custom(format!("{} is not a non-negative number of seconds", secs))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TurnConfig::default();
        assert_eq!(config.time_between_turns, Duration::from_millis(200));
        assert_eq!(config.next_turn_delay, Duration::ZERO);
        assert_eq!(config.delay_mode, DelayMode::Persistent);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_json() {
        let config = TurnConfig::from_json_str(
            r#"{ "time_between_turns": 0.5, "next_turn_delay": 1.25, "delay_mode": "one_shot" }"#,
        )
        .unwrap();

        assert_eq!(config.time_between_turns, Duration::from_millis(500));
        assert_eq!(config.next_turn_delay, Duration::from_millis(1250));
        assert_eq!(config.delay_mode, DelayMode::OneShot);
        assert_eq!(config.turn_end_delay(), Duration::from_millis(1750));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = TurnConfig::from_json_str(r#"{ "next_turn_delay": 2.0 }"#).unwrap();
        assert_eq!(config.time_between_turns, DEFAULT_TIME_BETWEEN_TURNS);
        assert_eq!(config.next_turn_delay, Duration::from_secs(2));
    }

    #[test]
    fn test_rejects_zero_time_between_turns() {
        let err = TurnConfig::from_json_str(r#"{ "time_between_turns": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeBetweenTurns));
    }

    #[test]
    fn test_rejects_negative_delay() {
        let err = TurnConfig::from_json_str(r#"{ "next_turn_delay": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = TurnConfig::from_secs(0.2, -0.5).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeconds { field: "next_turn_delay", .. }));
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let config = TurnConfig::from_secs(0.25, 0.125).unwrap();
        let parsed = TurnConfig::from_json_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = TurnConfig::load("/nonexistent/turn-control.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
