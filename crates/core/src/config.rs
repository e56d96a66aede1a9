//! Engine configuration
//!
//! Defaults reproduce the standard 10x20 game. `EngineConfig::from_env` reads
//! overrides from `TETRIS_*` environment variables.

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, LINE_CLEAR_MS, LOCK_DELAY_MS, MAX_BOARD_DIM};

pub const ENV_BOARD_WIDTH: &str = "TETRIS_BOARD_WIDTH";
pub const ENV_BOARD_HEIGHT: &str = "TETRIS_BOARD_HEIGHT";
pub const ENV_LOCK_DELAY_MS: &str = "TETRIS_LOCK_DELAY_MS";
pub const ENV_LINE_CLEAR_MS: &str = "TETRIS_LINE_CLEAR_MS";
pub const ENV_SEED: &str = "TETRIS_SEED";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    pub width: u8,
    pub height: u8,
    /// Lock grace once a piece has touched down
    pub lock_delay_ms: u32,
    /// Line clear animation length
    pub line_clear_ms: u32,
    /// Randomizer seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            lock_delay_ms: LOCK_DELAY_MS,
            line_clear_ms: LINE_CLEAR_MS,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Default configuration with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Create from environment variables, falling back to defaults for unset keys.
    ///
    /// Set-but-unparsable values are errors rather than silently ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            width: env_or(ENV_BOARD_WIDTH, defaults.width)?,
            height: env_or(ENV_BOARD_HEIGHT, defaults.height)?,
            lock_delay_ms: env_or(ENV_LOCK_DELAY_MS, defaults.lock_delay_ms)?,
            line_clear_ms: env_or(ENV_LINE_CLEAR_MS, defaults.line_clear_ms)?,
            seed: match env_value(ENV_SEED) {
                Some(raw) => Some(parse_env(ENV_SEED, &raw)?),
                None => None,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Check board dimensions
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyBoard { width, height });
        }
        if width > MAX_BOARD_DIM || height > MAX_BOARD_DIM {
            return Err(ConfigError::BoardTooLarge { width, height });
        }
        if width < 4 {
            return Err(ConfigError::BoardTooNarrow { width });
        }
        Ok(())
    }
}

fn env_value(key: &'static str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

fn parse_env<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidEnv {
        key,
        value: raw.to_string(),
    })
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env_value(key) {
        Some(raw) => parse_env(key, &raw),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!((config.width, config.height), (10, 20));
        assert_eq!(config.lock_delay_ms, 500);
        assert_eq!(config.line_clear_ms, 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_board() {
        let config = EngineConfig {
            height: 0,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyBoard {
                width: 10,
                height: 0
            })
        );
    }

    #[test]
    fn test_rejects_narrow_and_huge_boards() {
        let narrow = EngineConfig {
            width: 3,
            ..EngineConfig::default()
        };
        assert_eq!(narrow.validate().unwrap_err().code(), "invalid_board");

        let huge = EngineConfig {
            height: 100,
            ..EngineConfig::default()
        };
        assert!(matches!(
            huge.validate(),
            Err(ConfigError::BoardTooLarge { .. })
        ));
    }

    #[test]
    fn test_parse_env_reports_key() {
        let err = parse_env::<u8>(ENV_BOARD_WIDTH, "wide").unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnv {
                key: ENV_BOARD_WIDTH,
                value: "wide".to_string()
            }
        );
        assert_eq!(err.code(), "invalid_env");
    }
}
