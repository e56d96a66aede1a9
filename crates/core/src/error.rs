//! Error and terminal-condition types

use std::fmt;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GameOverReason {
    /// A freshly spawned (or swapped-in) piece overlapped the stack
    BlockOut,
    /// A piece locked with a mino above the visible top
    LockOut,
}

impl GameOverReason {
    pub fn as_str(self) -> &'static str {
        match self {
            GameOverReason::BlockOut => "block_out",
            GameOverReason::LockOut => "lock_out",
        }
    }
}

/// Rejected engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height is zero
    EmptyBoard { width: u8, height: u8 },
    /// Narrower than a horizontal I piece
    BoardTooNarrow { width: u8 },
    /// Larger than the coordinate range supports
    BoardTooLarge { width: u8, height: u8 },
    /// An environment variable held an unparsable value
    InvalidEnv { key: &'static str, value: String },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::EmptyBoard { .. }
            | ConfigError::BoardTooNarrow { .. }
            | ConfigError::BoardTooLarge { .. } => "invalid_board",
            ConfigError::InvalidEnv { .. } => "invalid_env",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyBoard { width, height } => {
                write!(f, "board dimensions must be positive, got {width}x{height}")
            }
            ConfigError::BoardTooNarrow { width } => {
                write!(f, "board must be at least 4 columns wide, got {width}")
            }
            ConfigError::BoardTooLarge { width, height } => write!(
                f,
                "board dimensions must not exceed {max}, got {width}x{height}",
                max = crate::types::MAX_BOARD_DIM
            ),
            ConfigError::InvalidEnv { key, value } => {
                write!(f, "{key}={value:?} is not a valid value")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
