//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game: board, pieces,
//! randomizer, rotation, spin detection, scoring and the timing state machine.
//! It performs no I/O; callers drive it with elapsed time and commands and read
//! results back through accessors or a [`GameSnapshot`].
//!
//! # Module Structure
//!
//! - [`board`]: rectangular grid with collision checks and row removal
//! - [`piece`]: tetromino shape tables and the active piece pose
//! - [`rng`]: seeded 7-bag randomizer
//! - [`kicks`]: SRS wall kick tables and rotation attempts
//! - [`spin`]: T-Spin classification at lock time
//! - [`scoring`]: line, spin and drop points; level and gravity curve
//! - [`config`]: board size and timing, with environment overrides
//! - [`game_state`]: the engine tying everything together
//! - [`snapshot`]: read-only views for renderers
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every run of seven pieces holds each kind once
//! - **SRS Rotation**: five kick trials per rotation; O never rotates
//! - **Lock Delay**: a grounded piece locks once its timer reaches 500ms
//! - **Line Clear**: completed rows animate for 250ms before they collapse
//! - **Hold**: once per spawned piece
//! - **Scoring**: 100/300/500/800 per clear, T-Spin tables replace line points
//!
//! # Example
//!
//! ```
//! use srs_tetris_core::GameState;
//! use srs_tetris_core::types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Hard drop awards points
//! assert!(game.score() > 0);
//!
//! // Advance time in milliseconds
//! game.tick(16);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod kicks;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod spin;

pub use srs_tetris_types as types;

pub use board::{Board, LockOut};
pub use config::EngineConfig;
pub use error::{ConfigError, GameOverReason};
pub use game_state::{GameState, LockEvent, Phase};
pub use kicks::{kicks_for, try_rotate, KickTrial, Spin};
pub use piece::{get_shape, Piece};
pub use rng::PieceBag;
pub use scoring::{
    calculate_clear_score, calculate_drop_score, calculate_level, calculate_line_score,
    calculate_tspin_score, calculate_zero_line_bonus, get_fall_interval_ms,
};
pub use snapshot::{ActiveSnapshot, GameSnapshot, LineClearSnapshot, TimersSnapshot};
pub use spin::LastAction;
