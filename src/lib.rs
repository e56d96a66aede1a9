//! SRS Tetris (workspace facade crate).
//!
//! Re-exports the engine crates under `srs_tetris::{core,replay,types}` so
//! embedders depend on a single package.

pub use srs_tetris_core as core;
pub use srs_tetris_replay as replay;
pub use srs_tetris_types as types;
