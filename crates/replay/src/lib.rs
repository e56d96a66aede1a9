//! Replay driver - scripted, headless sessions over line-delimited JSON
//!
//! A script is a sequence of JSON messages, one per line, that advance the
//! clock and issue commands. The driver answers with JSON lines of its own.
//!
//! # Message Types
//!
//! ## Script → Engine
//!
//! - **tick**: advance time, `{"type":"tick","ms":16}`
//! - **action**: apply commands in order, `{"type":"action","actions":["moveLeft","hardDrop"]}`
//! - **snapshot**: request the current state, `{"type":"snapshot"}`
//!
//! ## Engine → Script
//!
//! - **lock**: a piece locked (kind, spin, completed rows, zero-line bonus)
//! - **snapshot**: full state view; one more is written at end of input with `"final":true`
//! - **error**: the line could not be parsed and was skipped
//!
//! # Example
//!
//! ```text
//! {"type":"action","actions":["rotateCw","hardDrop"]}
//! {"type":"tick","ms":250}
//! {"type":"snapshot"}
//! ```
//!
//! A tick applies at most one gravity step regardless of its length, so
//! scripts should advance time in frame-sized increments.

pub mod protocol;
pub mod runtime;

pub use srs_tetris_core as core;
pub use srs_tetris_types as types;

pub use protocol::*;
pub use runtime::{run, run_script, Replay, ReplayStats};
