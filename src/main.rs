//! Headless runner (default binary).
//!
//! Reads a line-delimited JSON script from stdin and writes results to stdout.
//! Board size, timing and seed come from `TETRIS_*` environment variables;
//! log verbosity from `TETRIS_LOG`. Logs go to stderr.

use std::io::{self, BufWriter};
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use srs_tetris::core::{EngineConfig, GameState};
use srs_tetris::replay;

const ENV_LOG: &str = "TETRIS_LOG";

fn init_logging() {
    let level = std::env::var(ENV_LOG)
        .ok()
        .and_then(|v| Level::from_str(v.trim()).ok())
        .unwrap_or(Level::WARN);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let config = EngineConfig::from_env().context("invalid engine configuration")?;
    info!(
        width = config.width,
        height = config.height,
        seed = ?config.seed,
        "starting session"
    );
    let game = GameState::with_config(config).context("failed to create game")?;

    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());
    let stats = replay::run(game, stdin, stdout)?;

    info!(
        lines = stats.lines,
        ticks = stats.ticks,
        actions = stats.actions,
        errors = stats.errors,
        "session finished"
    );
    Ok(())
}
