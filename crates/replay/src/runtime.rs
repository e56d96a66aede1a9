//! Replay runtime - feeds parsed messages to a `GameState`
//!
//! The runtime owns the engine. Each input line is handled to completion
//! before the next one is read, so a script fully determines the session
//! given a fixed seed.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::core::GameState;
use crate::protocol::{
    create_error, parse_message, ErrorCode, InboundMessage, LockMessage, OutboundMessage,
    SnapshotMessage,
};

/// Counters reported when a script finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayStats {
    pub lines: u64,
    pub ticks: u64,
    pub actions: u64,
    pub errors: u64,
}

pub struct Replay {
    game: GameState,
    line: u64,
    stats: ReplayStats,
}

impl Replay {
    pub fn new(game: GameState) -> Self {
        Self {
            game,
            line: 0,
            stats: ReplayStats::default(),
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    /// Handle one input line, pushing any resulting messages to `out`
    pub fn handle_line(&mut self, raw: &str, out: &mut Vec<OutboundMessage>) {
        self.line += 1;
        self.stats.lines += 1;

        let raw = raw.trim();
        if raw.is_empty() {
            return;
        }

        let msg = match parse_message(raw) {
            Ok(msg) => msg,
            Err(e) => {
                warn!(line = self.line, error = %e, "skipping malformed line");
                self.stats.errors += 1;
                out.push(create_error(self.line, ErrorCode::InvalidMessage, &e.to_string()));
                return;
            }
        };

        match msg {
            InboundMessage::Tick { ms } => {
                self.stats.ticks += 1;
                self.game.tick(ms);
                self.drain_events(out);
            }
            InboundMessage::Action { actions } => {
                for action in actions.0 {
                    self.stats.actions += 1;
                    let applied = self.game.apply_action(action);
                    debug!(line = self.line, action = action.as_str(), applied, "action");
                    self.drain_events(out);
                }
            }
            InboundMessage::Snapshot => out.push(self.snapshot_message(false)),
        }
    }

    fn drain_events(&mut self, out: &mut Vec<OutboundMessage>) {
        if let Some(event) = self.game.take_last_event() {
            out.push(OutboundMessage::Lock(LockMessage::from_event(self.line, event)));
        }
    }

    fn snapshot_message(&self, is_final: bool) -> OutboundMessage {
        OutboundMessage::Snapshot(SnapshotMessage {
            line: if is_final { 0 } else { self.line },
            is_final,
            state: self.game.snapshot(),
        })
    }

    /// The end-of-input snapshot
    pub fn finish(&self) -> OutboundMessage {
        self.snapshot_message(true)
    }
}

fn write_message<W: Write>(output: &mut W, msg: &OutboundMessage) -> Result<()> {
    serde_json::to_writer(&mut *output, msg).context("failed to encode message")?;
    output.write_all(b"\n").context("failed to write output")?;
    Ok(())
}

/// Run a whole script from `input`, writing one JSON message per line to `output`
pub fn run<R: BufRead, W: Write>(game: GameState, input: R, mut output: W) -> Result<ReplayStats> {
    let mut replay = Replay::new(game);
    let mut pending = Vec::new();

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        replay.handle_line(&line, &mut pending);
        for msg in pending.drain(..) {
            write_message(&mut output, &msg)?;
        }
    }

    write_message(&mut output, &replay.finish())?;
    output.flush().context("failed to flush output")?;

    let stats = replay.stats();
    debug!(?stats, "script finished");
    Ok(stats)
}

/// Run a script held in memory and collect the output lines
pub fn run_script(game: GameState, script: &str) -> Result<(ReplayStats, Vec<String>)> {
    let mut sink = Vec::new();
    let stats = run(game, script.as_bytes(), &mut sink)?;
    let text = String::from_utf8(sink).context("output was not utf-8")?;
    Ok((stats, text.lines().map(str::to_string).collect()))
}
