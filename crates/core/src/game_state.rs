//! Game state module - manages the complete game state
//!
//! This module ties together the board, pieces, randomizer, kicks, spin detection
//! and scoring. It runs the gravity / lock-delay / line-clear state machine and
//! dispatches player commands.
//!
//! Phases:
//! - `Falling`: gravity runs and commands apply.
//! - `LineClearPending`: completed rows are animating; gravity and commands wait.
//! - `GameOver`: terminal until `Restart`.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::board::{Board, LockOut};
use crate::config::EngineConfig;
use crate::error::{ConfigError, GameOverReason};
use crate::kicks::{self, KickTrial, Spin};
use crate::piece::Piece;
use crate::rng::PieceBag;
use crate::scoring::{
    calculate_clear_score, calculate_drop_score, calculate_level, calculate_zero_line_bonus,
    get_fall_interval_ms,
};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, LineClearSnapshot, TimersSnapshot};
use crate::spin::{self, LastAction};
use crate::types::{GameAction, PieceKind, SpinKind};

/// Engine phase, derived from state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Falling,
    LineClearPending,
    GameOver,
}

/// Rows waiting for the clear animation to finish
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingClear {
    rows: ArrayVec<usize, 4>,
    elapsed_ms: u32,
    duration_ms: u32,
    /// Spin classified when the piece locked
    spin: SpinKind,
}

/// Emitted whenever a piece locks (consumed by observers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub spin: SpinKind,
    /// Rows this lock completed; they clear when the animation ends
    pub rows: ArrayVec<usize, 4>,
    /// Points awarded at lock time (the zero-line spin bonus)
    pub bonus: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    bag: PieceBag,
    active: Piece,
    next: PieceKind,
    hold: Option<PieceKind>,
    hold_used: bool,
    score: u32,
    level: u32,
    lines: u32,
    fall_timer_ms: u32,
    fall_interval_ms: u32,
    lock_timer_ms: u32,
    on_ground: bool,
    pending_clear: Option<PendingClear>,
    /// Written by move/rotate/hold/spawn, read by spin detection at lock
    last_action: LastAction,
    /// Kick used by the last successful rotation
    last_kick: KickTrial,
    last_spin: SpinKind,
    last_event: Option<LockEvent>,
    game_over: Option<GameOverReason>,
}

impl GameState {
    /// Create a standard 10x20 game with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::build(EngineConfig::seeded(seed), PieceBag::new(seed))
    }

    /// Create a game from an explicit configuration
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let bag = match config.seed {
            Some(seed) => PieceBag::new(seed),
            None => PieceBag::from_entropy(),
        };
        Ok(Self::build(config, bag))
    }

    fn build(config: EngineConfig, mut bag: PieceBag) -> Self {
        let board = Board::new(config.width, config.height);
        let active = Piece::spawn(bag.draw(), config.width);
        let next = bag.draw();
        let level = calculate_level(0);

        Self {
            board,
            bag,
            active,
            next,
            hold: None,
            hold_used: false,
            score: 0,
            level,
            lines: 0,
            fall_timer_ms: 0,
            fall_interval_ms: get_fall_interval_ms(level),
            lock_timer_ms: 0,
            on_ground: false,
            pending_clear: None,
            last_action: LastAction::None,
            last_kick: KickTrial::default(),
            last_spin: SpinKind::None,
            last_event: None,
            game_over: None,
            config,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_over.is_some() {
            Phase::GameOver
        } else if self.pending_clear.is_some() {
            Phase::LineClearPending
        } else {
            Phase::Falling
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Piece {
        self.active
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn game_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_timer_ms
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    /// Classification of the most recent lock
    pub fn last_spin(&self) -> SpinKind {
        self.last_spin
    }

    /// Rows currently animating, if any
    pub fn pending_rows(&self) -> &[usize] {
        match &self.pending_clear {
            Some(pending) => &pending.rows,
            None => &[],
        }
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Lowest downward offset at which the active piece still fits
    pub fn ghost_dy(&self) -> i8 {
        let mut dy = 0;
        while self
            .board
            .is_valid(&self.active.cells_at(self.active.rotation, 0, dy + 1))
        {
            dy += 1;
        }
        dy
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());

        let falling = self.phase() != Phase::LineClearPending;
        out.active = falling.then(|| ActiveSnapshot::from(self.active));
        out.ghost_dy = falling.then(|| self.ghost_dy());
        out.next = self.next;
        out.hold = self.hold;
        out.hold_used = self.hold_used;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.game_over = self.game_over.is_some();
        out.game_over_reason = self.game_over;
        out.last_spin = self.last_spin;
        out.line_clear = self.pending_clear.as_ref().map(|p| LineClearSnapshot {
            elapsed_ms: p.elapsed_ms,
            duration_ms: p.duration_ms,
            rows: p.rows.to_vec(),
        });
        out.timers = TimersSnapshot {
            fall_ms: self.fall_timer_ms,
            fall_interval_ms: self.fall_interval_ms,
            lock_ms: self.lock_timer_ms,
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the clock by `elapsed_ms`: clear animation, gravity and lock delay.
    ///
    /// Returns true if the state changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        match self.phase() {
            Phase::GameOver => false,
            Phase::LineClearPending => self.tick_line_clear(elapsed_ms),
            Phase::Falling => self.tick_gravity(elapsed_ms),
        }
    }

    fn tick_line_clear(&mut self, elapsed_ms: u32) -> bool {
        let Some(pending) = self.pending_clear.as_mut() else {
            return false;
        };
        pending.elapsed_ms = pending.elapsed_ms.saturating_add(elapsed_ms);
        if pending.elapsed_ms < pending.duration_ms {
            return false;
        }
        self.finish_line_clear();
        true
    }

    fn tick_gravity(&mut self, elapsed_ms: u32) -> bool {
        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms < self.fall_interval_ms {
            return false;
        }
        self.fall_timer_ms = 0;

        if self.try_move(0, 1) {
            self.on_ground = false;
            self.lock_timer_ms = 0;
            return true;
        }

        if !self.on_ground {
            // Grace period begins
            self.on_ground = true;
            self.lock_timer_ms = 0;
            return true;
        }

        self.lock_timer_ms = self.lock_timer_ms.saturating_add(self.fall_interval_ms);
        if self.lock_timer_ms >= self.config.lock_delay_ms {
            self.lock_piece();
        }
        true
    }

    /// Apply a game action
    ///
    /// Everything except `Restart` is ignored outside the `Falling` phase.
    /// `Restart` is honoured in every phase, including mid-game and during a
    /// line clear, not only after game over.
    /// Returns true if the action changed the state.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Restart => {
                self.restart();
                true
            }
            _ if self.phase() != Phase::Falling => false,
            GameAction::MoveLeft => self.move_horizontal(-1),
            GameAction::MoveRight => self.move_horizontal(1),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.try_rotate(Spin::Cw),
            GameAction::RotateCcw => self.try_rotate(Spin::Ccw),
            GameAction::Hold => self.hold(),
        }
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let moved = self.active.shifted(dx, dy);
        if !self.board.is_valid(&moved.cells()) {
            return false;
        }
        self.active = moved;
        self.last_action = LastAction::Move;
        true
    }

    /// Whether the active piece has room to fall one row
    fn can_fall(&self) -> bool {
        self.board
            .is_valid(&self.active.cells_at(self.active.rotation, 0, 1))
    }

    fn move_horizontal(&mut self, dx: i8) -> bool {
        if !self.try_move(dx, 0) {
            return false;
        }
        // Slid off a ledge: the grace period no longer applies.
        if self.on_ground && self.can_fall() {
            self.on_ground = false;
            self.lock_timer_ms = 0;
        }
        true
    }

    fn soft_drop(&mut self) -> bool {
        if !self.try_move(0, 1) {
            return false;
        }
        self.score += calculate_drop_score(1, false);
        self.fall_timer_ms = 0;
        true
    }

    /// Hard drop the active piece to the bottom and lock it immediately
    pub(crate) fn hard_drop(&mut self) -> u32 {
        let mut drop_distance: u32 = 0;
        while self.try_move(0, 1) {
            drop_distance += 1;
        }

        let drop_score = calculate_drop_score(drop_distance, true);
        self.score += drop_score;
        self.lock_piece();
        drop_score
    }

    /// Try to rotate the active piece with SRS wall kicks
    pub(crate) fn try_rotate(&mut self, direction: Spin) -> bool {
        match kicks::try_rotate(&self.active, direction, &self.board) {
            Some((rotated, trial)) => {
                self.active = rotated;
                self.last_action = LastAction::Rotate;
                self.last_kick = trial;
                true
            }
            None => false,
        }
    }

    /// Swap active piece with hold piece (once per spawned piece)
    ///
    /// No-op outside the `Falling` phase.
    pub fn hold(&mut self) -> bool {
        if self.phase() != Phase::Falling || self.hold_used {
            return false;
        }
        self.hold_used = true;

        let current = self.active.kind();
        let incoming = match self.hold.replace(current) {
            Some(held) => held,
            None => {
                let kind = self.next;
                self.next = self.bag.draw();
                kind
            }
        };
        self.active = Piece::spawn(incoming, self.board.width());

        self.on_ground = false;
        self.lock_timer_ms = 0;
        self.fall_timer_ms = 0;
        self.last_action = LastAction::Hold;

        if !self.board.is_valid(&self.active.cells()) {
            self.end_game(GameOverReason::BlockOut);
        }
        true
    }

    /// Lock the active piece onto the board and start any line clear
    ///
    /// No-op outside the `Falling` phase.
    pub fn lock_piece(&mut self) {
        if self.phase() != Phase::Falling {
            return;
        }
        let piece = self.active;
        // Classify before the piece's own cells land on the board.
        let spin = spin::detect(&self.board, &piece, self.last_action, self.last_kick);

        if let Err(LockOut) = self.board.lock(&piece.cells(), piece.color()) {
            self.end_game(GameOverReason::LockOut);
            return;
        }

        let rows = self.board.full_rows();
        self.last_spin = spin;
        debug!(kind = ?piece.kind(), x = piece.x, y = piece.y, ?spin, rows = rows.len(), "piece locked");

        let bonus = if rows.is_empty() {
            calculate_zero_line_bonus(spin)
        } else {
            0
        };
        self.last_event = Some(LockEvent {
            kind: piece.kind(),
            spin,
            rows: rows.clone(),
            bonus,
        });

        if rows.is_empty() {
            self.score += bonus;
            self.spawn_next();
        } else {
            self.pending_clear = Some(PendingClear {
                rows,
                elapsed_ms: 0,
                duration_ms: self.config.line_clear_ms,
                spin,
            });
        }
    }

    fn finish_line_clear(&mut self) {
        let Some(pending) = self.pending_clear.take() else {
            return;
        };
        self.board.remove_rows(&pending.rows);

        let cleared = pending.rows.len();
        self.lines += cleared as u32;
        self.score += calculate_clear_score(cleared, pending.spin);

        let level = calculate_level(self.lines);
        if level != self.level {
            debug!(from = self.level, to = level, lines = self.lines, "level up");
            self.level = level;
            self.fall_interval_ms = get_fall_interval_ms(level);
        }
        debug!(cleared, spin = ?pending.spin, score = self.score, "lines cleared");

        self.spawn_next();
    }

    /// Promote the next piece to active and draw a new next piece
    fn spawn_next(&mut self) {
        let kind = self.next;
        self.next = self.bag.draw();
        self.active = Piece::spawn(kind, self.board.width());

        self.on_ground = false;
        self.lock_timer_ms = 0;
        self.hold_used = false;
        self.last_action = LastAction::None;
        self.last_kick = KickTrial::default();

        if !self.board.is_valid(&self.active.cells()) {
            self.end_game(GameOverReason::BlockOut);
        }
    }

    fn end_game(&mut self, reason: GameOverReason) {
        debug!(reason = reason.as_str(), score = self.score, lines = self.lines, "game over");
        self.game_over = Some(reason);
    }

    /// Reinitialise the whole session; the RNG stream carries over
    pub fn restart(&mut self) {
        let mut bag = std::mem::take(&mut self.bag);
        bag.reset();
        *self = Self::build(self.config.clone(), bag);
        debug!("session restarted");
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
