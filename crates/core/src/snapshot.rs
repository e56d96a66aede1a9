//! Read-only views of the game state for renderers and observers

use crate::error::GameOverReason;
use crate::piece::Piece;
use crate::types::{Cell, PieceKind, Rotation, SpinKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Progress of the line clear animation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LineClearSnapshot {
    pub elapsed_ms: u32,
    pub duration_ms: u32,
    /// Rows being cleared, top to bottom
    pub rows: Vec<usize>,
}

impl LineClearSnapshot {
    /// Fraction of the animation played, in `0.0..=1.0`
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms as f32 / self.duration_ms as f32).min(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimersSnapshot {
    pub fall_ms: u32,
    pub fall_interval_ms: u32,
    pub lock_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major, `width * height` cells
    pub board: Vec<Cell>,
    /// Hidden while rows are clearing
    pub active: Option<ActiveSnapshot>,
    pub ghost_dy: Option<i8>,
    pub next: PieceKind,
    pub hold: Option<PieceKind>,
    pub hold_used: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub game_over: bool,
    pub game_over_reason: Option<GameOverReason>,
    pub last_spin: SpinKind,
    pub line_clear: Option<LineClearSnapshot>,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= self.width as usize {
            return None;
        }
        self.board
            .get(y * self.width as usize + x)
            .copied()
            .flatten()
    }

    pub fn playable(&self) -> bool {
        !self.game_over && self.line_clear.is_none()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            board: Vec::new(),
            active: None,
            ghost_dy: None,
            next: PieceKind::I,
            hold: None,
            hold_used: false,
            score: 0,
            level: 1,
            lines: 0,
            game_over: false,
            game_over_reason: None,
            last_spin: SpinKind::None,
            line_clear: None,
            timers: TimersSnapshot::default(),
        }
    }
}
