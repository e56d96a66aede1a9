//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by the engine, the replay driver
//! and any renderer consuming snapshots. All types are plain data with no I/O.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Rows are indexed top to bottom,
//! so `y` grows downward; rows above the visible top (`y < 0`) form the spawn buffer.
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_FALL_MS` | 800 | Gravity interval at level 1 |
//! | `FALL_STEP_MS` | 70 | Interval reduction per level |
//! | `MIN_FALL_MS` | 80 | Fastest gravity interval |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a grounded piece locks |
//! | `LINE_CLEAR_MS` | 250 | Line clear animation length |
//!
//! # Examples
//!
//! ```
//! use srs_tetris_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Largest accepted board dimension (coordinates are stored as `i8`)
pub const MAX_BOARD_DIM: u8 = 64;

/// Gravity interval at level 1
pub const BASE_FALL_MS: u32 = 800;

/// Gravity interval reduction per level
pub const FALL_STEP_MS: u32 = 70;

/// Gravity interval floor
pub const MIN_FALL_MS: u32 = 80;

/// Lock delay once a piece has touched down
pub const LOCK_DELAY_MS: u32 = 500;

/// Line clear animation duration
pub const LINE_CLEAR_MS: u32 = 250;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table, indexed by rows cleared
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Full T-Spin scores for 1, 2 and 3 rows
pub const TSPIN_FULL_SCORES: [u32; 3] = [800, 1200, 1600];

/// Mini T-Spin scores for 1 and 2 rows
pub const TSPIN_MINI_SCORES: [u32; 2] = [200, 400];

/// Points for a full T-Spin that clears nothing
pub const TSPIN_FULL_ZERO_LINE_BONUS: u32 = 400;

/// Points for a mini T-Spin that clears nothing
pub const TSPIN_MINI_ZERO_LINE_BONUS: u32 = 100;

/// Points per row of soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row of hard drop
pub const HARD_DROP_POINTS: u32 = 2;


/// The seven tetromino piece kinds
///
/// The kind doubles as the color tag stored in board cells:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in bag refill order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Display color for renderers, as an RGB triple
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0, 220, 255),
            PieceKind::O => (255, 220, 0),
            PieceKind::T => (180, 60, 255),
            PieceKind::S => (80, 255, 80),
            PieceKind::Z => (255, 60, 60),
            PieceKind::J => (60, 100, 255),
            PieceKind::L => (255, 160, 40),
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (state 0)
/// - **East**: Rotated 90° clockwise (state 1)
/// - **South**: Rotated 180° (state 2)
/// - **West**: Rotated 90° counter-clockwise (state 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Build a rotation from any integer state, taken modulo 4
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Numeric state in `0..4`
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use srs_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// ```
    /// use srs_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Commands accepted by the engine
///
/// Input handlers translate raw key events into these; the engine ignores
/// any command that is not valid in its current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (1 point per row)
    SoftDrop,
    /// Drop piece to the lowest valid position and lock it (2 points per row)
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (once per spawned piece)
    Hold,
    /// Reinitialise the whole session
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use srs_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Restart => "restart",
        }
    }
}

/// T-Spin classification of the piece that just locked
///
/// - **None**: Not a T-spin
/// - **Mini**: 3+ corners occupied, front corners not both occupied, no final kick
/// - **Full**: 3+ corners occupied and either both front corners occupied or the
///   rotation used the final kick offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpinKind {
    #[default]
    None,
    Mini,
    Full,
}

impl SpinKind {
    /// Returns `None` for `SpinKind::None`, `Some("mini")` or `Some("full")` otherwise.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            SpinKind::None => None,
            SpinKind::Mini => Some("mini"),
            SpinKind::Full => Some("full"),
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled, tagged with the kind (color) that filled it
pub type Cell = Option<PieceKind>;
