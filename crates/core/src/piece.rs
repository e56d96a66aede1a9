//! Piece module - tetromino shapes and the active piece
//!
//! Shapes are the standard SRS rotation states laid out in a 4x4 box with `y`
//! growing downward. The table is static data; nothing is derived at runtime.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Absolute board coordinates of a piece's 4 minos
pub type PieceCells = [(i8, i8); 4];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind_index(kind)][rotation.index() as usize]
}

fn kind_index(kind: PieceKind) -> usize {
    match kind {
        PieceKind::I => 0,
        PieceKind::O => 1,
        PieceKind::T => 2,
        PieceKind::S => 3,
        PieceKind::Z => 4,
        PieceKind::J => 5,
        PieceKind::L => 6,
    }
}

/// Shape table: [kind][rotation] -> mino offsets
static SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O (identical in every state)
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // T (center mino is always (1, 1))
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

/// Spawn anchor for a board of the given width: centered, one row above the top.
pub fn spawn_position(board_width: u8) -> (i8, i8) {
    (board_width as i8 / 2 - 2, -1)
}

/// A tetromino instance: fixed kind, mutable orientation and anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece at the spawn pose for a board of `board_width` columns
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        let (x, y) = spawn_position(board_width);
        Self::at(kind, Rotation::North, x, y)
    }

    /// Create a piece at an explicit pose
    pub fn at(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Color tag written to the board when this piece locks
    pub fn color(&self) -> PieceKind {
        self.kind
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute cells at the current rotation and position
    pub fn cells(&self) -> PieceCells {
        self.cells_at(self.rotation, 0, 0)
    }

    /// Absolute cells for a hypothetical rotation and offset; does not move the piece
    pub fn cells_at(&self, rotation: Rotation, dx: i8, dy: i8) -> PieceCells {
        get_shape(self.kind, rotation).map(|(mx, my)| (self.x + dx + mx, self.y + dy + my))
    }

    /// The same piece shifted by `(dx, dy)`
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}
