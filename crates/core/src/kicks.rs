//! SRS wall kick tables and the rotation search
//!
//! Offsets are applied directly as board deltas (`y` grows downward).
//! Reference: https://tetris.wiki/SRS

use tracing::trace;

use crate::board::Board;
use crate::piece::Piece;
use crate::types::{PieceKind, Rotation};

/// Trials per rotation transition
pub const KICK_TRIALS: usize = 5;

/// Ordered (dx, dy) trial offsets for one transition
pub type KickList = [(i8, i8); KICK_TRIALS];

/// Transition table indexed by `from * 4 + to`; `None` for unsupported transitions
pub type KickTable = [Option<KickList>; 16];

const NO_KICK: [(i8, i8); 1] = [(0, 0)];

const fn encode(from: u8, to: u8) -> usize {
    (from * 4 + to) as usize
}

const fn build(entries: [(u8, u8, KickList); 8]) -> KickTable {
    let mut table: KickTable = [None; 16];
    let mut i = 0;
    while i < entries.len() {
        let (from, to, kicks) = entries[i];
        table[encode(from, to)] = Some(kicks);
        i += 1;
    }
    table
}

/// JLSTZ kick table (shared by J, L, S, T, Z)
pub static JLSTZ_KICKS: KickTable = build([
    (0, 1, [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]),
    (1, 0, [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]),
    (1, 2, [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]),
    (2, 1, [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]),
    (2, 3, [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]),
    (3, 2, [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]),
    (3, 0, [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]),
    (0, 3, [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]),
]);

/// I piece kick table (different from JLSTZ)
pub static I_KICKS: KickTable = build([
    (0, 1, [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)]),
    (1, 0, [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)]),
    (1, 2, [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)]),
    (2, 1, [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)]),
    (2, 3, [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)]),
    (3, 2, [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)]),
    (3, 0, [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)]),
    (0, 3, [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)]),
]);

/// Ordered offsets to try for `kind` rotating `from -> to`.
///
/// O has no entry (it never rotates); a transition missing from the table
/// falls back to a single in-place trial.
pub fn kicks_for(kind: PieceKind, from: Rotation, to: Rotation) -> &'static [(i8, i8)] {
    let table = match kind {
        PieceKind::O => return &[],
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    };
    match &table[encode(from.index(), to.index())] {
        Some(kicks) => kicks,
        None => &NO_KICK,
    }
}

/// Which trial offset a successful rotation used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KickTrial {
    pub index: u8,
    /// The trial was the last entry of its list
    pub is_final: bool,
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    Cw,
    Ccw,
}

/// Try to rotate a piece with wall kicks.
///
/// Returns the rotated piece and the trial that placed it, or `None` when the
/// piece is an O or every offset collides. The first valid offset wins.
pub fn try_rotate(piece: &Piece, direction: Spin, board: &Board) -> Option<(Piece, KickTrial)> {
    let to = match direction {
        Spin::Cw => piece.rotation.rotate_cw(),
        Spin::Ccw => piece.rotation.rotate_ccw(),
    };

    let kicks = kicks_for(piece.kind(), piece.rotation, to);
    for (i, &(dx, dy)) in kicks.iter().enumerate() {
        if board.is_valid(&piece.cells_at(to, dx, dy)) {
            let mut rotated = piece.shifted(dx, dy);
            rotated.rotation = to;
            trace!(kind = ?piece.kind(), ?to, kick = i, "rotation accepted");
            return Some((
                rotated,
                KickTrial {
                    index: i as u8,
                    is_final: i + 1 == kicks.len(),
                },
            ));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn o_piece_has_no_kicks() {
        assert!(kicks_for(PieceKind::O, Rotation::North, Rotation::East).is_empty());
        let board = Board::default();
        let piece = Piece::spawn(PieceKind::O, 10);
        assert!(try_rotate(&piece, Spin::Cw, &board).is_none());
    }

    #[test]
    fn missing_transition_falls_back_to_in_place() {
        assert_eq!(
            kicks_for(PieceKind::T, Rotation::North, Rotation::South),
            &[(0, 0)]
        );
    }

    #[test]
    fn every_quarter_turn_has_five_trials() {
        for kind in [PieceKind::I, PieceKind::T, PieceKind::S] {
            for r in 0..4 {
                let from = Rotation::from_index(r);
                assert_eq!(kicks_for(kind, from, from.rotate_cw()).len(), KICK_TRIALS);
                assert_eq!(kicks_for(kind, from, from.rotate_ccw()).len(), KICK_TRIALS);
            }
        }
    }

    #[test]
    fn free_rotation_uses_first_trial() {
        let board = Board::default();
        let piece = Piece::at(PieceKind::T, Rotation::North, 4, 10);
        let (rotated, trial) = try_rotate(&piece, Spin::Cw, &board).unwrap();
        assert_eq!(rotated.rotation, Rotation::East);
        assert_eq!((rotated.x, rotated.y), (4, 10));
        assert_eq!(trial, KickTrial { index: 0, is_final: false });
    }

    #[test]
    fn wall_kick_shifts_off_the_wall() {
        let board = Board::default();
        // Vertical I hugging the left wall (cells at x = -1 + 1 = 0).
        let piece = Piece::at(PieceKind::I, Rotation::West, -1, 10);
        let (rotated, trial) = try_rotate(&piece, Spin::Cw, &board).unwrap();
        assert_eq!(rotated.rotation, Rotation::North);
        assert!(board.is_valid(&rotated.cells()));
        assert!(trial.index > 0);
    }

    #[test]
    fn blocked_rotation_returns_none() {
        // Solid 3x6 board with a T-shaped hole; every other pose collides.
        let mut board = Board::new(3, 6);
        board.fill_rows(0..6, &[], PieceKind::Z);
        let piece = Piece::at(PieceKind::T, Rotation::North, 0, 3);
        for (x, y) in piece.cells() {
            board.set(x, y, None);
        }
        assert!(board.is_valid(&piece.cells()));
        assert!(try_rotate(&piece, Spin::Cw, &board).is_none());
        assert!(try_rotate(&piece, Spin::Ccw, &board).is_none());
    }
}
