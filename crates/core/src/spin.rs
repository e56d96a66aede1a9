//! T-Spin detection based on corner occupancy around the T's center
//!
//! Classification happens before the piece is written to the board, so the
//! corners only ever see the stack the piece landed against.

use crate::board::Board;
use crate::kicks::KickTrial;
use crate::piece::Piece;
use crate::types::{PieceKind, Rotation, SpinKind};

/// Diagonal corners relative to the T's center
const CORNERS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// The two corners on the side the T points toward
fn front_corners(rotation: Rotation) -> [(i8, i8); 2] {
    match rotation {
        Rotation::North => [(-1, -1), (1, -1)],
        Rotation::East => [(1, -1), (1, 1)],
        Rotation::South => [(-1, 1), (1, 1)],
        Rotation::West => [(-1, -1), (-1, 1)],
    }
}

/// Last successful player-visible action on the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LastAction {
    #[default]
    None,
    Move,
    Rotate,
    Hold,
}

/// Classify the piece about to lock.
///
/// Only a T whose last successful action was a rotation can spin. Three or more
/// occupied corners make it a spin; it is full when both front corners are
/// occupied or the rotation needed the final kick, mini otherwise.
pub fn detect(board: &Board, piece: &Piece, last_action: LastAction, kick: KickTrial) -> SpinKind {
    if piece.kind() != PieceKind::T || last_action != LastAction::Rotate {
        return SpinKind::None;
    }

    let (cx, cy) = (piece.x + 1, piece.y + 1);
    let occupied = |&(dx, dy): &(i8, i8)| board.is_occupied(cx + dx, cy + dy);

    if CORNERS.iter().filter(|&c| occupied(c)).count() < 3 {
        return SpinKind::None;
    }

    if front_corners(piece.rotation).iter().all(occupied) {
        return SpinKind::Full;
    }

    if kick.is_final {
        SpinKind::Full
    } else {
        SpinKind::Mini
    }
}
