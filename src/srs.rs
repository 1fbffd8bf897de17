//! Super Rotation System (SRS)
//!
//! SRS defines the wall kicks attempted when rotating a piece.
//! If a rotation would cause collision, these offsets are tried in order.
//! Offsets are (dx, dy) with y growing downwards.

use crate::board::Board;
use crate::piece::Piece;
use crate::tetromino::{Rotation, RotationDirection, TetrominoType};

/// The rotation system used by the game
#[derive(Debug, Clone, Copy, Default)]
pub struct Srs;

impl Srs {
    /// Rotate the piece one step, trying each kick in order.
    /// The first legal candidate is committed; if none is legal the
    /// piece is left untouched and false is returned.
    pub fn rotate(&self, piece: &mut Piece, board: &Board, direction: RotationDirection) -> bool {
        let to = piece.rotation().rotated(direction);

        for &kick in wall_kicks(piece.kind(), piece.rotation(), direction) {
            let candidate = piece.kicked(to, kick);
            if board.is_piece_valid(&candidate) {
                *piece = candidate;
                return true;
            }
        }
        false
    }
}

/// Get the kick offsets for a rotation attempt out of `from`
pub fn wall_kicks(
    piece_type: TetrominoType,
    from: Rotation,
    direction: RotationDirection,
) -> &'static [(i32, i32)] {
    match piece_type {
        // Rotationally symmetric, only the identity kick
        TetrominoType::O => &[(0, 0)],
        TetrominoType::I => i_piece_kicks(from, direction),
        _ => jlstz_kicks(from, direction),
    }
}

/// Wall kicks for J, L, S, T, Z pieces
fn jlstz_kicks(from: Rotation, direction: RotationDirection) -> &'static [(i32, i32)] {
    use Rotation::*;
    use RotationDirection::*;

    match (from, direction) {
        // 0->R
        (Spawn, Clockwise) => &[(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        // R->0
        (Right, CounterClockwise) => &[(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
        // R->2
        (Right, Clockwise) => &[(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
        // 2->R
        (Reverse, CounterClockwise) => &[(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        // 2->L
        (Reverse, Clockwise) => &[(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        // L->2
        (Left, CounterClockwise) => &[(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        // L->0
        (Left, Clockwise) => &[(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        // 0->L
        (Spawn, CounterClockwise) => &[(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    }
}

/// Wall kicks for the I piece (different from other pieces)
fn i_piece_kicks(from: Rotation, direction: RotationDirection) -> &'static [(i32, i32)] {
    use Rotation::*;
    use RotationDirection::*;

    match (from, direction) {
        // 0->R
        (Spawn, Clockwise) => &[(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
        // R->0
        (Right, CounterClockwise) => &[(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
        // R->2
        (Right, Clockwise) => &[(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
        // 2->R
        (Reverse, CounterClockwise) => &[(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
        // 2->L
        (Reverse, Clockwise) => &[(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
        // L->2
        (Left, CounterClockwise) => &[(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
        // L->0
        (Left, Clockwise) => &[(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
        // 0->L
        (Spawn, CounterClockwise) => &[(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    }
}
