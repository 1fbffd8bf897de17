//! Active falling piece logic

use crate::board::{Board, Tile};
use crate::tetromino::{Rotation, TetrominoType};

/// Single-cell translations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// A tetromino with a position on (or next to) the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: TetrominoType,
    rotation: Rotation,
    /// Top-left of the shape's bounding box, in board cells
    x: i32,
    y: i32,
    /// What the piece leaves behind when locked
    tile: Tile,
}

impl Piece {
    /// Create a piece in spawn rotation at (x, y)
    pub fn new(kind: TetrominoType, x: i32, y: i32) -> Self {
        Self {
            kind,
            rotation: Rotation::Spawn,
            x,
            y,
            tile: Tile::Piece(kind),
        }
    }

    /// Create a piece at its canonical spawn transform for a board this wide
    pub fn spawn(kind: TetrominoType, board_width: usize) -> Self {
        let (dx, dy) = kind.spawn_offset();
        let mut piece = Self::new(kind, 0, 0);
        piece.move_to(board_width as i32 / 2 + dx, dy);
        piece
    }

    pub fn kind(&self) -> TetrominoType {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn tile(&self) -> Tile {
        self.tile
    }

    /// Override the tile this piece locks as
    pub fn set_tile(&mut self, tile: Tile) {
        self.tile = tile;
    }

    /// Absolute (x, y) of the four occupied cells
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.kind
            .shape(self.rotation)
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Translate by one cell. Legality is the caller's business.
    pub fn move_dir(&mut self, direction: Direction) {
        let (dx, dy) = direction.delta();
        self.move_by(dx, dy);
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Build the moved candidate and test it against the board.
    /// The caller commits the candidate only if it is valid.
    pub fn try_move(&self, direction: Direction, board: &Board) -> (bool, Piece) {
        let mut candidate = *self;
        candidate.move_dir(direction);
        (board.is_piece_valid(&candidate), candidate)
    }

    /// Candidate for a rotation attempt: new state, shifted by a kick
    pub(crate) fn kicked(&self, rotation: Rotation, (dx, dy): (i32, i32)) -> Piece {
        Piece {
            rotation,
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Where this piece would land if hard dropped
    pub fn ghost(&self, board: &Board) -> Piece {
        let mut ghost = *self;
        board.hard_drop(&mut ghost);
        ghost
    }
}
