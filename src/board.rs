//! Game board representation and collision detection

use crate::piece::{Direction, Piece};
use crate::tetromino::TetrominoType;
use ratatui::style::Color;

/// Default board dimensions
pub const DEFAULT_BOARD_WIDTH: usize = 10;
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

/// What a locked cell looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// Regular block, colored after the piece that left it
    Piece(TetrominoType),
    /// Block locked while playing the invisible variant
    Invisible,
}

impl Tile {
    pub fn color(&self) -> Color {
        match self {
            Tile::Piece(kind) => kind.color(),
            Tile::Invisible => Color::Gray,
        }
    }
}

/// A cell on the board - either empty or filled with a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Tile),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The game board
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    /// Row-major grid, row 0 is the top, row `height - 1` the bottom
    cells: Vec<Cell>,
    /// Rows found full by the last `mark_full_lines`, waiting to be cleared
    marked: Vec<bool>,
    /// Rendering-only: hide blocks locked in invisible mode
    invisible: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            marked: vec![false; height],
            invisible: false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Get the cell at a position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a position is within bounds and empty
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|cell| cell.is_empty())
    }

    /// True iff every cell of the piece is in bounds and empty
    pub fn is_piece_valid(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(x, y)| self.is_valid_position(x, y))
    }

    /// Lock a piece onto the board. Placement is not checked; cells
    /// outside the grid are dropped.
    pub fn lock_piece(&mut self, piece: &Piece) {
        let cell = Cell::Filled(piece.tile());
        for (x, y) in piece.cells() {
            self.set(x, y, cell);
        }
    }

    fn is_line_full(&self, row: usize) -> bool {
        self.row(row).iter().all(|cell| cell.is_filled())
    }

    fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Mark every full row for clearing and return how many there are
    pub fn mark_full_lines(&mut self) -> usize {
        let mut count = 0;
        for row in 0..self.height {
            let full = self.is_line_full(row);
            self.marked[row] = full;
            if full {
                count += 1;
            }
        }
        count
    }

    /// Whether a row is waiting to be cleared
    pub fn is_row_marked(&self, row: usize) -> bool {
        self.marked.get(row).copied().unwrap_or(false)
    }

    /// Remove the marked rows, collapsing everything above them
    pub fn clear_full_lines(&mut self) {
        if !self.marked.contains(&true) {
            return;
        }

        // Compact from the bottom up, skipping marked rows
        let mut write_row = self.height;
        for read_row in (0..self.height).rev() {
            if self.marked[read_row] {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let (w, width) = (write_row * self.width, self.width);
                self.cells
                    .copy_within(read_row * width..(read_row + 1) * width, w);
            }
        }

        // Fill the top with empty rows
        for cell in &mut self.cells[..write_row * self.width] {
            *cell = Cell::Empty;
        }

        self.marked.fill(false);
    }

    /// Move the piece down as far as it goes and return the distance.
    /// The piece is not locked.
    pub fn hard_drop(&self, piece: &mut Piece) -> u32 {
        let mut distance = 0;
        loop {
            let (valid, moved) = piece.try_move(Direction::Down, self);
            if !valid {
                return distance;
            }
            *piece = moved;
            distance += 1;
        }
    }

    /// Hide or reveal blocks locked in invisible mode
    pub fn turn_invisible(&mut self, invisible: bool) {
        self.invisible = invisible;
    }

    pub fn is_invisible(&self) -> bool {
        self.invisible
    }

    /// Shift every locked cell one column left.
    /// Does nothing if a block sits in the leftmost column.
    pub fn push_left(&mut self) -> bool {
        if (0..self.height).any(|row| self.row(row)[0].is_filled()) {
            return false;
        }
        for row in 0..self.height {
            let start = row * self.width;
            self.cells[start..start + self.width].rotate_left(1);
        }
        true
    }

    /// Shift every locked cell one column right.
    /// Does nothing if a block sits in the rightmost column.
    pub fn push_right(&mut self) -> bool {
        if (0..self.height).any(|row| self.row(row)[self.width - 1].is_filled()) {
            return false;
        }
        for row in 0..self.height {
            let start = row * self.width;
            self.cells[start..start + self.width].rotate_right(1);
        }
        true
    }

    /// Top-out: the topmost row holds a block
    pub fn is_full(&self) -> bool {
        self.height > 0 && self.row(0).iter().any(|cell| cell.is_filled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::TetrominoType;

    fn filled(kind: TetrominoType) -> Cell {
        Cell::Filled(Tile::Piece(kind))
    }

    fn occupied(board: &Board) -> usize {
        board.cells.iter().filter(|c| c.is_filled()).count()
    }

    fn fill_row_except(board: &mut Board, row: i32, hole: Option<i32>) {
        for x in 0..board.width() as i32 {
            if Some(x) != hole {
                board.set(x, row, filled(TetrominoType::Z));
            }
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        assert_eq!(occupied(&board), 0);
        assert!(!board.is_full());
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 20);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::default();
        assert!(board.set(5, 5, filled(TetrominoType::T)));
        assert_eq!(board.get(5, 5), Some(filled(TetrominoType::T)));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::default();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(0, 20), None);
        assert_eq!(board.get(10, 0), None);
        assert!(!board.set(10, 0, filled(TetrominoType::I)));
    }

    #[test]
    fn test_piece_validity() {
        let mut board = Board::default();
        let mut piece = Piece::new(TetrominoType::O, 3, 0);
        assert!(board.is_piece_valid(&piece));

        // Off the left edge: O occupies box columns 1 and 2
        piece.move_to(-2, 0);
        assert!(!board.is_piece_valid(&piece));
        piece.move_to(-1, 0);
        assert!(board.is_piece_valid(&piece));

        // Past the right edge
        piece.move_to(8, 0);
        assert!(!board.is_piece_valid(&piece));
        piece.move_to(7, 0);
        assert!(board.is_piece_valid(&piece));

        // Above the top row
        piece.move_to(3, -1);
        assert!(!board.is_piece_valid(&piece));
        let mut i_piece = Piece::new(TetrominoType::I, 3, -1);
        assert!(board.is_piece_valid(&i_piece));
        i_piece.move_to(3, -2);
        assert!(!board.is_piece_valid(&i_piece));

        // Below the floor
        piece.move_to(3, 19);
        assert!(!board.is_piece_valid(&piece));

        // Overlap
        piece.move_to(3, 10);
        board.set(4, 11, filled(TetrominoType::L));
        assert!(!board.is_piece_valid(&piece));
    }

    #[test]
    fn test_lock_piece_writes_tile() {
        let mut board = Board::default();
        let piece = Piece::new(TetrominoType::T, 0, 18);
        board.lock_piece(&piece);
        assert_eq!(occupied(&board), 4);
        for (x, y) in piece.cells() {
            assert_eq!(board.get(x, y), Some(filled(TetrominoType::T)));
        }
    }

    #[test]
    fn test_lock_piece_out_of_bounds_does_not_wrap() {
        let mut board = Board::new(1, 4);
        let piece = Piece::new(TetrominoType::I, 0, 0);
        board.lock_piece(&piece);
        // Only the cell at column 0 lands; nothing wraps into the next row
        assert_eq!(occupied(&board), 1);
        assert_eq!(board.get(0, 1), Some(filled(TetrominoType::I)));
    }

    #[test]
    fn test_mark_and_clear_single_line() {
        let mut board = Board::default();
        fill_row_except(&mut board, 19, None);
        board.set(0, 18, filled(TetrominoType::J));
        board.set(3, 17, filled(TetrominoType::S));
        let before = occupied(&board);

        assert_eq!(board.mark_full_lines(), 1);
        assert!(board.is_row_marked(19));
        // Marking alone changes nothing
        assert_eq!(occupied(&board), before);

        board.clear_full_lines();
        assert_eq!(occupied(&board), before - board.width());
        assert_eq!(board.get(0, 19), Some(filled(TetrominoType::J)));
        assert_eq!(board.get(3, 18), Some(filled(TetrominoType::S)));
        assert!(board.get(0, 18).is_some_and(|c| c.is_empty()));
        assert!(!board.is_row_marked(19));
    }

    #[test]
    fn test_clear_non_adjacent_lines() {
        let mut board = Board::default();
        fill_row_except(&mut board, 19, None);
        fill_row_except(&mut board, 18, Some(2));
        fill_row_except(&mut board, 17, None);
        board.set(5, 16, filled(TetrominoType::O));

        assert_eq!(board.mark_full_lines(), 2);
        board.clear_full_lines();

        // The holed row falls to the bottom, the lone block rests on it
        assert!(board.get(2, 19).is_some_and(|c| c.is_empty()));
        assert!(board.get(0, 19).is_some_and(|c| c.is_filled()));
        assert_eq!(board.get(5, 18), Some(filled(TetrominoType::O)));
        assert_eq!(occupied(&board), 10);
    }

    #[test]
    fn test_clear_without_marks_is_noop() {
        let mut board = Board::default();
        fill_row_except(&mut board, 19, None);
        board.clear_full_lines();
        assert_eq!(occupied(&board), 10);

        assert_eq!(board.mark_full_lines(), 1);
        board.clear_full_lines();
        board.clear_full_lines();
        assert_eq!(occupied(&board), 0);
    }

    #[test]
    fn test_hard_drop_stops_on_floor_and_stack() {
        let mut board = Board::default();
        let mut piece = Piece::new(TetrominoType::I, 3, -1);
        assert_eq!(board.hard_drop(&mut piece), 19);
        assert!(piece.cells().iter().all(|&(_, y)| y == 19));

        board.lock_piece(&piece);
        let mut next = Piece::new(TetrominoType::I, 3, -1);
        board.hard_drop(&mut next);
        assert!(next.cells().iter().all(|&(_, y)| y == 18));
        // Not locked by the drop
        assert!(board.get(3, 18).is_some_and(|c| c.is_empty()));
    }

    #[test]
    fn test_push_left_and_right() {
        let mut board = Board::default();
        board.set(1, 19, filled(TetrominoType::L));
        assert!(board.push_left());
        assert!(board.get(0, 19).is_some_and(|c| c.is_filled()));
        // Would fall off the left edge
        assert!(!board.push_left());
        assert!(board.get(0, 19).is_some_and(|c| c.is_filled()));

        assert!(board.push_right());
        assert!(board.get(1, 19).is_some_and(|c| c.is_filled()));

        board.set(9, 10, filled(TetrominoType::J));
        assert!(!board.push_right());
        assert_eq!(occupied(&board), 2);
    }

    #[test]
    fn test_is_full_checks_top_row() {
        let mut board = Board::default();
        board.set(4, 1, filled(TetrominoType::T));
        assert!(!board.is_full());
        board.set(4, 0, filled(TetrominoType::T));
        assert!(board.is_full());
    }

    #[test]
    fn test_invisible_does_not_affect_legality() {
        let mut board = Board::default();
        let piece = Piece::new(TetrominoType::S, 4, 10);
        board.turn_invisible(true);
        assert!(board.is_invisible());
        assert!(board.is_piece_valid(&piece));
        board.turn_invisible(false);
        assert!(!board.is_invisible());
    }
}
