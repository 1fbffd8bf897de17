//! Tetromino definitions and shapes
//!
//! All 7 standard tetrominoes with their four SRS rotation states. Shapes are
//! given as (x, y) cell offsets inside the piece's bounding box, x growing to
//! the right and y growing downwards.

use ratatui::style::Color;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    O, // Yellow - square
    I, // Cyan - long bar
    L, // Orange - L-shape
    J, // Blue - J-shape
    Z, // Red - Z-shape
    S, // Green - S-shape
    T, // Purple - T-shape
}

impl TetrominoType {
    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Cyan,
            TetrominoType::O => Color::Yellow,
            TetrominoType::T => Color::Magenta,
            TetrominoType::S => Color::Green,
            TetrominoType::Z => Color::Red,
            TetrominoType::J => Color::Blue,
            TetrominoType::L => Color::Rgb(255, 165, 0), // Orange
        }
    }

    /// All tetromino types, in the order used for statistics and randomization
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::O,
            TetrominoType::I,
            TetrominoType::L,
            TetrominoType::J,
            TetrominoType::Z,
            TetrominoType::S,
            TetrominoType::T,
        ]
    }

    /// Stable index into per-type tables
    pub fn index(&self) -> usize {
        match self {
            TetrominoType::O => 0,
            TetrominoType::I => 1,
            TetrominoType::L => 2,
            TetrominoType::J => 3,
            TetrominoType::Z => 4,
            TetrominoType::S => 5,
            TetrominoType::T => 6,
        }
    }

    /// Single-letter name, used by the statistics panel
    pub fn name(&self) -> char {
        match self {
            TetrominoType::O => 'O',
            TetrominoType::I => 'I',
            TetrominoType::L => 'L',
            TetrominoType::J => 'J',
            TetrominoType::Z => 'Z',
            TetrominoType::S => 'S',
            TetrominoType::T => 'T',
        }
    }

    /// Get the shape offsets for this tetromino at a given rotation.
    /// Returns 4 (x, y) offsets relative to the top-left of the bounding box.
    pub fn shape(&self, rotation: Rotation) -> [(i32, i32); 4] {
        match self {
            // I uses a 4x4 box
            // 0: ....   R: ..I.   2: ....   L: .I..
            //    IIII      ..I.      ....      .I..
            //    ....      ..I.      IIII      .I..
            //    ....      ..I.      ....      .I..
            TetrominoType::I => match rotation {
                Rotation::Spawn => [(0, 1), (1, 1), (2, 1), (3, 1)],
                Rotation::Right => [(2, 0), (2, 1), (2, 2), (2, 3)],
                Rotation::Reverse => [(0, 2), (1, 2), (2, 2), (3, 2)],
                Rotation::Left => [(1, 0), (1, 1), (1, 2), (1, 3)],
            },
            // O doesn't change shape when rotating
            TetrominoType::O => [(1, 0), (2, 0), (1, 1), (2, 1)],
            TetrominoType::T => match rotation {
                Rotation::Spawn => [(1, 0), (0, 1), (1, 1), (2, 1)],
                Rotation::Right => [(1, 0), (1, 1), (2, 1), (1, 2)],
                Rotation::Reverse => [(0, 1), (1, 1), (2, 1), (1, 2)],
                Rotation::Left => [(1, 0), (0, 1), (1, 1), (1, 2)],
            },
            // 0: .SS   R: .S.   2: ...   L: S..
            //    SS.      .SS      .SS      SS.
            //    ...      ..S      SS.      .S.
            TetrominoType::S => match rotation {
                Rotation::Spawn => [(1, 0), (2, 0), (0, 1), (1, 1)],
                Rotation::Right => [(1, 0), (1, 1), (2, 1), (2, 2)],
                Rotation::Reverse => [(1, 1), (2, 1), (0, 2), (1, 2)],
                Rotation::Left => [(0, 0), (0, 1), (1, 1), (1, 2)],
            },
            // 0: ZZ.   R: ..Z   2: ...   L: .Z.
            //    .ZZ      .ZZ      ZZ.      ZZ.
            //    ...      .Z.      .ZZ      Z..
            TetrominoType::Z => match rotation {
                Rotation::Spawn => [(0, 0), (1, 0), (1, 1), (2, 1)],
                Rotation::Right => [(2, 0), (1, 1), (2, 1), (1, 2)],
                Rotation::Reverse => [(0, 1), (1, 1), (1, 2), (2, 2)],
                Rotation::Left => [(1, 0), (0, 1), (1, 1), (0, 2)],
            },
            TetrominoType::J => match rotation {
                Rotation::Spawn => [(0, 0), (0, 1), (1, 1), (2, 1)],
                Rotation::Right => [(1, 0), (2, 0), (1, 1), (1, 2)],
                Rotation::Reverse => [(0, 1), (1, 1), (2, 1), (2, 2)],
                Rotation::Left => [(1, 0), (1, 1), (0, 2), (1, 2)],
            },
            TetrominoType::L => match rotation {
                Rotation::Spawn => [(2, 0), (0, 1), (1, 1), (2, 1)],
                Rotation::Right => [(1, 0), (1, 1), (1, 2), (2, 2)],
                Rotation::Reverse => [(0, 1), (1, 1), (2, 1), (0, 2)],
                Rotation::Left => [(0, 0), (1, 0), (1, 1), (1, 2)],
            },
        }
    }

    /// Spawn offset (dx, dy) for the spawn rotation, relative to
    /// (board_width / 2, 0). Puts the topmost cell of every piece on row 0.
    pub fn spawn_offset(&self) -> (i32, i32) {
        match self {
            TetrominoType::I => (-2, -1),
            _ => (-2, 0),
        }
    }
}

/// Rotation states, numbered 0-3 clockwise from spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Spawn, // 0
    Right,   // R, clockwise from spawn
    Reverse, // 2
    Left,    // L, counter-clockwise from spawn
}

impl Rotation {
    /// Numeric state 0-3
    pub fn index(&self) -> u8 {
        match self {
            Rotation::Spawn => 0,
            Rotation::Right => 1,
            Rotation::Reverse => 2,
            Rotation::Left => 3,
        }
    }

    fn from_index(index: u8) -> Rotation {
        match index % 4 {
            0 => Rotation::Spawn,
            1 => Rotation::Right,
            2 => Rotation::Reverse,
            _ => Rotation::Left,
        }
    }

    /// `(state + direction) mod 4`
    pub fn rotated(&self, direction: RotationDirection) -> Rotation {
        match direction {
            RotationDirection::Clockwise => Rotation::from_index(self.index() + 1),
            RotationDirection::CounterClockwise => Rotation::from_index(self.index() + 3),
        }
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATIONS: [Rotation; 4] = [
        Rotation::Spawn,
        Rotation::Right,
        Rotation::Reverse,
        Rotation::Left,
    ];

    #[test]
    fn test_rotation_cycles() {
        for rotation in ROTATIONS {
            let cw = rotation.rotated(RotationDirection::Clockwise);
            assert_eq!(cw.rotated(RotationDirection::CounterClockwise), rotation);
            assert_eq!(cw.index(), (rotation.index() + 1) % 4);
        }
        assert_eq!(
            Rotation::Spawn.rotated(RotationDirection::CounterClockwise),
            Rotation::Left
        );
    }

    #[test]
    fn test_shapes_have_four_distinct_cells() {
        for kind in TetrominoType::all() {
            for rotation in ROTATIONS {
                let shape = kind.shape(rotation);
                for (i, a) in shape.iter().enumerate() {
                    assert!(!shape[i + 1..].contains(a), "{kind:?} {rotation:?}");
                }
            }
        }
    }

    #[test]
    fn test_spawn_shapes_start_on_top_row() {
        for kind in TetrominoType::all() {
            let (_, dy) = kind.spawn_offset();
            let top = kind
                .shape(Rotation::Spawn)
                .iter()
                .map(|&(_, y)| y + dy)
                .min();
            assert_eq!(top, Some(0), "{kind:?}");
        }
    }

    #[test]
    fn test_indices_are_unique() {
        let mut seen = [false; 7];
        for kind in TetrominoType::all() {
            assert!(!seen[kind.index()]);
            seen[kind.index()] = true;
        }
    }
}
