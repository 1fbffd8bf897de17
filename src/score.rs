//! Scoring, levelling and per-run statistics

use crate::tetromino::TetrominoType;
use std::time::Duration;

/// Points awarded every time a piece locks
pub const LOCK_BONUS: u64 = 10;

/// Cumulative line counts at which the level goes up.
/// Level 1 below the first entry, capped at 17 after the last.
const LEVEL_THRESHOLDS: [u32; 16] = [
    5, 10, 15, 20, 25, 30, 40, 50, 60, 70, 100, 120, 140, 160, 180, 210,
];

/// Gravity delay in milliseconds, indexed by level - 1.
/// Levels past the end drop instantly.
const GRAVITY_DELAYS_MS: [u64; 18] = [
    1000, 900, 850, 800, 750, 700, 650, 600, 550, 500, 450, 400, 350, 300, 250, 200, 150, 100,
];

/// Score tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub points: u64,
    pub lines: u32,
    pub level: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            lines: 0,
            level: 1,
        }
    }

    /// Add the fixed bonus for locking a piece
    pub fn add_lock(&mut self) {
        self.points += LOCK_BONUS;
    }

    /// Add a line clear of `lines` rows.
    /// Counts outside 1-4 are not scored; returns whether it was scored.
    pub fn add_clear(&mut self, lines: usize) -> bool {
        let Some(points) = line_clear_points(lines) else {
            return false;
        };
        self.points += points;
        self.lines += lines as u32;
        self.level = level_for_lines(self.lines);
        true
    }

    /// How long a piece waits before gravity pulls it down one row
    pub fn gravity_delay(&self) -> Duration {
        gravity_delay(self.level)
    }
}

/// Points for clearing `lines` rows at once
pub fn line_clear_points(lines: usize) -> Option<u64> {
    match lines {
        1 => Some(100),
        2 => Some(300),
        3 => Some(500),
        4 => Some(800),
        _ => None,
    }
}

/// Level reached after clearing `lines` rows in total
pub fn level_for_lines(lines: u32) -> u32 {
    1 + LEVEL_THRESHOLDS.iter().filter(|&&t| lines >= t).count() as u32
}

/// Gravity delay for a level
pub fn gravity_delay(level: u32) -> Duration {
    let index = level.max(1) as usize - 1;
    let ms = GRAVITY_DELAYS_MS.get(index).copied().unwrap_or(0);
    Duration::from_millis(ms)
}

/// Per-run counters, read by the statistics panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Total pieces locked
    pub pieces: u32,
    /// Total lines cleared
    pub lines: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub tetris: u32,
    /// Locks per tetromino type, indexed by `TetrominoType::index`
    per_type: [u32; 7],
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a locked piece
    pub fn add_piece(&mut self, kind: TetrominoType) {
        self.pieces += 1;
        self.per_type[kind.index()] += 1;
    }

    /// Record a clear of `lines` rows
    pub fn add_clear(&mut self, lines: usize) {
        let counter = match lines {
            1 => &mut self.singles,
            2 => &mut self.doubles,
            3 => &mut self.triples,
            4 => &mut self.tetris,
            _ => return,
        };
        *counter += 1;
        self.lines += lines as u32;
    }

    /// How many pieces of this type were locked
    pub fn count(&self, kind: TetrominoType) -> u32 {
        self.per_type[kind.index()]
    }
}
