//! Survival mode: the core game state machine
//!
//! Owns the board, the active/ghost/held pieces, the next-piece queue and the
//! score, and advances all of them one tick per frame.

use crate::board::{Board, Tile};
use crate::piece::{Direction, Piece};
use crate::queue::NextPieceQueue;
use crate::score::{Score, Statistics};
use crate::settings::GameConfig;
use crate::srs::Srs;
use crate::tetromino::{RotationDirection, TetrominoType};
use crate::timer::Timer;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How long locked blocks stay visible in invisible mode
const INVISIBLE_SHOWN: Duration = Duration::from_millis(500);
/// How long they stay hidden
const INVISIBLE_HIDDEN: Duration = Duration::from_millis(3000);

/// Display-only nudge for an O piece sitting in the hold slot
const HOLD_O_NUDGE: (i32, i32) = (-1, 1);

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    GameOver,
}

/// Input codes the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCode {
    Quit,
    Left,
    Right,
    Down,
    RotateClockwise,
    RotateCounterClockwise,
    Drop,
    Hold,
    /// Debug: reveal invisible blocks until the next blink
    ForceVisible,
}

/// The survival game mode
pub struct GameModeSurvival {
    config: GameConfig,
    board: Board,
    /// Piece under player control, replaced on every lock
    current: Piece,
    /// Landing preview of `current`
    ghost: Piece,
    hold: Option<Piece>,
    /// One hold per lock cycle
    can_hold: bool,
    queue: NextPieceQueue,
    rotation: Srs,
    score: Score,
    stats: Statistics,
    state: GameState,
    user_quit: bool,
    /// Input moved the piece down since the last gravity step
    moved_piece_down: bool,
    /// Rows were marked last tick and get cleared on this one
    will_clear_lines: bool,
    /// Current phase of the invisible blink
    is_invisible: bool,
    gravity_timer: Timer,
    invisible_timer: Timer,
    play_timer: Timer,
    last_tick: Instant,
}

impl GameModeSurvival {
    /// Start a new run
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::random(), Instant::now())
    }

    /// Start a new run with a fixed piece sequence seed
    pub fn with_seed(config: GameConfig, seed: u64, now: Instant) -> Self {
        let queue = NextPieceQueue::new(config.next_pieces, seed);
        Self::with_queue(config, queue, now)
    }

    /// Start a new run from a prepared queue; its front piece becomes the
    /// first active piece
    pub fn with_queue(config: GameConfig, mut queue: NextPieceQueue, now: Instant) -> Self {
        let board = Board::new(config.board_width, config.board_height);
        let current = Piece::spawn(queue.pop(), board.width());
        let ghost = current.ghost(&board);

        info!(
            "Starting survival run on a {}x{} board, {} next pieces",
            config.board_width,
            config.board_height,
            queue.len()
        );

        Self {
            config,
            board,
            current,
            ghost,
            hold: None,
            can_hold: true,
            queue,
            rotation: Srs,
            score: Score::new(),
            stats: Statistics::new(),
            state: GameState::Running,
            user_quit: false,
            moved_piece_down: false,
            will_clear_lines: false,
            is_invisible: false,
            gravity_timer: Timer::started(now),
            invisible_timer: Timer::started(now),
            play_timer: Timer::started(now),
            last_tick: now,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    pub fn ghost_piece(&self) -> &Piece {
        &self.ghost
    }

    /// The held piece, positioned for drawing inside the hold box
    pub fn held_piece(&self) -> Option<Piece> {
        self.hold.map(|mut piece| {
            if piece.kind() == TetrominoType::O {
                piece.move_by(HOLD_O_NUDGE.0, HOLD_O_NUDGE.1);
            }
            piece
        })
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Upcoming pieces, front first
    pub fn next_pieces(&self) -> impl Iterator<Item = TetrominoType> + '_ {
        self.queue.preview()
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Time played, as of the last tick
    pub fn play_time(&self) -> Duration {
        self.play_timer.elapsed(self.last_tick)
    }

    /// The run has ended
    pub fn is_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// The player asked to leave
    pub fn will_quit(&self) -> bool {
        self.user_quit
    }

    /// Apply one input, stamped with the wall clock
    pub fn handle_input(&mut self, code: InputCode) {
        self.handle_input_at(code, Instant::now());
    }

    /// Apply one input at `now`
    pub fn handle_input_at(&mut self, code: InputCode, now: Instant) {
        if code == InputCode::Quit {
            self.user_quit = true;
            return;
        }
        if self.is_over() {
            return;
        }

        match code {
            // Sideways moves also reset the lock: the next gravity step is skipped
            InputCode::Left => {
                self.move_if_possible(Direction::Left);
                self.moved_piece_down = true;
            }
            InputCode::Right => {
                self.move_if_possible(Direction::Right);
                self.moved_piece_down = true;
            }
            InputCode::Down => {
                if !self.move_if_possible(Direction::Down) {
                    self.lock_current_piece(now);
                }
                self.moved_piece_down = true;
            }
            InputCode::RotateClockwise => {
                self.rotation
                    .rotate(&mut self.current, &self.board, RotationDirection::Clockwise);
            }
            InputCode::RotateCounterClockwise => {
                self.rotation.rotate(
                    &mut self.current,
                    &self.board,
                    RotationDirection::CounterClockwise,
                );
            }
            InputCode::Drop => {
                self.board.hard_drop(&mut self.current);
                self.lock_current_piece(now);
            }
            InputCode::Hold => {
                self.hold_current_piece();
            }
            InputCode::ForceVisible => self.board.turn_invisible(false),
            InputCode::Quit => {}
        }
        self.ghost = self.current.ghost(&self.board);
    }

    /// Advance one tick using the wall clock
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Advance one tick at `now`
    pub fn update_at(&mut self, now: Instant) {
        if self.is_over() {
            return;
        }
        self.last_tick = now;

        // Rows marked last tick have been shown highlighted for a frame
        if self.will_clear_lines {
            self.board.clear_full_lines();
            self.will_clear_lines = false;
        }

        self.apply_gravity(now);

        self.ghost = self.current.ghost(&self.board);

        let lines = self.board.mark_full_lines();
        if lines > 0 {
            self.will_clear_lines = true;
            self.stats.add_clear(lines);
            if self.score.add_clear(lines) {
                debug!(
                    "Cleared {} line(s), {} total, level {}",
                    lines, self.score.lines, self.score.level
                );
            }
        }

        if self.board.is_full() {
            self.state = GameState::GameOver;
            self.play_timer.pause(now);
            info!(
                "Game over: {} points, {} lines, level {}, {} pieces",
                self.score.points, self.score.lines, self.score.level, self.stats.pieces
            );
            return;
        }

        if self.config.invisible {
            self.blink(now);
        }
    }

    fn apply_gravity(&mut self, now: Instant) {
        self.gravity_timer.pause(now);

        if self.gravity_timer.elapsed(now) < self.score.gravity_delay() {
            self.gravity_timer.unpause(now);
            return;
        }

        if self.moved_piece_down {
            self.moved_piece_down = false;
        } else if !self.move_if_possible(Direction::Down) {
            self.lock_current_piece(now);
        }
        self.gravity_timer.start(now);
    }

    fn blink(&mut self, now: Instant) {
        self.invisible_timer.pause(now);
        let elapsed = self.invisible_timer.elapsed(now);

        let phase = if self.is_invisible {
            INVISIBLE_HIDDEN
        } else {
            INVISIBLE_SHOWN
        };
        if elapsed > phase {
            self.is_invisible = !self.is_invisible;
            self.board.turn_invisible(self.is_invisible);
            self.invisible_timer.start(now);
        } else {
            self.invisible_timer.unpause(now);
        }
    }

    /// Move the active piece one cell if the board allows it
    fn move_if_possible(&mut self, direction: Direction) -> bool {
        let (valid, moved) = self.current.try_move(direction, &self.board);
        if valid {
            self.current = moved;
        }
        valid
    }

    /// Spawn the front of the queue
    fn next_piece(&mut self) -> Piece {
        Piece::spawn(self.queue.pop(), self.board.width())
    }

    /// Lock the current piece and bring in the next one
    fn lock_current_piece(&mut self, now: Instant) {
        let mut piece = self.current;
        self.stats.add_piece(piece.kind());

        if self.config.invisible {
            piece.set_tile(Tile::Invisible);
        }
        self.board.lock_piece(&piece);
        self.score.add_lock();

        if self.config.slide_right {
            self.board.push_right();
        }
        if self.config.slide_left {
            self.board.push_left();
        }

        debug!(
            "Locked {:?} at ({}, {}), {} pieces",
            piece.kind(),
            piece.x(),
            piece.y(),
            self.stats.pieces
        );

        self.current = self.next_piece();
        self.can_hold = true;
        self.gravity_timer.start(now);
    }

    /// Bank the current piece, or swap it with the banked one
    fn hold_current_piece(&mut self) -> bool {
        if !self.config.can_hold || !self.can_hold {
            return false;
        }
        self.can_hold = false;

        let width = self.board.width();
        let banked = Piece::new(self.current.kind(), 0, 0);

        self.current = match self.hold.replace(banked) {
            None => self.next_piece(),
            Some(held) => Piece::spawn(held.kind(), width),
        };
        true
    }
}
