//! Next-piece queue
//!
//! A fixed-length FIFO of upcoming tetrominoes. Every time a piece is taken
//! from the front, a freshly randomized one is appended at the back.

use crate::tetromino::TetrominoType;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct NextPieceQueue {
    queue: VecDeque<TetrominoType>,
    rng: ChaCha8Rng,
}

impl NextPieceQueue {
    /// Create a queue of `len` random pieces
    pub fn new(len: usize, seed: u64) -> Self {
        let mut next = Self::from_pieces(&[], seed);
        next.queue = (0..len).map(|_| random_piece(&mut next.rng)).collect();
        next
    }

    /// Create a queue starting with the given pieces; its length stays
    /// `pieces.len()`
    pub fn from_pieces(pieces: &[TetrominoType], seed: u64) -> Self {
        Self {
            queue: pieces.iter().copied().collect(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Take the front piece and append a new random one.
    /// An empty queue hands out a random piece directly.
    pub fn pop(&mut self) -> TetrominoType {
        let fresh = random_piece(&mut self.rng);
        match self.queue.pop_front() {
            Some(next) => {
                self.queue.push_back(fresh);
                next
            }
            None => fresh,
        }
    }

    /// Upcoming pieces, front first
    pub fn preview(&self) -> impl Iterator<Item = TetrominoType> + '_ {
        self.queue.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

fn random_piece(rng: &mut ChaCha8Rng) -> TetrominoType {
    TetrominoType::all()[rng.gen_range(0..7)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seeded_queue_is_fifo() {
        let mut queue = NextPieceQueue::from_pieces(
            &[TetrominoType::T, TetrominoType::I, TetrominoType::O],
            7,
        );
        assert_eq!(queue.pop(), TetrominoType::T);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), TetrominoType::I);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), TetrominoType::O);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_appended_pieces_come_out_in_order() {
        let mut queue = NextPieceQueue::new(5, 42);
        let preview: Vec<_> = queue.preview().collect();
        queue.pop();
        let shifted: Vec<_> = queue.preview().collect();
        assert_eq!(&shifted[..4], &preview[1..]);
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let mut a = NextPieceQueue::new(3, 1234);
        let mut b = NextPieceQueue::new(3, 1234);
        for _ in 0..50 {
            assert_eq!(a.pop(), b.pop());
        }
    }

    #[test]
    fn test_all_types_show_up() {
        let mut queue = NextPieceQueue::new(1, 99);
        let seen: HashSet<_> = (0..500).map(|_| queue.pop()).collect();
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_empty_queue_still_hands_out_pieces() {
        let mut queue = NextPieceQueue::new(0, 5);
        let _ = queue.pop();
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.preview().count(), 0);
    }
}
