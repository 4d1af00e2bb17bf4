//! Look-ahead queue.
//!
//! Stores [`PieceKind`]s only; a live [`Piece`] is spawned fresh on dequeue.

use std::collections::VecDeque;

use crate::pieces::Piece;
use crate::rng::Randomizer;
use crate::types::{PieceKind, GRID_COLS};

/// Fixed-length FIFO of upcoming kinds, refilled from a randomizer.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    upcoming: VecDeque<PieceKind>,
    randomizer: Randomizer,
    size: usize,
    cols: u16,
}

impl PieceQueue {
    /// Queue of `size` pieces for a 10-wide field. `size` is raised to 1.
    pub fn new(randomizer: Randomizer, size: usize) -> Self {
        Self::for_width(randomizer, size, GRID_COLS)
    }

    pub fn for_width(mut randomizer: Randomizer, size: usize, cols: u16) -> Self {
        let size = size.max(1);
        let upcoming = randomizer.by_ref().take(size).collect();
        Self {
            upcoming,
            randomizer,
            size,
            cols,
        }
    }

    /// Pop the front kind as a fresh piece and draw one kind to the back.
    pub fn dequeue(&mut self) -> Piece {
        let kind = self
            .upcoming
            .pop_front()
            .unwrap_or_else(|| self.randomizer.draw());
        self.upcoming.push_back(self.randomizer.draw());
        Piece::spawn_for_width(kind, self.cols)
    }

    pub fn peek(&self) -> Option<PieceKind> {
        self.upcoming.front().copied()
    }

    /// Upcoming kinds, front first.
    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.upcoming.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty()
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SevenBag;

    #[test]
    fn queue_length_is_constant_across_dequeues() {
        let mut queue = PieceQueue::new(Randomizer::Bag(SevenBag::new(5)), 5);
        assert_eq!(queue.len(), 5);
        for _ in 0..30 {
            queue.dequeue();
            assert_eq!(queue.len(), 5);
        }
    }

    #[test]
    fn dequeue_returns_previous_front() {
        let mut queue = PieceQueue::new(Randomizer::Bag(SevenBag::new(9)), 3);
        let before: Vec<PieceKind> = queue.preview().collect();
        let piece = queue.dequeue();
        assert_eq!(piece.kind(), before[0]);
        let after: Vec<PieceKind> = queue.preview().collect();
        assert_eq!(&after[..2], &before[1..]);
    }

    #[test]
    fn zero_size_is_raised_to_one() {
        let queue = PieceQueue::new(Randomizer::default(), 0);
        assert_eq!(queue.size(), 1);
        assert_eq!(queue.len(), 1);
    }
}
