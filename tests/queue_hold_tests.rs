//! Queue and hold slot tests

use blockfall::core::{Grid, HoldSlot, Piece, PieceQueue, Randomizer, RandomizerKind};
use blockfall::types::{PieceKind, Rotation};
use proptest::prelude::*;

#[test]
fn queue_follows_randomizer_order() {
    let mut queue = PieceQueue::new(Randomizer::new(RandomizerKind::Bag, 77), 5);
    let expected: Vec<PieceKind> = Randomizer::new(RandomizerKind::Bag, 77).take(20).collect();
    let dequeued: Vec<PieceKind> = (0..20).map(|_| queue.dequeue().kind()).collect();
    assert_eq!(dequeued, expected);
}

#[test]
fn dequeued_pieces_are_fresh_spawns() {
    let mut queue = PieceQueue::for_width(Randomizer::new(RandomizerKind::Uniform, 3), 2, 12);
    for _ in 0..10 {
        let piece = queue.dequeue();
        assert_eq!(piece, Piece::spawn_for_width(piece.kind(), 12));
    }
}

#[test]
fn empty_hold_returns_none_then_swaps() {
    let grid = Grid::default();
    let mut slot = HoldSlot::new();

    let mut current = Piece::spawn(PieceKind::J).shifted(6, 0);
    current.rotate_ccw(&grid);
    assert_eq!(slot.hold(&current), None);
    assert_eq!(slot.held(), Some(PieceKind::J));

    let swapped = slot.hold(&Piece::spawn(PieceKind::I)).unwrap();
    assert_eq!(swapped.kind(), PieceKind::J);
    assert_eq!(swapped.rotation(), Rotation::North);
    assert_eq!(swapped, Piece::spawn(PieceKind::J));
    assert_eq!(slot.held(), Some(PieceKind::I));
}

proptest! {
    #[test]
    fn queue_length_never_changes(seed in any::<u32>(), size in 1usize..12, pulls in 0usize..50) {
        let mut queue = PieceQueue::new(Randomizer::new(RandomizerKind::Bag, seed), size);
        for _ in 0..pulls {
            let front = queue.peek();
            let piece = queue.dequeue();
            prop_assert_eq!(Some(piece.kind()), front);
            prop_assert_eq!(queue.len(), size);
        }
    }
}
