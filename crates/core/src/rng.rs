//! RNG module - piece randomizers
//!
//! Two policies share one seeded generator:
//!
//! - [`SevenBag`]: every 7 draws aligned to a bag boundary are a permutation of
//!   all seven kinds (Fisher-Yates over a fresh bag)
//! - [`UniformRandomizer`]: each draw is independent and uniform
//!
//! Both are infinite iterators; [`Randomizer`] wraps either so the queue can
//! hold one without dynamic dispatch.

use crate::config::RandomizerKind;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state is a fixed point of the low bits.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in `[0, max)`. Uses the high bits; the low bits of an LCG have
    /// short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Bag randomizer
#[derive(Debug, Clone)]
pub struct SevenBag {
    bag: [PieceKind; 7],
    /// Next undrawn slot; 7 means the bag is empty.
    cursor: usize,
    rng: SimpleRng,
}

impl SevenBag {
    pub fn new(seed: u32) -> Self {
        Self {
            bag: PieceKind::ALL,
            cursor: 7,
            rng: SimpleRng::new(seed),
        }
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.cursor = 0;
    }

    pub fn draw(&mut self) -> PieceKind {
        if self.cursor >= self.bag.len() {
            self.refill();
        }
        let kind = self.bag[self.cursor];
        self.cursor += 1;
        kind
    }
}

impl Iterator for SevenBag {
    type Item = PieceKind;

    fn next(&mut self) -> Option<PieceKind> {
        Some(self.draw())
    }
}

#[derive(Debug, Clone)]
pub struct UniformRandomizer {
    rng: SimpleRng,
}

impl UniformRandomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    pub fn draw(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

impl Iterator for UniformRandomizer {
    type Item = PieceKind;

    fn next(&mut self) -> Option<PieceKind> {
        Some(self.draw())
    }
}

/// Either randomizer policy, chosen at construction.
#[derive(Debug, Clone)]
pub enum Randomizer {
    Bag(SevenBag),
    Uniform(UniformRandomizer),
}

impl Randomizer {
    pub fn new(kind: RandomizerKind, seed: u32) -> Self {
        match kind {
            RandomizerKind::Bag => Randomizer::Bag(SevenBag::new(seed)),
            RandomizerKind::Uniform => Randomizer::Uniform(UniformRandomizer::new(seed)),
        }
    }

    pub fn kind(&self) -> RandomizerKind {
        match self {
            Randomizer::Bag(_) => RandomizerKind::Bag,
            Randomizer::Uniform(_) => RandomizerKind::Uniform,
        }
    }

    pub fn draw(&mut self) -> PieceKind {
        match self {
            Randomizer::Bag(bag) => bag.draw(),
            Randomizer::Uniform(uniform) => uniform.draw(),
        }
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Randomizer::Bag(SevenBag::new(1))
    }
}

impl Iterator for Randomizer {
    type Item = PieceKind;

    fn next(&mut self) -> Option<PieceKind> {
        Some(self.draw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn zero_seed_is_not_degenerate() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.state(), 1);
        assert_ne!(rng.next_u32(), rng.next_u32());
    }

    #[test]
    fn next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(99);
        for max in 1..20 {
            for _ in 0..50 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn bag_drains_before_refilling() {
        let mut bag = SevenBag::new(7);
        for _ in 0..2 {
            let mut drawn: Vec<PieceKind> = (0..7).map(|_| bag.draw()).collect();
            drawn.sort_by_key(|kind| kind.letter());
            drawn.dedup();
            assert_eq!(drawn.len(), 7);
        }
    }

    #[test]
    fn uniform_eventually_produces_every_kind() {
        let seen: std::collections::HashSet<PieceKind> =
            UniformRandomizer::new(3).take(500).collect();
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn randomizer_reports_its_policy() {
        assert_eq!(Randomizer::new(RandomizerKind::Bag, 1).kind(), RandomizerKind::Bag);
        assert_eq!(
            Randomizer::new(RandomizerKind::Uniform, 1).kind(),
            RandomizerKind::Uniform
        );
    }
}
