//! RNG module - bag random piece generation
//!
//! Implements the "bag" randomizer: a shuffled permutation of all seven kinds
//! is handed out one by one and reshuffled once exhausted.
//!
//! The queue carries two independent cursors into the same bag: one for the
//! piece to spawn and one for the piece to preview. Each cursor triggers its
//! own reshuffle when it runs off the end, which replaces the bag for both
//! cursors but only rewinds the cursor that ran off. The preview is therefore
//! a hint, not a guarantee of the next spawn.
//!
//! Also provides a simple LCG for deterministic testing.

use crate::types::PieceKind;

/// Source of uniformly distributed random bits.
pub trait RandomSource {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate an unbiased value in `[0, max)`.
    ///
    /// Uses rejection sampling so every value is equally likely, even when
    /// `max` does not divide 2^32. `max` must be non-zero.
    fn next_below(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        // Highest accepted draw; anything above it would skew the modulo.
        let zone = u32::MAX - (u32::MAX - max + 1) % max;
        loop {
            let v = self.next_u32();
            if v <= zone {
                return v % max;
            }
        }
    }
}

/// Shuffle a slice using Fisher-Yates
pub fn shuffle<R: RandomSource + ?Sized, T>(rng: &mut R, slice: &mut [T]) {
    for i in (1..slice.len()).rev() {
        let j = rng.next_below((i + 1) as u32) as usize;
        slice.swap(i, j);
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current internal state, usable as a seed to replay from here.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

/// Index where the spawn cursor starts after a reshuffle.
const SPAWN_START: usize = 0;

/// Index where the preview cursor starts after a reshuffle.
const PREVIEW_START: usize = 1;

/// Bag randomizer with a spawn cursor and a preview cursor.
#[derive(Debug, Clone)]
pub struct PieceOrderQueue<R: RandomSource> {
    /// Current shuffled bag
    bag: [PieceKind; 7],
    /// Next index handed out by `next()`
    spawn_cursor: usize,
    /// Next index handed out by `peek_upcoming()`
    preview_cursor: usize,
    /// RNG for shuffling
    rng: R,
}

impl<R: RandomSource> PieceOrderQueue<R> {
    /// Create a queue with a freshly shuffled bag
    pub fn new(rng: R) -> Self {
        let mut queue = Self {
            bag: PieceKind::ALL,
            spawn_cursor: SPAWN_START,
            preview_cursor: PREVIEW_START,
            rng,
        };
        queue.reshuffle();
        queue
    }

    /// Replace the whole bag with a new permutation.
    fn reshuffle(&mut self) {
        self.bag = PieceKind::ALL;
        shuffle(&mut self.rng, &mut self.bag);
    }

    /// Next kind to spawn.
    pub fn next(&mut self) -> PieceKind {
        if self.spawn_cursor >= self.bag.len() {
            self.reshuffle();
            self.spawn_cursor = SPAWN_START;
        }
        let kind = self.bag[self.spawn_cursor];
        self.spawn_cursor += 1;
        kind
    }

    /// Kind to show in the preview.
    ///
    /// Advances its own cursor; see the module docs for how it relates to
    /// [`next`](Self::next).
    pub fn peek_upcoming(&mut self) -> PieceKind {
        if self.preview_cursor >= self.bag.len() {
            self.reshuffle();
            self.preview_cursor = PREVIEW_START;
        }
        let kind = self.bag[self.preview_cursor];
        self.preview_cursor += 1;
        kind
    }

    /// Current bag for testing/debugging
    pub fn bag(&self) -> &[PieceKind; 7] {
        &self.bag
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn into_rng(self) -> R {
        self.rng
    }
}
