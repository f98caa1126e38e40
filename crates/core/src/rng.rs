//! Seedable randomness and the 7-bag piece queue.
//!
//! The bag guarantees every kind appears exactly once per run of 7 draws.
//! All state is owned by the queue value; seeding makes sequences
//! reproducible in tests.

use crate::types::PieceKind;

/// Simple LCG (Numerical Recipes constants). Enough for piece shuffling and
/// fully deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero seed would still advance, but keep sequences distinct from it.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Uniform-ish value in `[0, max)`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag randomizer: a picked flag per kind plus a count. When all seven are
/// picked the bag resets; draws redraw until they hit an unpicked kind.
#[derive(Debug, Clone)]
pub struct SevenBag {
    picked: [bool; 7],
    picked_count: u8,
    rng: SimpleRng,
}

impl SevenBag {
    pub fn new(seed: u32) -> Self {
        Self {
            picked: [false; 7],
            picked_count: 0,
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next piece kind.
    pub fn draw(&mut self) -> PieceKind {
        if self.picked_count == 7 {
            self.picked = [false; 7];
            self.picked_count = 0;
        }

        let index = loop {
            let candidate = self.rng.next_range(7) as usize;
            if !self.picked[candidate] {
                break candidate;
            }
        };

        self.picked[index] = true;
        self.picked_count += 1;
        PieceKind::ALL[index]
    }

    /// Kinds not yet drawn from the current bag.
    pub fn remaining(&self) -> impl Iterator<Item = PieceKind> + '_ {
        PieceKind::ALL
            .into_iter()
            .filter(move |kind| !self.picked[kind.index()])
    }

    /// RNG state, usable as a seed to continue the sequence elsewhere.
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}
