use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform draws in `[0, 100)` feeding every probabilistic career decision.
pub trait RandomSource {
    fn roll(&mut self) -> f64;

    /// True when a fresh roll lands under `chance` percent.
    fn check(&mut self, chance: f64) -> bool {
        self.roll() < chance
    }
}

/// Reproducible source for live play, seeded per engine.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn roll(&mut self) -> f64 {
        self.rng.gen_range(0.0..100.0)
    }
}

/// Replays a fixed list of rolls, then keeps returning `fallback`.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: VecDeque<f64>,
    fallback: f64,
    consumed: usize,
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: 0.0,
            consumed: 0,
        }
    }

    /// Every roll returns `value`.
    pub fn always(value: f64) -> Self {
        Self::new([]).then(value)
    }

    pub fn then(mut self, fallback: f64) -> Self {
        self.fallback = fallback.clamp(0.0, 99.999);
        self
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RandomSource for ScriptedRolls {
    fn roll(&mut self) -> f64 {
        self.consumed += 1;
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}
