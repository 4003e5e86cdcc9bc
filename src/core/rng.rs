//! Injectable randomness for the decision engine
//!
//! Every random decision the engine makes goes through [`DecisionRng`], so a
//! single seeded source reproduces a whole turn.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Random source consulted by generators, the ledger and the executor
pub trait DecisionRng {
    /// Uniform integer in `[0, 100)`
    fn roll(&mut self) -> u32;

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Roll and compare against a percentage chance
    fn chance(&mut self, percent: u32) -> bool {
        self.roll() < percent
    }
}

/// Deterministic ChaCha-backed source
pub struct SeededRng {
    rng: ChaCha8Rng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DecisionRng for SeededRng {
    fn roll(&mut self) -> u32 {
        self.rng.gen_range(0..100)
    }

    fn pick(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick from empty collection");
        self.rng.gen_range(0..len.max(1))
    }
}

/// Replays fixed roll and pick sequences
///
/// When a queue runs dry the fallback value is returned (99 for rolls, so
/// every chance fails; 0 for picks).
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    rolls: VecDeque<u32>,
    picks: VecDeque<usize>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(mut self, rolls: &[u32]) -> Self {
        self.rolls.extend(rolls.iter().copied());
        self
    }

    pub fn with_picks(mut self, picks: &[usize]) -> Self {
        self.picks.extend(picks.iter().copied());
        self
    }
}

impl DecisionRng for ScriptedRng {
    fn roll(&mut self) -> u32 {
        self.rolls.pop_front().unwrap_or(99).min(99)
    }

    fn pick(&mut self, len: usize) -> usize {
        let idx = self.picks.pop_front().unwrap_or(0);
        idx.min(len.saturating_sub(1))
    }
}
