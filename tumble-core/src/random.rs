//! Random sources handed to arbitraries.
//!
//! A [`Random`] wraps one of the supported engines behind a small, opaque
//! API: draw an integer in a range, draw a double, split off an independent
//! sub-stream. Arbitraries never see which engine is in use.

use crate::data::Seed;
use crate::error::{Result, TumbleError};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::str::FromStr;

/// Engine selection tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RandomType {
    /// SplitMix64 seed pair, split natively.
    #[default]
    SplitMix64,
    /// ChaCha with 8 rounds, split by reseeding from its own output.
    ChaCha8,
}

impl RandomType {
    /// Tag used in configuration.
    pub fn tag(&self) -> &'static str {
        match self {
            RandomType::SplitMix64 => "splitmix64",
            RandomType::ChaCha8 => "chacha8",
        }
    }
}

impl fmt::Display for RandomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for RandomType {
    type Err = TumbleError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "splitmix64" => Ok(RandomType::SplitMix64),
            "chacha8" => Ok(RandomType::ChaCha8),
            other => Err(TumbleError::config(format!(
                "unknown random engine '{other}', expected 'splitmix64' or 'chacha8'"
            ))),
        }
    }
}

#[derive(Clone)]
enum Engine {
    SplitMix(Seed),
    ChaCha(Box<ChaCha8Rng>),
}

/// Deterministic random source.
///
/// Cloning a `Random` clones its state: both copies then produce the same
/// draws, which is how a generation closure can be replayed.
#[derive(Clone)]
pub struct Random {
    engine: Engine,
}

impl Random {
    /// Create a random source of the given engine from a seed.
    pub fn new(random_type: RandomType, seed: u64) -> Self {
        let engine = match random_type {
            RandomType::SplitMix64 => Engine::SplitMix(Seed::from_u64(seed)),
            RandomType::ChaCha8 => Engine::ChaCha(Box::new(ChaCha8Rng::seed_from_u64(seed))),
        };
        Random { engine }
    }

    /// Which engine backs this source.
    pub fn random_type(&self) -> RandomType {
        match self.engine {
            Engine::SplitMix(_) => RandomType::SplitMix64,
            Engine::ChaCha(_) => RandomType::ChaCha8,
        }
    }

    /// Split off an independent sub-stream, advancing this one.
    pub fn split(&mut self) -> Random {
        let engine = match &mut self.engine {
            Engine::SplitMix(seed) => {
                let (next, child) = seed.split();
                *seed = next;
                Engine::SplitMix(child)
            }
            Engine::ChaCha(rng) => {
                Engine::ChaCha(Box::new(ChaCha8Rng::seed_from_u64(rng.next_u64())))
            }
        };
        Random { engine }
    }

    /// Uniform draw in `[0, bound)`. `bound` must be strictly positive.
    pub fn next_bounded(&mut self, bound: u64) -> u64 {
        match &mut self.engine {
            Engine::SplitMix(seed) => {
                let (value, next) = seed.next_bounded(bound);
                *seed = next;
                value
            }
            Engine::ChaCha(rng) => rng.gen_range(0..bound),
        }
    }

    /// Uniform draw in the inclusive range `[min, max]`.
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(min <= max, "next_int called with min > max");
        let span = (max as i128 - min as i128) as u128 + 1;
        if span > u64::MAX as u128 {
            return self.next_u64() as i64;
        }
        let offset = self.next_bounded(span as u64);
        (min as i128 + offset as i128) as i64
    }

    /// Uniform draw in `[0, 1)`.
    pub fn next_double(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Fair coin.
    pub fn next_bool(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }
}

impl RngCore for Random {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        match &mut self.engine {
            Engine::SplitMix(seed) => {
                let (value, next) = seed.next_u64();
                *seed = next;
                value
            }
            Engine::ChaCha(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl fmt::Debug for Random {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Random")
            .field("engine", &self.random_type())
            .finish_non_exhaustive()
    }
}
