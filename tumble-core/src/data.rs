//! Core data types for Tumble generation.

/// Bias factor controlling how strongly generation favours small values.
///
/// A factor of `n` means that roughly one draw out of `n` is taken from a
/// reduced range close to the shrink target. Properties derive it from the run
/// index so that early runs are more biased than late ones; unbiased runs pass
/// no factor at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BiasFactor(pub u32);

impl BiasFactor {
    /// Bias factor associated with the `run_id`-th generated value:
    /// `2 + floor(log10(run_id + 1))`.
    pub fn from_run_id(run_id: usize) -> Self {
        let mut factor = 2;
        let mut bound = 10usize;
        while run_id + 1 >= bound {
            factor += 1;
            bound = match bound.checked_mul(10) {
                Some(next) => next,
                None => break,
            };
        }
        BiasFactor(factor)
    }
}

/// Splittable random seed for deterministic generation.
///
/// Seeds can be split to create independent random streams,
/// ensuring deterministic and reproducible runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(pub u64, pub u64);

impl Seed {
    /// Create a new seed from a single value.
    pub fn from_u64(value: u64) -> Self {
        let state = splitmix64_mix(value);
        let gamma = mix_gamma(state);
        Seed(state, gamma)
    }

    /// Split a seed into two independent seeds.
    /// Uses SplitMix64 splitting strategy for independence.
    pub fn split(self) -> (Self, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        let new_gamma = mix_gamma(output);

        (Seed(new_state, gamma), Seed(output, new_gamma))
    }

    /// Generate the next random value and advance the seed.
    pub fn next_u64(self) -> (u64, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        (output, Seed(new_state, gamma))
    }

    /// Generate a bounded random value in `[0, bound)`.
    pub fn next_bounded(self, bound: u64) -> (u64, Self) {
        let (value, new_seed) = self.next_u64();
        (((value as u128 * bound as u128) >> 64) as u64, new_seed)
    }
}

/// SplitMix64 mixing function.
fn splitmix64_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Derive a gamma for a split seed.
fn mix_gamma(mut z: u64) -> u64 {
    z = splitmix64_mix(z);
    // Odd gamma keeps the period maximal
    (z | 1).wrapping_mul(0x9e3779b97f4a7c15)
}
