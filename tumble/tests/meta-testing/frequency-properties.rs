//! Frequency combinator properties
//!
//! Each case is a randomly drawn frequency configuration over disjoint
//! integer ranges, so the entry a value came from can be read off the value.
//! A case may also carry a trailing recursive entry that re-enters the same
//! generator, which is what makes the depth factor and max depth matter.

use crate::{arbitrary_seed, check};
use tumble::*;

#[derive(Debug, Clone)]
pub struct FrequencyCase {
    weights: Vec<u32>,
    with_cross_shrink: bool,
    depth_factor: f64,
    max_depth: Option<usize>,
    recursive: bool,
    seed: u64,
}

impl FrequencyCase {
    fn from_seed(seed: u64) -> Self {
        let mut random = Random::new(RandomType::SplitMix64, seed);
        let len = random.next_int(1, 5) as usize;
        let mut weights: Vec<u32> = (0..len).map(|_| random.next_int(0, 4) as u32).collect();
        if weights.iter().all(|w| *w == 0) {
            weights[0] = 1;
        }
        let depth_factor = match random.next_int(0, 3) {
            0 => 0.0,
            1 => random.next_double() * 4.0,
            2 => 10f64.powi(random.next_int(1, 300) as i32),
            _ => f64::MAX,
        };
        let max_depth = (weights[0] > 0 && random.next_bool())
            .then(|| random.next_int(0, 5) as usize);
        FrequencyCase {
            weights,
            with_cross_shrink: random.next_bool(),
            depth_factor,
            max_depth,
            recursive: random.next_bool(),
            seed,
        }
    }

    /// Range of the `index`-th entry. Ranges never overlap and exclude zero,
    /// so every entry shrinks towards its own lower bound.
    fn range(index: usize) -> (i64, i64) {
        let base = index as i64 * 100;
        (base + 10, base + 60)
    }

    fn entry_of(value: i64) -> Option<usize> {
        let index = (value / 100) as usize;
        let (min, max) = Self::range(index);
        (min..=max).contains(&value).then_some(index)
    }

    fn constraints(&self) -> FrequencyConstraints {
        let constraints = FrequencyConstraints::new()
            .with_cross_shrink(self.with_cross_shrink)
            .with_depth_factor(self.depth_factor);
        match self.max_depth {
            Some(max_depth) => constraints.with_max_depth(max_depth),
            None => constraints,
        }
    }

    /// Build the case with `leaf` as the generator of the `index`-th entry
    /// and `recurse` applied to the trailing recursive entry, if any.
    fn build(
        &self,
        leaf: impl Fn(usize) -> Gen<i64>,
        recurse: impl Fn(i64) -> i64 + 'static,
    ) -> Gen<i64> {
        let (itself, deferred) = Gen::<i64>::deferred();
        let mut entries: Vec<WeightedEntry<i64>> = self
            .weights
            .iter()
            .enumerate()
            .map(|(index, &weight)| WeightedEntry::new(weight, leaf(index)))
            .collect();
        if self.recursive {
            entries.push(WeightedEntry::new(1, itself.map(recurse)));
        }
        match Gen::frequency_with(self.constraints(), entries) {
            Ok(gen) => {
                deferred.define(gen.clone());
                gen
            }
            Err(error) => panic!("case {:?} should build: {error}", self),
        }
    }

    fn gen(&self) -> Gen<i64> {
        self.build(
            |index| {
                let (min, max) = Self::range(index);
                Gen::int_range(min, max)
            },
            |value| value,
        )
    }

    /// Generator of the recursion height of the case
    fn heights(&self) -> Gen<i64> {
        self.build(|_| Gen::constant(0), |height| height + 1)
    }

    /// Generated values together with their shrink context
    fn generate(&self, count: usize) -> Vec<Value<i64>> {
        let gen = self.gen();
        let mut random = Random::new(RandomType::SplitMix64, self.seed);
        (0..count)
            .map(|run| gen.generate(&mut random, Some(BiasFactor::from_run_id(run))))
            .collect()
    }

    fn params(&self, num_runs: usize) -> Parameters<i64> {
        Parameters::new().with_num_runs(num_runs).with_seed(self.seed)
    }
}

fn arbitrary_case() -> Gen<FrequencyCase> {
    arbitrary_seed().map(FrequencyCase::from_seed)
}

/// Property: values only come from entries with a strictly positive weight
pub fn test_values_come_from_positive_weights() {
    let prop = for_all(arbitrary_case(), |case: &FrequencyCase| {
        let values = match sample(case.gen(), case.params(40)) {
            Ok(values) => values,
            Err(_) => return false,
        };
        values.iter().all(|&value| {
            FrequencyCase::entry_of(value)
                .and_then(|index| case.weights.get(index))
                .is_some_and(|weight| *weight > 0)
        })
    });
    check("frequency values come from positive weights", prop, 60);
}

/// Property: with max_depth = 0 only entry 0 is ever produced
pub fn test_max_depth_zero_uses_first_entry() {
    let prop = for_all(arbitrary_case(), |case: &FrequencyCase| {
        let mut case = case.clone();
        case.weights[0] = case.weights[0].max(1);
        case.max_depth = Some(0);
        match sample(case.gen(), case.params(40)) {
            Ok(values) => values
                .iter()
                .all(|&value| FrequencyCase::entry_of(value) == Some(0)),
            Err(_) => false,
        }
    });
    check("max depth zero uses the first entry", prop, 40);
}

/// Property: recursion never nests deeper than max_depth, whatever the depth
/// factor
pub fn test_max_depth_bounds_recursion() {
    let prop = for_all(arbitrary_case(), |case: &FrequencyCase| {
        let mut case = case.clone();
        case.weights[0] = case.weights[0].max(1);
        case.recursive = true;
        let max_depth = *case.max_depth.get_or_insert(3);
        match sample(case.heights(), case.params(40)) {
            Ok(heights) => heights.iter().all(|h| (0..=max_depth as i64).contains(h)),
            Err(_) => false,
        }
    });
    check("max depth bounds recursion", prop, 40);
}

/// Property: a huge depth factor makes every nested call pick entry 0, so
/// recursion stops after one level
pub fn test_huge_depth_factor_stops_recursion() {
    let prop = for_all(arbitrary_case(), |case: &FrequencyCase| {
        let mut case = case.clone();
        case.weights[0] = case.weights[0].max(1);
        case.recursive = true;
        case.depth_factor = f64::MAX;
        case.max_depth = None;
        match sample(case.heights(), case.params(40)) {
            Ok(heights) => heights.iter().all(|h| (0..=1).contains(h)),
            Err(_) => false,
        }
    });
    check("huge depth factor stops recursion", prop, 40);
}

/// Property: the same configuration always samples the same values
pub fn test_frequency_determinism() {
    let prop = for_all(arbitrary_case(), |case: &FrequencyCase| {
        let first = sample(case.gen(), case.params(20));
        let second = sample(case.gen(), case.params(20));
        first.is_ok() && first == second
    });
    check("frequency determinism", prop, 40);
}

/// Property: without cross-shrink every candidate stays in the value's entry
/// and is strictly closer to that entry's lower bound
pub fn test_shrinks_are_strictly_smaller() {
    let prop = for_all(arbitrary_case(), |case: &FrequencyCase| {
        let mut case = case.clone();
        case.with_cross_shrink = false;
        case.recursive = false;
        let gen = case.gen();
        case.generate(10).iter().all(|value| {
            let entry = FrequencyCase::entry_of(value.value);
            gen.shrink(value).take(20).every(|candidate| {
                FrequencyCase::entry_of(candidate.value) == entry && candidate.value < value.value
            })
        })
    });
    check("frequency shrinks are strictly smaller", prop, 40);
}

/// Property: with cross-shrink a candidate is either strictly smaller in its
/// own entry or a value of entry 0, and only the last candidate may leave the
/// entry
pub fn test_cross_shrink_targets_first_entry() {
    let prop = for_all(arbitrary_case(), |case: &FrequencyCase| {
        let mut case = case.clone();
        case.with_cross_shrink = true;
        case.recursive = false;
        let gen = case.gen();
        case.generate(10).iter().all(|value| {
            let entry = FrequencyCase::entry_of(value.value);
            let candidates: Vec<Value<i64>> = gen.shrink(value).collect();
            let escapes = candidates
                .iter()
                .filter(|c| FrequencyCase::entry_of(c.value) != entry)
                .count();
            let well_formed = candidates.iter().enumerate().all(|(index, candidate)| {
                let candidate_entry = FrequencyCase::entry_of(candidate.value);
                if candidate_entry == entry {
                    candidate.value < value.value
                } else {
                    candidate_entry == Some(0) && index + 1 == candidates.len()
                }
            });
            let escape_allowed = entry != Some(0) && case.weights[0] > 0;
            well_formed && (escape_allowed || escapes == 0)
        })
    });
    check("cross-shrink targets the first entry", prop, 40);
}
