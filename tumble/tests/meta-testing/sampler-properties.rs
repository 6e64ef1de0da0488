//! Sampler properties
//!
//! These properties pin down what `sample` and `statistics` return for any
//! run count and seed.

use crate::{arbitrary_seed, check};
use std::sync::{Arc, Mutex};
use tumble::*;

/// (num_runs, seed) pair derived from a seed
fn run_config(seed: u64) -> (usize, u64) {
    let mut random = Random::new(RandomType::SplitMix64, seed);
    (random.next_int(1, 150) as usize, seed)
}

fn arbitrary_config() -> Gen<(usize, u64)> {
    arbitrary_seed().map(run_config)
}

fn params(num_runs: usize, seed: u64) -> Parameters<i64> {
    Parameters::new().with_num_runs(num_runs).with_seed(seed)
}

/// Property: sample returns exactly num_runs values
pub fn test_sample_length() {
    let prop = for_all(arbitrary_config(), |&(num_runs, seed)| {
        sample(Gen::int_range(-50, 50), params(num_runs, seed))
            .is_ok_and(|values| values.len() == num_runs)
    });
    check("sample length", prop, 50);
}

/// Property: identical configurations give identical samples, under both
/// random engines
pub fn test_sample_determinism() {
    let prop = for_all(arbitrary_config(), |&(num_runs, seed)| {
        [RandomType::SplitMix64, RandomType::ChaCha8]
            .into_iter()
            .all(|random_type| {
                let params = params(num_runs, seed).with_random_type(random_type);
                let first = sample(Gen::nat(1000), params.clone());
                let second = sample(Gen::nat(1000), params);
                first.is_ok() && first == second
            })
    });
    check("sample determinism", prop, 30);
}

/// Property: forced examples are returned first, in order
pub fn test_examples_first() {
    let prop = for_all(arbitrary_config(), |&(num_runs, seed)| {
        let examples: Vec<i64> = (0..num_runs as i64 % 7).map(|n| -1 - n).collect();
        let values = match sample(
            Gen::nat(100),
            params(num_runs, seed).with_examples(examples.clone()),
        ) {
            Ok(values) => values,
            Err(_) => return false,
        };
        let forced = examples.len().min(num_runs);
        values.len() == num_runs
            && values[..forced] == examples[..forced]
            && values[forced..].iter().all(|v| (0..=100).contains(v))
    });
    check("examples come first", prop, 30);
}

fn percentage(line: &str) -> Option<f64> {
    let number = line.strip_suffix('%')?.rsplit("..").next()?;
    number.trim_start_matches('.').parse().ok()
}

/// Property: statistics lines are in descending order of share and the
/// shares of a single-label classifier add up to 100%
pub fn test_statistics_report_order() {
    let prop = for_all(arbitrary_config(), |&(num_runs, seed)| {
        let lines = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = lines.clone();
        let logger = Logger::new(move |line| {
            if let Ok(mut lines) = sink.lock() {
                lines.push(line.to_string());
            }
        });

        let outcome = statistics(
            Gen::int_range(-20, 20),
            |v: &i64| match v.signum() {
                -1 => "negative",
                0 => "zero",
                _ => "positive",
            },
            params(num_runs, seed).with_logger(logger),
        );
        let Ok(lines) = lines.lock() else {
            return false;
        };
        let shares: Vec<f64> = lines.iter().filter_map(|line| percentage(line)).collect();

        outcome.is_ok()
            && !lines.is_empty()
            && shares.len() == lines.len()
            && shares.windows(2).all(|pair| pair[0] >= pair[1])
            && (shares.iter().sum::<f64>() - 100.0).abs() <= 0.01 * shares.len() as f64
    });
    check("statistics report order", prop, 30);
}
