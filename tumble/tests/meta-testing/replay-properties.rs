//! Replay path properties
//!
//! A replay path must land on exactly the value a shrink search would reach
//! by taking the same branches by hand.

use crate::{arbitrary_seed, check};
use std::rc::Rc;
use tumble::*;

fn integers() -> Gen<i64> {
    Gen::int_range(-10_000, 10_000)
}

fn property() -> Rc<dyn RawProperty<i64>> {
    GeneratorInput::from(integers()).into_property(false)
}

/// Toss `run` of `seed`, as the sampler would generate it
fn tossed(seed: u64, run: usize) -> Option<Value<i64>> {
    toss(property(), seed, RandomType::SplitMix64, vec![])
        .drop(run)
        .head()
        .map(|t| t.run())
}

fn replay(seed: u64, path: &str, num_runs: usize) -> Result<Vec<i64>> {
    sample(
        integers(),
        Parameters::new()
            .with_num_runs(num_runs)
            .with_seed(seed)
            .with_path(path),
    )
}

/// (seed, run, candidate) triple derived from a seed
fn replay_case(seed: u64) -> (u64, usize, usize) {
    let mut random = Random::new(RandomType::ChaCha8, seed);
    let run = random.next_int(0, 20) as usize;
    let candidate = random.next_int(0, 6) as usize;
    (seed, run, candidate)
}

/// Property: a path made of a single segment k replays from the k-th toss
pub fn test_run_segment_selects_toss() {
    let prop = for_all(arbitrary_seed().map(replay_case), |&(seed, run, _)| {
        let plain = replay(seed, "", run + 5);
        let replayed = replay(seed, &run.to_string(), 5);
        match (plain, replayed) {
            (Ok(plain), Ok(replayed)) => plain[run..] == replayed[..],
            _ => false,
        }
    });
    check("run segment selects the toss", prop, 50);
}

/// Property: "k:i" starts at the i-th shrink candidate of toss k and goes on
/// with the candidates after it
pub fn test_shrink_segment_selects_candidate() {
    let prop = for_all(
        arbitrary_seed().map(replay_case),
        |&(seed, run, candidate)| {
            let Some(value) = tossed(seed, run) else {
                return false;
            };
            let expected: Vec<i64> = property()
                .shrink(&value)
                .drop(candidate)
                .take(3)
                .map(|v| v.value)
                .collect();
            match replay(seed, &format!("{run}:{candidate}"), 3) {
                Ok(replayed) => !expected.is_empty() && replayed == expected,
                Err(TumbleError::ReplayExhausted { round, .. }) => {
                    expected.is_empty() && round == 1
                }
                Err(_) => false,
            }
        },
    );
    check("shrink segment selects the candidate", prop, 50);
}

/// Property: asking for a candidate past the end of a shrink sequence is an
/// error, never a silent truncation
pub fn test_overlong_path_is_rejected() {
    let prop = for_all(arbitrary_seed().map(replay_case), |&(seed, run, _)| {
        let Some(value) = tossed(seed, run) else {
            return false;
        };
        let available = property().shrink(&value).count();
        matches!(
            replay(seed, &format!("{run}:{available}"), 1),
            Err(TumbleError::ReplayExhausted { round: 1, .. })
        )
    });
    check("overlong path is rejected", prop, 30);
}
