//! Replay of a recorded shrink path.
//!
//! A replay path is a colon-separated list of non-negative integers such as
//! `"12:0:3"`. The first segment is the index of the toss to start from
//! (forced examples included); every following segment is one shrink round
//! and selects a candidate of the shrink sequence of the current value,
//! `0` being the first candidate. The empty string is the empty path.

use crate::{error::*, stream::*, value::*};
use std::fmt;
use std::str::FromStr;

/// Parsed replay path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ReplayPath {
    segments: Vec<usize>,
}

impl ReplayPath {
    /// Create a path from its segments.
    pub fn new(segments: Vec<usize>) -> Self {
        ReplayPath { segments }
    }

    /// Whether this path asks for no replay at all.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[usize] {
        &self.segments
    }

    /// Index of the toss the walk starts from.
    pub fn run_index(&self) -> Option<usize> {
        self.segments.first().copied()
    }

    /// Candidate index selected at each shrink round.
    pub fn shrink_rounds(&self) -> &[usize] {
        self.segments.get(1..).unwrap_or(&[])
    }

    /// This path extended by one more shrink round.
    pub fn then(&self, candidate: usize) -> ReplayPath {
        let mut segments = self.segments.clone();
        segments.push(candidate);
        ReplayPath { segments }
    }
}

impl FromStr for ReplayPath {
    type Err = TumbleError;

    fn from_str(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Ok(ReplayPath::default());
        }
        let segments = text
            .split(':')
            .map(|segment| {
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(TumbleError::config(format!(
                        "invalid replay path '{text}': segment '{segment}' is not a non-negative integer"
                    )));
                }
                segment.parse::<usize>().map_err(|_| {
                    TumbleError::config(format!(
                        "invalid replay path '{text}': segment '{segment}' is out of range"
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ReplayPath { segments })
    }
}

impl fmt::Display for ReplayPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str(":")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Walk `path` over the generated `values` using `shrink`.
///
/// Returns the values a shrink search following `path` would visit from the
/// selected candidate on: the candidate reached by the last round first, then
/// the remaining candidates of that round. An empty path returns `values`
/// untouched.
///
/// Fails with [`TumbleError::ReplayExhausted`] as soon as a round asks for a
/// candidate past the end of its shrink sequence.
pub fn path_walk<T, F>(
    path: &ReplayPath,
    values: Stream<Value<T>>,
    shrink: F,
) -> Result<Stream<Value<T>>>
where
    T: 'static,
    F: Fn(&Value<T>) -> Stream<Value<T>>,
{
    let Some(run) = path.run_index() else {
        return Ok(values);
    };
    let exhausted = |round: usize, requested: usize| TumbleError::ReplayExhausted {
        path: path.to_string(),
        round,
        requested,
    };

    let mut rest = values.drop(run);
    let mut current = rest.head().ok_or_else(|| exhausted(0, run))?;
    for (index, &requested) in path.shrink_rounds().iter().enumerate() {
        let mut candidates = shrink(&current).drop(requested);
        current = candidates
            .head()
            .ok_or_else(|| exhausted(index + 1, requested))?;
        rest = candidates;
        tracing::trace!(round = index + 1, requested, "replayed shrink round");
    }
    Ok(Stream::of(vec![current]).join(rest))
}
