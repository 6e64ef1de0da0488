//! Lazy stream properties
//!
//! Streams are pulled lazily and are often infinite, so these properties
//! compare bounded prefixes against plain vectors.

use crate::{arbitrary_seed, check};
use tumble::*;

/// Small (length, offset, count) triple derived from a seed
fn slice_of(seed: u64) -> (usize, usize, usize) {
    let mut random = Random::new(RandomType::SplitMix64, seed);
    let len = random.next_int(0, 30) as usize;
    let offset = random.next_int(0, 35) as usize;
    let count = random.next_int(0, 35) as usize;
    (len, offset, count)
}

/// Property: drop(n).take(m) is the [n, n + m) slice of the source
pub fn test_take_drop_slices() {
    let prop = for_all(arbitrary_seed().map(slice_of), |&(len, offset, count)| {
        let source: Vec<usize> = (0..len).collect();
        let sliced: Vec<usize> = Stream::of(source.clone()).drop(offset).take(count).collect();
        let expected: Vec<usize> = source.into_iter().skip(offset).take(count).collect();
        sliced == expected
    });
    check("take/drop slices", prop, 50);
}

/// Property: join yields the first stream then the second one
pub fn test_join_concatenates() {
    let prop = for_all(arbitrary_seed().map(slice_of), |&(len, offset, _)| {
        let left: Vec<usize> = (0..len).collect();
        let right: Vec<usize> = (100..100 + offset).collect();
        let joined: Vec<usize> = Stream::of(left.clone())
            .join(Stream::of(right.clone()))
            .collect();
        joined == [left, right].concat()
    });
    check("join concatenates", prop, 50);
}

/// Property: get_nth_or_last returns the n-th element, or the last one when
/// the stream is too short, and nothing for an empty stream
pub fn test_get_nth_or_last() {
    let prop = for_all(arbitrary_seed().map(slice_of), |&(len, offset, _)| {
        let source: Vec<usize> = (0..len).collect();
        let found = Stream::of(source.clone()).get_nth_or_last(offset);
        let expected = source.get(offset).or_else(|| source.last()).copied();
        found == expected
    });
    check("get_nth_or_last", prop, 50);
}
