//! Lazy, pull-based sequences.
//!
//! A [`Stream`] is a single-pass sequence that only evaluates elements as they
//! are pulled. Tosses, shrink candidates and replayed values are all streams,
//! and most of them are infinite, so nothing here ever materializes a stream
//! unless asked to.

use std::fmt;
use std::iter;

/// A lazy, possibly infinite, single-pass sequence of `T`.
pub struct Stream<T> {
    inner: Box<dyn Iterator<Item = T>>,
}

impl<T: 'static> Stream<T> {
    /// Wrap any iterator into a stream.
    pub fn new<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Stream {
            inner: Box::new(iter.into_iter()),
        }
    }

    /// The empty stream.
    pub fn nil() -> Self {
        Stream::new(iter::empty())
    }

    /// A finite stream over the given values.
    pub fn of(values: Vec<T>) -> Self {
        Stream::new(values)
    }

    /// A stream pulling its elements from `producer` until it returns `None`.
    pub fn from_fn<F>(producer: F) -> Self
    where
        F: FnMut() -> Option<T> + 'static,
    {
        Stream::new(iter::from_fn(producer))
    }

    /// Infinite stream `seed, f(seed), f(f(seed)), ...`.
    pub fn iterate<F>(seed: T, f: F) -> Self
    where
        T: Clone,
        F: Fn(&T) -> T + 'static,
    {
        Stream::new(iter::successors(Some(seed), move |previous| Some(f(previous))))
    }

    /// Lazily transform every element.
    pub fn map<U, F>(self, f: F) -> Stream<U>
    where
        U: 'static,
        F: FnMut(T) -> U + 'static,
    {
        Stream::new(self.inner.map(f))
    }

    /// Lazily keep the elements satisfying `predicate`.
    pub fn filter<F>(self, predicate: F) -> Stream<T>
    where
        F: FnMut(&T) -> bool + 'static,
    {
        Stream::new(self.inner.filter(predicate))
    }

    /// Lazily replace every element by a stream and flatten the result.
    pub fn flat_map<U, F>(self, f: F) -> Stream<U>
    where
        U: 'static,
        F: FnMut(T) -> Stream<U> + 'static,
    {
        Stream::new(self.inner.flat_map(f))
    }

    /// Truncate to at most `n` elements.
    pub fn take(self, n: usize) -> Stream<T> {
        Stream::new(self.inner.take(n))
    }

    /// Skip the first `n` elements. Skipping happens on the first pull.
    pub fn drop(self, n: usize) -> Stream<T> {
        Stream::new(self.inner.skip(n))
    }

    /// Elements of `self` followed by the elements of `other`.
    pub fn join(self, other: Stream<T>) -> Stream<T> {
        Stream::new(self.inner.chain(other))
    }

    /// Elements of `self` followed by the elements of each stream of `others`,
    /// pulled one stream at a time.
    pub fn join_all(self, others: Stream<Stream<T>>) -> Stream<T> {
        Stream::new(self.inner.chain(others.inner.flatten()))
    }

    /// Pull the first element, if any.
    pub fn head(&mut self) -> Option<T> {
        self.inner.next()
    }

    /// The `n`-th element, or the last one when the stream is shorter.
    pub fn get_nth_or_last(self, n: usize) -> Option<T> {
        let mut last = None;
        for (index, value) in self.inner.enumerate() {
            last = Some(value);
            if index == n {
                break;
            }
        }
        last
    }

    /// Whether every element satisfies `predicate`. Stops at the first miss.
    pub fn every<F>(mut self, predicate: F) -> bool
    where
        F: FnMut(T) -> bool,
    {
        self.inner.all(predicate)
    }

    /// Whether any element satisfies `predicate`, returning it.
    pub fn has<F>(mut self, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.inner.find(|value| predicate(value))
    }
}

impl<T> Iterator for Stream<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }
}

impl<T> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream").finish_non_exhaustive()
    }
}
