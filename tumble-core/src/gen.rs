//! Arbitraries and the generator handle used to compose them.

use crate::{data::*, random::*, stream::*, value::*};
use std::cell::RefCell;
use std::rc::Rc;

/// Capability to generate values of type `T` and to shrink them.
///
/// `generate` must be a pure function of the random source and bias: given
/// the same draws it returns the same value. `shrink` returns the lazy
/// sequence of strictly simpler candidates for a value this arbitrary
/// produced, most aggressive candidate first.
pub trait Arbitrary<T> {
    /// Generate a value from the random source.
    fn generate(&self, random: &mut Random, bias: Option<BiasFactor>) -> Value<T>;

    /// Candidates simpler than `value`.
    fn shrink(&self, value: &Value<T>) -> Stream<Value<T>>;
}

/// A generator for test data of type `T`.
///
/// Generators are explicit, first-class values that can be composed using
/// combinator functions. Cloning a generator is cheap and shares the
/// underlying arbitrary.
pub struct Gen<T> {
    arbitrary: Rc<dyn Arbitrary<T>>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            arbitrary: self.arbitrary.clone(),
        }
    }
}

impl<T: 'static> Gen<T> {
    /// Create a new generator from an arbitrary.
    pub fn new<A>(arbitrary: A) -> Self
    where
        A: Arbitrary<T> + 'static,
    {
        Gen {
            arbitrary: Rc::new(arbitrary),
        }
    }

    /// Generate a value using the given random source and bias.
    pub fn generate(&self, random: &mut Random, bias: Option<BiasFactor>) -> Value<T> {
        self.arbitrary.generate(random, bias)
    }

    /// Shrink a value previously produced by this generator.
    pub fn shrink(&self, value: &Value<T>) -> Stream<Value<T>> {
        self.arbitrary.shrink(value)
    }

    /// Create a generator that always produces the same value.
    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Gen::new(Constant { value })
    }

    /// Map a function over the generated values.
    ///
    /// Mapped values shrink by shrinking the value they were built from.
    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        T: Clone,
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        Gen::new(Mapped {
            source: self,
            mapper: Rc::new(f),
        })
    }

    /// Create a generator whose definition is supplied later.
    ///
    /// This is how recursive grammars are tied together: the returned
    /// generator can be used inside the definition given to
    /// [`Deferred::define`].
    ///
    /// # Panics
    ///
    /// Generating or shrinking with the returned generator panics if
    /// [`Deferred::define`] has not been called yet.
    pub fn deferred() -> (Gen<T>, Deferred<T>) {
        let deferred = Deferred {
            slot: Rc::new(RefCell::new(None)),
        };
        (Gen::new(deferred.clone()), deferred)
    }
}

/// Primitive generators.
impl Gen<bool> {
    /// Generate a random boolean, shrinking towards `false`.
    pub fn bool() -> Self {
        Gen::new(Boolean)
    }
}

impl Gen<i64> {
    /// Generate an integer in the inclusive range `[min, max]`.
    ///
    /// Values shrink towards zero, or towards the bound closest to zero
    /// when the range excludes it.
    pub fn int_range(min: i64, max: i64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Gen::new(IntegerRange { min, max })
    }

    /// Generate a natural number in `[0, max]`.
    pub fn nat(max: i64) -> Self {
        Self::int_range(0, max.max(0))
    }
}

struct Constant<T> {
    value: T,
}

impl<T: Clone + 'static> Arbitrary<T> for Constant<T> {
    fn generate(&self, _random: &mut Random, _bias: Option<BiasFactor>) -> Value<T> {
        Value::new(self.value.clone())
    }

    fn shrink(&self, _value: &Value<T>) -> Stream<Value<T>> {
        Stream::nil()
    }
}

struct Boolean;

impl Arbitrary<bool> for Boolean {
    fn generate(&self, random: &mut Random, _bias: Option<BiasFactor>) -> Value<bool> {
        Value::new(random.next_bool())
    }

    fn shrink(&self, value: &Value<bool>) -> Stream<Value<bool>> {
        if value.value {
            Stream::of(vec![Value::new(false)])
        } else {
            Stream::nil()
        }
    }
}

/// Context of a shrunk integer: the candidate tried right before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PreviousCandidate(i64);

struct IntegerRange {
    min: i64,
    max: i64,
}

impl IntegerRange {
    fn target(&self) -> i64 {
        0i64.clamp(self.min, self.max)
    }

    /// Sub-range close to the target whose width grows with the log of the
    /// full range.
    fn biased_range(&self) -> (i64, i64) {
        let width = (self.max as i128 - self.min as i128 + 1) as u128;
        let log = (128 - width.leading_zeros()) as i128;
        let target = self.target() as i128;
        let low = (target - log).max(self.min as i128);
        let high = (target + log).min(self.max as i128);
        (low as i64, high as i64)
    }

    /// Is `current` the value right next to the last tried candidate?
    fn is_last_chance(&self, current: i64, previous: i64) -> bool {
        if current > 0 {
            current == previous.saturating_add(1) && current > self.min
        } else if current < 0 {
            current == previous.saturating_sub(1) && current < self.max
        } else {
            false
        }
    }
}

impl Arbitrary<i64> for IntegerRange {
    fn generate(&self, random: &mut Random, bias: Option<BiasFactor>) -> Value<i64> {
        if let Some(BiasFactor(factor)) = bias {
            if factor > 1 && random.next_int(1, factor as i64) == 1 {
                let (low, high) = self.biased_range();
                return Value::new(random.next_int(low, high));
            }
        }
        Value::new(random.next_int(self.min, self.max))
    }

    fn shrink(&self, value: &Value<i64>) -> Stream<Value<i64>> {
        let current = value.value;
        match value.context_as::<PreviousCandidate>() {
            None => shrink_integer(current, self.target(), true),
            Some(&PreviousCandidate(previous)) if self.is_last_chance(current, previous) => {
                Stream::of(vec![Value::new(previous)])
            }
            Some(&PreviousCandidate(previous)) => shrink_integer(current, previous, false),
        }
    }
}

/// Candidates between `target` and `current`, halving the gap each step.
///
/// When `try_target_first` is set the first candidate is the target itself.
/// Each candidate remembers the one tried before it so that shrinking it
/// again never revisits the already explored part of the range.
fn shrink_integer(current: i64, target: i64, try_target_first: bool) -> Stream<Value<i64>> {
    let real_gap = current as i128 - target as i128;
    if real_gap == 0 {
        return Stream::nil();
    }
    let mut previous = if try_target_first { None } else { Some(target) };
    let mut gap = if try_target_first { real_gap } else { real_gap / 2 };
    Stream::from_fn(move || {
        if gap == 0 {
            return None;
        }
        let next = if gap == real_gap {
            target
        } else {
            (current as i128 - gap) as i64
        };
        let candidate = match previous {
            Some(previous) => Value::with_context(next, PreviousCandidate(previous)),
            None => Value::new(next),
        };
        previous = Some(next);
        gap /= 2;
        Some(candidate)
    })
}

struct Mapped<T, U> {
    source: Gen<T>,
    mapper: Rc<dyn Fn(T) -> U>,
}

/// Context of a mapped value: the source value it was built from.
struct MappedFrom<T>(Value<T>);

impl<T, U> Arbitrary<U> for Mapped<T, U>
where
    T: Clone + 'static,
    U: 'static,
{
    fn generate(&self, random: &mut Random, bias: Option<BiasFactor>) -> Value<U> {
        let source = self.source.generate(random, bias);
        Value::with_context((self.mapper)(source.value.clone()), MappedFrom(source))
    }

    fn shrink(&self, value: &Value<U>) -> Stream<Value<U>> {
        let Some(MappedFrom(source)) = value.context_as::<MappedFrom<T>>() else {
            return Stream::nil();
        };
        let mapper = self.mapper.clone();
        self.source.shrink(source).map(move |shrunk| {
            Value::with_context(mapper(shrunk.value.clone()), MappedFrom(shrunk))
        })
    }
}

/// Late-bound definition slot of a generator created by [`Gen::deferred`].
pub struct Deferred<T> {
    slot: Rc<RefCell<Option<Gen<T>>>>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Deferred {
            slot: self.slot.clone(),
        }
    }
}

impl<T: 'static> Deferred<T> {
    /// Supply the definition. A later call replaces the earlier one.
    pub fn define(&self, gen: Gen<T>) {
        *self.slot.borrow_mut() = Some(gen);
    }

    /// Whether a definition has been supplied.
    pub fn is_defined(&self) -> bool {
        self.slot.borrow().is_some()
    }

    fn resolve(&self) -> Gen<T> {
        match self.slot.borrow().as_ref() {
            Some(gen) => gen.clone(),
            None => panic!("deferred generator used before Deferred::define was called"),
        }
    }
}

impl<T: 'static> Arbitrary<T> for Deferred<T> {
    fn generate(&self, random: &mut Random, bias: Option<BiasFactor>) -> Value<T> {
        self.resolve().generate(random, bias)
    }

    fn shrink(&self, value: &Value<T>) -> Stream<Value<T>> {
        self.resolve().shrink(value)
    }
}
