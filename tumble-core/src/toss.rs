//! Reproducible tosses: the infinite sequence of generation closures.

use crate::{property::*, random::*, stream::*, value::*};
use std::fmt;
use std::rc::Rc;

/// One reproducible act of generating a value.
///
/// Running a toss never advances any shared state: the random sub-stream is
/// owned by the toss and cloned on each run, so running the same toss twice
/// gives the same value.
pub enum Toss<T> {
    /// A forced example, consumed before any random toss.
    Example(T),
    /// A value drawn by the property from its own random sub-stream.
    Generated {
        property: Rc<dyn RawProperty<T>>,
        random: Random,
        run_id: usize,
    },
}

impl<T: Clone + 'static> Toss<T> {
    /// Produce the value of this toss.
    pub fn run(&self) -> Value<T> {
        match self {
            Toss::Example(example) => Value::new(example.clone()),
            Toss::Generated {
                property,
                random,
                run_id,
            } => {
                let mut random = random.clone();
                property.generate(&mut random, Some(*run_id))
            }
        }
    }

    /// Index among the random tosses, `None` for forced examples.
    pub fn run_id(&self) -> Option<usize> {
        match self {
            Toss::Example(_) => None,
            Toss::Generated { run_id, .. } => Some(*run_id),
        }
    }

    pub fn is_example(&self) -> bool {
        matches!(self, Toss::Example(_))
    }
}

impl<T: Clone> Clone for Toss<T> {
    fn clone(&self) -> Self {
        match self {
            Toss::Example(example) => Toss::Example(example.clone()),
            Toss::Generated {
                property,
                random,
                run_id,
            } => Toss::Generated {
                property: property.clone(),
                random: random.clone(),
                run_id: *run_id,
            },
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Toss<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toss::Example(example) => f.debug_tuple("Example").field(example).finish(),
            Toss::Generated { random, run_id, .. } => f
                .debug_struct("Generated")
                .field("random", random)
                .field("run_id", run_id)
                .finish_non_exhaustive(),
        }
    }
}

/// Infinite sequence of tosses for a property.
///
/// The forced `examples` come first, in order. Every following toss owns a
/// sub-stream split off one engine seeded by `seed`, so the k-th toss only
/// depends on `(seed, random_type, examples, k)`.
pub fn toss<T>(
    property: Rc<dyn RawProperty<T>>,
    seed: u64,
    random_type: RandomType,
    examples: Vec<T>,
) -> Stream<Toss<T>>
where
    T: Clone + 'static,
{
    let mut random = Random::new(random_type, seed);
    let mut run_id = 0;
    let generated = Stream::from_fn(move || {
        let toss = Toss::Generated {
            property: property.clone(),
            random: random.split(),
            run_id,
        };
        run_id += 1;
        Some(toss)
    });
    Stream::of(examples).map(Toss::Example).join(generated)
}
