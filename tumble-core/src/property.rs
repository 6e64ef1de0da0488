//! Properties: a generator paired with a predicate over its values.

use crate::{data::*, error::*, gen::*, random::*, stream::*, value::*};
use std::fmt;
use std::rc::Rc;

/// What the sampling and replay machinery needs from a property.
///
/// `run_id` is the index of the toss being generated; implementations use it
/// to derive a [`BiasFactor`], and `None` asks for unbiased generation.
pub trait RawProperty<T> {
    /// Generate the input of the `run_id`-th run.
    fn generate(&self, random: &mut Random, run_id: Option<usize>) -> Value<T>;

    /// Shrink an input previously produced by [`RawProperty::generate`].
    fn shrink(&self, value: &Value<T>) -> Stream<Value<T>>;

    /// Check the predicate against one input.
    fn run(&self, input: &T) -> Result<()>;
}

/// A property that can be checked with generated inputs.
pub struct Property<T> {
    generator: Gen<T>,
    predicate: Rc<dyn Fn(&T) -> bool>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Property {
            generator: self.generator.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

impl<T> Property<T>
where
    T: 'static + fmt::Debug + Clone,
{
    /// Create a property that checks a boolean condition.
    pub fn for_all<F>(generator: Gen<T>, condition: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Property {
            generator,
            predicate: Rc::new(condition),
        }
    }

    /// A property that accepts every input, used to sample a bare generator.
    pub fn trivial(generator: Gen<T>) -> Self {
        Property::for_all(generator, |_| true)
    }

    /// The generator this property draws its inputs from.
    pub fn generator(&self) -> &Gen<T> {
        &self.generator
    }
}

impl<T> RawProperty<T> for Property<T>
where
    T: 'static + fmt::Debug + Clone,
{
    fn generate(&self, random: &mut Random, run_id: Option<usize>) -> Value<T> {
        self.generator
            .generate(random, run_id.map(BiasFactor::from_run_id))
    }

    fn shrink(&self, value: &Value<T>) -> Stream<Value<T>> {
        self.generator.shrink(value)
    }

    fn run(&self, input: &T) -> Result<()> {
        if (self.predicate)(input) {
            Ok(())
        } else {
            Err(TumbleError::PropertyFailed {
                counterexample: format!("{input:?}"),
            })
        }
    }
}

/// Decorator disabling the bias a property would apply to generation.
pub struct UnbiasedProperty<T> {
    inner: Rc<dyn RawProperty<T>>,
}

impl<T: 'static> UnbiasedProperty<T> {
    pub fn new(inner: Rc<dyn RawProperty<T>>) -> Self {
        UnbiasedProperty { inner }
    }
}

impl<T: 'static> RawProperty<T> for UnbiasedProperty<T> {
    fn generate(&self, random: &mut Random, _run_id: Option<usize>) -> Value<T> {
        self.inner.generate(random, None)
    }

    fn shrink(&self, value: &Value<T>) -> Stream<Value<T>> {
        self.inner.shrink(value)
    }

    fn run(&self, input: &T) -> Result<()> {
        self.inner.run(input)
    }
}

/// What can be handed to the sampler: a bare generator or a full property.
pub enum GeneratorInput<T> {
    Arbitrary(Gen<T>),
    Property(Rc<dyn RawProperty<T>>),
}

impl<T> GeneratorInput<T>
where
    T: 'static + fmt::Debug + Clone,
{
    /// Resolve into the single property representation used internally.
    pub fn into_property(self, unbiased: bool) -> Rc<dyn RawProperty<T>> {
        let property: Rc<dyn RawProperty<T>> = match self {
            GeneratorInput::Arbitrary(generator) => Rc::new(Property::trivial(generator)),
            GeneratorInput::Property(property) => property,
        };
        if unbiased {
            Rc::new(UnbiasedProperty::new(property))
        } else {
            property
        }
    }
}

impl<T> From<Gen<T>> for GeneratorInput<T> {
    fn from(generator: Gen<T>) -> Self {
        GeneratorInput::Arbitrary(generator)
    }
}

impl<T> From<&Gen<T>> for GeneratorInput<T> {
    fn from(generator: &Gen<T>) -> Self {
        GeneratorInput::Arbitrary(generator.clone())
    }
}

impl<T> From<Property<T>> for GeneratorInput<T>
where
    T: 'static + fmt::Debug + Clone,
{
    fn from(property: Property<T>) -> Self {
        GeneratorInput::Property(Rc::new(property))
    }
}

impl<T: 'static> From<Rc<dyn RawProperty<T>>> for GeneratorInput<T> {
    fn from(property: Rc<dyn RawProperty<T>>) -> Self {
        GeneratorInput::Property(property)
    }
}

/// Create a property that checks a boolean condition.
pub fn for_all<T, F>(generator: Gen<T>, condition: F) -> Property<T>
where
    T: 'static + fmt::Debug + Clone,
    F: Fn(&T) -> bool + 'static,
{
    Property::for_all(generator, condition)
}
