//! Weighted choice between generators.
//!
//! [`Gen::frequency`] picks one of several generators according to integer
//! weights. Entry 0 plays a special role: it is the terminal case recursive
//! grammars fall back to as they get deeper, and the target of cross-shrink.

use crate::{data::*, error::*, gen::*, random::*, stream::*, value::*};
use std::cell::{Cell, OnceCell};
use std::iter;
use std::rc::Rc;

/// Largest depth benefit handed to the random source.
const MAX_DEPTH_BENEFIT: f64 = (1u64 << 53) as f64;

/// A generator together with its selection weight.
pub struct WeightedEntry<T> {
    pub arbitrary: Gen<T>,
    pub weight: u32,
}

impl<T> WeightedEntry<T> {
    /// Create a new weighted entry.
    pub fn new(weight: u32, arbitrary: Gen<T>) -> Self {
        WeightedEntry { arbitrary, weight }
    }
}

impl<T> Clone for WeightedEntry<T> {
    fn clone(&self) -> Self {
        WeightedEntry {
            arbitrary: self.arbitrary.clone(),
            weight: self.weight,
        }
    }
}

/// Generation depth shared by the frequency generators of one grammar.
///
/// Each frequency generator gets its own context unless one is supplied
/// through [`FrequencyConstraints::depth_context`]; mutually recursive
/// generators should share a single context so that depth is counted across
/// all of them.
#[derive(Debug, Clone, Default)]
pub struct DepthContext {
    depth: Rc<Cell<usize>>,
}

impl DepthContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation depth.
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    fn enter(&self) -> DepthGuard<'_> {
        self.depth.set(self.depth.get() + 1);
        DepthGuard(&self.depth)
    }
}

struct DepthGuard<'a>(&'a Cell<usize>);

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

/// Constraints of a frequency generator.
#[derive(Debug, Clone, Default)]
pub struct FrequencyConstraints {
    /// Offer a value of entry 0 when shrinking values of other entries.
    pub with_cross_shrink: bool,
    /// How fast selection shifts towards entry 0 as depth grows. Zero
    /// disables the bias.
    pub depth_factor: f64,
    /// Depth at which only entry 0 may be produced.
    pub max_depth: Option<usize>,
    /// Depth counter to share with other generators.
    pub depth_context: Option<DepthContext>,
}

impl FrequencyConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cross_shrink(mut self, enabled: bool) -> Self {
        self.with_cross_shrink = enabled;
        self
    }

    pub fn with_depth_factor(mut self, depth_factor: f64) -> Self {
        self.depth_factor = depth_factor;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_depth_context(mut self, context: DepthContext) -> Self {
        self.depth_context = Some(context);
        self
    }
}

impl<T: Clone + 'static> Gen<T> {
    /// Choose between generators according to their weights.
    pub fn frequency(entries: Vec<WeightedEntry<T>>) -> Result<Self> {
        Self::frequency_with(FrequencyConstraints::default(), entries)
    }

    /// Choose between generators according to their weights, with explicit
    /// constraints on depth and shrinking.
    pub fn frequency_with(
        constraints: FrequencyConstraints,
        entries: Vec<WeightedEntry<T>>,
    ) -> Result<Self> {
        FrequencyArbitrary::new(constraints, entries).map(Gen::new)
    }
}

/// Arbitrary behind [`Gen::frequency`].
pub struct FrequencyArbitrary<T> {
    inner: Rc<FrequencyInner<T>>,
}

struct FrequencyInner<T> {
    entries: Vec<WeightedEntry<T>>,
    cumulative: Vec<u64>,
    total_weight: u64,
    with_cross_shrink: bool,
    depth_factor: f64,
    max_depth: Option<usize>,
    depth: DepthContext,
}

/// Shrink context of a value produced by a frequency generator.
struct FrequencyContext<T> {
    selected: usize,
    bias: Option<BiasFactor>,
    original: Option<ShrinkContext>,
    fallback: Option<Rc<FirstEntryFallback<T>>>,
}

/// Random state captured at generation time to produce the cross-shrink
/// candidate, and the candidate once produced.
struct FirstEntryFallback<T> {
    random: Random,
    cached: OnceCell<Value<T>>,
}

impl<T: Clone + 'static> FrequencyArbitrary<T> {
    /// Validate the entries and constraints.
    pub fn new(constraints: FrequencyConstraints, entries: Vec<WeightedEntry<T>>) -> Result<Self> {
        let Some(first) = entries.first() else {
            return Err(TumbleError::generator(
                "frequency expects at least one weighted arbitrary",
            ));
        };
        if !(constraints.depth_factor >= 0.0) {
            return Err(TumbleError::generator(format!(
                "frequency expects a non-negative depth factor, got {}",
                constraints.depth_factor
            )));
        }
        if constraints.max_depth.is_some() && first.weight == 0 {
            return Err(TumbleError::generator(
                "frequency with a max depth expects a positive weight on its first arbitrary",
            ));
        }

        let cumulative: Vec<u64> = entries
            .iter()
            .scan(0u64, |total, entry| {
                *total += entry.weight as u64;
                Some(*total)
            })
            .collect();
        let total_weight = cumulative.last().copied().unwrap_or(0);
        if total_weight == 0 {
            return Err(TumbleError::generator(
                "frequency expects the sum of weights to be strictly positive",
            ));
        }

        tracing::debug!(
            entries = entries.len(),
            total_weight,
            with_cross_shrink = constraints.with_cross_shrink,
            depth_factor = constraints.depth_factor,
            max_depth = ?constraints.max_depth,
            "built frequency arbitrary"
        );

        Ok(FrequencyArbitrary {
            inner: Rc::new(FrequencyInner {
                entries,
                cumulative,
                total_weight,
                with_cross_shrink: constraints.with_cross_shrink,
                depth_factor: constraints.depth_factor,
                max_depth: constraints.max_depth,
                depth: constraints.depth_context.unwrap_or_default(),
            }),
        })
    }
}

impl<T: Clone + 'static> FrequencyInner<T> {
    fn must_generate_first(&self) -> bool {
        matches!(self.max_depth, Some(max_depth) if self.depth.depth() >= max_depth)
    }

    /// Extra mass granted to entry 0 at the current depth:
    /// `weight_0 * (floor((1 + depth_factor)^depth) - 1)`.
    ///
    /// It scales with entry 0's own weight, so a zero-weight entry 0 never
    /// becomes selectable.
    fn depth_benefit(&self) -> i64 {
        let depth = self.depth.depth();
        let first_weight = self.entries[0].weight;
        if depth == 0 || first_weight == 0 || self.depth_factor <= 0.0 {
            return 0;
        }
        let growth = (1.0 + self.depth_factor).powf(depth as f64).floor() - 1.0;
        let benefit = first_weight as f64 * growth;
        // powf overflows to infinity for large factors
        benefit.min(MAX_DEPTH_BENEFIT) as i64
    }

    fn select(&self, random: &mut Random) -> usize {
        if self.must_generate_first() {
            return 0;
        }
        let draw = random.next_int(-self.depth_benefit(), self.total_weight as i64 - 1);
        // Negative draws come from the depth benefit and belong to entry 0
        self.cumulative
            .iter()
            .position(|&cumulated| draw < cumulated as i64)
            .unwrap_or(0)
    }

    fn must_fallback_to_first(&self, index: usize) -> bool {
        index != 0 && self.with_cross_shrink && self.entries[0].weight != 0
    }

    fn generate_for_index(
        &self,
        index: usize,
        random: &mut Random,
        bias: Option<BiasFactor>,
    ) -> Value<T> {
        let generated = {
            let _depth = self.depth.enter();
            self.entries[index].arbitrary.generate(random, bias)
        };
        let fallback = self.must_fallback_to_first(index).then(|| {
            Rc::new(FirstEntryFallback {
                random: random.clone(),
                cached: OnceCell::new(),
            })
        });
        wrap(index, generated, bias, fallback)
    }
}

fn wrap<T: 'static>(
    selected: usize,
    generated: Value<T>,
    bias: Option<BiasFactor>,
    fallback: Option<Rc<FirstEntryFallback<T>>>,
) -> Value<T> {
    Value::with_context(
        generated.value,
        FrequencyContext {
            selected,
            bias,
            original: generated.context,
            fallback,
        },
    )
}

impl<T: Clone + 'static> FirstEntryFallback<T> {
    fn value(&self, inner: &FrequencyInner<T>, bias: Option<BiasFactor>) -> Value<T> {
        self.cached
            .get_or_init(|| {
                let mut random = self.random.clone();
                inner.generate_for_index(0, &mut random, bias)
            })
            .clone()
    }
}

impl<T: Clone + 'static> Arbitrary<T> for FrequencyArbitrary<T> {
    fn generate(&self, random: &mut Random, bias: Option<BiasFactor>) -> Value<T> {
        let index = self.inner.select(random);
        self.inner.generate_for_index(index, random, bias)
    }

    /// Shrinks within the entry that produced the value, then, when
    /// cross-shrink applies, offers a single value of entry 0. Values that
    /// carry no frequency context (forced examples) do not shrink.
    fn shrink(&self, value: &Value<T>) -> Stream<Value<T>> {
        let Some(context) = value.context_as::<FrequencyContext<T>>() else {
            return Stream::nil();
        };
        let selected = context.selected;
        let bias = context.bias;
        let original = Value {
            value: value.value.clone(),
            context: context.original.clone(),
        };
        let own = self.inner.entries[selected]
            .arbitrary
            .shrink(&original)
            .map(move |shrunk| wrap(selected, shrunk, bias, None));

        match &context.fallback {
            None => own,
            Some(fallback) => {
                let fallback = fallback.clone();
                let inner = self.inner.clone();
                own.join(Stream::new(iter::once_with(move || {
                    fallback.value(&inner, bias)
                })))
            }
        }
    }
}
