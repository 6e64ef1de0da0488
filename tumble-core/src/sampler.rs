//! Batch extraction of generated values and label statistics.
//!
//! The sampler never evaluates predicates: it only draws the inputs a check
//! would see, optionally along a replay path.

use crate::{config::*, error::*, path::*, property::*, stream::*, toss::*};
use std::collections::HashMap;
use std::fmt;

fn stream_values<T>(
    generator: GeneratorInput<T>,
    params: &QualifiedParameters<T>,
) -> Result<Stream<T>>
where
    T: 'static + fmt::Debug + Clone,
{
    let property = generator.into_property(params.unbiased);
    tracing::debug!(
        seed = params.seed,
        num_runs = params.num_runs,
        random_type = %params.random_type,
        path = %params.path,
        unbiased = params.unbiased,
        examples = params.examples.len(),
        "sampling"
    );

    let tosses = toss(
        property.clone(),
        params.seed,
        params.random_type,
        params.examples.clone(),
    );
    if params.path.is_empty() {
        return Ok(tosses.take(params.num_runs).map(|t| t.run().value));
    }

    let values = path_walk(&params.path, tosses.map(|t| t.run()), move |v| property.shrink(v))?;
    Ok(values.take(params.num_runs).map(|v| v.value))
}

/// Lazily draw the values `sample` would return.
///
/// Configuration errors and replay failures surface here, before the first
/// value is pulled.
pub fn sample_stream<T, G, P>(generator: G, params: P) -> Result<Stream<T>>
where
    T: 'static + fmt::Debug + Clone,
    G: Into<GeneratorInput<T>>,
    P: Into<Parameters<T>>,
{
    let params = QualifiedParameters::read(params.into())?;
    stream_values(generator.into(), &params)
}

/// Draw `num_runs` values from a generator or a property.
///
/// Fewer values are returned only when a replay path leaves fewer than
/// `num_runs` candidates to visit.
///
/// ```
/// use tumble_core::*;
///
/// let values = sample(Gen::int_range(0, 10), Parameters::new().with_num_runs(5).with_seed(7))?;
/// assert_eq!(values.len(), 5);
/// assert!(values.iter().all(|v| (0..=10).contains(v)));
/// # Ok::<(), TumbleError>(())
/// ```
pub fn sample<T, G, P>(generator: G, params: P) -> Result<Vec<T>>
where
    T: 'static + fmt::Debug + Clone,
    G: Into<GeneratorInput<T>>,
    P: Into<Parameters<T>>,
{
    Ok(sample_stream(generator, params)?.collect())
}

/// Classify sampled values and write the share of every label to the logger.
///
/// One line is written per label, most frequent first:
/// `"<label>..<percentage>"`, both columns padded with `'.'`.
pub fn statistics<T, G, P, F, L>(generator: G, classify: F, params: P) -> Result<()>
where
    T: 'static + fmt::Debug + Clone,
    G: Into<GeneratorInput<T>>,
    P: Into<Parameters<T>>,
    F: FnMut(&T) -> L,
    L: Into<Labels>,
{
    let params = QualifiedParameters::read(params.into())?;
    let values = stream_values(generator.into(), &params)?;
    let report = StatisticsReport::collect(values, classify, params.num_runs);
    for line in report.lines() {
        params.logger.log(&line);
    }
    Ok(())
}

/// Labels a classifier assigns to one value: none, one or several.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels(pub Vec<String>);

impl Labels {
    pub fn none() -> Self {
        Labels(Vec::new())
    }
}

impl From<&str> for Labels {
    fn from(label: &str) -> Self {
        Labels(vec![label.to_string()])
    }
}

impl From<String> for Labels {
    fn from(label: String) -> Self {
        Labels(vec![label])
    }
}

impl<S: Into<String>> From<Vec<S>> for Labels {
    fn from(labels: Vec<S>) -> Self {
        Labels(labels.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Labels {
    fn from(labels: [S; N]) -> Self {
        Labels(labels.into_iter().map(Into::into).collect())
    }
}

/// One row of a statistics report.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelShare {
    pub label: String,
    pub count: usize,
    /// Share of the runs, in percent, rounded to two decimals.
    pub percentage: f64,
}

impl LabelShare {
    fn formatted_percentage(&self) -> String {
        format!("{:.2}%", self.percentage)
    }
}

/// Label counts of a batch of values, most frequent label first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsReport {
    rows: Vec<LabelShare>,
}

impl StatisticsReport {
    /// Count the labels `classify` assigns to `values`. Percentages are taken
    /// against `num_runs`, so a value carrying several labels counts towards
    /// each of them.
    pub fn collect<T, I, F, L>(values: I, mut classify: F, num_runs: usize) -> Self
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T) -> L,
        L: Into<Labels>,
    {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for value in values {
            for label in classify(&value).into().0 {
                match counts.get_mut(&label) {
                    Some(count) => *count += 1,
                    None => {
                        counts.insert(label.clone(), 1);
                        order.push(label);
                    }
                }
            }
        }

        let mut rows: Vec<LabelShare> = order
            .into_iter()
            .map(|label| {
                let count = counts.get(&label).copied().unwrap_or_default();
                LabelShare {
                    percentage: round2(count as f64 * 100.0 / num_runs.max(1) as f64),
                    label,
                    count,
                }
            })
            .collect();
        // stable: equal counts keep first-seen order
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        StatisticsReport { rows }
    }

    pub fn rows(&self) -> &[LabelShare] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The report as text lines, labels padded at the end and percentages
    /// padded at the start so both columns line up.
    pub fn lines(&self) -> Vec<String> {
        let percentages: Vec<String> = self
            .rows
            .iter()
            .map(LabelShare::formatted_percentage)
            .collect();
        let label_width = self
            .rows
            .iter()
            .map(|row| row.label.chars().count())
            .max()
            .unwrap_or(0);
        let percentage_width = percentages
            .iter()
            .map(|p| p.chars().count())
            .max()
            .unwrap_or(0);

        self.rows
            .iter()
            .zip(&percentages)
            .map(|(row, percentage)| {
                format!(
                    "{:.<label_width$}..{:.>percentage_width$}",
                    row.label, percentage
                )
            })
            .collect()
    }
}

impl fmt::Display for StatisticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
