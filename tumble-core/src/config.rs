//! Run configuration and its resolution.
//!
//! Every sampling call resolves its configuration once: a value given to the
//! call wins, otherwise the process-wide default set through
//! [`configure_global`] applies, otherwise the built-in default. Components
//! below the sampler only ever see the resolved [`QualifiedParameters`].

use crate::{error::*, path::*, random::*};
use rand::Rng;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Number of values generated when nothing else is configured.
pub const DEFAULT_NUM_RUNS: usize = 100;

/// Sink receiving the report lines, one line per call.
#[derive(Clone)]
pub struct Logger(Arc<dyn Fn(&str) + Send + Sync>);

impl Logger {
    /// Create a logger from a line callback.
    pub fn new<F>(sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Logger(Arc::new(sink))
    }

    /// Logger printing every line to standard output.
    pub fn stdout() -> Self {
        Logger::new(|line| println!("{line}"))
    }

    /// Write one line.
    pub fn log(&self, line: &str) {
        (self.0)(line)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::stdout()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Logger")
    }
}

/// Process-wide defaults. Every field is optional; unset fields fall back to
/// the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct GlobalParameters {
    pub num_runs: Option<usize>,
    pub seed: Option<u64>,
    pub random_type: Option<RandomType>,
    pub path: Option<String>,
    pub unbiased: Option<bool>,
    pub logger: Option<Logger>,
}

impl GlobalParameters {
    const EMPTY: GlobalParameters = GlobalParameters {
        num_runs: None,
        seed: None,
        random_type: None,
        path: None,
        unbiased: None,
        logger: None,
    };

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_runs(mut self, num_runs: usize) -> Self {
        self.num_runs = Some(num_runs);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_random_type(mut self, random_type: RandomType) -> Self {
        self.random_type = Some(random_type);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_unbiased(mut self, unbiased: bool) -> Self {
        self.unbiased = Some(unbiased);
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }
}

static GLOBAL_PARAMETERS: RwLock<GlobalParameters> = RwLock::new(GlobalParameters::EMPTY);

/// Replace the process-wide defaults.
pub fn configure_global(parameters: GlobalParameters) {
    let mut global = GLOBAL_PARAMETERS
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *global = parameters;
}

/// Snapshot of the process-wide defaults.
pub fn read_configure_global() -> GlobalParameters {
    GLOBAL_PARAMETERS
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Clear the process-wide defaults.
pub fn reset_configure_global() {
    configure_global(GlobalParameters::EMPTY);
}

/// Per-call configuration. Unset fields fall back to the process-wide
/// defaults.
#[derive(Debug, Clone)]
pub struct Parameters<T> {
    pub num_runs: Option<usize>,
    pub seed: Option<u64>,
    pub random_type: Option<RandomType>,
    pub path: Option<String>,
    pub examples: Option<Vec<T>>,
    pub unbiased: Option<bool>,
    pub logger: Option<Logger>,
}

impl<T> Default for Parameters<T> {
    fn default() -> Self {
        Parameters {
            num_runs: None,
            seed: None,
            random_type: None,
            path: None,
            examples: None,
            unbiased: None,
            logger: None,
        }
    }
}

impl<T> Parameters<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_runs(mut self, num_runs: usize) -> Self {
        self.num_runs = Some(num_runs);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_random_type(mut self, random_type: RandomType) -> Self {
        self.random_type = Some(random_type);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_examples(mut self, examples: Vec<T>) -> Self {
        self.examples = Some(examples);
        self
    }

    pub fn with_unbiased(mut self, unbiased: bool) -> Self {
        self.unbiased = Some(unbiased);
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }
}

/// A bare number of runs.
impl<T> From<usize> for Parameters<T> {
    fn from(num_runs: usize) -> Self {
        Parameters::new().with_num_runs(num_runs)
    }
}

/// Fully resolved configuration of one sampling call.
#[derive(Debug, Clone)]
pub struct QualifiedParameters<T> {
    pub num_runs: usize,
    pub seed: u64,
    pub random_type: RandomType,
    pub path: ReplayPath,
    pub examples: Vec<T>,
    pub unbiased: bool,
    pub logger: Logger,
}

impl<T> QualifiedParameters<T> {
    /// Resolve `overrides` against `defaults`, then against the built-in
    /// defaults. The seed is drawn at random when neither provides one.
    pub fn resolve(defaults: &GlobalParameters, overrides: Parameters<T>) -> Result<Self> {
        let num_runs = overrides
            .num_runs
            .or(defaults.num_runs)
            .unwrap_or(DEFAULT_NUM_RUNS);
        if num_runs == 0 {
            return Err(TumbleError::config("numRuns must be strictly positive"));
        }
        let path = match overrides.path.as_ref().or(defaults.path.as_ref()) {
            Some(text) => text.parse()?,
            None => ReplayPath::default(),
        };
        let seed = overrides
            .seed
            .or(defaults.seed)
            .unwrap_or_else(|| rand::thread_rng().gen());

        Ok(QualifiedParameters {
            num_runs,
            seed,
            random_type: overrides
                .random_type
                .or(defaults.random_type)
                .unwrap_or_default(),
            path,
            examples: overrides.examples.unwrap_or_default(),
            unbiased: overrides.unbiased.or(defaults.unbiased).unwrap_or(false),
            logger: overrides
                .logger
                .or_else(|| defaults.logger.clone())
                .unwrap_or_default(),
        })
    }

    /// Resolve `overrides` against the current process-wide defaults.
    pub fn read(overrides: Parameters<T>) -> Result<Self> {
        Self::resolve(&read_configure_global(), overrides)
    }
}
