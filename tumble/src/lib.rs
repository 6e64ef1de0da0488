//! Tumble property-based testing library.
//!
//! This is the main entry point for the Tumble library. It re-exports the
//! generation engine of `tumble-core`: build generators with [`Gen`], combine
//! them with [`Gen::frequency_with`], and inspect what they produce with
//! [`sample`] and [`statistics`].
//!
//! ```
//! use tumble::*;
//!
//! let gen = Gen::frequency(vec![
//!     WeightedEntry::new(1, Gen::constant(0)),
//!     WeightedEntry::new(4, Gen::int_range(1, 100)),
//! ])?;
//! let values = sample(&gen, Parameters::new().with_num_runs(10).with_seed(42))?;
//! assert_eq!(values.len(), 10);
//! # Ok::<(), TumbleError>(())
//! ```

pub use tumble_core::*;
