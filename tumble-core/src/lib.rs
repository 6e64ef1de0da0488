//! Core functionality for Tumble property-based testing.
//!
//! This crate provides the generation engine: lazy streams, shrinkable
//! values, arbitraries and the frequency combinator, reproducible tosses,
//! replay of shrink paths, and the sampler used to inspect generators.

pub mod config;
pub mod data;
pub mod error;
pub mod frequency;
pub mod gen;
pub mod path;
pub mod property;
pub mod random;
pub mod sampler;
pub mod stream;
pub mod toss;
pub mod value;

// Re-export the main types
pub use config::*;
pub use data::*;
pub use error::*;
pub use frequency::*;
pub use gen::*;
pub use path::*;
pub use property::*;
pub use random::*;
pub use sampler::*;
pub use stream::*;
pub use toss::*;
pub use value::*;
