//! Sequence prediction by random program synthesis.
//!
//! Given a target sequence of 16-bit values, `seqvm` generates random
//! programs for a small eight-tape virtual machine, keeps the one whose
//! output best matches the target, and runs it further to predict what
//! comes next.

pub mod artifact;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod report;
pub mod search;
pub mod span;
pub mod target;
pub mod vm;

pub use config::SearchConfig;
pub use error::{Error, Result};
pub use search::{predict, Prediction};
