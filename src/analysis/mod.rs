//! Result accumulation and descriptive statistics.

pub mod aggregator;
pub mod stats;

pub use aggregator::{Aggregator, FailureKind, Observation};
pub use stats::Summary;
