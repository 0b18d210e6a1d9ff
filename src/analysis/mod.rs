//! Batch statistics.
//!
//! Counts gathered after a conversion run, for the console summary.

pub mod stats;

pub use stats::*;
