//! Aggregation over numeric sequences.
//!
//! Everything that totals figures goes through [`sum_of`], so ledgers,
//! ad-hoc input and report grand totals accumulate the same way.

pub mod sum;

pub use sum::*;
