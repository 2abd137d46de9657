//! Reciprocal comparison matrices and the canonical pair order.
//!
//! A [`ComparisonMatrix`] holds the pairwise ratios collected for `n`
//! criteria. The helpers in this module fix the order in which unordered
//! pairs are visited, which every other component relies on.
//!
//! # References
//!
//! Saaty (1980), "The Analytic Hierarchy Process"

mod comparison;
mod pairs;

pub use comparison::ComparisonMatrix;
pub use pairs::{pair_at, pair_count, pair_index, pair_order};
