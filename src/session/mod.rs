//! Pairwise judgment session.
//!
//! A [`PairwiseSession`] visits every unordered pair of criteria once, in
//! lexicographic order, collecting one [`Judgment`] per pair on the closed
//! 1/3/5/7/9 scale. Judgments can be undone one step at a time. The
//! resulting [`ComparisonMatrix`](crate::matrix::ComparisonMatrix) is handed
//! to the [`WeightSolver`](crate::solver::WeightSolver) once the session is
//! complete.
//!
//! # Concurrency
//!
//! A session is a plain value with a single mutator. Hosts sharing one
//! across threads must wrap it in a mutex so that each `record`/`undo`
//! runs as one critical section.

mod state;
mod types;

pub use state::PairwiseSession;
pub use types::{Judgment, JudgmentStep};
