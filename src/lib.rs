//! Analytic Hierarchy Process (AHP) engine.
//!
//! Derives relative priority weights for a fixed set of decision criteria
//! from pairwise judgments of importance:
//!
//! - **Session**: [`PairwiseSession`](session::PairwiseSession) walks every
//!   unordered criterion pair once, in lexicographic order, records a
//!   judgment on the 1/3/5/7/9 scale, and supports undo.
//! - **Matrix**: [`ComparisonMatrix`](matrix::ComparisonMatrix) is the
//!   reciprocal matrix the session produces.
//! - **Solver**: [`WeightSolver`](solver::WeightSolver) turns a complete
//!   matrix into weights via the dominant eigenvector, computes the
//!   consistency ratio, and falls back to row geometric means when the
//!   judgments are too inconsistent.
//! - **Consistency**: Random Index table, CI / CR formulas and a
//!   Monte-Carlo Random Index estimator.
//!
//! # Example
//!
//! ```
//! use u_ahp::session::{Judgment, PairwiseSession};
//! use u_ahp::solver::WeightSolver;
//!
//! let mut session = PairwiseSession::new(["cost", "quality", "risk"]).unwrap();
//! session.record(Judgment::Moderate).unwrap(); // cost vs quality
//! session.record(Judgment::Strong).unwrap(); // cost vs risk
//! session.record(Judgment::Moderate).unwrap(); // quality vs risk
//! assert!(session.is_complete());
//!
//! let result = WeightSolver::default()
//!     .solve(&session.matrix_snapshot())
//!     .unwrap();
//! assert!((result.weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! ```
//!
//! # Architecture
//!
//! Data flows one way: session -> matrix -> solver. The session knows
//! nothing about the solver beyond producing a matrix. Rendering, progress
//! display and persistence belong to the caller.

pub mod consistency;
pub mod error;
pub mod matrix;
pub mod session;
pub mod solver;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{AhpError, Result};
