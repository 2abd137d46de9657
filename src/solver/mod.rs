//! Priority weight solver.
//!
//! Derives criterion weights from a complete [`ComparisonMatrix`]:
//!
//! 1. Select the largest-magnitude eigenvalue `λmax` and its eigenvector.
//! 2. Compute `CI = (λmax - n) / (n - 1)` and `CR = CI / RI(n)`.
//! 3. If `CR < 0.1`, normalize the eigenvector into weights. Otherwise fall
//!    back to the normalized row geometric means.
//!
//! A complex dominant eigenvalue or a power iteration that does not
//! converge also triggers the geometric-mean fallback.
//!
//! # References
//!
//! - Saaty (1980), "The Analytic Hierarchy Process"
//! - Crawford & Williams (1985), "A note on the analysis of subjective
//!   judgment matrices"
//!
//! [`ComparisonMatrix`]: crate::matrix::ComparisonMatrix

mod config;
pub(crate) mod eigen;
mod runner;
mod types;

pub use config::SolverConfig;
pub use eigen::{dominant_eigenpair, EigenPair};
pub use runner::{geometric_mean_weights, WeightSolver};
pub use types::{FallbackReason, WeightResult};
