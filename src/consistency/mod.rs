//! Consistency diagnostics.
//!
//! - **Consistency Index**: `CI = (λmax - n) / (n - 1)`.
//! - **Random Index**: the mean CI of random reciprocal matrices of the
//!   same size, read from a fixed table (clamped at `n = 10`).
//! - **Consistency Ratio**: `CR = CI / RI`, defined as 0 for `n <= 2`.
//!
//! `CR >= 0.1` conventionally flags judgments too inconsistent to trust.
//!
//! # References
//!
//! - Saaty (1980), "The Analytic Hierarchy Process"
//! - Alonso & Lamata (2006), "Consistency in the Analytic Hierarchy Process:
//!   a new approach"

mod index;
mod simulation;

pub use index::{consistency_index, consistency_ratio, random_index, RANDOM_INDEX};
pub use simulation::{RandomIndexEstimate, RandomIndexSimulation, SimulationConfig};
