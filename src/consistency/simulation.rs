//! Monte-Carlo estimation of the Random Index.
//!
//! Saaty defines `RI(n)` as the mean Consistency Index of random reciprocal
//! matrices whose upper entries are drawn uniformly from the 17-value scale
//! `{1/9, ..., 1/2, 1, 2, ..., 9}`. The fixed table in
//! [`RANDOM_INDEX`](super::RANDOM_INDEX) is what consistency ratios use;
//! this estimator is a diagnostic for checking or extending it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use super::index::{consistency_index, random_index};
use crate::error::{AhpError, Result};
use crate::matrix::{pair_order, ComparisonMatrix};
use crate::solver::eigen::power_iteration;

/// Saaty's extended scale, reciprocals included.
const SCALE: [f64; 17] = [
    1.0 / 9.0,
    1.0 / 8.0,
    1.0 / 7.0,
    1.0 / 6.0,
    1.0 / 5.0,
    1.0 / 4.0,
    1.0 / 3.0,
    1.0 / 2.0,
    1.0,
    2.0,
    3.0,
    4.0,
    5.0,
    6.0,
    7.0,
    8.0,
    9.0,
];

/// Configuration for [`RandomIndexSimulation`].
///
/// # Examples
///
/// ```
/// use u_ahp::consistency::SimulationConfig;
///
/// let config = SimulationConfig::default()
///     .with_trials(2_000)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Number of random matrices averaged.
    pub trials: usize,

    /// Power-iteration tolerance for each matrix.
    pub tolerance: f64,

    /// Power-iteration cap for each matrix.
    pub max_iterations: usize,

    /// Whether to run trials in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature. Results are identical
    /// either way since every trial derives its own RNG from the seed.
    pub parallel: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 10_000,
            tolerance: 1e-10,
            max_iterations: 1_000,
            parallel: false,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_trials(mut self, n: usize) -> Self {
        self.trials = n;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.trials == 0 {
            return Err("trials must be at least 1".into());
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(format!("tolerance must be positive, got {}", self.tolerance));
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        Ok(())
    }
}

/// Outcome of a Random Index simulation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomIndexEstimate {
    /// Matrix size.
    pub size: usize,

    /// Estimated Random Index (mean CI over all trials).
    pub random_index: f64,

    /// Sample standard deviation of the CI.
    pub std_dev: f64,

    /// Number of matrices averaged.
    pub trials: usize,

    /// Trials whose power iteration hit the iteration cap.
    pub unconverged: usize,

    /// Value from the fixed table for the same size.
    pub table_value: f64,
}

/// Estimates Random Index values by simulation.
pub struct RandomIndexSimulation {
    config: SimulationConfig,
}

impl RandomIndexSimulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Runs the simulation for matrices of size `n`.
    pub fn run(&self, n: usize) -> Result<RandomIndexEstimate> {
        self.config.validate().map_err(AhpError::InvalidConfig)?;
        if n < 2 {
            return Err(AhpError::TooFewCriteria { count: n });
        }

        let base_seed = self.config.seed.unwrap_or_else(rand::random);
        let samples = self.sample_all(n, base_seed);

        let trials = samples.len();
        let unconverged = samples.iter().filter(|(_, converged)| !converged).count();
        let mean = samples.iter().map(|(ci, _)| ci).sum::<f64>() / trials as f64;
        let variance = if trials > 1 {
            samples
                .iter()
                .map(|(ci, _)| (ci - mean).powi(2))
                .sum::<f64>()
                / (trials - 1) as f64
        } else {
            0.0
        };

        debug!(
            n,
            trials,
            random_index = mean,
            table = random_index(n),
            "random index simulated"
        );

        Ok(RandomIndexEstimate {
            size: n,
            random_index: mean,
            std_dev: variance.sqrt(),
            trials,
            unconverged,
            table_value: random_index(n),
        })
    }

    #[cfg(feature = "parallel")]
    fn sample_all(&self, n: usize, base_seed: u64) -> Vec<(f64, bool)> {
        if self.config.parallel {
            (0..self.config.trials)
                .into_par_iter()
                .map(|trial| self.sample(n, base_seed, trial))
                .collect()
        } else {
            (0..self.config.trials)
                .map(|trial| self.sample(n, base_seed, trial))
                .collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn sample_all(&self, n: usize, base_seed: u64) -> Vec<(f64, bool)> {
        (0..self.config.trials)
            .map(|trial| self.sample(n, base_seed, trial))
            .collect()
    }

    /// CI of one random reciprocal matrix, plus whether it converged.
    fn sample(&self, n: usize, base_seed: u64, trial: usize) -> (f64, bool) {
        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(trial as u64));
        let matrix = random_reciprocal_matrix(n, &mut rng);
        let power = power_iteration(
            &matrix.to_dmatrix(),
            self.config.tolerance,
            self.config.max_iterations,
        );
        (consistency_index(power.eigenvalue, n), power.converged)
    }
}

/// Random fully judged reciprocal matrix over Saaty's 17-value scale.
fn random_reciprocal_matrix<R: Rng>(n: usize, rng: &mut R) -> ComparisonMatrix {
    let mut matrix = ComparisonMatrix::neutral(n);
    for (k, (i, j)) in pair_order(n).into_iter().enumerate() {
        let value = SCALE[rng.random_range(0..SCALE.len())];
        matrix.put(k, i, j, value);
    }
    matrix
}
