//! Weight solver configuration.

/// Configuration for [`WeightSolver`](super::WeightSolver).
///
/// # Examples
///
/// ```
/// use u_ahp::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_consistency_threshold(0.1)
///     .with_tolerance(1e-12)
///     .with_max_iterations(5_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Consistency ratio at or above which the geometric-mean estimator
    /// replaces the eigenvector weights. Conventionally 0.1.
    pub consistency_threshold: f64,

    /// L1 change between successive power-iteration vectors below which the
    /// dominant eigenvector counts as converged.
    pub tolerance: f64,

    /// Iteration cap for both the Schur decomposition and power iteration.
    pub max_iterations: usize,

    /// Relative window within which two eigenvalue magnitudes tie.
    pub tie_epsilon: f64,

    /// Imaginary part above which the dominant eigenvalue is complex.
    pub imaginary_epsilon: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            consistency_threshold: 0.1,
            tolerance: 1e-12,
            max_iterations: 10_000,
            tie_epsilon: 1e-9,
            imaginary_epsilon: 1e-9,
        }
    }
}

impl SolverConfig {
    pub fn with_consistency_threshold(mut self, threshold: f64) -> Self {
        self.consistency_threshold = threshold;
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

    pub fn with_tie_epsilon(mut self, eps: f64) -> Self {
        self.tie_epsilon = eps;
        self
    }

    pub fn with_imaginary_epsilon(mut self, eps: f64) -> Self {
        self.imaginary_epsilon = eps;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.consistency_threshold.is_finite() && self.consistency_threshold > 0.0) {
            return Err(format!(
                "consistency_threshold must be positive, got {}",
                self.consistency_threshold
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(format!("tolerance must be positive, got {}", self.tolerance));
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if !(self.tie_epsilon.is_finite() && self.tie_epsilon >= 0.0) {
            return Err(format!(
                "tie_epsilon must be non-negative, got {}",
                self.tie_epsilon
            ));
        }
        if !(self.imaginary_epsilon.is_finite() && self.imaginary_epsilon >= 0.0) {
            return Err(format!(
                "imaginary_epsilon must be non-negative, got {}",
                self.imaginary_epsilon
            ));
        }
        Ok(())
    }
}
