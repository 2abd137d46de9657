//! Weight derivation.

use tracing::{debug, warn};

use super::config::SolverConfig;
use super::eigen::{dominant_eigenpair, EigenPair};
use super::types::{FallbackReason, WeightResult};
use crate::consistency::{consistency_index, consistency_ratio, random_index};
use crate::error::{AhpError, Result};
use crate::matrix::ComparisonMatrix;

/// Turns a complete comparison matrix into priority weights.
///
/// The solver is stateless: the same matrix always yields the same result,
/// and `solve` may be called concurrently on different matrices.
///
/// # Examples
///
/// ```
/// use u_ahp::matrix::ComparisonMatrix;
/// use u_ahp::solver::WeightSolver;
///
/// let matrix = ComparisonMatrix::from_upper_triangle(3, &[2.0, 4.0, 2.0]).unwrap();
/// let result = WeightSolver::default().solve(&matrix).unwrap();
///
/// assert!(!result.used_fallback);
/// assert!(result.consistency_ratio < 1e-6);
/// assert!((result.weights[0] - 4.0 / 7.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WeightSolver {
    config: SolverConfig,
}

impl WeightSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Derives weights, consistency ratio and fallback flag.
    ///
    /// Eigenvector weights are used while `CR` stays below the threshold;
    /// otherwise (or when the dominant eigenpair is numerically unusable)
    /// the normalized geometric mean of each row is returned instead.
    ///
    /// # Errors
    ///
    /// - [`AhpError::TooFewCriteria`] for matrices smaller than 2x2.
    /// - [`AhpError::IncompleteMatrix`] when any pair is still unjudged.
    /// - [`AhpError::DegenerateMatrix`] on a non-positive or non-finite entry.
    /// - [`AhpError::WeightNormalizationFailed`] when the eigenvector cannot
    ///   be normalized into non-negative weights.
    /// - [`AhpError::EigenDecompositionFailed`] when the Schur iteration does
    ///   not converge.
    pub fn solve(&self, matrix: &ComparisonMatrix) -> Result<WeightResult> {
        self.config.validate().map_err(AhpError::InvalidConfig)?;
        matrix.check_shape()?;

        let n = matrix.size();
        if n < 2 {
            return Err(AhpError::TooFewCriteria { count: n });
        }
        let missing = matrix.unjudged_pairs().len();
        if missing > 0 {
            return Err(AhpError::IncompleteMatrix { missing });
        }
        check_positive(matrix)?;

        let eigen = dominant_eigenpair(matrix, &self.config)?;
        let ci = consistency_index(eigen.eigenvalue, n);
        let ri = random_index(n);
        let cr = consistency_ratio(ci, n);

        let (weights, fallback_reason) = self.derive_weights(&eigen, cr, matrix)?;

        debug!(
            n,
            lambda_max = eigen.eigenvalue,
            ci,
            cr,
            used_fallback = fallback_reason.is_some(),
            "weights solved"
        );

        Ok(WeightResult {
            weights,
            consistency_ratio: cr,
            used_fallback: fallback_reason.is_some(),
            fallback_reason,
            lambda_max: eigen.eigenvalue,
            consistency_index: ci,
            random_index: ri,
        })
    }
}

impl WeightSolver {
    /// Picks eigenvector or geometric-mean weights for a solved eigenpair.
    ///
    /// Fallback reasons are checked in order: complex `λmax`, unconverged
    /// power iteration, then `cr >= consistency_threshold`.
    fn derive_weights(
        &self,
        eigen: &EigenPair,
        cr: f64,
        matrix: &ComparisonMatrix,
    ) -> Result<(Vec<f64>, Option<FallbackReason>)> {
        let fallback_reason = if eigen.is_complex(self.config.imaginary_epsilon) {
            warn!(
                re = eigen.eigenvalue,
                im = eigen.imaginary,
                "dominant eigenvalue is complex; using geometric mean"
            );
            Some(FallbackReason::ComplexDominantEigenvalue)
        } else if !eigen.converged {
            warn!(
                iterations = eigen.iterations,
                "power iteration did not converge; using geometric mean"
            );
            Some(FallbackReason::EigenvectorNotConverged)
        } else if cr >= self.config.consistency_threshold {
            Some(FallbackReason::Inconsistent)
        } else {
            None
        };

        let weights = match fallback_reason {
            Some(_) => geometric_mean_weights(matrix)?,
            None => normalize_eigenvector(&eigen.vector, matrix)?,
        };
        Ok((weights, fallback_reason))
    }
}

/// Normalized geometric mean of each row: `g_i = (prod_j M[i][j])^(1/n)`,
/// `w_i = g_i / sum(g)`.
///
/// Works on any positive matrix, judged or not.
pub fn geometric_mean_weights(matrix: &ComparisonMatrix) -> Result<Vec<f64>> {
    matrix.check_shape()?;
    check_positive(matrix)?;
    let n = matrix.size();
    if n == 0 {
        return Err(AhpError::TooFewCriteria { count: 0 });
    }

    // Mean of logs keeps large products from overflowing.
    let means: Vec<f64> = (0..n)
        .map(|i| {
            let log_sum: f64 = matrix.row(i).iter().map(|v| v.ln()).sum();
            (log_sum / n as f64).exp()
        })
        .collect();
    let total: f64 = means.iter().sum();
    Ok(means.iter().map(|g| g / total).collect())
}

fn check_positive(matrix: &ComparisonMatrix) -> Result<()> {
    match matrix.first_non_positive() {
        Some((row, col, value)) => Err(AhpError::DegenerateMatrix {
            row,
            col,
            value,
            matrix: matrix.clone(),
        }),
        None => Ok(()),
    }
}

/// `w_i / sum(w)`, rejecting anything that is not a valid distribution.
fn normalize_eigenvector(vector: &[f64], matrix: &ComparisonMatrix) -> Result<Vec<f64>> {
    let total: f64 = vector.iter().sum();
    let weights: Vec<f64> = vector.iter().map(|w| w / total).collect();
    let valid = total.is_finite()
        && total != 0.0
        && weights.iter().all(|w| w.is_finite() && *w >= 0.0);
    if !valid {
        return Err(AhpError::WeightNormalizationFailed {
            weights,
            matrix: matrix.clone(),
        });
    }
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Judgment, PairwiseSession};
    use proptest::prelude::*;

    fn solve(matrix: &ComparisonMatrix) -> Result<WeightResult> {
        WeightSolver::default().solve(matrix)
    }

    #[test]
    fn test_consistent_three() {
        let m = ComparisonMatrix::from_upper_triangle(3, &[2.0, 4.0, 2.0]).unwrap();
        let r = solve(&m).unwrap();

        assert!(r.consistency_ratio < 1e-6, "CR = {}", r.consistency_ratio);
        assert!(!r.used_fallback);
        assert_eq!(r.fallback_reason, None);
        let expected = [0.571, 0.286, 0.143];
        for (w, e) in r.weights.iter().zip(expected) {
            assert!((w - e).abs() < 1e-3, "got {w}, expected {e}");
        }
    }

    #[test]
    fn test_inconsistent_three_uses_geometric_mean() {
        let m = ComparisonMatrix::from_upper_triangle(3, &[9.0, 1.0, 9.0]).unwrap();
        let r = solve(&m).unwrap();

        assert!(r.consistency_ratio >= 0.1, "CR = {}", r.consistency_ratio);
        assert!(r.used_fallback);
        assert_eq!(r.fallback_reason, Some(FallbackReason::Inconsistent));

        let rows = m.to_rows();
        let g: Vec<f64> = rows
            .iter()
            .map(|row| row.iter().product::<f64>().powf(1.0 / 3.0))
            .collect();
        let total: f64 = g.iter().sum();
        for (w, gi) in r.weights.iter().zip(&g) {
            assert!((w - gi / total).abs() < 1e-12);
        }
    }

    #[test]
    fn test_two_criteria_cr_zero() {
        let m = ComparisonMatrix::from_upper_triangle(2, &[9.0]).unwrap();
        let r = solve(&m).unwrap();
        assert_eq!(r.consistency_ratio, 0.0);
        assert_eq!(r.random_index, 0.0);
        assert!(!r.used_fallback);
        assert!((r.weights[0] - 0.9).abs() < 1e-9);
        assert!((r.weights[1] - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_eleven_criteria_uses_clamped_random_index() {
        // Consistent matrix built from weights 1..=11.
        let n = 11;
        let upper: Vec<f64> = crate::matrix::pair_order(n)
            .into_iter()
            .map(|(i, j)| (i + 1) as f64 / (j + 1) as f64)
            .collect();
        let m = ComparisonMatrix::from_upper_triangle(n, &upper).unwrap();
        let r = solve(&m).unwrap();

        assert_eq!(r.random_index, 1.49);
        assert!(r.consistency_ratio < 1e-6);
        assert!(!r.used_fallback);
        let total: f64 = (1..=n).map(|k| k as f64).sum();
        for (i, w) in r.weights.iter().enumerate() {
            assert!((w - (i + 1) as f64 / total).abs() < 1e-6);
        }
    }

    #[test]
    fn test_incomplete_matrix_rejected() {
        let mut session = PairwiseSession::new(["a", "b", "c"]).unwrap();
        session.record(Judgment::Strong).unwrap();
        let err = solve(&session.matrix_snapshot()).unwrap_err();
        assert_eq!(err, AhpError::IncompleteMatrix { missing: 2 });
        assert!(err.is_usage_error());
    }

    #[test]
    fn test_too_few_criteria() {
        let m = ComparisonMatrix::neutral(1);
        assert_eq!(solve(&m), Err(AhpError::TooFewCriteria { count: 1 }));
    }

    #[test]
    fn test_invalid_config() {
        let solver = WeightSolver::new(SolverConfig::default().with_max_iterations(0));
        let m = ComparisonMatrix::from_upper_triangle(2, &[3.0]).unwrap();
        assert!(matches!(solver.solve(&m), Err(AhpError::InvalidConfig(_))));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let m = ComparisonMatrix::from_upper_triangle(3, &[9.0, 1.0, 9.0]).unwrap();
        let cr = solve(&m).unwrap().consistency_ratio;
        let solver = WeightSolver::new(SolverConfig::default().with_consistency_threshold(cr));
        assert!(solver.solve(&m).unwrap().used_fallback);
        let solver =
            WeightSolver::new(SolverConfig::default().with_consistency_threshold(cr * 1.01));
        assert!(!solver.solve(&m).unwrap().used_fallback);
    }

    #[test]
    fn test_unconverged_power_iteration_falls_back() {
        let m = ComparisonMatrix::from_upper_triangle(4, &[3.0, 5.0, 7.0, 3.0, 5.0, 3.0]).unwrap();
        let solver = WeightSolver::new(SolverConfig::default().with_max_iterations(1));
        // Schur may also give up under a single iteration; both outcomes are
        // acceptable, but a result must never carry eigenvector weights.
        match solver.solve(&m) {
            Ok(r) => {
                assert!(r.used_fallback);
                assert_eq!(r.fallback_reason, Some(FallbackReason::EigenvectorNotConverged));
            }
            Err(err) => assert!(matches!(err, AhpError::EigenDecompositionFailed { .. })),
        }
    }

    #[test]
    fn test_geometric_mean_on_partial_matrix() {
        let mut m = ComparisonMatrix::neutral(3);
        m.set_judgment(0, 1, 8.0).unwrap();
        let w = geometric_mean_weights(&m).unwrap();
        // Row products: 8, 1/8, 1 -> cube roots 2, 1/2, 1.
        assert!((w[0] - 2.0 / 3.5).abs() < 1e-12);
        assert!((w[1] - 0.5 / 3.5).abs() < 1e-12);
        assert!((w[2] - 1.0 / 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_geometric_mean_empty_matrix() {
        assert_eq!(
            geometric_mean_weights(&ComparisonMatrix::neutral(0)),
            Err(AhpError::TooFewCriteria { count: 0 })
        );
    }

    #[test]
    fn test_normalize_eigenvector_rejects_mixed_signs() {
        let m = ComparisonMatrix::neutral(3);
        let err = normalize_eigenvector(&[0.5, -0.2, 0.7], &m).unwrap_err();
        assert!(matches!(err, AhpError::WeightNormalizationFailed { .. }));
        assert!(err.is_numerical_error());
    }

    #[test]
    fn test_normalize_eigenvector_accepts_uniform_negative() {
        let m = ComparisonMatrix::neutral(2);
        let w = normalize_eigenvector(&[-0.75, -0.25], &m).unwrap();
        assert!((w[0] - 0.75).abs() < 1e-15);
        assert!((w[1] - 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_solve_is_deterministic() {
        let m = ComparisonMatrix::from_upper_triangle(4, &[3.0, 5.0, 1.0, 7.0, 1.0 / 3.0, 9.0])
            .unwrap();
        assert_eq!(solve(&m).unwrap(), solve(&m).unwrap());
    }

    #[test]
    fn test_session_to_solver() {
        let mut session = PairwiseSession::new(["price", "quality", "delivery"]).unwrap();
        session.record(Judgment::Moderate).unwrap();
        session.record(Judgment::Strong).unwrap();
        session.record(Judgment::Moderate).unwrap();
        assert!(session.is_complete());

        let r = solve(&session.matrix_snapshot()).unwrap();
        assert_eq!(r.weights.len(), 3);
        assert_eq!(r.ranking(), vec![0, 1, 2]);
        assert!(r.consistency_ratio < 0.1);
    }

    fn pair(eigenvalue: f64, imaginary: f64, vector: Vec<f64>) -> EigenPair {
        EigenPair {
            eigenvalue,
            imaginary,
            vector,
            iterations: 3,
            converged: true,
        }
    }

    #[test]
    fn test_complex_eigenvalue_falls_back() {
        let m = ComparisonMatrix::from_upper_triangle(3, &[2.0, 4.0, 2.0]).unwrap();
        let eigen = pair(3.0, 0.5, vec![4.0 / 7.0, 2.0 / 7.0, 1.0 / 7.0]);
        let (weights, reason) = WeightSolver::default()
            .derive_weights(&eigen, 0.0, &m)
            .unwrap();
        assert_eq!(reason, Some(FallbackReason::ComplexDominantEigenvalue));
        assert_eq!(weights, geometric_mean_weights(&m).unwrap());
    }

    #[test]
    fn test_fallback_reason_order() {
        let m = ComparisonMatrix::from_upper_triangle(3, &[9.0, 1.0, 9.0]).unwrap();
        let solver = WeightSolver::default();

        let mut eigen = pair(3.5, 0.5, vec![0.4, 0.3, 0.3]);
        eigen.converged = false;
        let (_, reason) = solver.derive_weights(&eigen, 0.9, &m).unwrap();
        assert_eq!(reason, Some(FallbackReason::ComplexDominantEigenvalue));

        eigen.imaginary = 0.0;
        let (_, reason) = solver.derive_weights(&eigen, 0.9, &m).unwrap();
        assert_eq!(reason, Some(FallbackReason::EigenvectorNotConverged));

        eigen.converged = true;
        let (_, reason) = solver.derive_weights(&eigen, 0.9, &m).unwrap();
        assert_eq!(reason, Some(FallbackReason::Inconsistent));

        let (weights, reason) = solver.derive_weights(&eigen, 0.05, &m).unwrap();
        assert_eq!(reason, None);
        assert_eq!(weights, vec![0.4, 0.3, 0.3]);
    }

    #[test]
    fn test_mixed_sign_eigenvector_fails_normalization() {
        let m = ComparisonMatrix::from_upper_triangle(3, &[2.0, 4.0, 2.0]).unwrap();
        let eigen = pair(3.0, 0.0, vec![0.8, -0.1, 0.3]);
        let err = WeightSolver::default()
            .derive_weights(&eigen, 0.0, &m)
            .unwrap_err();
        match err {
            AhpError::WeightNormalizationFailed { weights, matrix } => {
                assert_eq!(weights.len(), 3);
                assert_eq!(matrix, m);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_solve_rejects_degenerate_matrix() {
        let m = ComparisonMatrix::from_parts_unchecked(
            3,
            vec![1.0, -2.0, 1.0, -0.5, 1.0, 1.0, 1.0, 1.0, 1.0],
            vec![true; 3],
        );
        let err = solve(&m).unwrap_err();
        assert!(matches!(
            err,
            AhpError::DegenerateMatrix { row: 0, col: 1, .. }
        ));
        assert!(err.is_numerical_error());

        let m = ComparisonMatrix::from_parts_unchecked(
            2,
            vec![1.0, 1.0, f64::NAN, 1.0],
            vec![true],
        );
        match solve(&m) {
            Err(AhpError::DegenerateMatrix { row, col, value, .. }) => {
                assert_eq!((row, col), (1, 0));
                assert!(value.is_nan());
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_solve_rejects_broken_mask() {
        let m = ComparisonMatrix::from_parts_unchecked(3, vec![1.0; 9], Vec::new());
        assert_eq!(
            solve(&m),
            Err(AhpError::DimensionMismatch {
                expected: 3,
                got: 0
            })
        );
    }

    fn scale_value() -> impl Strategy<Value = f64> {
        prop::sample::select(vec![1.0, 3.0, 5.0, 7.0, 9.0, 1.0 / 3.0, 1.0 / 5.0, 1.0 / 7.0, 1.0 / 9.0])
    }

    proptest! {
        #[test]
        fn prop_weights_form_distribution(
            n in 2usize..9,
            values in prop::collection::vec(scale_value(), 36),
        ) {
            let upper = &values[..crate::matrix::pair_count(n)];
            let m = ComparisonMatrix::from_upper_triangle(n, upper).unwrap();
            let r = solve(&m).unwrap();

            prop_assert_eq!(r.weights.len(), n);
            prop_assert!((r.weights.iter().sum::<f64>() - 1.0).abs() < 1e-6);
            prop_assert!(r.weights.iter().all(|&w| w >= 0.0));
            prop_assert!(r.consistency_ratio >= 0.0);
            prop_assert_eq!(r.used_fallback, r.fallback_reason.is_some());
        }
    }
}
