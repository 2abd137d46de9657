//! Dominant eigenpair of a positive reciprocal matrix.
//!
//! The dominant eigenvalue is selected from the full (complex) spectrum
//! obtained by a real Schur decomposition: largest magnitude wins, ties go
//! to the candidate with non-negative real part. Its eigenvector is then
//! obtained by power iteration, which converges to the Perron vector for a
//! strictly positive matrix.

use nalgebra::{Complex, DMatrix, DVector};
use tracing::trace;

use super::config::SolverConfig;
use crate::error::{AhpError, Result};
use crate::matrix::ComparisonMatrix;

/// Dominant eigenvalue and its eigenvector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EigenPair {
    /// Real part of the dominant eigenvalue (`λmax`).
    pub eigenvalue: f64,

    /// Imaginary part of the dominant eigenvalue. Zero for well-formed input.
    pub imaginary: f64,

    /// Power-iteration eigenvector, scaled to unit L1 norm.
    pub vector: Vec<f64>,

    /// Power iterations performed.
    pub iterations: usize,

    /// Whether power iteration met the tolerance.
    pub converged: bool,
}

impl EigenPair {
    /// True when the selected eigenvalue has a non-negligible imaginary part.
    pub fn is_complex(&self, eps: f64) -> bool {
        self.imaginary.abs() > eps * self.eigenvalue.abs().max(1.0)
    }
}

/// Result of running power iteration on a dense matrix.
#[derive(Debug, Clone)]
pub(crate) struct PowerIteration {
    pub vector: Vec<f64>,
    /// Rayleigh-style estimate `sum(A w)` for `w` with unit L1 norm.
    pub eigenvalue: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Computes the dominant eigenpair of a comparison matrix.
///
/// The matrix is expected to be positive; callers that have not checked
/// positivity should do so first.
pub fn dominant_eigenpair(matrix: &ComparisonMatrix, config: &SolverConfig) -> Result<EigenPair> {
    let dense = matrix.to_dmatrix();
    let lambda = dominant_eigenvalue(&dense, config).ok_or_else(|| {
        AhpError::EigenDecompositionFailed {
            matrix: matrix.clone(),
        }
    })?;
    let power = power_iteration(&dense, config.tolerance, config.max_iterations);

    Ok(EigenPair {
        eigenvalue: lambda.re,
        imaginary: lambda.im,
        vector: power.vector,
        iterations: power.iterations,
        converged: power.converged,
    })
}

/// Selects the largest-magnitude eigenvalue from the full spectrum.
///
/// Returns `None` when the Schur iteration does not converge.
pub(crate) fn dominant_eigenvalue(
    dense: &DMatrix<f64>,
    config: &SolverConfig,
) -> Option<Complex<f64>> {
    let schur = dense
        .clone()
        .try_schur(f64::EPSILON, config.max_iterations)?;
    let spectrum = schur.complex_eigenvalues();
    select_dominant(spectrum.as_slice(), config.tie_epsilon)
}

/// Largest magnitude first; within the tie window prefer a non-negative real
/// part, then the larger real part.
pub(crate) fn select_dominant(spectrum: &[Complex<f64>], tie_epsilon: f64) -> Option<Complex<f64>> {
    let max_norm = spectrum
        .iter()
        .map(|z| z.norm())
        .filter(|norm| norm.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if !max_norm.is_finite() {
        return None;
    }
    let window = tie_epsilon * max_norm.max(1.0);

    spectrum
        .iter()
        .copied()
        .filter(|z| z.norm().is_finite() && max_norm - z.norm() <= window)
        .max_by(|a, b| {
            let a_key = (a.re >= 0.0, a.re, -a.im.abs());
            let b_key = (b.re >= 0.0, b.re, -b.im.abs());
            a_key
                .partial_cmp(&b_key)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Power iteration from the uniform vector, renormalizing to unit L1 norm
/// each step. Stops when the L1 change drops to `tolerance`.
pub(crate) fn power_iteration(
    dense: &DMatrix<f64>,
    tolerance: f64,
    max_iterations: usize,
) -> PowerIteration {
    let n = dense.nrows();
    let mut v = DVector::from_element(n, 1.0 / n as f64);
    let mut eigenvalue = f64::NAN;
    let mut l1_delta = f64::INFINITY;

    for iter in 1..=max_iterations {
        let mut next = dense * &v;
        let sum: f64 = next.iter().sum();
        if sum == 0.0 || !sum.is_finite() {
            return PowerIteration {
                vector: v.iter().copied().collect(),
                eigenvalue: sum,
                iterations: iter,
                converged: false,
            };
        }
        // `v` has unit L1 norm, so the growth factor estimates `λmax`.
        eigenvalue = sum;
        next /= sum;

        l1_delta = (0..n).map(|i| (next[i] - v[i]).abs()).sum();
        v = next;
        if l1_delta <= tolerance {
            trace!(iterations = iter, l1_delta, "power iteration converged");
            return PowerIteration {
                vector: v.iter().copied().collect(),
                eigenvalue,
                iterations: iter,
                converged: true,
            };
        }
    }

    trace!(max_iterations, l1_delta, "power iteration hit the iteration cap");
    PowerIteration {
        vector: v.iter().copied().collect(),
        eigenvalue,
        iterations: max_iterations,
        converged: false,
    }
}
