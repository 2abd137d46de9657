//! Error type shared by every component of the crate.
//!
//! Usage errors (`InvalidJudgmentValue`, `SessionComplete`, `NoHistory`,
//! `IncompleteMatrix`) mean the caller broke the contract. Numerical errors
//! (`DegenerateMatrix`, `WeightNormalizationFailed`,
//! `EigenDecompositionFailed`) carry the offending matrix for diagnosis.
//! Nothing here is retryable: every operation is deterministic.

use thiserror::Error;

use crate::matrix::ComparisonMatrix;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AhpError>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AhpError {
    #[error("judgment value {value} is not on the scale {{1, 3, 5, 7, 9}}")]
    InvalidJudgmentValue { value: i64 },
    #[error("judgment value {value} is not an integer")]
    NonIntegerJudgment { value: f64 },
    #[error("every pair has already been judged")]
    SessionComplete,
    #[error("no judgment has been recorded yet")]
    NoHistory,
    #[error("matrix is incomplete: {missing} pair(s) not judged")]
    IncompleteMatrix { missing: usize },

    #[error("at least two criteria are required, got {count}")]
    TooFewCriteria { count: usize },
    #[error("duplicate criterion label: {label}")]
    DuplicateCriterion { label: String },
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("entries ({row}, {col}) and ({col}, {row}) are not reciprocal (product {product})")]
    NotReciprocal { row: usize, col: usize, product: f64 },
    #[error("unjudged entry ({row}, {col}) = {value} is not the neutral 1")]
    UnjudgedNotNeutral { row: usize, col: usize, value: f64 },
    #[error("history step {step} judges ({row}, {col}), expected ({expected_row}, {expected_col})")]
    OutOfOrderStep {
        step: usize,
        row: usize,
        col: usize,
        expected_row: usize,
        expected_col: usize,
    },
    #[error("index ({row}, {col}) is not an off-diagonal entry of a {size}x{size} matrix")]
    IndexOutOfBounds { row: usize, col: usize, size: usize },
    #[error("ratio must be positive and finite, got {value}")]
    InvalidRatio { value: f64 },
    #[error("expected {expected} values, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("entry ({row}, {col}) = {value} is not a positive finite ratio")]
    DegenerateMatrix {
        row: usize,
        col: usize,
        value: f64,
        matrix: ComparisonMatrix,
    },
    #[error("eigenvector normalization produced invalid weights {weights:?}")]
    WeightNormalizationFailed {
        weights: Vec<f64>,
        matrix: ComparisonMatrix,
    },
    #[error("eigenvalue decomposition did not converge")]
    EigenDecompositionFailed { matrix: ComparisonMatrix },
}

impl AhpError {
    /// True for errors caused by the caller breaking the usage contract.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            AhpError::InvalidJudgmentValue { .. }
                | AhpError::NonIntegerJudgment { .. }
                | AhpError::SessionComplete
                | AhpError::NoHistory
                | AhpError::IncompleteMatrix { .. }
        )
    }

    /// True for errors raised by the numeric core on a malformed matrix.
    pub fn is_numerical_error(&self) -> bool {
        matches!(
            self,
            AhpError::DegenerateMatrix { .. }
                | AhpError::WeightNormalizationFailed { .. }
                | AhpError::EigenDecompositionFailed { .. }
        )
    }
}
