//! Reciprocal pairwise comparison matrix.

use std::ops::Index;

use nalgebra::DMatrix;

use super::pairs::{pair_count, pair_index, pair_order};
use crate::error::{AhpError, Result};

/// An `n x n` reciprocal matrix of positive ratios.
///
/// `M[i][j]` says how many times more important criterion `i` is than
/// criterion `j`. The matrix keeps three invariants at every observable
/// point:
///
/// - the diagonal is 1;
/// - `M[i][j] * M[j][i] == 1`;
/// - unjudged pairs hold the neutral prior 1 ("equally important").
///
/// Alongside the values it tracks which unordered pairs have actually been
/// judged, since a neutral 1 and a recorded "equal" judgment look the same.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawComparisonMatrix"))]
pub struct ComparisonMatrix {
    size: usize,
    /// Row-major `size * size` values.
    values: Vec<f64>,
    /// One flag per pair, in lexicographic pair order.
    judged: Vec<bool>,
}

impl ComparisonMatrix {
    /// Creates an `n x n` matrix of ones with no pair judged.
    pub fn neutral(n: usize) -> Self {
        Self {
            size: n,
            values: vec![1.0; n * n],
            judged: vec![false; pair_count(n)],
        }
    }

    /// Builds a fully judged matrix from upper-triangle ratios.
    ///
    /// `upper` lists `M[i][j]` for every pair in lexicographic order; the
    /// lower triangle is filled with reciprocals. Ratios are not restricted
    /// to the 1/3/5/7/9 scale.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_ahp::matrix::ComparisonMatrix;
    ///
    /// let m = ComparisonMatrix::from_upper_triangle(3, &[2.0, 4.0, 2.0]).unwrap();
    /// assert_eq!(m[(0, 2)], 4.0);
    /// assert_eq!(m[(2, 0)], 0.25);
    /// assert!(m.is_complete());
    /// ```
    pub fn from_upper_triangle(n: usize, upper: &[f64]) -> Result<Self> {
        let expected = pair_count(n);
        if upper.len() != expected {
            return Err(AhpError::DimensionMismatch {
                expected,
                got: upper.len(),
            });
        }
        let mut matrix = Self::neutral(n);
        for (&(i, j), &value) in pair_order(n).iter().zip(upper) {
            matrix.set_judgment(i, j, value)?;
        }
        Ok(matrix)
    }

    /// Builds a fully judged matrix from explicit rows.
    ///
    /// Rows must form a square matrix of positive finite entries with a unit
    /// diagonal and reciprocal off-diagonal pairs (within `1e-9`).
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        for (row, values) in rows.iter().enumerate() {
            if values.len() != n {
                return Err(AhpError::NotSquare {
                    row,
                    len: values.len(),
                    expected: n,
                });
            }
        }
        Self::from_parts(
            n,
            rows.iter().flatten().copied().collect(),
            vec![true; pair_count(n)],
        )
    }

    /// Rebuilds a matrix from its raw buffers, checking every invariant.
    ///
    /// `values` is row-major `size * size`; `judged` has one flag per pair
    /// in lexicographic order. Entries must be positive and finite, the
    /// diagonal 1, mirrored entries reciprocal (within `1e-9`), and unjudged
    /// pairs must still hold the neutral 1.
    pub fn from_parts(size: usize, values: Vec<f64>, judged: Vec<bool>) -> Result<Self> {
        if values.len() != size * size {
            return Err(AhpError::DimensionMismatch {
                expected: size * size,
                got: values.len(),
            });
        }
        if judged.len() != pair_count(size) {
            return Err(AhpError::DimensionMismatch {
                expected: pair_count(size),
                got: judged.len(),
            });
        }

        let mut matrix = Self {
            size,
            values,
            judged,
        };
        if let Some((row, col, value)) = matrix.first_non_positive() {
            return Err(AhpError::DegenerateMatrix {
                row,
                col,
                value,
                matrix,
            });
        }
        for i in 0..size {
            let diagonal = matrix.at(i, i);
            if (diagonal - 1.0).abs() > 1e-9 {
                return Err(AhpError::NotReciprocal {
                    row: i,
                    col: i,
                    product: diagonal * diagonal,
                });
            }
            matrix.values[i * size + i] = 1.0;
        }
        for (k, (i, j)) in pair_order(size).into_iter().enumerate() {
            let product = matrix.at(i, j) * matrix.at(j, i);
            if (product - 1.0).abs() > 1e-9 {
                return Err(AhpError::NotReciprocal {
                    row: i,
                    col: j,
                    product,
                });
            }
            if !matrix.judged[k] && (matrix.at(i, j) - 1.0).abs() > 1e-9 {
                return Err(AhpError::UnjudgedNotNeutral {
                    row: i,
                    col: j,
                    value: matrix.at(i, j),
                });
            }
        }
        Ok(matrix)
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Entry `M[row][col]`, or `None` when either index is out of range.
    ///
    /// Use indexing (`m[(row, col)]`) when the indices are known valid.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.size && col < self.size {
            Some(self.values[row * self.size + col])
        } else {
            None
        }
    }

    /// Records `M[i][j] = value` and `M[j][i] = 1 / value`.
    ///
    /// Either orientation of the pair is accepted; the pair is marked as
    /// judged. No other entry changes.
    pub fn set_judgment(&mut self, i: usize, j: usize, value: f64) -> Result<()> {
        let k = self.checked_pair(i, j)?;
        if !(value.is_finite() && value > 0.0) {
            return Err(AhpError::InvalidRatio { value });
        }
        let n = self.size;
        self.values[i * n + j] = value;
        self.values[j * n + i] = 1.0 / value;
        self.judged[k] = true;
        Ok(())
    }

    /// Restores the neutral prior for pair `(i, j)` and marks it unjudged.
    pub fn clear_judgment(&mut self, i: usize, j: usize) -> Result<()> {
        let k = self.checked_pair(i, j)?;
        let n = self.size;
        self.values[i * n + j] = 1.0;
        self.values[j * n + i] = 1.0;
        self.judged[k] = false;
        Ok(())
    }

    /// Whether the unordered pair `{i, j}` has been judged.
    ///
    /// Diagonal and out-of-range indices report `false`.
    pub fn is_judged(&self, i: usize, j: usize) -> bool {
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        pair_index(self.size, lo, hi).is_some_and(|k| self.judged[k])
    }

    /// True when every unordered pair has been judged.
    pub fn is_complete(&self) -> bool {
        self.judged.iter().all(|&judged| judged)
    }

    /// Pairs still holding the neutral prior, in lexicographic order.
    pub fn unjudged_pairs(&self) -> Vec<(usize, usize)> {
        pair_order(self.size)
            .into_iter()
            .zip(&self.judged)
            .filter(|(_, &judged)| !judged)
            .map(|(pair, _)| pair)
            .collect()
    }

    /// Largest `|M[i][j] * M[j][i] - 1|` over all pairs.
    pub fn max_reciprocity_error(&self) -> f64 {
        let mut worst = 0.0f64;
        for i in 0..self.size {
            worst = worst.max((self.at(i, i) - 1.0).abs());
            for j in (i + 1)..self.size {
                worst = worst.max((self.at(i, j) * self.at(j, i) - 1.0).abs());
            }
        }
        worst
    }

    /// Copies the values out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.values
            .chunks(self.size)
            .map(<[f64]>::to_vec)
            .collect()
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.size;
        &self.values[i * n..(i + 1) * n]
    }

    /// First entry that is not a positive finite number, scanning row-major.
    pub(crate) fn first_non_positive(&self) -> Option<(usize, usize, f64)> {
        self.values
            .iter()
            .position(|v| !(v.is_finite() && *v > 0.0))
            .map(|k| (k / self.size, k % self.size, self.values[k]))
    }

    /// Writes scale value `value` for pair `k = (i, j)` of the canonical
    /// order. Callers guarantee `(i, j) == pair_at(size, k)` and a positive
    /// finite value.
    pub(crate) fn put(&mut self, k: usize, i: usize, j: usize, value: f64) {
        let n = self.size;
        self.values[i * n + j] = value;
        self.values[j * n + i] = 1.0 / value;
        self.judged[k] = true;
    }

    /// Unchecked read; indices are in range by construction.
    fn at(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.size + col]
    }

    /// Builds a matrix that skips every check, for exercising the solver's
    /// defensive paths.
    #[cfg(test)]
    pub(crate) fn from_parts_unchecked(size: usize, values: Vec<f64>, judged: Vec<bool>) -> Self {
        Self {
            size,
            values,
            judged,
        }
    }

    /// Verifies the internal buffers match `size`.
    pub(crate) fn check_shape(&self) -> Result<()> {
        if self.values.len() != self.size * self.size {
            return Err(AhpError::DimensionMismatch {
                expected: self.size * self.size,
                got: self.values.len(),
            });
        }
        if self.judged.len() != pair_count(self.size) {
            return Err(AhpError::DimensionMismatch {
                expected: pair_count(self.size),
                got: self.judged.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn to_dmatrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.size, self.size, &self.values)
    }

    fn checked_pair(&self, i: usize, j: usize) -> Result<usize> {
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        pair_index(self.size, lo, hi).ok_or(AhpError::IndexOutOfBounds {
            row: i,
            col: j,
            size: self.size,
        })
    }
}

/// Wire form of [`ComparisonMatrix`]; deserialization goes through
/// [`ComparisonMatrix::from_parts`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawComparisonMatrix {
    size: usize,
    values: Vec<f64>,
    judged: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawComparisonMatrix> for ComparisonMatrix {
    type Error = AhpError;

    fn try_from(raw: RawComparisonMatrix) -> Result<Self> {
        Self::from_parts(raw.size, raw.values, raw.judged)
    }
}

impl Index<(usize, usize)> for ComparisonMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(row < self.size && col < self.size, "index out of bounds");
        &self.values[row * self.size + col]
    }
}
