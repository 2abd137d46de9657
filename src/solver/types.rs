//! Solver output types.

/// Why the geometric-mean estimator replaced the eigenvector weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FallbackReason {
    /// `CR` reached the consistency threshold.
    Inconsistent,
    /// The largest-magnitude eigenvalue was complex.
    ComplexDominantEigenvalue,
    /// Power iteration hit the iteration cap.
    EigenvectorNotConverged,
}

/// Priority weights plus consistency diagnostics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightResult {
    /// One non-negative weight per criterion, summing to 1.
    pub weights: Vec<f64>,

    /// Consistency Ratio `CI / RI` (0 for two criteria).
    pub consistency_ratio: f64,

    /// Whether the geometric-mean estimator produced `weights`.
    pub used_fallback: bool,

    /// Why the fallback was used, if it was.
    pub fallback_reason: Option<FallbackReason>,

    /// Real part of the dominant eigenvalue.
    pub lambda_max: f64,

    /// Consistency Index `(λmax - n) / (n - 1)`.
    pub consistency_index: f64,

    /// Random Index used for the ratio.
    pub random_index: f64,
}

impl WeightResult {
    /// Weights scaled to percentages.
    pub fn percentages(&self) -> Vec<f64> {
        self.weights.iter().map(|w| w * 100.0).collect()
    }

    /// Criterion indices by descending weight; ties keep index order.
    pub fn ranking(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.weights.len()).collect();
        indices.sort_by(|&a, &b| {
            self.weights[b]
                .partial_cmp(&self.weights[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        indices
    }

    /// Pairs each weight with its criterion label.
    ///
    /// Stops at the shorter of the two sequences.
    pub fn labelled<'a, S: AsRef<str>>(&self, criteria: &'a [S]) -> Vec<(&'a str, f64)> {
        criteria
            .iter()
            .map(AsRef::as_ref)
            .zip(self.weights.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(weights: Vec<f64>) -> WeightResult {
        WeightResult {
            weights,
            consistency_ratio: 0.0,
            used_fallback: false,
            fallback_reason: None,
            lambda_max: 3.0,
            consistency_index: 0.0,
            random_index: 0.58,
        }
    }

    #[test]
    fn test_percentages() {
        let r = result(vec![0.5, 0.25, 0.25]);
        assert_eq!(r.percentages(), vec![50.0, 25.0, 25.0]);
    }

    #[test]
    fn test_ranking_descending_and_stable() {
        let r = result(vec![0.2, 0.4, 0.2, 0.2]);
        assert_eq!(r.ranking(), vec![1, 0, 2, 3]);
    }

    #[test]
    fn test_labelled() {
        let r = result(vec![0.7, 0.3]);
        let labels = ["cost".to_string(), "speed".to_string()];
        assert_eq!(r.labelled(&labels), vec![("cost", 0.7), ("speed", 0.3)]);
    }
}
