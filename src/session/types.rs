//! Judgment scale and recorded steps.

use crate::error::AhpError;

/// Closed ordinal scale of relative importance of `i` over `j`.
///
/// Only these five values are accepted from a traversal. The reciprocal
/// `1 / value` is implied for the mirrored pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Judgment {
    /// Both criteria are equally important (1).
    Equal = 1,
    /// Slight importance of `i` over `j` (3).
    Moderate = 3,
    /// Strong importance (5).
    Strong = 5,
    /// Very strong importance (7).
    VeryStrong = 7,
    /// Extreme importance (9).
    Extreme = 9,
}

impl Judgment {
    /// Every scale value in ascending order.
    pub const ALL: [Judgment; 5] = [
        Judgment::Equal,
        Judgment::Moderate,
        Judgment::Strong,
        Judgment::VeryStrong,
        Judgment::Extreme,
    ];

    /// Numeric ratio written into the matrix.
    pub fn value(self) -> f64 {
        self as u8 as f64
    }

    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Judgment::Equal => "equal importance",
            Judgment::Moderate => "slightly more important",
            Judgment::Strong => "strongly more important",
            Judgment::VeryStrong => "very strongly more important",
            Judgment::Extreme => "extremely more important",
        }
    }
}

impl TryFrom<i64> for Judgment {
    type Error = AhpError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Judgment::Equal),
            3 => Ok(Judgment::Moderate),
            5 => Ok(Judgment::Strong),
            7 => Ok(Judgment::VeryStrong),
            9 => Ok(Judgment::Extreme),
            other => Err(AhpError::InvalidJudgmentValue { value: other }),
        }
    }
}

/// Accepts only exact integers on the scale; `5.9` or `NaN` never round
/// onto it.
impl TryFrom<f64> for Judgment {
    type Error = AhpError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(AhpError::NonIntegerJudgment { value });
        }
        // Saturating cast; saturated values are never on the scale.
        Judgment::try_from(value as i64)
    }
}

impl From<Judgment> for u8 {
    fn from(judgment: Judgment) -> u8 {
        judgment as u8
    }
}

impl From<Judgment> for i64 {
    fn from(judgment: Judgment) -> i64 {
        judgment as i64
    }
}

/// One recorded decision: pair `(i, j)` with `i < j` and its judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JudgmentStep {
    pub i: usize,
    pub j: usize,
    pub judgment: Judgment,
}

impl JudgmentStep {
    /// The judged pair.
    pub fn pair(&self) -> (usize, usize) {
        (self.i, self.j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_values() {
        let values: Vec<f64> = Judgment::ALL.iter().map(|j| j.value()).collect();
        assert_eq!(values, vec![1.0, 3.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_try_from_accepts_scale() {
        for judgment in Judgment::ALL {
            assert_eq!(Judgment::try_from(i64::from(judgment)), Ok(judgment));
            assert_eq!(Judgment::try_from(judgment.value()), Ok(judgment));
        }
    }

    #[test]
    fn test_try_from_rejects_off_scale() {
        for value in [0i64, 2, 4, 6, 8, 10, -3, 259, i64::MAX] {
            assert_eq!(
                Judgment::try_from(value),
                Err(AhpError::InvalidJudgmentValue { value })
            );
        }
    }

    #[test]
    fn test_try_from_float_does_not_wrap_or_truncate() {
        // 259 wraps to 3 as a u8; 5.9 truncates to 5.
        assert_eq!(
            Judgment::try_from(259.0),
            Err(AhpError::InvalidJudgmentValue { value: 259 })
        );
        assert_eq!(
            Judgment::try_from(5.9),
            Err(AhpError::NonIntegerJudgment { value: 5.9 })
        );
        assert!(matches!(
            Judgment::try_from(f64::NAN),
            Err(AhpError::NonIntegerJudgment { .. })
        ));
        assert!(matches!(
            Judgment::try_from(f64::INFINITY),
            Err(AhpError::NonIntegerJudgment { .. })
        ));
        assert!(matches!(
            Judgment::try_from(1e300),
            Err(AhpError::InvalidJudgmentValue { .. })
        ));
    }

    #[test]
    fn test_labels_distinct() {
        let mut labels: Vec<&str> = Judgment::ALL.iter().map(|j| j.label()).collect();
        labels.dedup();
        assert_eq!(labels.len(), 5);
    }
}
