//! Pairwise judgment session.

use std::collections::HashSet;

use tracing::debug;

use super::types::{Judgment, JudgmentStep};
use crate::error::{AhpError, Result};
use crate::matrix::{pair_at, pair_count, pair_order, ComparisonMatrix};

/// Walks a user through every unordered criterion pair exactly once.
///
/// The current pair is a pure function of the history length: step `k`
/// always judges the `k`-th pair in lexicographic order. The matrix is
/// rebuilt by replaying the history onto the neutral matrix, so pointer,
/// history and matrix can never disagree.
///
/// # Examples
///
/// ```
/// use u_ahp::session::{Judgment, PairwiseSession};
///
/// let mut session = PairwiseSession::new(["cost", "quality", "speed"]).unwrap();
/// assert_eq!(session.total_steps(), 3);
/// assert_eq!(session.current_pair(), Some((0, 1)));
///
/// session.record(Judgment::Strong).unwrap();
/// assert_eq!(session.current_pair(), Some((0, 2)));
///
/// session.undo().unwrap();
/// assert_eq!(session.current_pair(), Some((0, 1)));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPairwiseSession"))]
pub struct PairwiseSession {
    criteria: Vec<String>,
    history: Vec<JudgmentStep>,
}

impl PairwiseSession {
    /// Starts a session over an ordered list of distinct criterion labels.
    ///
    /// Fails with [`AhpError::TooFewCriteria`] for fewer than two labels
    /// and [`AhpError::DuplicateCriterion`] on a repeated label.
    pub fn new<I, S>(criteria: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let criteria: Vec<String> = criteria.into_iter().map(Into::into).collect();
        if criteria.len() < 2 {
            return Err(AhpError::TooFewCriteria {
                count: criteria.len(),
            });
        }
        let mut seen = HashSet::with_capacity(criteria.len());
        for label in &criteria {
            if !seen.insert(label.as_str()) {
                return Err(AhpError::DuplicateCriterion {
                    label: label.clone(),
                });
            }
        }
        debug!(criteria = criteria.len(), "pairwise session started");
        Ok(Self {
            criteria,
            history: Vec::new(),
        })
    }

    /// Restores a session from criteria and a recorded history.
    ///
    /// The criteria are checked as in [`PairwiseSession::new`]. Step `k` of
    /// the history must judge the `k`-th pair in lexicographic order
    /// ([`AhpError::OutOfOrderStep`]), and the history may not be longer
    /// than `total_steps()` ([`AhpError::SessionComplete`]).
    pub fn from_history<I, S>(criteria: I, history: Vec<JudgmentStep>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut session = Self::new(criteria)?;
        let n = session.criteria.len();
        for (step, entry) in history.iter().enumerate() {
            let (expected_row, expected_col) =
                pair_at(n, step).ok_or(AhpError::SessionComplete)?;
            if entry.pair() != (expected_row, expected_col) {
                return Err(AhpError::OutOfOrderStep {
                    step,
                    row: entry.i,
                    col: entry.j,
                    expected_row,
                    expected_col,
                });
            }
        }
        session.history = history;
        Ok(session)
    }

    /// Criterion labels in canonical order.
    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    /// Number of criteria `N`.
    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }

    /// Total number of judgments: `N(N-1)/2`.
    pub fn total_steps(&self) -> usize {
        pair_count(self.criteria.len())
    }

    /// Number of judgments recorded so far.
    pub fn completed_steps(&self) -> usize {
        self.history.len()
    }

    /// 1-based number of the step on screen, clamped to `total_steps()`.
    pub fn step_number(&self) -> usize {
        (self.history.len() + 1).min(self.total_steps())
    }

    /// Fraction of pairs judged, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.history.len() as f64 / self.total_steps() as f64
    }

    /// The pair awaiting judgment, or `None` once every pair is judged.
    pub fn current_pair(&self) -> Option<(usize, usize)> {
        pair_at(self.criteria.len(), self.history.len())
    }

    /// Labels of the current pair.
    pub fn current_labels(&self) -> Option<(&str, &str)> {
        self.current_pair()
            .map(|(i, j)| (self.criteria[i].as_str(), self.criteria[j].as_str()))
    }

    /// True iff every pair has been judged.
    pub fn is_complete(&self) -> bool {
        self.current_pair().is_none()
    }

    /// Recorded judgments, oldest first.
    pub fn history(&self) -> &[JudgmentStep] {
        &self.history
    }

    /// Records a raw scale value for the current pair.
    ///
    /// Values outside `{1, 3, 5, 7, 9}` fail with
    /// [`AhpError::InvalidJudgmentValue`] and leave the session untouched.
    pub fn record_judgment(&mut self, value: i64) -> Result<JudgmentStep> {
        let judgment = Judgment::try_from(value)?;
        self.record(judgment)
    }

    /// Records a judgment for the current pair and advances to the next one.
    ///
    /// Fails with [`AhpError::SessionComplete`] when no pair is pending.
    pub fn record(&mut self, judgment: Judgment) -> Result<JudgmentStep> {
        let (i, j) = self.current_pair().ok_or(AhpError::SessionComplete)?;
        let step = JudgmentStep { i, j, judgment };
        self.history.push(step);
        debug!(
            i,
            j,
            value = u8::from(judgment),
            step = self.history.len(),
            total = self.total_steps(),
            "judgment recorded"
        );
        Ok(step)
    }

    /// Pops the last judgment and rewinds to its pair.
    ///
    /// The pair's entries return to the neutral prior 1. Fails with
    /// [`AhpError::NoHistory`] when nothing has been recorded.
    pub fn undo(&mut self) -> Result<JudgmentStep> {
        let step = self.history.pop().ok_or(AhpError::NoHistory)?;
        debug!(i = step.i, j = step.j, step = self.history.len(), "judgment undone");
        Ok(step)
    }

    /// Drops every recorded judgment, keeping the criteria.
    pub fn reset(&mut self) {
        debug!(discarded = self.history.len(), "pairwise session reset");
        self.history.clear();
    }

    /// Current comparison matrix, rebuilt from the history.
    pub fn matrix_snapshot(&self) -> ComparisonMatrix {
        let n = self.criteria.len();
        let mut matrix = ComparisonMatrix::neutral(n);
        // History is in canonical pair order; every constructor checks it.
        for (k, ((i, j), step)) in pair_order(n).into_iter().zip(&self.history).enumerate() {
            matrix.put(k, i, j, step.judgment.value());
        }
        matrix
    }
}

/// Wire form of [`PairwiseSession`]; deserialization goes through
/// [`PairwiseSession::from_history`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPairwiseSession {
    criteria: Vec<String>,
    history: Vec<JudgmentStep>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPairwiseSession> for PairwiseSession {
    type Error = AhpError;

    fn try_from(raw: RawPairwiseSession) -> Result<Self> {
        Self::from_history(raw.criteria, raw.history)
    }
}
