//! JavaScript bindings for browser front ends.
//!
//! Exposes a pairwise session and the solver with camelCase method names.
//! Matrices and results cross the boundary as plain JS objects.

use wasm_bindgen::prelude::*;

use crate::session::{Judgment, PairwiseSession};
use crate::solver::WeightSolver;

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// Pairwise judgment session handle.
#[wasm_bindgen]
pub struct WasmPairwiseSession {
    inner: PairwiseSession,
}

#[wasm_bindgen]
impl WasmPairwiseSession {
    /// Takes an array of criterion labels.
    #[wasm_bindgen(constructor)]
    pub fn new(criteria: JsValue) -> Result<WasmPairwiseSession, JsError> {
        let labels: Vec<String> =
            serde_wasm_bindgen::from_value(criteria).map_err(|e| JsError::new(&e.to_string()))?;
        let inner = PairwiseSession::new(labels)?;
        Ok(Self { inner })
    }

    /// `[i, j]` of the pending pair, or `null` when complete.
    #[wasm_bindgen(js_name = currentPair)]
    pub fn current_pair(&self) -> Result<JsValue, JsError> {
        match self.inner.current_pair() {
            Some((i, j)) => to_js(&[i, j]),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = totalSteps)]
    pub fn total_steps(&self) -> usize {
        self.inner.total_steps()
    }

    #[wasm_bindgen(js_name = completedSteps)]
    pub fn completed_steps(&self) -> usize {
        self.inner.completed_steps()
    }

    #[wasm_bindgen(js_name = isComplete)]
    pub fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }

    /// Takes a JS number; only the exact integers 1, 3, 5, 7 and 9 are
    /// accepted.
    #[wasm_bindgen(js_name = recordJudgment)]
    pub fn record_judgment(&mut self, value: f64) -> Result<(), JsError> {
        let judgment = Judgment::try_from(value)?;
        self.inner.record(judgment)?;
        Ok(())
    }

    pub fn undo(&mut self) -> Result<(), JsError> {
        self.inner.undo()?;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Current matrix as nested arrays.
    #[wasm_bindgen(js_name = matrixSnapshot)]
    pub fn matrix_snapshot(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.matrix_snapshot().to_rows())
    }

    /// Solves the completed matrix with the default configuration.
    pub fn solve(&self) -> Result<JsValue, JsError> {
        let result = WeightSolver::default().solve(&self.inner.matrix_snapshot())?;
        to_js(&result)
    }
}
