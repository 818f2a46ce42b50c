//! Linear support vector classifier; decision scores only, no probabilities

use super::{ensure_width, Classifier};
use boardsense_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// One-vs-rest linear model
///
/// Binary models store a single coefficient row whose positive side is
/// `classes[1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSvc {
    pub classes: Vec<i64>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl Classifier for LinearSvc {
    fn kind(&self) -> &'static str {
        "linear_svc"
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.coef.first().map(Vec::len).unwrap_or(0)
    }

    fn scores(&self, x: &[f64]) -> Result<Vec<f64>> {
        ensure_width(self.kind(), self.n_features(), x)?;

        let decision: Vec<f64> = self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + b)
            .collect();

        match decision.as_slice() {
            [d] => Ok(vec![-d, *d]),
            _ => Ok(decision),
        }
    }

    fn validate(&self) -> Result<()> {
        let rows = self.coef.len();
        let binary = self.classes.len() == 2 && rows == 1;
        if rows != self.classes.len() && !binary {
            return Err(Error::artifact(format!(
                "linear_svc has {} coefficient rows for {} classes",
                rows,
                self.classes.len()
            )));
        }
        if self.intercept.len() != rows {
            return Err(Error::artifact("linear_svc intercept length mismatch"));
        }
        let width = self.n_features();
        if width == 0 || self.coef.iter().any(|row| row.len() != width) {
            return Err(Error::artifact("linear_svc coefficient rows have differing widths"));
        }
        Ok(())
    }
}
