//! Fitted classifiers operating on numeric rows
//!
//! Each estimator knows its class list and the row width it was fitted on.
//! Whether it can report class probabilities is a property of its type,
//! fixed when the artifact is decoded: see [`Estimator::probabilistic`].

mod forest;
mod knn;
mod linear;
mod mlp;
mod tree;

pub use forest::RandomForest;
pub use knn::{KNeighbors, Weights};
pub use linear::LinearSvc;
pub use mlp::{Activation, DenseLayer, Mlp};
pub use tree::{DecisionTree, TreeNode};

use boardsense_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Common surface of every fitted classifier
pub trait Classifier: Send + Sync {
    /// Short type name used in logs and errors
    fn kind(&self) -> &'static str;

    /// Class labels, in score order
    fn classes(&self) -> &[i64];

    /// Row width the estimator was fitted on
    fn n_features(&self) -> usize;

    /// One score per class; the highest one is the prediction
    fn scores(&self, x: &[f64]) -> Result<Vec<f64>>;

    /// Structural checks run once after decoding
    fn validate(&self) -> Result<()>;

    /// Predicted class for a single row
    fn predict(&self, x: &[f64]) -> Result<i64> {
        let scores = self.scores(x)?;
        let best = argmax(&scores)?;
        self.classes().get(best).copied().ok_or_else(|| {
            Error::inference(format!(
                "{} produced {} scores for {} classes",
                self.kind(),
                scores.len(),
                self.classes().len()
            ))
        })
    }
}

/// Classifiers that can report a probability per class
pub trait ProbabilisticClassifier: Classifier {
    /// Probability per class, aligned with [`Classifier::classes`]
    fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>>;
}

/// Any supported estimator, tagged by `type` in the artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Estimator {
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
    Knn(KNeighbors),
    Mlp(Mlp),
    LinearSvc(LinearSvc),
}

impl Estimator {
    pub fn classifier(&self) -> &dyn Classifier {
        match self {
            Self::DecisionTree(m) => m as &dyn Classifier,
            Self::RandomForest(m) => m as &dyn Classifier,
            Self::Knn(m) => m as &dyn Classifier,
            Self::Mlp(m) => m as &dyn Classifier,
            Self::LinearSvc(m) => m as &dyn Classifier,
        }
    }

    /// The probability capability, if this estimator type has one
    pub fn probabilistic(&self) -> Option<&dyn ProbabilisticClassifier> {
        match self {
            Self::DecisionTree(m) => Some(m as &dyn ProbabilisticClassifier),
            Self::RandomForest(m) => Some(m as &dyn ProbabilisticClassifier),
            Self::Knn(m) => Some(m as &dyn ProbabilisticClassifier),
            Self::Mlp(m) => Some(m as &dyn ProbabilisticClassifier),
            Self::LinearSvc(_) => None,
        }
    }

    pub fn predict(&self, x: &[f64]) -> Result<i64> {
        self.classifier().predict(x)
    }

    pub fn validate(&self) -> Result<()> {
        let classifier = self.classifier();
        if classifier.classes().is_empty() {
            return Err(Error::artifact(format!("{} has no classes", classifier.kind())));
        }
        classifier.validate()
    }
}

/// Index of the first maximum
pub(crate) fn argmax(scores: &[f64]) -> Result<usize> {
    if let Some(bad) = scores.iter().find(|s| !s.is_finite()) {
        return Err(Error::inference(format!("non-finite score {}", bad)));
    }

    scores
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &s)| match best {
            Some((_, top)) if top >= s => best,
            _ => Some((i, s)),
        })
        .map(|(i, _)| i)
        .ok_or_else(|| Error::inference("empty score vector"))
}

/// Reject rows whose width differs from the fitted width
pub(crate) fn ensure_width(kind: &str, expected: usize, x: &[f64]) -> Result<()> {
    if x.len() != expected {
        return Err(Error::inference(format!(
            "row has {} features, but {} is expecting {} features",
            x.len(),
            kind,
            expected
        )));
    }
    Ok(())
}

/// Scale non-negative weights so they sum to one
pub(crate) fn normalize(weights: &[f64]) -> Result<Vec<f64>> {
    let total: f64 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(Error::inference(format!(
            "cannot normalize weights summing to {}",
            total
        )));
    }
    Ok(weights.iter().map(|w| w / total).collect())
}
