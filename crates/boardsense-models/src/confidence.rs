//! Best-effort probability lookup for the predicted class
//!
//! Artifacts come in different shapes, and not every shape can report
//! probabilities. Confidence is therefore gathered by an ordered list of
//! strategies; the first one that finds a value wins. A strategy that does
//! not apply, or that faults, is skipped and logged. The extractor itself
//! never fails: the worst case is no confidence at all.

use crate::encoder::FeatureRecord;
use crate::model::{LoadedModel, Stage, CLF_STAGE, PREP_STAGE};
use boardsense_core::{Error, Result};
use std::fmt;
use tracing::debug;

/// Tolerance for probabilities that drift just past 0 or 1
const EPSILON: f64 = 1e-9;

/// Result of one strategy attempt
#[derive(Debug)]
pub enum Outcome {
    Found(f64),
    Skipped(SkipReason),
}

/// Why a strategy produced no value
#[derive(Debug)]
pub enum SkipReason {
    /// The model lacks what this strategy needs
    Unsupported(&'static str),
    /// The predicted class is not among the classifier's classes
    UnknownClass { class: i64 },
    /// Something failed while computing probabilities
    Fault(Error),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(what) => write!(f, "unsupported: {}", what),
            Self::UnknownClass { class } => write!(f, "class {} has no probability", class),
            Self::Fault(e) => write!(f, "fault: {}", e),
        }
    }
}

/// One way of obtaining the predicted class's probability
pub trait ConfidenceStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn attempt(&self, model: &LoadedModel, record: &FeatureRecord, class: i64) -> Outcome;
}

/// Ask the model itself for class probabilities
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectProbability;

impl ConfidenceStrategy for DirectProbability {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn attempt(&self, model: &LoadedModel, record: &FeatureRecord, class: i64) -> Outcome {
        let Some(classifier) = model.probabilistic() else {
            return Outcome::Skipped(SkipReason::Unsupported("model has no probability output"));
        };

        let proba = record
            .to_numeric()
            .and_then(|x| classifier.predict_proba(&x));
        lookup(classifier.classes(), proba, class)
    }
}

/// Ask a pipeline's `clf` stage, feeding it through `prep` when present
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineProbability;

impl ConfidenceStrategy for PipelineProbability {
    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn attempt(&self, model: &LoadedModel, record: &FeatureRecord, class: i64) -> Outcome {
        let LoadedModel::Pipeline(pipeline) = model else {
            return Outcome::Skipped(SkipReason::Unsupported("model is not a pipeline"));
        };

        let Some(Stage::Estimator(estimator)) = pipeline.named_stage(CLF_STAGE) else {
            return Outcome::Skipped(SkipReason::Unsupported("pipeline has no clf estimator"));
        };
        let Some(classifier) = estimator.probabilistic() else {
            return Outcome::Skipped(SkipReason::Unsupported("clf has no probability output"));
        };

        let proba = prep_input(pipeline.named_stage(PREP_STAGE), record)
            .and_then(|x| classifier.predict_proba(&x));
        lookup(classifier.classes(), proba, class)
    }
}

/// Input for the `clf` stage: transformed by `prep`, or the raw record
fn prep_input(prep: Option<&Stage>, record: &FeatureRecord) -> Result<Vec<f64>> {
    match prep {
        Some(Stage::Transformer(transformer)) => transformer.transform(record),
        Some(Stage::Estimator(estimator)) => Err(Error::inference(format!(
            "prep stage is a {} estimator, not a transformer",
            estimator.classifier().kind()
        ))),
        None => record.to_numeric(),
    }
}

/// Probability of `class`, found at its position in `classes`
///
/// `proba` is aligned with `classes`, so a model fitted on `[1, 2]` keeps
/// class 1's probability at position 0.
fn lookup(classes: &[i64], proba: Result<Vec<f64>>, class: i64) -> Outcome {
    let proba = match proba {
        Ok(proba) => proba,
        Err(e) => return Outcome::Skipped(SkipReason::Fault(e)),
    };

    let Some(position) = classes.iter().position(|c| *c == class) else {
        return Outcome::Skipped(SkipReason::UnknownClass { class });
    };
    let Some(value) = proba.get(position).copied() else {
        return Outcome::Skipped(SkipReason::Fault(Error::inference(format!(
            "{} probabilities for {} classes",
            proba.len(),
            classes.len()
        ))));
    };

    if !(-EPSILON..=1.0 + EPSILON).contains(&value) {
        return Outcome::Skipped(SkipReason::Fault(Error::inference(format!(
            "probability {} outside [0, 1]",
            value
        ))));
    }
    Outcome::Found(value.clamp(0.0, 1.0))
}

/// Runs confidence strategies in order
pub struct ConfidenceExtractor {
    strategies: Vec<Box<dyn ConfidenceStrategy>>,
}

impl ConfidenceExtractor {
    pub fn new() -> Self {
        Self::with_strategies(vec![
            Box::new(DirectProbability),
            Box::new(PipelineProbability),
        ])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn ConfidenceStrategy>>) -> Self {
        Self { strategies }
    }

    /// Strategy names in the order they are tried
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Confidence in `class`, or `None` when no strategy can provide it
    pub fn extract(&self, model: &LoadedModel, record: &FeatureRecord, class: i64) -> Option<f64> {
        for strategy in &self.strategies {
            match strategy.attempt(model, record, class) {
                Outcome::Found(value) => {
                    debug!("Confidence {} from {} strategy", value, strategy.name());
                    return Some(value);
                }
                Outcome::Skipped(reason) => {
                    debug!("Skipped {} confidence strategy: {}", strategy.name(), reason);
                }
            }
        }
        None
    }
}

impl Default for ConfidenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}
