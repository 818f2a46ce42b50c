//! Loaded model shapes and artifact decoding
//!
//! An artifact is either a bare estimator or a pipeline of named stages.
//! The shape is decided once when the file is decoded and is carried as an
//! explicit variant from then on.

use crate::encoder::FeatureRecord;
use crate::estimator::{Estimator, ProbabilisticClassifier};
use crate::transform::Transformer;
use boardsense_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Conventional name of a pipeline's encoding stage
pub const PREP_STAGE: &str = "prep";

/// Conventional name of a pipeline's terminal estimator stage
pub const CLF_STAGE: &str = "clf";

/// Artifact document as written by the training side
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Artifact {
    Estimator { estimator: Estimator },
    Pipeline { steps: Vec<PipelineStep> },
}

/// A classifier ready to be queried
#[derive(Debug, Clone)]
pub enum LoadedModel {
    /// Bare estimator fed the record as numbers
    Direct(Estimator),
    /// Encoding stage followed by a terminal estimator
    Pipeline(Pipeline),
}

impl LoadedModel {
    /// Read, decode and validate an artifact file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let model = Self::from_json(&content)?;
        debug!("Decoded {} artifact from {}", model.shape(), path.display());
        Ok(model)
    }

    /// Decode and validate an artifact document
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: Artifact = serde_json::from_str(json)?;

        let model = match artifact {
            Artifact::Estimator { estimator } => {
                estimator.validate()?;
                Self::Direct(estimator)
            }
            Artifact::Pipeline { steps } => Self::Pipeline(Pipeline::new(steps)?),
        };
        Ok(model)
    }

    /// `"estimator"` or `"pipeline"`
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Direct(_) => "estimator",
            Self::Pipeline(_) => "pipeline",
        }
    }

    /// Classify a single record
    pub fn predict(&self, record: &FeatureRecord) -> Result<i64> {
        match self {
            Self::Direct(estimator) => estimator.predict(&record.to_numeric()?),
            Self::Pipeline(pipeline) => pipeline.predict(record),
        }
    }

    /// Probability capability of the model itself
    ///
    /// Only bare estimators expose one; a pipeline's probabilities are
    /// reached through its stages.
    pub fn probabilistic(&self) -> Option<&dyn ProbabilisticClassifier> {
        match self {
            Self::Direct(estimator) => estimator.probabilistic(),
            Self::Pipeline(_) => None,
        }
    }
}

/// One named pipeline step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStep {
    pub name: String,
    #[serde(flatten)]
    pub stage: Stage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Transformer(Transformer),
    Estimator(Estimator),
}

/// Validated pipeline: an optional leading transformer, then one estimator
#[derive(Debug, Clone)]
pub struct Pipeline {
    steps: Vec<PipelineStep>,
}

impl Pipeline {
    pub fn new(steps: Vec<PipelineStep>) -> Result<Self> {
        let Some((last, rest)) = steps.split_last() else {
            return Err(Error::artifact("pipeline has no steps"));
        };

        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.name.as_str()) {
                return Err(Error::artifact(format!(
                    "duplicate pipeline step '{}'",
                    step.name
                )));
            }
        }

        let Stage::Estimator(estimator) = &last.stage else {
            return Err(Error::artifact(format!(
                "last pipeline step '{}' is not an estimator",
                last.name
            )));
        };
        estimator.validate()?;

        match rest {
            [] => {}
            [PipelineStep {
                stage: Stage::Transformer(transformer),
                ..
            }] => {
                transformer.validate()?;
                let width = estimator.classifier().n_features();
                if transformer.n_outputs() != width {
                    return Err(Error::artifact(format!(
                        "transformer emits {} columns but the estimator expects {}",
                        transformer.n_outputs(),
                        width
                    )));
                }
            }
            _ => {
                return Err(Error::artifact(
                    "pipeline may hold at most one transformer, as its first step",
                ))
            }
        }

        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    /// Look up a stage by name
    pub fn named_stage(&self, name: &str) -> Option<&Stage> {
        self.steps
            .iter()
            .find(|step| step.name == name)
            .map(|step| &step.stage)
    }

    /// The last step, which construction guarantees is an estimator
    pub fn final_estimator(&self) -> Option<&Estimator> {
        match self.steps.last().map(|step| &step.stage) {
            Some(Stage::Estimator(estimator)) => Some(estimator),
            _ => None,
        }
    }

    /// Run every transformer step, or read the record as numbers if none
    pub fn prepare(&self, record: &FeatureRecord) -> Result<Vec<f64>> {
        match self.steps.first().map(|step| &step.stage) {
            Some(Stage::Transformer(transformer)) => transformer.transform(record),
            _ => record.to_numeric(),
        }
    }

    pub fn predict(&self, record: &FeatureRecord) -> Result<i64> {
        let estimator = self
            .final_estimator()
            .ok_or_else(|| Error::inference("pipeline has no final estimator"))?;
        estimator.predict(&self.prepare(record)?)
    }
}
