//! Boardsense Models
//!
//! Loads trained tic-tac-toe state classifiers and queries them.
//!
//! The pieces, leaves first:
//! - [`ModelRegistry`] resolves an alias to an artifact on disk and caches it
//! - [`BoardEncoder`] turns a `x,o,b,...` string into a [`FeatureRecord`]
//! - [`ConfidenceExtractor`] looks up the probability of the predicted class
//! - [`Predictor`] ties them together into a [`PredictionResult`]
//!
//! [`PredictionResult`]: boardsense_core::PredictionResult

pub mod alias;
pub mod confidence;
pub mod config;
pub mod encoder;
pub mod estimator;
pub mod model;
pub mod predictor;
pub mod registry;
pub mod shared;
pub mod transform;

pub use alias::{CandidateTable, ModelAlias};
pub use confidence::{
    ConfidenceExtractor, ConfidenceStrategy, DirectProbability, Outcome, PipelineProbability,
    SkipReason,
};
pub use config::BridgeConfig;
pub use encoder::{BoardEncoder, FeatureRecord, BOARD_CELLS};
pub use estimator::{Classifier, Estimator, ProbabilisticClassifier};
pub use model::{LoadedModel, Pipeline, PipelineStep, Stage};
pub use predictor::Predictor;
pub use registry::ModelRegistry;
pub use shared::SharedModelRegistry;
pub use transform::Transformer;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::alias::ModelAlias;
    pub use crate::config::BridgeConfig;
    pub use crate::encoder::{BoardEncoder, FeatureRecord};
    pub use crate::model::LoadedModel;
    pub use crate::predictor::Predictor;
    pub use crate::registry::ModelRegistry;
}
