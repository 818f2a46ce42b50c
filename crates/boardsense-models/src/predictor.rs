//! Prediction orchestration: resolve, encode, classify, score

use crate::confidence::ConfidenceExtractor;
use crate::encoder::{BoardEncoder, FeatureRecord};
use crate::model::LoadedModel;
use crate::registry::ModelRegistry;
use boardsense_core::{Error, PredictionResult, Result};
use tracing::debug;

/// Answers `predict` requests against a [`ModelRegistry`]
pub struct Predictor {
    registry: ModelRegistry,
    encoder: BoardEncoder,
    extractor: ConfidenceExtractor,
}

impl Predictor {
    pub fn new(registry: ModelRegistry) -> Self {
        Self::with_extractor(registry, ConfidenceExtractor::default())
    }

    pub fn with_extractor(registry: ModelRegistry, extractor: ConfidenceExtractor) -> Self {
        Self {
            registry,
            encoder: BoardEncoder::new(),
            extractor,
        }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Classify `board` with the model behind `alias`
    ///
    /// A missing model is an ordinary outcome and comes back as a failure
    /// document. A malformed board or a failing model call is returned as
    /// an error for the caller to fold.
    pub fn try_predict(&mut self, alias: &str, board: &str) -> Result<PredictionResult> {
        let Some(model) = self.registry.resolve(alias) else {
            return Ok(PredictionResult::failure(alias, Error::model_not_found(alias)));
        };

        let record = self.encoder.parse(board)?;
        classify(&model, alias, &record, &self.extractor)
    }

    /// Like [`Predictor::try_predict`], with every error folded into the document
    pub fn predict(&mut self, alias: &str, board: &str) -> PredictionResult {
        self.try_predict(alias, board)
            .unwrap_or_else(|e| PredictionResult::failure(alias, e))
    }
}

/// Run one loaded model on an encoded board
pub fn classify(
    model: &LoadedModel,
    alias: &str,
    record: &FeatureRecord,
    extractor: &ConfidenceExtractor,
) -> Result<PredictionResult> {
    let class = model.predict(record)?;
    let confidence = extractor.extract(model, record, class);
    debug!(
        "Model '{}' predicted class {} (confidence {:?})",
        alias, class, confidence
    );

    Ok(PredictionResult::success(alias, class, confidence))
}
