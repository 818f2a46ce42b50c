//! Registry for hosts that serve many requests concurrently
//!
//! Each alias owns a once-cell. Concurrent requests for an alias that is
//! not loaded yet wait on the same load instead of each reading the file.
//! A failed load leaves the cell empty, so a later request tries again.

use crate::alias::{CandidateTable, ModelAlias};
use crate::confidence::ConfidenceExtractor;
use crate::config::BridgeConfig;
use crate::encoder::BoardEncoder;
use crate::model::LoadedModel;
use crate::predictor::classify;
use boardsense_core::{Error, PredictionResult, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

type ModelCell = Arc<OnceCell<Arc<LoadedModel>>>;

/// Concurrency-safe registry with single-flight loading per alias
pub struct SharedModelRegistry {
    models_dir: PathBuf,
    candidates: CandidateTable,
    cells: Mutex<HashMap<ModelAlias, ModelCell>>,
    extractor: ConfidenceExtractor,
    loads: AtomicUsize,
}

impl SharedModelRegistry {
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self::with_candidates(models_dir, CandidateTable::default())
    }

    pub fn with_candidates(models_dir: impl Into<PathBuf>, candidates: CandidateTable) -> Self {
        Self {
            models_dir: models_dir.into(),
            candidates,
            cells: Mutex::new(HashMap::new()),
            extractor: ConfidenceExtractor::default(),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::with_candidates(config.models_dir.clone(), config.candidate_table())
    }

    /// Number of artifact reads attempted so far
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Model for `alias`, loading it at most once across concurrent callers
    pub async fn resolve(&self, alias: &str) -> Option<Arc<LoadedModel>> {
        let alias = alias.parse::<ModelAlias>().ok()?;
        let cell = Arc::clone(self.cells.lock().entry(alias).or_default());

        let loaded = cell.get_or_try_init(|| self.load(alias)).await;
        match loaded {
            Ok(model) => Some(Arc::clone(model)),
            Err(e) => {
                warn!("Model '{}' unavailable: {}", alias, e);
                None
            }
        }
    }

    async fn load(&self, alias: ModelAlias) -> Result<Arc<LoadedModel>> {
        let path = self
            .candidates
            .locate(&self.models_dir, alias)
            .ok_or_else(|| Error::model_not_found(alias.as_str()))?;

        self.loads.fetch_add(1, Ordering::Relaxed);
        let source = path.clone();
        let model = tokio::task::spawn_blocking(move || LoadedModel::load(&source))
            .await
            .map_err(|e| Error::artifact(format!("load task failed: {}", e)))??;

        info!("Loaded model '{}' from {}", alias, path.display());
        Ok(Arc::new(model))
    }

    /// Aliases with at least one candidate file present, in declared order
    pub fn list_available(&self) -> Vec<ModelAlias> {
        ModelAlias::ALL
            .into_iter()
            .filter(|alias| self.candidates.locate(&self.models_dir, *alias).is_some())
            .collect()
    }

    /// Same contract as [`crate::Predictor::predict`]
    pub async fn predict(&self, alias: &str, board: &str) -> PredictionResult {
        let Some(model) = self.resolve(alias).await else {
            return PredictionResult::failure(alias, Error::model_not_found(alias));
        };

        BoardEncoder::new()
            .parse(board)
            .and_then(|record| classify(&model, alias, &record, &self.extractor))
            .unwrap_or_else(|e| PredictionResult::failure(alias, e))
    }
}
