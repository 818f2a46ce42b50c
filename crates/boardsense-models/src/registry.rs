//! Alias resolution and the per-process model cache

use crate::alias::{CandidateTable, ModelAlias};
use crate::config::BridgeConfig;
use crate::model::LoadedModel;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resolves aliases to artifacts under a models directory
///
/// A model is cached only after it loads successfully, so a missing or
/// broken artifact is looked up again on the next call.
pub struct ModelRegistry {
    models_dir: PathBuf,
    candidates: CandidateTable,
    cache: HashMap<ModelAlias, Arc<LoadedModel>>,
}

impl ModelRegistry {
    /// Create a registry over `models_dir` with the built-in candidate names
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self::with_candidates(models_dir, CandidateTable::default())
    }

    pub fn with_candidates(models_dir: impl Into<PathBuf>, candidates: CandidateTable) -> Self {
        Self {
            models_dir: models_dir.into(),
            candidates,
            cache: HashMap::new(),
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::with_candidates(config.models_dir.clone(), config.candidate_table())
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    /// Model for `alias`, loading it on first use
    ///
    /// Unknown aliases, aliases without any candidate file, and artifacts
    /// that fail to load all come back as `None`. Only the first existing
    /// candidate is tried.
    pub fn resolve(&mut self, alias: &str) -> Option<Arc<LoadedModel>> {
        let Ok(alias) = alias.parse::<ModelAlias>() else {
            debug!("Unknown model alias '{}'", alias);
            return None;
        };

        if let Some(model) = self.cache.get(&alias) {
            return Some(Arc::clone(model));
        }

        let Some(path) = self.candidates.locate(&self.models_dir, alias) else {
            debug!(
                "No artifact for '{}' in {}",
                alias,
                self.models_dir.display()
            );
            return None;
        };

        match LoadedModel::load(&path) {
            Ok(model) => {
                info!("Loaded model '{}' from {}", alias, path.display());
                let model = Arc::new(model);
                self.cache.insert(alias, Arc::clone(&model));
                Some(model)
            }
            Err(e) => {
                warn!("Failed to load model '{}' from {}: {}", alias, path.display(), e);
                None
            }
        }
    }

    /// Aliases with at least one candidate file present, in declared order
    ///
    /// Checks existence only; nothing is loaded or cached.
    pub fn list_available(&self) -> Vec<ModelAlias> {
        ModelAlias::ALL
            .into_iter()
            .filter(|alias| self.candidates.locate(&self.models_dir, *alias).is_some())
            .collect()
    }

    /// Aliases currently held in the cache
    pub fn cached_aliases(&self) -> Vec<ModelAlias> {
        let mut aliases: Vec<ModelAlias> = self.cache.keys().copied().collect();
        aliases.sort();
        aliases
    }
}
