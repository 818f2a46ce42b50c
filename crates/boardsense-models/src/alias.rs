//! Model aliases and the on-disk names each one may be stored under

use boardsense_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Short identifier for a trained model family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelAlias {
    Mlp,
    RandomForest,
    Knn,
    DecisionTree,
}

impl ModelAlias {
    /// Every alias, in the order `info` reports them
    pub const ALL: [ModelAlias; 4] = [
        ModelAlias::Mlp,
        ModelAlias::RandomForest,
        ModelAlias::Knn,
        ModelAlias::DecisionTree,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mlp => "mlp",
            Self::RandomForest => "random_forest",
            Self::Knn => "knn",
            Self::DecisionTree => "decision_tree",
        }
    }

    /// Built-in candidate filenames, highest priority first
    pub fn default_candidates(&self) -> &'static [&'static str] {
        match self {
            Self::Mlp => &["best_mlp.json", "mlp.json"],
            Self::RandomForest => &["best_random_forest.json", "random_forest.json", "rf.json"],
            Self::Knn => &["best_knn.json", "knn.json"],
            Self::DecisionTree => &["best_decision_tree.json", "decision_tree.json", "dt.json"],
        }
    }
}

impl fmt::Display for ModelAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelAlias {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|alias| alias.as_str() == s)
            .ok_or_else(|| Error::model_not_found(s))
    }
}

/// Ordered candidate filenames per alias
///
/// The first candidate that exists in the models directory wins. Order is
/// the declared priority, never directory listing order.
#[derive(Debug, Clone)]
pub struct CandidateTable {
    entries: HashMap<ModelAlias, Vec<String>>,
}

impl CandidateTable {
    /// Replace the candidates of one alias
    pub fn with_candidates<I, S>(mut self, alias: ModelAlias, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(alias, names.into_iter().map(Into::into).collect());
        self
    }

    /// Candidate filenames for an alias, highest priority first
    pub fn candidates(&self, alias: ModelAlias) -> &[String] {
        self.entries.get(&alias).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First candidate of `alias` that currently exists under `dir`
    pub fn locate(&self, dir: &Path, alias: ModelAlias) -> Option<PathBuf> {
        self.candidates(alias)
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }
}

impl Default for CandidateTable {
    fn default() -> Self {
        let entries = ModelAlias::ALL
            .into_iter()
            .map(|alias| {
                let names = alias
                    .default_candidates()
                    .iter()
                    .map(|name| name.to_string())
                    .collect();
                (alias, names)
            })
            .collect();

        Self { entries }
    }
}
