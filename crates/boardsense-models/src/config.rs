//! Bridge configuration

use crate::alias::{CandidateTable, ModelAlias};
use boardsense_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where artifacts live and what they may be called
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Directory holding the exported artifacts
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// Per-alias candidate filename overrides, highest priority first
    #[serde(default)]
    pub candidates: HashMap<ModelAlias, Vec<String>>,
}

impl BridgeConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::config(e.to_string()))
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }

    /// Load from file if it exists, otherwise use defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Override the models directory
    pub fn with_models_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.models_dir = dir.into();
        self
    }

    /// Built-in candidate names with this config's overrides applied
    pub fn candidate_table(&self) -> CandidateTable {
        self.candidates
            .iter()
            .fold(CandidateTable::default(), |table, (alias, names)| {
                table.with_candidates(*alias, names.iter().cloned())
            })
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            models_dir: default_models_dir(),
            candidates: HashMap::new(),
        }
    }
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("./data/models")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_config_yaml() {
        let yaml = r#"
models_dir: /srv/models
candidates:
  mlp:
    - net_v2.json
    - net.json
"#;

        let config = BridgeConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.models_dir, PathBuf::from("/srv/models"));

        let table = config.candidate_table();
        assert_eq!(table.candidates(ModelAlias::Mlp), ["net_v2.json", "net.json"]);
        assert_eq!(table.candidates(ModelAlias::Knn), ["best_knn.json", "knn.json"]);
    }

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::from_yaml("{}").unwrap();
        assert_eq!(config.models_dir, PathBuf::from("./data/models"));
        assert!(config.candidates.is_empty());
    }

    #[test]
    fn test_unknown_alias_in_overrides_is_rejected() {
        let yaml = "candidates:\n  svm: [svm.json]\n";
        let err = BridgeConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        assert_eq!(
            BridgeConfig::load_or_default(&missing).unwrap().models_dir,
            PathBuf::from("./data/models")
        );

        let present = dir.path().join("boardsense.yaml");
        std::fs::write(&present, "models_dir: ./elsewhere\n").unwrap();
        let config = BridgeConfig::load_or_default(&present)
            .unwrap()
            .with_models_dir("/override");
        assert_eq!(config.models_dir, PathBuf::from("/override"));

        std::fs::write(&present, "models_dir: [unclosed\n").unwrap();
        assert!(BridgeConfig::load_or_default(&present).is_err());
    }
}
