//! Random forest: probability averaged over decision trees

use super::tree::{leaf_value, validate_nodes, TreeNode};
use super::{ensure_width, normalize, Classifier, ProbabilisticClassifier};
use boardsense_core::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub classes: Vec<i64>,
    pub n_features: usize,
    pub trees: Vec<ForestTree>,
}

impl Classifier for RandomForest {
    fn kind(&self) -> &'static str {
        "random_forest"
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn scores(&self, x: &[f64]) -> Result<Vec<f64>> {
        self.predict_proba(x)
    }

    fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(Error::artifact("forest has no trees"));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            validate_nodes(&tree.nodes, self.classes.len(), self.n_features)
                .map_err(|e| Error::artifact(format!("tree {}: {}", i, e)))?;
        }
        Ok(())
    }
}

impl ProbabilisticClassifier for RandomForest {
    fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>> {
        ensure_width(self.kind(), self.n_features, x)?;

        let mut total = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let proba = normalize(leaf_value(&tree.nodes, x)?)?;
            for (sum, p) in total.iter_mut().zip(proba) {
                *sum += p;
            }
        }

        let n = self.trees.len() as f64;
        Ok(total.into_iter().map(|p| p / n).collect())
    }
}
