//! Single decision tree

use super::{ensure_width, normalize, Classifier, ProbabilisticClassifier};
use boardsense_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// A tree node; children always sit after their parent in the node list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go to `left` when `x[feature] <= threshold`, else to `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Training weight per class reaching this leaf
    Leaf { value: Vec<f64> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub classes: Vec<i64>,
    pub n_features: usize,
    pub nodes: Vec<TreeNode>,
}

/// Leaf weights reached by `x`, starting at the root
pub(crate) fn leaf_value<'a>(nodes: &'a [TreeNode], x: &[f64]) -> Result<&'a [f64]> {
    let mut index = 0;
    for _ in 0..=nodes.len() {
        match nodes.get(index) {
            Some(TreeNode::Leaf { value }) => return Ok(value),
            Some(TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            }) => {
                let v = x.get(*feature).ok_or_else(|| {
                    Error::inference(format!("split on missing feature {}", feature))
                })?;
                index = if v <= threshold { *left } else { *right };
            }
            None => return Err(Error::inference(format!("tree node {} out of range", index))),
        }
    }
    Err(Error::inference("tree walk did not reach a leaf"))
}

/// Check node links point forward and leaves match the class count
pub(crate) fn validate_nodes(nodes: &[TreeNode], n_classes: usize, n_features: usize) -> Result<()> {
    if nodes.is_empty() {
        return Err(Error::artifact("tree has no nodes"));
    }

    for (i, node) in nodes.iter().enumerate() {
        match node {
            TreeNode::Split {
                feature,
                left,
                right,
                ..
            } => {
                if *feature >= n_features {
                    return Err(Error::artifact(format!(
                        "node {} splits on feature {} of {}",
                        i, feature, n_features
                    )));
                }
                for child in [left, right] {
                    if *child <= i || *child >= nodes.len() {
                        return Err(Error::artifact(format!(
                            "node {} links to invalid child {}",
                            i, child
                        )));
                    }
                }
            }
            TreeNode::Leaf { value } => {
                if value.len() != n_classes {
                    return Err(Error::artifact(format!(
                        "leaf {} has {} weights for {} classes",
                        i,
                        value.len(),
                        n_classes
                    )));
                }
                if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(Error::artifact(format!("leaf {} has a negative weight", i)));
                }
                if value.iter().sum::<f64>() <= 0.0 {
                    return Err(Error::artifact(format!("leaf {} is empty", i)));
                }
            }
        }
    }
    Ok(())
}

impl Classifier for DecisionTree {
    fn kind(&self) -> &'static str {
        "decision_tree"
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
        validate_nodes(&self.nodes, self.classes.len(), self.n_features)
    }
}

impl ProbabilisticClassifier for DecisionTree {
    fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>> {
        ensure_width(self.kind(), self.n_features, x)?;
        normalize(leaf_value(&self.nodes, x)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// x[0] <= 0.5 ? (x[1] <= 0.5 ? class 0 : class 1) : class 2
    fn stump() -> DecisionTree {
        serde_json::from_str(
            r#"{
                "classes": [0, 1, 2],
                "n_features": 2,
                "nodes": [
                    {"feature": 0, "threshold": 0.5, "left": 1, "right": 4},
                    {"feature": 1, "threshold": 0.5, "left": 2, "right": 3},
                    {"value": [8.0, 2.0, 0.0]},
                    {"value": [1.0, 3.0, 0.0]},
                    {"value": [0.0, 0.0, 5.0]}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_tree_routing() {
        let tree = stump();
        tree.validate().unwrap();

        assert_eq!(tree.predict(&[0.0, 0.0]).unwrap(), 0);
        assert_eq!(tree.predict(&[0.0, 1.0]).unwrap(), 1);
        assert_eq!(tree.predict(&[1.0, 0.0]).unwrap(), 2);
    }

    #[test]
    fn test_tree_probabilities() {
        let proba = stump().predict_proba(&[0.0, 0.0]).unwrap();
        assert_eq!(proba, vec![0.8, 0.2, 0.0]);
    }

    #[test]
    fn test_tree_rejects_wrong_width() {
        let err = stump().predict(&[0.0]).unwrap_err();
        assert!(err.to_string().contains("expecting 2 features"));
    }

    #[test]
    fn test_validate_rejects_backward_links() {
        let mut tree = stump();
        tree.nodes[1] = TreeNode::Split {
            feature: 1,
            threshold: 0.5,
            left: 0,
            right: 3,
        };
        assert!(tree.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_leaf() {
        let mut tree = stump();
        tree.nodes[4] = TreeNode::Leaf { value: vec![1.0] };
        assert!(tree.validate().is_err());
    }
}
