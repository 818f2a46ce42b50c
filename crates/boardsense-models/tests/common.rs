//! Artifact fixtures shared by the integration tests

#![allow(dead_code)]

use std::path::Path;

fn board_categories() -> String {
    vec![r#"["b","o","x"]"#; 9].join(",")
}

/// One-hot prep feeding a single dense layer whose biases favour class 0
pub fn mlp_pipeline() -> String {
    let zero_row = vec!["0.0"; 27].join(",");
    let weights = vec![format!("[{}]", zero_row); 3].join(",");
    format!(
        r#"{{"kind": "pipeline", "steps": [
            {{"name": "prep", "transformer": {{"type": "one_hot", "categories": [{cats}]}}}},
            {{"name": "clf", "estimator": {{"type": "mlp", "classes": [0, 1, 2],
                "layers": [{{"weights": [{weights}], "biases": [2.0, 0.5, 0.0]}}]}}}}
        ]}}"#,
        cats = board_categories(),
        weights = weights
    )
}

/// Ordinal prep and a forest that votes on the centre cell
pub fn forest_pipeline() -> String {
    format!(
        r#"{{"kind": "pipeline", "steps": [
            {{"name": "prep", "transformer": {{"type": "ordinal", "categories": [{cats}]}}}},
            {{"name": "clf", "estimator": {{"type": "random_forest", "classes": [0, 1, 2], "n_features": 9,
                "trees": [
                    {{"nodes": [
                        {{"feature": 4, "threshold": 0.5, "left": 1, "right": 2}},
                        {{"value": [5.0, 1.0, 0.0]}},
                        {{"value": [0.0, 2.0, 2.0]}}
                    ]}},
                    {{"nodes": [{{"value": [1.0, 1.0, 2.0]}}]}}
                ]}}}}
        ]}}"#,
        cats = board_categories()
    )
}

/// Bare linear model over numeric boards; no probability output
pub fn direct_svc() -> String {
    r#"{"kind": "estimator", "estimator": {"type": "linear_svc", "classes": [0, 1, 2],
        "coef": [[1,0,0,0,0,0,0,0,0],[0,1,0,0,0,0,0,0,0],[0,0,1,0,0,0,0,0,0]],
        "intercept": [0.0, 0.0, 0.0]}}"#
        .to_string()
}

/// Bare tree over numeric boards that predicts class 7, which has no label
pub fn direct_unlabelled_tree() -> String {
    r#"{"kind": "estimator", "estimator": {"type": "decision_tree", "classes": [0, 7],
        "n_features": 9, "nodes": [{"value": [1.0, 9.0]}]}}"#
        .to_string()
}

/// Bare tree fitted without class 0; class 1 holds 90% of the leaf
pub fn direct_offset_tree() -> String {
    r#"{"kind": "estimator", "estimator": {"type": "decision_tree", "classes": [1, 2],
        "n_features": 9, "nodes": [{"value": [9.0, 1.0]}]}}"#
        .to_string()
}

pub fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}
