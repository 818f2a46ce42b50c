//! Response documents exchanged with the invoking game engine
//!
//! Every invocation of the bridge writes exactly one of these to stdout.
//! Field names and order are part of the subprocess contract.

use serde::{Deserialize, Serialize};

/// Class index to label mapping baked into the trained artifacts
pub const CLASS_LABELS: [(i64, &str); 3] = [
    (0, "Has Game"),
    (1, "Possible End of Game"),
    (2, "End of Game"),
];

/// Label for a predicted class, `"Unknown"` for anything unmapped
pub fn class_label(class: i64) -> &'static str {
    CLASS_LABELS
        .iter()
        .find(|(id, _)| *id == class)
        .map(|(_, label)| *label)
        .unwrap_or("Unknown")
}

/// Outcome of a single `predict` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionResult {
    /// The model classified the board
    Success {
        model: String,
        prediction_int: i64,
        prediction_label: String,
        /// Probability assigned to the predicted class (0.0-1.0), if obtainable
        confidence: Option<f64>,
    },

    /// The request could not be served; the invocation itself still succeeds
    Failure { model: String, error: String },
}

impl PredictionResult {
    /// Build a success document, deriving the label from the class
    pub fn success(model: impl Into<String>, class: i64, confidence: Option<f64>) -> Self {
        Self::Success {
            model: model.into(),
            prediction_int: class,
            prediction_label: class_label(class).to_string(),
            confidence,
        }
    }

    /// Build a failure document tagged with the requested alias
    pub fn failure(model: impl Into<String>, error: impl ToString) -> Self {
        Self::Failure {
            model: model.into(),
            error: error.to_string(),
        }
    }

    /// Alias the request was made for
    pub fn model(&self) -> &str {
        match self {
            Self::Success { model, .. } | Self::Failure { model, .. } => model,
        }
    }

    /// Check whether this document carries an `error` key
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Confidence of a successful prediction
    pub fn confidence(&self) -> Option<f64> {
        match self {
            Self::Success { confidence, .. } => *confidence,
            Self::Failure { .. } => None,
        }
    }
}

/// Response to the `info` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoResponse {
    pub available_models: Vec<String>,
}

/// Standalone error document without alias context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}
