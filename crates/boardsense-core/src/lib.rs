//! Boardsense Core
//!
//! Types shared by the Boardsense crates.
//!
//! This crate provides:
//! - The error taxonomy and result alias
//! - The frozen response documents written to stdout by the CLI
//! - The class label table shared with the invoking game engine

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{class_label, ErrorResponse, InfoResponse, PredictionResult, CLASS_LABELS};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{class_label, ErrorResponse, InfoResponse, PredictionResult};
}
