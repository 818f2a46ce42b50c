//! Board string to feature record encoding
//!
//! The record is positional: field `i` is board cell `i`, exactly as the
//! artifacts were trained. Nothing here may reorder cells; a permuted record
//! still classifies, just wrongly.

use boardsense_core::{Error, Result};

/// Number of cells on a tic-tac-toe board
pub const BOARD_CELLS: usize = 9;

const WRONG_LENGTH: &str = "board must contain 9 comma-separated positions";

/// Single-row categorical record with fields keyed `"0"` through `"8"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    cells: Vec<String>,
}

impl FeatureRecord {
    /// Number of fields
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw category held at a position
    pub fn get(&self, position: usize) -> Option<&str> {
        self.cells.get(position).map(String::as_str)
    }

    /// Fields as `(key, value)` pairs in ordinal order
    pub fn fields(&self) -> impl Iterator<Item = (String, &str)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, value)| (i.to_string(), value.as_str()))
    }

    /// Values in ordinal order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(String::as_str)
    }

    /// Interpret every field as a number
    ///
    /// Used when a model has no encoding stage of its own. Board symbols are
    /// not numbers, so this fails for ordinary boards.
    pub fn to_numeric(&self) -> Result<Vec<f64>> {
        self.cells
            .iter()
            .enumerate()
            .map(|(column, value)| {
                value.parse::<f64>().map_err(|_| {
                    Error::inference(format!(
                        "could not convert '{}' in column {} to a number",
                        value, column
                    ))
                })
            })
            .collect()
    }
}

/// Parses comma-separated boards into feature records
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardEncoder;

impl BoardEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Split on commas, trim each token, and require exactly nine of them
    ///
    /// Token values are not checked against `x`/`o`/`b`; rejecting unknown
    /// symbols is left to the model's own encoding stage.
    pub fn parse(&self, board: &str) -> Result<FeatureRecord> {
        let cells: Vec<String> = board.split(',').map(|s| s.trim().to_string()).collect();

        if cells.len() != BOARD_CELLS {
            return Err(Error::validation(WRONG_LENGTH));
        }

        Ok(FeatureRecord { cells })
    }
}
