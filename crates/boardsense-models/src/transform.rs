//! Encoding stages that turn a categorical record into a numeric row

use crate::encoder::FeatureRecord;
use boardsense_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// A fitted encoding stage, tagged by `type` in the artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transformer {
    /// One indicator column per (field, category) pair
    OneHot(OneHotEncoder),
    /// One column per field holding the category index
    Ordinal(OrdinalEncoder),
}

impl Transformer {
    pub fn transform(&self, record: &FeatureRecord) -> Result<Vec<f64>> {
        match self {
            Self::OneHot(encoder) => encoder.transform(record),
            Self::Ordinal(encoder) => encoder.transform(record),
        }
    }

    /// Width of the produced row
    pub fn n_outputs(&self) -> usize {
        match self {
            Self::OneHot(encoder) => encoder.categories.iter().map(Vec::len).sum(),
            Self::Ordinal(encoder) => encoder.categories.len(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let categories = match self {
            Self::OneHot(encoder) => &encoder.categories,
            Self::Ordinal(encoder) => &encoder.categories,
        };

        if categories.is_empty() {
            return Err(Error::artifact("encoder has no columns"));
        }
        if let Some(column) = categories.iter().position(Vec::is_empty) {
            return Err(Error::artifact(format!(
                "encoder column {} has no categories",
                column
            )));
        }
        Ok(())
    }
}

/// What to do with a category not seen during fitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleUnknown {
    #[default]
    Error,
    /// Emit an all-zero block for the column
    Ignore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    /// Known categories per column, in output order
    pub categories: Vec<Vec<String>>,

    #[serde(default)]
    pub handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    pub fn transform(&self, record: &FeatureRecord) -> Result<Vec<f64>> {
        check_columns(self.categories.len(), record)?;

        let mut row = Vec::with_capacity(self.categories.iter().map(Vec::len).sum());
        for (column, (known, value)) in self.categories.iter().zip(record.values()).enumerate() {
            let hit = known.iter().position(|c| c == value);
            if hit.is_none() && self.handle_unknown == HandleUnknown::Error {
                return Err(unknown_category(value, column));
            }
            row.extend((0..known.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
        }
        Ok(row)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdinalEncoder {
    pub categories: Vec<Vec<String>>,
}

impl OrdinalEncoder {
    pub fn transform(&self, record: &FeatureRecord) -> Result<Vec<f64>> {
        check_columns(self.categories.len(), record)?;

        self.categories
            .iter()
            .zip(record.values())
            .enumerate()
            .map(|(column, (known, value))| {
                known
                    .iter()
                    .position(|c| c == value)
                    .map(|i| i as f64)
                    .ok_or_else(|| unknown_category(value, column))
            })
            .collect()
    }
}

fn check_columns(expected: usize, record: &FeatureRecord) -> Result<()> {
    if record.len() != expected {
        return Err(Error::inference(format!(
            "record has {} fields, but the encoder was fitted on {}",
            record.len(),
            expected
        )));
    }
    Ok(())
}

fn unknown_category(value: &str, column: usize) -> Error {
    Error::inference(format!(
        "found unknown category '{}' in column {} during transform",
        value, column
    ))
}
