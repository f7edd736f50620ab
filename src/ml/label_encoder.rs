//! Categorical label encoder loaded from a JSON export.
//!
//! Classes are kept sorted and unique, so a label's code is its position in the list
//! (`["Female", "Male"]` encodes `Female` as 0 and `Male` as 1).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncoderError {
    #[error("Invalid label encoder JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Label encoder has no classes")]
    Empty,
    #[error("Label encoder classes must be sorted and unique ({previous:?} before {next:?})")]
    Unsorted { previous: String, next: String },
    #[error("Label {0:?} was not seen when the encoder was fitted")]
    UnknownLabel(String),
    #[error("Code {index} is out of range for {len} classes")]
    UnknownCode { index: usize, len: usize },
}

/// Maps category strings to dense integer codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EncoderFile")]
pub struct LabelEncoder {
    classes: Vec<String>,
}

#[derive(Deserialize)]
struct EncoderFile {
    classes: Vec<String>,
}

impl TryFrom<EncoderFile> for LabelEncoder {
    type Error = EncoderError;

    fn try_from(file: EncoderFile) -> Result<Self, Self::Error> {
        Self::new(file.classes)
    }
}

impl LabelEncoder {
    /// Build an encoder from already-sorted class labels.
    pub fn new(classes: Vec<String>) -> Result<Self, EncoderError> {
        if classes.is_empty() {
            return Err(EncoderError::Empty);
        }
        for pair in classes.windows(2) {
            if pair[0] >= pair[1] {
                return Err(EncoderError::Unsorted {
                    previous: pair[0].clone(),
                    next: pair[1].clone(),
                });
            }
        }
        Ok(Self { classes })
    }

    /// Parse and validate a JSON export.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, EncoderError> {
        let file: EncoderFile = serde_json::from_slice(bytes)?;
        Self::new(file.classes)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Code for `label`, failing for labels outside the fitted classes.
    pub fn transform(&self, label: &str) -> Result<usize, EncoderError> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .map_err(|_| EncoderError::UnknownLabel(label.to_string()))
    }

    pub fn inverse_transform(&self, index: usize) -> Result<&str, EncoderError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(EncoderError::UnknownCode {
                index,
                len: self.classes.len(),
            })
    }
}
