use serde::{Deserialize, Serialize};

/// One entry of the error log: a file excluded from the stack and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub name: String,
    pub reason: String,
}

impl SkippedFile {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Common error type for the aggregation pipeline.
#[derive(thiserror::Error, Debug)]
pub enum StackError {
    #[error("load failure: {0}")]
    Load(String),
    #[error("grid mismatch: {0}")]
    GridMismatch(String),
    #[error("normalization failure: {0}")]
    Normalization(String),
    #[error("no valid input periodograms")]
    NoValidInput,
}

pub type StackResult<T> = Result<T, StackError>;
