//! Error types for the featstore crate.

use crate::tensor::DType;
use thiserror::Error;

/// Top-level error type for feature store operations.
///
/// All errors are raised synchronously to the caller; nothing is retried or
/// recovered internally. Failed operations leave the store unchanged, with
/// one documented exception: a whole-feature `update` (no ids) is an
/// unconditional replacement and cannot fail after the key lookup.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("feature key not found: {key}")]
    KeyNotFound { key: String },

    #[error("dtype mismatch for feature {key}: expected {expected}, got {actual}")]
    DtypeMismatch {
        key: String,
        expected: DType,
        actual: DType,
    },

    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("row index {index} out of bounds for feature with {num_rows} rows")]
    IndexOutOfBounds { index: usize, num_rows: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl StoreError {
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    pub fn shape_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Attach the owning feature key to errors raised by tensor-level ops,
    /// which do not know which feature they belong to.
    pub fn for_key(self, key: &str) -> Self {
        match self {
            Self::DtypeMismatch {
                expected, actual, ..
            } => Self::DtypeMismatch {
                key: key.to_string(),
                expected,
                actual,
            },
            other => other,
        }
    }
}
