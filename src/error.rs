use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoreError>;

/// Failure conditions surfaced by the scoring pipeline.
///
/// Every variant aborts the current comparison; nothing is retried and no
/// partial result is produced.
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Document unreadable: {path}: {reason}")]
    DocumentUnreadable { path: PathBuf, reason: String },

    #[error("Empty input: {0} produced no text to compare")]
    EmptyInput(String),

    #[error("Embedding model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Embedding inference failed: {0}")]
    InferenceFailure(String),

    #[error("Embedding dimension mismatch: rfp vectors have {rfp} dimensions, bid vectors have {bid}")]
    DimensionMismatch { rfp: usize, bid: usize },
}

impl ScoreError {
    pub fn kind(&self) -> &'static str {
        match self {
            ScoreError::InvalidArgument(_) => "invalid_argument",
            ScoreError::DocumentUnreadable { .. } => "document_unreadable",
            ScoreError::EmptyInput(_) => "empty_input",
            ScoreError::ModelUnavailable(_) => "model_unavailable",
            ScoreError::InferenceFailure(_) => "inference_failure",
            ScoreError::DimensionMismatch { .. } => "dimension_mismatch",
        }
    }

    /// Process exit code the CLI uses for this condition.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScoreError::InvalidArgument(_) => 2,
            ScoreError::DocumentUnreadable { .. } => 3,
            ScoreError::EmptyInput(_) => 4,
            ScoreError::ModelUnavailable(_)
            | ScoreError::InferenceFailure(_)
            | ScoreError::DimensionMismatch { .. } => 5,
        }
    }

    pub(crate) fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ScoreError::DocumentUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
