//! Error types for ieit-recog

use thiserror::Error;

/// Errors that can occur during training and classification
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error (invalid matrices, source lookups)
    #[error("core error: {0}")]
    Core(#[from] ieit_core::Error),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Neighbor pairing needs at least two classes
    #[error("at least 2 classes are required, got {count}")]
    TooFewClasses { count: usize },

    /// Exam score is undefined for a class whose radius is missing or zero
    #[error("exam undefined for class {class}: radius {radius:?}")]
    ExamUndefined { class: usize, radius: Option<usize> },

    /// The run was cancelled through its [`CancelToken`](crate::CancelToken)
    #[error("{stage} cancelled at step {step}")]
    Cancelled { stage: &'static str, step: usize },
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
