//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while preparing regression test data
#[derive(Debug, Error)]
pub enum TestError {
    /// Synthetic data could not be assembled into a matrix
    #[error("failed to build synthetic data '{name}': {source}")]
    Synthetic {
        name: String,
        #[source]
        source: ieit_core::Error,
    },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
