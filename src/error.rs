//! Error types for chord analysis

use thiserror::Error;

/// Errors that can occur during chord analysis
///
/// Only structurally invalid input surfaces here. Degenerate windows (silence,
/// zero-norm chroma) are handled inside the pipeline and simply produce no
/// chord segment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// No samples, or a sample rate of zero
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Analysis configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid arguments to a helper function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The caller raised the cancellation flag while windows were being analyzed
    #[error("Analysis cancelled")]
    Cancelled,
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = AnalysisError::EmptyInput("no samples".to_string());
        assert_eq!(err.to_string(), "Empty input: no samples");

        let err = AnalysisError::InvalidConfig("hop_seconds must be > 0".to_string());
        assert!(err.to_string().contains("hop_seconds"));

        assert_eq!(AnalysisError::Cancelled.to_string(), "Analysis cancelled");
    }
}
