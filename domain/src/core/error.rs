//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Missing upstream output for task {0}")]
    MissingUpstreamOutput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainError::UnknownTask("surgeon".to_string());
        assert_eq!(error.to_string(), "Unknown task: surgeon");
    }
}
