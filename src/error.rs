//! Error taxonomy for the planner

use thiserror::Error;

/// Failures surfaced to callers of the planner
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Empty card set, malformed strategy, or out-of-range field
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reference to a card or user that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PlannerError {
    pub fn invalid(message: impl Into<String>) -> Self {
        PlannerError::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        PlannerError::NotFound(message.into())
    }

    /// True for errors caused by the caller's request rather than a collaborator
    pub fn is_client_error(&self) -> bool {
        matches!(self, PlannerError::InvalidInput(_) | PlannerError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(PlannerError::invalid("empty").is_client_error());
        assert!(PlannerError::not_found("card 1").is_client_error());

        let io = PlannerError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(!io.is_client_error());
    }

    #[test]
    fn test_messages() {
        let err = PlannerError::not_found("Card abc");
        assert_eq!(err.to_string(), "Not found: Card abc");
    }
}
