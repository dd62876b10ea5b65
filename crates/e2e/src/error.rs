//! Error types for E2E runs

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("{0}")]
    Scenario(#[from] booker_common::Error),

    #[error("Scenario {name} timed out after {seconds}s")]
    Timeout { name: String, seconds: u64 },

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;

/// How a scenario failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// An expectation about a response was not met
    Assertion,
    /// Transport, configuration or other setup problem
    Error,
    Timeout,
}

impl E2eError {
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            E2eError::Scenario(e) if e.is_assertion() => FailureKind::Assertion,
            E2eError::Timeout { .. } => FailureKind::Timeout,
            _ => FailureKind::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind() {
        let assertion = E2eError::from(booker_common::Error::Assertion("x".to_string()));
        assert_eq!(assertion.failure_kind(), FailureKind::Assertion);

        let token = E2eError::from(booker_common::Error::TokenMissing {
            status: 200,
            body: String::new(),
        });
        assert_eq!(token.failure_kind(), FailureKind::Assertion);

        let config = E2eError::from(booker_common::Error::InvalidConfig("BASE_URL".to_string()));
        assert_eq!(config.failure_kind(), FailureKind::Error);

        let timeout = E2eError::Timeout {
            name: "booking-lifecycle".to_string(),
            seconds: 30,
        };
        assert_eq!(timeout.failure_kind(), FailureKind::Timeout);
    }
}
