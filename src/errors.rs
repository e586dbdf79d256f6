// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for mock stub configuration

use thiserror::Error;

/// Errors that can occur while building or registering stub scenarios
#[derive(Debug, Error)]
pub enum MockError {
    /// Mock server admin API rejected a request or is unreachable
    #[error("mock server admin error: {0}")]
    Admin(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration error (malformed matcher, conflicting rules)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Domain object builder given inconsistent or missing fields
    #[error("build error: {0}")]
    Build(String),

    /// Scenario state chain does not thread from one rule to the next
    #[error(
        "broken state chain in scenario '{scenario}' at rule {index}: \
         expected required state '{expected}', found '{found}'"
    )]
    ChainBroken {
        scenario: String,
        index: usize,
        expected: String,
        found: String,
    },
}

/// Result type for stub configuration operations
pub type MockResult<T> = Result<T, MockError>;

impl From<serde_json::Error> for MockError {
    fn from(err: serde_json::Error) -> Self {
        MockError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for MockError {
    fn from(err: reqwest::Error) -> Self {
        MockError::Admin(err.to_string())
    }
}
