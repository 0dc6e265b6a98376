//! Domain-level errors.
//!
//! These errors represent business rule violations.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required discriminator field was missing when a builder was created.
    /// The message is safe to show to clients.
    #[error("{0}")]
    Configuration(String),

    /// A value could not be parsed into its domain type
    #[error("Invalid {kind}: '{value}'")]
    InvalidValue { kind: &'static str, value: String },
}

impl DomainError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        DomainError::Configuration(msg.into())
    }

    /// Create an invalid value error
    pub fn invalid_value(kind: &'static str, value: impl Into<String>) -> Self {
        DomainError::InvalidValue {
            kind,
            value: value.into(),
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
