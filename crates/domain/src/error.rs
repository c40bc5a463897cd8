//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or mapping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The auth kind is accepted by the document format but has no domain mapping.
    #[error("unsupported auth kind '{0}': only none, inherit, basic, bearer and apikey can be used")]
    UnsupportedAuthKind(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
