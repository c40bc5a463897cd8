//! Courier Domain - Core business types
//!
//! This crate defines the request model, the OpenCollection document model
//! and the pure mapping between them. All types here are pure Rust with no
//! I/O dependencies.

pub mod auth;
pub mod error;
pub mod persistence;
pub mod request;
pub mod response;

pub use auth::{ApiKeyPlacement, AuthConfig};
pub use error::{DomainError, DomainResult};
pub use persistence::{from_document, to_document};
pub use request::{RequestSettings, RequestSpec};
pub use response::ResponseSpec;
