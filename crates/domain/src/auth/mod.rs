//! Authentication domain types

mod types;

pub use types::{ApiKeyPlacement, AuthConfig};
