//! Authentication resolution for request execution.

mod resolver;

pub use resolver::{AUTHORIZATION, ResolvedAuth, resolve_auth};
