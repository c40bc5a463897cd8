//! HTTP Request domain types

mod body;
mod header;
mod method;
mod param;
mod settings;
mod spec;

pub use body::{BodyKind, RequestBody};
pub use header::Header;
pub use method::HttpMethod;
pub use param::{Param, ParamKind};
pub use settings::RequestSettings;
pub use spec::{RequestSpec, sort_requests};
