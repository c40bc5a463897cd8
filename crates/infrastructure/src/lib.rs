//! Courier Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, the OpenCollection document format,
//! and the crate's public entry points.

pub mod adapters;
pub mod opencollection;
pub mod persistence;

use std::sync::Arc;

use courier_application::{ExecuteRequest, ExecuteResult};
use courier_domain::RequestSpec;

pub use adapters::{HttpClientConfig, ReqwestHttpClient};
pub use courier_application::{
    CancellationToken, ExecuteRequestError, ExecutionErrorKind, ResolvedAuth, resolve_auth,
};
pub use courier_domain::{from_document, to_document};
pub use opencollection::{
    SerializationError, ValidationError, parse_collection_root, parse_request_document,
    serialize_collection_root, serialize_request_document,
};
pub use persistence::{FileSystemCollectionRepository, TokioFileSystem, parse_request_file};

/// Executes a request over the network with the default reqwest client.
///
/// # Errors
///
/// See [`ExecuteRequest::execute`].
pub async fn execute_request(request: &RequestSpec) -> ExecuteResult {
    ExecuteRequest::new(Arc::new(ReqwestHttpClient::new()))
        .execute(request)
        .await
}

/// Executes a request, cancellable through `token`.
///
/// # Errors
///
/// See [`ExecuteRequest::execute_with_cancellation`].
pub async fn execute_request_with_cancellation(
    request: &RequestSpec,
    token: CancellationToken,
) -> ExecuteResult {
    ExecuteRequest::new(Arc::new(ReqwestHttpClient::new()))
        .execute_with_cancellation(request, token)
        .await
}
