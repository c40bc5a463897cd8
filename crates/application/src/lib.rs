//! Courier Application - Use cases and ports
//!
//! This crate resolves auth, assembles and executes requests, and defines
//! the ports (interfaces) implemented by the infrastructure layer.

pub mod auth;
pub mod execute_request;
pub mod ports;

pub use auth::{ResolvedAuth, resolve_auth};
pub use execute_request::{
    ExecuteRequest, ExecuteRequestError, ExecuteResult, ExecutionErrorKind, prepare_request,
};
pub use ports::{
    CancelReason, CancellationReceiver, CancellationToken, CollectionError, CollectionRepository,
    CollectionTree, FileSystem, FileSystemError, HttpClient, HttpClientError, PreparedRequest,
    RawResponse, RedirectPolicy, StoredFile,
};
