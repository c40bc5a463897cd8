//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod collection_repository;
mod file_system;
mod http_client;

pub use collection_repository::{
    COLLECTION_ROOT_FILE, CollectionError, CollectionRepository, CollectionTree,
};
pub use file_system::{FileSystem, FileSystemError, StoredFile};
pub use http_client::{
    CancelReason, CancellationReceiver, CancellationToken, HttpClient, HttpClientError,
    PreparedRequest, RawResponse, RedirectPolicy,
};
