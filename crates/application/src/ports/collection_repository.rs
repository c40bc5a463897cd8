//! Collection repository port.

use std::future::Future;
use std::path::{Path, PathBuf};

use courier_domain::RequestSpec;
use courier_domain::persistence::CollectionRootDocument;

/// File name of the collection root document.
pub const COLLECTION_ROOT_FILE: &str = "opencollection.yml";

/// Error type for collection operations.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    /// Collection not found.
    #[error("Collection not found: {0}")]
    NotFound(PathBuf),

    /// Request not found.
    #[error("Request not found: {0}")]
    RequestNotFound(PathBuf),

    /// A document failed validation or could not be mapped.
    #[error("Invalid document {path}: {message}")]
    InvalidDocument {
        /// File the document was read from.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File system error.
    #[error("File system error: {0}")]
    FileSystem(String),
}

impl From<super::FileSystemError> for CollectionError {
    fn from(error: super::FileSystemError) -> Self {
        Self::FileSystem(error.to_string())
    }
}

/// A loaded collection: its root document and every request below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionTree {
    /// The collection root document.
    pub root: CollectionRootDocument,
    /// Requests in listing order (`seq`, then `name`).
    pub requests: Vec<RequestSpec>,
}

impl CollectionTree {
    /// Finds a request by its identity.
    #[must_use]
    pub fn request(&self, id: &str) -> Option<&RequestSpec> {
        self.requests.iter().find(|request| request.id() == id)
    }
}

/// Repository for collection and request file operations.
pub trait CollectionRepository: Send + Sync {
    /// Loads a collection root and all requests below `collection_dir`.
    ///
    /// # Errors
    ///
    /// Fails if the root document is missing, or on the first file that is
    /// not a valid document.
    fn load_collection(
        &self,
        collection_dir: &Path,
    ) -> impl Future<Output = Result<CollectionTree, CollectionError>> + Send;

    /// Writes the collection root document into `collection_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save_root(
        &self,
        collection_dir: &Path,
        root: &CollectionRootDocument,
    ) -> impl Future<Output = Result<(), CollectionError>> + Send;

    /// Loads one request document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or invalid.
    fn load_request(
        &self,
        request_path: &Path,
    ) -> impl Future<Output = Result<RequestSpec, CollectionError>> + Send;

    /// Writes a request to its own file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save_request(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<(), CollectionError>> + Send;

    /// Deletes a request file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be removed.
    fn delete_request(
        &self,
        request_path: &Path,
    ) -> impl Future<Output = Result<(), CollectionError>> + Send;
}
