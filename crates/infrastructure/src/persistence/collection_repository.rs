//! File system based collection repository implementation.
//!
//! A collection is a directory holding `opencollection.yml` and any number
//! of request documents (`*.yml` / `*.yaml`) at any depth below it.

use std::path::Path;

use courier_application::ports::{
    COLLECTION_ROOT_FILE, CollectionError, CollectionRepository, CollectionTree, FileSystem,
};
use courier_domain::persistence::CollectionRootDocument;
use courier_domain::request::sort_requests;
use courier_domain::{RequestSpec, from_document, to_document};
use tracing::{debug, warn};

use crate::opencollection::{
    parse_collection_root, parse_request_document, serialize_collection_root,
    serialize_request_document,
};

/// File system based implementation of `CollectionRepository`.
pub struct FileSystemCollectionRepository<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> FileSystemCollectionRepository<F> {
    /// Creates a new repository with the given file system implementation.
    #[must_use]
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }
}

/// Returns true for files that may hold a request document.
fn is_document_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
}

/// Validates and adapts one request document.
///
/// # Errors
///
/// Returns `CollectionError::InvalidDocument` naming `path` if the text
/// fails validation or cannot be mapped to a request.
pub fn parse_request_file(content: &str, path: &Path) -> Result<RequestSpec, CollectionError> {
    let invalid = |message: String| {
        warn!(path = %path.display(), %message, "invalid request document");
        CollectionError::InvalidDocument {
            path: path.to_path_buf(),
            message,
        }
    };

    let document = parse_request_document(content).map_err(|e| invalid(e.to_string()))?;
    from_document(&document, path).map_err(|e| invalid(e.to_string()))
}

impl<F: FileSystem> CollectionRepository for FileSystemCollectionRepository<F> {
    async fn load_collection(
        &self,
        collection_dir: &Path,
    ) -> Result<CollectionTree, CollectionError> {
        let root_path = collection_dir.join(COLLECTION_ROOT_FILE);
        if !self.fs.exists(&root_path).await {
            return Err(CollectionError::NotFound(collection_dir.to_path_buf()));
        }

        let mut root: Option<CollectionRootDocument> = None;
        let mut requests = Vec::new();
        for file in self.fs.list_files(collection_dir).await? {
            if file.file_path == root_path {
                let parsed = parse_collection_root(&file.content).map_err(|e| {
                    CollectionError::InvalidDocument {
                        path: file.file_path.clone(),
                        message: e.to_string(),
                    }
                })?;
                root = Some(parsed);
            } else if is_document_file(&file.file_path) {
                requests.push(parse_request_file(&file.content, &file.file_path)?);
            }
        }

        let root = root.ok_or_else(|| CollectionError::NotFound(collection_dir.to_path_buf()))?;
        sort_requests(&mut requests);
        debug!(
            collection = %root.name,
            requests = requests.len(),
            "collection loaded"
        );

        Ok(CollectionTree { root, requests })
    }

    async fn save_root(
        &self,
        collection_dir: &Path,
        root: &CollectionRootDocument,
    ) -> Result<(), CollectionError> {
        let yaml =
            serialize_collection_root(root).map_err(|e| CollectionError::Serialization(e.to_string()))?;
        let root_path = collection_dir.join(COLLECTION_ROOT_FILE);
        self.fs.write_file(&root_path, yaml.as_bytes()).await?;
        debug!(path = %root_path.display(), "collection root saved");
        Ok(())
    }

    async fn load_request(&self, request_path: &Path) -> Result<RequestSpec, CollectionError> {
        if !self.fs.exists(request_path).await {
            return Err(CollectionError::RequestNotFound(request_path.to_path_buf()));
        }
        let content = self.fs.read_file_string(request_path).await?;
        parse_request_file(&content, request_path)
    }

    async fn save_request(&self, request: &RequestSpec) -> Result<(), CollectionError> {
        let document = to_document(request);
        let yaml = serialize_request_document(&document)
            .map_err(|e| CollectionError::Serialization(e.to_string()))?;
        self.fs.write_file(request.file_path(), yaml.as_bytes()).await?;
        debug!(path = %request.file_path().display(), "request saved");
        Ok(())
    }

    async fn delete_request(&self, request_path: &Path) -> Result<(), CollectionError> {
        if !self.fs.exists(request_path).await {
            return Err(CollectionError::RequestNotFound(request_path.to_path_buf()));
        }
        self.fs.remove_file(request_path).await?;
        debug!(path = %request_path.display(), "request deleted");
        Ok(())
    }
}
