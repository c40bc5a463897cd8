//! File-based persistence adapters.

mod collection_repository;
mod file_system;

pub use collection_repository::{FileSystemCollectionRepository, parse_request_file};
pub use file_system::TokioFileSystem;
