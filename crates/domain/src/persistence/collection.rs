//! Collection root document (`opencollection.yml`).

use serde::{Deserialize, Serialize};

use super::common::CollectionKind;

/// Version written when a root document does not declare one.
pub const DEFAULT_COLLECTION_VERSION: &str = "0.1";

/// Collection metadata stored once per collection directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRootDocument {
    /// Format version of the collection.
    #[serde(default = "default_version")]
    pub version: String,

    /// Human-readable collection name.
    pub name: String,

    /// Always `collection`.
    #[serde(default)]
    pub kind: CollectionKind,
}

fn default_version() -> String {
    DEFAULT_COLLECTION_VERSION.to_string()
}

impl CollectionRootDocument {
    /// Creates a root document with the default version.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: default_version(),
            name: name.into(),
            kind: CollectionKind::Collection,
        }
    }

    /// Sets the collection version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_new() {
        let root = CollectionRootDocument::new("My API");
        assert_eq!(root.name, "My API");
        assert_eq!(root.version, DEFAULT_COLLECTION_VERSION);
        assert_eq!(root.kind, CollectionKind::Collection);
    }

    #[test]
    fn test_collection_with_version() {
        let root = CollectionRootDocument::new("My API").with_version("1.0");
        assert_eq!(root.version, "1.0");
    }
}
