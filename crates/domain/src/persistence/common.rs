//! Common types shared across the document models.

use serde::{Deserialize, Serialize};

/// Document kind tag for request files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    /// A plain HTTP request.
    #[default]
    Http,
}

/// Document kind tag for the collection root file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// The collection root.
    #[default]
    Collection,
}

/// The `settings` section of a request document.
///
/// Every field is optional on disk; absent fields are filled from
/// [`RequestSettings::DEFAULT`](crate::request::RequestSettings::DEFAULT)
/// independently of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSection {
    /// Whether the URL is sent percent-encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encode_url: Option<bool>,

    /// Request timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,

    /// Whether to follow HTTP redirects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_redirects: Option<bool>,

    /// Maximum number of redirects to follow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_redirects: Option<u32>,
}
