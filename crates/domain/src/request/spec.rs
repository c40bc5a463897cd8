//! Request specification type

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;

use super::{Header, HttpMethod, Param, RequestBody, RequestSettings};
use crate::auth::AuthConfig;

/// The normalized request every other component operates on.
///
/// The identity is the file path the request was loaded from or will be
/// saved to. It is fixed at construction and cannot be reassigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    id: String,
    file_path: PathBuf,
    /// Human-readable name
    pub name: String,
    /// Position in the collection listing
    pub seq: i64,
    /// HTTP method
    pub method: HttpMethod,
    /// Target URL, kept raw
    pub url: String,
    /// Header rows in declaration order
    pub headers: Vec<Header>,
    /// Parameter rows in declaration order
    pub params: Vec<Param>,
    /// Request body
    pub body: RequestBody,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Execution settings
    pub settings: RequestSettings,
    /// Scripts and assertions from the document, carried but never run
    pub runtime: Option<JsonValue>,
    /// Documentation from the document, carried as written
    pub docs: Option<JsonValue>,
}

impl RequestSpec {
    /// Creates a request stored at `file_path` with default values.
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let file_path = file_path.into();
        Self {
            id: file_path.to_string_lossy().into_owned(),
            file_path,
            name: name.into(),
            seq: 1,
            method: HttpMethod::default(),
            url: String::new(),
            headers: Vec::new(),
            params: Vec::new(),
            body: RequestBody::none(),
            auth: AuthConfig::default(),
            settings: RequestSettings::DEFAULT,
            runtime: None,
            docs: None,
        }
    }

    /// Creates a GET request with the given URL.
    #[must_use]
    pub fn get(
        file_path: impl Into<PathBuf>,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let mut request = Self::new(file_path, name);
        request.url = url.into();
        request
    }

    /// Stable identity, equal to the file path.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Location of the request document.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Compares two requests by listing order: `seq`, then `name`.
    #[must_use]
    pub fn display_order(&self, other: &Self) -> Ordering {
        self.seq
            .cmp(&other.seq)
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Sorts requests into listing order.
pub fn sort_requests(requests: &mut [RequestSpec]) {
    requests.sort_by(RequestSpec::display_order);
}
