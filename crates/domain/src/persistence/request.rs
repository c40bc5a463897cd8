//! Request document (one `*.yml` file per request).

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::auth::AuthDocument;
use super::body::BodyDocument;
use super::common::{RequestKind, SettingsSection};
use crate::request::{HttpMethod, ParamKind};

/// A saved HTTP request as it appears on disk.
///
/// Section order follows the declaration order below when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDocument {
    /// Identification and ordering.
    pub info: InfoSection,

    /// The HTTP call itself.
    pub http: HttpSection,

    /// Execution settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsSection>,

    /// Scripts and assertions. Carried as written, never executed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<JsonValue>,

    /// Free-form documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<JsonValue>,
}

/// The `info` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoSection {
    /// Human-readable request name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Always `http`.
    pub kind: RequestKind,

    /// Listing position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<i64>,
}

/// The `http` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSection {
    /// HTTP method.
    pub method: HttpMethod,

    /// Request URL, raw.
    pub url: String,

    /// Header rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<HeaderEntry>>,

    /// Parameter rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<ParamEntry>>,

    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyDocument>,

    /// Request authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthDocument>,
}

/// A header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    /// Header name.
    #[serde(default)]
    pub name: String,

    /// Header value.
    #[serde(default)]
    pub value: String,

    /// Whether the row is switched off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

/// A parameter row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamEntry {
    /// Parameter name.
    #[serde(default)]
    pub name: String,

    /// Parameter value.
    #[serde(default)]
    pub value: String,

    /// `query` or `path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ParamKind>,

    /// Whether the row is switched off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

impl RequestDocument {
    /// Creates a minimal document with only the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            info: InfoSection {
                name: Some(name.into()),
                kind: RequestKind::Http,
                seq: None,
            },
            http: HttpSection {
                method,
                url: url.into(),
                headers: None,
                params: None,
                body: None,
                auth: None,
            },
            settings: None,
            runtime: None,
            docs: None,
        }
    }

    /// Sets the listing position.
    #[must_use]
    pub const fn with_seq(mut self, seq: i64) -> Self {
        self.info.seq = Some(seq);
        self
    }

    /// Appends a header row.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.http
            .headers
            .get_or_insert_with(Vec::new)
            .push(HeaderEntry {
                name: name.into(),
                value: value.into(),
                disabled: None,
            });
        self
    }

    /// Appends a query parameter row.
    #[must_use]
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.http.params.get_or_insert_with(Vec::new).push(ParamEntry {
            name: name.into(),
            value: value.into(),
            kind: Some(ParamKind::Query),
            disabled: None,
        });
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: BodyDocument) -> Self {
        self.http.body = Some(body);
        self
    }

    /// Sets the request authentication.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthDocument) -> Self {
        self.http.auth = Some(auth);
        self
    }

    /// Sets request-specific settings.
    #[must_use]
    pub const fn with_settings(mut self, settings: SettingsSection) -> Self {
        self.settings = Some(settings);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::BodyKind;

    #[test]
    fn test_request_document_new() {
        let document = RequestDocument::new(
            "Get Users",
            HttpMethod::Get,
            "https://api.example.com/users",
        );

        assert_eq!(document.info.name.as_deref(), Some("Get Users"));
        assert_eq!(document.info.kind, RequestKind::Http);
        assert_eq!(document.http.method, HttpMethod::Get);
        assert!(document.http.headers.is_none());
        assert!(document.settings.is_none());
    }

    #[test]
    fn test_request_document_builders() {
        let document = RequestDocument::new("Create", HttpMethod::Post, "https://api.example.com")
            .with_seq(3)
            .with_header("Accept", "application/json")
            .with_query_param("page", "1")
            .with_body(BodyDocument::new(BodyKind::Json, "{}"));

        assert_eq!(document.info.seq, Some(3));
        assert_eq!(document.http.headers.as_ref().map(Vec::len), Some(1));
        assert_eq!(
            document.http.params.as_ref().and_then(|p| p.first()).and_then(|p| p.kind),
            Some(ParamKind::Query)
        );
        assert!(document.http.body.is_some());
    }
}
