//! HTTP Request body types

use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared kind of a request body.
///
/// The kind is informational: the executor sends `data` verbatim and never
/// derives a `Content-Type` from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BodyKind {
    /// No body
    #[default]
    None,
    /// JSON text
    Json,
    /// Plain text
    Text,
    /// XML text
    Xml,
    /// URL-encoded form text
    FormUrlencoded,
    /// Multipart form text
    MultipartForm,
    /// GraphQL query text
    Graphql,
}

impl BodyKind {
    /// Kinds a document may declare. `none` is expressed by omitting the body.
    pub const DOCUMENT_KINDS: &'static [Self] = &[
        Self::Json,
        Self::Text,
        Self::Xml,
        Self::FormUrlencoded,
        Self::MultipartForm,
        Self::Graphql,
    ];

    /// Returns the wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Json => "json",
            Self::Text => "text",
            Self::Xml => "xml",
            Self::FormUrlencoded => "form-urlencoded",
            Self::MultipartForm => "multipart-form",
            Self::Graphql => "graphql",
        }
    }

    /// Looks up a kind a document is allowed to declare.
    #[must_use]
    pub fn from_document_kind(kind: &str) -> Option<Self> {
        Self::DOCUMENT_KINDS
            .iter()
            .copied()
            .find(|candidate| candidate.as_str() == kind)
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP request body with its declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestBody {
    /// The kind of body
    pub kind: BodyKind,
    /// The raw payload
    pub data: String,
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            kind: BodyKind::None,
            data: String::new(),
        }
    }

    /// Creates a body of the given kind. A `none` body always drops its data.
    #[must_use]
    pub fn new(kind: BodyKind, data: impl Into<String>) -> Self {
        match kind {
            BodyKind::None => Self::none(),
            _ => Self {
                kind,
                data: data.into(),
            },
        }
    }

    /// Creates a JSON body.
    #[must_use]
    pub fn json(data: impl Into<String>) -> Self {
        Self::new(BodyKind::Json, data)
    }

    /// Creates a plain text body.
    #[must_use]
    pub fn text(data: impl Into<String>) -> Self {
        Self::new(BodyKind::Text, data)
    }

    /// Returns true if the body kind is `none`.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self.kind, BodyKind::None)
    }
}
