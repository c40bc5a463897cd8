//! Body section of a request document.

use serde::{Deserialize, Serialize};

use crate::request::BodyKind;

/// The `http.body` value.
///
/// An absent body means "no body"; `kind` is therefore never `none` in a
/// document written by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyDocument {
    /// Declared body kind.
    pub kind: BodyKind,

    /// Raw payload text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl BodyDocument {
    /// Creates a body section.
    #[must_use]
    pub fn new(kind: BodyKind, data: impl Into<String>) -> Self {
        Self {
            kind,
            data: Some(data.into()),
        }
    }
}
