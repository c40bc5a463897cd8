//! Authentication section of a request document.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Fields of an auth kind the domain does not model, kept as written.
pub type OpaqueAuthFields = BTreeMap<String, JsonValue>;

/// The `http.auth` value: either the bare literal `inherit` or a tagged block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthDocument {
    /// The literal string form.
    Mode(AuthMode),
    /// The object form, discriminated by `kind`.
    Block(AuthBlock),
}

/// Literal auth modes written as a plain string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Use the parent auth.
    Inherit,
}

/// Auth object form. The `kind` field is the discriminator.
///
/// Credential fields are optional on disk and defaulted by the mapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AuthBlock {
    /// No authentication.
    None,

    /// Use the parent auth.
    Inherit,

    /// HTTP Basic authentication.
    Basic {
        /// Username for basic auth.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
        /// Password for basic auth.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
    },

    /// Bearer token authentication.
    Bearer {
        /// The bearer token value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<String>,
    },

    /// API Key authentication.
    Apikey {
        /// Header or query parameter name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        /// The API key value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        /// `header` or `query`. Anything but `query` means header.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placement: Option<String>,
    },

    /// HTTP Digest authentication.
    Digest(OpaqueAuthFields),

    /// `OAuth2` flows.
    Oauth2(OpaqueAuthFields),

    /// AWS Signature v4.
    Awsv4(OpaqueAuthFields),

    /// NTLM authentication.
    Ntlm(OpaqueAuthFields),
}

impl AuthBlock {
    /// Every `kind` value a document may declare.
    pub const KINDS: &'static [&'static str] = &[
        "none", "inherit", "basic", "bearer", "apikey", "digest", "oauth2", "awsv4", "ntlm",
    ];

    /// Returns the `kind` spelling of this block.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Inherit => "inherit",
            Self::Basic { .. } => "basic",
            Self::Bearer { .. } => "bearer",
            Self::Apikey { .. } => "apikey",
            Self::Digest(_) => "digest",
            Self::Oauth2(_) => "oauth2",
            Self::Awsv4(_) => "awsv4",
            Self::Ntlm(_) => "ntlm",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_literal_inherit() {
        let auth: AuthDocument = serde_json::from_str(r#""inherit""#).unwrap();
        assert_eq!(auth, AuthDocument::Mode(AuthMode::Inherit));
        assert_eq!(serde_json::to_string(&auth).unwrap(), r#""inherit""#);
    }

    #[test]
    fn test_bearer_block() {
        let auth: AuthDocument =
            serde_json::from_str(r#"{"kind": "bearer", "token": "abc"}"#).unwrap();
        match auth {
            AuthDocument::Block(AuthBlock::Bearer { token }) => {
                assert_eq!(token.as_deref(), Some("abc"));
            }
            other => panic!("Expected bearer block, got {other:?}"),
        }
    }

    #[test]
    fn test_apikey_block_without_fields() {
        let auth: AuthDocument = serde_json::from_str(r#"{"kind": "apikey"}"#).unwrap();
        assert_eq!(
            auth,
            AuthDocument::Block(AuthBlock::Apikey {
                key: None,
                value: None,
                placement: None,
            })
        );
    }

    #[test]
    fn test_opaque_block_keeps_fields() {
        let auth: AuthDocument =
            serde_json::from_str(r#"{"kind": "digest", "username": "u", "password": "p"}"#)
                .unwrap();
        let AuthDocument::Block(block) = auth else {
            panic!("Expected block");
        };
        assert_eq!(block.kind(), "digest");
        let AuthBlock::Digest(fields) = block else {
            panic!("Expected digest");
        };
        assert_eq!(fields.get("username"), Some(&JsonValue::from("u")));
        assert!(!fields.contains_key("kind"));
    }

    #[test]
    fn test_kinds_cover_every_variant() {
        assert_eq!(AuthBlock::KINDS.len(), 9);
        assert!(AuthBlock::KINDS.contains(&AuthBlock::None.kind()));
    }
}
