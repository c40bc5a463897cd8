//! OpenCollection document format.
//!
//! Parsing validates before it decodes; serialization writes the typed
//! value as-is.

mod validator;

pub use validator::{ValidationError, parse_collection_root, parse_request_document};

use courier_domain::persistence::{CollectionRootDocument, RequestDocument};
use serde::Serialize;

/// A document could not be written as YAML.
#[derive(Debug, thiserror::Error)]
#[error("failed to write document as YAML: {0}")]
pub struct SerializationError(#[from] serde_yaml::Error);

/// Block style in field declaration order, always ending in a newline.
fn write_yaml<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut yaml = serde_yaml::to_string(value)?;
    if !yaml.ends_with('\n') {
        yaml.push('\n');
    }
    Ok(yaml)
}

/// Writes a collection root document as YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_collection_root(
    root: &CollectionRootDocument,
) -> Result<String, SerializationError> {
    write_yaml(root)
}

/// Writes a request document as YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_request_document(
    document: &RequestDocument,
) -> Result<String, SerializationError> {
    write_yaml(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_domain::persistence::{AuthBlock, AuthDocument, BodyDocument, SettingsSection};
    use courier_domain::request::{BodyKind, HttpMethod};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_document_survives_serialization() {
        let document = RequestDocument::new("Login", HttpMethod::Post, "https://api.test/login")
            .with_seq(2)
            .with_header("Accept", "application/json")
            .with_query_param("debug", "1")
            .with_body(BodyDocument::new(BodyKind::FormUrlencoded, "a=1&b=2"))
            .with_auth(AuthDocument::Block(AuthBlock::Basic {
                username: Some("jamie".to_string()),
                password: Some("secret".to_string()),
            }))
            .with_settings(SettingsSection {
                encode_url: Some(true),
                timeout: Some(0),
                follow_redirects: Some(false),
                max_redirects: Some(5),
            });

        let text = serialize_request_document(&document).expect("serializes");
        let parsed = parse_request_document(&text).expect("parses back");

        assert_eq!(parsed, document);
    }

    #[test]
    fn test_serialized_request_uses_kind_and_section_order() {
        let document = RequestDocument::new("Ping", HttpMethod::Get, "http://localhost/ping");

        let text = serialize_request_document(&document).expect("serializes");

        assert!(text.starts_with("info:\n  name: Ping\n  kind: http\nhttp:\n  method: GET\n"));
        assert!(!text.contains("type:"));
        assert!(!text.contains("settings"));
    }

    #[test]
    fn test_collection_root_survives_serialization() {
        let root = CollectionRootDocument::new("Demo").with_version("2.0");

        let text = serialize_collection_root(&root).expect("serializes");

        assert!(text.starts_with("version: "));
        assert!(text.ends_with("name: Demo\nkind: collection\n"));
        assert_eq!(parse_collection_root(&text).expect("parses back"), root);
    }
}
