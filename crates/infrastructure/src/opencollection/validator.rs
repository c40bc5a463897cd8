//! Schema validation for OpenCollection documents.
//!
//! Documents are first parsed into an untyped YAML tree and checked rule by
//! rule, so the first violation is reported with the field that caused it.
//! Only a document that passes every rule is decoded into the typed model.

use courier_domain::persistence::{
    AuthBlock, CollectionRootDocument, DEFAULT_COLLECTION_VERSION, RequestDocument,
};
use courier_domain::request::{BodyKind, HttpMethod, ParamKind};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

/// Key carrying a section's discriminator.
const KIND_KEY: &str = "kind";
/// Older spelling of [`KIND_KEY`], accepted on read.
const TYPE_ALIAS_KEY: &str = "type";
/// Field reported when typed decoding fails without a path.
const DOCUMENT_FIELD: &str = "document";
/// Optional request sections; an empty key (`auth:`) counts as absent.
const OPTIONAL_HTTP_SECTIONS: [&str; 4] = ["headers", "params", "body", "auth"];
const OPTIONAL_ROOT_SECTIONS: [&str; 3] = ["settings", "runtime", "docs"];

/// Why a document was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The text is not a YAML mapping.
    #[error("invalid document syntax: {0}")]
    Syntax(String),

    /// A field violates the schema.
    #[error("{field}: {message}")]
    Field {
        /// Dotted path of the offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },
}

impl ValidationError {
    fn at(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the offending field, if the error is tied to one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Syntax(_) => None,
            Self::Field { field, .. } => Some(field),
        }
    }
}

/// Parses and validates a collection root document.
///
/// # Errors
///
/// Fails if the text is not a mapping, `kind` is not `collection`, or
/// `name` is missing or blank.
pub fn parse_collection_root(text: &str) -> Result<CollectionRootDocument, ValidationError> {
    let mut root = parse_mapping(text)?;
    rename_type_key(&mut root);

    if root.get(KIND_KEY).and_then(Value::as_str) != Some("collection") {
        return Err(ValidationError::at(KIND_KEY, "must be 'collection'"));
    }
    let has_name = root
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.trim().is_empty());
    if !has_name {
        return Err(ValidationError::at("name", "is required and must be a non-empty string"));
    }

    // `version: 0.1` is a number in YAML; an empty or blank one is absent.
    let version = match root.get("version") {
        None | Some(Value::Null) => Some(DEFAULT_COLLECTION_VERSION.to_string()),
        Some(Value::String(version)) if version.trim().is_empty() => {
            Some(DEFAULT_COLLECTION_VERSION.to_string())
        }
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(_) => None,
    };
    if let Some(version) = version {
        root["version"] = Value::String(version);
    }

    decode(root)
}

/// Parses and validates a request document.
///
/// Rules are checked in a fixed order and the first violation wins.
///
/// # Errors
///
/// Returns the first violated rule as a [`ValidationError`].
pub fn parse_request_document(text: &str) -> Result<RequestDocument, ValidationError> {
    let mut root = parse_mapping(text)?;
    normalize_request_aliases(&mut root);

    check_info(&root)?;
    let http = root
        .get("http")
        .and_then(Value::as_mapping)
        .ok_or_else(|| ValidationError::at("http", "section is required"))?;
    check_method_and_url(http)?;
    check_rows(http)?;
    check_body(http)?;
    check_auth(http)?;

    decode(root)
}

fn parse_mapping(text: &str) -> Result<Value, ValidationError> {
    let value: Value =
        serde_yaml::from_str(text).map_err(|e| ValidationError::Syntax(e.to_string()))?;
    if value.is_mapping() {
        Ok(value)
    } else {
        Err(ValidationError::Syntax("document must be a mapping".to_string()))
    }
}

fn rename_type_key(value: &mut Value) {
    let Some(mapping) = value.as_mapping_mut() else {
        return;
    };
    if mapping.contains_key(KIND_KEY) {
        return;
    }
    if let Some(kind) = mapping.remove(TYPE_ALIAS_KEY) {
        mapping.insert(Value::from(KIND_KEY), kind);
    }
}

fn drop_null_keys(value: &mut Value, keys: &[&str]) {
    let Some(mapping) = value.as_mapping_mut() else {
        return;
    };
    for key in keys {
        if mapping.get(*key).is_some_and(Value::is_null) {
            mapping.remove(*key);
        }
    }
}

fn normalize_request_aliases(root: &mut Value) {
    drop_null_keys(root, &OPTIONAL_ROOT_SECTIONS);
    if let Some(info) = root.get_mut("info") {
        rename_type_key(info);
    }
    let Some(http) = root.get_mut("http") else {
        return;
    };
    drop_null_keys(http, &OPTIONAL_HTTP_SECTIONS);
    if let Some(body) = http.get_mut("body") {
        rename_type_key(body);
    }
    if let Some(auth) = http.get_mut("auth") {
        rename_type_key(auth);
    }
    if let Some(Value::Sequence(params)) = http.get_mut("params") {
        params.iter_mut().for_each(rename_type_key);
    }
}

fn check_info(root: &Value) -> Result<(), ValidationError> {
    let kind = root
        .get("info")
        .and_then(|info| info.get(KIND_KEY))
        .and_then(Value::as_str);
    if kind == Some("http") {
        Ok(())
    } else {
        Err(ValidationError::at("info.kind", "must be 'http'"))
    }
}

fn check_method_and_url(http: &Mapping) -> Result<(), ValidationError> {
    let method = http
        .get("method")
        .and_then(Value::as_str)
        .ok_or_else(|| ValidationError::at("http.method", "is required and must be a string"))?;
    http.get("url")
        .and_then(Value::as_str)
        .ok_or_else(|| ValidationError::at("http.url", "is required and must be a string"))?;

    if method.parse::<HttpMethod>().is_err() {
        let allowed: Vec<&str> = HttpMethod::all().iter().map(|m| m.as_str()).collect();
        return Err(ValidationError::at(
            "http.method",
            format!(
                "unsupported http.method '{method}', expected one of {}",
                allowed.join(", ")
            ),
        ));
    }
    Ok(())
}

fn check_rows(http: &Mapping) -> Result<(), ValidationError> {
    for section in ["headers", "params"] {
        if let Some(rows) = http.get(section) {
            if !rows.is_sequence() {
                return Err(ValidationError::at(
                    format!("http.{section}"),
                    "must be a sequence",
                ));
            }
        }
    }

    let params = http.get("params").and_then(Value::as_sequence);
    for (index, param) in params.into_iter().flatten().enumerate() {
        let Some(kind) = param.get(KIND_KEY) else {
            continue;
        };
        let valid = kind.as_str().is_some_and(|k| k.parse::<ParamKind>().is_ok());
        if !valid {
            return Err(ValidationError::at(
                format!("http.params[{index}].kind"),
                "must be one of query, path",
            ));
        }
    }
    Ok(())
}

fn check_body(http: &Mapping) -> Result<(), ValidationError> {
    let Some(body) = http.get("body") else {
        return Ok(());
    };
    let kind = body.get(KIND_KEY).and_then(Value::as_str);
    if kind.and_then(BodyKind::from_document_kind).is_some() {
        return Ok(());
    }

    let allowed: Vec<&str> = BodyKind::DOCUMENT_KINDS.iter().map(|k| k.as_str()).collect();
    let message = match kind {
        None => "is required".to_string(),
        Some(kind) => format!("unsupported body kind '{kind}', expected one of {}", allowed.join(", ")),
    };
    Err(ValidationError::at("http.body.kind", message))
}

fn check_auth(http: &Mapping) -> Result<(), ValidationError> {
    let Some(auth) = http.get("auth") else {
        return Ok(());
    };
    if auth.as_str() == Some("inherit") {
        return Ok(());
    }
    if !auth.is_mapping() {
        return Err(ValidationError::at(
            "http.auth",
            "must be 'inherit' or a mapping with a kind",
        ));
    }

    let kind = auth.get(KIND_KEY).and_then(Value::as_str);
    match kind {
        Some(kind) if AuthBlock::KINDS.contains(&kind) => Ok(()),
        Some(kind) => Err(ValidationError::at(
            "http.auth.kind",
            format!(
                "unsupported auth kind '{kind}', expected one of {}",
                AuthBlock::KINDS.join(", ")
            ),
        )),
        None => Err(ValidationError::at("http.auth.kind", "is required")),
    }
}

/// Decodes a validated tree into its typed form.
///
/// Anything the rules above do not cover, such as a non-integer `info.seq`,
/// surfaces here.
fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ValidationError> {
    // Round-trip through text so decoder errors carry the field path.
    let text = serde_yaml::to_string(&value).map_err(|e| ValidationError::Syntax(e.to_string()))?;
    serde_yaml::from_str(&text).map_err(|e| {
        let message = e.to_string();
        let field = decoder_path(&message).unwrap_or(DOCUMENT_FIELD).to_string();
        ValidationError::Field { field, message }
    })
}

/// Extracts the `a.b[0].c` prefix serde_yaml puts in front of nested errors.
fn decoder_path(message: &str) -> Option<&str> {
    let (path, _) = message.split_once(": ")?;
    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '[' | ']'));
    is_path.then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_domain::persistence::{AuthDocument, AuthMode, RequestKind};
    use pretty_assertions::assert_eq;

    const FULL_REQUEST: &str = r#"
info:
  name: Create user
  kind: http
  seq: 3
http:
  method: POST
  url: https://api.example.com/users
  headers:
    - name: Content-Type
      value: application/json
    - name: X-Debug
      value: "1"
      disabled: true
  params:
    - name: verbose
      value: "true"
      kind: query
    - name: id
      value: "42"
      kind: path
  body:
    kind: json
    data: '{"name":"jamie"}'
  auth:
    kind: bearer
    token: token-1
settings:
  encodeUrl: false
  timeout: 2500
docs: Creates a user.
"#;

    fn field_of(text: &str) -> String {
        parse_request_document(text)
            .expect_err("document should be rejected")
            .field()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    #[test]
    fn test_parses_full_request() {
        let document = parse_request_document(FULL_REQUEST).expect("valid document");

        assert_eq!(document.info.name.as_deref(), Some("Create user"));
        assert_eq!(document.info.kind, RequestKind::Http);
        assert_eq!(document.info.seq, Some(3));
        assert_eq!(document.http.method, HttpMethod::Post);
        assert_eq!(document.http.headers.as_ref().map(Vec::len), Some(2));
        assert_eq!(
            document.http.params.as_ref().and_then(|p| p[1].kind),
            Some(ParamKind::Path)
        );
        assert_eq!(
            document.http.body.as_ref().map(|b| b.kind),
            Some(BodyKind::Json)
        );
        assert_eq!(
            document.http.auth,
            Some(AuthDocument::Block(AuthBlock::Bearer {
                token: Some("token-1".to_string())
            }))
        );
        let settings = document.settings.expect("settings");
        assert_eq!(settings.encode_url, Some(false));
        assert_eq!(settings.timeout, Some(2500));
        assert_eq!(settings.follow_redirects, None);
        assert_eq!(document.docs, Some(serde_json::json!("Creates a user.")));
    }

    #[test]
    fn test_minimal_request() {
        let document = parse_request_document(
            "info:\n  kind: http\nhttp:\n  method: GET\n  url: http://localhost\n",
        )
        .expect("valid document");

        assert_eq!(document.info.name, None);
        assert_eq!(document.http.headers, None);
        assert_eq!(document.settings, None);
    }

    #[test]
    fn test_type_is_accepted_as_kind() {
        let text = r"
info:
  type: http
http:
  method: GET
  url: http://localhost
  params:
    - name: q
      value: x
      type: query
  body:
    type: text
    data: hello
  auth:
    type: basic
    username: jamie
";
        let document = parse_request_document(text).expect("valid document");

        assert_eq!(
            document.http.body.map(|b| b.kind),
            Some(BodyKind::Text)
        );
        assert!(matches!(
            document.http.auth,
            Some(AuthDocument::Block(AuthBlock::Basic { .. }))
        ));
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let text = "info:\n  kind: http\nhttp:\n  method: FETCH\n  url: http://localhost\n";
        let error = parse_request_document(text).expect_err("FETCH is not a method");

        assert_eq!(error.field(), Some("http.method"));
        assert!(error.to_string().contains("unsupported http.method"));
    }

    #[test]
    fn test_method_is_case_sensitive() {
        let text = "info:\n  kind: http\nhttp:\n  method: get\n  url: http://localhost\n";
        assert_eq!(field_of(text), "http.method");
    }

    #[test]
    fn test_info_kind_must_be_http() {
        let text = "info:\n  kind: graphql\nhttp:\n  method: GET\n  url: http://localhost\n";
        assert_eq!(field_of(text), "info.kind");
        assert_eq!(field_of("http:\n  method: GET\n  url: http://localhost\n"), "info.kind");
    }

    #[test]
    fn test_http_section_is_required() {
        assert_eq!(field_of("info:\n  kind: http\n"), "http");
    }

    #[test]
    fn test_method_and_url_are_required_strings() {
        assert_eq!(
            field_of("info:\n  kind: http\nhttp:\n  url: http://localhost\n"),
            "http.method"
        );
        assert_eq!(field_of("info:\n  kind: http\nhttp:\n  method: GET\n"), "http.url");
        assert_eq!(
            field_of("info:\n  kind: http\nhttp:\n  method: GET\n  url: [a]\n"),
            "http.url"
        );
    }

    #[test]
    fn test_info_kind_is_checked_before_method() {
        let text = "info:\n  kind: ws\nhttp:\n  method: FETCH\n  url: http://localhost\n";
        assert_eq!(field_of(text), "info.kind");
    }

    #[test]
    fn test_headers_must_be_a_sequence() {
        let text = "info:\n  kind: http\nhttp:\n  method: GET\n  url: http://x\n  headers:\n    a: b\n";
        assert_eq!(field_of(text), "http.headers");
    }

    #[test]
    fn test_param_kind_must_be_query_or_path() {
        let text = r"
info:
  kind: http
http:
  method: GET
  url: http://localhost
  params:
    - name: a
      value: b
    - name: c
      value: d
      kind: header
";
        assert_eq!(field_of(text), "http.params[1].kind");
    }

    #[test]
    fn test_body_kind_is_required_and_checked() {
        let base = "info:\n  kind: http\nhttp:\n  method: POST\n  url: http://localhost\n";
        assert_eq!(field_of(&format!("{base}  body:\n    data: x\n")), "http.body.kind");
        assert_eq!(
            field_of(&format!("{base}  body:\n    kind: yaml\n    data: x\n")),
            "http.body.kind"
        );
        assert_eq!(
            field_of(&format!("{base}  body:\n    kind: none\n")),
            "http.body.kind"
        );
    }

    #[test]
    fn test_auth_forms() {
        let base = "info:\n  kind: http\nhttp:\n  method: GET\n  url: http://localhost\n";

        let inherit = parse_request_document(&format!("{base}  auth: inherit\n")).expect("valid");
        assert_eq!(inherit.http.auth, Some(AuthDocument::Mode(AuthMode::Inherit)));

        let digest =
            parse_request_document(&format!("{base}  auth:\n    kind: digest\n    username: u\n"))
                .expect("digest is a known kind");
        assert!(matches!(
            digest.http.auth,
            Some(AuthDocument::Block(AuthBlock::Digest(_)))
        ));

        assert_eq!(field_of(&format!("{base}  auth: none\n")), "http.auth");
        assert_eq!(
            field_of(&format!("{base}  auth:\n    kind: hawk\n")),
            "http.auth.kind"
        );
        assert_eq!(
            field_of(&format!("{base}  auth:\n    token: t\n")),
            "http.auth.kind"
        );
    }

    #[test]
    fn test_empty_optional_sections_are_absent() {
        let text = r"
info:
  kind: http
http:
  method: POST
  url: http://localhost
  headers:
  params:
  body:
  auth:
settings:
docs:
";
        let document = parse_request_document(text).expect("empty sections are absent");

        assert!(document.http.headers.is_none());
        assert!(document.http.params.is_none());
        assert!(document.http.body.is_none());
        assert!(document.http.auth.is_none());
        assert!(document.settings.is_none());
        assert!(document.docs.is_none());
    }

    #[test]
    fn test_negative_seq_is_an_integer() {
        let text = "info:\n  kind: http\n  seq: -1\nhttp:\n  method: GET\n  url: http://x\n";
        let document = parse_request_document(text).expect("negative seq is valid");
        assert_eq!(document.info.seq, Some(-1));
    }

    #[test]
    fn test_type_mismatch_names_field() {
        let text = "info:\n  kind: http\n  seq: first\nhttp:\n  method: GET\n  url: http://x\n";
        let error = parse_request_document(text).expect_err("seq must be an integer");

        assert!(matches!(error, ValidationError::Field { .. }));
        assert!(error.to_string().contains("seq"));
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(
            parse_request_document("info: [unclosed"),
            Err(ValidationError::Syntax(_))
        ));
        assert!(matches!(
            parse_request_document("- just\n- a list\n"),
            Err(ValidationError::Syntax(_))
        ));
        assert!(matches!(
            parse_request_document(""),
            Err(ValidationError::Syntax(_))
        ));
    }

    #[test]
    fn test_collection_root() {
        let root = parse_collection_root("name: Demo\nkind: collection\nversion: \"1.0\"\n")
            .expect("valid root");
        assert_eq!(root.name, "Demo");
        assert_eq!(root.version, "1.0");
    }

    #[test]
    fn test_collection_root_defaults_version() {
        let root = parse_collection_root("name: Demo\ntype: collection\n").expect("valid root");
        assert_eq!(root.version, "0.1");
    }

    #[test]
    fn test_collection_root_blank_version_is_default() {
        for version in ["\"\"", "\"   \"", ""] {
            let text = format!("name: Demo\nkind: collection\nversion: {version}\n");
            let root = parse_collection_root(&text).expect("valid root");
            assert_eq!(root.version, "0.1", "version: {version}");
        }
    }

    #[test]
    fn test_collection_root_numeric_version() {
        let root = parse_collection_root("name: Demo\nkind: collection\nversion: 0.1\n")
            .expect("valid root");
        assert_eq!(root.version, "0.1");
    }

    #[test]
    fn test_collection_root_rejections() {
        let kind = parse_collection_root("name: Demo\nkind: folder\n").expect_err("bad kind");
        assert_eq!(kind.field(), Some("kind"));

        let name = parse_collection_root("name: \"  \"\nkind: collection\n").expect_err("blank");
        assert_eq!(name.field(), Some("name"));

        let missing = parse_collection_root("kind: collection\n").expect_err("no name");
        assert_eq!(missing.field(), Some("name"));
    }

    #[test]
    fn test_decoder_path() {
        assert_eq!(decoder_path("info.seq: invalid type"), Some("info.seq"));
        assert_eq!(
            decoder_path("http.headers[0].name: invalid type"),
            Some("http.headers[0].name")
        );
        assert_eq!(decoder_path("missing field `url` at line 2"), None);
    }
}
