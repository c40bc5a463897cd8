//! Mapping between request documents and the domain request.
//!
//! `from_document` materializes every default exactly once, so mapping the
//! result back with `to_document` and reading it again yields the same
//! request.

use std::path::Path;

use super::auth::{AuthBlock, AuthDocument, AuthMode};
use super::body::BodyDocument;
use super::common::{RequestKind, SettingsSection};
use super::request::{HeaderEntry, HttpSection, InfoSection, ParamEntry, RequestDocument};
use crate::auth::{ApiKeyPlacement, AuthConfig};
use crate::error::{DomainError, DomainResult};
use crate::request::{Header, Param, RequestBody, RequestSettings, RequestSpec};

/// Listing position given to documents without `info.seq`.
pub const DEFAULT_SEQ: i64 = 1;

/// API key name used when an `apikey` block omits `key`.
pub const DEFAULT_API_KEY_NAME: &str = "x-api-key";

/// Name used when neither `info.name` nor a file stem is available.
pub const UNTITLED_REQUEST: &str = "Untitled Request";

/// Builds the domain request for a document stored at `file_path`.
///
/// # Errors
///
/// Returns [`DomainError::UnsupportedAuthKind`] for auth kinds the document
/// format accepts but the domain cannot execute (`digest`, `oauth2`,
/// `awsv4`, `ntlm`).
pub fn from_document(document: &RequestDocument, file_path: &Path) -> DomainResult<RequestSpec> {
    let name = document
        .info
        .name
        .clone()
        .unwrap_or_else(|| name_from_path(file_path));

    let mut request = RequestSpec::new(file_path, name);
    request.seq = document.info.seq.unwrap_or(DEFAULT_SEQ);
    request.method = document.http.method;
    request.url.clone_from(&document.http.url);
    request.headers = document
        .http
        .headers
        .iter()
        .flatten()
        .map(|entry| Header {
            name: entry.name.clone(),
            value: entry.value.clone(),
            disabled: entry.disabled.unwrap_or(false),
        })
        .collect();
    request.params = document
        .http
        .params
        .iter()
        .flatten()
        .map(|entry| Param {
            name: entry.name.clone(),
            value: entry.value.clone(),
            kind: entry.kind.unwrap_or_default(),
            disabled: entry.disabled.unwrap_or(false),
        })
        .collect();
    request.body = document
        .http
        .body
        .as_ref()
        .map_or_else(RequestBody::none, |body| {
            RequestBody::new(body.kind, body.data.clone().unwrap_or_default())
        });
    request.auth = auth_from_document(document.http.auth.as_ref())?;
    request.settings = settings_from_document(document.settings.as_ref());
    request.runtime.clone_from(&document.runtime);
    request.docs.clone_from(&document.docs);

    Ok(request)
}

/// Builds the document written for a domain request.
#[must_use]
pub fn to_document(request: &RequestSpec) -> RequestDocument {
    let headers: Vec<HeaderEntry> = request
        .headers
        .iter()
        .map(|header| HeaderEntry {
            name: header.name.clone(),
            value: header.value.clone(),
            disabled: header.disabled.then_some(true),
        })
        .collect();

    let params: Vec<ParamEntry> = request
        .params
        .iter()
        .map(|param| ParamEntry {
            name: param.name.clone(),
            value: param.value.clone(),
            kind: Some(param.kind),
            disabled: param.disabled.then_some(true),
        })
        .collect();

    let body = (!request.body.is_none())
        .then(|| BodyDocument::new(request.body.kind, request.body.data.clone()));

    let settings = request.settings;

    RequestDocument {
        info: InfoSection {
            name: Some(request.name.clone()),
            kind: RequestKind::Http,
            seq: Some(request.seq),
        },
        http: HttpSection {
            method: request.method,
            url: request.url.clone(),
            headers: (!headers.is_empty()).then_some(headers),
            params: (!params.is_empty()).then_some(params),
            body,
            auth: Some(auth_to_document(&request.auth)),
        },
        settings: Some(SettingsSection {
            encode_url: Some(settings.encode_url),
            timeout: Some(settings.timeout_ms),
            follow_redirects: Some(settings.follow_redirects),
            max_redirects: Some(settings.max_redirects),
        }),
        runtime: request.runtime.clone(),
        docs: request.docs.clone(),
    }
}

fn name_from_path(file_path: &Path) -> String {
    file_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(UNTITLED_REQUEST)
        .to_string()
}

fn auth_from_document(auth: Option<&AuthDocument>) -> DomainResult<AuthConfig> {
    let Some(auth) = auth else {
        return Ok(AuthConfig::None);
    };

    let block = match auth {
        AuthDocument::Mode(AuthMode::Inherit) => return Ok(AuthConfig::Inherit),
        AuthDocument::Block(block) => block,
    };

    match block {
        AuthBlock::None => Ok(AuthConfig::None),
        AuthBlock::Inherit => Ok(AuthConfig::Inherit),
        AuthBlock::Bearer { token } => Ok(AuthConfig::Bearer {
            token: token.clone().unwrap_or_default(),
        }),
        AuthBlock::Basic { username, password } => Ok(AuthConfig::Basic {
            username: username.clone().unwrap_or_default(),
            password: password.clone().unwrap_or_default(),
        }),
        AuthBlock::Apikey {
            key,
            value,
            placement,
        } => Ok(AuthConfig::ApiKey {
            key: key
                .clone()
                .unwrap_or_else(|| DEFAULT_API_KEY_NAME.to_string()),
            value: value.clone().unwrap_or_default(),
            placement: if placement.as_deref() == Some("query") {
                ApiKeyPlacement::Query
            } else {
                ApiKeyPlacement::Header
            },
        }),
        AuthBlock::Digest(_) | AuthBlock::Oauth2(_) | AuthBlock::Awsv4(_) | AuthBlock::Ntlm(_) => {
            Err(DomainError::UnsupportedAuthKind(block.kind().to_string()))
        }
    }
}

fn auth_to_document(auth: &AuthConfig) -> AuthDocument {
    let block = match auth {
        AuthConfig::Inherit => return AuthDocument::Mode(AuthMode::Inherit),
        AuthConfig::None => AuthBlock::None,
        AuthConfig::Bearer { token } => AuthBlock::Bearer {
            token: Some(token.clone()),
        },
        AuthConfig::Basic { username, password } => AuthBlock::Basic {
            username: Some(username.clone()),
            password: Some(password.clone()),
        },
        AuthConfig::ApiKey {
            key,
            value,
            placement,
        } => AuthBlock::Apikey {
            key: Some(key.clone()),
            value: Some(value.clone()),
            placement: Some(placement.as_str().to_string()),
        },
    };
    AuthDocument::Block(block)
}

fn settings_from_document(settings: Option<&SettingsSection>) -> RequestSettings {
    let defaults = RequestSettings::DEFAULT;
    let Some(section) = settings else {
        return defaults;
    };

    RequestSettings {
        encode_url: section.encode_url.unwrap_or(defaults.encode_url),
        timeout_ms: section.timeout.unwrap_or(defaults.timeout_ms),
        follow_redirects: section.follow_redirects.unwrap_or(defaults.follow_redirects),
        max_redirects: section.max_redirects.unwrap_or(defaults.max_redirects),
    }
}
