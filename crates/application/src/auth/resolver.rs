//! Auth resolution.
//!
//! Turns an [`AuthConfig`] into the concrete headers and query entries it
//! contributes to a request. Resolution is pure and never fails: missing
//! credentials simply contribute nothing.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use courier_domain::auth::{ApiKeyPlacement, AuthConfig};

/// Header name used by bearer and basic auth.
pub const AUTHORIZATION: &str = "Authorization";

/// Injections produced by one auth configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAuth {
    /// Headers to set, overwriting explicit headers of the same name.
    pub headers: BTreeMap<String, String>,
    /// Query entries to set, overwriting explicit params of the same key.
    pub query: Vec<(String, String)>,
}

impl ResolvedAuth {
    /// Returns true if nothing is injected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.query.is_empty()
    }

    /// Returns the injected header value, if any.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Returns the injected query value, if any.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    fn with_header(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut resolved = Self::default();
        resolved.headers.insert(name.into(), value.into());
        resolved
    }

    fn with_query(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            headers: BTreeMap::new(),
            query: vec![(key.into(), value.into())],
        }
    }
}

/// Resolves an auth configuration into header and query injections.
///
/// `Inherit` resolves to nothing here; resolving the parent auth is the
/// caller's concern.
#[must_use]
pub fn resolve_auth(auth: &AuthConfig) -> ResolvedAuth {
    match auth {
        AuthConfig::None | AuthConfig::Inherit => ResolvedAuth::default(),
        AuthConfig::Bearer { token } if token.is_empty() => ResolvedAuth::default(),
        AuthConfig::Bearer { token } => {
            ResolvedAuth::with_header(AUTHORIZATION, format!("Bearer {token}"))
        }
        AuthConfig::Basic { username, password } => {
            let credentials = STANDARD.encode(format!("{username}:{password}"));
            ResolvedAuth::with_header(AUTHORIZATION, format!("Basic {credentials}"))
        }
        AuthConfig::ApiKey { key, .. } if key.is_empty() => ResolvedAuth::default(),
        AuthConfig::ApiKey {
            key,
            value,
            placement: ApiKeyPlacement::Query,
        } => ResolvedAuth::with_query(key.clone(), value.clone()),
        AuthConfig::ApiKey {
            key,
            value,
            placement: ApiKeyPlacement::Header,
        } => ResolvedAuth::with_header(key.clone(), value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bearer_token() {
        let resolved = resolve_auth(&AuthConfig::bearer("token-1"));
        assert_eq!(resolved.header(AUTHORIZATION), Some("Bearer token-1"));
        assert!(resolved.query.is_empty());
    }

    #[test]
    fn test_empty_bearer_token_injects_nothing() {
        assert!(resolve_auth(&AuthConfig::bearer("")).is_empty());
    }

    #[test]
    fn test_basic_credentials() {
        let resolved = resolve_auth(&AuthConfig::basic("jamie", "secret"));
        assert_eq!(resolved.header(AUTHORIZATION), Some("Basic amFtaWU6c2VjcmV0"));
    }

    #[test]
    fn test_basic_with_empty_fields_still_injects() {
        let resolved = resolve_auth(&AuthConfig::basic("", ""));
        // base64(":")
        assert_eq!(resolved.header(AUTHORIZATION), Some("Basic Og=="));
    }

    #[test]
    fn test_api_key_in_query() {
        let resolved = resolve_auth(&AuthConfig::api_key_query("api_key", "abc"));
        assert_eq!(resolved.query_value("api_key"), Some("abc"));
        assert!(resolved.headers.is_empty());
    }

    #[test]
    fn test_api_key_in_header() {
        let resolved = resolve_auth(&AuthConfig::api_key_header("X-API-Key", "abc"));
        assert_eq!(resolved.header("X-API-Key"), Some("abc"));
        assert!(resolved.query.is_empty());
    }

    #[test]
    fn test_api_key_without_key_injects_nothing() {
        assert!(resolve_auth(&AuthConfig::api_key_query("", "abc")).is_empty());
        assert!(resolve_auth(&AuthConfig::api_key_header("", "abc")).is_empty());
    }

    #[test]
    fn test_none_and_inherit_inject_nothing() {
        assert_eq!(resolve_auth(&AuthConfig::None), ResolvedAuth::default());
        assert_eq!(resolve_auth(&AuthConfig::Inherit), ResolvedAuth::default());
    }
}
