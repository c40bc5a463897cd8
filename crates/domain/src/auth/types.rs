//! Authentication configuration types

/// Authentication configuration for a request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,
    /// Defer to the parent folder or collection auth
    Inherit,
    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },
    /// Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },
    /// API Key authentication
    ApiKey {
        /// Header or query parameter name
        key: String,
        /// The API key value
        value: String,
        /// Where to add the key
        placement: ApiKeyPlacement,
    },
}

/// Placement for API key authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiKeyPlacement {
    /// Add to request headers
    #[default]
    Header,
    /// Add to query parameters
    Query,
}

impl ApiKeyPlacement {
    /// Returns the wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Query => "query",
        }
    }
}

impl AuthConfig {
    /// Creates a bearer token authentication.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Creates a basic authentication.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates an API key authentication sent as a header.
    #[must_use]
    pub fn api_key_header(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::ApiKey {
            key: key.into(),
            value: value.into(),
            placement: ApiKeyPlacement::Header,
        }
    }

    /// Creates an API key authentication sent in the query string.
    #[must_use]
    pub fn api_key_query(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::ApiKey {
            key: key.into(),
            value: value.into(),
            placement: ApiKeyPlacement::Query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(AuthConfig::default(), AuthConfig::None);
        assert_eq!(ApiKeyPlacement::default(), ApiKeyPlacement::Header);
    }

    #[test]
    fn test_bearer_auth() {
        let auth = AuthConfig::bearer("my-token");
        let AuthConfig::Bearer { token } = auth else {
            unreachable!("Expected Bearer auth variant");
        };
        assert_eq!(token, "my-token");
    }

    #[test]
    fn test_api_key_query() {
        let AuthConfig::ApiKey { placement, .. } = AuthConfig::api_key_query("k", "v") else {
            unreachable!("Expected ApiKey auth variant");
        };
        assert_eq!(placement, ApiKeyPlacement::Query);
        assert_eq!(placement.as_str(), "query");
    }
}
