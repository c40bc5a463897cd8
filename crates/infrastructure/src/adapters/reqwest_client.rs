//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! Redirect handling is a property of a reqwest `Client`, so a client is
//! built for every dispatch from the request's redirect policy.

use std::error::Error as _;

use courier_application::ports::{
    HttpClient, HttpClientError, PreparedRequest, RawResponse, RedirectPolicy,
};
use courier_domain::request::HttpMethod;
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use tracing::debug;

/// Configuration shared by every client the adapter builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("Courier/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP client implementation using reqwest.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    config: HttpClientConfig,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - User-Agent: "Courier/<version>"
    /// - TLS verification: enabled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client with a custom configuration.
    #[must_use]
    pub const fn with_config(config: HttpClientConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    fn build_client(&self, redirect: RedirectPolicy) -> Result<Client, HttpClientError> {
        let policy = match redirect {
            RedirectPolicy::Follow { max } => {
                Policy::limited(usize::try_from(max).unwrap_or(usize::MAX))
            }
            RedirectPolicy::Manual => Policy::none(),
        };

        Client::builder()
            .user_agent(&self.config.user_agent)
            .redirect(policy)
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
            HttpMethod::Trace => Method::TRACE,
            HttpMethod::Connect => Method::CONNECT,
        }
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(error: &reqwest::Error, redirect: RedirectPolicy) -> HttpClientError {
        let message = error_chain(error);
        let lowered = message.to_lowercase();
        let host = error
            .url()
            .and_then(|u| u.host_str().map(ToString::to_string))
            .unwrap_or_else(|| "unknown".to_string());

        if error.is_redirect() {
            let max = match redirect {
                RedirectPolicy::Follow { max } => max,
                RedirectPolicy::Manual => 0,
            };
            return HttpClientError::TooManyRedirects { max };
        }

        if error.is_body() || error.is_decode() {
            return HttpClientError::BodyRead(message);
        }

        if lowered.contains("certificate") || lowered.contains("tls") {
            return HttpClientError::Tls(message);
        }

        if error.is_connect() {
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError { host, message };
            }
            if lowered.contains("refused") {
                let port = error.url().and_then(reqwest::Url::port_or_known_default);
                return HttpClientError::ConnectionRefused(match port {
                    Some(port) => format!("{host}:{port}"),
                    None => host,
                });
            }
            return HttpClientError::ConnectionFailed(message);
        }

        HttpClientError::Other(message)
    }
}

/// Joins an error with all of its sources, since reqwest's top-level
/// message rarely names the root cause.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, HttpClientError> {
        let PreparedRequest {
            method,
            url,
            headers,
            body,
            redirect,
        } = request;

        let client = self.build_client(redirect)?;
        let parsed_url = reqwest::Url::parse(&url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))?;

        let mut builder = client.request(Self::to_reqwest_method(method), parsed_url);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, redirect))?;

        let status = response.status();
        let response_headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        debug!(status = status.as_u16(), %url, "response headers received");

        let body = response
            .text()
            .await
            .map_err(|e| HttpClientError::BodyRead(error_chain(&e)))?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers: response_headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Trace),
            Method::TRACE
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Connect),
            Method::CONNECT
        );
    }

    #[test]
    fn test_default_user_agent() {
        let client = ReqwestHttpClient::new();
        assert!(client.config().user_agent.starts_with("Courier/"));
    }

    #[test]
    fn test_client_creation_for_each_policy() {
        let client = ReqwestHttpClient::with_config(HttpClientConfig {
            user_agent: "test-agent".to_string(),
        });
        assert!(client.build_client(RedirectPolicy::Manual).is_ok());
        assert!(
            client
                .build_client(RedirectPolicy::Follow { max: 3 })
                .is_ok()
        );
    }
}
