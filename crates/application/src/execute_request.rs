//! Execute Request Use Case
//!
//! Turns a [`RequestSpec`] into a wire request, dispatches it through the
//! [`HttpClient`] port and measures how long the exchange took.
//!
//! Every execution owns one [`CancellationToken`]. A positive timeout arms
//! a timer task that cancels the token with [`CancelReason::Timeout`]; a
//! caller holding a clone of the token can cancel it too. Whichever comes
//! first decides the error. The timer never outlives the call.

use std::sync::Arc;
use std::time::{Duration, Instant};

use courier_domain::{RequestSpec, ResponseSpec};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{ResolvedAuth, resolve_auth};
use crate::ports::{
    CancelReason, CancellationToken, HttpClient, HttpClientError, PreparedRequest, RawResponse,
    RedirectPolicy,
};

/// Result type for request execution.
pub type ExecuteResult = Result<ResponseSpec, ExecuteRequestError>;

/// Error type for the execute request use case.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecuteRequestError {
    /// URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request's timeout elapsed before the response was read.
    #[error("Request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// The caller cancelled the execution.
    #[error("Request cancelled")]
    Cancelled,

    /// The transport failed.
    #[error("{0}")]
    NetworkFailure(#[from] HttpClientError),
}

/// Coarse classification of execution failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionErrorKind {
    /// The timeout fired.
    Timeout,
    /// The request never produced a response.
    NetworkFailure,
    /// The caller cancelled.
    Cancelled,
}

impl ExecuteRequestError {
    /// Returns the coarse kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ExecutionErrorKind {
        match self {
            Self::Timeout { .. } => ExecutionErrorKind::Timeout,
            Self::Cancelled => ExecutionErrorKind::Cancelled,
            Self::InvalidUrl(_) | Self::NetworkFailure(_) => ExecutionErrorKind::NetworkFailure,
        }
    }
}

/// Use case for executing HTTP requests.
///
/// # Example
///
/// ```ignore
/// let use_case = ExecuteRequest::new(Arc::new(ReqwestHttpClient::new()));
///
/// let request = RequestSpec::get("ping.yml", "Ping", "https://api.example.com/ping");
/// let response = use_case.execute(&request).await?;
/// ```
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Creates a new `ExecuteRequest` use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Executes the request with a fresh cancellation token.
    ///
    /// # Errors
    ///
    /// Returns `ExecuteRequestError` on an invalid URL, a timeout or a
    /// transport failure. HTTP error statuses are successful executions.
    pub async fn execute(&self, request: &RequestSpec) -> ExecuteResult {
        let (token, _receiver) = CancellationToken::new();
        self.execute_with_cancellation(request, token).await
    }

    /// Executes the request, cancellable through `token`.
    ///
    /// The request's own timeout cancels the same token, so a caller can
    /// tell from [`CancellationToken::reason`] what stopped the call.
    ///
    /// # Errors
    ///
    /// Returns `ExecuteRequestError::Cancelled` if the token is cancelled
    /// by the caller before the response is read, and the same errors as
    /// [`ExecuteRequest::execute`] otherwise.
    pub async fn execute_with_cancellation(
        &self,
        request: &RequestSpec,
        token: CancellationToken,
    ) -> ExecuteResult {
        let prepared = prepare_request(request)?;
        let timeout_ms = request.settings.timeout();

        let cancelled = token.subscribe();
        let _timer = timeout_ms.map(|ms| TimeoutTimer::start(token.clone(), ms));

        debug!(method = %prepared.method, url = %prepared.url, "dispatching request");
        let started = Instant::now();

        let outcome = tokio::select! {
            biased;
            reason = cancelled.cancelled() => Err(match reason {
                CancelReason::Timeout => ExecuteRequestError::Timeout {
                    timeout_ms: timeout_ms.unwrap_or_default(),
                },
                CancelReason::UserCancelled => ExecuteRequestError::Cancelled,
            }),
            result = self.client.send(prepared) => result.map_err(ExecuteRequestError::from),
        };
        let duration = started.elapsed();

        match outcome {
            Ok(raw) => {
                debug!(status = raw.status, elapsed = ?duration, "request completed");
                Ok(into_response(raw, duration))
            }
            Err(error) => {
                warn!(%error, elapsed = ?duration, "request failed");
                Err(error)
            }
        }
    }
}

/// Timer task that cancels a token after the request's timeout.
///
/// Aborted on drop, so it cannot fire after the execution returned.
struct TimeoutTimer {
    handle: JoinHandle<()>,
}

impl TimeoutTimer {
    fn start(token: CancellationToken, timeout_ms: u64) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(timeout_ms)).await;
            debug!(timeout_ms, "request timeout fired");
            token.cancel_with(CancelReason::Timeout);
        });
        Self { handle }
    }
}

impl Drop for TimeoutTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn into_response(raw: RawResponse, duration: Duration) -> ResponseSpec {
    ResponseSpec {
        status: raw.status,
        status_text: raw.status_text,
        duration,
        headers: raw.headers,
        body: raw.body,
    }
}

/// Builds the wire request: final URL, effective headers, body and
/// redirect policy.
///
/// # Errors
///
/// Returns `ExecuteRequestError::InvalidUrl` if `request.url` is not an
/// absolute URL.
pub fn prepare_request(request: &RequestSpec) -> Result<PreparedRequest, ExecuteRequestError> {
    let auth = resolve_auth(&request.auth);
    let url = build_url(request, &auth)?;
    let headers = build_headers(request, &auth);

    let body = (request.method.allows_body() && !request.body.is_none())
        .then(|| request.body.data.clone());

    let redirect = if request.settings.follow_redirects {
        RedirectPolicy::Follow {
            max: request.settings.max_redirects,
        }
    } else {
        RedirectPolicy::Manual
    };

    Ok(PreparedRequest {
        method: request.method,
        url,
        headers,
        body,
        redirect,
    })
}

fn build_url(request: &RequestSpec, auth: &ResolvedAuth) -> Result<String, ExecuteRequestError> {
    let mut url = Url::parse(&request.url)
        .map_err(|e| ExecuteRequestError::InvalidUrl(format!("{}: {e}", request.url)))?;

    let explicit = request
        .params
        .iter()
        .filter(|param| param.is_active_query())
        .map(|param| (param.name.as_str(), param.value.as_str()));
    let injected = auth
        .query
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()));
    let overrides: Vec<(&str, &str)> = explicit.chain(injected).collect();

    if !overrides.is_empty() {
        let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        for (name, value) in overrides {
            set_query_pair(&mut pairs, name, value);
        }
        url.query_pairs_mut().clear().extend_pairs(&pairs);
    }

    let assembled = String::from(url);
    if request.settings.encode_url {
        Ok(assembled)
    } else {
        let decoded = urlencoding::decode_binary(assembled.as_bytes());
        Ok(String::from_utf8_lossy(&decoded).into_owned())
    }
}

/// Sets `name` to `value`: the first occurrence is replaced and later ones
/// dropped, or the pair is appended.
fn set_query_pair(pairs: &mut Vec<(String, String)>, name: &str, value: &str) {
    let mut seen = false;
    pairs.retain_mut(|(key, current)| {
        if key.as_str() != name {
            return true;
        }
        if seen {
            return false;
        }
        seen = true;
        value.clone_into(current);
        true
    });
    if !seen {
        pairs.push((name.to_string(), value.to_string()));
    }
}

fn build_headers(request: &RequestSpec, auth: &ResolvedAuth) -> Vec<(String, String)> {
    let mut headers = Vec::new();
    let explicit = request
        .headers
        .iter()
        .filter(|header| header.is_active())
        .map(|header| (header.name.as_str(), header.value.as_str()));
    let injected = auth
        .headers
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()));

    for (name, value) in explicit.chain(injected) {
        set_header(&mut headers, name, value);
    }
    headers
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    match headers
        .iter_mut()
        .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
    {
        Some(entry) => *entry = (name.to_string(), value.to_string()),
        None => headers.push((name.to_string(), value.to_string())),
    }
}
