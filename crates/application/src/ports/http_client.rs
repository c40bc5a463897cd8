//! HTTP client port.
//!
//! The executor hands a fully assembled [`PreparedRequest`] to an
//! [`HttpClient`] and receives the raw response back. Timing, timeouts and
//! cancellation stay in the application layer.

use std::future::Future;
use std::sync::{Arc, OnceLock};

use courier_domain::request::HttpMethod;
use thiserror::Error;
use tokio_util::sync::CancellationToken as SignalToken;

/// Redirect handling for a single dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectPolicy {
    /// Follow redirects, failing once more than `max` hops are needed.
    Follow {
        /// Maximum number of hops.
        max: u32,
    },
    /// Return 3xx responses to the caller as-is.
    Manual,
}

/// A request ready to go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Final URL, query included.
    pub url: String,
    /// Headers in insertion order; names are unique ignoring case.
    pub headers: Vec<(String, String)>,
    /// Body text, if one is sent.
    pub body: Option<String>,
    /// Redirect handling.
    pub redirect: RedirectPolicy,
}

impl PreparedRequest {
    /// Returns the value of a header, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response as read off the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    /// Status code.
    pub status: u16,
    /// Reason phrase.
    pub status_text: String,
    /// Headers as received.
    pub headers: Vec<(String, String)>,
    /// Body decoded as text.
    pub body: String,
}

/// Transport-level failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL was rejected by the transport.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// DNS resolution failed.
    #[error("DNS lookup failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying message.
        message: String,
    },

    /// The peer refused the connection.
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    /// Any other connection failure.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// TLS handshake or certificate failure.
    #[error("TLS error: {0}")]
    Tls(String),

    /// More redirects than allowed.
    #[error("Too many redirects (max {max})")]
    TooManyRedirects {
        /// Configured cap.
        max: u32,
    },

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    BodyRead(String),

    /// Anything else the transport reports.
    #[error("{0}")]
    Other(String),
}

/// Port for sending HTTP requests.
pub trait HttpClient: Send + Sync {
    /// Sends the request and reads the whole response body.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpClientError`] when the exchange fails at the
    /// transport level. HTTP error statuses are not errors.
    fn send(
        &self,
        request: PreparedRequest,
    ) -> impl Future<Output = Result<RawResponse, HttpClientError>> + Send;
}

/// Why an execution was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The caller cancelled.
    UserCancelled,
    /// The request's timeout elapsed.
    Timeout,
}

/// Handle for cancelling an in-flight execution.
///
/// Clones share state. The first cancellation wins; later ones are ignored,
/// so a timeout and a caller cancel never overwrite each other.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    signal: SignalToken,
    reason: Arc<OnceLock<CancelReason>>,
}

impl CancellationToken {
    /// Creates a token and a receiver bound to it.
    #[must_use]
    pub fn new() -> (Self, CancellationReceiver) {
        let token = Self {
            signal: SignalToken::new(),
            reason: Arc::new(OnceLock::new()),
        };
        let receiver = token.subscribe();
        (token, receiver)
    }

    /// Cancels on behalf of the caller.
    pub fn cancel(&self) {
        self.cancel_with(CancelReason::UserCancelled);
    }

    /// Cancels with an explicit reason. No-op if already cancelled.
    pub fn cancel_with(&self, reason: CancelReason) {
        // The reason is recorded before the signal fires, so receivers
        // always find it set.
        if self.reason.set(reason).is_ok() {
            self.signal.cancel();
        }
    }

    /// Returns true once cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.signal.is_cancelled()
    }

    /// Returns the reason, if cancelled.
    #[must_use]
    pub fn reason(&self) -> Option<CancelReason> {
        self.reason.get().copied()
    }

    /// Creates another receiver for this token.
    #[must_use]
    pub fn subscribe(&self) -> CancellationReceiver {
        CancellationReceiver {
            signal: self.signal.clone(),
            reason: Arc::clone(&self.reason),
        }
    }
}

/// Receiving side of a [`CancellationToken`].
#[derive(Debug)]
pub struct CancellationReceiver {
    signal: SignalToken,
    reason: Arc<OnceLock<CancelReason>>,
}

impl CancellationReceiver {
    /// Waits until the token is cancelled and returns the reason.
    ///
    /// Resolves immediately if the token was already cancelled.
    pub async fn cancelled(&self) -> CancelReason {
        self.signal.cancelled().await;
        self.reason
            .get()
            .copied()
            .unwrap_or(CancelReason::UserCancelled)
    }
}
