//! Per-request execution settings

/// Execution settings carried by every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestSettings {
    /// Whether the assembled URL is sent percent-encoded.
    /// When false the URL is percent-decoded before dispatch.
    pub encode_url: bool,
    /// Timeout in milliseconds. Zero or negative means unbounded.
    pub timeout_ms: i64,
    /// Whether redirects are followed automatically.
    pub follow_redirects: bool,
    /// Maximum number of redirects followed when `follow_redirects` is set.
    pub max_redirects: u32,
}

impl RequestSettings {
    /// The canonical defaults applied to every absent settings field.
    pub const DEFAULT: Self = Self {
        encode_url: true,
        timeout_ms: 0,
        follow_redirects: true,
        max_redirects: 5,
    };

    /// Returns the timeout as a positive number of milliseconds, if bounded.
    #[must_use]
    pub fn timeout(&self) -> Option<u64> {
        u64::try_from(self.timeout_ms).ok().filter(|ms| *ms > 0)
    }
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
