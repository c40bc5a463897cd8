//! Response specification type

use std::time::Duration;

/// The captured outcome of dispatching one request.
///
/// The body is fully buffered. Headers keep the order and repetition the
/// server sent them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSpec {
    /// HTTP status code
    pub status: u16,
    /// Status text (e.g., "OK", "Not Found")
    pub status_text: String,
    /// Wall-clock time from dispatch until the body was fully read
    pub duration: Duration,
    /// Response headers as received
    pub headers: Vec<(String, String)>,
    /// Response body as text
    pub body: String,
}

impl ResponseSpec {
    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true if the status code indicates a redirect (3xx).
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        self.status >= 300 && self.status < 400
    }

    /// Returns the elapsed time in whole milliseconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }

    /// Returns the first header value matching `name`, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Response body size in bytes.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn size(&self) -> usize {
        self.body.len()
    }
}

impl Default for ResponseSpec {
    fn default() -> Self {
        Self {
            status: 0,
            status_text: String::new(),
            duration: Duration::ZERO,
            headers: Vec::new(),
            body: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_checks() {
        let ok = ResponseSpec {
            status: 200,
            ..Default::default()
        };
        assert!(ok.is_success());
        assert!(!ok.is_redirect());

        let moved = ResponseSpec {
            status: 302,
            ..Default::default()
        };
        assert!(moved.is_redirect());
        assert!(!moved.is_success());
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let response = ResponseSpec {
            headers: vec![
                ("content-type".to_string(), "text/plain".to_string()),
                ("set-cookie".to_string(), "a=1".to_string()),
                ("set-cookie".to_string(), "b=2".to_string()),
            ],
            ..Default::default()
        };
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("SET-COOKIE"), Some("a=1"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_duration_in_whole_millis() {
        let response = ResponseSpec {
            status: 204,
            duration: Duration::from_micros(42_900),
            ..Default::default()
        };
        assert_eq!(response.duration_ms(), 42);
    }
}
