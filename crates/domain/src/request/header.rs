//! HTTP Header types

/// A single request header row.
///
/// Rows are kept in declaration order; a disabled row stays in the request
/// but is never sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// The header name (e.g., "Content-Type")
    pub name: String,
    /// The header value (e.g., "application/json")
    pub value: String,
    /// Whether this header is switched off
    pub disabled: bool,
}

impl Header {
    /// Creates a new enabled header.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            disabled: false,
        }
    }

    /// Creates a new disabled header.
    #[must_use]
    pub fn disabled(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            disabled: true,
        }
    }

    /// Returns true if the header takes part in a dispatch.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.disabled && !self.name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_creation() {
        let header = Header::new("Content-Type", "application/json");
        assert_eq!(header.name, "Content-Type");
        assert_eq!(header.value, "application/json");
        assert!(!header.disabled);
        assert!(header.is_active());
    }

    #[test]
    fn test_disabled_header_is_inactive() {
        let header = Header::disabled("X-Debug", "true");
        assert!(header.disabled);
        assert!(!header.is_active());
    }

    #[test]
    fn test_nameless_header_is_inactive() {
        assert!(!Header::new("", "orphan").is_active());
    }
}
