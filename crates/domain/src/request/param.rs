//! Request parameter types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a parameter lives in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Part of the URL query string
    #[default]
    Query,
    /// A path template segment (carried, not substituted)
    Path,
}

impl ParamKind {
    /// Returns the wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Path => "path",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "query" => Ok(Self::Query),
            "path" => Ok(Self::Path),
            other => Err(other.to_string()),
        }
    }
}

/// A request parameter row.
///
/// Supports enable/disable without deletion for UI convenience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// The parameter name
    pub name: String,
    /// The parameter value
    pub value: String,
    /// Query or path parameter
    pub kind: ParamKind,
    /// Whether this parameter is switched off
    pub disabled: bool,
}

impl Param {
    /// Creates a new enabled query parameter.
    #[must_use]
    pub fn query(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: ParamKind::Query,
            disabled: false,
        }
    }

    /// Creates a new enabled path parameter.
    #[must_use]
    pub fn path(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: ParamKind::Path,
            disabled: false,
        }
    }

    /// Marks this parameter as disabled.
    #[must_use]
    pub const fn into_disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Returns true if this is an enabled, named query parameter.
    #[must_use]
    pub fn is_active_query(&self) -> bool {
        self.kind == ParamKind::Query && !self.disabled && !self.name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param_creation() {
        let param = Param::query("page", "1");
        assert_eq!(param.name, "page");
        assert_eq!(param.value, "1");
        assert!(param.is_active_query());
    }

    #[test]
    fn test_disabled_and_path_params_are_not_active_queries() {
        assert!(!Param::query("debug", "true").into_disabled().is_active_query());
        assert!(!Param::path("id", "42").is_active_query());
        assert!(!Param::query("", "x").is_active_query());
    }

    #[test]
    fn test_param_kind_from_str() {
        assert_eq!("query".parse::<ParamKind>(), Ok(ParamKind::Query));
        assert_eq!("path".parse::<ParamKind>(), Ok(ParamKind::Path));
        assert_eq!("header".parse::<ParamKind>(), Err("header".to_string()));
    }
}
