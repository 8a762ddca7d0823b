//! Errors for route registration, matching and path building

use thiserror::Error;

/// Errors produced while registering, matching or building routes
///
/// Registration errors (`AmbiguousRoute`, `InvalidTemplate`, `DuplicateName`)
/// must stop startup. Everything else is recoverable by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No registered route matches the path; render a not-found page
    #[error("no route matches path `{path}`")]
    NoMatch { path: String },

    /// Two routes would compete for the same paths
    #[error("route `{conflicting}` is ambiguous with already registered route `{existing}`")]
    AmbiguousRoute { existing: String, conflicting: String },

    /// A required parameter has no value while building a path
    #[error("missing value for parameter `{param}` of route `{template}`")]
    MissingParameter { template: String, param: String },

    /// The pattern string does not describe a valid route template
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidTemplate { pattern: String, reason: String },

    /// A supplied parameter value cannot be placed into a path
    #[error("invalid value for parameter `{param}`: {reason}")]
    InvalidParameter { param: String, reason: String },

    /// Lookup by route name failed
    #[error("no route named `{name}`")]
    UnknownRoute { name: String },

    /// Two routes were registered under the same name
    #[error("route name `{name}` is already registered")]
    DuplicateName { name: String },
}

impl RouteError {
    /// Whether the error comes from route registration and must block startup
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RouteError::AmbiguousRoute { .. }
                | RouteError::InvalidTemplate { .. }
                | RouteError::DuplicateName { .. }
        )
    }

    pub(crate) fn invalid_template(pattern: &str, reason: impl Into<String>) -> Self {
        RouteError::InvalidTemplate {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_parameter(param: &str, reason: impl Into<String>) -> Self {
        RouteError::InvalidParameter {
            param: param.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = RouteError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_errors() {
        let ambiguous = RouteError::AmbiguousRoute {
            existing: "/a/[x]".into(),
            conflicting: "/a/[y]".into(),
        };
        assert!(ambiguous.is_fatal());
        assert!(RouteError::invalid_template("/[", "unbalanced brackets").is_fatal());

        let no_match = RouteError::NoMatch { path: "/nope".into() };
        assert!(!no_match.is_fatal());
        let missing = RouteError::MissingParameter {
            template: "/blogs/[blogID]".into(),
            param: "blogID".into(),
        };
        assert!(!missing.is_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = RouteError::MissingParameter {
            template: "/blogs/[blogID]".into(),
            param: "blogID".into(),
        };
        assert_eq!(
            err.to_string(),
            "missing value for parameter `blogID` of route `/blogs/[blogID]`"
        );
    }
}
