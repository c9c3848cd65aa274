//! Error handling for the resgen code generation library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Failures are never recovered
//! locally: building a tree is a pure transform of a static document, so every
//! error propagates unchanged to the caller.
//!
//! # Examples
//!
//! ```
//! use resgen_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::openapi("missing 'paths' object"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

/// Result type for resgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for resgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The OpenAPI document could not be loaded or parsed
    #[error("OpenAPI error: {0}")]
    OpenApi(String),

    /// `pattern_child` was requested on a resource without a path-parameter child
    #[error("resource '{path}' has no path-parameter child")]
    PatternChildNotFound { path: String },

    /// `pattern_child` was requested on a resource with several path-parameter children
    #[error(
        "resource '{path}' has more than one path-parameter child: {}",
        candidates.join(", ")
    )]
    AmbiguousPatternChild {
        path: String,
        candidates: Vec<String>,
    },

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new OpenAPI error
    pub fn openapi<S: Into<String>>(msg: S) -> Self {
        Self::OpenApi(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_pattern_child_lists_candidates() {
        let err = Error::AmbiguousPatternChild {
            path: "/pets".to_string(),
            candidates: vec!["/pets/{id}".to_string(), "/pets/{name}".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "resource '/pets' has more than one path-parameter child: /pets/{id}, /pets/{name}"
        );
    }

    #[test]
    fn test_constructors() {
        assert!(matches!(Error::config("x"), Error::Config(m) if m == "x"));
        assert!(matches!(Error::openapi("y"), Error::OpenApi(m) if m == "y"));
        assert!(matches!(Error::template("z"), Error::Template(m) if m == "z"));
    }
}
