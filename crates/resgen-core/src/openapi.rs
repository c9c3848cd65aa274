//! OpenAPI specification loading.
//!
//! This module loads an OpenAPI document from standard input, a file or a URL
//! and parses it into the typed [`openapiv3::OpenAPI`] model. Validation of
//! the document is left to `openapiv3`; anything it rejects is reported as
//! [`Error::OpenApi`].
//!
//! # Examples
//!
//! ```no_run
//! use resgen_core::openapi::{OpenApiContext, SpecSource};
//! use resgen_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let source: SpecSource = "petstore.yaml".parse()?;
//! let spec = OpenApiContext::load(&source).await?;
//!
//! println!("API Title: {}", spec.title());
//! let tree = spec.resource_tree();
//! println!("{} resources", tree.len());
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::tree::{ResourceTree, TreeBuilder};
use crate::Error;

// External imports (alphabetized)
use openapiv3::{OpenAPI, PathItem, ReferenceOr};
use tokio::fs;
use tokio::io::AsyncReadExt;
use url::Url;

/// Where an OpenAPI document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    /// Standard input, spelled `-`
    Stdin,
    /// A local YAML or JSON file
    File(PathBuf),
    /// An HTTP(S) URL
    Url(Url),
}

impl FromStr for SpecSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(Self::Stdin);
        }

        // Check if the input looks like a URL
        if s.starts_with("http://") || s.starts_with("https://") {
            let url = Url::parse(s)
                .map_err(|e| Error::openapi(format!("Invalid spec URL '{}': {}", s, e)))?;
            return Ok(Self::Url(url));
        }

        if s.is_empty() {
            return Err(Error::config("Spec location must not be empty"));
        }
        Ok(Self::File(PathBuf::from(s)))
    }
}

impl fmt::Display for SpecSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// A parsed OpenAPI document
#[derive(Debug, Clone)]
pub struct OpenApiContext {
    /// The typed document
    pub document: OpenAPI,
}

impl OpenApiContext {
    /// Load a document from any [`SpecSource`]
    pub async fn load(source: &SpecSource) -> crate::Result<Self> {
        log::debug!("Loading OpenAPI spec from {}", source);
        match source {
            SpecSource::Stdin => Self::from_stdin().await,
            SpecSource::File(path) => Self::from_file(path).await,
            SpecSource::Url(url) => Self::from_url(url.as_str()).await,
        }
    }

    /// Create a new context from a file or URL (supports both YAML and JSON)
    pub async fn from_file_or_url<P: AsRef<str>>(location: P) -> crate::Result<Self> {
        let source: SpecSource = location.as_ref().parse()?;
        Self::load(&source).await
    }

    /// Read a document from standard input
    pub async fn from_stdin() -> crate::Result<Self> {
        let mut content = String::new();
        tokio::io::stdin().read_to_string(&mut content).await?;
        Self::parse_content(&content)
            .map_err(|e| Error::openapi(format!("Failed to parse OpenAPI spec from stdin: {}", e)))
    }

    /// Create a new context from a file (supports both YAML and JSON)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        Self::parse_content(&content).map_err(|e| {
            Error::openapi(format!(
                "Failed to parse OpenAPI spec at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Create a new context from a URL (supports both YAML and JSON)
    pub async fn from_url(url: &str) -> crate::Result<Self> {
        let response = reqwest::get(url).await.map_err(|e| {
            Error::openapi(format!("Failed to fetch OpenAPI spec from {}: {}", url, e))
        })?;

        if !response.status().is_success() {
            return Err(Error::openapi(format!(
                "Failed to fetch OpenAPI spec from {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let content = response.text().await.map_err(|e| {
            Error::openapi(format!("Failed to read response from {}: {}", url, e))
        })?;

        Self::parse_content(&content).map_err(|e| {
            Error::openapi(format!("Failed to parse OpenAPI spec from {}: {}", url, e))
        })
    }

    /// Parse content as either JSON or YAML
    pub fn parse_content(content: &str) -> Result<Self, String> {
        // Try to parse as JSON first
        if let Ok(document) = serde_json::from_str(content) {
            return Ok(Self { document });
        }

        // YAML is a superset of JSON, so its error is the one worth reporting
        serde_yaml::from_str(content)
            .map(|document| Self { document })
            .map_err(|e| format!("content is not a valid OpenAPI document: {}", e))
    }

    /// Get the title of the API
    pub fn title(&self) -> &str {
        &self.document.info.title
    }

    /// Get the version of the API
    pub fn version(&self) -> &str {
        &self.document.info.version
    }

    /// Build the resource tree of this document
    pub fn resource_tree(&self) -> ResourceTree {
        TreeBuilder::from_document(&self.document).build()
    }
}

/// Paths of `document` with their inline path items.
///
/// A path item given as a `$ref` yields `None` and is logged.
pub fn path_items(document: &OpenAPI) -> impl Iterator<Item = (&str, Option<&PathItem>)> {
    document.paths.paths.iter().map(|(path, item)| match item {
        ReferenceOr::Item(item) => (path.as_str(), Some(item)),
        ReferenceOr::Reference { reference } => {
            log::warn!(
                "path item for '{}' is a reference ({}), its operations are skipped",
                path,
                reference
            );
            (path.as_str(), None)
        }
    })
}
