//! Configuration management for resgen code generation.
//!
//! This module defines the `Config` struct holding everything one generation
//! run needs. The configuration can be loaded from a YAML file, created
//! programmatically, or assembled from command-line arguments.
//!
//! # Examples
//!
//! ```no_run
//! use resgen_core::config::Config;
//!
//! # #[tokio::main]
//! # async fn main() -> resgen_core::Result<()> {
//! // Create a new config programmatically
//! let mut config = Config::new("petstore", "openapi.yaml");
//! config.output_dir = Some("generated".to_string());
//! config.overwrite = true;
//!
//! // Or load from a config file
//! let config = Config::from_file("resgen.yaml").await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::{Component, Path};

use crate::openapi::SpecSource;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Configuration for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Name of the generated package
    pub package_name: String,

    /// OpenAPI document location: a file path, an HTTP(S) URL, or `-` for stdin
    #[serde(default = "default_spec")]
    pub spec: String,

    /// Output directory; a temporary directory is created when unset
    #[serde(default)]
    pub output_dir: Option<String>,

    /// Template to use for code generation
    #[serde(default = "default_template")]
    pub template_kind: String,

    /// Optional path to template directory
    #[serde(default)]
    pub template_dir: Option<String>,

    /// Whether to write into an existing, non-empty package directory
    #[serde(default)]
    pub overwrite: bool,
}

impl Config {
    /// Create a new Config with default values
    pub fn new(package_name: impl Into<String>, spec: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            spec: spec.into(),
            output_dir: None,
            template_kind: default_template(),
            template_dir: None,
            overwrite: false,
        }
    }

    /// Load configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check the fields that cannot be checked by deserialization alone
    pub fn validate(&self) -> crate::Result<()> {
        if self.package_name.trim().is_empty() {
            return Err(crate::Error::config("package_name must not be empty"));
        }
        // The package directory must be a direct child of the output directory
        let mut components = Path::new(&self.package_name).components();
        let single_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_name || self.package_name.contains(|c| c == '/' || c == '\\') {
            return Err(crate::Error::config(format!(
                "package_name '{}' must be a plain directory name",
                self.package_name
            )));
        }
        self.spec_source()?;
        Ok(())
    }

    /// Parsed location of the OpenAPI document
    pub fn spec_source(&self) -> crate::Result<SpecSource> {
        self.spec.parse()
    }
}

fn default_spec() -> String {
    "-".to_string()
}

fn default_template() -> String {
    "python_client".to_string()
}
