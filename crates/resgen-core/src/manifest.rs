//! Manifest file format for resgen template sets.
//!
//! A template set may carry a `manifest.yaml` (or `manifest.toml`) describing
//! which files to render and which commands to run afterwards. Without a
//! manifest, or with an empty `files` list, every `*.tera` template of the set
//! is rendered once to its relative path minus the `.tera` suffix.

// Internal imports (std, crate)
use std::path::Path;

// External imports (alphabetized)
use serde::{Deserialize, Deserializer, Serialize};
use serde_value::Value as SerdeValue;
use tokio::fs;

/// The root manifest structure for a template set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// The name of the template set
    pub name: String,

    /// A short description of what the template set generates
    #[serde(default)]
    pub description: String,

    /// The target programming language (e.g., "python")
    #[serde(default)]
    pub language: String,

    /// Files to generate; empty means every template of the set
    #[serde(default)]
    pub files: Vec<TemplateFile>,

    /// Commands run after generation
    #[serde(default)]
    pub hooks: TemplateHooks,
}

/// Describes a single file to be generated from a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateFile {
    /// Path to the template file, relative to the template directory
    pub source: String,

    /// Destination path relative to the package directory.
    ///
    /// For `for_each: resource` entries the destination is itself rendered
    /// with the current `resource` in scope.
    pub destination: String,

    /// Render once per item instead of once overall
    #[serde(default)]
    pub for_each: Option<ForEach>,
}

/// Iteration directives for [`TemplateFile::for_each`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForEach {
    /// Every resource of the tree, depth first
    Resource,
}

/// Hooks that run at specific points during code generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateHooks {
    /// Commands to run after code generation, in the output directory
    #[serde(default, deserialize_with = "deserialize_commands")]
    pub post_generate: Vec<String>,
}

impl Default for TemplateManifest {
    fn default() -> Self {
        Self {
            name: String::from("default"),
            description: String::new(),
            language: String::new(),
            files: Vec::new(),
            hooks: TemplateHooks::default(),
        }
    }
}

impl TemplateManifest {
    /// Load the manifest of a template set, trying YAML first, then TOML.
    ///
    /// Returns the default manifest when the set has neither.
    pub async fn load_from_dir(template_dir: &Path) -> crate::Result<Self> {
        let yaml_path = template_dir.join("manifest.yaml");
        let toml_path = template_dir.join("manifest.toml");

        if yaml_path.exists() {
            let content = Self::read(&yaml_path).await?;
            return serde_yaml::from_str(&content).map_err(|e| {
                crate::Error::template(format!(
                    "Invalid YAML in template manifest at {}: {}",
                    yaml_path.display(),
                    e
                ))
            });
        }

        if toml_path.exists() {
            let content = Self::read(&toml_path).await?;
            return toml::from_str(&content).map_err(|e| {
                crate::Error::template(format!(
                    "Invalid TOML in template manifest at {}: {}",
                    toml_path.display(),
                    e
                ))
            });
        }

        log::debug!(
            "No manifest in {}, rendering every template",
            template_dir.display()
        );
        Ok(Self::default())
    }

    async fn read(path: &Path) -> crate::Result<String> {
        log::debug!("Reading template manifest: {}", path.display());
        fs::read_to_string(path).await.map_err(|e| {
            crate::Error::template(format!(
                "Failed to read template manifest at {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// Helper function to deserialize either a single command or a list of commands
fn deserialize_commands<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SerdeValue::deserialize(deserializer)?;

    match value {
        SerdeValue::String(s) => Ok(vec![s]),
        SerdeValue::Seq(seq) => seq
            .into_iter()
            .map(|item| match item {
                SerdeValue::String(s) => Ok(s),
                _ => Err(serde::de::Error::custom(
                    "Expected string or array of strings",
                )),
            })
            .collect(),
        SerdeValue::Unit | SerdeValue::Option(None) => Ok(Vec::new()),
        _ => Err(serde::de::Error::custom(
            "Expected string or array of strings",
        )),
    }
}
