//! Loading and rendering of template sets

// Internal imports (std, crate)
use std::{
    error::Error as StdError,
    io,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use crate::{
    builders::ProjectContext,
    error::{Error, Result},
    manifest::{ForEach, TemplateFile, TemplateManifest},
    openapi::OpenApiContext,
    tree::ResourceTree,
};

use super::{PatternChild, TemplateDir, TemplateKind};

// External imports (alphabetized)
use tera::{Context, Tera};

/// Suffix of template files inside a template set
pub const TEMPLATE_SUFFIX: &str = ".tera";

/// Manages loading and rendering of code generation templates
#[derive(Debug, Clone)]
pub struct TemplateManager {
    /// Parsed templates of the set
    tera: Arc<Tera>,
    template_dir: TemplateDir,
    manifest: TemplateManifest,
}

impl TemplateManager {
    /// Create a new TemplateManager for the given template kind and directory
    ///
    /// # Arguments
    /// * `template_kind` - The kind of template to use
    /// * `template_dir` - Optional path to the template directory. If None, the default location will be used.
    pub async fn new(template_kind: TemplateKind, template_dir: Option<PathBuf>) -> Result<Self> {
        let template_dir = TemplateDir::discover(template_kind, template_dir.as_deref())?;
        let template_path = template_dir.template_path();
        let template_dir_str = template_path.to_str().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                "Template path contains invalid UTF-8",
            )
        })?;

        let manifest = TemplateManifest::load_from_dir(template_path).await?;

        let tera = Tera::new(&format!("{}/**/*{}", template_dir_str, TEMPLATE_SUFFIX))
            .map_err(|e| Error::template(format!("Failed to parse templates: {}", describe(&e))))?;

        log::debug!(
            "Loaded {} templates from {}",
            tera.get_template_names().count(),
            template_dir.display()
        );

        Ok(Self {
            tera: Arc::new(tera),
            template_dir,
            manifest,
        })
    }

    /// Get the template kind this template manager is configured for
    pub fn template_kind(&self) -> TemplateKind {
        self.template_dir.kind()
    }

    pub fn template_dir(&self) -> &TemplateDir {
        &self.template_dir
    }

    pub fn manifest(&self) -> &TemplateManifest {
        &self.manifest
    }

    /// Check if a template exists
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template(name).is_ok()
    }

    /// The files this set renders, as manifest entries.
    ///
    /// Without explicit manifest files, every template maps to its own
    /// relative path minus the `.tera` suffix.
    pub fn files(&self) -> Vec<TemplateFile> {
        if !self.manifest.files.is_empty() {
            return self.manifest.files.clone();
        }
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
            .into_iter()
            .map(|name| TemplateFile {
                source: name.to_string(),
                destination: name.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(name).to_string(),
                for_each: None,
            })
            .collect()
    }

    /// List all available templates as (source, destination) pairs
    pub fn list_templates(&self) -> Vec<(String, String)> {
        self.files()
            .into_iter()
            .filter(|f| self.has_template(&f.source))
            .map(|f| (f.source, f.destination))
            .collect()
    }

    /// Render the package `package_name` for `tree` into `output_dir`.
    ///
    /// Files land in `output_dir/package_name`, which must be absent or empty
    /// unless `overwrite` is set. Post-generation hooks run in `output_dir`.
    /// Returns the package directory.
    pub async fn generate(
        &self,
        spec: &OpenApiContext,
        tree: &ResourceTree,
        package_name: &str,
        output_dir: &Path,
        overwrite: bool,
    ) -> Result<PathBuf> {
        let project = ProjectContext::new(package_name, spec, tree);
        let base_context = Context::from_serialize(&project)?;

        let mut tera = Tera::clone(&self.tera);
        tera.register_function("pattern_child", PatternChild::new(Arc::new(tree.clone())));

        let package_dir = output_dir.join(package_name);
        Self::prepare_package_dir(&package_dir, overwrite).await?;

        for file in self.files() {
            log::debug!("Processing file: {} -> {}", file.source, file.destination);
            match file.for_each {
                None => {
                    let content = render(&tera, &file.source, &base_context)?;
                    write_file(&package_dir, &file.destination, &content).await?;
                }
                Some(ForEach::Resource) => {
                    for resource in &project.resources {
                        let mut context = base_context.clone();
                        context.insert("resource", resource);
                        let destination = Tera::one_off(&file.destination, &context, false)
                            .map_err(|e| {
                                Error::template(format!(
                                    "Failed to render destination '{}': {}",
                                    file.destination,
                                    describe(&e)
                                ))
                            })?;
                        let content = render(&tera, &file.source, &context)?;
                        write_file(&package_dir, &destination, &content).await?;
                    }
                }
            }
        }

        self.execute_post_generation_hooks(output_dir).await?;

        log::info!("Package generated in {}", package_dir.display());
        Ok(package_dir)
    }

    async fn prepare_package_dir(package_dir: &Path, overwrite: bool) -> Result<()> {
        if package_dir.exists() && !overwrite {
            let mut entries = tokio::fs::read_dir(package_dir).await?;
            if entries.next_entry().await?.is_some() {
                return Err(Error::config(format!(
                    "Package directory {} already exists and is not empty (use overwrite to replace its files)",
                    package_dir.display()
                )));
            }
        }
        tokio::fs::create_dir_all(package_dir).await?;
        Ok(())
    }

    /// Execute post-generation hooks from the manifest
    pub async fn execute_post_generation_hooks(&self, output_path: &Path) -> Result<()> {
        use tokio::process::Command as AsyncCommand;

        for command in &self.manifest.hooks.post_generate {
            log::info!("Running post-generation hook: {}", command);
            let output = AsyncCommand::new("sh")
                .arg("-c")
                .arg(command)
                .current_dir(output_path)
                .output()
                .await
                .map_err(|e| {
                    io::Error::new(
                        io::ErrorKind::Other,
                        format!("Failed to execute post-generation hook '{}': {}", command, e),
                    )
                })?;

            if !output.status.success() {
                return Err(Error::template(format!(
                    "Post-generation hook '{}' failed with status {}\n{}{}",
                    command,
                    output.status,
                    String::from_utf8_lossy(&output.stderr),
                    String::from_utf8_lossy(&output.stdout)
                )));
            }
        }
        Ok(())
    }
}

fn render(tera: &Tera, template_name: &str, context: &Context) -> Result<String> {
    log::debug!("Rendering template: {}", template_name);
    tera.render(template_name, context).map_err(|e| {
        log::error!("Template rendering failed for '{}': {}", template_name, e);
        Error::template(format!(
            "Failed to render template '{}': {}",
            template_name,
            describe(&e)
        ))
    })
}

async fn write_file(package_dir: &Path, destination: &str, content: &str) -> Result<()> {
    let relative = Path::new(destination);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(Error::template(format!(
            "Destination '{}' must be a relative path inside the package",
            destination
        )));
    }

    let output_path = package_dir.join(relative);
    if let Some(parent) = output_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    log::debug!(
        "Writing {} ({} bytes)",
        output_path.display(),
        content.len()
    );
    tokio::fs::write(&output_path, content).await?;
    Ok(())
}

// Tera wraps function and include failures; the useful message is at the bottom.
fn describe(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    const SPEC: &str = r#"
openapi: 3.0.0
info:
  title: Petstore
  version: 1.0.0
paths:
  /pets:
    get:
      operationId: listPets
      responses: {}
  /pets/{petId}:
    get:
      operationId: showPetById
      responses: {}
  /store/inventory:
    get:
      responses: {}
"#;

    async fn template_set(files: &[(&str, &str)]) -> Result<TempDir> {
        let dir = tempdir()?;
        let set = dir.path().join("custom");
        for (name, content) in files {
            let path = set.join(name);
            tokio::fs::create_dir_all(path.parent().unwrap()).await?;
            tokio::fs::write(path, content).await?;
        }
        Ok(dir)
    }

    fn spec() -> (OpenApiContext, ResourceTree) {
        let spec = OpenApiContext::parse_content(SPEC).unwrap();
        let tree = spec.resource_tree();
        (spec, tree)
    }

    #[tokio::test]
    async fn test_renders_every_template_without_manifest() -> Result<()> {
        let templates = template_set(&[
            (
                "classes.txt.tera",
                "{% for r in resources %}{{ r.class_name }}\n{% endfor %}",
            ),
            ("nested/name.txt.tera", "{{ package_name }} {{ title }}"),
        ])
        .await?;
        let manager =
            TemplateManager::new(TemplateKind::Custom, Some(templates.path().to_path_buf()))
                .await?;
        assert_eq!(manager.template_kind(), TemplateKind::Custom);
        assert_eq!(
            manager.list_templates(),
            vec![
                ("classes.txt.tera".to_string(), "classes.txt".to_string()),
                ("nested/name.txt.tera".to_string(), "nested/name.txt".to_string()),
            ]
        );

        let out = tempdir()?;
        let (spec, tree) = spec();
        let package = manager
            .generate(&spec, &tree, "petstore", out.path(), false)
            .await?;
        assert_eq!(package, out.path().join("petstore"));

        let classes = tokio::fs::read_to_string(package.join("classes.txt")).await?;
        assert_eq!(classes, "Root\nPets\nPetsItem\nStore\nStoreInventory\n");
        let name = tokio::fs::read_to_string(package.join("nested/name.txt")).await?;
        assert_eq!(name, "petstore Petstore");
        Ok(())
    }

    #[tokio::test]
    async fn test_pattern_child_function() -> Result<()> {
        let templates = template_set(&[(
            "items.txt.tera",
            "{% for r in resources %}{% if r.has_pattern_child %}{% set item = pattern_child(path=r.path) %}{{ r.class_name }}[{{ item.safe_name }}] -> {{ item.class_name }}\n{% endif %}{% endfor %}",
        )])
        .await?;
        let manager =
            TemplateManager::new(TemplateKind::Custom, Some(templates.path().to_path_buf()))
                .await?;
        let out = tempdir()?;
        let (spec, tree) = spec();
        let package = manager
            .generate(&spec, &tree, "petstore", out.path(), false)
            .await?;

        let items = tokio::fs::read_to_string(package.join("items.txt")).await?;
        assert_eq!(items, "Pets[petid] -> PetsItem\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_pattern_child_violation_fails_generation() -> Result<()> {
        let templates = template_set(&[(
            "broken.txt.tera",
            "{% set item = pattern_child(path=\"/store\") %}{{ item.class_name }}",
        )])
        .await?;
        let manager =
            TemplateManager::new(TemplateKind::Custom, Some(templates.path().to_path_buf()))
                .await?;
        let out = tempdir()?;
        let (spec, tree) = spec();
        let err = manager
            .generate(&spec, &tree, "petstore", out.path(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Template(_)));
        assert!(err
            .to_string()
            .contains("resource '/store' has no path-parameter child"));
        Ok(())
    }

    #[tokio::test]
    async fn test_for_each_resource_manifest() -> Result<()> {
        let templates = template_set(&[
            (
                "manifest.yaml",
                "name: per_resource\nfiles:\n  - source: resource.txt.tera\n    destination: \"resources/{{ resource.class_name }}.txt\"\n    for_each: resource\n",
            ),
            ("resource.txt.tera", "{{ resource.class_name }}"),
        ])
        .await?;
        let manager =
            TemplateManager::new(TemplateKind::Custom, Some(templates.path().to_path_buf()))
                .await?;
        let out = tempdir()?;
        let (spec, tree) = spec();
        let package = manager
            .generate(&spec, &tree, "petstore", out.path(), false)
            .await?;

        let item = tokio::fs::read_to_string(package.join("resources/PetsItem.txt")).await?;
        assert_eq!(item, "PetsItem");
        let inventory =
            tokio::fs::read_to_string(package.join("resources/StoreInventory.txt")).await?;
        assert_eq!(inventory, "StoreInventory");
        Ok(())
    }

    #[tokio::test]
    async fn test_refuses_non_empty_package_dir() -> Result<()> {
        let templates = template_set(&[("a.txt.tera", "a")]).await?;
        let manager =
            TemplateManager::new(TemplateKind::Custom, Some(templates.path().to_path_buf()))
                .await?;
        let out = tempdir()?;
        let (spec, tree) = spec();
        manager
            .generate(&spec, &tree, "petstore", out.path(), false)
            .await?;

        let err = manager
            .generate(&spec, &tree, "petstore", out.path(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        manager
            .generate(&spec, &tree, "petstore", out.path(), true)
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_post_generation_hooks() -> Result<()> {
        let templates = template_set(&[
            (
                "manifest.yaml",
                "name: hooked\nhooks:\n  post_generate: touch hooked\n",
            ),
            ("a.txt.tera", "a"),
        ])
        .await?;
        let manager =
            TemplateManager::new(TemplateKind::Custom, Some(templates.path().to_path_buf()))
                .await?;
        let out = tempdir()?;
        let (spec, tree) = spec();
        manager
            .generate(&spec, &tree, "petstore", out.path(), false)
            .await?;
        assert!(out.path().join("hooked").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_rejects_escaping_destination() -> Result<()> {
        let out = tempdir()?;
        let err = write_file(out.path(), "../escape.txt", "x").await.unwrap_err();
        assert!(matches!(err, Error::Template(_)));
        Ok(())
    }
}
