//! End-to-end code generation

use std::{path::PathBuf, str::FromStr};

use crate::{
    config::Config,
    error::{Error, Result},
    openapi::OpenApiContext,
    templates::{TemplateKind, TemplateManager},
};

/// Prefix of the temporary output directory used when none is configured
pub const OUTPUT_DIR_PREFIX: &str = "resgen-";

/// Main entry point for code generation.
///
/// Loads the document, builds its resource tree and renders the configured
/// template set. Returns the output directory, which holds the package
/// directory named after `config.package_name`.
pub async fn generate(config: &Config) -> Result<PathBuf> {
    config.validate()?;
    let template_kind = TemplateKind::from_str(&config.template_kind).map_err(Error::config)?;

    // 1. Load the OpenAPI document and build the tree
    let spec = OpenApiContext::load(&config.spec_source()?).await?;
    let tree = spec.resource_tree();
    log::info!(
        "Loaded '{}' {} with {} resources",
        spec.title(),
        spec.version(),
        tree.len()
    );

    // 2. Resolve the template set
    let template_dir = config.template_dir.as_ref().map(PathBuf::from);
    let template_manager = TemplateManager::new(template_kind, template_dir).await?;

    // 3. Render into the configured or a fresh temporary directory
    let output_dir = match &config.output_dir {
        Some(dir) => PathBuf::from(dir),
        None => tempfile::Builder::new()
            .prefix(OUTPUT_DIR_PREFIX)
            .tempdir()?
            .into_path(),
    };
    template_manager
        .generate(
            &spec,
            &tree,
            &config.package_name,
            &output_dir,
            config.overwrite,
        )
        .await?;

    Ok(output_dir)
}
