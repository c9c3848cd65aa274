//! resgen CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use resgen_core::{Config, TemplateKind};
use tracing_subscriber::EnvFilter;

/// Generate a resource-oriented client package from an OpenAPI document
#[derive(Parser, Debug)]
#[command(name = "resgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Name of the generated package (overrides the config file)
    package_name: Option<String>,

    /// Path or URL to the OpenAPI document (YAML or JSON), `-` for stdin
    ///
    /// Example: --spec path/to/openapi.yaml
    /// Example: --spec https://example.com/openapi.json
    #[arg(long, default_value = "-")]
    spec: String,

    /// Output directory; a fresh temporary directory is used when omitted
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Template set to render (e.g., python_client, custom)
    #[arg(long)]
    template_kind: Option<String>,

    /// Directory holding the template set, or the set itself
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// YAML config file providing defaults for every other option
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write into a non-empty package directory
    #[arg(long)]
    overwrite: bool,
}

impl Cli {
    /// Merge command-line arguments over the optional config file.
    async fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .await
                .with_context(|| format!("Failed to load config file {}", path.display()))?,
            None => {
                let package_name = self
                    .package_name
                    .clone()
                    .context("PACKAGE_NAME is required when no --config is given")?;
                Config::new(package_name, self.spec.clone())
            }
        };

        if let Some(package_name) = self.package_name {
            config.package_name = package_name;
        }
        // `-` is the default, so only an explicit location replaces the file's
        if self.config.is_none() || self.spec != "-" {
            config.spec = self.spec;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = Some(output_dir.to_string_lossy().into_owned());
        }
        if let Some(template_kind) = self.template_kind {
            let kind: TemplateKind = template_kind
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid template '{template_kind}': {e}"))?;
            config.template_kind = kind.to_string();
        }
        if let Some(template_dir) = self.template_dir {
            config.template_dir = Some(template_dir.to_string_lossy().into_owned());
        }
        config.overwrite |= self.overwrite;

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config().await?;
    tracing::debug!(?config, "Resolved configuration");

    let output_dir = resgen_core::generate(&config)
        .await
        .with_context(|| format!("Failed to generate package '{}'", config.package_name))?;

    println!("{}", output_dir.display());
    Ok(())
}
