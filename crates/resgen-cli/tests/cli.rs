//! End-to-end tests for the resgen binary

use anyhow::Result;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

const PETSTORE: &str = r#"
openapi: 3.0.0
info:
  title: Swagger Petstore
  version: 1.0.0
paths:
  /pets:
    get:
      operationId: listPets
      summary: List all pets
      responses: {}
  /pets/{petId}:
    get:
      operationId: showPetById
      responses: {}
"#;

fn templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates")
}

fn resgen() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_resgen"));
    command.env("RUST_LOG", "warn");
    command
}

fn run_with_stdin(mut command: Command, input: &str) -> Result<Output> {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())?;
    Ok(child.wait_with_output()?)
}

#[test]
fn test_help_lists_options() -> Result<()> {
    let output = resgen().arg("--help").output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    for option in ["--spec", "--output-dir", "--template-kind", "--overwrite"] {
        assert!(stdout.contains(option), "help is missing {}", option);
    }
    Ok(())
}

#[test]
fn test_generate_from_file() -> Result<()> {
    let dir = tempdir()?;
    let spec = dir.path().join("petstore.yaml");
    std::fs::write(&spec, PETSTORE)?;
    let out = dir.path().join("out");

    let output = resgen()
        .arg("petstore")
        .arg("--spec")
        .arg(&spec)
        .arg("--output-dir")
        .arg(&out)
        .arg("--template-dir")
        .arg(templates_dir())
        .output()?;
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8(output.stdout)?.trim(), out.display().to_string());

    let resources = std::fs::read_to_string(out.join("petstore/resources.py"))?;
    assert!(resources.contains("class PetsItem:"));
    assert!(out.join("petstore/client.py").exists());
    Ok(())
}

#[test]
fn test_generate_from_stdin() -> Result<()> {
    let dir = tempdir()?;
    let out = dir.path().join("out");

    let mut command = resgen();
    command
        .arg("petstore")
        .arg("--output-dir")
        .arg(&out)
        .arg("--template-dir")
        .arg(templates_dir());
    let output = run_with_stdin(command, PETSTORE)?;
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(out.join("petstore/resources.py").exists());
    Ok(())
}

#[test]
fn test_malformed_spec_fails() -> Result<()> {
    let dir = tempdir()?;
    let mut command = resgen();
    command
        .arg("petstore")
        .arg("--output-dir")
        .arg(dir.path())
        .arg("--template-dir")
        .arg(templates_dir());
    let output = run_with_stdin(command, "openapi: [not a document")?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Failed to generate package 'petstore'"));
    assert!(!dir.path().join("petstore").exists());
    Ok(())
}

#[test]
fn test_package_name_is_required() -> Result<()> {
    let output = resgen().arg("--spec").arg("openapi.yaml").output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("PACKAGE_NAME is required"));
    Ok(())
}

#[test]
fn test_config_file_supplies_defaults() -> Result<()> {
    let dir = tempdir()?;
    let spec = dir.path().join("petstore.yaml");
    std::fs::write(&spec, PETSTORE)?;
    let out = dir.path().join("out");
    let config = dir.path().join("resgen.yaml");
    std::fs::write(
        &config,
        format!(
            "package_name: from_config\nspec: {}\noutput_dir: {}\ntemplate_dir: {}\n",
            spec.display(),
            out.display(),
            templates_dir().display()
        ),
    )?;

    let output = resgen().arg("--config").arg(&config).output()?;
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(out.join("from_config/resources.py").exists());

    // A positional name wins over the file
    let output = resgen()
        .arg("renamed")
        .arg("--config")
        .arg(&config)
        .output()?;
    assert!(output.status.success());
    assert!(out.join("renamed/resources.py").exists());
    Ok(())
}
