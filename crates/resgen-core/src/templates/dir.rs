//! Template directory resolution

// Internal imports (std, crate)
use std::io;
use std::path::{Path, PathBuf};

use super::TemplateKind;

/// Environment variable naming the directory that holds template sets
pub const TEMPLATE_DIR_ENV: &str = "RESGEN_TEMPLATE_DIR";

/// A resolved template directory
#[derive(Debug, Clone)]
pub struct TemplateDir {
    /// Directory containing one sub-directory per template kind
    root_dir: PathBuf,
    /// Path to the specific template set
    template_path: PathBuf,
    kind: TemplateKind,
}

impl TemplateDir {
    /// Create a new TemplateDir with explicit paths
    pub fn new(root_dir: PathBuf, template_path: PathBuf, kind: TemplateKind) -> Self {
        Self {
            root_dir,
            template_path,
            kind,
        }
    }

    /// Resolve a user-supplied directory.
    ///
    /// `dir` may point at the template set itself (its name equals the kind)
    /// or at the directory containing it.
    pub fn from_user_dir(kind: TemplateKind, dir: &Path) -> io::Result<Self> {
        let points_at_set = dir
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name == kind.as_str())
            .unwrap_or(false);

        let resolved = match dir.parent() {
            Some(parent) if points_at_set => {
                Self::new(parent.to_path_buf(), dir.to_path_buf(), kind)
            }
            _ if kind == TemplateKind::Custom && !dir.join(kind.as_str()).exists() => {
                // A custom set may live in a directory of any name
                Self::new(dir.to_path_buf(), dir.to_path_buf(), kind)
            }
            _ => Self::new(dir.to_path_buf(), dir.join(kind.as_str()), kind),
        };
        resolved.validate()
    }

    /// Discover the template directory based on the template kind and optional override
    pub fn discover(kind: TemplateKind, custom_dir: Option<&Path>) -> io::Result<Self> {
        if let Some(dir) = custom_dir {
            return Self::from_user_dir(kind, dir);
        }

        let root_dir = Self::find_template_base_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "Could not find template directory in any standard location (set {} to override)",
                    TEMPLATE_DIR_ENV
                ),
            )
        })?;
        let template_path = root_dir.join(kind.as_str());
        Self::new(root_dir, template_path, kind).validate()
    }

    fn validate(self) -> io::Result<Self> {
        if !self.template_path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "Template directory not found: {}",
                    self.template_path.display()
                ),
            ));
        }
        Ok(self)
    }

    /// Find the directory holding template sets by checking standard locations
    fn find_template_base_dir() -> Option<PathBuf> {
        // 1. Environment variable
        if let Ok(dir) = std::env::var(TEMPLATE_DIR_ENV) {
            let path = PathBuf::from(dir);
            if path.is_dir() {
                return Some(path);
            }
        }

        // 2. Current and parent working directory
        for base in [".", ".."] {
            let templates_dir = PathBuf::from(base).join("templates");
            if templates_dir.is_dir() {
                return Some(templates_dir);
            }
        }

        // 3. Workspace root, for development builds
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        if let Some(templates_dir) = manifest_dir
            .ancestors()
            .map(|dir| dir.join("templates"))
            .find(|dir| dir.is_dir())
        {
            return Some(templates_dir);
        }

        // 4. User's home directory
        dirs::home_dir()
            .map(|home| home.join(".resgen").join("templates"))
            .filter(|dir| dir.is_dir())
    }

    /// Get the directory containing the template sets
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// Get the path to the specific template set
    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// Returns a displayable version of the template path
    pub fn display(&self) -> std::path::Display<'_> {
        self.template_path.display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_parent_directory() -> io::Result<()> {
        let temp_dir = tempdir()?;
        let templates = temp_dir.path().join("templates");
        let set = templates.join("python_client");
        fs::create_dir_all(&set)?;

        let dir = TemplateDir::discover(TemplateKind::PythonClient, Some(&templates))?;
        assert_eq!(dir.template_path(), set.as_path());
        assert_eq!(dir.root_dir(), templates.as_path());
        Ok(())
    }

    #[test]
    fn test_explicit_set_directory() -> io::Result<()> {
        let temp_dir = tempdir()?;
        let set = temp_dir.path().join("python_client");
        fs::create_dir_all(&set)?;

        let dir = TemplateDir::discover(TemplateKind::PythonClient, Some(&set))?;
        assert_eq!(dir.template_path(), set.as_path());
        Ok(())
    }

    #[test]
    fn test_custom_set_with_any_name() -> io::Result<()> {
        let temp_dir = tempdir()?;
        let set = temp_dir.path().join("my-templates");
        fs::create_dir_all(&set)?;

        let dir = TemplateDir::discover(TemplateKind::Custom, Some(&set))?;
        assert_eq!(dir.template_path(), set.as_path());
        assert_eq!(dir.kind(), TemplateKind::Custom);
        Ok(())
    }

    #[test]
    fn test_missing_directory() {
        let result =
            TemplateDir::discover(TemplateKind::PythonClient, Some(Path::new("/nonexistent")));
        assert!(result.is_err());
    }

    #[test]
    fn test_bundled_templates_are_discoverable() -> io::Result<()> {
        let dir = TemplateDir::discover(TemplateKind::PythonClient, None)?;
        assert!(dir.template_path().ends_with("templates/python_client"));
        Ok(())
    }
}
