//! Template kinds shipped with resgen.
//!
//! # Examples
//!
//! ```
//! use resgen_core::templates::TemplateKind;
//! use std::str::FromStr;
//!
//! let template = TemplateKind::from_str("python_client").unwrap();
//! assert_eq!(template, TemplateKind::PythonClient);
//! assert_eq!(template.to_string(), "python_client");
//! assert_eq!(TemplateKind::default(), TemplateKind::PythonClient);
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::str::FromStr;

/// Supported template kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateKind {
    /// Python client package, one class per resource
    #[default]
    PythonClient,
    /// Templates supplied by the user
    Custom,
}

impl FromStr for TemplateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python_client" => Ok(TemplateKind::PythonClient),
            "custom" => Ok(TemplateKind::Custom),
            _ => Err(format!("Unknown template kind: {}", s)),
        }
    }
}

impl TemplateKind {
    /// Returns the template identifier, which is also its directory name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PythonClient => "python_client",
            Self::Custom => "custom",
        }
    }

    /// Returns an iterator over all available template kinds
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::PythonClient, Self::Custom].into_iter()
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
