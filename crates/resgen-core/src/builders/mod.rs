//! Template contexts built from the resource tree.
//!
//! Tera cannot call methods on Rust values, so every naming property a
//! template may need is computed here and serialized alongside the resource.

// Internal imports (std, crate)
use crate::openapi::OpenApiContext;
use crate::tree::{Method, ResourceKind, ResourceRef, ResourceTree, Verb};

// External imports (alphabetized)
use serde::Serialize;

/// Top-level context handed to every template
#[derive(Debug, Clone, Serialize)]
pub struct ProjectContext {
    /// Target package name
    pub package_name: String,
    /// API title from the document's `info`
    pub title: String,
    /// API version from the document's `info`
    pub version: String,
    /// The root resource
    pub root: ResourceContext,
    /// Every resource, depth first from the root
    pub resources: Vec<ResourceContext>,
}

/// A resource with its derived names
#[derive(Debug, Clone, Serialize)]
pub struct ResourceContext {
    pub path: String,
    pub name: Option<String>,
    pub safe_name: String,
    pub class_name: String,
    pub kind: ResourceKind,
    pub is_pattern: bool,
    pub has_pattern_child: bool,
    pub parent_class_name: Option<String>,
    pub children: Vec<ChildContext>,
    pub methods: Vec<MethodContext>,
}

/// Summary of a child resource, enough to link to its class
#[derive(Debug, Clone, Serialize)]
pub struct ChildContext {
    pub path: String,
    pub name: Option<String>,
    pub safe_name: String,
    /// `safe_name` made usable as a Python attribute of the parent class
    pub py_name: String,
    pub class_name: String,
    pub is_pattern: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodContext {
    pub verb: Verb,
    pub description: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
}

impl ProjectContext {
    pub fn new(package_name: &str, spec: &OpenApiContext, tree: &ResourceTree) -> Self {
        let root = tree.root();
        Self {
            package_name: package_name.to_string(),
            title: spec.title().to_string(),
            version: spec.version().to_string(),
            root: ResourceContext::from(root),
            resources: root.all_resources().map(ResourceContext::from).collect(),
        }
    }
}

impl From<ResourceRef<'_>> for ResourceContext {
    fn from(resource: ResourceRef<'_>) -> Self {
        Self {
            path: resource.path().to_string(),
            name: resource.name().map(String::from),
            safe_name: resource.safe_name(),
            class_name: resource.class_name(),
            kind: resource.kind(),
            is_pattern: resource.is_pattern(),
            has_pattern_child: resource.has_pattern_child(),
            parent_class_name: resource.parent().map(|parent| parent.class_name()),
            children: resource.children().map(ChildContext::from).collect(),
            methods: resource
                .operations()
                .values()
                .map(MethodContext::from)
                .collect(),
        }
    }
}

impl From<ResourceRef<'_>> for ChildContext {
    fn from(resource: ResourceRef<'_>) -> Self {
        Self {
            path: resource.path().to_string(),
            name: resource.name().map(String::from),
            safe_name: resource.safe_name(),
            py_name: py_name(resource),
            class_name: resource.class_name(),
            is_pattern: resource.is_pattern(),
        }
    }
}

const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

/// Attribute name of `resource` on its parent's generated class.
///
/// Empty and digit-led slugs get a leading `_`; keywords and names taken by
/// one of the parent's verb methods get a trailing `_`.
fn py_name(resource: ResourceRef<'_>) -> String {
    let safe_name = resource.safe_name();
    if safe_name.is_empty() || safe_name.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{}", safe_name);
    }
    let taken_by_verb = resource
        .parent()
        .map(|parent| {
            parent
                .operations()
                .keys()
                .any(|verb| verb.as_str() == safe_name)
        })
        .unwrap_or(false);
    if taken_by_verb || PYTHON_KEYWORDS.contains(&safe_name.as_str()) {
        return format!("{}_", safe_name);
    }
    safe_name
}

impl From<&Method> for MethodContext {
    fn from(method: &Method) -> Self {
        Self {
            verb: method.verb,
            description: method.description.clone(),
            operation_id: method.operation_id.clone(),
            summary: method.summary.clone(),
        }
    }
}
