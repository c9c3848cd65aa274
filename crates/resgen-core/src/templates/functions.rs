//! Tera functions backed by the resource tree.

// Internal imports (std, crate)
use std::collections::HashMap;
use std::sync::Arc;

use crate::builders::ResourceContext;
use crate::tree::ResourceTree;

// External imports (alphabetized)
use tera::{Function, Value};

/// `pattern_child(path="/pets")` returns the path-parameter child of the
/// resource at `path`, failing the render when there is none or several.
pub struct PatternChild {
    tree: Arc<ResourceTree>,
}

impl PatternChild {
    pub fn new(tree: Arc<ResourceTree>) -> Self {
        Self { tree }
    }
}

impl Function for PatternChild {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let path = args
            .get("path")
            .and_then(Value::as_str)
            .ok_or_else(|| tera::Error::msg("pattern_child requires a string `path` argument"))?;
        let resource = self
            .tree
            .find(path)
            .ok_or_else(|| tera::Error::msg(format!("no resource at path '{}'", path)))?;
        let child = resource
            .pattern_child()
            .map_err(|e| tera::Error::msg(e.to_string()))?;
        tera::to_value(ResourceContext::from(child)).map_err(|e| tera::Error::msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeBuilder;
    use serde_json::json;

    fn call(tree: &Arc<ResourceTree>, path: Value) -> tera::Result<Value> {
        let mut args = HashMap::new();
        args.insert("path".to_string(), path);
        PatternChild::new(Arc::clone(tree)).call(&args)
    }

    #[test]
    fn test_returns_pattern_child() {
        let tree = Arc::new(
            TreeBuilder::new()
                .path("/pets/{petId}", None)
                .build(),
        );
        let child = call(&tree, json!("/pets")).unwrap();
        assert_eq!(child["class_name"], json!("PetsItem"));
        assert_eq!(child["path"], json!("/pets/{petId}"));
    }

    #[test]
    fn test_fails_without_pattern_child() {
        let tree = Arc::new(TreeBuilder::new().path("/pets", None).build());
        let err = call(&tree, json!("/pets")).unwrap_err();
        assert!(err.to_string().contains("has no path-parameter child"));
    }

    #[test]
    fn test_fails_on_bad_arguments() {
        let tree = Arc::new(TreeBuilder::new().path("/pets", None).build());
        assert!(call(&tree, json!(42)).is_err());
        assert!(call(&tree, json!("/missing")).is_err());
    }
}
