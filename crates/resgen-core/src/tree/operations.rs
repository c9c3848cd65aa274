//! HTTP operations attached to resources.

// Internal imports (std, crate)
use std::fmt;

use super::{ResourceId, ResourceTree};

// External imports (alphabetized)
use openapiv3::{Operation, PathItem};
use serde::Serialize;

/// HTTP verbs recognised on a path item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Delete,
    Get,
    Patch,
    Post,
    Put,
}

impl Verb {
    /// All recognised verbs, in extraction order
    pub const ALL: [Verb; 5] = [Verb::Delete, Verb::Get, Verb::Patch, Verb::Post, Verb::Put];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Get => "get",
            Self::Patch => "patch",
            Self::Post => "post",
            Self::Put => "put",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP operation installed on a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// HTTP verb of the operation
    pub verb: Verb,
    /// Owning resource
    pub resource: ResourceId,
    /// Operation description, empty when the document has none
    pub description: String,
    /// `operationId` of the source operation
    pub operation_id: Option<String>,
    /// Short summary of the source operation
    pub summary: Option<String>,
}

impl Method {
    fn from_operation(verb: Verb, resource: ResourceId, operation: &Operation) -> Self {
        Self {
            verb,
            resource,
            description: operation.description.clone().unwrap_or_default(),
            operation_id: operation.operation_id.clone(),
            summary: operation.summary.clone(),
        }
    }
}

/// The operation a path item declares for `verb`, if any.
pub fn operation_for(item: &PathItem, verb: Verb) -> Option<&Operation> {
    match verb {
        Verb::Delete => item.delete.as_ref(),
        Verb::Get => item.get.as_ref(),
        Verb::Patch => item.patch.as_ref(),
        Verb::Post => item.post.as_ref(),
        Verb::Put => item.put.as_ref(),
    }
}

impl ResourceTree {
    /// Install every recognised operation of `item` on the resource `id`.
    pub(crate) fn extract_operations(&mut self, id: ResourceId, item: &PathItem) {
        for verb in Verb::ALL {
            if let Some(operation) = operation_for(item, verb) {
                self.install_method(Method::from_operation(verb, id, operation));
            }
        }
    }

    /// Record `method` on its resource. A second method for the same verb
    /// replaces the first.
    pub(crate) fn install_method(&mut self, method: Method) {
        let resource = self.node_mut(method.resource);
        log::debug!(
            "new http method: {} {} (operation_id: {:?})",
            method.verb,
            resource.path,
            method.operation_id
        );
        if let Some(previous) = resource.operations.insert(method.verb, method) {
            log::warn!(
                "{} {} declared more than once, keeping the last declaration",
                previous.verb,
                resource.path
            );
        }
    }
}
