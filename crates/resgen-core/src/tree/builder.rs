//! Incremental construction of the resource tree.

// Internal imports (std, crate)
use std::collections::BTreeMap;

use super::path::{join, segments};
use super::{ResourceId, ResourceTree};
use crate::openapi::path_items;

// External imports (alphabetized)
use openapiv3::{OpenAPI, PathItem};

/// Collects the path map of a document and folds it into a [`ResourceTree`].
///
/// Paths are inserted in ascending lexicographic order. That order decides the
/// order of every resource's children and therefore the order of generated
/// code, so it is part of the builder's contract.
///
/// Path items are keyed by the path exactly as declared. A node only receives
/// the item declared at its own canonical path, so `/pets/` contributes the
/// nodes it names but never the operations of `/pets`.
#[derive(Debug, Default, Clone)]
pub struct TreeBuilder<'d> {
    items: BTreeMap<&'d str, Option<&'d PathItem>>,
}

impl<'d> TreeBuilder<'d> {
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Register every path of an OpenAPI document.
    ///
    /// Path items given as `$ref` are registered without operations.
    pub fn from_document(document: &'d OpenAPI) -> Self {
        path_items(document).fold(Self::new(), |builder, (path, item)| builder.path(path, item))
    }

    /// Register `path` with its optional path item.
    pub fn path(mut self, path: &'d str, item: Option<&'d PathItem>) -> Self {
        if segments(path).count() > 0 && path != canonical(path) {
            log::warn!(
                "path '{}' is not canonical, its operations apply only if '{}' is declared",
                path,
                canonical(path)
            );
        }
        self.items.insert(path, item);
        self
    }

    fn item_at(&self, path: &str) -> Option<&'d PathItem> {
        self.items.get(path).copied().flatten()
    }

    /// Build the tree in a single pass.
    pub fn build(self) -> ResourceTree {
        let mut tree = ResourceTree::new();
        if let Some(item) = self.item_at("/") {
            tree.extract_operations(ResourceId::ROOT, item);
        }

        for path in self.items.keys() {
            let mut parent = ResourceId::ROOT;
            let mut prefix = String::new();
            for segment in segments(path) {
                prefix = join(&prefix, segment);
                parent = match tree.lookup(&prefix) {
                    Some(existing) => existing,
                    None => {
                        let id = tree.attach(parent, prefix.clone(), segment.to_string());
                        log::debug!("add resource: {}", prefix);
                        if let Some(item) = self.item_at(&prefix) {
                            tree.extract_operations(id, item);
                        }
                        id
                    }
                };
            }
        }

        log::debug!("resource tree built with {} resources", tree.len());
        tree
    }
}

fn canonical(path: &str) -> String {
    segments(path).fold(String::new(), |prefix, segment| join(&prefix, segment))
}
