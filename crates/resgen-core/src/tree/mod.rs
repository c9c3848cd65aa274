//! Resource tree built from an OpenAPI path map.
//!
//! Every path of the document becomes a chain of [`Resource`] nodes, one per
//! path segment, hanging off a single root. Nodes live in a tree-wide arena
//! owned by [`ResourceTree`]; parent and child links are [`ResourceId`] indices,
//! so the parent link never owns anything.
//!
//! # Examples
//!
//! ```
//! use resgen_core::tree::TreeBuilder;
//!
//! let tree = TreeBuilder::new()
//!     .path("/pets", None)
//!     .path("/pets/{petId}", None)
//!     .path("/pets/{petId}/photos", None)
//!     .build();
//!
//! let photos = tree.find("/pets/{petId}/photos").unwrap();
//! assert_eq!(photos.class_name(), "PetsItemPhotos");
//! assert_eq!(tree.root().class_name(), "Root");
//! ```

mod builder;
mod naming;
mod operations;
mod path;

pub use builder::TreeBuilder;
pub use naming::{pascal_case, slugify, Resources};
pub use operations::{operation_for, Method, Verb};
pub use path::{join, segments};

// Internal imports (std, crate)
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// External imports (alphabetized)
use serde::Serialize;

/// Index of a resource inside its [`ResourceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResourceId(usize);

impl ResourceId {
    /// The root is always the first node of the arena.
    pub const ROOT: ResourceId = ResourceId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Classification of a resource by its path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// The document root (`/`)
    Root,
    /// A literal segment such as `pets`
    Literal,
    /// A templated path parameter such as `{petId}`
    Pattern,
}

impl ResourceKind {
    /// Classify a non-root path segment.
    pub fn of_segment(segment: &str) -> Self {
        if naming::is_pattern_segment(segment) {
            Self::Pattern
        } else {
            Self::Literal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Literal => "literal",
            Self::Pattern => "pattern",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the resource tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub(crate) id: ResourceId,
    pub(crate) path: String,
    pub(crate) name: Option<String>,
    pub(crate) kind: ResourceKind,
    pub(crate) parent: Option<ResourceId>,
    pub(crate) children: Vec<ResourceId>,
    pub(crate) operations: BTreeMap<Verb, Method>,
}

impl Resource {
    fn root() -> Self {
        Self {
            id: ResourceId::ROOT,
            path: "/".to_string(),
            name: None,
            kind: ResourceKind::Root,
            parent: None,
            children: Vec::new(),
            operations: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Full path from the document root, e.g. `/pets/{petId}`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment; `None` for the root
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn parent_id(&self) -> Option<ResourceId> {
        self.parent
    }

    /// Child ids in insertion order
    pub fn child_ids(&self) -> &[ResourceId] {
        &self.children
    }

    /// HTTP operations keyed by verb
    pub fn operations(&self) -> &BTreeMap<Verb, Method> {
        &self.operations
    }
}

/// Arena holding every resource of one document.
///
/// The tree is only mutated by [`TreeBuilder`]; once built it is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTree {
    nodes: Vec<Resource>,
    by_path: HashMap<String, ResourceId>,
}

impl Default for ResourceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceTree {
    /// A tree holding only the root.
    pub(crate) fn new() -> Self {
        let mut by_path = HashMap::new();
        by_path.insert("/".to_string(), ResourceId::ROOT);
        Self {
            nodes: vec![Resource::root()],
            by_path,
        }
    }

    /// Append a fully linked node under `parent` and return its id.
    pub(crate) fn attach(&mut self, parent: ResourceId, path: String, name: String) -> ResourceId {
        let id = ResourceId(self.nodes.len());
        let kind = ResourceKind::of_segment(&name);
        self.nodes.push(Resource {
            id,
            path: path.clone(),
            name: Some(name),
            kind,
            parent: Some(parent),
            children: Vec::new(),
            operations: BTreeMap::new(),
        });
        self.nodes[parent.0].children.push(id);
        self.by_path.insert(path, id);
        id
    }

    pub(crate) fn node_mut(&mut self, id: ResourceId) -> &mut Resource {
        &mut self.nodes[id.0]
    }

    pub(crate) fn lookup(&self, path: &str) -> Option<ResourceId> {
        self.by_path.get(path).copied()
    }

    pub fn root(&self) -> ResourceRef<'_> {
        self.get(ResourceId::ROOT)
    }

    /// Borrow a resource by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    pub fn get(&self, id: ResourceId) -> ResourceRef<'_> {
        assert!(id.0 < self.nodes.len(), "resource id {} out of range", id.0);
        ResourceRef { tree: self, id }
    }

    /// Find the resource whose full path is `path`.
    pub fn find(&self, path: &str) -> Option<ResourceRef<'_>> {
        self.lookup(path).map(|id| self.get(id))
    }

    /// Number of resources, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}

/// Borrowed handle on a resource and the tree it belongs to.
///
/// Naming properties (see `naming.rs`) need the ancestor chain, so they are
/// exposed on the handle rather than on [`Resource`].
#[derive(Clone, Copy)]
pub struct ResourceRef<'t> {
    tree: &'t ResourceTree,
    id: ResourceId,
}

impl<'t> ResourceRef<'t> {
    pub fn tree(&self) -> &'t ResourceTree {
        self.tree
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn resource(&self) -> &'t Resource {
        &self.tree.nodes[self.id.0]
    }

    pub fn path(&self) -> &'t str {
        &self.resource().path
    }

    pub fn name(&self) -> Option<&'t str> {
        self.resource().name.as_deref()
    }

    pub fn kind(&self) -> ResourceKind {
        self.resource().kind
    }

    pub fn is_root(&self) -> bool {
        self.kind() == ResourceKind::Root
    }

    pub fn parent(&self) -> Option<ResourceRef<'t>> {
        self.resource().parent.map(|id| self.tree.get(id))
    }

    /// Children in insertion order
    pub fn children(&self) -> impl Iterator<Item = ResourceRef<'t>> + 't {
        let tree = self.tree;
        self.resource()
            .children
            .iter()
            .map(move |&id| tree.get(id))
    }

    /// Direct child whose full path is `path`
    pub fn child(&self, path: &str) -> Option<ResourceRef<'t>> {
        self.children().find(|child| child.path() == path)
    }

    pub fn operations(&self) -> &'t BTreeMap<Verb, Method> {
        &self.resource().operations
    }
}

impl PartialEq for ResourceRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for ResourceRef<'_> {}

impl fmt::Debug for ResourceRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRef")
            .field("path", &self.path())
            .field("kind", &self.kind())
            .finish()
    }
}
