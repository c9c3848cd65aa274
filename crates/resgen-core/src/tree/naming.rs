//! Identifier derivation for resources.
//!
//! Everything here is a pure function of a resource and its ancestors. The
//! tree never changes after it is built, so values are recomputed on demand
//! instead of being cached on the nodes.

// Internal imports (std, crate)
use super::{ResourceId, ResourceKind, ResourceRef, ResourceTree};
use crate::error::{Error, Result};

// External imports (alphabetized)
use once_cell::sync::Lazy;
use regex::Regex;

/// Class name of the root resource
pub const ROOT_CLASS_NAME: &str = "Root";

/// Class name fragment contributed by a path-parameter segment
pub const PATTERN_CLASS_SUFFIX: &str = "Item";

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex is valid"));

/// A segment is a path parameter when it is wrapped in braces as a whole.
pub(crate) fn is_pattern_segment(segment: &str) -> bool {
    segment.len() >= 2 && segment.starts_with('{') && segment.ends_with('}')
}

/// Lower-case `name` and collapse every run of other characters into `_`.
///
/// ```
/// assert_eq!(resgen_core::tree::slugify("{petId}"), "petid");
/// assert_eq!(resgen_core::tree::slugify("pet-inventory"), "pet_inventory");
/// ```
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// Join hyphen-separated pieces of `name`, title-casing each one.
///
/// ```
/// assert_eq!(resgen_core::tree::pascal_case("pet-inventory"), "PetInventory");
/// ```
pub fn pascal_case(name: &str) -> String {
    name.split('-').map(title_case).collect()
}

// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
fn title_case(word: &str) -> String {
    let mut result = String::with_capacity(word.len());
    let mut in_word = false;
    for ch in word.chars() {
        if ch.is_alphabetic() {
            if in_word {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(ch);
            in_word = false;
        }
    }
    result
}

impl<'t> ResourceRef<'t> {
    /// Whether this resource is a templated path parameter such as `{petId}`
    pub fn is_pattern(&self) -> bool {
        self.kind() == ResourceKind::Pattern
    }

    /// Identifier-safe slug of the name; empty for the root
    pub fn safe_name(&self) -> String {
        self.name().map(slugify).unwrap_or_default()
    }

    /// Class name used by generated code.
    ///
    /// The root is `Root`. Any other resource appends its own fragment to its
    /// parent's class name, the root contributing nothing: `Item` for path
    /// parameters, the PascalCase name for literal segments.
    pub fn class_name(&self) -> String {
        if self.is_root() {
            return ROOT_CLASS_NAME.to_string();
        }
        let mut fragments = Vec::new();
        let mut current = Some(*self);
        while let Some(resource) = current.filter(|r| !r.is_root()) {
            fragments.push(resource.class_fragment());
            current = resource.parent();
        }
        fragments.into_iter().rev().collect()
    }

    fn class_fragment(&self) -> String {
        match self.kind() {
            ResourceKind::Root => String::new(),
            ResourceKind::Pattern => PATTERN_CLASS_SUFFIX.to_string(),
            ResourceKind::Literal => self.name().map(pascal_case).unwrap_or_default(),
        }
    }

    /// Whether any child is a path parameter
    pub fn has_pattern_child(&self) -> bool {
        self.children().any(|child| child.is_pattern())
    }

    /// The single path-parameter child of this resource.
    ///
    /// Callers invoke this where the document shape promises such a child;
    /// a resource with none, or with several, is reported as an error.
    pub fn pattern_child(&self) -> Result<ResourceRef<'t>> {
        let mut patterns = self.children().filter(|child| child.is_pattern());
        let first = patterns.next().ok_or_else(|| Error::PatternChildNotFound {
            path: self.path().to_string(),
        })?;
        let rest: Vec<_> = patterns.collect();
        if rest.is_empty() {
            return Ok(first);
        }
        Err(Error::AmbiguousPatternChild {
            path: self.path().to_string(),
            candidates: std::iter::once(first)
                .chain(rest)
                .map(|child| child.path().to_string())
                .collect(),
        })
    }

    /// Depth-first walk over this resource and all of its descendants.
    pub fn all_resources(&self) -> Resources<'t> {
        Resources {
            tree: self.tree(),
            stack: vec![self.id()],
        }
    }
}

/// Pre-order iterator returned by [`ResourceRef::all_resources`]
#[derive(Debug, Clone)]
pub struct Resources<'t> {
    tree: &'t ResourceTree,
    stack: Vec<ResourceId>,
}

impl<'t> Iterator for Resources<'t> {
    type Item = ResourceRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let resource = self.tree.get(id);
        self.stack
            .extend(resource.resource().child_ids().iter().rev().copied());
        Some(resource)
    }
}
