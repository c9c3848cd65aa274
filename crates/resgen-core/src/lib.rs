//! resgen core library
//!
//! Turns the path map of an OpenAPI document into a tree of resources with
//! deterministic generated-code names, then renders that tree through a Tera
//! template set into a client package.
//!
//! ```
//! use resgen_core::openapi::OpenApiContext;
//!
//! let spec = OpenApiContext::parse_content(r#"
//! openapi: 3.0.0
//! info: { title: Petstore, version: 1.0.0 }
//! paths:
//!   /pets/{petId}:
//!     get: { responses: {} }
//! "#).unwrap();
//!
//! let tree = spec.resource_tree();
//! let pets = tree.find("/pets").unwrap();
//! assert_eq!(pets.pattern_child().unwrap().class_name(), "PetsItem");
//! ```

pub mod builders;
pub mod config;
pub mod error;
pub mod generate;
pub mod manifest;
pub mod openapi;
pub mod templates;
pub mod tree;

pub use crate::{
    config::Config,
    error::{Error, Result},
    generate::generate,
    openapi::{OpenApiContext, SpecSource},
    templates::{TemplateDir, TemplateKind, TemplateManager},
    tree::{ResourceKind, ResourceRef, ResourceTree, TreeBuilder, Verb},
};
