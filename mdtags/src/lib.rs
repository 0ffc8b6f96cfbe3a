//! Build markdown documents as trees of typed nodes and render them for a
//! target dialect.
//!
//! Rendering validates the tree first: nesting a non-repeatable kind inside
//! itself, inline content at the top level, formatting inside code and
//! kinds the dialect forbids are all rejected with an
//! [`IllegalStructureError`]. Set [`RenderOptions::recover`] to skip
//! validation and render whatever the tree holds.

pub mod dialect;
pub mod error;
pub mod escape;
pub mod node;
pub mod registry;
pub mod render;
pub mod validate;

pub use dialect::Dialect;
pub use error::{ConfigurationError, Error, IllegalStructureError, InvalidConstructionError, Rule};
pub use escape::escape;
pub use node::{HeaderLevel, Kind, Node};
pub use registry::{DialectRule, NodeExtension, Registry};
pub use render::{Context, RenderOptions, Renderer};
pub use validate::Validator;

/// Library version, supplied by the build.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything needed to build and render a document.
pub mod prelude {
    pub use crate::node::build::*;
    pub use crate::nodes;
    pub use crate::{Dialect, Kind, Node, RenderOptions, escape, render, validate};
}

/// Render `document` with no extensions registered.
pub fn render(document: &Node, options: RenderOptions) -> Result<String, IllegalStructureError> {
    let registry = Registry::new();
    Renderer::new(&registry).render(document, options)
}

/// Validate `node` with no extensions registered.
pub fn validate(node: &Node, dialect: Dialect) -> Result<(), IllegalStructureError> {
    let registry = Registry::new();
    Validator::new(&registry).validate(node, dialect)
}
