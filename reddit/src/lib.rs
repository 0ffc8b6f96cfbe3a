//! Reddit flavored additions to `mdtags`: the spoiler extension kind, the
//! superscript restrictions reddit's renderer imposes, and a few strings
//! that turn up in reddit comments.

mod spoiler;
mod superscript;

pub use spoiler::{SPOILER_TAG, SpoilerExtension, spoiler};
pub use superscript::SuperscriptRule;

use mdtags::prelude::*;
use mdtags::{IllegalStructureError, Registry, Renderer};

pub const LOOK_OF_DISAPPROVAL: &str = "ಠ_ಠ";
pub const SMILEY_FACE: &str = "ಠ◡ಠ";
pub const REDDIQUETTE_URL: &str = "http://www.reddit.com/wiki/reddiquette";

/// A link to reddit's etiquette guide.
pub fn reddiquette_link() -> Node {
    link(REDDIQUETTE_URL, ["reddiquette"])
}

/// A registry with every reddit extension kind and rule installed.
pub fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register_node(SpoilerExtension)
        .register_rule(Dialect::Reddit, SuperscriptRule);
    registry
}

/// Render `document` with the reddit extensions available.
pub fn render(document: &Node, options: RenderOptions) -> Result<String, IllegalStructureError> {
    let registry = registry();
    Renderer::new(&registry).render(document, options)
}
