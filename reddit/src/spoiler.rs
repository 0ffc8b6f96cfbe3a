use mdtags::node::ExtensionNode;
use mdtags::{Context, Dialect, IllegalStructureError, Node, NodeExtension, Renderer};

pub const SPOILER_TAG: &str = "spoiler";
const HIDDEN_ATTRIBUTE: &str = "text";

/// Build a spoiler showing `visible` and hiding `hidden` until hovered.
pub fn spoiler<I, N>(visible: I, hidden: &str) -> Node
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::extension(SPOILER_TAG, visible, [(HIDDEN_ATTRIBUTE, hidden)])
}

/// Inline spoiler text, written as a link to `#s` whose title holds the
/// hidden part.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpoilerExtension;

impl NodeExtension for SpoilerExtension {
    fn tag(&self) -> &'static str {
        SPOILER_TAG
    }

    fn validate(&self, node: &ExtensionNode, ctx: &Context) -> Result<(), IllegalStructureError> {
        if ctx.dialect() != Dialect::Reddit {
            return Err(IllegalStructureError::for_extension_node(
                "spoiler-dialect",
                format!("spoilers are reddit-only, not available in {} markdown", ctx.dialect()),
                node,
            ));
        }
        if node.attribute(HIDDEN_ATTRIBUTE).is_some_and(|hidden| hidden.contains('"')) {
            return Err(IllegalStructureError::for_extension_node(
                "spoiler-quote",
                "hidden spoiler text cannot contain a double quote",
                node,
            ));
        }
        Ok(())
    }

    fn render(&self, node: &ExtensionNode, ctx: &Context, renderer: &Renderer<'_>) -> String {
        format!(
            "[{}](#s \"{}\")",
            renderer.render_children(node.children(), ctx, ""),
            node.attribute(HIDDEN_ATTRIBUTE).unwrap_or_default()
        )
    }
}
