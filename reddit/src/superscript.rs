use mdtags::{Context, DialectRule, IllegalStructureError, Node, Registry};

/// Reddit's `^(...)` superscript ends at the first line break, so its
/// content must stay inline and on one line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuperscriptRule;

impl DialectRule for SuperscriptRule {
    fn name(&self) -> &'static str {
        "reddit-superscript"
    }

    fn check(
        &self,
        node: &Node,
        _ctx: &Context,
        registry: &Registry,
    ) -> Result<(), IllegalStructureError> {
        let Node::Superscript(children) = node else {
            return Ok(());
        };
        if let Some(block) = children.iter().find(|child| registry.is_block(child.kind())) {
            return Err(IllegalStructureError::extension(
                "superscript-block",
                "block elements are not allowed in superscript",
                node,
            )
            .with_note(format!("found {}", block.describe())));
        }
        if contains_newline(node) {
            return Err(IllegalStructureError::extension(
                "superscript-newline",
                "line breaks are not allowed in superscript",
                node,
            ));
        }
        Ok(())
    }
}

fn contains_newline(node: &Node) -> bool {
    match node {
        Node::Text(text) => text.contains('\n'),
        other => other.child_nodes().any(contains_newline),
    }
}
