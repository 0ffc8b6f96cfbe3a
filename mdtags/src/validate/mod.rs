mod ban_set;

pub use ban_set::{Ban, BanSet};

use std::borrow::Cow;

use log::trace;

use crate::dialect::Dialect;
use crate::error::{IllegalStructureError, Rule};
use crate::node::{Kind, Node};
use crate::registry::Registry;
use crate::render::Context;

/// Checks trees against the nesting and dialect rules.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'r> {
    registry: &'r Registry,
}

impl<'r> Validator<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Validator { registry }
    }

    /// Accept or reject `node` under `dialect`. Stops at the first violation.
    pub fn validate(&self, node: &Node, dialect: Dialect) -> Result<(), IllegalStructureError> {
        self.check(node, &BanSet::empty(), &Context::new(dialect))
    }

    /// Validate `node` given the bans already open above it.
    pub fn check<'a>(
        &self,
        node: &'a Node,
        bans: &BanSet<'a>,
        ctx: &Context,
    ) -> Result<(), IllegalStructureError> {
        let kind = node.kind();
        trace!("validating {} at depth {} ({} bans open)", kind, ctx.depth(), bans.len());

        if ctx.dialect().forbids(kind) {
            return Err(IllegalStructureError::new(
                Rule::DialectForbiddenKind(ctx.dialect()),
                node,
            ));
        }

        for rule in self.registry.rules_for(ctx.dialect()) {
            rule.check(node, ctx, self.registry)?;
        }

        let extension = match node {
            Node::Extension(ext) => match self.registry.extension(ext.tag()) {
                Some(extension) => Some((ext, extension)),
                None => return Err(IllegalStructureError::new(Rule::UnregisteredKind, node)),
            },
            _ => None,
        };

        let child_bans: Cow<'_, BanSet<'a>> = if self.registry.is_repeatable(kind) {
            Cow::Borrowed(bans)
        } else {
            if let Some(ban) = bans.get(kind) {
                return Err(IllegalStructureError::new(Rule::RepeatedNesting, node)
                    .with_ancestor(ban.opened_by.kind())
                    .with_note(format!(
                        "enclosing {} opened at depth {}: {}",
                        ban.opened_by.kind(),
                        ban.depth,
                        ban.opened_by.describe()
                    )));
            }
            if node.child_nodes().next().is_none() {
                // Leaves have no descendants to ban.
                Cow::Borrowed(bans)
            } else {
                Cow::Owned(bans.with(
                    kind,
                    Ban {
                        opened_by: node,
                        depth: ctx.depth(),
                    },
                ))
            }
        };

        match node {
            Node::Document(blocks) => {
                if let Some(inline) = blocks.iter().find(|b| !self.registry.is_block(b.kind())) {
                    return Err(IllegalStructureError::new(Rule::NonBlockAtRoot, inline)
                        .with_ancestor(Kind::Document));
                }
            }
            Node::Code(lines) => {
                if let Some(formatted) = lines.iter().find(|line| !line.is_text()) {
                    return Err(
                        IllegalStructureError::new(Rule::CodeContainsFormatting, formatted)
                            .with_ancestor(Kind::Code)
                            .with_note(format!("inside {}", node.describe())),
                    );
                }
            }
            _ => {}
        }

        if let Some((ext, extension)) = extension {
            extension.validate(ext, ctx)?;
        }

        // A quote starts a fresh nesting context for everything inside it.
        let child_bans = if kind == Kind::BlockQuote {
            Cow::Owned(BanSet::empty())
        } else {
            child_bans
        };

        let child_ctx = ctx.descend();
        for child in node.child_nodes() {
            self.check(child, &child_bans, &child_ctx)?;
        }
        Ok(())
    }
}
