use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::dialect::Dialect;
use crate::error::IllegalStructureError;
use crate::node::{ExtensionNode, Kind, Node};
use crate::render::{Context, Renderer};

/// Behavior for a node kind that is not built into the core.
///
/// Extension nodes take part in the same ban-set checks as built-in kinds:
/// unless `is_repeatable` says otherwise, an extension node may not appear
/// beneath another node carrying the same tag.
pub trait NodeExtension: Send + Sync {
    /// The tag extension nodes are created with.
    fn tag(&self) -> &'static str;

    /// Whether the kind may appear directly under a Document.
    fn is_block(&self) -> bool {
        false
    }

    fn is_repeatable(&self) -> bool {
        false
    }

    /// Extra legality checks, run after the generic ones.
    fn validate(&self, _node: &ExtensionNode, _ctx: &Context) -> Result<(), IllegalStructureError> {
        Ok(())
    }

    fn render(&self, node: &ExtensionNode, ctx: &Context, renderer: &Renderer<'_>) -> String;
}

/// A dialect-scoped check run at every node the validator visits.
///
/// `registry` is the one validating the tree, so rules can classify
/// extension kinds the same way the validator does.
pub trait DialectRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(
        &self,
        node: &Node,
        ctx: &Context,
        registry: &Registry,
    ) -> Result<(), IllegalStructureError>;
}

/// Table of extension kinds and dialect rules consulted by the validator
/// and the renderer.
#[derive(Default)]
pub struct Registry {
    extensions: HashMap<&'static str, Box<dyn NodeExtension>>,
    rules: Vec<(Dialect, Box<dyn DialectRule>)>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Register an extension kind. A later registration under the same tag
    /// replaces the earlier one.
    pub fn register_node(&mut self, extension: impl NodeExtension + 'static) -> &mut Self {
        let tag = extension.tag();
        if self.extensions.insert(tag, Box::new(extension)).is_some() {
            debug!("replaced extension registered under `{}`", tag);
        }
        self
    }

    pub fn register_rule(
        &mut self,
        dialect: Dialect,
        rule: impl DialectRule + 'static,
    ) -> &mut Self {
        self.rules.push((dialect, Box::new(rule)));
        self
    }

    pub fn extension(&self, tag: &str) -> Option<&dyn NodeExtension> {
        self.extensions.get(tag).map(|ext| ext.as_ref())
    }

    pub fn rules_for(&self, dialect: Dialect) -> impl Iterator<Item = &dyn DialectRule> {
        self.rules
            .iter()
            .filter(move |(d, _)| *d == dialect)
            .map(|(_, rule)| rule.as_ref())
    }

    pub fn is_block(&self, kind: Kind) -> bool {
        match kind {
            Kind::Extension(tag) => self.extension(tag).is_some_and(|ext| ext.is_block()),
            builtin => builtin.is_block(),
        }
    }

    pub fn is_repeatable(&self, kind: Kind) -> bool {
        match kind {
            Kind::Extension(tag) => self.extension(tag).is_some_and(|ext| ext.is_repeatable()),
            builtin => builtin.is_repeatable(),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.extensions.keys().copied().collect();
        tags.sort_unstable();
        let rules: Vec<String> = self
            .rules
            .iter()
            .map(|(dialect, rule)| format!("{}:{}", dialect, rule.name()))
            .collect();
        f.debug_struct("Registry")
            .field("extensions", &tags)
            .field("rules", &rules)
            .finish()
    }
}
