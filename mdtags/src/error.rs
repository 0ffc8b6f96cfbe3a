use std::fmt;

use codespan_reporting::diagnostic::{Diagnostic, Severity};
use thiserror::Error;

use crate::dialect::Dialect;
use crate::node::{ExtensionNode, Kind, Node};

/// A constructor was given parameters its kind cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidConstructionError {
    #[error("header level must be between 1 and 6, got {0}")]
    HeaderLevel(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("unknown dialect `{0}` (expected one of: basic, reddit)")]
    UnknownDialect(String),
}

/// The legality rule a rejected tree violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// A non-repeatable kind appeared beneath another node of the same kind.
    RepeatedNesting,
    /// The dialect does not support this kind at all.
    DialectForbiddenKind(Dialect),
    /// A Code node contained something other than text.
    CodeContainsFormatting,
    /// A Document had an inline node as a direct child.
    NonBlockAtRoot,
    /// A validated render was asked to render something other than a Document.
    NotADocument,
    /// An extension node whose tag is missing from the registry.
    UnregisteredKind,
    /// A rule contributed by an extension or dialect rule.
    Extension { rule: &'static str, message: String },
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::RepeatedNesting => write!(f, "repeated-nesting"),
            Rule::DialectForbiddenKind(_) => write!(f, "dialect-forbidden-kind"),
            Rule::CodeContainsFormatting => write!(f, "code-contains-formatting"),
            Rule::NonBlockAtRoot => write!(f, "non-block-at-root"),
            Rule::NotADocument => write!(f, "not-a-document"),
            Rule::UnregisteredKind => write!(f, "unregistered-kind"),
            Rule::Extension { rule, .. } => write!(f, "{}", rule),
        }
    }
}

/// A tree rejected by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.message())]
pub struct IllegalStructureError {
    pub rule: Rule,
    /// Kind of the offending node.
    pub kind: Kind,
    /// Compact description of the offending node.
    pub node: String,
    /// Kind of the ancestor that caused the conflict, where one did.
    pub ancestor: Option<Kind>,
    pub notes: Vec<String>,
}

impl IllegalStructureError {
    pub fn new(rule: Rule, node: &Node) -> Self {
        IllegalStructureError {
            rule,
            kind: node.kind(),
            node: node.describe(),
            ancestor: None,
            notes: Vec::new(),
        }
    }

    /// A violation reported by an extension hook or dialect rule.
    pub fn extension(rule: &'static str, message: impl Into<String>, node: &Node) -> Self {
        Self::new(
            Rule::Extension {
                rule,
                message: message.into(),
            },
            node,
        )
    }

    /// Like [`IllegalStructureError::extension`], for the node handed to a
    /// [`NodeExtension`](crate::registry::NodeExtension) hook.
    pub fn for_extension_node(
        rule: &'static str,
        message: impl Into<String>,
        node: &ExtensionNode,
    ) -> Self {
        IllegalStructureError {
            rule: Rule::Extension {
                rule,
                message: message.into(),
            },
            kind: node.kind(),
            node: node.describe(),
            ancestor: None,
            notes: Vec::new(),
        }
    }

    pub fn with_ancestor(mut self, ancestor: Kind) -> Self {
        self.ancestor = Some(ancestor);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn message(&self) -> String {
        match &self.rule {
            Rule::RepeatedNesting => match self.ancestor {
                Some(ancestor) => format!(
                    "illegal nested {} inside {}: {}",
                    self.kind, ancestor, self.node
                ),
                None => format!("illegal nested {}: {}", self.kind, self.node),
            },
            Rule::DialectForbiddenKind(dialect) => format!(
                "{} markdown does not allow {} elements: {}",
                dialect, self.kind, self.node
            ),
            Rule::CodeContainsFormatting => format!(
                "formatting not allowed in code, just text: {}",
                self.node
            ),
            Rule::NonBlockAtRoot => format!(
                "only block elements are allowed at top level, not allowed: {}",
                self.node
            ),
            Rule::NotADocument => format!(
                "only a Document can be rendered with validation, got: {}",
                self.node
            ),
            Rule::UnregisteredKind => format!(
                "no extension registered for kind `{}`: {}",
                self.kind, self.node
            ),
            Rule::Extension { message, .. } => format!("{}: {}", message, self.node),
        }
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic<FileId>(&self) -> Diagnostic<FileId> {
        Diagnostic::new(Severity::Error)
            .with_message(self.message())
            .with_code(self.rule.to_string())
            .with_notes(self.notes.clone())
    }
}

/// Any failure the library can report.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidConstruction(#[from] InvalidConstructionError),
    #[error(transparent)]
    IllegalStructure(#[from] IllegalStructureError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl Error {
    pub fn to_diagnostic<FileId>(&self) -> Diagnostic<FileId> {
        match self {
            Error::IllegalStructure(err) => err.to_diagnostic(),
            other => Diagnostic::new(Severity::Error).with_message(other.to_string()),
        }
    }
}
