//! TOML description of a document tree.
//!
//! ```toml
//! dialect = "reddit"
//!
//! [[blocks]]
//! kind = "header"
//! level = 1
//! children = ["Title"]
//!
//! [[blocks]]
//! kind = "paragraph"
//! children = ["Plain ", { kind = "bold", children = ["loud"] }, 42]
//! ```

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};
use serde::Deserialize;
use thiserror::Error;

use mdtags::prelude::*;
use mdtags::{Error as LibraryError, InvalidConstructionError};

#[derive(Debug, Deserialize)]
pub struct DocumentFile {
    #[serde(default)]
    pub dialect: Option<String>,
    #[serde(default)]
    pub recover: Option<bool>,
    #[serde(default)]
    pub blocks: Vec<Child>,
}

/// A child entry: plain values become text leaves.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Child {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Node(NodeTable),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeTable {
    Header {
        level: u8,
        #[serde(default)]
        children: Vec<Child>,
    },
    Paragraph {
        #[serde(default)]
        children: Vec<Child>,
    },
    UnorderedList {
        #[serde(default)]
        title: Option<Box<Child>>,
        #[serde(default)]
        items: Vec<Child>,
    },
    OrderedList {
        #[serde(default)]
        title: Option<Box<Child>>,
        #[serde(default)]
        items: Vec<Child>,
    },
    BlockQuote {
        #[serde(default)]
        children: Vec<Child>,
    },
    Code {
        #[serde(default)]
        children: Vec<Child>,
    },
    HorizontalRule,
    Bold {
        #[serde(default)]
        children: Vec<Child>,
    },
    Italic {
        #[serde(default)]
        children: Vec<Child>,
    },
    Strikethrough {
        #[serde(default)]
        children: Vec<Child>,
    },
    Superscript {
        #[serde(default)]
        children: Vec<Child>,
    },
    Link {
        url: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        children: Vec<Child>,
    },
    Image {
        url: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        children: Vec<Child>,
    },
    /// Text with metacharacters optionally escaped.
    Text {
        text: String,
        #[serde(default)]
        escape: bool,
    },
    Spoiler {
        hidden: String,
        #[serde(default)]
        children: Vec<Child>,
    },
}

impl Child {
    pub fn build(self) -> Result<Node, InvalidConstructionError> {
        Ok(match self {
            Child::Text(s) => Node::from(s),
            Child::Integer(n) => Node::from(n),
            Child::Float(f) => Node::from(f),
            Child::Boolean(b) => Node::from(b),
            Child::Node(table) => table.build()?,
        })
    }
}

fn build_all(children: Vec<Child>) -> Result<Vec<Node>, InvalidConstructionError> {
    children.into_iter().map(Child::build).collect()
}

impl NodeTable {
    pub fn build(self) -> Result<Node, InvalidConstructionError> {
        Ok(match self {
            NodeTable::Header { level, children } => header(level, build_all(children)?)?,
            NodeTable::Paragraph { children } => paragraph(build_all(children)?),
            NodeTable::UnorderedList { title, items } => match title {
                Some(title) => unordered_list_with_title((*title).build()?, build_all(items)?),
                None => unordered_list(build_all(items)?),
            },
            NodeTable::OrderedList { title, items } => match title {
                Some(title) => ordered_list_with_title((*title).build()?, build_all(items)?),
                None => ordered_list(build_all(items)?),
            },
            NodeTable::BlockQuote { children } => block_quote(build_all(children)?),
            NodeTable::Code { children } => code(build_all(children)?),
            NodeTable::HorizontalRule => horizontal_rule(),
            NodeTable::Bold { children } => bold(build_all(children)?),
            NodeTable::Italic { children } => italic(build_all(children)?),
            NodeTable::Strikethrough { children } => strikethrough(build_all(children)?),
            NodeTable::Superscript { children } => superscript(build_all(children)?),
            NodeTable::Link {
                url,
                title,
                children,
            } => match title {
                Some(title) => link_with_title(url, build_all(children)?, title),
                None => link(url, build_all(children)?),
            },
            NodeTable::Image {
                url,
                title,
                children,
            } => match title {
                Some(title) => image_with_title(url, build_all(children)?, title),
                None => image(url, build_all(children)?),
            },
            NodeTable::Text { text, escape } => {
                if escape {
                    escaped(&text)
                } else {
                    Node::from(text)
                }
            }
            NodeTable::Spoiler { hidden, children } => {
                mdtags_reddit::spoiler(build_all(children)?, &hidden)
            }
        })
    }
}

/// Settings given on the command line; they win over the file's keys.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dialect: Option<String>,
    pub recover: bool,
}

#[derive(Debug)]
pub struct Loaded {
    pub document: Node,
    pub options: RenderOptions,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{}", .0.message())]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Library(#[from] LibraryError),
}

impl LoadError {
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        match self {
            LoadError::Toml(err) => {
                let diagnostic = Diagnostic::new(Severity::Error).with_message("invalid document");
                match err.span() {
                    Some(span) => diagnostic
                        .with_labels(vec![Label::primary(file_id, span).with_message(err.message())]),
                    None => diagnostic.with_notes(vec![err.message().to_string()]),
                }
            }
            LoadError::Library(err) => err.to_diagnostic(),
        }
    }
}

/// Parse `source` and build its tree, resolving options as
/// command line > file > default.
pub fn load(source: &str, overrides: &Overrides) -> Result<Loaded, LoadError> {
    let file: DocumentFile = toml::from_str(source)?;

    let dialect = match overrides.dialect.as_deref().or(file.dialect.as_deref()) {
        Some(name) => name.parse::<Dialect>().map_err(LibraryError::from)?,
        None => Dialect::default(),
    };
    let recover = overrides.recover || file.recover.unwrap_or(false);

    let blocks = build_all(file.blocks).map_err(LibraryError::from)?;
    log::debug!("loaded {} top-level blocks", blocks.len());

    Ok(Loaded {
        document: document(blocks),
        options: RenderOptions { dialect, recover },
    })
}
