pub mod build;

use std::collections::BTreeMap;
use std::fmt::{self, Write};

use crate::error::InvalidConstructionError;

/// The variant identity of a node.
///
/// Kinds are what the validator bans and what the renderer dispatches on.
/// Extension kinds carry the tag they were registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Document,
    Header,
    Paragraph,
    UnorderedList,
    OrderedList,
    BlockQuote,
    Code,
    HorizontalRule,
    Bold,
    Italic,
    Strikethrough,
    Superscript,
    Link,
    Image,
    Text,
    Extension(&'static str),
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Document => "Document",
            Kind::Header => "Header",
            Kind::Paragraph => "Paragraph",
            Kind::UnorderedList => "UnorderedList",
            Kind::OrderedList => "OrderedList",
            Kind::BlockQuote => "BlockQuote",
            Kind::Code => "Code",
            Kind::HorizontalRule => "HorizontalRule",
            Kind::Bold => "Bold",
            Kind::Italic => "Italic",
            Kind::Strikethrough => "Strikethrough",
            Kind::Superscript => "Superscript",
            Kind::Link => "Link",
            Kind::Image => "Image",
            Kind::Text => "Text",
            Kind::Extension(tag) => *tag,
        }
    }

    /// Whether a built-in kind may sit directly under a Document.
    /// Extension kinds report `false` here; ask the registry instead.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Kind::Header
                | Kind::Paragraph
                | Kind::UnorderedList
                | Kind::OrderedList
                | Kind::BlockQuote
                | Kind::Code
                | Kind::HorizontalRule
        )
    }

    /// Whether a built-in kind may nest inside another instance of itself.
    pub fn is_repeatable(&self) -> bool {
        matches!(
            self,
            Kind::UnorderedList | Kind::OrderedList | Kind::BlockQuote
        )
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Kind::UnorderedList | Kind::OrderedList)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A header level in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeaderLevel(u8);

impl HeaderLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for HeaderLevel {
    type Error = InvalidConstructionError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(HeaderLevel(level))
        } else {
            Err(InvalidConstructionError::HeaderLevel(level))
        }
    }
}

/// A node whose behavior is supplied by a registered extension.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionNode {
    tag: &'static str,
    children: Vec<Node>,
    attributes: BTreeMap<String, String>,
}

impl ExtensionNode {
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn kind(&self) -> Kind {
        Kind::Extension(self.tag)
    }

    pub fn describe(&self) -> String {
        let mut fields: Vec<String> = self
            .attributes
            .iter()
            .map(|(name, value)| format!("{}={:?}", name, value))
            .collect();
        fields.extend(self.children.iter().map(Node::describe));
        format!("{}({})", self.tag, fields.join(", "))
    }
}

/// A single node of a markdown document tree.
///
/// Trees are built bottom-up through the constructors in [`build`] and are
/// only ever read afterwards: validation and rendering borrow them.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Root container. Direct children must be block-level.
    Document(Vec<Node>),
    Header {
        level: HeaderLevel,
        children: Vec<Node>,
    },
    Paragraph(Vec<Node>),
    UnorderedList {
        title: Option<Box<Node>>,
        items: Vec<Node>,
    },
    OrderedList {
        title: Option<Box<Node>>,
        items: Vec<Node>,
    },
    BlockQuote(Vec<Node>),
    /// Text-only content rendered as an indented code block.
    Code(Vec<Node>),
    HorizontalRule,
    Bold(Vec<Node>),
    Italic(Vec<Node>),
    Strikethrough(Vec<Node>),
    Superscript(Vec<Node>),
    Link {
        url: String,
        title: Option<String>,
        text: Vec<Node>,
    },
    Image {
        url: String,
        title: Option<String>,
        alt: Vec<Node>,
    },
    Text(String),
    Extension(ExtensionNode),
}

impl Node {
    /// Build a node for a registered extension kind.
    pub fn extension<I, N, A, K, V>(tag: &'static str, children: I, attributes: A) -> Node
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
        A: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Node::Extension(ExtensionNode {
            tag,
            children: children.into_iter().map(Into::into).collect(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        })
    }

    pub fn kind(&self) -> Kind {
        match self {
            Node::Document(_) => Kind::Document,
            Node::Header { .. } => Kind::Header,
            Node::Paragraph(_) => Kind::Paragraph,
            Node::UnorderedList { .. } => Kind::UnorderedList,
            Node::OrderedList { .. } => Kind::OrderedList,
            Node::BlockQuote(_) => Kind::BlockQuote,
            Node::Code(_) => Kind::Code,
            Node::HorizontalRule => Kind::HorizontalRule,
            Node::Bold(_) => Kind::Bold,
            Node::Italic(_) => Kind::Italic,
            Node::Strikethrough(_) => Kind::Strikethrough,
            Node::Superscript(_) => Kind::Superscript,
            Node::Link { .. } => Kind::Link,
            Node::Image { .. } => Kind::Image,
            Node::Text(_) => Kind::Text,
            Node::Extension(ext) => ext.kind(),
        }
    }

    /// Direct children. For lists these are the items; the title is
    /// reported separately by [`Node::title`].
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document(children)
            | Node::Paragraph(children)
            | Node::BlockQuote(children)
            | Node::Code(children)
            | Node::Bold(children)
            | Node::Italic(children)
            | Node::Strikethrough(children)
            | Node::Superscript(children)
            | Node::Header { children, .. } => children,
            Node::UnorderedList { items, .. } | Node::OrderedList { items, .. } => items,
            Node::Link { text, .. } => text,
            Node::Image { alt, .. } => alt,
            Node::Extension(ext) => &ext.children,
            Node::HorizontalRule | Node::Text(_) => &[],
        }
    }

    /// The title line of a list, if it has one.
    pub fn title(&self) -> Option<&Node> {
        match self {
            Node::UnorderedList { title, .. } | Node::OrderedList { title, .. } => {
                title.as_deref()
            }
            _ => None,
        }
    }

    /// Title (if any) followed by children, in render order.
    pub fn child_nodes(&self) -> impl Iterator<Item = &Node> {
        self.title().into_iter().chain(self.children())
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub(crate) fn is_untitled_list(&self) -> bool {
        self.kind().is_list() && self.title().is_none()
    }

    /// A compact, single-line representation used in error reports,
    /// e.g. `Bold(Italic("x"))`.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        self.write_description(&mut out);
        out
    }

    fn write_description(&self, out: &mut String) {
        let mut fields: Vec<String> = Vec::new();
        match self {
            Node::Text(text) => {
                let _ = write!(out, "{:?}", text);
                return;
            }
            Node::HorizontalRule => {
                out.push_str("HorizontalRule");
                return;
            }
            Node::Header { level, .. } => fields.push(level.get().to_string()),
            Node::Link { url, title, .. } | Node::Image { url, title, .. } => {
                fields.push(format!("{:?}", url));
                if let Some(title) = title {
                    fields.push(format!("title={:?}", title));
                }
            }
            Node::UnorderedList { title: Some(title), .. }
            | Node::OrderedList { title: Some(title), .. } => {
                fields.push(format!("title={}", title.describe()));
            }
            Node::Extension(ext) => {
                out.push_str(&ext.describe());
                return;
            }
            _ => {}
        }
        fields.extend(self.children().iter().map(Node::describe));

        out.push_str(self.kind().name());
        out.push('(');
        out.push_str(&fields.join(", "));
        out.push(')');
    }
}
