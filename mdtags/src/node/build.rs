//! Constructors for every built-in kind.
//!
//! Children are accepted as anything convertible into a [`Node`]; plain
//! values (strings, numbers, booleans, chars) become `Text` leaves holding
//! their string form. Use [`nodes!`](crate::nodes) to mix plain values and
//! nodes in one child list.

use crate::error::InvalidConstructionError;
use crate::escape::escape;
use crate::node::{HeaderLevel, Node};

/// Build a `Vec<Node>` from a mixed list of nodes and plain values.
///
/// ```
/// use mdtags::prelude::*;
///
/// let doc = document([paragraph(nodes!["5 squared is ", 25, bold(["!"])])]);
/// assert_eq!(render(&doc, RenderOptions::default()).unwrap(), "5 squared is 25**!**");
/// ```
#[macro_export]
macro_rules! nodes {
    ($($child:expr),* $(,)?) => {
        ::std::vec![$($crate::node::Node::from($child)),*]
    };
}

fn wrap<I, N>(children: I) -> Vec<Node>
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    children.into_iter().map(Into::into).collect()
}

pub fn document<I, N>(blocks: I) -> Node
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::Document(wrap(blocks))
}

/// Fails when `level` is outside `1..=6`.
pub fn header<I, N>(level: u8, children: I) -> Result<Node, InvalidConstructionError>
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Ok(Node::Header {
        level: HeaderLevel::try_from(level)?,
        children: wrap(children),
    })
}

pub fn paragraph<I, N>(children: I) -> Node
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::Paragraph(wrap(children))
}

pub fn unordered_list<I, N>(items: I) -> Node
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::UnorderedList {
        title: None,
        items: wrap(items),
    }
}

pub fn unordered_list_with_title<T, I, N>(title: T, items: I) -> Node
where
    T: Into<Node>,
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::UnorderedList {
        title: Some(Box::new(title.into())),
        items: wrap(items),
    }
}

pub fn ordered_list<I, N>(items: I) -> Node
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::OrderedList {
        title: None,
        items: wrap(items),
    }
}

pub fn ordered_list_with_title<T, I, N>(title: T, items: I) -> Node
where
    T: Into<Node>,
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::OrderedList {
        title: Some(Box::new(title.into())),
        items: wrap(items),
    }
}

pub fn block_quote<I, N>(children: I) -> Node
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::BlockQuote(wrap(children))
}

pub fn code<I, N>(lines: I) -> Node
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::Code(wrap(lines))
}

pub fn horizontal_rule() -> Node {
    Node::HorizontalRule
}

pub fn bold<I, N>(children: I) -> Node
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::Bold(wrap(children))
}

pub fn italic<I, N>(children: I) -> Node
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::Italic(wrap(children))
}

pub fn strikethrough<I, N>(children: I) -> Node
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::Strikethrough(wrap(children))
}

pub fn superscript<I, N>(children: I) -> Node
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::Superscript(wrap(children))
}

pub fn link<I, N>(url: impl Into<String>, text: I) -> Node
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::Link {
        url: url.into(),
        title: None,
        text: wrap(text),
    }
}

pub fn link_with_title<I, N>(url: impl Into<String>, text: I, title: impl Into<String>) -> Node
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::Link {
        url: url.into(),
        title: non_empty(title.into()),
        text: wrap(text),
    }
}

pub fn image<I, N>(url: impl Into<String>, alt: I) -> Node
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::Image {
        url: url.into(),
        title: None,
        alt: wrap(alt),
    }
}

pub fn image_with_title<I, N>(url: impl Into<String>, alt: I, title: impl Into<String>) -> Node
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::Image {
        url: url.into(),
        title: non_empty(title.into()),
        alt: wrap(alt),
    }
}

pub fn text(value: impl ToString) -> Node {
    Node::Text(value.to_string())
}

/// A text leaf whose markdown metacharacters have been backslash-escaped.
pub fn escaped(value: &str) -> Node {
    Node::Text(escape(value))
}

// An empty title renders the same as no title at all.
fn non_empty(title: String) -> Option<String> {
    if title.is_empty() { None } else { Some(title) }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}

impl From<&String> for Node {
    fn from(value: &String) -> Self {
        Node::Text(value.clone())
    }
}

macro_rules! wrap_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::Text(value.to_string())
                }
            }
        )*
    };
}

wrap_display!(char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
