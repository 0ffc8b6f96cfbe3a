mod context;

pub use context::{Context, RenderOptions};

use log::debug;

use crate::dialect::Dialect;
use crate::error::{IllegalStructureError, Rule};
use crate::node::{Kind, Node};
use crate::registry::Registry;
use crate::validate::Validator;

const HORIZONTAL_RULE: &str = "---------------------------";
const CODE_INDENT: &str = "    ";
const QUOTE_PREFIX: &str = "> ";
const UNORDERED_MARKER: &str = "+ ";

/// Converts node trees into markdown text.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'r> {
    registry: &'r Registry,
}

impl<'r> Renderer<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Renderer { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Validate `document` (unless `options.recover` is set) and render it.
    ///
    /// A failed validation produces no output at all.
    pub fn render(
        &self,
        document: &Node,
        options: RenderOptions,
    ) -> Result<String, IllegalStructureError> {
        debug!(
            "rendering {} as {} markdown (recover: {})",
            document.kind(),
            options.dialect,
            options.recover
        );
        if !options.recover {
            if document.kind() != Kind::Document {
                return Err(IllegalStructureError::new(Rule::NotADocument, document));
            }
            Validator::new(self.registry)
                .validate(document, options.dialect)
                .inspect_err(|err| debug!("rejected tree: {}", err))?;
        }
        Ok(self.render_node(document, &Context::from(options)))
    }

    /// Render a subtree without validating it.
    pub fn render_node(&self, node: &Node, ctx: &Context) -> String {
        match node {
            Node::Document(blocks) => self.render_children(blocks, ctx, "\n\n"),
            Node::Header { level, children } => format!(
                "{}{}",
                "#".repeat(level.get() as usize),
                self.render_children(children, ctx, "")
            ),
            // Top-level paragraphs are kept apart by the Document joiner;
            // nested ones flow into their container's text.
            Node::Paragraph(children) => self.render_children(children, ctx, ""),
            Node::UnorderedList { title, items } => {
                self.render_list(title.as_deref(), items, |_| UNORDERED_MARKER.to_string(), ctx)
            }
            Node::OrderedList { title, items } => {
                self.render_list(title.as_deref(), items, |n| format!("{}. ", n), ctx)
            }
            Node::BlockQuote(children) => {
                prefix_every_line(QUOTE_PREFIX, &self.render_children(children, ctx, ""))
            }
            Node::Code(lines) => {
                prefix_every_line(CODE_INDENT, &self.render_children(lines, ctx, ""))
            }
            Node::HorizontalRule => HORIZONTAL_RULE.to_string(),
            Node::Bold(children) => format!("**{}**", self.render_children(children, ctx, "")),
            Node::Italic(children) => format!("*{}*", self.render_children(children, ctx, "")),
            Node::Strikethrough(children) => {
                format!("~~{}~~", self.render_children(children, ctx, ""))
            }
            Node::Superscript(children) => {
                let inner = self.render_children(children, ctx, "");
                match ctx.dialect() {
                    Dialect::Basic => format!("^{}", inner),
                    Dialect::Reddit => format!("^({})", inner),
                }
            }
            Node::Link { url, title, text } => {
                format!(
                    "[{}]{}",
                    self.render_children(text, ctx, ""),
                    destination(url, title.as_deref())
                )
            }
            Node::Image { url, title, alt } => {
                format!(
                    "![{}]{}",
                    self.render_children(alt, ctx, ""),
                    destination(url, title.as_deref())
                )
            }
            Node::Text(text) => text.clone(),
            Node::Extension(ext) => match self.registry.extension(ext.tag()) {
                Some(extension) => extension.render(ext, ctx, self),
                // Only reachable in recover mode: validation rejects unknown tags.
                None => self.render_children(ext.children(), ctx, ""),
            },
        }
    }

    /// Render `children` one level below `ctx` and join them with `separator`.
    pub fn render_children(&self, children: &[Node], ctx: &Context, separator: &str) -> String {
        let child_ctx = ctx.descend();
        children
            .iter()
            .map(|child| self.render_node(child, &child_ctx))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn render_list(
        &self,
        title: Option<&Node>,
        items: &[Node],
        marker: impl Fn(usize) -> String,
        ctx: &Context,
    ) -> String {
        let child_ctx = ctx.descend();
        let mut out = String::new();

        if let Some(title) = title {
            out.push_str(&self.render_node(title, &child_ctx));
            out.push_str("\n\n");
        }

        for (index, item) in items.iter().enumerate() {
            let marker = marker(index + 1);
            let mut body = self.render_node(item, &child_ctx);
            // An untitled sub-list starts on the line after its marker.
            if item.is_untitled_list() {
                body.insert(0, '\n');
            }
            let continuation = " ".repeat(marker.len());
            out.push_str(&prefix_lines(
                &marker,
                &continuation,
                body.trim_end_matches('\n'),
            ));
            out.push_str("\n\n");
        }

        out
    }
}

fn destination(url: &str, title: Option<&str>) -> String {
    match title {
        Some(title) => format!("({} \"{}\")", url, title),
        None => format!("({})", url),
    }
}

/// Prefix the first line of `text` with `first` and every later line with `rest`.
pub(crate) fn prefix_lines(first: &str, rest: &str, text: &str) -> String {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 { first } else { rest };
            format!("{}{}", prefix, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn prefix_every_line(prefix: &str, text: &str) -> String {
    prefix_lines(prefix, prefix, text)
}
