use pretty_assertions::assert_eq;
use pulldown_cmark::{Options, Parser, html};

use mdtags::prelude::*;
use mdtags::node::ExtensionNode;
use mdtags::{Context, IllegalStructureError, NodeExtension, Renderer, Rule};
use mdtags_reddit::{
    LOOK_OF_DISAPPROVAL, REDDIQUETTE_URL, SMILEY_FACE, reddiquette_link, registry, spoiler,
};

fn render_reddit(document: &Node) -> Result<String, IllegalStructureError> {
    mdtags_reddit::render(document, RenderOptions::new(Dialect::Reddit))
}

fn compile(markdown: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH));
    out
}

fn extension_rule(err: &IllegalStructureError) -> &'static str {
    match &err.rule {
        Rule::Extension { rule, .. } => *rule,
        other => panic!("expected an extension rule, got {:?}", other),
    }
}

#[test]
fn spoiler_renders_as_hash_s_link() {
    let doc = document([paragraph(nodes!["Ending: ", spoiler(["hover"], "he was dead")])]);
    let markdown = render_reddit(&doc).unwrap();
    assert_eq!(markdown, "Ending: [hover](#s \"he was dead\")");
    assert_eq!(
        compile(&markdown),
        "<p>Ending: <a href=\"#s\" title=\"he was dead\">hover</a></p>\n"
    );
}

#[test]
fn spoiler_visible_part_may_be_formatted() {
    let doc = document([paragraph([spoiler([bold(["big"])], "reveal")])]);
    assert_eq!(render_reddit(&doc).unwrap(), "[**big**](#s \"reveal\")");
}

#[test]
fn spoiler_is_reddit_only() {
    let doc = document([paragraph([spoiler(["x"], "y")])]);
    let err = mdtags_reddit::render(&doc, RenderOptions::new(Dialect::Basic)).unwrap_err();
    assert_eq!(extension_rule(&err), "spoiler-dialect");
    assert_eq!(
        err.to_string(),
        "spoilers are reddit-only, not available in basic markdown: spoiler(text=\"y\", \"x\")"
    );

    let recovered =
        mdtags_reddit::render(&doc, RenderOptions::new(Dialect::Basic).recovering()).unwrap();
    assert_eq!(recovered, "[x](#s \"y\")");
}

#[test]
fn spoiler_cannot_nest_in_spoiler() {
    let doc = document([paragraph([spoiler([spoiler(["inner"], "b")], "a")])]);
    let err = render_reddit(&doc).unwrap_err();
    assert_eq!(err.rule, Rule::RepeatedNesting);
    assert_eq!(err.kind, Kind::Extension("spoiler"));
}

#[test]
fn spoiler_hidden_text_cannot_hold_quotes() {
    let doc = document([paragraph([spoiler(["x"], "say \"hi\"")])]);
    assert_eq!(extension_rule(&render_reddit(&doc).unwrap_err()), "spoiler-quote");
}

#[test]
fn spoiler_is_inline() {
    let err = render_reddit(&document([spoiler(["x"], "y")])).unwrap_err();
    assert_eq!(err.rule, Rule::NonBlockAtRoot);
}

#[test]
fn spoiler_needs_the_reddit_registry() {
    let doc = document([paragraph([spoiler(["x"], "y")])]);
    let err = mdtags::render(&doc, RenderOptions::new(Dialect::Reddit)).unwrap_err();
    assert_eq!(err.rule, Rule::UnregisteredKind);
}

#[test]
fn superscript_uses_parentheses() {
    let doc = document([paragraph(nodes!["E = mc", superscript(["2"])])]);
    assert_eq!(render_reddit(&doc).unwrap(), "E = mc^(2)");
}

#[test]
fn superscript_rejects_block_children() {
    let doc = document([paragraph([superscript([code(["block"])])])]);
    let err = render_reddit(&doc).unwrap_err();
    assert_eq!(extension_rule(&err), "superscript-block");
    assert_eq!(err.kind, Kind::Superscript);

    let basic = mdtags_reddit::render(&doc, RenderOptions::new(Dialect::Basic));
    assert!(basic.is_ok(), "{:?}", basic);
}

/// Block-level extension kind registered alongside the reddit ones.
struct Panel;

impl NodeExtension for Panel {
    fn tag(&self) -> &'static str {
        "panel"
    }

    fn is_block(&self) -> bool {
        true
    }

    fn render(&self, node: &ExtensionNode, ctx: &Context, renderer: &Renderer<'_>) -> String {
        renderer.render_children(node.children(), ctx, "")
    }
}

#[test]
fn superscript_rejects_registered_block_extensions() {
    let mut registry = registry();
    registry.register_node(Panel);
    let panel = Node::extension("panel", ["boxed"], std::iter::empty::<(&str, &str)>());
    let doc = document([paragraph([superscript([panel])])]);

    let err = Renderer::new(&registry)
        .render(&doc, RenderOptions::new(Dialect::Reddit))
        .unwrap_err();
    assert_eq!(extension_rule(&err), "superscript-block");
    assert_eq!(err.kind, Kind::Superscript);
    assert!(err.notes.iter().any(|note| note.contains("panel")), "{:?}", err.notes);
}

#[test]
fn superscript_rejects_line_breaks() {
    let doc = document([paragraph([superscript(nodes!["a ", bold(["b\nc"])])])]);
    let err = render_reddit(&doc).unwrap_err();
    assert_eq!(extension_rule(&err), "superscript-newline");
}

#[test]
fn reddit_still_forbids_images() {
    let doc = document([paragraph([image("x.png", ["x"])])]);
    assert_eq!(
        render_reddit(&doc).unwrap_err().rule,
        Rule::DialectForbiddenKind(Dialect::Reddit)
    );
}

#[test]
fn reddiquette_and_faces() {
    let doc = document([paragraph(nodes![
        "Please read the ",
        reddiquette_link(),
        " ",
        LOOK_OF_DISAPPROVAL,
    ])]);
    let markdown = render_reddit(&doc).unwrap();
    assert_eq!(
        markdown,
        "Please read the [reddiquette](http://www.reddit.com/wiki/reddiquette) ಠ_ಠ"
    );
    assert!(compile(&markdown).contains(&format!("<a href=\"{}\">", REDDIQUETTE_URL)));
    assert_eq!(SMILEY_FACE, "ಠ◡ಠ");
}

#[test]
fn registry_holds_reddit_extensions() {
    let registry = registry();
    assert!(registry.extension("spoiler").is_some());
    assert_eq!(registry.rules_for(Dialect::Reddit).count(), 1);
    assert_eq!(registry.rules_for(Dialect::Basic).count(), 0);
}
