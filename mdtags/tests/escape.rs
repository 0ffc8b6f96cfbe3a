use mdtags::escape::{METACHARACTERS, is_metacharacter};
use mdtags::escape;

#[test]
fn escapes_every_metacharacter() {
    assert_eq!(
        escape(r"\`*_{}[]()#+-.!"),
        r"\\\`\*\_\{\}\[\]\(\)\#\+\-\.\!"
    );
    for c in METACHARACTERS {
        assert!(is_metacharacter(*c));
        assert_eq!(escape(&c.to_string()), format!("\\{}", c));
    }
}

#[test]
fn leaves_plain_text_alone() {
    assert_eq!(escape("plain words, no markup"), "plain words, no markup");
    assert_eq!(escape("ಠ_ಠ"), "ಠ\\_ಠ");
    assert_eq!(escape(""), "");
}

#[test]
fn escaping_is_not_idempotent() {
    let once = escape("*bold*");
    let twice = escape(&once);
    assert_eq!(once, r"\*bold\*");
    assert_eq!(twice, r"\\\*bold\\\*");
    assert_ne!(twice, once);
}
