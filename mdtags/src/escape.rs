/// Characters that carry markdown meaning and are escaped by [`escape`].
pub const METACHARACTERS: &[char] = &[
    '\\', '`', '*', '_', '{', '}', '[', ']', '(', ')', '#', '+', '-', '.', '!',
];

pub fn is_metacharacter(c: char) -> bool {
    METACHARACTERS.contains(&c)
}

/// Backslash-escape every markdown metacharacter in `text`.
///
/// Renderers never call this on their own; wrap text with
/// [`escaped`](crate::node::build::escaped) when literal characters must
/// survive. Escaping twice escapes the inserted backslashes too, so the
/// operation is not idempotent.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_metacharacter(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
