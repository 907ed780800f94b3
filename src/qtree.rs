//! Escaper and Qtree rewriter
//!
//! Turns one segmented tree block into the body of a tikz-qtree picture:
//! first the characters LaTeX treats as special are backslash-escaped,
//! then the ASCII brackets are rewritten into Qtree's `[.` / `]` notation.

/// Characters LaTeX treats as special in its syntax, escaped in label text.
pub const SPECIAL_CHARS: [char; 5] = ['{', '}', '$', '&', '%'];

/// Escape every LaTeX special character in `s` with a backslash.
///
/// Not idempotent: escaping an already-escaped string double-escapes it,
/// so callers must escape exactly once. Backslashes already present in the
/// input (e.g. parser artifacts) are passed through untouched.
pub fn replace_special(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if SPECIAL_CHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Convert a bracketed text to the Qtree style brackets.
///
/// A pure character-level substitution: `(` opens a labeled subtree as
/// `[.`, `)` closes it as ` ]`. Bracket balance is not checked; malformed
/// input yields malformed Qtree output.
pub fn to_qtree(text: &str) -> String {
    let body = text.replace('(', "[.").replace(')', " ]");
    format!("\\Tree {}", body)
}
