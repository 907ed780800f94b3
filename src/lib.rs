//! Qtex - convert bracketed phrase-structure trees to tikz-qtree LaTeX
//!
//! Phrase structure trees are conventionally written as bracketed strings,
//! much like Lisp S-expressions: `(S (NP the dog) (VP barks))`. This crate
//! converts such trees (Penn Treebank style, or the output of parsers like
//! the Stanford parser) into standalone LaTeX documents drawn with David
//! Chiang's tikz-qtree package.
//!
//! The pipeline is a single pass: the [`segment`](mod@segment) module splits the input
//! into one block per tree, [`qtree`] escapes LaTeX special characters and
//! rewrites the brackets into Qtree notation, and [`format`] wraps each
//! fragment in document boilerplate. The optional [`pdf`] module pipes a
//! finished document through an external typesetter.

pub mod error;
pub mod format;
pub mod pdf;
pub mod qtree;
pub mod segment;

pub use error::{ConversionError, ConversionResult};
pub use format::{Config, LatexFormatter};
pub use pdf::{compile_document, CompileOptions};
pub use qtree::{replace_special, to_qtree, SPECIAL_CHARS};
pub use segment::{segment, Blocks, BoundaryPolicy};

/// Convert one bracketed tree into a Qtree fragment (escape + rewrite).
pub fn bracket_to_qtree(text: &str) -> String {
    to_qtree(&replace_special(text))
}

/// Convert one bracketed tree into a complete LaTeX document.
pub fn bracket_to_document(text: &str, config: &Config) -> String {
    LatexFormatter::new(config.clone()).render(&bracket_to_qtree(text))
}

/// Run the whole pipeline over an input text.
///
/// Produces one document per segmented block, in input order. Fails on the
/// first segmentation error; nothing is produced for the offending block.
pub fn convert(
    input: &str,
    config: &Config,
    policy: BoundaryPolicy,
) -> ConversionResult<Vec<String>> {
    let formatter = LatexFormatter::new(config.clone());
    Blocks::new(input, policy)
        .map(|block| block.map(|b| formatter.render(&bracket_to_qtree(&b))))
        .collect()
}
