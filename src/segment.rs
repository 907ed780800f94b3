//! Segmenter - splits an input stream into bracketed tree blocks
//!
//! Input is a stream of lines; output is one block per tree expression.
//! Two segmentation policies survive from the tool's history: the strict
//! (default) policy tracks bracket depth and rejects blank lines inside an
//! open tree, while the lenient policy treats blank lines purely as block
//! boundaries and never fails on structural grounds.
//!
//! Note that blocks are NOT validated as well-formed trees: the exact
//! bracket format depends on the corpus (e.g. Penn Treebank) or parser
//! (e.g. Stanford parser) that produced them.

use crate::error::{ConversionError, ConversionResult};

/// How blank lines interact with bracket nesting during segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Track `(`/`)` depth; a block ends when depth returns to zero and a
    /// blank line inside an open tree is a fatal error.
    #[default]
    Strict,
    /// Blank lines are boundaries, nothing else; no depth tracking.
    Lenient,
}

/// Lazy iterator over the tree blocks of an input text.
///
/// Yields blocks in input order. One-pass: after an error is yielded the
/// iterator is fused and produces nothing further.
pub struct Blocks<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    policy: BoundaryPolicy,
    depth: i64,
    acc: String,
    done: bool,
}

impl<'a> Blocks<'a> {
    pub fn new(input: &'a str, policy: BoundaryPolicy) -> Self {
        Blocks {
            lines: input.lines().enumerate(),
            policy,
            depth: 0,
            acc: String::new(),
            done: false,
        }
    }

    fn emit(&mut self) -> String {
        self.depth = 0;
        let block = std::mem::take(&mut self.acc);
        block.trim_end().to_string()
    }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = ConversionResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while let Some((idx, raw)) = self.lines.next() {
            if raw.starts_with(';') {
                // comment
                continue;
            }

            if raw.is_empty() {
                match self.policy {
                    BoundaryPolicy::Strict => {
                        if self.depth != 0 {
                            self.done = true;
                            return Some(Err(ConversionError::segmentation_at(
                                "blank line inside an open tree",
                                idx + 1,
                            )));
                        }
                    }
                    BoundaryPolicy::Lenient => {
                        if !self.acc.is_empty() {
                            return Some(Ok(self.emit()));
                        }
                    }
                }
                continue;
            }

            // Hack for the Penn Treebank format, which omits the root label.
            let line = if raw.starts_with("( (S") {
                raw.replacen("( (S", "(ROOT (S", 1)
            } else {
                raw.to_string()
            };

            if self.policy == BoundaryPolicy::Strict {
                for c in line.chars() {
                    match c {
                        '(' => self.depth += 1,
                        ')' => self.depth -= 1,
                        _ => {}
                    }
                }
            }

            if !self.acc.is_empty() {
                self.acc.push('\n');
            }
            self.acc.push_str(&line);

            if self.policy == BoundaryPolicy::Strict && self.depth == 0 {
                return Some(Ok(self.emit()));
            }
        }

        self.done = true;
        if !self.acc.is_empty() {
            return Some(Ok(self.emit()));
        }
        None
    }
}

/// Eagerly segment `input` into tree blocks.
pub fn segment(input: &str, policy: BoundaryPolicy) -> ConversionResult<Vec<String>> {
    Blocks::new(input, policy).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_block() {
        let blocks = segment("(S (NP x) (VP y))\n\n", BoundaryPolicy::Strict).unwrap();
        assert_eq!(blocks, vec!["(S (NP x) (VP y))"]);
    }

    #[test]
    fn test_block_count_and_order() {
        let input = "(S (NP a))\n\n(S (NP b))\n\n(S (NP c))\n";
        let blocks = segment(input, BoundaryPolicy::Strict).unwrap();
        assert_eq!(blocks, vec!["(S (NP a))", "(S (NP b))", "(S (NP c))"]);

        let blocks = segment(input, BoundaryPolicy::Lenient).unwrap();
        assert_eq!(blocks, vec!["(S (NP a))", "(S (NP b))", "(S (NP c))"]);
    }

    #[test]
    fn test_comment_lines_are_transparent() {
        let input = ";; parsed with stanford-parser\n(S (NP x) (VP y))\n\n";
        let blocks = segment(input, BoundaryPolicy::Strict).unwrap();
        assert_eq!(blocks, vec!["(S (NP x) (VP y))"]);

        // A comment between two blocks does not create a boundary of its own.
        let input = "(S (NP a))\n; note\n(S (NP b))\n";
        let blocks = segment(input, BoundaryPolicy::Strict).unwrap();
        assert_eq!(blocks, vec!["(S (NP a))", "(S (NP b))"]);
    }

    #[test]
    fn test_penn_treebank_root_hack() {
        let blocks = segment("( (S (NP x)))\n", BoundaryPolicy::Strict).unwrap();
        assert_eq!(blocks, vec!["(ROOT (S (NP x)))"]);
    }

    #[test]
    fn test_leading_blank_lines_ignored() {
        let blocks = segment("\n\n(S x)\n", BoundaryPolicy::Strict).unwrap();
        assert_eq!(blocks, vec!["(S x)"]);
        let blocks = segment("\n\n(S x)\n", BoundaryPolicy::Lenient).unwrap();
        assert_eq!(blocks, vec!["(S x)"]);
    }

    #[test]
    fn test_multi_line_tree_preserves_newlines() {
        let input = "(S\n  (NP the dog)\n  (VP barks))\n";
        let blocks = segment(input, BoundaryPolicy::Strict).unwrap();
        assert_eq!(blocks, vec!["(S\n  (NP the dog)\n  (VP barks))"]);
    }

    #[test]
    fn test_back_to_back_trees_without_blank_separator() {
        // Strict mode closes a block as soon as depth returns to zero.
        let input = "(S (NP a))\n(S (NP b))\n";
        let blocks = segment(input, BoundaryPolicy::Strict).unwrap();
        assert_eq!(blocks, vec!["(S (NP a))", "(S (NP b))"]);
    }

    #[test]
    fn test_strict_rejects_blank_line_inside_open_tree() {
        let input = "(S\n  (NP the dog)\n\n  (VP barks))\n";
        let err = segment(input, BoundaryPolicy::Strict).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 3"), "got: {}", msg);
        assert!(msg.contains("blank line"), "got: {}", msg);
    }

    #[test]
    fn test_lenient_splits_at_blank_line_inside_open_tree() {
        let input = "(S\n  (NP the dog)\n\n  (VP barks))\n";
        let blocks = segment(input, BoundaryPolicy::Lenient).unwrap();
        assert_eq!(blocks, vec!["(S\n  (NP the dog)", "  (VP barks))"]);
    }

    #[test]
    fn test_iterator_fuses_after_error() {
        let input = "(S\n\n(S (NP b))\n";
        let mut blocks = Blocks::new(input, BoundaryPolicy::Strict);
        assert!(blocks.next().unwrap().is_err());
        assert!(blocks.next().is_none());
    }

    #[test]
    fn test_final_block_without_trailing_boundary() {
        let blocks = segment("(S (NP x) (VP y))", BoundaryPolicy::Strict).unwrap();
        assert_eq!(blocks, vec!["(S (NP x) (VP y))"]);
    }

    #[test]
    fn test_root_hack_on_unbalanced_final_block() {
        // The rewrite happens before accumulation, so it also applies to a
        // still-open tree emitted at end of input.
        let blocks = segment("( (S (NP x))\n", BoundaryPolicy::Strict).unwrap();
        assert_eq!(blocks, vec!["(ROOT (S (NP x))"]);
    }

    #[test]
    fn test_unbalanced_input_is_passed_through() {
        // Tree well-formedness is not validated; a never-closed tree is
        // emitted as-is at end of input.
        let blocks = segment("(S (NP x)\n", BoundaryPolicy::Strict).unwrap();
        assert_eq!(blocks, vec!["(S (NP x)"]);
    }

    #[test]
    fn test_segmentation_is_deterministic() {
        let input = ";; header\n(S (NP a))\n\n( (S (NP b)))\n";
        let first = segment(input, BoundaryPolicy::Strict).unwrap();
        let second = segment(input, BoundaryPolicy::Strict).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        assert!(segment("", BoundaryPolicy::Strict).unwrap().is_empty());
        assert!(segment("\n\n\n", BoundaryPolicy::Lenient).unwrap().is_empty());
    }
}
