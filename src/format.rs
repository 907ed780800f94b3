//! Document assembly
//!
//! Wraps a Qtree fragment in the boilerplate of a complete LaTeX document:
//! a fixed preamble loading tikz and tikz-qtree, a `tikzpicture`
//! environment around the tree, and the end-document marker.

/// Options fixed at startup and applied uniformly to every document.
#[derive(Debug, Clone)]
pub struct Config {
    /// Argument of `\documentclass{...}`.
    pub doc_class: String,
    /// Style options for the `tikzpicture` environment; empty means no
    /// option bracket is emitted.
    pub tikz_opt: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            doc_class: "standalone".to_string(),
            tikz_opt: String::new(),
        }
    }
}

/// Formats Qtree fragments into standalone LaTeX documents.
#[derive(Debug, Clone)]
pub struct LatexFormatter {
    config: Config,
}

impl LatexFormatter {
    pub fn new(config: Config) -> Self {
        LatexFormatter { config }
    }

    /// Preamble selecting the document class and loading the tree packages.
    pub fn header(&self) -> String {
        format!(
            "\\documentclass{{{}}}\n\\usepackage{{tikz}}\n\\usepackage{{tikz-qtree}}\n\\begin{{document}}",
            self.config.doc_class
        )
    }

    pub fn footer(&self) -> &'static str {
        "\\end{document}"
    }

    /// Wrap a Qtree fragment with the tikzpicture environment.
    pub fn wrap_tikzpicture(&self, tree: &str) -> String {
        let opt = if self.config.tikz_opt.is_empty() {
            String::new()
        } else {
            format!("[{}]", self.config.tikz_opt)
        };
        format!("\\begin{{tikzpicture}}{}\n{}\n\\end{{tikzpicture}}", opt, tree)
    }

    /// Assemble one complete document around a Qtree fragment.
    pub fn render(&self, tree: &str) -> String {
        format!(
            "{}\n{}\n{}",
            self.header(),
            self.wrap_tikzpicture(tree),
            self.footer()
        )
    }
}
