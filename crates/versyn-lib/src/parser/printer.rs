use std::fmt::Write;

use rowan::NodeOrToken;

use super::cst::{SyntaxKind, SyntaxNode};

/// Text renderings of a syntax tree.
pub struct CstPrinter {
    root: SyntaxNode,
    trivia: bool,
    spans: bool,
}

impl CstPrinter {
    pub fn new(root: SyntaxNode) -> Self {
        Self {
            root,
            trivia: false,
            spans: false,
        }
    }

    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format_cst(&self.root, 0, &mut out)
            .expect("String write never fails");
        out
    }

    /// Named nodes only, as `(kind (child) ...)` with rule names.
    pub fn sexp(&self) -> String {
        let mut out = String::new();
        self.format_sexp(&self.root, &mut out)
            .expect("String write never fails");
        out
    }

    fn format_cst(&self, node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(node.text_range());

        writeln!(w, "{}{:?}{}", prefix, node.kind(), span)?;

        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => self.format_cst(&n, indent + 1, w)?,
                NodeOrToken::Token(t) => {
                    if self.trivia || !t.kind().is_trivia() {
                        let child_prefix = "  ".repeat(indent + 1);
                        let child_span = self.span_str(t.text_range());
                        writeln!(
                            w,
                            "{}{:?}{} {:?}",
                            child_prefix,
                            t.kind(),
                            child_span,
                            t.text()
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    fn format_sexp(&self, node: &SyntaxNode, w: &mut impl Write) -> std::fmt::Result {
        write!(w, "({}", rule_name(node.kind()))?;
        if self.spans {
            let range = node.text_range();
            write!(w, " [{}..{}]", u32::from(range.start()), u32::from(range.end()))?;
        }
        for child in node.children() {
            w.write_char(' ')?;
            self.format_sexp(&child, w)?;
        }
        w.write_char(')')
    }

    fn span_str(&self, range: rowan::TextRange) -> String {
        if !self.spans {
            return String::new();
        }
        format!(
            " [{}..{}]",
            u32::from(range.start()),
            u32::from(range.end())
        )
    }
}

/// Grammar rule name of a node kind (`FunctionItem` → `function_item`).
pub fn rule_name(kind: SyntaxKind) -> String {
    if kind == SyntaxKind::Error {
        return "ERROR".to_string();
    }
    versyn_core::utils::to_snake_case(&format!("{kind:?}"))
}
