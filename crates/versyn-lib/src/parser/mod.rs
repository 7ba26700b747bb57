//! Resilient parser for Rust with the verification overlay.
//!
//! # Architecture
//!
//! The parser produces a lossless concrete syntax tree (CST) via Rowan's green
//! tree builder. Node kinds are named after the grammar rules of the
//! [`Language`] it was built for, so every tree is also a tree of the emitted
//! grammar description.
//!
//! - Zero-copy parsing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace and comments collected, then attached as leading trivia
//! - Checkpoint-based wrapping: binary operators, postfix operators and items
//!   decided late are wrapped retroactively
//! - Pratt loop: binding powers come from the language's precedence table
//! - Declared conflicts are resolved by bounded lookahead in `ambiguity`
//!
//! # Recovery Strategy
//!
//! The parser is resilient: it always produces a tree covering the whole input.
//!
//! 1. Lexical sentinels and unknown tokens get wrapped in `SyntaxKind::Error` nodes
//! 2. Missing expected tokens emit a diagnostic but don't consume (parent may handle)
//! 3. Unclosed delimiters are reported at their opener and closed implicitly
//! 4. Statement and item loops resynchronize at `;`, `}` and item keywords
//!
//! Fuel exhaustion (exec_fuel, recursion_fuel) returns an actual error immediately.

pub mod ast;
pub mod cst;

mod ambiguity;
mod core;
mod grammar;
mod invariants;
mod printer;

#[cfg(test)]
mod invariants_tests;
#[cfg(test)]
mod tests;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};
pub use printer::CstPrinter;

use rowan::GreenNode;

use crate::config::ParseOptions;
use crate::diagnostics::Diagnostics;
use crate::language::Language;
use crate::lexer::lex;
use core::Parser;

/// Parse result: the complete tree plus its diagnostics.
///
/// The tree always covers the whole input. Error nodes in the tree represent
/// recovery points.
#[derive(Debug, Clone)]
pub struct Parse {
    green: GreenNode,
    diagnostics: Diagnostics,
    source: String,
}

impl Parse {
    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Creates a view over the immutable green tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn tree(&self) -> ast::SourceFile {
        ast::SourceFile::cast(self.syntax()).expect("parser always produces SourceFile")
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// No error diagnostics. Warnings are allowed.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn printer(&self) -> CstPrinter {
        CstPrinter::new(self.syntax())
    }

    /// Indented CST without trivia.
    pub fn dump(&self) -> String {
        self.printer().dump()
    }

    /// Indented CST with trivia and spans.
    pub fn dump_full(&self) -> String {
        self.printer().with_trivia(true).with_spans(true).dump()
    }

    /// Named nodes as an S-expression, tree-sitter style.
    pub fn to_sexp(&self) -> String {
        self.printer().sexp()
    }

    /// Diagnostics rendered against the source, cascades suppressed.
    pub fn render_diagnostics(&self) -> String {
        self.diagnostics.render_filtered(&self.source)
    }
}

/// Parses `source` with the grammar of `language`. Returns Err on fuel exhaustion.
pub(crate) fn parse(
    language: &Language,
    source: &str,
    options: ParseOptions,
) -> crate::Result<Parse> {
    let tokens = lex(source, language.config());
    let mut parser = Parser::new(source, tokens, language)
        .with_exec_fuel(options.exec_fuel)
        .with_recursion_fuel(options.recursion_fuel);
    parser.parse_root();
    let (green, diagnostics) = parser.finish()?;
    tracing::debug!(
        diagnostics = diagnostics.len(),
        verification = language.verification(),
        "parsed"
    );
    Ok(Parse {
        green,
        diagnostics,
        source: source.to_string(),
    })
}
