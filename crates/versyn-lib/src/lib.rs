//! Versyn: grammar toolkit and resilient parser for Rust with the Verus
//! verification overlay.
//!
//! A [`Language`] is assembled once from a [`GrammarConfig`]. Assembly builds the
//! grammar description (exportable as tree-sitter `grammar.json`), validates it,
//! and fixes the precedence table and conflict set the parser consults.
//!
//! # Example
//!
//! ```
//! use versyn_lib::{GrammarConfig, Language};
//!
//! let language = Language::build(GrammarConfig::verification()).expect("grammar is sound");
//! let parse = language.parse("fn id(x: u8) -> (r: u8) ensures r == x { x }").expect("out of fuel");
//! assert!(parse.is_valid());
//! eprintln!("{}", parse.dump());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod diagnostics;
pub mod language;
pub mod lexer;
pub mod parser;
pub mod token_tree;

pub use config::{GrammarConfig, ParseOptions};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use language::{GrammarError, Language};
pub use parser::{Parse, SyntaxKind, SyntaxNode, SyntaxToken};

/// Fatal errors that abort a parse.
///
/// Syntax problems in the input are never errors: they are reported through
/// [`Diagnostics`] alongside a complete tree.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
}

/// Result type for parse operations.
pub type Result<T> = std::result::Result<T, Error>;
