//! Grammar types for tree-sitter style grammars.
//!
//! This module provides types for representing `grammar.json` documents, with
//! JSON reading and writing, compact binary serialization, and normalisation.

mod binary;
pub mod dsl;
mod json;
mod simplify;
mod types;


pub use json::GrammarFormatError;
pub use types::{Grammar, Precedence, PrecedenceEntry, Rule};
