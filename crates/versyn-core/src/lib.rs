#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for versyn grammar descriptions.
//!
//! A grammar description is a tree-sitter style `grammar.json` document: named
//! productions built from a small rule algebra, plus the metadata an external
//! table generator needs (precedences, expected conflicts, externals, extras,
//! supertypes).
//!
//! Two layers:
//! - **Model**: [`grammar::Grammar`] and [`grammar::Rule`], with JSON and binary forms
//! - **DSL**: [`grammar::dsl`] helpers and the [`seq!`]/[`choice!`] macros for assembling rules in Rust

pub mod grammar;
pub mod utils;


pub use grammar::{Grammar, GrammarFormatError, Precedence, PrecedenceEntry, Rule};
