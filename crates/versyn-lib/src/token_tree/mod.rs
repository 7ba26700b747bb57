//! Token trees outside the parser.
//!
//! [`TokenTreeArena`] groups a token stream by its delimiters into an
//! index-based arena, so nesting depth never turns into recursion.
//! [`MacroRules`] lowers a parsed `macro_rules!` definition into matcher and
//! transcriber elements.

mod arena;
mod macro_rules;

#[cfg(test)]
mod arena_tests;
#[cfg(test)]
mod macro_rules_tests;

pub use arena::{Delimiter, DelimiterError, TokenTreeArena, TtId, TtNode};
pub use macro_rules::{FragmentKind, MacroRule, MacroRules, PatternElement, RepetitionKind};
