//! Grammar-construction and per-parse configuration.

use serde::{Deserialize, Serialize};

/// Dialect switch, fixed when a [`Language`](crate::Language) is built.
///
/// With `verification` disabled no overlay production exists: the grammar is
/// exactly the base language and overlay keywords are ordinary identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrammarConfig {
    #[serde(default = "enabled")]
    pub verification: bool,
}

fn enabled() -> bool {
    true
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self::verification()
    }
}

impl GrammarConfig {
    /// Base language only.
    pub const fn base() -> Self {
        Self {
            verification: false,
        }
    }

    /// Base language plus the verification overlay.
    pub const fn verification() -> Self {
        Self { verification: true }
    }

    /// Grammar name used in the emitted description.
    pub fn grammar_name(&self) -> &'static str {
        if self.verification { "verus" } else { "rust" }
    }
}

/// Resource limits for a single parse. Both default to unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub(crate) exec_fuel: Option<u32>,
    pub(crate) recursion_fuel: Option<u32>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap on token-consuming parser operations.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    /// Cap on nesting depth of recursive productions.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }
}
