//! Grammar assembly for one dialect.
//!
//! [`Language::build`] is a pure function of [`GrammarConfig`]: it fixes the
//! precedence table and the conflict catalogue, assembles the grammar
//! description, simplifies it and validates it. A built `Language` is
//! immutable and shared by every parse.

pub mod conflicts;
pub mod precedence;
pub mod rules;
pub mod validate;

#[cfg(test)]
mod conflicts_tests;
#[cfg(test)]
mod precedence_tests;
#[cfg(test)]
mod validate_tests;

use versyn_core::Grammar;
use versyn_core::utils::is_hidden_rule;

pub use conflicts::Conflict;
pub use precedence::{Assoc, Fixity, Level, Operator, PrecedenceTable, Tier};
pub use validate::GrammarError;

use crate::config::{GrammarConfig, ParseOptions};
use crate::parser::{self, Parse};

/// A validated grammar description plus the tables the parser consults.
#[derive(Debug, Clone)]
pub struct Language {
    config: GrammarConfig,
    grammar: Grammar,
    precedence: PrecedenceTable,
    conflicts: Vec<Conflict>,
    overlay_rules: Vec<String>,
}

/// Size summary of a built grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrammarStats {
    pub rules: usize,
    pub hidden_rules: usize,
    pub overlay_rules: usize,
    pub conflicts: usize,
    pub precedence_tiers: usize,
    pub externals: usize,
}

impl Language {
    /// Assembles and validates the grammar for `config`.
    pub fn build(config: GrammarConfig) -> Result<Self, GrammarError> {
        let precedence = PrecedenceTable::new(config)?;
        let conflicts = Conflict::all(config);

        let mut builder = rules::GrammarBuilder::new(config);
        rules::define(&mut builder, &precedence, &conflicts);
        let (raw, overlay_rules) = builder.finish();

        validate::check_raw(&raw)?;
        let grammar = raw.simplified();
        validate::check(&grammar)?;

        let language = Self {
            config,
            grammar,
            precedence,
            conflicts,
            overlay_rules,
        };
        let stats = language.stats();
        tracing::debug!(
            grammar = %language.grammar.name,
            rules = stats.rules,
            overlay_rules = stats.overlay_rules,
            conflicts = stats.conflicts,
            tiers = stats.precedence_tiers,
            "grammar built"
        );
        Ok(language)
    }

    pub fn config(&self) -> GrammarConfig {
        self.config
    }

    pub fn verification(&self) -> bool {
        self.config.verification
    }

    /// Simplified grammar description, ready for `to_json`.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn precedence(&self) -> &PrecedenceTable {
        &self.precedence
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn has_conflict(&self, conflict: Conflict) -> bool {
        self.conflicts.contains(&conflict)
    }

    /// Names of rules that exist only because the overlay is enabled.
    pub fn overlay_rules(&self) -> &[String] {
        &self.overlay_rules
    }

    pub fn stats(&self) -> GrammarStats {
        GrammarStats {
            rules: self.grammar.rules.len(),
            hidden_rules: self
                .grammar
                .rule_names()
                .filter(|n| is_hidden_rule(n))
                .count(),
            overlay_rules: self.overlay_rules.len(),
            conflicts: self.grammar.conflicts.len(),
            precedence_tiers: self.precedence.levels().len(),
            externals: self.grammar.externals.len(),
        }
    }

    /// Parses `source` without resource limits.
    pub fn parse(&self, source: &str) -> crate::Result<Parse> {
        self.parse_with(source, ParseOptions::default())
    }

    pub fn parse_with(&self, source: &str, options: ParseOptions) -> crate::Result<Parse> {
        parser::parse(self, source, options)
    }
}
