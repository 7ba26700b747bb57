//! Grammar description assembled as a function of the dialect flag.
//!
//! Base productions host overlay parts through [`GrammarBuilder::overlay`],
//! which yields `Blank` when the overlay is disabled, and overlay-only
//! productions are registered with [`GrammarBuilder::overlay_rule`]. After
//! simplification a disabled build is exactly the base grammar.

mod expressions;
mod items;
mod lexical;
mod macros;
mod patterns;
mod statements;
mod types;
mod verus;

pub use macros::FRAGMENT_SPECIFIERS;

use versyn_core::grammar::dsl::sym;
use versyn_core::{Grammar, Rule};

use super::conflicts::Conflict;
use super::precedence::PrecedenceTable;
use crate::config::GrammarConfig;

pub struct GrammarBuilder {
    config: GrammarConfig,
    grammar: Grammar,
    overlay_rules: Vec<String>,
}

impl GrammarBuilder {
    pub fn new(config: GrammarConfig) -> Self {
        Self {
            config,
            grammar: Grammar::new(config.grammar_name()),
            overlay_rules: Vec::new(),
        }
    }

    pub fn verification(&self) -> bool {
        self.config.verification
    }

    /// Defines a production present in every dialect.
    pub fn rule(&mut self, name: &str, body: impl Into<Rule>) {
        self.grammar.rules.push((name.to_string(), body.into()));
    }

    /// Defines a production that exists only with the overlay enabled.
    pub fn overlay_rule(&mut self, name: &str, body: impl Into<Rule>) {
        if self.verification() {
            self.overlay_rules.push(name.to_string());
            self.rule(name, body);
        }
    }

    /// An overlay part inside a base production; `Blank` when disabled.
    pub fn overlay(&self, part: impl Into<Rule>) -> Rule {
        if self.verification() {
            part.into()
        } else {
            Rule::Blank
        }
    }

    /// Choice over `members`, leaving out disabled overlay alternatives.
    pub fn alternatives(&self, members: Vec<Rule>) -> Rule {
        Rule::Choice(members.into_iter().filter(|m| !m.is_blank()).collect())
    }

    pub fn extras(&mut self, extras: Vec<Rule>) {
        self.grammar.extras = extras;
    }

    pub fn externals(&mut self, names: &[&str]) {
        self.grammar.externals = names.iter().map(|n| sym(*n)).collect();
    }

    pub fn supertypes(&mut self, names: &[&str]) {
        self.grammar.supertypes = names.iter().map(|n| n.to_string()).collect();
    }

    pub fn inline(&mut self, names: &[&str]) {
        self.grammar.inline = names.iter().map(|n| n.to_string()).collect();
    }

    pub fn word(&mut self, name: &str) {
        self.grammar.word = Some(name.to_string());
    }

    /// Raw grammar (not yet simplified) and the names of overlay-only rules.
    pub fn finish(self) -> (Grammar, Vec<String>) {
        (self.grammar, self.overlay_rules)
    }
}

/// Builds every production for the builder's dialect.
pub fn define(b: &mut GrammarBuilder, table: &PrecedenceTable, conflicts: &[Conflict]) {
    // `source_file` must come first: it is the start symbol.
    items::define(b);
    statements::define(b);
    expressions::define(b, table);
    verus::define(b);
    types::define(b);
    patterns::define(b);
    macros::define(b);
    lexical::define(b);

    b.grammar.precedences = table.precedences();
    b.grammar.conflicts = conflicts
        .iter()
        .map(|c| c.rules().iter().map(|r| r.to_string()).collect())
        .collect();
    b.supertypes(&[
        "_expression",
        "_type",
        "_literal",
        "_pattern",
        "_declaration_statement",
    ]);
    b.inline(&["_condition", "_type_bound"]);
    b.word("identifier");
}
