//! Structural normalisation of rules.
//!
//! Dialect composition leaves `Blank` placeholders wherever an overlay
//! production is disabled. Simplification folds them away so the emitted
//! description matches a grammar written without those productions.

use super::types::{Grammar, Rule};

impl Grammar {
    /// Copy of the grammar with every rule simplified.
    pub fn simplified(&self) -> Grammar {
        let mut grammar = self.clone();
        for (_, rule) in &mut grammar.rules {
            *rule = rule.clone().simplify();
        }
        grammar.extras = grammar.extras.into_iter().map(Rule::simplify).collect();
        grammar
    }
}

impl Rule {
    /// Normalise the rule without changing the language it matches.
    ///
    /// - `Blank` members of a sequence are dropped
    /// - nested sequences and choices are flattened, duplicate alternatives removed
    /// - single-member sequences and choices collapse to the member
    /// - wrappers around `Blank` collapse to `Blank`
    pub fn simplify(self) -> Rule {
        match self {
            Rule::Seq(members) => {
                let mut flat = Vec::with_capacity(members.len());
                for member in members.into_iter().map(Rule::simplify) {
                    match member {
                        Rule::Blank => {}
                        Rule::Seq(inner) => flat.extend(inner),
                        other => flat.push(other),
                    }
                }
                collapse(flat, Rule::Seq)
            }
            Rule::Choice(members) => {
                let mut flat: Vec<Rule> = Vec::with_capacity(members.len());
                for member in members.into_iter().map(Rule::simplify) {
                    let alternatives = match member {
                        Rule::Choice(inner) => inner,
                        other => vec![other],
                    };
                    for alt in alternatives {
                        if !flat.contains(&alt) {
                            flat.push(alt);
                        }
                    }
                }
                if flat.iter().all(Rule::is_blank) {
                    return Rule::Blank;
                }
                collapse(flat, Rule::Choice)
            }
            Rule::Repeat(content) => match content.simplify() {
                Rule::Blank => Rule::Blank,
                Rule::Repeat(inner) | Rule::Repeat1(inner) => Rule::Repeat(inner),
                other => Rule::Repeat(Box::new(other)),
            },
            Rule::Repeat1(content) => match content.simplify() {
                Rule::Blank => Rule::Blank,
                inner @ Rule::Repeat1(_) => inner,
                other => Rule::Repeat1(Box::new(other)),
            },
            Rule::Field { name, content } => {
                wrap(*content, |content| Rule::Field { name, content })
            }
            Rule::Alias {
                content,
                value,
                named,
            } => wrap(*content, |content| Rule::Alias {
                content,
                value,
                named,
            }),
            Rule::Token(content) => wrap(*content, Rule::Token),
            Rule::ImmediateToken(content) => wrap(*content, Rule::ImmediateToken),
            Rule::Prec { value, content } => wrap(*content, |content| Rule::Prec { value, content }),
            Rule::PrecLeft { value, content } => {
                wrap(*content, |content| Rule::PrecLeft { value, content })
            }
            Rule::PrecRight { value, content } => {
                wrap(*content, |content| Rule::PrecRight { value, content })
            }
            Rule::PrecDynamic { value, content } => {
                wrap(*content, |content| Rule::PrecDynamic { value, content })
            }
            Rule::Reserved {
                context_name,
                content,
            } => wrap(*content, |content| Rule::Reserved {
                context_name,
                content,
            }),
            leaf @ (Rule::Blank | Rule::String(_) | Rule::Pattern { .. } | Rule::Symbol(_)) => {
                leaf
            }
        }
    }
}

fn collapse(mut members: Vec<Rule>, build: fn(Vec<Rule>) -> Rule) -> Rule {
    match members.len() {
        0 => Rule::Blank,
        1 => members.pop().unwrap_or(Rule::Blank),
        _ => build(members),
    }
}

fn wrap(content: Rule, build: impl FnOnce(Box<Rule>) -> Rule) -> Rule {
    match content.simplify() {
        Rule::Blank => Rule::Blank,
        other => build(Box::new(other)),
    }
}
