//! Grammar-construction checks.
//!
//! A defect here is fatal: `Language::build` refuses to produce a language
//! from a description that fails any check.

use std::collections::{HashMap, HashSet, VecDeque};

use versyn_core::{Grammar, Precedence, PrecedenceEntry, Rule};

/// Structural defect in a grammar description or precedence table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("grammar has no rules")]
    Empty,

    #[error("rule `{0}` is defined more than once")]
    DuplicateRule(String),

    #[error("rule `{rule}` references undefined symbol `{symbol}`")]
    UndefinedSymbol { rule: String, symbol: String },

    #[error("rule `{0}` is unreachable from the start symbol")]
    UnreachableRule(String),

    #[error("rule `{0}` is left-recursive outside a precedence wrapper")]
    UnguardedLeftRecursion(String),

    #[error("rule `{0}` lists the same alternative twice")]
    DuplicateAlternative(String),

    #[error("rule `{rule}` has invalid token pattern `{pattern}`: {message}")]
    InvalidPattern {
        rule: String,
        pattern: String,
        message: String,
    },

    #[error("rule `{rule}` uses undeclared precedence `{name}`")]
    UnknownPrecedence { rule: String, name: String },

    #[error("operator `{operator}` appears in tiers `{first}` and `{second}`")]
    PrecedenceCollision {
        operator: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("tier `{tier}` mixes associativities")]
    MixedAssociativity { tier: &'static str },

    #[error("tier `{tier}` appears twice in the precedence scale")]
    DuplicateTier { tier: &'static str },

    #[error("conflict declaration names unknown rule `{0}`")]
    ConflictUnknownRule(String),

    #[error("conflict declaration `{0}` is listed twice")]
    DuplicateConflict(String),

    #[error("{what} `{name}` is not a defined rule")]
    MissingRule { what: &'static str, name: String },
}

/// Checks that must run before simplification, which would hide them.
pub fn check_raw(grammar: &Grammar) -> Result<(), GrammarError> {
    for (name, rule) in &grammar.rules {
        let mut duplicate = false;
        rule.walk(&mut |r| {
            if let Rule::Choice(members) = r {
                let alternatives: Vec<&Rule> = members.iter().filter(|m| !m.is_blank()).collect();
                for (i, alt) in alternatives.iter().enumerate() {
                    if alternatives[..i].contains(alt) {
                        duplicate = true;
                    }
                }
            }
        });
        if duplicate {
            return Err(GrammarError::DuplicateAlternative(name.clone()));
        }
    }
    Ok(())
}

/// Full structural validation of a simplified grammar.
pub fn check(grammar: &Grammar) -> Result<(), GrammarError> {
    if grammar.rules.is_empty() {
        return Err(GrammarError::Empty);
    }
    check_duplicate_rules(grammar)?;
    check_symbols(grammar)?;
    check_named_rules(grammar)?;
    check_conflicts(grammar)?;
    check_reachable(grammar)?;
    check_patterns(grammar)?;
    check_precedence_names(grammar)?;
    check_left_recursion(grammar)?;
    Ok(())
}

fn check_duplicate_rules(grammar: &Grammar) -> Result<(), GrammarError> {
    let mut seen = HashSet::new();
    for name in grammar.rule_names() {
        if !seen.insert(name) {
            return Err(GrammarError::DuplicateRule(name.to_string()));
        }
    }
    Ok(())
}

fn external_names(grammar: &Grammar) -> HashSet<&str> {
    grammar
        .externals
        .iter()
        .filter_map(|r| match r {
            Rule::Symbol(name) => Some(name.as_str()),
            _ => None,
        })
        .collect()
}

fn check_symbols(grammar: &Grammar) -> Result<(), GrammarError> {
    let defined: HashSet<&str> = grammar.rule_names().collect();
    let externals = external_names(grammar);
    let extras = grammar.extras.iter().map(|r| ("extras", r));
    let rules = grammar.rules.iter().map(|(n, r)| (n.as_str(), r));
    for (owner, rule) in rules.chain(extras) {
        for symbol in rule.symbols() {
            if !defined.contains(symbol) && !externals.contains(symbol) {
                return Err(GrammarError::UndefinedSymbol {
                    rule: owner.to_string(),
                    symbol: symbol.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn check_named_rules(grammar: &Grammar) -> Result<(), GrammarError> {
    let named = grammar
        .supertypes
        .iter()
        .map(|n| ("supertype", n))
        .chain(grammar.inline.iter().map(|n| ("inline rule", n)))
        .chain(grammar.word.iter().map(|n| ("word rule", n)));
    for (what, name) in named {
        if !grammar.has_rule(name) {
            return Err(GrammarError::MissingRule {
                what,
                name: name.clone(),
            });
        }
    }
    Ok(())
}

fn check_conflicts(grammar: &Grammar) -> Result<(), GrammarError> {
    for (i, set) in grammar.conflicts.iter().enumerate() {
        if grammar.conflicts[..i].contains(set) {
            return Err(GrammarError::DuplicateConflict(set.join(", ")));
        }
        if let Some(unknown) = set.iter().find(|n| !grammar.has_rule(n)) {
            return Err(GrammarError::ConflictUnknownRule(unknown.clone()));
        }
    }
    Ok(())
}

fn check_reachable(grammar: &Grammar) -> Result<(), GrammarError> {
    let mut reached: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    if let Some(start) = grammar.start_rule() {
        queue.push_back(start);
    }
    for extra in &grammar.extras {
        queue.extend(extra.symbols());
    }

    while let Some(name) = queue.pop_front() {
        if !reached.insert(name) {
            continue;
        }
        if let Some(rule) = grammar.rule(name) {
            queue.extend(rule.symbols());
        }
    }

    match grammar.rule_names().find(|n| !reached.contains(n)) {
        Some(unreached) => Err(GrammarError::UnreachableRule(unreached.to_string())),
        None => Ok(()),
    }
}

fn check_patterns(grammar: &Grammar) -> Result<(), GrammarError> {
    for (name, rule) in &grammar.rules {
        let mut failure = None;
        rule.walk(&mut |r| {
            if let Rule::Pattern { value, .. } = r
                && failure.is_none()
                && let Err(err) = regex_syntax::parse(value)
            {
                failure = Some((value.clone(), err.to_string()));
            }
        });
        if let Some((pattern, message)) = failure {
            return Err(GrammarError::InvalidPattern {
                rule: name.clone(),
                pattern,
                message,
            });
        }
    }
    Ok(())
}

fn check_precedence_names(grammar: &Grammar) -> Result<(), GrammarError> {
    let declared: HashSet<&str> = grammar
        .precedences
        .iter()
        .flatten()
        .filter_map(|e| match e {
            PrecedenceEntry::Name(n) => Some(n.as_str()),
            PrecedenceEntry::Symbol(_) => None,
        })
        .collect();

    for (name, rule) in &grammar.rules {
        let mut unknown = None;
        rule.walk(&mut |r| {
            let value = match r {
                Rule::Prec { value, .. }
                | Rule::PrecLeft { value, .. }
                | Rule::PrecRight { value, .. } => value,
                _ => return,
            };
            if let Precedence::Name(n) = value
                && !declared.contains(n.as_str())
                && unknown.is_none()
            {
                unknown = Some(n.clone());
            }
        });
        if let Some(n) = unknown {
            return Err(GrammarError::UnknownPrecedence {
                rule: name.clone(),
                name: n,
            });
        }
    }
    Ok(())
}

/// Rules that can derive the empty string.
fn nullable_rules(grammar: &Grammar) -> HashSet<&str> {
    let mut nullable = HashSet::new();
    loop {
        let before = nullable.len();
        for (name, rule) in &grammar.rules {
            if !nullable.contains(name.as_str()) && is_nullable(rule, &nullable) {
                nullable.insert(name.as_str());
            }
        }
        if nullable.len() == before {
            return nullable;
        }
    }
}

fn is_nullable(rule: &Rule, nullable: &HashSet<&str>) -> bool {
    match rule {
        Rule::Blank | Rule::Repeat(_) => true,
        Rule::String(s) => s.is_empty(),
        Rule::Pattern { .. } => false,
        Rule::Symbol(name) => nullable.contains(name.as_str()),
        Rule::Seq(members) => members.iter().all(|m| is_nullable(m, nullable)),
        Rule::Choice(members) => members.iter().any(|m| is_nullable(m, nullable)),
        Rule::Token(_) | Rule::ImmediateToken(_) => false,
        other => other.children().iter().all(|c| is_nullable(c, nullable)),
    }
}

/// Symbols that can appear leftmost in `rule`, excluding those under a
/// static precedence wrapper.
fn unguarded_leftmost<'g>(rule: &'g Rule, nullable: &HashSet<&str>, out: &mut Vec<&'g str>) {
    match rule {
        Rule::Symbol(name) => out.push(name),
        Rule::Seq(members) => {
            for member in members {
                unguarded_leftmost(member, nullable, out);
                if !is_nullable(member, nullable) {
                    break;
                }
            }
        }
        Rule::Choice(members) => {
            for member in members {
                unguarded_leftmost(member, nullable, out);
            }
        }
        _ if rule.is_static_prec() => {}
        Rule::Token(_) | Rule::ImmediateToken(_) => {}
        other => {
            for child in other.children() {
                unguarded_leftmost(child, nullable, out);
            }
        }
    }
}

fn check_left_recursion(grammar: &Grammar) -> Result<(), GrammarError> {
    let nullable = nullable_rules(grammar);
    let edges: HashMap<&str, Vec<&str>> = grammar
        .rules
        .iter()
        .map(|(name, rule)| {
            let mut out = Vec::new();
            unguarded_leftmost(rule, &nullable, &mut out);
            (name.as_str(), out)
        })
        .collect();

    for (name, _) in &grammar.rules {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = edges.get(name.as_str()).cloned().unwrap_or_default();
        while let Some(next) = stack.pop() {
            if next == name {
                return Err(GrammarError::UnguardedLeftRecursion(name.clone()));
            }
            if visited.insert(next)
                && let Some(more) = edges.get(next)
            {
                stack.extend(more.iter().copied());
            }
        }
    }
    Ok(())
}
