//! Builder helpers mirroring tree-sitter's `grammar.js` DSL.
//!
//! Every helper accepts `impl Into<Rule>`, so string literals can stand in for
//! `Rule::String` tokens:
//!
//! ```
//! use versyn_core::grammar::dsl::{field, optional, sym};
//! use versyn_core::seq;
//!
//! let rule = seq!["let", field("pattern", sym("_pattern")), optional(seq!["=", sym("_expression")]), ";"];
//! assert_eq!(rule.symbols(), ["_pattern", "_expression"]);
//! ```

use super::types::{Precedence, Rule};

/// Sequence of rules.
#[macro_export]
macro_rules! seq {
    ($($member:expr),* $(,)?) => {
        $crate::Rule::Seq(vec![$($crate::Rule::from($member)),*])
    };
}

/// Alternation between rules.
#[macro_export]
macro_rules! choice {
    ($($member:expr),* $(,)?) => {
        $crate::Rule::Choice(vec![$($crate::Rule::from($member)),*])
    };
}

impl From<i32> for Precedence {
    fn from(value: i32) -> Self {
        Precedence::Integer(value)
    }
}

impl From<&str> for Precedence {
    fn from(value: &str) -> Self {
        Precedence::Name(value.to_owned())
    }
}

pub fn blank() -> Rule {
    Rule::Blank
}

pub fn sym(name: impl Into<String>) -> Rule {
    Rule::Symbol(name.into())
}

pub fn pattern(value: impl Into<String>) -> Rule {
    Rule::Pattern {
        value: value.into(),
        flags: None,
    }
}

pub fn field(name: impl Into<String>, content: impl Into<Rule>) -> Rule {
    Rule::Field {
        name: name.into(),
        content: Box::new(content.into()),
    }
}

/// `choice(rule, blank())`
pub fn optional(content: impl Into<Rule>) -> Rule {
    Rule::Choice(vec![content.into(), Rule::Blank])
}

pub fn repeat(content: impl Into<Rule>) -> Rule {
    Rule::Repeat(Box::new(content.into()))
}

pub fn repeat1(content: impl Into<Rule>) -> Rule {
    Rule::Repeat1(Box::new(content.into()))
}

pub fn token(content: impl Into<Rule>) -> Rule {
    Rule::Token(Box::new(content.into()))
}

pub fn immediate(content: impl Into<Rule>) -> Rule {
    Rule::ImmediateToken(Box::new(content.into()))
}

/// Renames the node produced by `content` to a named node `value`.
pub fn alias(content: impl Into<Rule>, value: impl Into<String>) -> Rule {
    Rule::Alias {
        content: Box::new(content.into()),
        value: value.into(),
        named: true,
    }
}

/// Renames the node produced by `content` to an anonymous token `value`.
pub fn alias_anonymous(content: impl Into<Rule>, value: impl Into<String>) -> Rule {
    Rule::Alias {
        content: Box::new(content.into()),
        value: value.into(),
        named: false,
    }
}

pub fn prec(value: impl Into<Precedence>, content: impl Into<Rule>) -> Rule {
    Rule::Prec {
        value: value.into(),
        content: Box::new(content.into()),
    }
}

pub fn prec_left(value: impl Into<Precedence>, content: impl Into<Rule>) -> Rule {
    Rule::PrecLeft {
        value: value.into(),
        content: Box::new(content.into()),
    }
}

pub fn prec_right(value: impl Into<Precedence>, content: impl Into<Rule>) -> Rule {
    Rule::PrecRight {
        value: value.into(),
        content: Box::new(content.into()),
    }
}

pub fn prec_dynamic(value: i32, content: impl Into<Rule>) -> Rule {
    Rule::PrecDynamic {
        value,
        content: Box::new(content.into()),
    }
}

/// One or more `content` separated by `separator`, no trailing separator.
pub fn sep_by1(separator: impl Into<Rule>, content: impl Into<Rule>) -> Rule {
    let content = content.into();
    Rule::Seq(vec![
        content.clone(),
        repeat(Rule::Seq(vec![separator.into(), content])),
    ])
}

/// Zero or more `content` separated by `separator`, no trailing separator.
pub fn sep_by(separator: impl Into<Rule>, content: impl Into<Rule>) -> Rule {
    optional(sep_by1(separator, content))
}

/// Zero or more comma-separated `content`, with an optional trailing comma.
pub fn comma_sep(content: impl Into<Rule>) -> Rule {
    optional(Rule::Seq(vec![sep_by1(",", content), optional(",")]))
}

/// One or more comma-separated `content`, with an optional trailing comma.
pub fn comma_sep1(content: impl Into<Rule>) -> Rule {
    Rule::Seq(vec![sep_by1(",", content), optional(",")])
}
