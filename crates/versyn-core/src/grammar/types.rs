//! Grammar type definitions.

use serde::{Deserialize, Serialize};

/// Complete grammar description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    /// Grammar name (e.g., "verus").
    pub name: String,
    /// Production rules, preserving definition order. The first rule is the start symbol.
    pub rules: Vec<(String, Rule)>,
    /// Extra/trivia nodes (comments, whitespace).
    #[serde(default)]
    pub extras: Vec<Rule>,
    /// Precedence orderings.
    #[serde(default)]
    pub precedences: Vec<Vec<PrecedenceEntry>>,
    /// Expected conflicts.
    #[serde(default)]
    pub conflicts: Vec<Vec<String>>,
    /// External scanner tokens.
    #[serde(default)]
    pub externals: Vec<Rule>,
    /// Rules to inline (hidden).
    #[serde(default)]
    pub inline: Vec<String>,
    /// Supertype rules.
    #[serde(default)]
    pub supertypes: Vec<String>,
    /// Keyword identifier rule.
    #[serde(default)]
    pub word: Option<String>,
    /// Reserved word contexts.
    #[serde(default)]
    pub reserved: Vec<(String, Vec<Rule>)>,
    /// Parent grammar name (for inheritance).
    #[serde(default)]
    pub inherits: Option<String>,
}

impl Grammar {
    /// Empty grammar with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
            extras: Vec::new(),
            precedences: Vec::new(),
            conflicts: Vec::new(),
            externals: Vec::new(),
            inline: Vec::new(),
            supertypes: Vec::new(),
            word: None,
            reserved: Vec::new(),
            inherits: None,
        }
    }

    /// Name of the start symbol (first rule).
    pub fn start_rule(&self) -> Option<&str> {
        self.rules.first().map(|(name, _)| name.as_str())
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.rule(name).is_some()
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }
}

/// Grammar rule variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rule {
    /// Epsilon (empty match).
    Blank,
    /// Literal token.
    String(String),
    /// Regex token.
    Pattern {
        value: String,
        #[serde(default)]
        flags: Option<String>,
    },
    /// Reference to another rule.
    Symbol(String),
    /// Sequence of rules (must match in order).
    Seq(Vec<Rule>),
    /// Alternation.
    Choice(Vec<Rule>),
    /// Zero or more repetitions.
    Repeat(Box<Rule>),
    /// One or more repetitions.
    Repeat1(Box<Rule>),
    /// Named field.
    Field { name: String, content: Box<Rule> },
    /// Rename node.
    Alias {
        content: Box<Rule>,
        value: String,
        named: bool,
    },
    /// Force tokenization.
    Token(Box<Rule>),
    /// Immediate tokenization.
    ImmediateToken(Box<Rule>),
    /// Precedence.
    Prec {
        value: Precedence,
        content: Box<Rule>,
    },
    /// Left-associative precedence.
    PrecLeft {
        value: Precedence,
        content: Box<Rule>,
    },
    /// Right-associative precedence.
    PrecRight {
        value: Precedence,
        content: Box<Rule>,
    },
    /// Dynamic precedence.
    PrecDynamic { value: i32, content: Box<Rule> },
    /// Reserved word context.
    Reserved {
        context_name: String,
        content: Box<Rule>,
    },
}

impl Rule {
    pub fn is_blank(&self) -> bool {
        matches!(self, Rule::Blank)
    }

    /// Static precedence wrapper (`Prec`, `PrecLeft`, `PrecRight`).
    pub fn is_static_prec(&self) -> bool {
        matches!(
            self,
            Rule::Prec { .. } | Rule::PrecLeft { .. } | Rule::PrecRight { .. }
        )
    }

    /// Direct sub-rules, in order.
    pub fn children(&self) -> &[Rule] {
        match self {
            Rule::Seq(members) | Rule::Choice(members) => members,
            Rule::Repeat(content)
            | Rule::Repeat1(content)
            | Rule::Token(content)
            | Rule::ImmediateToken(content)
            | Rule::Field { content, .. }
            | Rule::Alias { content, .. }
            | Rule::Prec { content, .. }
            | Rule::PrecLeft { content, .. }
            | Rule::PrecRight { content, .. }
            | Rule::PrecDynamic { content, .. }
            | Rule::Reserved { content, .. } => std::slice::from_ref(content.as_ref()),
            Rule::Blank | Rule::String(_) | Rule::Pattern { .. } | Rule::Symbol(_) => &[],
        }
    }

    /// Pre-order traversal over this rule and all nested rules.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Rule)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }

    /// Every symbol referenced anywhere inside this rule, in pre-order.
    pub fn symbols(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |rule| {
            if let Rule::Symbol(name) = rule {
                out.push(name.as_str());
            }
        });
        out
    }

    /// Every field name declared inside this rule, in pre-order.
    pub fn field_names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |rule| {
            if let Rule::Field { name, .. } = rule {
                out.push(name.as_str());
            }
        });
        out
    }
}

impl From<&str> for Rule {
    fn from(value: &str) -> Self {
        Rule::String(value.to_owned())
    }
}

impl From<String> for Rule {
    fn from(value: String) -> Self {
        Rule::String(value)
    }
}

/// Precedence value (numeric or named).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Precedence {
    Integer(i32),
    Name(String),
}

/// Entry in precedence ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrecedenceEntry {
    /// Named precedence level.
    Name(String),
    /// Symbol reference.
    Symbol(String),
}
