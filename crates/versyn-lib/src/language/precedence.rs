//! Operator precedence and associativity.
//!
//! One ordered scale of tiers, lowest binding first. Every operator belongs to
//! exactly one tier and shares that tier's associativity. The table drives both
//! the Pratt loop in the parser and the `prec_*` wrappers plus `precedences`
//! metadata of the emitted grammar description.

use versyn_core::PrecedenceEntry;

use super::validate::GrammarError;
use crate::config::GrammarConfig;
use crate::parser::cst::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assoc {
    Left,
    Right,
    /// Chaining is a diagnostic.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Prefix,
    Infix,
    Postfix,
}

/// Precedence tiers, lowest binding power first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Closure,
    Assignment,
    Range,
    BigConnective,
    Implication,
    Or,
    And,
    Comparison,
    BitOr,
    BitXor,
    BitAnd,
    Shift,
    Additive,
    Multiplicative,
    Cast,
    Unary,
    Try,
    Field,
    Call,
}

impl Tier {
    /// Name used for `prec(...)` in the grammar description.
    pub fn name(self) -> &'static str {
        match self {
            Tier::Closure => "closure",
            Tier::Assignment => "assignment",
            Tier::Range => "range",
            Tier::BigConnective => "big_connective",
            Tier::Implication => "implication",
            Tier::Or => "or",
            Tier::And => "and",
            Tier::Comparison => "comparison",
            Tier::BitOr => "bitor",
            Tier::BitXor => "bitxor",
            Tier::BitAnd => "bitand",
            Tier::Shift => "shift",
            Tier::Additive => "additive",
            Tier::Multiplicative => "multiplicative",
            Tier::Cast => "cast",
            Tier::Unary => "unary",
            Tier::Try => "try",
            Tier::Field => "field",
            Tier::Call => "call",
        }
    }

    pub fn is_overlay(self) -> bool {
        matches!(self, Tier::BigConnective | Tier::Implication)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator {
    pub token: SyntaxKind,
    pub text: &'static str,
    pub fixity: Fixity,
    pub assoc: Assoc,
    pub tier: Tier,
}

/// One level of the scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub tier: Tier,
    pub assoc: Assoc,
    pub operators: Vec<Operator>,
}

impl Level {
    pub fn new(tier: Tier, assoc: Assoc) -> Self {
        Self {
            tier,
            assoc,
            operators: Vec::new(),
        }
    }

    pub fn with(mut self, fixity: Fixity, ops: &[(SyntaxKind, &'static str)]) -> Self {
        for &(token, text) in ops {
            self.operators.push(Operator {
                token,
                text,
                fixity,
                assoc: self.assoc,
                tier: self.tier,
            });
        }
        self
    }
}

/// Validated, strictly ordered precedence scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedenceTable {
    levels: Vec<Level>,
    chained_comparisons: bool,
}

impl PrecedenceTable {
    /// Scale for the given dialect. Overlay tiers and operators exist only when
    /// the overlay is enabled.
    pub fn new(config: GrammarConfig) -> Result<Self, GrammarError> {
        use Fixity::*;
        use SyntaxKind::*;

        let overlay = config.verification;
        let mut comparison = Level::new(Tier::Comparison, Assoc::None).with(
            Infix,
            &[
                (EqEq, "=="),
                (NotEq, "!="),
                (Lt, "<"),
                (LtEq, "<="),
                (Gt, ">"),
                (GtEq, ">="),
            ],
        );
        let mut try_level = Level::new(Tier::Try, Assoc::Left).with(Postfix, &[(Question, "?")]);

        let mut levels = vec![
            Level::new(Tier::Closure, Assoc::Right)
                .with(Prefix, &[(Pipe, "|"), (PipePipe, "||"), (MoveKw, "move")]),
            Level::new(Tier::Assignment, Assoc::Right).with(
                Infix,
                &[
                    (Eq, "="),
                    (PlusEq, "+="),
                    (MinusEq, "-="),
                    (StarEq, "*="),
                    (SlashEq, "/="),
                    (PercentEq, "%="),
                    (CaretEq, "^="),
                    (AmpEq, "&="),
                    (PipeEq, "|="),
                    (ShlEq, "<<="),
                    (ShrEq, ">>="),
                ],
            ),
            Level::new(Tier::Range, Assoc::None)
                .with(Infix, &[(DotDot, ".."), (DotDotEq, "..=")]),
        ];

        if overlay {
            levels.push(
                Level::new(Tier::BigConnective, Assoc::Right)
                    .with(Prefix, &[(BigAnd, "&&&"), (BigOr, "|||")]),
            );
            levels.push(Level::new(Tier::Implication, Assoc::Right).with(
                Infix,
                &[(Implies, "==>"), (Explies, "<=="), (Equiv, "<==>")],
            ));
            comparison = comparison.with(
                Infix,
                &[
                    (EqEqEq, "==="),
                    (NotEqEq, "!=="),
                    (ExtEq, "=~="),
                    (NotExtEq, "!~="),
                    (DeepExtEq, "=~~="),
                    (NotDeepExtEq, "!~~="),
                ],
            );
            try_level = try_level.with(Postfix, &[(At, "@")]);
        }

        levels.extend([
            Level::new(Tier::Or, Assoc::Left).with(Infix, &[(PipePipe, "||")]),
            Level::new(Tier::And, Assoc::Left).with(Infix, &[(AmpAmp, "&&")]),
            comparison,
            Level::new(Tier::BitOr, Assoc::Left).with(Infix, &[(Pipe, "|")]),
            Level::new(Tier::BitXor, Assoc::Left).with(Infix, &[(Caret, "^")]),
            Level::new(Tier::BitAnd, Assoc::Left).with(Infix, &[(Amp, "&")]),
            Level::new(Tier::Shift, Assoc::Left).with(Infix, &[(Shl, "<<"), (Shr, ">>")]),
            Level::new(Tier::Additive, Assoc::Left).with(Infix, &[(Plus, "+"), (Minus, "-")]),
            Level::new(Tier::Multiplicative, Assoc::Left)
                .with(Infix, &[(Star, "*"), (Slash, "/"), (Percent, "%")]),
            Level::new(Tier::Cast, Assoc::Left).with(Infix, &[(AsKw, "as")]),
            Level::new(Tier::Unary, Assoc::Right)
                .with(Prefix, &[(Minus, "-"), (Bang, "!"), (Star, "*"), (Amp, "&")]),
            try_level,
            Level::new(Tier::Field, Assoc::Left).with(Postfix, &[(Dot, ".")]),
            Level::new(Tier::Call, Assoc::Left)
                .with(Postfix, &[(ParenOpen, "("), (BracketOpen, "[")]),
        ]);

        let mut table = Self::from_levels(levels)?;
        table.chained_comparisons = overlay;
        Ok(table)
    }

    /// Builds a table from explicit levels, lowest first.
    pub fn from_levels(levels: Vec<Level>) -> Result<Self, GrammarError> {
        let table = Self {
            levels,
            chained_comparisons: false,
        };
        table.validate()?;
        Ok(table)
    }

    /// Checks that no operator appears in two tiers, each tier appears once, and
    /// every operator carries its tier's associativity.
    pub fn validate(&self) -> Result<(), GrammarError> {
        for (i, level) in self.levels.iter().enumerate() {
            if let Some(dup) = self.levels[..i].iter().find(|l| l.tier == level.tier) {
                return Err(GrammarError::DuplicateTier {
                    tier: dup.tier.name(),
                });
            }
            if level.operators.iter().any(|op| op.assoc != level.assoc || op.tier != level.tier) {
                return Err(GrammarError::MixedAssociativity {
                    tier: level.tier.name(),
                });
            }
        }

        let operators: Vec<&Operator> = self.operators().collect();
        for (i, op) in operators.iter().enumerate() {
            let clash = operators[..i]
                .iter()
                .find(|other| other.token == op.token && other.fixity == op.fixity);
            if let Some(other) = clash {
                return Err(GrammarError::PrecedenceCollision {
                    operator: op.text.to_string(),
                    first: other.tier.name(),
                    second: op.tier.name(),
                });
            }
        }
        Ok(())
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn operators(&self) -> impl Iterator<Item = &Operator> {
        self.levels.iter().flat_map(|l| l.operators.iter())
    }

    /// Position on the scale; higher binds tighter.
    pub fn level(&self, tier: Tier) -> Option<u8> {
        self.levels
            .iter()
            .position(|l| l.tier == tier)
            .map(|i| i as u8)
    }

    pub fn has_tier(&self, tier: Tier) -> bool {
        self.level(tier).is_some()
    }

    pub fn assoc(&self, tier: Tier) -> Option<Assoc> {
        self.levels.iter().find(|l| l.tier == tier).map(|l| l.assoc)
    }

    /// Left and right binding power for a tier.
    ///
    /// Level `l` maps to base `b = 2l + 2`: left-associative and
    /// non-associative tiers get `(b, b + 1)`, right-associative `(b + 1, b)`.
    pub fn binding_power(&self, tier: Tier) -> Option<(u8, u8)> {
        let level = self.levels.iter().position(|l| l.tier == tier)?;
        let base = 2 * level as u8 + 2;
        Some(match self.levels[level].assoc {
            Assoc::Left | Assoc::None => (base, base + 1),
            Assoc::Right => (base + 1, base),
        })
    }

    fn find(&self, token: SyntaxKind, fixity: Fixity) -> Option<&Operator> {
        self.operators()
            .find(|op| op.token == token && op.fixity == fixity)
    }

    pub fn infix(&self, token: SyntaxKind) -> Option<&Operator> {
        self.find(token, Fixity::Infix)
    }

    pub fn prefix(&self, token: SyntaxKind) -> Option<&Operator> {
        self.find(token, Fixity::Prefix)
    }

    pub fn postfix(&self, token: SyntaxKind) -> Option<&Operator> {
        self.find(token, Fixity::Postfix)
    }

    /// Whether `a < b <= c` style chains are accepted on the comparison tier.
    pub fn allows_chained_comparison(&self, first: SyntaxKind, second: SyntaxKind) -> bool {
        use SyntaxKind::*;
        let ordering = |k: SyntaxKind| matches!(k, Lt | LtEq | Gt | GtEq);
        self.chained_comparisons && ordering(first) && ordering(second)
    }

    /// Tiers from tightest to loosest, as one `precedences` ordering.
    pub fn precedences(&self) -> Vec<Vec<PrecedenceEntry>> {
        vec![
            self.levels
                .iter()
                .rev()
                .map(|l| PrecedenceEntry::Name(l.tier.name().to_string()))
                .collect(),
        ]
    }
}
