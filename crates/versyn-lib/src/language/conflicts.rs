//! Declared ambiguities.
//!
//! Each conflict names the productions that stay viable together until a
//! bounded lookahead reaches one of its terminator tokens. The grammar
//! description lists the rule sets under `conflicts`; the parser resolves
//! each one in `parser::ambiguity`, and the first rule of the set is the
//! interpretation chosen when the lookahead is inconclusive.

use crate::config::GrammarConfig;
use crate::parser::cst::{SyntaxKind, TokenSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conflict {
    /// `(a)` in a parameter list: pattern or type.
    ParameterPatternOrType,
    /// `()` where a parameter pattern or type may follow.
    UnitTypeOrTuplePattern,
    /// `(a, b)` in a signature: parameter list or tuple pattern.
    ParametersOrTuplePattern,
    /// `pub (crate)` versus `pub` followed by a tuple type.
    VisibilityOrTupleType,
    /// `(a)` versus `(a,)`.
    TupleOrParenthesized,
    /// `Path {` in expression position.
    StructLiteralOrBlock,
    /// `a::b` in expression position: path or qualified type.
    ScopedPathOrScopedType,
    /// `requires f(x)` versus a call to a function named `requires`.
    SpecClauseOrCall,
    /// `assert(e) by ...` versus `assert(e);` followed by a block.
    AssertByOrBlockStatement,
    /// `forall|x| ...` versus `forall | x`.
    QuantifierOrBinary,
    /// `-> (r: T)` versus `-> (T)`.
    NamedReturnOrTupleType,
    /// `ghost x` versus an identifier named `ghost`.
    DataModeOrIdentifier,
    /// `spec fn` versus a path named `spec`.
    FunctionModeOrIdentifier,
}

impl Conflict {
    const BASE: [Conflict; 7] = [
        Conflict::ParameterPatternOrType,
        Conflict::UnitTypeOrTuplePattern,
        Conflict::ParametersOrTuplePattern,
        Conflict::VisibilityOrTupleType,
        Conflict::TupleOrParenthesized,
        Conflict::StructLiteralOrBlock,
        Conflict::ScopedPathOrScopedType,
    ];

    const OVERLAY: [Conflict; 6] = [
        Conflict::SpecClauseOrCall,
        Conflict::AssertByOrBlockStatement,
        Conflict::QuantifierOrBinary,
        Conflict::NamedReturnOrTupleType,
        Conflict::DataModeOrIdentifier,
        Conflict::FunctionModeOrIdentifier,
    ];

    /// Conflicts declared for a dialect.
    pub fn all(config: GrammarConfig) -> Vec<Conflict> {
        let mut out = Self::BASE.to_vec();
        if config.verification {
            out.extend(Self::OVERLAY);
        }
        out
    }

    pub fn is_overlay(self) -> bool {
        Self::OVERLAY.contains(&self)
    }

    pub fn name(self) -> &'static str {
        match self {
            Conflict::ParameterPatternOrType => "parameter_pattern_or_type",
            Conflict::UnitTypeOrTuplePattern => "unit_type_or_tuple_pattern",
            Conflict::ParametersOrTuplePattern => "parameters_or_tuple_pattern",
            Conflict::VisibilityOrTupleType => "visibility_or_tuple_type",
            Conflict::TupleOrParenthesized => "tuple_or_parenthesized",
            Conflict::StructLiteralOrBlock => "struct_literal_or_block",
            Conflict::ScopedPathOrScopedType => "scoped_path_or_scoped_type",
            Conflict::SpecClauseOrCall => "spec_clause_or_call",
            Conflict::AssertByOrBlockStatement => "assert_by_or_block_statement",
            Conflict::QuantifierOrBinary => "quantifier_or_binary",
            Conflict::NamedReturnOrTupleType => "named_return_or_tuple_type",
            Conflict::DataModeOrIdentifier => "data_mode_or_identifier",
            Conflict::FunctionModeOrIdentifier => "function_mode_or_identifier",
        }
    }

    /// Rules listed in the description's `conflicts` entry.
    pub fn rules(self) -> &'static [&'static str] {
        match self {
            Conflict::ParameterPatternOrType => &["_type", "_pattern"],
            Conflict::UnitTypeOrTuplePattern => &["unit_type", "tuple_pattern"],
            Conflict::ParametersOrTuplePattern => &["parameters", "tuple_pattern"],
            Conflict::VisibilityOrTupleType => &["visibility_modifier", "tuple_type"],
            Conflict::TupleOrParenthesized => &["tuple_expression", "parenthesized_expression"],
            Conflict::StructLiteralOrBlock => &["struct_expression", "block"],
            Conflict::ScopedPathOrScopedType => &["path_expression", "path_type"],
            Conflict::SpecClauseOrCall => &[
                "requires_clause",
                "ensures_clause",
                "recommends_clause",
                "decreases_clause",
                "invariant_clause",
                "opens_invariants_clause",
                "call_expression",
            ],
            Conflict::AssertByOrBlockStatement => &["assert_expression", "expression_statement"],
            Conflict::QuantifierOrBinary => &["quantifier_expression", "binary_expression"],
            Conflict::NamedReturnOrTupleType => &["named_return", "tuple_type"],
            Conflict::DataModeOrIdentifier => &["data_mode", "identifier_pattern"],
            Conflict::FunctionModeOrIdentifier => &["function_mode", "path_expression"],
        }
    }

    /// Tokens at which the lookahead must have decided.
    pub fn terminators(self) -> TokenSet {
        use SyntaxKind::*;
        match self {
            Conflict::ParameterPatternOrType | Conflict::UnitTypeOrTuplePattern => {
                TokenSet::new(&[Colon, Comma, ParenClose])
            }
            Conflict::ParametersOrTuplePattern
            | Conflict::VisibilityOrTupleType
            | Conflict::NamedReturnOrTupleType => TokenSet::new(&[Colon, Comma, ParenClose]),
            Conflict::TupleOrParenthesized => TokenSet::new(&[Comma, ParenClose]),
            Conflict::StructLiteralOrBlock => TokenSet::new(&[BraceOpen]),
            Conflict::ScopedPathOrScopedType => TokenSet::new(&[Lt, ParenOpen, BraceOpen]),
            Conflict::SpecClauseOrCall => TokenSet::new(&[Comma, BraceOpen, Semicolon]),
            Conflict::AssertByOrBlockStatement => TokenSet::new(&[Semicolon, BraceOpen]),
            Conflict::QuantifierOrBinary => TokenSet::new(&[Pipe, PipePipe]),
            Conflict::DataModeOrIdentifier | Conflict::FunctionModeOrIdentifier => {
                TokenSet::EMPTY
            }
        }
    }
}
