//! Resolution of the declared conflicts.
//!
//! Every resolver looks at most [`MAX_CONFLICT_LOOKAHEAD`] significant tokens
//! ahead, keeps track of delimiter depth, and stops at the conflict's
//! terminators. When the window is inconclusive the first rule of the
//! conflict's set wins.

use super::core::Parser;
use super::cst::SyntaxKind::{self, *};
use super::cst::token_sets::EXPR_FIRST;
use crate::language::Conflict;
use crate::lexer::token_text;

pub(super) const MAX_CONFLICT_LOOKAHEAD: usize = 64;

#[derive(Debug, Clone, Copy)]
pub(super) struct Ahead<'src> {
    pub kind: SyntaxKind,
    pub text: &'src str,
}

/// What a parameter-list element turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ParamShape {
    SelfParam,
    /// `pattern: type`
    Typed,
    /// Bare type, as in `fn(u8, u16)`.
    Type,
    Variadic,
}

const FUNCTION_MODIFIERS: &[&str] = &["async", "const", "unsafe", "default"];
const FUNCTION_MODES: &[&str] = &["open", "closed", "broadcast", "spec", "proof", "exec"];
const SPEC_CLAUSES: &[&str] = &[
    "requires",
    "ensures",
    "recommends",
    "decreases",
    "opens_invariants",
    "returns",
    "no_unwind",
];
const LOOP_CLAUSES: &[&str] = &[
    "invariant",
    "invariant_except_break",
    "invariant_ensures",
    "ensures",
    "decreases",
];

impl<'src> Parser<'src, '_> {
    /// Up to `limit` significant tokens starting at the cursor.
    pub(super) fn window(&mut self, limit: usize) -> Vec<Ahead<'src>> {
        self.skip_trivia_to_buffer();
        self.ensure_progress();
        let source = self.source;
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .take(limit)
            .map(|t| Ahead {
                kind: t.kind,
                text: token_text(source, t),
            })
            .collect()
    }

    pub(super) fn resolved(&self, conflict: Conflict, choice: &str) {
        self.assert_declared(conflict);
        tracing::trace!(conflict = conflict.name(), choice, "conflict resolved");
    }

    fn is_mode_word(&self, text: &str) -> bool {
        self.verification() && matches!(text, "ghost" | "tracked")
    }

    /// Classifies the parameter starting at the cursor.
    pub(super) fn parameter_shape(&mut self) -> ParamShape {
        let window = self.window(MAX_CONFLICT_LOOKAHEAD);
        let Some(first) = window.first() else {
            return ParamShape::Type;
        };
        if first.kind == DotDotDot {
            return ParamShape::Variadic;
        }

        let mut i = 0;
        if first.kind == Ident && self.is_mode_word(first.text) {
            i += 1;
        }
        if window.get(i).is_some_and(|a| a.kind == Amp) {
            i += 1;
            if window.get(i).is_some_and(|a| a.kind == LifetimeName) {
                i += 1;
            }
        }
        if window.get(i).is_some_and(|a| a.kind == MutKw) {
            i += 1;
        }
        if window.get(i).is_some_and(|a| a.kind == SelfKw)
            && window
                .get(i + 1)
                .is_none_or(|a| matches!(a.kind, Comma | ParenClose | Colon))
        {
            return ParamShape::SelfParam;
        }

        let conflict = if first.kind == ParenOpen && window.get(1).is_some_and(|a| a.kind == ParenClose) {
            Conflict::UnitTypeOrTuplePattern
        } else {
            Conflict::ParameterPatternOrType
        };
        let terminators = conflict.terminators();

        let mut depth = 0u32;
        for ahead in &window {
            match ahead.kind {
                ParenOpen | BracketOpen | BraceOpen => depth += 1,
                ParenClose | BracketClose | BraceClose if depth > 0 => depth -= 1,
                kind if depth == 0 && terminators.contains(kind) => {
                    if kind == Colon {
                        self.resolved(conflict, "pattern");
                        return ParamShape::Typed;
                    }
                    break;
                }
                _ => {}
            }
        }
        self.resolved(conflict, "type");
        ParamShape::Type
    }

    /// `pub(crate)`, `pub(self)`, `pub(super)` or `pub(in path)` at the cursor.
    pub(super) fn at_restricted_visibility(&mut self) -> bool {
        if self.nth(1) != ParenOpen {
            return false;
        }
        let restricted = match self.nth(2) {
            CrateKw | SelfKw | SuperKw => self.nth(3) == ParenClose,
            InKw => true,
            _ => false,
        };
        self.resolved(
            Conflict::VisibilityOrTupleType,
            if restricted { "visibility" } else { "tuple type" },
        );
        restricted
    }

    /// `(` [mode] name `:` after `->`.
    pub(super) fn at_named_return(&mut self) -> bool {
        if !self.verification() || !self.at(ParenOpen) {
            return false;
        }
        let window = self.window(4);
        let mut i = 1;
        if window.get(i).is_some_and(|a| a.kind == Ident && self.is_mode_word(a.text)) {
            i += 1;
        }
        let named = window.get(i).is_some_and(|a| a.kind == Ident)
            && window.get(i + 1).is_some_and(|a| a.kind == Colon);
        self.resolved(
            Conflict::NamedReturnOrTupleType,
            if named { "named return" } else { "tuple type" },
        );
        named
    }

    /// `ghost`/`tracked` used as a data mode rather than as a name.
    ///
    /// In binding positions (`let`, parameters) the mode may precede any
    /// pattern; elsewhere only an identifier pattern.
    pub(super) fn at_data_mode(&mut self, binding: bool) -> bool {
        if !self.at(Ident) {
            return false;
        }
        let text = self.current_text();
        if !self.is_mode_word(text) {
            return false;
        }
        let next = self.nth(1);
        let mode = match next {
            Ident | MutKw | RefKw => true,
            Amp | ParenOpen | BracketOpen | Underscore | SelfKw => binding,
            _ => false,
        };
        self.resolved(
            Conflict::DataModeOrIdentifier,
            if mode { "data mode" } else { "identifier" },
        );
        mode
    }

    /// An item starting with function modifiers or modes and reaching `fn`.
    pub(super) fn at_function_item(&mut self) -> bool {
        let window = self.window(12);
        let mut saw_mode = false;
        let mut i = 0;
        while let Some(ahead) = window.get(i) {
            match ahead.kind {
                FnKw => {
                    if saw_mode {
                        self.resolved(Conflict::FunctionModeOrIdentifier, "function mode");
                    }
                    return true;
                }
                AsyncKw | ConstKw | UnsafeKw => i += 1,
                ExternKw => {
                    i += 1;
                    if window.get(i).is_some_and(|a| a.kind == StringStart) {
                        while window.get(i).is_some_and(|a| a.kind != StringEnd) {
                            i += 1;
                        }
                        i += 1;
                    }
                }
                Ident if FUNCTION_MODIFIERS.contains(&ahead.text) => i += 1,
                Ident if self.verification() && FUNCTION_MODES.contains(&ahead.text) => {
                    saw_mode = true;
                    i += 1;
                    if ahead.text == "spec"
                        && window.get(i).is_some_and(|a| a.kind == ParenOpen)
                        && window.get(i + 1).is_some_and(|a| a.text == "checked")
                    {
                        i += 3;
                    }
                }
                _ => break,
            }
        }
        if saw_mode {
            self.resolved(Conflict::FunctionModeOrIdentifier, "path");
        }
        false
    }

    /// A specification clause keyword in signature position.
    pub(super) fn at_spec_clause(&mut self) -> bool {
        self.at_clause_keyword(SPEC_CLAUSES)
    }

    /// A loop specification clause keyword before a loop body.
    pub(super) fn at_loop_clause(&mut self) -> bool {
        self.at_clause_keyword(LOOP_CLAUSES)
    }

    fn at_clause_keyword(&mut self, keywords: &[&str]) -> bool {
        if !self.verification() || !self.at(Ident) {
            return false;
        }
        let text = self.current_text();
        if !keywords.contains(&text) {
            return false;
        }
        if self.next_is(ParenOpen) {
            self.resolved(Conflict::SpecClauseOrCall, "clause");
        }
        true
    }

    /// `by` continuing an `assert(...)`.
    pub(super) fn at_assert_by(&mut self) -> bool {
        let by = self.at_contextual(ByKw);
        self.resolved(
            Conflict::AssertByOrBlockStatement,
            if by { "assert by" } else { "statement" },
        );
        by
    }

    /// `forall|x| body` rather than a name followed by `|`.
    pub(super) fn at_quantifier(&mut self) -> bool {
        let quantifier = self.at_contextual(ForallKw)
            || self.at_contextual(ExistsKw)
            || self.at_contextual(ChooseKw);
        if !quantifier {
            return false;
        }
        let window = self.window(MAX_CONFLICT_LOOKAHEAD);
        let decided = match window.get(1).map(|a| a.kind) {
            Some(PipePipe) => true,
            Some(Pipe) => {
                let terminators = Conflict::QuantifierOrBinary.terminators();
                let mut depth = 0u32;
                let mut close = None;
                for (i, ahead) in window.iter().enumerate().skip(2) {
                    match ahead.kind {
                        ParenOpen | BracketOpen | BraceOpen => depth += 1,
                        ParenClose | BracketClose | BraceClose => {
                            if depth == 0 {
                                break;
                            }
                            depth -= 1;
                        }
                        kind if depth == 0 && terminators.contains(kind) => {
                            close = Some(i);
                            break;
                        }
                        _ => {}
                    }
                }
                close
                    .and_then(|i| window.get(i + 1))
                    .is_some_and(|a| EXPR_FIRST.contains(a.kind) || a.kind == Pound)
            }
            _ => false,
        };
        self.resolved(
            Conflict::QuantifierOrBinary,
            if decided { "quantifier" } else { "binary" },
        );
        decided
    }

    /// `Path {` in expression position.
    pub(super) fn at_struct_literal(&mut self, no_struct: bool) -> bool {
        if !self.at(BraceOpen) {
            return false;
        }
        self.resolved(
            Conflict::StructLiteralOrBlock,
            if no_struct { "block" } else { "struct literal" },
        );
        !no_struct
    }

    /// `<` after an expression path opens generic arguments only via `::<`.
    pub(super) fn at_turbofish(&mut self) -> bool {
        if !self.at(ColonColon) {
            return false;
        }
        let next = self.nth(1);
        let turbofish = next == Lt || next == Shl;
        if turbofish {
            self.resolved(Conflict::ScopedPathOrScopedType, "path expression");
        }
        turbofish
    }

    /// `Name = Type` or `Name<..> = Type` inside generic arguments.
    pub(super) fn at_type_binding(&mut self) -> bool {
        let window = self.window(MAX_CONFLICT_LOOKAHEAD);
        if window.first().is_none_or(|a| a.kind != Ident) {
            return false;
        }
        match window.get(1).map(|a| a.kind) {
            Some(Eq) => true,
            Some(Lt) => {
                let mut depth = 0i32;
                for (i, ahead) in window.iter().enumerate().skip(1) {
                    match ahead.kind {
                        Lt => depth += 1,
                        Shl => depth += 2,
                        Gt => depth -= 1,
                        Shr => depth -= 2,
                        ParenOpen | ParenClose | BraceOpen | BraceClose | Semicolon => return false,
                        _ => {}
                    }
                    if depth <= 0 {
                        return window.get(i + 1).is_some_and(|a| a.kind == Eq);
                    }
                }
                false
            }
            _ => false,
        }
    }

    /// Whether a `let` occurs at depth zero before the condition's block.
    pub(super) fn condition_has_let(&mut self) -> bool {
        self.skip_trivia_to_buffer();
        let mut depth = 0u32;
        for token in &self.tokens[self.pos..] {
            match token.kind {
                LetKw if depth == 0 => return true,
                ParenOpen | BracketOpen => depth += 1,
                ParenClose | BracketClose => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                BraceOpen | BraceClose | Semicolon | FatArrow if depth == 0 => return false,
                BraceOpen => depth += 1,
                BraceClose => depth -= 1,
                _ => {}
            }
        }
        false
    }
}
