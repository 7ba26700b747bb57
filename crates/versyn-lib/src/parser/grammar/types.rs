//! Paths and types.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind::*;
use crate::parser::cst::token_sets::{PATH_FIRST, TYPE_FIRST};

/// Where a path occurs. Decides how `<` and `::` after a segment are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    /// Generic arguments only through `::<`.
    Expr,
    /// `<` opens generic arguments directly.
    Type,
    /// Stops before `::*` and `::{`.
    Use,
}

impl Parser<'_, '_> {
    /// `[::]segment(::segment)*`, or `<T as Trait>::segment...`.
    pub(super) fn parse_path(&mut self, mode: PathMode) {
        self.start_node(Path);
        match self.current() {
            Lt | Shl => {
                self.parse_qualified_type();
                self.expect(ColonColon, "`::`");
            }
            ColonColon => self.bump(),
            _ => {}
        }
        loop {
            self.parse_path_segment(mode);
            if !self.at(ColonColon)
                || !matches!(self.nth(1), Ident | SelfKw | SuperKw | CrateKw | SelfTypeKw)
            {
                break;
            }
            self.bump();
        }
        self.finish_node();
    }

    pub(super) fn parse_path_if_present(&mut self) -> bool {
        if !self.at_any(PATH_FIRST) {
            return false;
        }
        self.parse_path(PathMode::Expr);
        true
    }

    fn parse_path_segment(&mut self, mode: PathMode) {
        self.start_node(PathSegment);
        match self.current() {
            Ident | SelfKw | SuperKw | CrateKw | SelfTypeKw => self.bump(),
            _ => self.error(DiagnosticKind::ExpectedIdentifier),
        }
        if mode == PathMode::Type && matches!(self.current(), Lt | Shl) {
            self.parse_type_arguments();
        } else if mode != PathMode::Use && self.at_turbofish() {
            self.bump();
            self.parse_type_arguments();
        }
        self.finish_node();
    }

    /// `<Type as Trait>` in front of a path.
    pub(super) fn parse_qualified_type(&mut self) {
        self.start_node(QualifiedType);
        self.expect_split(Lt, "`<`");
        self.parse_type();
        if self.eat(AsKw) {
            self.parse_type();
        }
        self.expect_split(Gt, "`>`");
        self.finish_node();
    }

    /// Parses one type, reporting `ExpectedType` when none starts here.
    pub(super) fn parse_type(&mut self) -> bool {
        if !self.enter_recursion() {
            return false;
        }
        let parsed = self.parse_type_inner();
        self.exit_recursion();
        parsed
    }

    fn parse_type_inner(&mut self) -> bool {
        match self.current() {
            Amp | AmpAmp => {
                if self.at(AmpAmp) {
                    self.split_current();
                }
                self.start_node(ReferenceType);
                self.bump();
                if self.at(LifetimeName) {
                    self.token_node(Lifetime);
                }
                self.eat(MutKw);
                self.parse_type();
                self.finish_node();
            }
            Star => {
                self.start_node(PointerType);
                self.bump();
                if !self.eat(ConstKw) && !self.eat(MutKw) {
                    self.error_msg(DiagnosticKind::UnexpectedToken, "expected `const` or `mut`");
                }
                self.parse_type();
                self.finish_node();
            }
            BracketOpen => {
                self.start_node(ArrayType);
                self.open_delimiter();
                self.parse_type();
                if self.eat(Semicolon) {
                    self.parse_expr();
                }
                self.close_delimiter();
                self.finish_node();
            }
            ParenOpen => self.parse_tuple_type(),
            Bang => self.token_node(NeverType),
            Underscore => self.token_node(InferredType),
            ImplKw | DynKw => {
                let kind = if self.at(ImplKw) { AbstractType } else { DynamicType };
                self.start_node(kind);
                self.bump();
                self.parse_type_bound_list();
                self.finish_node();
            }
            FnKw | UnsafeKw | ExternKw | ForKw => self.parse_function_type(),
            Ident | SelfKw | SelfTypeKw | SuperKw | CrateKw | ColonColon | Lt | Shl => {
                self.parse_path_type()
            }
            _ => {
                self.error(DiagnosticKind::ExpectedType);
                return false;
            }
        }
        true
    }

    /// `()` or `(A, B, ..)`. A parenthesized single type is a one-element tuple type.
    fn parse_tuple_type(&mut self) {
        let checkpoint = self.checkpoint();
        self.open_delimiter();
        let kind = if self.at(ParenClose) {
            UnitType
        } else {
            self.comma_list(ParenClose, "a type", |p| {
                if p.at_any(TYPE_FIRST) {
                    p.parse_type();
                }
            });
            TupleType
        };
        self.close_delimiter();
        self.start_node_at(checkpoint, kind);
        self.finish_node();
    }

    /// `[for<'a>] [modifiers] fn(..) [-> T]`.
    fn parse_function_type(&mut self) {
        self.start_node(FunctionType);
        if self.eat(ForKw) {
            self.parse_type_parameters();
        }
        if self.at_any(PATH_FIRST) {
            self.parse_path(PathMode::Type);
        } else {
            self.parse_function_modifiers();
            self.expect(FnKw, "`fn`");
        }
        self.parse_parameters();
        if self.at(Arrow) {
            self.parse_return_type();
        }
        self.finish_node();
    }

    /// Path type, `Fn(A) -> B` sugar, or a macro in type position.
    fn parse_path_type(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_path(PathMode::Type);
        if self.at(Bang) && matches!(self.nth(1), ParenOpen | BracketOpen | BraceOpen) {
            self.start_node_at(checkpoint, MacroInvocation);
            self.bump();
            self.parse_token_tree();
            self.finish_node();
            return;
        }
        if self.at(ParenOpen) {
            self.start_node_at(checkpoint, FunctionType);
            self.parse_parameters();
            if self.at(Arrow) {
                self.parse_return_type();
            }
            self.finish_node();
            return;
        }
        self.start_node_at(checkpoint, PathType);
        self.finish_node();
    }

    /// `bound + bound + ..`, trailing `+` allowed.
    pub(super) fn parse_type_bound_list(&mut self) {
        loop {
            self.parse_type_bound();
            if !self.eat(Plus) || !self.at_any(TYPE_FIRST) {
                break;
            }
        }
    }

    fn parse_type_bound(&mut self) {
        match self.current() {
            LifetimeName => self.token_node(Lifetime),
            ForKw => self.parse_higher_ranked_bound(),
            Question => {
                self.bump();
                self.parse_type();
            }
            _ => {
                self.parse_type();
            }
        }
    }

    /// `for<'a> Type`.
    pub(super) fn parse_higher_ranked_bound(&mut self) {
        self.start_node(HigherRankedTraitBound);
        self.bump();
        self.parse_type_parameters();
        self.parse_type();
        self.finish_node();
    }

    /// `<T, 'a, N = T, 3, {N + 1}>`.
    pub(super) fn parse_type_arguments(&mut self) {
        self.start_node(TypeArguments);
        self.expect_split(Lt, "`<`");
        while !self.at_split(Gt) && !self.should_stop() {
            let before = self.progress_mark();
            self.parse_generic_argument();
            if self.progress_mark() == before {
                if self.at_outer_closer() {
                    break;
                }
                self.error_and_bump_msg(
                    DiagnosticKind::UnexpectedToken,
                    "expected a generic argument",
                );
                continue;
            }
            if !self.eat(Comma) {
                break;
            }
        }
        self.expect_split(Gt, "`>`");
        self.finish_node();
    }

    fn parse_generic_argument(&mut self) {
        match self.current() {
            LifetimeName => self.token_node(Lifetime),
            BraceOpen => self.parse_block(),
            IntNumber | FloatNumber | CharToken | TrueKw | FalseKw | StringStart
            | RawStringStart => {
                self.parse_literal();
            }
            Ident if self.at_type_binding() => {
                self.start_node(TypeBinding);
                self.bump();
                if self.at(Lt) {
                    self.parse_type_arguments();
                }
                self.expect(Eq, "`=`");
                self.parse_type();
                self.finish_node();
            }
            _ => {
                self.parse_type();
            }
        }
    }
}
