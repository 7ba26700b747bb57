//! Primary expressions: literals, paths, groupings and keyword-led forms.

use rowan::TextRange;

use crate::diagnostics::DiagnosticKind;
use crate::language::Conflict;
use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind::{self, *};
use crate::parser::grammar::{PathMode, Restrictions};

impl Parser<'_, '_> {
    pub(super) fn parse_atom(&mut self, r: Restrictions) -> Option<SyntaxKind> {
        let kind = match self.current() {
            IntNumber | FloatNumber | CharToken | TrueKw | FalseKw | StringStart
            | RawStringStart => return self.parse_literal(),
            ErrorSentinel => {
                self.error_and_bump(DiagnosticKind::LexicalError);
                Error
            }
            ParenOpen => self.parse_parenthesized(),
            BracketOpen => self.parse_array(),
            BraceOpen => {
                self.parse_block();
                Block
            }
            UnsafeKw => self.parse_prefixed_block(UnsafeBlock),
            AsyncKw => self.parse_prefixed_block(AsyncBlock),
            ConstKw => self.parse_prefixed_block(ConstBlock),
            TryKw => self.parse_prefixed_block(TryBlock),
            IfKw => self.parse_if(),
            MatchKw => self.parse_match(),
            LoopKw | WhileKw | ForKw => {
                let checkpoint = self.checkpoint();
                self.parse_loop_like(checkpoint)
            }
            LifetimeName if self.next_is(Colon) => self.parse_labeled(),
            BreakKw => self.parse_break(r),
            ContinueKw => {
                self.start_node(ContinueExpression);
                self.bump();
                if self.at(LifetimeName) {
                    self.token_node(Label);
                }
                self.finish_node();
                ContinueExpression
            }
            ReturnKw => self.parse_jump_with_value(ReturnExpression, r),
            YieldKw => self.parse_jump_with_value(YieldExpression, r),
            Ident if self.at_verification_atom() => return self.parse_verification_atom(r),
            Ident | SelfKw | SelfTypeKw | SuperKw | CrateKw | ColonColon | Lt | Shl => {
                self.parse_path_expression(r)
            }
            _ => return None,
        };
        Some(kind)
    }

    /// Literal node around its token(s). Unterminated strings are reported
    /// over the rest of the input.
    pub(super) fn parse_literal(&mut self) -> Option<SyntaxKind> {
        let kind = match self.current() {
            IntNumber => IntegerLiteral,
            FloatNumber => FloatLiteral,
            CharToken => CharLiteral,
            TrueKw | FalseKw => BooleanLiteral,
            StringStart => StringLiteral,
            RawStringStart => RawStringLiteral,
            _ => return None,
        };
        if !matches!(kind, StringLiteral | RawStringLiteral) {
            self.token_node(kind);
            return Some(kind);
        }

        let start = self.current_span().start();
        self.start_node(kind);
        self.bump();
        let end = if kind == StringLiteral {
            while self.at(StringContent) || self.at(EscapeSequence) {
                self.bump();
            }
            StringEnd
        } else {
            self.eat(RawStringContent);
            RawStringEnd
        };
        if !self.eat(end) {
            let range = TextRange::new(start, self.eof_offset());
            let what = if kind == StringLiteral {
                "missing closing `\"`"
            } else {
                "missing raw string terminator"
            };
            self.error_at(DiagnosticKind::UnterminatedLiteral, range, what);
        }
        self.finish_node();
        Some(kind)
    }

    /// `()`, `(e)` or `(a, b)`, decided after the first element.
    fn parse_parenthesized(&mut self) -> SyntaxKind {
        let checkpoint = self.checkpoint();
        self.open_delimiter();

        let kind = if self.at(ParenClose) {
            UnitExpression
        } else {
            self.parse_expr();
            if self.at(Comma) {
                while self.eat(Comma) {
                    if self.at(ParenClose) || !self.at_expression_start() {
                        break;
                    }
                    self.parse_expr();
                }
                TupleExpression
            } else {
                ParenthesizedExpression
            }
        };
        if kind != UnitExpression {
            self.resolved(
                Conflict::TupleOrParenthesized,
                if kind == TupleExpression { "tuple" } else { "parenthesized" },
            );
        }

        self.close_delimiter();
        self.start_node_at(checkpoint, kind);
        self.finish_node();
        kind
    }

    /// `[a, b]` or `[value; length]`.
    fn parse_array(&mut self) -> SyntaxKind {
        self.start_node(ArrayExpression);
        self.open_delimiter();
        if !self.at(BracketClose) {
            self.parse_expr();
            if self.eat(Semicolon) {
                self.parse_expr();
            } else {
                while self.eat(Comma) {
                    if self.at(BracketClose) || !self.at_expression_start() {
                        break;
                    }
                    self.parse_expr();
                }
            }
        }
        self.close_delimiter();
        self.finish_node();
        ArrayExpression
    }

    /// `unsafe { }`, `async move { }`, `const { }`, `try { }`.
    fn parse_prefixed_block(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.start_node(kind);
        self.bump();
        if kind == AsyncBlock {
            self.eat(MoveKw);
        }
        self.parse_block();
        self.finish_node();
        kind
    }

    fn parse_break(&mut self, r: Restrictions) -> SyntaxKind {
        self.start_node(BreakExpression);
        self.bump();
        if self.at(LifetimeName) {
            self.token_node(Label);
        }
        if self.at_jump_value(r) {
            self.expr_bp(0, Restrictions { stmt: false, ..r });
        }
        self.finish_node();
        BreakExpression
    }

    fn parse_jump_with_value(&mut self, kind: SyntaxKind, r: Restrictions) -> SyntaxKind {
        self.start_node(kind);
        self.bump();
        if self.at_jump_value(r) {
            self.expr_bp(0, Restrictions { stmt: false, ..r });
        }
        self.finish_node();
        kind
    }

    fn at_jump_value(&mut self, r: Restrictions) -> bool {
        if r.no_struct && self.at(BraceOpen) {
            return false;
        }
        self.at_expression_start()
    }

    /// Path, then a macro invocation, struct literal or plain path expression.
    fn parse_path_expression(&mut self, r: Restrictions) -> SyntaxKind {
        let checkpoint = self.checkpoint();
        self.parse_path(PathMode::Expr);

        if self.at(Bang) && matches!(self.nth(1), ParenOpen | BracketOpen | BraceOpen) {
            self.start_node_at(checkpoint, MacroInvocation);
            self.bump();
            self.parse_token_tree();
            self.finish_node();
            return MacroInvocation;
        }

        if self.at_struct_literal(r.no_struct) {
            self.start_node_at(checkpoint, StructExpression);
            self.parse_field_initializer_list();
            self.finish_node();
            return StructExpression;
        }

        self.start_node_at(checkpoint, PathExpression);
        self.finish_node();
        PathExpression
    }

    fn parse_field_initializer_list(&mut self) {
        self.start_node(FieldInitializerList);
        self.open_delimiter();
        self.comma_list(BraceClose, "a field initializer", |p| p.parse_field_initializer());
        self.close_delimiter();
        self.finish_node();
    }

    fn parse_field_initializer(&mut self) {
        if self.at(DotDot) {
            self.start_node(BaseFieldInitializer);
            self.bump();
            self.parse_expr();
            self.finish_node();
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_outer_attributes();
        let named = matches!(self.current(), Ident | IntNumber) && self.next_is(Colon);
        if named {
            self.start_node_at(checkpoint, FieldInitializer);
            self.bump();
            self.bump();
            self.parse_expr();
            self.finish_node();
        } else if self.at(Ident) {
            self.start_node_at(checkpoint, ShorthandFieldInitializer);
            self.bump();
            self.finish_node();
        }
    }
}
