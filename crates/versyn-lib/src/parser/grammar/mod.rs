//! Grammar productions for Rust with the verification overlay.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! Every node the parser starts is named after the grammar rule it realizes,
//! and overlay productions are only entered when the language was built with
//! the overlay.

mod atoms;
mod attributes;
mod blocks;
mod expressions;
mod generics;
mod items;
mod macros;
mod patterns;
mod types;
mod verus;

pub(super) use expressions::Restrictions;
pub(super) use types::PathMode;

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind::{self, *};
use crate::parser::cst::token_sets::{EXPR_FIRST, ITEM_RECOVERY, STATEMENT_RECOVERY};

impl Parser<'_, '_> {
    pub(crate) fn parse_root(&mut self) {
        // Leading trivia (including a shebang) belongs to the root.
        self.builder.start_node(SourceFile.into());
        self.parse_statements(None);
        self.skip_trivia_to_buffer();
        self.drain_trivia();
        self.finish_node();
    }

    /// Statements up to `close` (or the end of input for the source file).
    pub(super) fn parse_statements(&mut self, close: Option<SyntaxKind>) {
        loop {
            if self.should_stop() {
                break;
            }
            let current = self.current();
            if Some(current) == close {
                break;
            }
            if current.closing_delimiter().is_none() && current.is_delimiter() {
                if self.at_outer_closer() {
                    break;
                }
                self.error_and_bump_msg(DiagnosticKind::MismatchedDelimiter, "no matching opener");
                continue;
            }

            let before = self.progress_mark();
            self.parse_statement(close);
            if self.progress_mark() == before && !self.should_stop() {
                self.error_and_bump(DiagnosticKind::UnexpectedToken);
            }
        }
    }

    fn parse_statement(&mut self, close: Option<SyntaxKind>) {
        match self.current() {
            Semicolon => {
                self.start_node(EmptyStatement);
                self.bump();
                self.finish_node();
            }
            ErrorSentinel => self.parse_lexical_error(),
            LetKw => self.parse_let_declaration(),
            _ if self.at_item_start() => self.parse_item(),
            _ => self.parse_expression_statement(close),
        }
    }

    /// Unrecognized input: one `Error` node up to the next synchronization point.
    pub(super) fn parse_lexical_error(&mut self) {
        let text = self.current_text();
        let message = format!("`{text}`");
        self.start_node(Error);
        self.error_msg(DiagnosticKind::LexicalError, message);
        self.bump();
        while !self.should_stop()
            && !self.at_any(STATEMENT_RECOVERY)
            && !self.at_any(ITEM_RECOVERY)
            && !self.at(LetKw)
            && !self.at_outer_closer()
        {
            self.bump();
        }
        self.finish_node();
    }

    fn parse_let_declaration(&mut self) {
        self.start_node(LetDeclaration);
        self.bump();
        if self.at_data_mode(true) {
            self.parse_data_mode();
        }
        self.parse_pattern();
        if self.eat(Colon) {
            self.parse_type();
        }
        if self.eat(Eq) {
            self.parse_expr();
            if self.at(ElseKw) {
                self.start_node(ElseClause);
                self.bump();
                self.parse_block();
                self.finish_node();
            }
        }
        self.expect(Semicolon, "`;`");
        self.finish_node();
    }

    fn parse_expression_statement(&mut self, close: Option<SyntaxKind>) {
        let checkpoint = self.checkpoint();
        let Some(kind) = self.expr_bp(0, Restrictions::statement()) else {
            return;
        };

        if self.at(Semicolon) {
            self.start_node_at(checkpoint, ExpressionStatement);
            self.bump();
            self.finish_node();
            return;
        }

        let ends_with_brace = self.prev_kind() == Some(BraceClose);
        if kind == MacroInvocation && ends_with_brace {
            return;
        }
        let ends_with_block = kind.is_block_like()
            || (ends_with_brace && matches!(kind, AssertExpression | AssertForallExpression));
        if ends_with_block {
            self.start_node_at(checkpoint, ExpressionStatement);
            self.finish_node();
            return;
        }

        // Tail expression.
        let at_end = match close {
            Some(close) => self.at(close),
            None => self.at(Eof),
        };
        if at_end || self.at_outer_closer() {
            return;
        }

        self.error_msg(DiagnosticKind::UnexpectedToken, "expected `;`");
        self.start_node_at(checkpoint, ExpressionStatement);
        self.finish_node();
    }

    /// Cursor position after skipping trivia; equal marks mean no progress.
    pub(super) fn progress_mark(&mut self) -> usize {
        self.skip_trivia_to_buffer();
        self.pos
    }

    pub(super) fn at_expression_start(&mut self) -> bool {
        self.at_any(EXPR_FIRST)
    }

    /// Elements separated by `,` up to `close`, trailing comma allowed.
    ///
    /// The opening delimiter must already be consumed. Elements that consume
    /// nothing are reported and skipped.
    pub(super) fn comma_list(
        &mut self,
        close: SyntaxKind,
        what: &str,
        mut element: impl FnMut(&mut Self),
    ) {
        while !self.at(close) && !self.should_stop() {
            if self.at_outer_closer() {
                break;
            }
            let before = self.progress_mark();
            element(self);
            if self.progress_mark() == before {
                if self.at(close) || self.at_outer_closer() || self.should_stop() {
                    break;
                }
                self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, format!("expected {what}"));
                continue;
            }
            if !self.eat(Comma) {
                if self.at(close) || self.at_outer_closer() || self.should_stop() {
                    break;
                }
                self.error_msg(DiagnosticKind::UnexpectedToken, "expected `,`");
            }
        }
    }

    /// Wraps the current token in a node of `kind`.
    pub(super) fn token_node(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.finish_node();
    }

    pub(super) fn expect_name(&mut self) -> bool {
        if self.eat(Ident) {
            return true;
        }
        self.error(DiagnosticKind::ExpectedIdentifier);
        false
    }
}
