//! Attributes and visibility modifiers.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind::*;
use crate::parser::cst::TokenSet;
use crate::parser::grammar::PathMode;

/// Where a malformed attribute body resynchronizes.
const ATTRIBUTE_RECOVERY: TokenSet =
    TokenSet::new(&[BracketClose, BraceOpen, BraceClose, Semicolon]);

impl Parser<'_, '_> {
    /// `#[attr]` or `#![attr]`.
    pub(super) fn parse_attribute_item(&mut self) {
        self.assert_current(Pound);
        let inner = self.next_is(Bang);
        self.start_node(if inner { InnerAttributeItem } else { AttributeItem });
        self.bump();
        if inner {
            self.bump();
        }
        if !self.at(BracketOpen) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `[`");
            self.finish_node();
            return;
        }
        self.open_delimiter();
        self.parse_attribute();
        if !self.at(BracketClose) {
            self.error_recover(
                DiagnosticKind::UnexpectedToken,
                "expected `]`",
                ATTRIBUTE_RECOVERY,
            );
        }
        self.close_delimiter();
        self.finish_node();
    }

    /// `path`, `path = expr`, `path(tokens)` or, with the overlay,
    /// `path expr, expr` as in `#![trigger f(x)]`.
    fn parse_attribute(&mut self) {
        self.start_node(Attribute);
        self.parse_path(PathMode::Expr);
        match self.current() {
            Eq => {
                self.bump();
                self.parse_expr();
            }
            ParenOpen | BracketOpen | BraceOpen => self.parse_token_tree(),
            BracketClose => {}
            _ if self.verification() && self.at_expression_start() => loop {
                self.parse_expr();
                if !self.eat(Comma) {
                    break;
                }
            },
            _ => {}
        }
        self.finish_node();
    }

    pub(super) fn parse_outer_attributes(&mut self) {
        while self.at(Pound) && self.next_is(BracketOpen) {
            self.parse_attribute_item();
        }
    }

    pub(super) fn parse_inner_attributes(&mut self) {
        while self.at(Pound) && self.next_is(Bang) && self.nth(2) == BracketOpen {
            self.parse_attribute_item();
        }
    }

    /// `pub`, `pub(crate)`, `pub(self)`, `pub(super)` or `pub(in path)`.
    pub(super) fn parse_visibility(&mut self) {
        self.start_node(VisibilityModifier);
        let restricted = self.at_restricted_visibility();
        self.bump();
        if restricted {
            self.open_delimiter();
            if self.eat(InKw) {
                self.parse_path(PathMode::Expr);
            } else {
                self.bump();
            }
            self.close_delimiter();
        }
        self.finish_node();
    }
}
