//! Patterns.

use rowan::Checkpoint;

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind::{self, *};
use crate::parser::cst::token_sets::{LITERAL_FIRST, PATH_FIRST, PATTERN_FIRST};
use crate::parser::grammar::PathMode;

impl Parser<'_, '_> {
    /// Pattern with alternatives. `a | b | c` nests to the left and a
    /// leading `|` is allowed.
    pub(super) fn parse_pattern(&mut self) {
        let checkpoint = self.checkpoint();
        let leading = self.eat(Pipe);
        if !self.parse_single_pattern() {
            return;
        }
        if leading && !self.at(Pipe) {
            self.start_node_at(checkpoint, OrPattern);
            self.finish_node();
            return;
        }
        while self.at(Pipe) {
            self.start_node_at(checkpoint, OrPattern);
            self.bump();
            self.parse_single_pattern();
            self.finish_node();
        }
    }

    /// Pattern without top-level alternatives.
    pub(super) fn parse_single_pattern(&mut self) -> bool {
        if !self.enter_recursion() {
            return false;
        }
        let parsed = self.parse_single_pattern_inner();
        self.exit_recursion();
        parsed
    }

    fn parse_single_pattern_inner(&mut self) -> bool {
        match self.current() {
            Underscore => self.token_node(WildcardPattern),
            DotDot => self.token_node(RestPattern),
            Amp | AmpAmp => {
                self.start_node(ReferencePattern);
                self.bump();
                self.eat(MutKw);
                self.parse_single_pattern();
                self.finish_node();
            }
            ParenOpen => self.parse_delimited_patterns(TuplePattern, ParenClose),
            BracketOpen => self.parse_delimited_patterns(SlicePattern, BracketClose),
            Minus => self.parse_literal_or_range_pattern(),
            kind if LITERAL_FIRST.contains(kind) => self.parse_literal_or_range_pattern(),
            RefKw | MutKw => self.parse_identifier_pattern(),
            Ident if self.at_identifier_pattern() => self.parse_identifier_pattern(),
            kind if PATH_FIRST.contains(kind) => self.parse_path_pattern(),
            _ => {
                self.error(DiagnosticKind::ExpectedPattern);
                return false;
            }
        }
        true
    }

    /// A binding rather than the start of a path, struct or range pattern.
    fn at_identifier_pattern(&mut self) -> bool {
        if self.at_data_mode(false) {
            return true;
        }
        !matches!(
            self.nth(1),
            ColonColon | ParenOpen | BraceOpen | Bang | DotDot | DotDotEq | DotDotDot
        )
    }

    fn parse_delimited_patterns(&mut self, kind: SyntaxKind, close: SyntaxKind) {
        self.start_node(kind);
        self.open_delimiter();
        self.comma_list(close, "a pattern", |p| {
            if p.at_any(PATTERN_FIRST) {
                p.parse_pattern();
            }
        });
        self.close_delimiter();
        self.finish_node();
    }

    /// `[mode] [ref] [mut] name [@ pattern]`.
    fn parse_identifier_pattern(&mut self) {
        self.start_node(IdentifierPattern);
        if self.at_data_mode(false) {
            self.parse_data_mode();
        }
        self.eat(RefKw);
        self.eat(MutKw);
        self.expect_name();
        if self.eat(At) {
            self.parse_single_pattern();
        }
        self.finish_node();
    }

    fn parse_literal_or_range_pattern(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_literal_pattern();
        self.parse_range_pattern_rest(checkpoint);
    }

    fn parse_literal_pattern(&mut self) {
        self.start_node(LiteralPattern);
        let negative = self.eat(Minus);
        let literal = if negative && !matches!(self.current(), IntNumber | FloatNumber) {
            None
        } else {
            self.parse_literal()
        };
        if literal.is_none() {
            self.error(DiagnosticKind::ExpectedPattern);
        }
        self.finish_node();
    }

    /// `..`, `..=` or `...` and the optional upper bound after a lower bound
    /// that starts at `checkpoint`.
    fn parse_range_pattern_rest(&mut self, checkpoint: Checkpoint) {
        if !matches!(self.current(), DotDot | DotDotEq | DotDotDot) {
            return;
        }
        self.start_node_at(checkpoint, RangePattern);
        self.bump();
        match self.current() {
            Minus => self.parse_literal_pattern(),
            kind if LITERAL_FIRST.contains(kind) => self.parse_literal_pattern(),
            kind if PATH_FIRST.contains(kind) => self.parse_path(PathMode::Expr),
            _ => {}
        }
        self.finish_node();
    }

    /// Patterns that start with a path.
    fn parse_path_pattern(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_path(PathMode::Expr);
        match self.current() {
            Bang if matches!(self.nth(1), ParenOpen | BracketOpen | BraceOpen) => {
                self.start_node_at(checkpoint, MacroInvocation);
                self.bump();
                self.parse_token_tree();
                self.finish_node();
            }
            ParenOpen => {
                self.start_node_at(checkpoint, TupleStructPattern);
                self.open_delimiter();
                self.comma_list(ParenClose, "a pattern", |p| {
                    if p.at_any(PATTERN_FIRST) {
                        p.parse_pattern();
                    }
                });
                self.close_delimiter();
                self.finish_node();
            }
            BraceOpen => {
                self.start_node_at(checkpoint, StructPattern);
                self.open_delimiter();
                self.comma_list(BraceClose, "a field pattern", |p| p.parse_field_pattern());
                self.close_delimiter();
                self.finish_node();
            }
            DotDot | DotDotEq | DotDotDot => self.parse_range_pattern_rest(checkpoint),
            _ => {
                self.start_node_at(checkpoint, PathPattern);
                self.finish_node();
            }
        }
    }

    /// `name`, `ref mut name`, `name: pattern` or `..` inside a struct pattern.
    fn parse_field_pattern(&mut self) {
        if self.at(DotDot) {
            self.token_node(RestPattern);
            return;
        }
        if !matches!(self.current(), Pound | Ident | IntNumber | RefKw | MutKw) {
            return;
        }
        self.start_node(FieldPattern);
        self.parse_outer_attributes();
        if matches!(self.current(), Ident | IntNumber) && self.next_is(Colon) {
            self.bump();
            self.bump();
            self.parse_pattern();
        } else {
            self.eat(RefKw);
            self.eat(MutKw);
            self.expect_name();
        }
        self.finish_node();
    }
}
