//! `macro_rules!` definitions and token trees.
//!
//! Token trees are kept flat apart from nested delimiters, `$( .. )`
//! repetitions and literals, which keep their own nodes so that strings
//! spanning several tokens stay intact.

use rowan::Checkpoint;

use crate::diagnostics::DiagnosticKind;
use crate::language::rules::FRAGMENT_SPECIFIERS;
use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind::{self, *};

impl Parser<'_, '_> {
    /// `( .. )`, `[ .. ]` or `{ .. }` of arbitrary tokens.
    pub(super) fn parse_token_tree(&mut self) {
        let Some(close) = self.current().closing_delimiter() else {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `(`, `[` or `{`");
            return;
        };
        self.start_node(TokenTree);
        self.open_delimiter();
        self.parse_tree_tokens(close, false);
        self.close_delimiter();
        self.finish_node();
    }

    /// Matcher side of a macro rule.
    fn parse_token_tree_pattern(&mut self) {
        let Some(close) = self.current().closing_delimiter() else {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `(`, `[` or `{`");
            return;
        };
        self.start_node(TokenTreePattern);
        self.open_delimiter();
        self.parse_tree_tokens(close, true);
        self.close_delimiter();
        self.finish_node();
    }

    /// Tokens up to `close`. In a matcher, `$name:fragment` becomes a binding.
    fn parse_tree_tokens(&mut self, close: SyntaxKind, matcher: bool) {
        while !self.at(close) && !self.should_stop() {
            match self.current() {
                ParenOpen | BracketOpen | BraceOpen if matcher => self.parse_token_tree_pattern(),
                ParenOpen | BracketOpen | BraceOpen => self.parse_token_tree(),
                ParenClose | BracketClose | BraceClose => {
                    if self.at_outer_closer() {
                        break;
                    }
                    self.error_and_bump_msg(
                        DiagnosticKind::MismatchedDelimiter,
                        "no matching opener",
                    );
                }
                Dollar if self.next_is(ParenOpen) => self.parse_token_repetition(matcher),
                Metavariable if matcher && self.next_is(Colon) => self.parse_token_binding(),
                IntNumber | FloatNumber | CharToken | TrueKw | FalseKw | StringStart
                | RawStringStart => {
                    self.parse_literal();
                }
                LifetimeName => self.token_node(Lifetime),
                ErrorSentinel => self.error_and_bump(DiagnosticKind::LexicalError),
                _ => self.bump(),
            }
        }
    }

    /// `$( .. ) sep? op` where `op` is `*`, `+` or `?`.
    fn parse_token_repetition(&mut self, matcher: bool) {
        self.start_node(if matcher { TokenRepetitionPattern } else { TokenRepetition });
        self.bump();
        self.open_delimiter();
        self.parse_tree_tokens(ParenClose, matcher);
        self.close_delimiter();

        let at_op = |p: &mut Self| matches!(p.current(), Star | Plus | Question);
        if !at_op(self) && !self.current().is_delimiter() && !self.should_stop() {
            self.bump();
        }
        if at_op(self) {
            self.bump();
        } else {
            self.error_msg(
                DiagnosticKind::UnexpectedToken,
                "expected `*`, `+` or `?`",
            );
        }
        self.finish_node();
    }

    /// `$name:fragment`.
    fn parse_token_binding(&mut self) {
        self.start_node(TokenBindingPattern);
        self.bump();
        self.bump();
        if self.at(Ident) {
            let name = self.current_text();
            let span = self.current_span();
            self.token_node(FragmentSpecifier);
            if !FRAGMENT_SPECIFIERS.contains(&name) {
                self.error_at(DiagnosticKind::UnknownFragmentSpecifier, span, name);
            }
        } else {
            self.error(DiagnosticKind::ExpectedIdentifier);
        }
        self.finish_node();
    }

    /// `macro_rules! name { (matcher) => { transcriber }; .. }`.
    ///
    /// Parenthesized and bracketed bodies must be followed by `;`.
    pub(super) fn parse_macro_definition(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, MacroDefinition);
        self.bump_as(MacroRulesKw);
        self.expect(Bang, "`!`");
        self.expect_name();

        let Some(close) = self.current().closing_delimiter() else {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `{`");
            self.finish_node();
            return;
        };
        self.open_delimiter();
        while !self.at(close) && !self.should_stop() && !self.at_outer_closer() {
            if self.current().closing_delimiter().is_none() {
                self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, "expected a macro rule");
                continue;
            }
            self.parse_macro_rule();
            if !self.eat(Semicolon) {
                break;
            }
        }
        self.close_delimiter();
        if close != BraceClose {
            self.expect(Semicolon, "`;`");
        }
        self.finish_node();
    }

    fn parse_macro_rule(&mut self) {
        self.start_node(MacroRule);
        self.parse_token_tree_pattern();
        self.expect(FatArrow, "`=>`");
        self.parse_token_tree();
        self.finish_node();
    }
}
