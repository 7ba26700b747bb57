//! Blocks and control flow.

use rowan::Checkpoint;

use crate::diagnostics::DiagnosticKind;
use crate::language::Tier;
use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind::{self, *};
use crate::parser::cst::token_sets::PATTERN_FIRST;
use crate::parser::grammar::Restrictions;

impl Parser<'_, '_> {
    pub(super) fn parse_block(&mut self) {
        if !self.at(BraceOpen) {
            self.error(DiagnosticKind::ExpectedBlock);
            return;
        }
        self.start_node(Block);
        self.parse_block_body();
        self.finish_node();
    }

    fn parse_block_body(&mut self) {
        self.open_delimiter();
        self.parse_statements(Some(BraceClose));
        self.close_delimiter();
    }

    /// `'label: loop/while/for/{ }`. The label sits inside the labeled node.
    pub(super) fn parse_labeled(&mut self) -> SyntaxKind {
        let checkpoint = self.checkpoint();
        self.token_node(Label);
        self.bump();
        match self.current() {
            LoopKw | WhileKw | ForKw => self.parse_loop_like(checkpoint),
            BraceOpen => {
                self.start_node_at(checkpoint, Block);
                self.parse_block_body();
                self.finish_node();
                Block
            }
            _ => {
                self.error(DiagnosticKind::ExpectedBlock);
                self.start_node_at(checkpoint, Block);
                self.finish_node();
                Block
            }
        }
    }

    /// `loop`, `while` or `for`, wrapped from `checkpoint` so a preceding
    /// label becomes part of the node.
    pub(super) fn parse_loop_like(&mut self, checkpoint: Checkpoint) -> SyntaxKind {
        let kind = match self.current() {
            LoopKw => LoopExpression,
            WhileKw => WhileExpression,
            _ => ForExpression,
        };
        self.start_node_at(checkpoint, kind);
        self.bump();
        match kind {
            WhileExpression => self.parse_condition(),
            ForExpression => {
                self.parse_pattern();
                self.expect(InKw, "`in`");
                self.parse_expr_no_struct();
            }
            _ => {}
        }
        self.parse_loop_clauses();
        self.parse_block();
        self.finish_node();
        kind
    }

    pub(super) fn parse_if(&mut self) -> SyntaxKind {
        self.start_node(IfExpression);
        self.bump();
        self.parse_condition();
        self.parse_block();
        if self.at(ElseKw) {
            self.start_node(ElseClause);
            self.bump();
            if self.at(IfKw) {
                self.parse_if();
            } else {
                self.parse_block();
            }
            self.finish_node();
        }
        self.finish_node();
        IfExpression
    }

    /// Condition of `if`/`while`/match guards: an expression, a
    /// `let` condition, or a `&&` chain containing `let` conditions.
    pub(super) fn parse_condition(&mut self) {
        if !self.condition_has_let() {
            self.parse_expr_no_struct();
            return;
        }

        let (_, part_bp) = self.bp(Tier::And);
        let checkpoint = self.checkpoint();
        let mut parts = 0;
        loop {
            parts += 1;
            if self.at(LetKw) {
                self.parse_let_condition(part_bp);
            } else {
                self.expr_bp(part_bp, Restrictions::no_struct());
            }
            if !self.eat(AmpAmp) {
                break;
            }
        }
        if parts > 1 {
            self.start_node_at(checkpoint, LetChain);
            self.finish_node();
        }
    }

    fn parse_let_condition(&mut self, value_bp: u8) {
        self.start_node(LetCondition);
        self.bump();
        self.parse_pattern();
        self.expect(Eq, "`=`");
        self.expr_bp(value_bp, Restrictions::no_struct());
        self.finish_node();
    }

    pub(super) fn parse_match(&mut self) -> SyntaxKind {
        self.start_node(MatchExpression);
        self.bump();
        self.parse_expr_no_struct();

        if !self.at(BraceOpen) {
            self.error(DiagnosticKind::ExpectedBlock);
            self.finish_node();
            return MatchExpression;
        }
        self.start_node(MatchBlock);
        self.open_delimiter();
        while !self.at(BraceClose) && !self.should_stop() && !self.at_outer_closer() {
            if !self.at_any(PATTERN_FIRST) && !self.at(Pound) {
                self.error_and_bump(DiagnosticKind::ExpectedPattern);
                continue;
            }
            self.parse_match_arm();
        }
        self.close_delimiter();
        self.finish_node();

        self.finish_node();
        MatchExpression
    }

    fn parse_match_arm(&mut self) {
        self.start_node(MatchArm);
        self.parse_outer_attributes();

        self.start_node(MatchPattern);
        self.parse_pattern();
        if self.eat(IfKw) {
            self.parse_condition();
        }
        self.finish_node();

        self.expect(FatArrow, "`=>`");
        let value = self.expr_bp(0, Restrictions::statement());
        let ends_with_brace = self.prev_kind() == Some(BraceClose);
        if !self.eat(Comma) && !self.at(BraceClose) {
            let block_like = value.is_some_and(|k| k.is_block_like()) || ends_with_brace;
            if !block_like {
                self.error_msg(DiagnosticKind::UnexpectedToken, "expected `,`");
            }
        }
        self.finish_node();
    }
}
