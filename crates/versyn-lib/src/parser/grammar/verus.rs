//! Verification overlay productions.
//!
//! Nothing here is reachable from a base-language parse: every entry point is
//! guarded by a resolver that checks the overlay first.

use rowan::Checkpoint;

use crate::diagnostics::DiagnosticKind;
use crate::language::Tier;
use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind::{self, *};
use crate::parser::grammar::{PathMode, Restrictions};

impl Parser<'_, '_> {
    /// `ghost` or `tracked`, already resolved by `at_data_mode`.
    pub(super) fn parse_data_mode(&mut self) {
        self.start_node(DataMode);
        let kw = if self.current_text() == "ghost" {
            GhostKw
        } else {
            TrackedKw
        };
        self.bump_as(kw);
        self.finish_node();
    }

    fn at_function_mode(&mut self) -> bool {
        [OpenKw, ClosedKw, BroadcastKw, SpecKw, ProofKw, ExecKw]
            .into_iter()
            .any(|kw| self.at_contextual(kw))
    }

    /// `[open|closed] [broadcast] (spec[(checked)] | proof | exec)`.
    pub(super) fn parse_function_mode(&mut self) {
        if !self.at_function_mode() {
            return;
        }
        self.start_node(FunctionMode);
        if !self.eat_contextual(OpenKw) {
            self.eat_contextual(ClosedKw);
        }
        self.eat_contextual(BroadcastKw);
        if self.eat_contextual(SpecKw) {
            if self.at(ParenOpen) && self.nth_is_contextual(1, CheckedKw) {
                self.bump();
                self.bump_as(CheckedKw);
                self.expect(ParenClose, "`)`");
            }
        } else if !self.eat_contextual(ProofKw) && !self.eat_contextual(ExecKw) {
            self.error_msg(
                DiagnosticKind::UnexpectedToken,
                "expected `spec`, `proof` or `exec`",
            );
        }
        self.finish_node();
    }

    /// `-> (name: Type)`, after `at_named_return` said so.
    pub(super) fn parse_named_return(&mut self) {
        self.start_node(NamedReturn);
        self.open_delimiter();
        if self.at_data_mode(false) {
            self.parse_data_mode();
        }
        self.expect_name();
        self.expect(Colon, "`:`");
        self.parse_type();
        self.close_delimiter();
        self.finish_node();
    }

    /// Specification clauses after a signature.
    pub(super) fn parse_spec_clauses(&mut self) {
        while self.at_spec_clause() {
            self.parse_clause();
        }
    }

    /// Specification clauses between a loop header and its body.
    pub(super) fn parse_loop_clauses(&mut self) {
        while self.at_loop_clause() {
            self.parse_clause();
        }
    }

    fn parse_clause(&mut self) {
        let (kind, kw) = match self.current_text() {
            "requires" => (RequiresClause, RequiresKw),
            "ensures" => (EnsuresClause, EnsuresKw),
            "recommends" => (RecommendsClause, RecommendsKw),
            "decreases" => (DecreasesClause, DecreasesKw),
            "invariant" => (InvariantClause, InvariantKw),
            "invariant_except_break" => (InvariantExceptBreakClause, InvariantExceptBreakKw),
            "invariant_ensures" => (InvariantEnsuresClause, InvariantEnsuresKw),
            "opens_invariants" => (OpensInvariantsClause, OpensInvariantsKw),
            "returns" => (ReturnsClause, ReturnsKw),
            _ => (NoUnwindClause, NoUnwindKw),
        };
        tracing::trace!(clause = ?kind, "specification clause");

        self.start_node(kind);
        self.bump_as(kw);
        match kind {
            DecreasesClause => {
                self.parse_clause_expressions();
                if self.eat_contextual(WhenKw) {
                    self.parse_expr_no_struct();
                }
                if self.eat_contextual(ViaKw) {
                    self.parse_path(PathMode::Expr);
                }
            }
            OpensInvariantsClause => self.parse_opens_invariants(),
            ReturnsClause => {
                self.parse_expr_no_struct();
            }
            NoUnwindClause => {
                if self.eat_contextual(WhenKw) {
                    self.parse_expr_no_struct();
                }
            }
            _ => self.parse_clause_expressions(),
        }
        self.finish_node();
    }

    /// One or more comma-separated expressions; a trailing comma is allowed.
    fn parse_clause_expressions(&mut self) {
        if self.at(BraceOpen) || !self.at_expression_start() {
            self.error(DiagnosticKind::ExpectedExpression);
            return;
        }
        loop {
            self.parse_expr_no_struct();
            if !self.eat(Comma) {
                break;
            }
            let more = self.at_expression_start()
                && !self.at(BraceOpen)
                && !self.at_spec_clause()
                && !self.at_loop_clause();
            if !more {
                break;
            }
        }
    }

    fn parse_opens_invariants(&mut self) {
        match self.current_text() {
            "any" | "none" if self.at(Ident) => self.bump(),
            _ if self.at(BracketOpen) => {
                self.open_delimiter();
                self.comma_list(BracketClose, "an expression", |p| {
                    if p.at_expression_start() {
                        p.parse_expr();
                    }
                });
                self.close_delimiter();
            }
            _ => self.error_msg(
                DiagnosticKind::UnexpectedToken,
                "expected `any`, `none` or `[`",
            ),
        }
    }

    /// Overlay expression keywords at the cursor.
    pub(super) fn at_verification_atom(&mut self) -> bool {
        if !self.verification() {
            return false;
        }
        if self.at_contextual(AssertKw) {
            return self.next_is(ParenOpen) || self.nth_is_contextual(1, ForallKw);
        }
        if self.at_contextual(AssumeKw) {
            return self.next_is(ParenOpen);
        }
        if self.at_contextual(ProofKw) {
            return self.next_is(BraceOpen);
        }
        self.at_quantifier()
    }

    pub(super) fn parse_verification_atom(&mut self, r: Restrictions) -> Option<SyntaxKind> {
        let kind = if self.at_contextual(AssertKw) {
            if self.nth_is_contextual(1, ForallKw) {
                self.parse_assert_forall()
            } else {
                self.parse_assert()
            }
        } else if self.at_contextual(AssumeKw) {
            self.start_node(AssumeExpression);
            self.bump_as(AssumeKw);
            self.parse_parenthesized_condition();
            self.finish_node();
            AssumeExpression
        } else if self.at_contextual(ProofKw) {
            self.start_node(ProofBlock);
            self.bump_as(ProofKw);
            self.parse_block();
            self.finish_node();
            ProofBlock
        } else {
            self.parse_quantifier(r)
        };
        Some(kind)
    }

    fn parse_parenthesized_condition(&mut self) {
        if !self.at(ParenOpen) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `(`");
            return;
        }
        self.open_delimiter();
        self.parse_expr();
        self.close_delimiter();
    }

    /// `assert(cond) [by [(solver)] [requires ...] [{ proof }]]`.
    fn parse_assert(&mut self) -> SyntaxKind {
        self.start_node(AssertExpression);
        self.bump_as(AssertKw);
        self.parse_parenthesized_condition();
        if self.at_assert_by() {
            self.bump_as(ByKw);
            if self.at(ParenOpen) {
                self.open_delimiter();
                self.expect_name();
                self.close_delimiter();
            }
            if self.at_contextual(RequiresKw) {
                self.parse_clause();
            }
            if self.at(BraceOpen) {
                self.parse_block();
            }
        }
        self.finish_node();
        AssertExpression
    }

    /// `assert forall |x| cond [implies consequence] [by { proof }]`.
    fn parse_assert_forall(&mut self) -> SyntaxKind {
        self.start_node(AssertForallExpression);
        self.bump_as(AssertKw);
        self.bump_as(ForallKw);
        self.parse_closure_parameters();
        self.parse_inner_attributes();
        self.parse_expr_no_struct();
        if self.eat_contextual(ImpliesKw) {
            self.parse_expr_no_struct();
        }
        if self.eat_contextual(ByKw) {
            self.parse_block();
        }
        self.finish_node();
        AssertForallExpression
    }

    /// `forall|x: T| #![trigger f(x)] body`, binding as loosely as a closure.
    fn parse_quantifier(&mut self, r: Restrictions) -> SyntaxKind {
        let kw = match self.current_text() {
            "forall" => ForallKw,
            "exists" => ExistsKw,
            _ => ChooseKw,
        };
        self.start_node(QuantifierExpression);
        self.bump_as(kw);
        self.parse_closure_parameters();
        self.parse_inner_attributes();
        let (_, r_bp) = self.bp(Tier::Closure);
        self.expr_bp(
            r_bp,
            Restrictions {
                stmt: false,
                ..r
            },
        );
        self.finish_node();
        QuantifierExpression
    }

    /// `&&& a &&& b` or `||| a ||| b`: one node, one operand per connective.
    pub(super) fn parse_big_connective(&mut self, op: SyntaxKind, r: Restrictions) -> SyntaxKind {
        let kind = if op == BigAnd {
            BigAndExpression
        } else {
            BigOrExpression
        };
        let (_, r_bp) = self.bp(Tier::BigConnective);
        self.start_node(kind);
        while self.eat(op) {
            self.expr_bp(
                r_bp,
                Restrictions {
                    stmt: false,
                    ..r
                },
            );
        }
        self.finish_node();
        kind
    }

    /// `[pub] broadcast group name { path, ... }`.
    pub(super) fn parse_broadcast_group(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, BroadcastGroup);
        self.bump_as(BroadcastKw);
        self.bump_as(GroupKw);
        self.expect_name();
        if self.at(BraceOpen) {
            self.open_delimiter();
            self.comma_list(BraceClose, "a path", |p| {
                p.parse_path_if_present();
            });
            self.close_delimiter();
        } else {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `{`");
        }
        self.finish_node();
    }

    /// `broadcast use path, ...;`.
    pub(super) fn parse_broadcast_use(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, BroadcastUse);
        self.bump_as(BroadcastKw);
        self.bump();
        loop {
            if !self.parse_path_if_present() {
                self.error(DiagnosticKind::ExpectedIdentifier);
                break;
            }
            if !self.eat(Comma) || self.at(Semicolon) {
                break;
            }
        }
        self.expect(Semicolon, "`;`");
        self.finish_node();
    }

    /// `global size_of T == n;` or `global layout T is size == n, align == m;`.
    pub(super) fn parse_global_item(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, GlobalItem);
        self.bump_as(GlobalKw);
        if self.eat_contextual(SizeOfKw) {
            self.parse_type();
            self.expect(EqEq, "`==`");
            self.parse_expr();
        } else if self.eat_contextual(LayoutKw) {
            self.parse_type();
            if self.at(Ident) && self.current_text() == "is" {
                self.bump();
            } else {
                self.error_msg(DiagnosticKind::UnexpectedToken, "expected `is`");
            }
            loop {
                self.expect_name();
                self.expect(EqEq, "`==`");
                self.parse_expr();
                if !self.eat(Comma) {
                    break;
                }
            }
        } else {
            self.error_msg(
                DiagnosticKind::UnexpectedToken,
                "expected `size_of` or `layout`",
            );
        }
        self.expect(Semicolon, "`;`");
        self.finish_node();
    }
}
