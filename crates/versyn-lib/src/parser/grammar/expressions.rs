//! Pratt loop over the language's precedence table.
//!
//! Binding powers come from [`PrecedenceTable::binding_power`]; the loop itself
//! knows nothing about individual tiers beyond the node each operator builds.
//!
//! [`PrecedenceTable::binding_power`]: crate::language::PrecedenceTable::binding_power

use rowan::Checkpoint;

use crate::diagnostics::DiagnosticKind;
use crate::language::{Assoc, Tier};
use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind::{self, *};
use crate::parser::cst::token_sets::{ASSIGNMENT_OPS, EXPR_FIRST};

/// Context flags that change how an expression may continue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Restrictions {
    /// `Path {` is not a struct literal (conditions, scrutinees, clauses).
    pub no_struct: bool,
    /// Statement position: a block-like expression ends the statement unless
    /// followed by `.` or `?`.
    pub stmt: bool,
}

impl Restrictions {
    pub fn statement() -> Self {
        Self {
            no_struct: false,
            stmt: true,
        }
    }

    pub fn no_struct() -> Self {
        Self {
            no_struct: true,
            stmt: false,
        }
    }

    /// Restrictions for an operand nested inside the current expression.
    fn operand(self) -> Self {
        Self {
            no_struct: self.no_struct,
            stmt: false,
        }
    }
}

impl Parser<'_, '_> {
    pub(super) fn parse_expr(&mut self) -> Option<SyntaxKind> {
        self.expr_bp(0, Restrictions::default())
    }

    pub(super) fn parse_expr_no_struct(&mut self) -> Option<SyntaxKind> {
        self.expr_bp(0, Restrictions::no_struct())
    }

    /// Left and right binding power of a tier present in this language.
    pub(super) fn bp(&self, tier: Tier) -> (u8, u8) {
        self.lang.precedence().binding_power(tier).unwrap_or((0, 0))
    }

    /// Parses an expression whose operators bind at least `min_bp`.
    ///
    /// Returns the kind of the outermost node, or `None` (after reporting)
    /// when no expression starts here.
    pub(super) fn expr_bp(&mut self, min_bp: u8, r: Restrictions) -> Option<SyntaxKind> {
        if !self.enter_recursion() {
            return None;
        }
        let result = self.expr_bp_inner(min_bp, r);
        self.exit_recursion();
        result
    }

    fn expr_bp_inner(&mut self, min_bp: u8, r: Restrictions) -> Option<SyntaxKind> {
        let checkpoint = self.checkpoint();
        let Some(mut lhs) = self.parse_prefix(r) else {
            self.error(DiagnosticKind::ExpectedExpression);
            return None;
        };

        let lang = self.lang;
        let table = lang.precedence();
        let mut chained: Option<(Tier, SyntaxKind)> = None;

        loop {
            if self.has_fatal_error() {
                break;
            }
            let current = self.current();

            if r.stmt && lhs.is_block_like() && !matches!(current, Dot | Question) {
                break;
            }

            if let Some(op) = table.postfix(current) {
                let (l_bp, _) = self.bp(op.tier);
                if l_bp < min_bp {
                    break;
                }
                lhs = self.parse_postfix(checkpoint, current);
                continue;
            }

            let Some(op) = table.infix(current) else {
                break;
            };
            let (l_bp, r_bp) = self.bp(op.tier);
            if l_bp < min_bp {
                break;
            }

            if op.assoc == Assoc::None {
                if let Some((tier, first)) = chained
                    && tier == op.tier
                    && !table.allows_chained_comparison(first, current)
                {
                    self.error_msg(DiagnosticKind::ChainedNonAssociative, op.text);
                }
                chained = Some((op.tier, current));
            }

            lhs = self.parse_infix(checkpoint, current, r_bp, r.operand());
        }

        Some(lhs)
    }

    fn parse_infix(
        &mut self,
        checkpoint: Checkpoint,
        op: SyntaxKind,
        r_bp: u8,
        r: Restrictions,
    ) -> SyntaxKind {
        let kind = match op {
            AsKw => CastExpression,
            Eq => AssignmentExpression,
            DotDot | DotDotEq => RangeExpression,
            _ if ASSIGNMENT_OPS.contains(op) => CompoundAssignmentExpr,
            _ => BinaryExpression,
        };
        self.start_node_at(checkpoint, kind);
        self.bump();
        match kind {
            CastExpression => {
                self.parse_type();
            }
            RangeExpression => {
                if self.at_range_end(r) {
                    self.expr_bp(r_bp, r);
                }
            }
            _ => {
                self.expr_bp(r_bp, r);
            }
        }
        self.finish_node();
        kind
    }

    fn parse_postfix(&mut self, checkpoint: Checkpoint, op: SyntaxKind) -> SyntaxKind {
        match op {
            Question => {
                self.start_node_at(checkpoint, TryExpression);
                self.bump();
                self.finish_node();
                TryExpression
            }
            At => {
                self.start_node_at(checkpoint, ViewExpression);
                self.bump();
                self.finish_node();
                ViewExpression
            }
            Dot => self.parse_dot_postfix(checkpoint),
            ParenOpen => {
                self.start_node_at(checkpoint, CallExpression);
                self.parse_arguments();
                self.finish_node();
                CallExpression
            }
            BracketOpen => {
                self.start_node_at(checkpoint, IndexExpression);
                self.open_delimiter();
                self.parse_expr();
                self.close_delimiter();
                self.finish_node();
                IndexExpression
            }
            _ => unreachable!("parse_postfix: `{op:?}` is not a postfix operator"),
        }
    }

    /// `.await`, `.field`, `.0` and `.method::<T>`.
    fn parse_dot_postfix(&mut self, checkpoint: Checkpoint) -> SyntaxKind {
        if self.next_is(AwaitKw) {
            self.start_node_at(checkpoint, AwaitExpression);
            self.bump();
            self.bump();
            self.finish_node();
            return AwaitExpression;
        }

        self.start_node_at(checkpoint, FieldExpression);
        self.bump();
        if !self.eat(Ident) && !self.eat(IntNumber) {
            self.error(DiagnosticKind::ExpectedIdentifier);
        }
        self.finish_node();

        if !self.at_turbofish() {
            return FieldExpression;
        }
        self.start_node_at(checkpoint, GenericFunction);
        self.bump();
        self.parse_type_arguments();
        self.finish_node();
        GenericFunction
    }

    /// Prefix operators, closures, prefix ranges, then atoms.
    fn parse_prefix(&mut self, r: Restrictions) -> Option<SyntaxKind> {
        let current = self.current();
        let lang = self.lang;
        let table = lang.precedence();

        if current == AmpAmp {
            self.split_current();
            return Some(self.parse_reference_expression(r));
        }
        if current == AsyncKw && matches!(self.nth(1), Pipe | PipePipe | MoveKw) {
            return Some(self.parse_closure(r));
        }
        if current == StaticKw {
            return Some(self.parse_closure(r));
        }
        if matches!(current, DotDot | DotDotEq) {
            return Some(self.parse_prefix_range(r));
        }

        if let Some(op) = table.prefix(current) {
            return Some(match op.tier {
                Tier::Closure => self.parse_closure(r),
                Tier::BigConnective => self.parse_big_connective(current, r),
                _ if current == Amp => self.parse_reference_expression(r),
                _ => {
                    let (_, r_bp) = self.bp(op.tier);
                    self.start_node(UnaryExpression);
                    self.bump();
                    self.expr_bp(r_bp, r.operand());
                    self.finish_node();
                    UnaryExpression
                }
            });
        }

        self.parse_atom(r)
    }

    fn parse_reference_expression(&mut self, r: Restrictions) -> SyntaxKind {
        let (_, r_bp) = self.bp(Tier::Unary);
        self.start_node(ReferenceExpression);
        self.bump();
        self.eat(MutKw);
        self.expr_bp(r_bp, r.operand());
        self.finish_node();
        ReferenceExpression
    }

    fn parse_prefix_range(&mut self, r: Restrictions) -> SyntaxKind {
        let (_, r_bp) = self.bp(Tier::Range);
        self.start_node(RangeExpression);
        self.bump();
        if self.at_range_end(r) {
            self.expr_bp(r_bp, r.operand());
        }
        self.finish_node();
        RangeExpression
    }

    /// Whether a range operator has a right operand.
    fn at_range_end(&mut self, r: Restrictions) -> bool {
        if r.no_struct && self.at(BraceOpen) {
            return false;
        }
        self.at_any(EXPR_FIRST)
    }

    /// `|params| body`, `move |x| ...`, `async move || ...`, `|| -> T { ... }`.
    pub(super) fn parse_closure(&mut self, r: Restrictions) -> SyntaxKind {
        self.start_node(ClosureExpression);
        self.eat(StaticKw);
        self.eat(AsyncKw);
        self.eat(MoveKw);
        self.parse_closure_parameters();
        if self.at(Arrow) {
            self.parse_return_type();
            self.parse_block();
        } else {
            let (_, r_bp) = self.bp(Tier::Closure);
            self.expr_bp(r_bp, r.operand());
        }
        self.finish_node();
        ClosureExpression
    }

    pub(super) fn parse_closure_parameters(&mut self) {
        self.start_node(ClosureParameters);
        if self.eat(PipePipe) {
            self.finish_node();
            return;
        }
        if !self.expect(Pipe, "`|`") {
            self.finish_node();
            return;
        }
        while !self.at(Pipe) && !self.should_stop() {
            let before = self.progress_mark();
            self.parse_closure_parameter();
            if self.progress_mark() == before {
                break;
            }
            if !self.eat(Comma) {
                break;
            }
        }
        self.expect(Pipe, "`|`");
        self.finish_node();
    }

    fn parse_closure_parameter(&mut self) {
        self.parse_outer_attributes();
        let checkpoint = self.checkpoint();
        if !self.parse_single_pattern() {
            return;
        }
        if self.at(Colon) {
            self.start_node_at(checkpoint, Parameter);
            self.bump();
            self.parse_type();
            self.finish_node();
        }
    }

    /// `( [#[attr]] expr, ... )` after a callee.
    pub(super) fn parse_arguments(&mut self) {
        self.start_node(Arguments);
        self.open_delimiter();
        self.comma_list(ParenClose, "an argument", |p| {
            p.parse_outer_attributes();
            if p.at_expression_start() {
                p.parse_expr();
            }
        });
        self.close_delimiter();
        self.finish_node();
    }
}
