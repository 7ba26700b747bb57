//! Generic parameters, bounds and where clauses.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind::*;
use crate::parser::cst::token_sets::TYPE_FIRST;

impl Parser<'_, '_> {
    /// `<'a, T: Bound = Default, const N: usize = 3>`.
    pub(super) fn parse_type_parameters(&mut self) {
        self.start_node(TypeParameters);
        self.expect_split(Lt, "`<`");
        while !self.at_split(Gt) && !self.should_stop() {
            let before = self.progress_mark();
            self.parse_outer_attributes();
            match self.current() {
                LifetimeName => self.parse_lifetime_parameter(),
                ConstKw => self.parse_const_parameter(),
                Ident => self.parse_type_parameter(),
                _ => {}
            }
            if self.progress_mark() == before {
                if self.at_outer_closer() {
                    break;
                }
                self.error_and_bump_msg(
                    DiagnosticKind::UnexpectedToken,
                    "expected a generic parameter",
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

    fn parse_lifetime_parameter(&mut self) {
        self.start_node(LifetimeParameter);
        self.token_node(Lifetime);
        if self.eat(Colon) {
            while self.at(LifetimeName) {
                self.token_node(Lifetime);
                if !self.eat(Plus) {
                    break;
                }
            }
        }
        self.finish_node();
    }

    fn parse_type_parameter(&mut self) {
        self.start_node(TypeParameter);
        self.bump();
        if self.at(Colon) {
            self.parse_trait_bounds();
        }
        if self.eat(Eq) {
            self.parse_type();
        }
        self.finish_node();
    }

    fn parse_const_parameter(&mut self) {
        self.start_node(ConstParameter);
        self.bump();
        self.expect_name();
        self.expect(Colon, "`:`");
        self.parse_type();
        if self.eat(Eq) {
            match self.current() {
                BraceOpen => self.parse_block(),
                Ident => self.bump(),
                _ => {
                    if self.parse_literal().is_none() {
                        self.error(DiagnosticKind::ExpectedExpression);
                    }
                }
            }
        }
        self.finish_node();
    }

    /// `: Bound + 'a + ?Sized`. The bound list may be empty, as in `where T:,`.
    pub(super) fn parse_trait_bounds(&mut self) {
        self.start_node(TraitBounds);
        self.expect(Colon, "`:`");
        if self.at_any(TYPE_FIRST) && !self.at_spec_clause() {
            self.parse_type_bound_list();
        }
        self.finish_node();
    }

    pub(super) fn parse_where_clause(&mut self) {
        self.start_node(WhereClause);
        self.bump();
        while self.at_any(TYPE_FIRST) && !self.at_spec_clause() {
            self.parse_where_predicate();
            if !self.eat(Comma) {
                break;
            }
        }
        self.finish_node();
    }

    fn parse_where_predicate(&mut self) {
        self.start_node(WherePredicate);
        match self.current() {
            LifetimeName => self.token_node(Lifetime),
            ForKw => self.parse_higher_ranked_bound(),
            _ => {
                self.parse_type();
            }
        }
        if self.at(Colon) {
            self.parse_trait_bounds();
        } else {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `:`");
        }
        self.finish_node();
    }
}
