//! Parser invariant checks, excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;
use crate::language::Conflict;
use crate::parser::cst::SyntaxKind;

impl Parser<'_, '_> {
    /// Every peek spends debug fuel and every consumed token refills it, so a
    /// lookahead resolver that never lets the cursor move runs dry here.
    #[inline]
    pub(super) fn ensure_progress(&self) {
        assert!(
            self.debug_fuel.get() != 0,
            "parser is stuck at token {}: lookahead resolvers peeked without consuming",
            self.pos,
        );
        self.debug_fuel.set(self.debug_fuel.get() - 1);
    }

    /// Resolvers only decide conflicts that the grammar description declares.
    #[inline]
    pub(super) fn assert_declared(&self, conflict: Conflict) {
        debug_assert!(
            self.lang.has_conflict(conflict),
            "`{}` resolved but not declared by the {} grammar",
            conflict.name(),
            if self.verification() { "overlay" } else { "base" },
        );
    }

    /// The caller dispatched on `kind`, so the cursor must be sitting on it.
    #[inline]
    pub(super) fn assert_current(&mut self, kind: SyntaxKind) {
        debug_assert_eq!(self.current(), kind);
    }
}
