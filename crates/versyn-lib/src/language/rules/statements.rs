//! Statements and blocks.

use versyn_core::grammar::dsl::*;
use versyn_core::{choice, seq};

use super::GrammarBuilder;

pub(super) fn define(b: &mut GrammarBuilder) {
    b.rule(
        "_statement",
        choice![sym("expression_statement"), sym("_declaration_statement")],
    );
    b.rule("empty_statement", ";");

    b.rule(
        "expression_statement",
        choice![
            seq![sym("_expression"), ";"],
            prec(1, sym("_expression_ending_with_block")),
        ],
    );

    let ending_with_block = b.alternatives(vec![
        sym("unsafe_block"),
        sym("async_block"),
        sym("try_block"),
        sym("const_block"),
        sym("block"),
        sym("if_expression"),
        sym("match_expression"),
        sym("while_expression"),
        sym("loop_expression"),
        sym("for_expression"),
        b.overlay(sym("proof_block")),
    ]);
    b.rule("_expression_ending_with_block", ending_with_block);

    let let_declaration = seq![
        "let",
        b.overlay(optional(sym("data_mode"))),
        field("pattern", sym("_pattern")),
        optional(seq![":", field("type", sym("_type"))]),
        optional(seq!["=", field("value", sym("_expression"))]),
        optional(field("alternative", sym("else_clause"))),
        ";",
    ];
    b.rule("let_declaration", let_declaration);

    b.rule(
        "block",
        seq![
            optional(seq![sym("label"), ":"]),
            "{",
            repeat(sym("_statement")),
            optional(sym("_expression")),
            "}",
        ],
    );
}
