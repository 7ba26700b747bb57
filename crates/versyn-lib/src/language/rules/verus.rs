//! Verification overlay productions.
//!
//! Every rule here is registered with `overlay_rule`, so none of them exists
//! in a base build.

use versyn_core::grammar::dsl::*;
use versyn_core::{Rule, choice, seq};

use super::GrammarBuilder;
use crate::language::precedence::Tier;

/// Clauses that take a comma-separated expression list.
const LIST_CLAUSES: &[(&str, &str)] = &[
    ("requires_clause", "requires"),
    ("ensures_clause", "ensures"),
    ("recommends_clause", "recommends"),
    ("invariant_clause", "invariant"),
    ("invariant_except_break_clause", "invariant_except_break"),
    ("invariant_ensures_clause", "invariant_ensures"),
];

pub(super) fn define(b: &mut GrammarBuilder) {
    b.overlay_rule(
        "function_mode",
        seq![
            optional(choice!["open", "closed"]),
            optional("broadcast"),
            choice![
                seq!["spec", optional(seq!["(", "checked", ")"])],
                "proof",
                "exec",
            ],
        ],
    );
    b.overlay_rule("data_mode", choice!["ghost", "tracked"]);
    b.overlay_rule(
        "named_return",
        seq![
            "(",
            optional(sym("data_mode")),
            field("name", sym("identifier")),
            ":",
            field("type", sym("_type")),
            ")",
        ],
    );

    b.overlay_rule(
        "_spec_clause",
        choice![
            sym("requires_clause"),
            sym("ensures_clause"),
            sym("recommends_clause"),
            sym("decreases_clause"),
            sym("opens_invariants_clause"),
            sym("returns_clause"),
            sym("no_unwind_clause"),
        ],
    );
    b.overlay_rule(
        "_loop_spec_clause",
        choice![
            sym("invariant_clause"),
            sym("invariant_except_break_clause"),
            sym("invariant_ensures_clause"),
            sym("ensures_clause"),
            sym("decreases_clause"),
        ],
    );
    for &(name, keyword) in LIST_CLAUSES {
        b.overlay_rule(name, seq![keyword, expression_list()]);
    }
    b.overlay_rule(
        "decreases_clause",
        seq![
            "decreases",
            expression_list(),
            optional(seq!["when", field("condition", sym("_expression"))]),
            optional(seq!["via", field("via", sym("path"))]),
        ],
    );
    b.overlay_rule(
        "opens_invariants_clause",
        seq![
            "opens_invariants",
            choice![
                "any",
                "none",
                seq!["[", comma_sep(sym("_expression")), "]"],
            ],
        ],
    );
    b.overlay_rule("returns_clause", seq!["returns", sym("_expression")]);
    b.overlay_rule(
        "no_unwind_clause",
        seq![
            "no_unwind",
            optional(seq!["when", field("condition", sym("_expression"))]),
        ],
    );

    b.overlay_rule(
        "quantifier_expression",
        prec(
            Tier::Closure.name(),
            seq![
                field("quantifier", choice!["forall", "exists", "choose"]),
                field("parameters", sym("closure_parameters")),
                repeat(sym("inner_attribute_item")),
                field("body", sym("_expression")),
            ],
        ),
    );
    b.overlay_rule(
        "assert_expression",
        seq![
            "assert",
            "(",
            field("condition", sym("_expression")),
            ")",
            optional(seq![
                "by",
                optional(seq!["(", field("solver", sym("identifier")), ")"]),
                optional(sym("requires_clause")),
                optional(field("proof", sym("block"))),
            ]),
        ],
    );
    b.overlay_rule(
        "assert_forall_expression",
        seq![
            "assert",
            "forall",
            field("parameters", sym("closure_parameters")),
            repeat(sym("inner_attribute_item")),
            field("condition", sym("_expression")),
            optional(seq!["implies", field("consequence", sym("_expression"))]),
            optional(seq!["by", field("proof", sym("block"))]),
        ],
    );
    b.overlay_rule(
        "assume_expression",
        seq!["assume", "(", field("condition", sym("_expression")), ")"],
    );
    b.overlay_rule("proof_block", seq!["proof", sym("block")]);
    b.overlay_rule("big_and_expression", big_connective("&&&"));
    b.overlay_rule("big_or_expression", big_connective("|||"));
    b.overlay_rule(
        "view_expression",
        prec(Tier::Try.name(), seq![field("value", sym("_expression")), "@"]),
    );

    b.overlay_rule(
        "broadcast_group",
        seq![
            optional(sym("visibility_modifier")),
            "broadcast",
            "group",
            field("name", sym("identifier")),
            "{",
            comma_sep(sym("path")),
            "}",
        ],
    );
    b.overlay_rule(
        "broadcast_use",
        seq!["broadcast", "use", comma_sep1(sym("path")), ";"],
    );
    b.overlay_rule(
        "global_item",
        seq![
            "global",
            choice![
                seq![
                    "size_of",
                    field("type", sym("_type")),
                    "==",
                    field("size", sym("_expression")),
                ],
                seq![
                    "layout",
                    field("type", sym("_type")),
                    "is",
                    sep_by1(",", seq![sym("identifier"), "==", sym("_expression")]),
                ],
            ],
            ";",
        ],
    );
}

fn expression_list() -> Rule {
    comma_sep1(sym("_expression"))
}

/// `&&& a &&& b`: one node with a conjunct per leading connective.
fn big_connective(token: &str) -> Rule {
    prec_right(
        Tier::BigConnective.name(),
        repeat1(seq![token, field("operand", sym("_expression"))]),
    )
}
