use versyn_core::grammar::dsl::*;
use versyn_core::{choice, seq};

use super::GrammarBuilder;

pub(super) fn define(b: &mut GrammarBuilder) {
    b.rule(
        "_pattern",
        choice![
            sym("literal_pattern"),
            sym("identifier_pattern"),
            sym("wildcard_pattern"),
            sym("path_pattern"),
            sym("tuple_pattern"),
            sym("tuple_struct_pattern"),
            sym("struct_pattern"),
            sym("slice_pattern"),
            sym("or_pattern"),
            sym("range_pattern"),
            sym("reference_pattern"),
            sym("rest_pattern"),
            sym("macro_invocation"),
        ],
    );

    b.rule(
        "literal_pattern",
        choice![
            sym("_literal"),
            seq!["-", choice![sym("integer_literal"), sym("float_literal")]],
        ],
    );
    let mode = b.overlay(optional(sym("data_mode")));
    b.rule(
        "identifier_pattern",
        seq![
            mode,
            optional("ref"),
            optional("mut"),
            field("name", sym("identifier")),
            optional(seq!["@", field("pattern", sym("_pattern"))]),
        ],
    );
    b.rule("wildcard_pattern", "_");
    b.rule("path_pattern", sym("path"));
    b.rule("tuple_pattern", seq!["(", comma_sep(sym("_pattern")), ")"]);
    b.rule(
        "tuple_struct_pattern",
        seq![
            field("type", sym("path")),
            "(",
            comma_sep(sym("_pattern")),
            ")",
        ],
    );
    b.rule(
        "struct_pattern",
        seq![
            field("type", sym("path")),
            "{",
            comma_sep(choice![sym("field_pattern"), sym("rest_pattern")]),
            "}",
        ],
    );
    b.rule(
        "field_pattern",
        seq![
            repeat(sym("attribute_item")),
            choice![
                seq![
                    optional("ref"),
                    optional("mut"),
                    field("name", sym("identifier")),
                ],
                seq![
                    field("name", choice![sym("identifier"), sym("integer_literal")]),
                    ":",
                    field("pattern", sym("_pattern")),
                ],
            ],
        ],
    );
    b.rule("slice_pattern", seq!["[", comma_sep(sym("_pattern")), "]"]);
    b.rule(
        "or_pattern",
        choice![
            prec_left(-2, seq![sym("_pattern"), "|", sym("_pattern")]),
            prec(-2, seq!["|", sym("_pattern")]),
        ],
    );
    b.rule(
        "range_pattern",
        seq![
            field("left", sym("_range_pattern_bound")),
            choice!["..=", "...", ".."],
            optional(field("right", sym("_range_pattern_bound"))),
        ],
    );
    b.rule(
        "_range_pattern_bound",
        choice![sym("literal_pattern"), sym("path")],
    );
    b.rule(
        "reference_pattern",
        seq![choice!["&", "&&"], optional("mut"), sym("_pattern")],
    );
    b.rule("rest_pattern", "..");
}
