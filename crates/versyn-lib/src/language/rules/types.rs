//! Types, paths and generics.

use versyn_core::grammar::dsl::*;
use versyn_core::{choice, seq};

use super::GrammarBuilder;

pub(super) fn define(b: &mut GrammarBuilder) {
    b.rule(
        "_type",
        choice![
            sym("abstract_type"),
            sym("reference_type"),
            sym("pointer_type"),
            sym("path_type"),
            sym("tuple_type"),
            sym("unit_type"),
            sym("array_type"),
            sym("function_type"),
            sym("macro_invocation"),
            sym("never_type"),
            sym("dynamic_type"),
            sym("inferred_type"),
        ],
    );

    b.rule("path_type", sym("path"));
    b.rule(
        "path",
        seq![
            optional(choice!["::", seq![sym("qualified_type"), "::"]]),
            sep_by1("::", sym("path_segment")),
        ],
    );
    b.rule(
        "path_segment",
        seq![
            field(
                "name",
                choice![sym("identifier"), "self", "super", "crate", "Self"],
            ),
            optional(seq![
                optional("::"),
                field("type_arguments", sym("type_arguments")),
            ]),
        ],
    );
    b.rule(
        "qualified_type",
        seq![
            "<",
            field("type", sym("_type")),
            optional(seq!["as", field("alias", sym("_type"))]),
            ">",
        ],
    );
    b.rule(
        "type_arguments",
        seq![
            "<",
            comma_sep1(choice![
                sym("_type"),
                sym("type_binding"),
                sym("lifetime"),
                sym("_literal"),
                sym("block"),
            ]),
            ">",
        ],
    );
    b.rule(
        "type_binding",
        seq![
            field("name", sym("identifier")),
            optional(field("type_arguments", sym("type_arguments"))),
            "=",
            field("type", sym("_type")),
        ],
    );

    b.rule(
        "reference_type",
        seq![
            "&",
            optional(sym("lifetime")),
            optional("mut"),
            field("type", sym("_type")),
        ],
    );
    b.rule(
        "pointer_type",
        seq!["*", choice!["const", "mut"], field("type", sym("_type"))],
    );
    b.rule(
        "array_type",
        seq![
            "[",
            field("element", sym("_type")),
            optional(seq![";", field("length", sym("_expression"))]),
            "]",
        ],
    );
    b.rule(
        "tuple_type",
        seq!["(", comma_sep1(sym("_type")), ")"],
    );
    b.rule("unit_type", seq!["(", ")"]);
    b.rule(
        "function_type",
        seq![
            optional(seq!["for", sym("type_parameters")]),
            choice![
                field("trait", sym("path")),
                seq![optional(sym("function_modifiers")), "fn"],
            ],
            field("parameters", sym("parameters")),
            optional(field("return_type", sym("return_type"))),
        ],
    );
    b.rule("never_type", "!");
    b.rule("inferred_type", "_");
    b.rule(
        "abstract_type",
        seq!["impl", sep_by1("+", sym("_type_bound"))],
    );
    b.rule(
        "dynamic_type",
        seq!["dyn", sep_by1("+", sym("_type_bound"))],
    );

    b.rule(
        "_type_bound",
        choice![
            sym("lifetime"),
            sym("higher_ranked_trait_bound"),
            seq!["?", sym("_type")],
            sym("_type"),
        ],
    );
    b.rule(
        "trait_bounds",
        seq![":", sep_by1("+", sym("_type_bound"))],
    );
    b.rule(
        "higher_ranked_trait_bound",
        seq![
            "for",
            field("type_parameters", sym("type_parameters")),
            field("type", sym("_type")),
        ],
    );
    b.rule(
        "where_clause",
        seq!["where", comma_sep1(sym("where_predicate"))],
    );
    b.rule(
        "where_predicate",
        seq![
            field(
                "left",
                choice![
                    sym("lifetime"),
                    sym("higher_ranked_trait_bound"),
                    sym("_type"),
                ],
            ),
            field("bounds", sym("trait_bounds")),
        ],
    );

    b.rule(
        "type_parameters",
        seq![
            "<",
            comma_sep(seq![
                repeat(sym("attribute_item")),
                choice![
                    sym("lifetime_parameter"),
                    sym("type_parameter"),
                    sym("const_parameter"),
                ],
            ]),
            ">",
        ],
    );
    b.rule(
        "lifetime_parameter",
        seq![
            field("name", sym("lifetime")),
            optional(seq![":", sep_by1("+", sym("lifetime"))]),
        ],
    );
    b.rule(
        "type_parameter",
        seq![
            field("name", sym("identifier")),
            optional(field("bounds", sym("trait_bounds"))),
            optional(seq!["=", field("default_type", sym("_type"))]),
        ],
    );
    b.rule(
        "const_parameter",
        seq![
            "const",
            field("name", sym("identifier")),
            ":",
            field("type", sym("_type")),
            optional(seq![
                "=",
                field(
                    "value",
                    choice![sym("block"), sym("_literal"), sym("identifier")],
                ),
            ]),
        ],
    );
    b.rule("lifetime", pattern(r"'[a-zA-Z_][a-zA-Z0-9_]*"));
}
