//! Items, attributes and visibility.

use versyn_core::grammar::dsl::*;
use versyn_core::{Rule, choice, seq};

use super::GrammarBuilder;

pub(super) fn define(b: &mut GrammarBuilder) {
    b.rule(
        "source_file",
        seq![
            optional(sym("shebang")),
            repeat(sym("_statement")),
            optional(field("tail", sym("_expression"))),
        ],
    );

    let declarations = b.alternatives(vec![
        sym("const_item"),
        sym("macro_invocation"),
        sym("macro_definition"),
        sym("empty_statement"),
        sym("attribute_item"),
        sym("inner_attribute_item"),
        sym("mod_item"),
        sym("foreign_mod_item"),
        sym("struct_item"),
        sym("union_item"),
        sym("enum_item"),
        sym("type_item"),
        sym("function_item"),
        sym("function_signature_item"),
        sym("impl_item"),
        sym("trait_item"),
        sym("associated_type"),
        sym("let_declaration"),
        sym("use_declaration"),
        sym("extern_crate_declaration"),
        sym("static_item"),
        b.overlay(sym("broadcast_group")),
        b.overlay(sym("broadcast_use")),
        b.overlay(sym("global_item")),
    ]);
    b.rule("_declaration_statement", declarations);

    b.rule("attribute_item", seq!["#", "[", sym("attribute"), "]"]);
    b.rule("inner_attribute_item", seq!["#", "!", "[", sym("attribute"), "]"]);
    let arguments = b.alternatives(vec![
        seq!["=", field("value", sym("_expression"))],
        field("arguments", sym("token_tree")),
        b.overlay(field("arguments", comma_sep1(sym("_expression")))),
    ]);
    b.rule("attribute", seq![sym("path"), optional(arguments)]);

    b.rule(
        "visibility_modifier",
        seq![
            "pub",
            optional(seq![
                "(",
                choice!["self", "super", "crate", seq!["in", sym("path")]],
                ")",
            ]),
        ],
    );

    let function = seq![signature(b), field("body", sym("block"))];
    let function_signature = seq![signature(b), ";"];
    b.rule("function_item", function);
    b.rule("function_signature_item", function_signature);

    b.rule(
        "function_modifiers",
        repeat1(choice![
            "async",
            "default",
            "const",
            "unsafe",
            sym("extern_modifier"),
        ]),
    );
    b.rule("extern_modifier", seq!["extern", optional(sym("string_literal"))]);

    let self_parameter = seq![
        b.overlay(optional(sym("data_mode"))),
        optional("&"),
        optional(sym("lifetime")),
        optional("mut"),
        "self",
        optional(seq![":", field("type", sym("_type"))]),
    ];
    let parameter = seq![
        b.overlay(optional(sym("data_mode"))),
        field("pattern", sym("_pattern")),
        ":",
        field("type", sym("_type")),
    ];
    b.rule(
        "parameters",
        seq![
            "(",
            comma_sep(seq![
                repeat(sym("attribute_item")),
                choice![
                    sym("self_parameter"),
                    sym("parameter"),
                    sym("variadic_parameter"),
                    sym("_type"),
                ],
            ]),
            ")",
        ],
    );
    b.rule("self_parameter", self_parameter);
    b.rule("parameter", parameter);
    b.rule("variadic_parameter", "...");

    let returns = b.alternatives(vec![sym("_type"), b.overlay(sym("named_return"))]);
    b.rule("return_type", seq!["->", field("type", returns)]);

    b.rule(
        "struct_item",
        seq![
            optional(sym("visibility_modifier")),
            "struct",
            field("name", sym("identifier")),
            optional(field("type_parameters", sym("type_parameters"))),
            choice![
                seq![
                    optional(sym("where_clause")),
                    field("body", sym("field_declaration_list")),
                ],
                seq![
                    field("body", sym("ordered_field_declaration_list")),
                    optional(sym("where_clause")),
                    ";",
                ],
                ";",
            ],
        ],
    );
    b.rule(
        "union_item",
        seq![
            optional(sym("visibility_modifier")),
            "union",
            field("name", sym("identifier")),
            optional(field("type_parameters", sym("type_parameters"))),
            optional(sym("where_clause")),
            field("body", sym("field_declaration_list")),
        ],
    );
    b.rule(
        "field_declaration_list",
        seq![
            "{",
            comma_sep(seq![repeat(sym("attribute_item")), sym("field_declaration")]),
            "}",
        ],
    );
    let field_declaration = seq![
        optional(sym("visibility_modifier")),
        b.overlay(optional(sym("data_mode"))),
        field("name", sym("identifier")),
        ":",
        field("type", sym("_type")),
    ];
    b.rule("field_declaration", field_declaration);
    b.rule(
        "ordered_field_declaration_list",
        seq!["(", comma_sep(sym("ordered_field")), ")"],
    );
    let ordered_field = seq![
        repeat(sym("attribute_item")),
        optional(sym("visibility_modifier")),
        b.overlay(optional(sym("data_mode"))),
        field("type", sym("_type")),
    ];
    b.rule("ordered_field", ordered_field);

    b.rule(
        "enum_item",
        seq![
            optional(sym("visibility_modifier")),
            "enum",
            field("name", sym("identifier")),
            optional(field("type_parameters", sym("type_parameters"))),
            optional(sym("where_clause")),
            field("body", sym("enum_variant_list")),
        ],
    );
    b.rule(
        "enum_variant_list",
        seq![
            "{",
            comma_sep(seq![repeat(sym("attribute_item")), sym("enum_variant")]),
            "}",
        ],
    );
    b.rule(
        "enum_variant",
        seq![
            optional(sym("visibility_modifier")),
            field("name", sym("identifier")),
            optional(field(
                "body",
                choice![
                    sym("field_declaration_list"),
                    sym("ordered_field_declaration_list"),
                ],
            )),
            optional(seq!["=", field("value", sym("_expression"))]),
        ],
    );

    b.rule(
        "trait_item",
        seq![
            optional(sym("visibility_modifier")),
            optional("unsafe"),
            optional("auto"),
            "trait",
            field("name", sym("identifier")),
            optional(field("type_parameters", sym("type_parameters"))),
            optional(field("bounds", sym("trait_bounds"))),
            optional(sym("where_clause")),
            field("body", sym("declaration_list")),
        ],
    );
    b.rule(
        "impl_item",
        seq![
            optional("unsafe"),
            "impl",
            optional(field("type_parameters", sym("type_parameters"))),
            optional(seq![optional("!"), field("trait", sym("_type")), "for"]),
            field("type", sym("_type")),
            optional(sym("where_clause")),
            field("body", sym("declaration_list")),
        ],
    );
    b.rule(
        "declaration_list",
        seq!["{", repeat(sym("_declaration_statement")), "}"],
    );
    b.rule(
        "associated_type",
        seq![
            "type",
            field("name", sym("identifier")),
            optional(field("type_parameters", sym("type_parameters"))),
            optional(field("bounds", sym("trait_bounds"))),
            optional(sym("where_clause")),
            ";",
        ],
    );
    b.rule(
        "type_item",
        seq![
            optional(sym("visibility_modifier")),
            "type",
            field("name", sym("identifier")),
            optional(field("type_parameters", sym("type_parameters"))),
            optional(sym("where_clause")),
            "=",
            field("type", sym("_type")),
            ";",
        ],
    );

    b.rule(
        "mod_item",
        seq![
            optional(sym("visibility_modifier")),
            "mod",
            field("name", sym("identifier")),
            choice![";", field("body", sym("declaration_list"))],
        ],
    );
    b.rule(
        "foreign_mod_item",
        seq![
            optional(sym("visibility_modifier")),
            sym("extern_modifier"),
            choice![";", field("body", sym("declaration_list"))],
        ],
    );
    b.rule(
        "use_declaration",
        seq![
            optional(sym("visibility_modifier")),
            "use",
            field("argument", sym("use_tree")),
            ";",
        ],
    );
    b.rule(
        "use_tree",
        choice![
            seq![
                optional(seq![optional(sym("path")), "::"]),
                choice!["*", sym("use_list")],
            ],
            seq![
                sym("path"),
                optional(seq!["as", field("alias", choice![sym("identifier"), "_"])]),
            ],
        ],
    );
    b.rule("use_list", seq!["{", comma_sep(sym("use_tree")), "}"]);

    b.rule(
        "const_item",
        seq![
            optional(sym("visibility_modifier")),
            "const",
            field("name", choice![sym("identifier"), "_"]),
            ":",
            field("type", sym("_type")),
            optional(seq!["=", field("value", sym("_expression"))]),
            ";",
        ],
    );
    b.rule(
        "static_item",
        seq![
            optional(sym("visibility_modifier")),
            "static",
            optional("mut"),
            field("name", sym("identifier")),
            ":",
            field("type", sym("_type")),
            optional(seq!["=", field("value", sym("_expression"))]),
            ";",
        ],
    );
    b.rule(
        "extern_crate_declaration",
        seq![
            optional(sym("visibility_modifier")),
            "extern",
            "crate",
            field("name", choice![sym("identifier"), "self"]),
            optional(seq!["as", field("alias", sym("identifier"))]),
            ";",
        ],
    );
}

/// Everything up to the body of a function or function signature.
fn signature(b: &GrammarBuilder) -> Rule {
    seq![
        optional(sym("visibility_modifier")),
        optional(sym("function_modifiers")),
        b.overlay(optional(sym("function_mode"))),
        "fn",
        field("name", sym("identifier")),
        optional(field("type_parameters", sym("type_parameters"))),
        field("parameters", sym("parameters")),
        optional(field("return_type", sym("return_type"))),
        optional(sym("where_clause")),
        b.overlay(repeat(sym("_spec_clause"))),
    ]
}
