//! Expressions. Operator productions are generated from the precedence table.

use versyn_core::grammar::dsl::*;
use versyn_core::{Rule, choice, seq};

use super::GrammarBuilder;
use crate::language::precedence::{Assoc, Fixity, PrecedenceTable, Tier};

pub(super) fn define(b: &mut GrammarBuilder, table: &PrecedenceTable) {
    let expression = b.alternatives(vec![
        sym("_literal"),
        sym("path_expression"),
        sym("unary_expression"),
        sym("reference_expression"),
        sym("binary_expression"),
        sym("assignment_expression"),
        sym("compound_assignment_expr"),
        sym("cast_expression"),
        sym("try_expression"),
        sym("await_expression"),
        sym("field_expression"),
        sym("generic_function"),
        sym("call_expression"),
        sym("index_expression"),
        sym("range_expression"),
        sym("closure_expression"),
        sym("break_expression"),
        sym("continue_expression"),
        sym("return_expression"),
        sym("yield_expression"),
        sym("struct_expression"),
        sym("tuple_expression"),
        sym("unit_expression"),
        sym("array_expression"),
        sym("parenthesized_expression"),
        sym("macro_invocation"),
        sym("_expression_ending_with_block"),
        b.overlay(sym("quantifier_expression")),
        b.overlay(sym("assert_expression")),
        b.overlay(sym("assert_forall_expression")),
        b.overlay(sym("assume_expression")),
        b.overlay(sym("big_and_expression")),
        b.overlay(sym("big_or_expression")),
        b.overlay(sym("view_expression")),
    ]);
    b.rule("_expression", expression);

    b.rule(
        "_literal",
        choice![
            sym("string_literal"),
            sym("raw_string_literal"),
            sym("char_literal"),
            sym("boolean_literal"),
            sym("integer_literal"),
            sym("float_literal"),
        ],
    );
    b.rule("path_expression", sym("path"));

    b.rule(
        "unary_expression",
        prec(
            "unary",
            seq![choice!["-", "*", "!"], field("operand", sym("_expression"))],
        ),
    );
    b.rule(
        "reference_expression",
        prec(
            "unary",
            seq!["&", optional("mut"), field("value", sym("_expression"))],
        ),
    );
    b.rule("binary_expression", binary_expression(table));
    b.rule(
        "assignment_expression",
        prec_right(
            Tier::Assignment.name(),
            seq![
                field("left", sym("_expression")),
                "=",
                field("right", sym("_expression")),
            ],
        ),
    );
    b.rule(
        "compound_assignment_expr",
        prec_right(
            Tier::Assignment.name(),
            seq![
                field("left", sym("_expression")),
                field("operator", operators(table, Tier::Assignment, |op| op != "=")),
                field("right", sym("_expression")),
            ],
        ),
    );
    b.rule(
        "cast_expression",
        prec(
            Tier::Cast.name(),
            seq![field("value", sym("_expression")), "as", field("type", sym("_type"))],
        ),
    );
    b.rule("try_expression", prec("try", seq![sym("_expression"), "?"]));
    b.rule(
        "await_expression",
        prec("field", seq![sym("_expression"), ".", "await"]),
    );
    b.rule(
        "field_expression",
        prec(
            "field",
            seq![
                field("value", sym("_expression")),
                ".",
                field("field", choice![sym("identifier"), sym("integer_literal")]),
            ],
        ),
    );
    b.rule(
        "generic_function",
        prec(
            "call",
            seq![
                field("function", sym("field_expression")),
                "::",
                field("type_arguments", sym("type_arguments")),
            ],
        ),
    );
    b.rule(
        "call_expression",
        prec(
            "call",
            seq![
                field("function", sym("_expression")),
                field("arguments", sym("arguments")),
            ],
        ),
    );
    b.rule(
        "arguments",
        seq![
            "(",
            comma_sep(seq![repeat(sym("attribute_item")), sym("_expression")]),
            ")",
        ],
    );
    b.rule(
        "index_expression",
        prec(
            "call",
            seq![sym("_expression"), "[", sym("_expression"), "]"],
        ),
    );
    b.rule(
        "range_expression",
        prec(
            Tier::Range.name(),
            choice![
                seq![
                    sym("_expression"),
                    operators(table, Tier::Range, |_| true),
                    sym("_expression"),
                ],
                seq![sym("_expression"), ".."],
                seq![operators(table, Tier::Range, |_| true), sym("_expression")],
                "..",
            ],
        ),
    );

    b.rule(
        "closure_expression",
        prec(
            Tier::Closure.name(),
            seq![
                optional("static"),
                optional("async"),
                optional("move"),
                field("parameters", sym("closure_parameters")),
                choice![
                    seq![
                        field("return_type", sym("return_type")),
                        field("body", sym("block")),
                    ],
                    field("body", sym("_expression")),
                ],
            ],
        ),
    );
    b.rule(
        "closure_parameters",
        choice![
            "||",
            seq![
                "|",
                comma_sep(choice![sym("_pattern"), sym("parameter")]),
                "|",
            ],
        ],
    );

    b.rule(
        "unsafe_block",
        seq!["unsafe", sym("block")],
    );
    b.rule(
        "async_block",
        seq!["async", optional("move"), sym("block")],
    );
    b.rule("const_block", seq!["const", sym("block")]);
    b.rule("try_block", seq!["try", sym("block")]);

    b.rule(
        "_condition",
        choice![sym("_expression"), sym("let_condition"), sym("let_chain")],
    );
    b.rule(
        "let_condition",
        seq![
            "let",
            field("pattern", sym("_pattern")),
            "=",
            field("value", sym("_expression")),
        ],
    );
    b.rule(
        "let_chain",
        prec_left(
            Tier::And.name(),
            seq![
                sym("_let_chain_part"),
                repeat1(seq!["&&", sym("_let_chain_part")]),
            ],
        ),
    );
    b.rule(
        "_let_chain_part",
        choice![sym("let_condition"), sym("_expression")],
    );

    let loop_clauses = || b.overlay(repeat(sym("_loop_spec_clause")));
    let if_expression = seq![
        "if",
        field("condition", sym("_condition")),
        field("consequence", sym("block")),
        optional(field("alternative", sym("else_clause"))),
    ];
    let while_expression = seq![
        optional(seq![sym("label"), ":"]),
        "while",
        field("condition", sym("_condition")),
        loop_clauses(),
        field("body", sym("block")),
    ];
    let loop_expression = seq![
        optional(seq![sym("label"), ":"]),
        "loop",
        loop_clauses(),
        field("body", sym("block")),
    ];
    let for_expression = seq![
        optional(seq![sym("label"), ":"]),
        "for",
        field("pattern", sym("_pattern")),
        "in",
        field("value", sym("_expression")),
        loop_clauses(),
        field("body", sym("block")),
    ];
    b.rule("if_expression", if_expression);
    b.rule(
        "else_clause",
        seq!["else", choice![sym("block"), sym("if_expression")]],
    );
    b.rule(
        "match_expression",
        seq![
            "match",
            field("value", sym("_expression")),
            field("body", sym("match_block")),
        ],
    );
    b.rule("match_block", seq!["{", repeat(sym("match_arm")), "}"]);
    b.rule(
        "match_arm",
        seq![
            repeat(sym("attribute_item")),
            field("pattern", sym("match_pattern")),
            "=>",
            field("value", sym("_expression")),
            optional(","),
        ],
    );
    b.rule(
        "match_pattern",
        seq![
            sym("_pattern"),
            optional(seq!["if", field("condition", sym("_condition"))]),
        ],
    );
    b.rule("loop_expression", loop_expression);
    b.rule("while_expression", while_expression);
    b.rule("for_expression", for_expression);
    b.rule("label", pattern(r"'[a-zA-Z_][a-zA-Z0-9_]*"));

    b.rule(
        "break_expression",
        seq!["break", optional(sym("label")), optional(sym("_expression"))],
    );
    b.rule("continue_expression", seq!["continue", optional(sym("label"))]);
    b.rule("return_expression", seq!["return", optional(sym("_expression"))]);
    b.rule("yield_expression", seq!["yield", optional(sym("_expression"))]);

    b.rule(
        "struct_expression",
        seq![
            field("name", sym("path")),
            field("body", sym("field_initializer_list")),
        ],
    );
    b.rule(
        "field_initializer_list",
        seq![
            "{",
            comma_sep(choice![
                sym("shorthand_field_initializer"),
                sym("field_initializer"),
                sym("base_field_initializer"),
            ]),
            "}",
        ],
    );
    b.rule(
        "shorthand_field_initializer",
        seq![repeat(sym("attribute_item")), sym("identifier")],
    );
    b.rule(
        "field_initializer",
        seq![
            repeat(sym("attribute_item")),
            field("field", choice![sym("identifier"), sym("integer_literal")]),
            ":",
            field("value", sym("_expression")),
        ],
    );
    b.rule("base_field_initializer", seq!["..", sym("_expression")]);

    b.rule(
        "tuple_expression",
        seq![
            "(",
            repeat1(seq![sym("_expression"), ","]),
            optional(sym("_expression")),
            ")",
        ],
    );
    b.rule("unit_expression", seq!["(", ")"]);
    b.rule(
        "parenthesized_expression",
        seq!["(", sym("_expression"), ")"],
    );
    b.rule(
        "array_expression",
        seq![
            "[",
            choice![
                seq![sym("_expression"), ";", field("length", sym("_expression"))],
                comma_sep(sym("_expression")),
            ],
            "]",
        ],
    );
}

/// One `prec_*` alternative per binary tier, in table order.
fn binary_expression(table: &PrecedenceTable) -> Rule {
    let mut alternatives = Vec::new();
    for level in table.levels() {
        let binary = level.operators.iter().any(|op| op.fixity == Fixity::Infix);
        if !binary || matches!(level.tier, Tier::Assignment | Tier::Range | Tier::Cast) {
            continue;
        }
        let body = seq![
            field("left", sym("_expression")),
            field("operator", operators(table, level.tier, |_| true)),
            field("right", sym("_expression")),
        ];
        let name = level.tier.name();
        alternatives.push(match level.assoc {
            Assoc::Left => prec_left(name, body),
            Assoc::Right => prec_right(name, body),
            Assoc::None => prec(name, body),
        });
    }
    Rule::Choice(alternatives)
}

/// Choice over the infix operator spellings of a tier.
fn operators(table: &PrecedenceTable, tier: Tier, keep: impl Fn(&str) -> bool) -> Rule {
    let members = table
        .levels()
        .iter()
        .filter(|l| l.tier == tier)
        .flat_map(|l| l.operators.iter())
        .filter(|op| op.fixity == Fixity::Infix && keep(op.text))
        .map(|op| Rule::from(op.text))
        .collect();
    Rule::Choice(members)
}
