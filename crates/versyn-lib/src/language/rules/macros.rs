//! `macro_rules!` definitions, invocations and token trees.

use versyn_core::grammar::dsl::*;
use versyn_core::{Rule, choice, seq};

use super::GrammarBuilder;

/// Fragment specifiers accepted after `$name:`.
pub const FRAGMENT_SPECIFIERS: &[&str] = &[
    "block", "expr", "expr_2021", "ident", "item", "lifetime", "literal", "meta", "pat",
    "pat_param", "path", "stmt", "tt", "ty", "vis",
];

/// Keywords that may appear as plain tokens inside a token tree.
const TREE_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "default", "dyn", "else", "enum",
    "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "type", "union", "unsafe", "use",
    "where", "while", "yield",
];

pub(super) fn define(b: &mut GrammarBuilder) {
    let rules = || seq![sep_by(";", sym("macro_rule")), optional(";")];
    b.rule(
        "macro_definition",
        seq![
            "macro_rules",
            "!",
            field("name", sym("identifier")),
            choice![
                seq!["(", rules(), ")", ";"],
                seq!["[", rules(), "]", ";"],
                seq!["{", rules(), "}"],
            ],
        ],
    );
    b.rule(
        "macro_rule",
        seq![
            field("left", sym("token_tree_pattern")),
            "=>",
            field("right", sym("token_tree")),
        ],
    );

    b.rule(
        "_token_pattern",
        choice![
            sym("token_tree_pattern"),
            sym("token_repetition_pattern"),
            sym("token_binding_pattern"),
            sym("metavariable"),
            sym("_non_special_token"),
        ],
    );
    b.rule("token_tree_pattern", delimited(sym("_token_pattern")));
    b.rule(
        "token_binding_pattern",
        prec(
            1,
            seq![
                field("name", sym("metavariable")),
                ":",
                field("type", sym("fragment_specifier")),
            ],
        ),
    );
    b.rule(
        "token_repetition_pattern",
        repetition(sym("_token_pattern")),
    );
    b.rule(
        "fragment_specifier",
        Rule::Choice(FRAGMENT_SPECIFIERS.iter().map(|&f| f.into()).collect()),
    );

    b.rule(
        "_tokens",
        choice![
            sym("token_tree"),
            sym("token_repetition"),
            sym("metavariable"),
            sym("_non_special_token"),
        ],
    );
    b.rule("token_tree", delimited(sym("_tokens")));
    b.rule("token_repetition", repetition(sym("_tokens")));
    b.rule("metavariable", pattern(r"\$[a-zA-Z_][a-zA-Z0-9_]*"));

    let mut special = vec![
        sym("_literal"),
        sym("identifier"),
        sym("lifetime"),
        token(pattern(r"[/_\-=<>,;:!?.@*&#%^+|~]+")),
    ];
    special.extend(TREE_KEYWORDS.iter().map(|&k| Rule::from(k)));
    b.rule("_non_special_token", Rule::Choice(special));

    b.rule(
        "macro_invocation",
        seq![field("macro", sym("path")), "!", sym("token_tree")],
    );
}

/// `( … )`, `[ … ]` or `{ … }` around any number of `element`s.
fn delimited(element: Rule) -> Rule {
    choice![
        seq!["(", repeat(element.clone()), ")"],
        seq!["[", repeat(element.clone()), "]"],
        seq!["{", repeat(element), "}"],
    ]
}

/// `$( … ) sep? op`.
fn repetition(element: Rule) -> Rule {
    seq![
        "$",
        "(",
        repeat(element),
        ")",
        optional(pattern(r"[^+*?]+")),
        choice!["+", "*", "?"],
    ]
}
