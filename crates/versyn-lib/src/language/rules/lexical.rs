//! Token-level productions, extras and externally scanned tokens.
//!
//! The externals are the context-sensitive recognizers of the lexer's
//! scanner module: string bodies, raw string fences, numbers that need
//! lookahead, nested block comments and the error sentinel.

use versyn_core::grammar::dsl::*;
use versyn_core::{choice, seq};

use super::GrammarBuilder;

pub const EXTERNALS: &[&str] = &[
    "string_content",
    "_raw_string_literal_start",
    "raw_string_content",
    "_raw_string_literal_end",
    "float_literal",
    "_outer_block_doc_comment_marker",
    "_inner_block_doc_comment_marker",
    "_block_comment_content",
    "_line_doc_content",
    "_error_sentinel",
];

pub(super) fn define(b: &mut GrammarBuilder) {
    b.rule("identifier", pattern(r"(r#)?[a-zA-Z_][a-zA-Z0-9_]*"));
    b.rule("shebang", pattern(r"#![^\[\n][^\n]*"));

    b.rule(
        "integer_literal",
        token(seq![
            choice![
                pattern(r"[0-9][0-9_]*"),
                pattern(r"0x[0-9a-fA-F_]+"),
                pattern(r"0b[01_]+"),
                pattern(r"0o[0-7_]+"),
            ],
            optional(pattern(r"[iu](8|16|32|64|128|size)")),
        ]),
    );
    b.rule(
        "string_literal",
        seq![
            pattern(r#"[bc]?""#),
            repeat(choice![sym("escape_sequence"), sym("string_content")]),
            immediate("\""),
        ],
    );
    b.rule(
        "escape_sequence",
        immediate(seq![
            "\\",
            choice![
                pattern(r"[^xu]"),
                pattern(r"u\{[0-9a-fA-F_]{1,6}\}"),
                pattern(r"x[0-9a-fA-F]{2}"),
            ],
        ]),
    );
    b.rule(
        "raw_string_literal",
        seq![
            sym("_raw_string_literal_start"),
            sym("raw_string_content"),
            sym("_raw_string_literal_end"),
        ],
    );
    b.rule(
        "char_literal",
        token(seq![
            optional("b"),
            "'",
            choice![
                seq![
                    "\\",
                    choice![
                        pattern(r"[^xu]"),
                        pattern(r"u\{[0-9a-fA-F_]{1,6}\}"),
                        pattern(r"x[0-9a-fA-F]{2}"),
                    ],
                ],
                pattern(r"[^\\']"),
            ],
            "'",
        ]),
    );
    b.rule("boolean_literal", choice!["true", "false"]);

    b.rule(
        "line_comment",
        seq![
            "//",
            choice![
                seq![
                    choice![
                        field("outer", alias_anonymous(token(prec(2, "/")), "/")),
                        field("inner", alias_anonymous(token(prec(2, "!")), "!")),
                    ],
                    field("doc", sym("_line_doc_content")),
                ],
                token(prec(1, pattern(r"[^\n]*"))),
            ],
        ],
    );
    b.rule(
        "block_comment",
        seq![
            "/*",
            optional(seq![
                choice![
                    field("outer", sym("_outer_block_doc_comment_marker")),
                    field("inner", sym("_inner_block_doc_comment_marker")),
                ],
                optional(field("doc", sym("_block_comment_content"))),
            ]),
            "*/",
        ],
    );

    b.externals(EXTERNALS);
    b.extras(vec![pattern(r"\s"), sym("line_comment"), sym("block_comment")]);
}
