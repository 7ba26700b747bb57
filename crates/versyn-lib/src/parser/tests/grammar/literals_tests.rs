use crate::DiagnosticKind;
use crate::parser::SyntaxKind;
use crate::parser::ast::{Expr, Literal};
use crate::parser::tests::parse;

#[test]
fn raw_string_closes_at_matching_fence() {
    let res = parse(r###"r##"a"#b"##"###);
    assert!(res.is_valid());

    insta::assert_snapshot!(res.dump(), @r###"
    SourceFile
      RawStringLiteral
        RawStringStart "r##\""
        RawStringContent "a\"#b"
        RawStringEnd "\"##"
    "###);

    let Some(Expr::RawStringLiteral(raw)) = res.tree().tail() else {
        panic!("expected a raw string literal");
    };
    assert_eq!(raw.contents(), r##"a"#b"##);
    assert!(raw.is_terminated());
}

#[test]
fn raw_string_with_longer_closing_fence_stays_open() {
    let res = parse(r####"r#"a"##"####);

    assert_eq!(res.diagnostics().kinds(), vec![DiagnosticKind::UnterminatedLiteral]);
    let message = res.diagnostics().iter().next().unwrap().message().to_string();
    assert_eq!(message, "unterminated literal: missing raw string terminator");
}

#[test]
fn string_keeps_escapes_as_tokens() {
    let res = parse(r#""a\n\"b""#);
    assert!(res.is_valid());

    insta::assert_snapshot!(res.dump(), @r#"
    SourceFile
      StringLiteral
        StringStart "\""
        StringContent "a"
        EscapeSequence "\\n"
        EscapeSequence "\\\""
        StringContent "b"
        StringEnd "\""
    "#);
}

#[test]
fn unterminated_string_is_reported_to_end_of_input() {
    let res = parse(r#""abc"#);

    insta::assert_snapshot!(res.dump(), @r#"
    SourceFile
      StringLiteral
        StringStart "\""
        StringContent "abc"
    "#);
    let diagnostic = res.diagnostics().iter().next().unwrap();
    assert_eq!(diagnostic.kind(), DiagnosticKind::UnterminatedLiteral);
    assert_eq!(u32::from(diagnostic.range().start()), 0);
    assert_eq!(u32::from(diagnostic.range().end()), 4);

    let Some(Expr::StringLiteral(s)) = res.tree().tail() else {
        panic!("expected a string literal");
    };
    assert!(!s.is_terminated());
    assert_eq!(s.contents(), "abc");
}

#[test]
fn scalar_literals() {
    let res = parse("f(1, 1.5, 'c', 0xFF_u8, true, false, b\"x\")");
    assert!(res.is_valid());

    let kinds: Vec<SyntaxKind> = res
        .syntax()
        .descendants()
        .filter_map(Literal::cast)
        .map(|l| l.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::IntegerLiteral,
            SyntaxKind::FloatLiteral,
            SyntaxKind::CharLiteral,
            SyntaxKind::IntegerLiteral,
            SyntaxKind::BooleanLiteral,
            SyntaxKind::BooleanLiteral,
            SyntaxKind::StringLiteral,
        ]
    );
}

#[test]
fn negative_number_is_a_unary_expression() {
    let res = parse("-1");

    insta::assert_snapshot!(res.dump(), @r#"
    SourceFile
      UnaryExpression
        Minus "-"
        IntegerLiteral
          IntNumber "1"
    "#);
}

#[test]
fn nested_tuple_index_is_two_field_accesses() {
    let res = parse("t.0.1");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (field_expression (field_expression (path_expression (path (path_segment))))))");
}
