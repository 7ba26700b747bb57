use crate::DiagnosticKind;
use crate::parser::SyntaxKind;
use crate::parser::tests::parse;

#[test]
fn garbage_becomes_an_error_node() {
    let res = parse("¤¤ fn f() {}");

    insta::assert_snapshot!(res.dump(), @r#"
    SourceFile
      Error
        ErrorSentinel "¤¤"
      FunctionItem
        FnKw "fn"
        Ident "f"
        Parameters
          ParenOpen "("
          ParenClose ")"
        Block
          BraceOpen "{"
          BraceClose "}"
    "#);

    let diagnostic = res.diagnostics().iter().next().unwrap();
    assert_eq!(diagnostic.kind(), DiagnosticKind::LexicalError);
    assert_eq!(diagnostic.message(), "unrecognized input: `¤¤`");
    assert_eq!(u32::from(diagnostic.range().end()), 4);
}

#[test]
fn garbage_inside_a_block_stops_at_the_closer() {
    let res = parse("fn f() { ¤ }");

    assert_eq!(res.diagnostics().kinds(), vec![DiagnosticKind::LexicalError]);
    let error = res
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::Error)
        .unwrap();
    assert_eq!(error.parent().unwrap().kind(), SyntaxKind::Block);
    assert_eq!(error.text().to_string(), "¤");
}

#[test]
fn unterminated_block_comment() {
    let source = "fn f() {} /* open";
    let res = parse(source);

    assert_eq!(res.diagnostics().kinds(), vec![DiagnosticKind::LexicalError]);
    let diagnostic = res.diagnostics().iter().next().unwrap();
    assert_eq!(u32::from(diagnostic.range().start()), 10);
    assert_eq!(u32::from(diagnostic.range().end()), 17);
    assert_eq!(res.syntax().text().to_string(), source);
}
