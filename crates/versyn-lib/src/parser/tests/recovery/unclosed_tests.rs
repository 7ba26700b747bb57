use crate::DiagnosticKind;
use crate::parser::SyntaxKind;
use crate::parser::tests::parse;

#[test]
fn unclosed_argument_list_at_end_of_input() {
    let res = parse("f(a, b");

    assert_eq!(res.diagnostics().kinds(), vec![DiagnosticKind::UnclosedDelimiter]);
    let diagnostic = res.diagnostics().iter().next().unwrap();
    assert_eq!(diagnostic.message(), "unclosed `(`");
    assert_eq!(u32::from(diagnostic.range().start()), 1);
    assert_eq!(u32::from(diagnostic.range().end()), 6);

    let related = &diagnostic.related()[0];
    assert_eq!(related.message, "opened here");
    assert_eq!(u32::from(related.range.start()), 1);
    assert_eq!(u32::from(related.range.end()), 2);

    assert!(
        res.syntax()
            .descendants()
            .any(|n| n.kind() == SyntaxKind::CallExpression)
    );
}

#[test]
fn inner_delimiter_closed_by_outer_closer() {
    let res = parse("fn f() { g(1 }");

    assert_eq!(res.diagnostics().kinds(), vec![DiagnosticKind::UnclosedDelimiter]);
    let diagnostic = res.diagnostics().iter().next().unwrap();
    assert_eq!(u32::from(diagnostic.range().start()), 10);
    assert_eq!(u32::from(diagnostic.range().end()), 14);

    let items: Vec<SyntaxKind> = res.tree().items().map(|i| i.kind()).collect();
    assert_eq!(items, vec![SyntaxKind::FunctionItem]);
}

#[test]
fn stray_closer_is_mismatched() {
    let source = "a; ) b;";
    let res = parse(source);

    assert_eq!(res.diagnostics().kinds(), vec![DiagnosticKind::MismatchedDelimiter]);
    let message = res.diagnostics().iter().next().unwrap().message().to_string();
    assert_eq!(message, "mismatched closing delimiter: no matching opener");
    assert_eq!(res.syntax().text().to_string(), source);
}

#[test]
fn rendered_report_points_at_the_opener() {
    let res = parse("f(a, b");
    let rendered = res.render_diagnostics();

    assert!(rendered.contains("unclosed `(`"));
    assert!(rendered.contains("opened here"));
}
