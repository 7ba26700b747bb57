use indoc::indoc;

use crate::DiagnosticKind;
use crate::parser::SyntaxKind;
use crate::parser::ast::{Item, LetDeclaration};
use crate::parser::tests::{parse, parse_base};

#[test]
fn missing_semicolon_between_lets() {
    let res = parse("fn f() { let x = 1 let y = 2; }");

    assert_eq!(res.diagnostics().kinds(), vec![DiagnosticKind::UnexpectedToken]);
    let message = res.diagnostics().iter().next().unwrap().message().to_string();
    assert_eq!(message, "unexpected token: expected `;`");

    let lets = res
        .syntax()
        .descendants()
        .filter_map(LetDeclaration::cast)
        .count();
    assert_eq!(lets, 2);
}

#[test]
fn missing_initializer() {
    let res = parse("let x = ;");

    assert_eq!(res.diagnostics().kinds(), vec![DiagnosticKind::ExpectedExpression]);
}

#[test]
fn stray_tokens_among_declarations() {
    let res = parse("impl S { 1 + 2 fn g() {} }");

    assert_eq!(res.diagnostics().kinds(), vec![DiagnosticKind::ExpectedItem]);

    let Some(Item::ImplItem(imp)) = res.tree().items().next() else {
        panic!("expected an impl");
    };
    let items: Vec<SyntaxKind> = imp.body().unwrap().items().map(|i| i.kind()).collect();
    assert_eq!(items, vec![SyntaxKind::FunctionItem]);

    let error = res
        .syntax()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::Error)
        .unwrap();
    assert_eq!(error.text().to_string(), "1 + 2");
}

#[test]
fn broken_input_is_kept_verbatim() {
    let inputs = [
        "fn (",
        "let = ;",
        "}{",
        "a + / b",
        "struct { x }",
        "impl<T X {}",
        "match x { => }",
        "fn f() -> { }",
        "x ==> ==> y",
    ];

    for source in inputs {
        let res = parse(source);
        assert!(!res.is_valid(), "`{source}` parsed cleanly");
        assert_eq!(res.syntax().text().to_string(), source);

        let base = parse_base(source);
        assert_eq!(base.syntax().text().to_string(), source);
    }
}

#[test]
fn recovery_continues_with_later_items() {
    let source = indoc! {r#"
    fn broken() {
        let = ;
    }
    struct Fine;
    "#};
    let res = parse(source);

    assert!(!res.is_valid());
    assert!(
        res.tree()
            .items()
            .any(|i| i.kind() == SyntaxKind::StructItem)
    );
}
