use indoc::indoc;

use super::*;
use crate::parser::SyntaxKind;
use crate::parser::ast::{Item, MacroDefinition};
use crate::{DiagnosticKind, GrammarConfig, Language};

fn definition(source: &str) -> MacroDefinition {
    let language = Language::build(GrammarConfig::verification()).unwrap();
    let parse = language.parse(source).unwrap();
    parse
        .tree()
        .items()
        .find_map(|item| match item {
            Item::MacroDefinition(def) => Some(def),
            _ => None,
        })
        .expect("source defines a macro")
}

fn token(kind: SyntaxKind, text: &str) -> PatternElement {
    PatternElement::Token {
        kind,
        text: text.to_string(),
    }
}

#[test]
fn single_rule_binds_expression() {
    let rules = MacroRules::from_ast(&definition("macro_rules! m { ($x:expr) => { $x + 1 }; }"));

    assert!(rules.is_valid());
    assert_eq!(rules.name, "m");
    assert_eq!(rules.rules.len(), 1);

    let rule = &rules.rules[0];
    assert_eq!(
        rule.pattern,
        vec![PatternElement::Binding {
            name: "x".to_string(),
            fragment: FragmentKind::Expr,
        }]
    );
    assert_eq!(
        rule.template,
        vec![
            token(SyntaxKind::Metavariable, "$x"),
            token(SyntaxKind::Plus, "+"),
            token(SyntaxKind::IntegerLiteral, "1"),
        ]
    );
    assert_eq!(rule.references(), vec!["x".to_string()]);
}

#[test]
fn repetitions_with_separators() {
    let source = indoc! {r#"
    macro_rules! vec_of {
        ($($e:expr),* $(,)?) => { [$($e),*] };
    }
    "#};
    let rules = MacroRules::from_ast(&definition(source));
    let rule = &rules.rules[0];

    assert_eq!(
        rule.pattern,
        vec![
            PatternElement::Repetition {
                elements: vec![PatternElement::Binding {
                    name: "e".to_string(),
                    fragment: FragmentKind::Expr,
                }],
                separator: Some(",".to_string()),
                quantifier: RepetitionKind::ZeroOrMore,
            },
            PatternElement::Repetition {
                elements: vec![token(SyntaxKind::Comma, ",")],
                separator: None,
                quantifier: RepetitionKind::ZeroOrOne,
            },
        ]
    );
    assert_eq!(
        rule.template,
        vec![PatternElement::Group {
            delimiter: Delimiter::Bracket,
            elements: vec![PatternElement::Repetition {
                elements: vec![token(SyntaxKind::Metavariable, "$e")],
                separator: Some(",".to_string()),
                quantifier: RepetitionKind::ZeroOrMore,
            }],
        }]
    );
}

#[test]
fn bindings_in_order() {
    let source = indoc! {r#"
    macro_rules! pair {
        ($a:ident => [$b:ty, $($c:tt)+]) => {};
        ($a:pat_param) => {};
    }
    "#};
    let rules = MacroRules::from_ast(&definition(source));

    assert_eq!(rules.rules.len(), 2);
    let first: Vec<(String, FragmentKind)> = rules.rules[0].bindings().into_iter().collect();
    assert_eq!(
        first,
        vec![
            ("a".to_string(), FragmentKind::Ident),
            ("b".to_string(), FragmentKind::Type),
            ("c".to_string(), FragmentKind::TokenTree),
        ]
    );
    assert_eq!(rules.rules[1].bindings()["a"], FragmentKind::Pattern);
}

#[test]
fn unknown_fragment_is_reported() {
    let rules = MacroRules::from_ast(&definition("macro_rules! u { ($x:foo) => {}; }"));

    assert!(!rules.is_valid());
    assert!(rules.rules[0].pattern.is_empty());
    assert_eq!(
        rules.diagnostics().kinds(),
        vec![DiagnosticKind::UnknownFragmentSpecifier]
    );
    let message = rules.diagnostics().iter().next().unwrap().message().to_string();
    assert_eq!(message, "`foo` is not a fragment specifier");
}

#[test]
fn empty_repetition_warns() {
    let rules = MacroRules::from_ast(&definition("macro_rules! e { ($()*) => {}; }"));

    assert!(rules.is_valid());
    assert!(rules.diagnostics().has_warnings());
    assert_eq!(
        rules.rules[0].pattern,
        vec![PatternElement::Repetition {
            elements: Vec::new(),
            separator: None,
            quantifier: RepetitionKind::ZeroOrMore,
        }]
    );
}

#[test]
fn fragment_names_round_trip() {
    for name in ["block", "expr", "ident", "item", "lifetime", "literal", "meta", "pat", "path", "stmt", "tt", "ty", "vis"] {
        let kind = FragmentKind::from_name(name).unwrap();
        assert_eq!(kind.as_str(), name);
    }
    assert_eq!(FragmentKind::from_name("expr_2021"), Some(FragmentKind::Expr));
    assert_eq!(FragmentKind::from_name("expression"), None);
}
