use indoc::indoc;

use crate::DiagnosticKind;
use crate::parser::SyntaxKind;
use crate::parser::ast::{
    Item, LetDeclaration, MacroDefinition, TokenBindingPattern, TokenRepetition,
    TokenRepetitionPattern,
};
use crate::parser::tests::{parse, parse_base};
use crate::parser::{Parse, SyntaxNode};

fn definition(res: &Parse) -> MacroDefinition {
    res.syntax()
        .descendants()
        .find_map(MacroDefinition::cast)
        .expect("source has a macro definition")
}

#[test]
fn macro_rules_with_binding() {
    let res = parse("macro_rules! m { ($x:expr) => { $x + 1 }; }");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.dump(), @r#"
    SourceFile
      MacroDefinition
        MacroRulesKw "macro_rules"
        Bang "!"
        Ident "m"
        BraceOpen "{"
        MacroRule
          TokenTreePattern
            ParenOpen "("
            TokenBindingPattern
              Metavariable "$x"
              Colon ":"
              FragmentSpecifier
                Ident "expr"
            ParenClose ")"
          FatArrow "=>"
          TokenTree
            BraceOpen "{"
            Metavariable "$x"
            Plus "+"
            IntegerLiteral
              IntNumber "1"
            BraceClose "}"
        Semicolon ";"
        BraceClose "}"
    "#);

    let def = definition(&res);
    assert_eq!(def.name().unwrap().text(), "m");
    let rules: Vec<_> = def.rules().collect();
    assert_eq!(rules.len(), 1);

    let pattern = rules[0].pattern().unwrap();
    assert_eq!(pattern.delimiter(), Some(SyntaxKind::ParenOpen));
    let binding = pattern
        .as_cst()
        .descendants()
        .find_map(TokenBindingPattern::cast)
        .unwrap();
    assert_eq!(binding.name().unwrap().text(), "$x");
    assert_eq!(binding.fragment().unwrap().text(), "expr");

    let template = rules[0].template().unwrap();
    assert_eq!(template.delimiter(), Some(SyntaxKind::BraceOpen));
}

#[test]
fn repetitions_with_and_without_separator() {
    let source = indoc! {r#"
    macro_rules! list {
        ($($e:expr),* $(,)?) => { [$($e),*] };
    }
    "#};
    let res = parse(source);
    assert!(res.is_valid());

    let rule = definition(&res).rules().next().unwrap();
    let matchers: Vec<TokenRepetitionPattern> = rule
        .pattern()
        .unwrap()
        .as_cst()
        .descendants()
        .filter_map(TokenRepetitionPattern::cast)
        .collect();
    assert_eq!(matchers.len(), 2);
    assert_eq!(matchers[0].separator().unwrap().text(), ",");
    assert_eq!(matchers[0].operator().unwrap().text(), "*");
    assert!(matchers[1].separator().is_none());
    assert_eq!(matchers[1].operator().unwrap().text(), "?");

    let expansion = rule
        .template()
        .unwrap()
        .as_cst()
        .descendants()
        .find_map(TokenRepetition::cast)
        .unwrap();
    assert_eq!(expansion.separator().unwrap().text(), ",");
    assert_eq!(expansion.operator().unwrap().text(), "*");
}

#[test]
fn unknown_fragment_specifier() {
    let res = parse("macro_rules! m { ($x:bogus) => {}; }");

    assert_eq!(
        res.diagnostics().kinds(),
        vec![DiagnosticKind::UnknownFragmentSpecifier]
    );
}

#[test]
fn parenthesized_body_needs_semicolon() {
    assert!(parse("macro_rules! m ( () => () );").is_valid());
    assert!(!parse("macro_rules! m ( () => () )").is_valid());
}

#[test]
fn brace_invocation_is_not_a_statement() {
    let res = parse("m! { a } n!(b);");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (macro_invocation (path (path_segment)) (token_tree)) (expression_statement (macro_invocation (path (path_segment)) (token_tree))))");
}

#[test]
fn invocations_in_pattern_type_and_value_position() {
    let res = parse("let p!(): t!(u8) = v![1];");
    assert!(res.is_valid());

    let decl = res
        .syntax()
        .descendants()
        .find_map(LetDeclaration::cast)
        .unwrap();
    assert_eq!(decl.pattern().unwrap().kind(), SyntaxKind::MacroInvocation);
    assert_eq!(decl.ty().unwrap().kind(), SyntaxKind::MacroInvocation);
    assert_eq!(decl.value().unwrap().kind(), SyntaxKind::MacroInvocation);

    let names: Vec<String> = res
        .syntax()
        .descendants()
        .filter(|n: &SyntaxNode| n.kind() == SyntaxKind::MacroInvocation)
        .map(|n| n.first_token().unwrap().text().to_string())
        .collect();
    assert_eq!(names, ["p", "t", "v"]);
}

#[test]
fn invocations_among_declarations() {
    let res = parse("impl S { m!(); n! {} }");
    assert!(res.is_valid());

    let Some(Item::ImplItem(imp)) = res.tree().items().next() else {
        panic!("expected an impl");
    };
    let kinds: Vec<SyntaxKind> = imp.body().unwrap().items().map(|i| i.kind()).collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::MacroInvocation, SyntaxKind::MacroInvocation]
    );

    let missing = parse("trait T { m!() }");
    assert_eq!(missing.diagnostics().kinds(), vec![DiagnosticKind::UnexpectedToken]);
}

#[test]
fn token_trees_accept_any_token() {
    let source = "m!(fn ==> &&& spec @ 'a r\"s\");";

    assert!(parse(source).is_valid());
    assert!(parse_base(source).is_valid());
}
