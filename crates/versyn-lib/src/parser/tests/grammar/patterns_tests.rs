use crate::parser::SyntaxKind;
use crate::parser::ast::{LetDeclaration, MatchExpression, Pattern};
use crate::parser::tests::{parse, parse_base};
use crate::parser::{Parse, SyntaxNode};

fn let_pattern(res: &Parse) -> Pattern {
    res.syntax()
        .descendants()
        .find_map(LetDeclaration::cast)
        .and_then(|l| l.pattern())
        .expect("source has a let with a pattern")
}

fn first_match(res: &Parse) -> MatchExpression {
    res.syntax()
        .descendants()
        .find_map(MatchExpression::cast)
        .expect("source has a match expression")
}

fn arm_patterns(res: &Parse) -> Vec<Pattern> {
    first_match(res)
        .arms()
        .map(|arm| arm.pattern().unwrap())
        .collect()
}

fn pattern_kinds(patterns: &[Pattern]) -> Vec<SyntaxKind> {
    patterns.iter().map(|p| p.kind()).collect()
}

#[test]
fn tuple_pattern() {
    let res = parse("let (a, mut b, _) = t;");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (let_declaration (tuple_pattern (identifier_pattern) (identifier_pattern) (wildcard_pattern)) (path_expression (path (path_segment)))))");

    let Pattern::TuplePattern(tuple) = let_pattern(&res) else {
        panic!("expected a tuple pattern");
    };
    let elements: Vec<Pattern> = tuple.elements().collect();
    let Pattern::IdentifierPattern(b) = &elements[1] else {
        panic!("expected a binding");
    };
    assert!(b.is_mut());
    assert!(!b.is_ref());
}

#[test]
fn alternatives_nest_to_the_left() {
    let res = parse("match v { A | B | C => 0 }");
    assert!(res.is_valid());

    let patterns = arm_patterns(&res);
    let Pattern::OrPattern(outer) = &patterns[0] else {
        panic!("expected an or-pattern");
    };
    let alternatives: Vec<Pattern> = outer.alternatives().collect();
    assert_eq!(
        pattern_kinds(&alternatives),
        vec![SyntaxKind::OrPattern, SyntaxKind::IdentifierPattern]
    );
}

#[test]
fn leading_pipe_makes_an_or_pattern() {
    let res = parse("let | A = x;");
    assert!(res.is_valid());
    assert_eq!(let_pattern(&res).kind(), SyntaxKind::OrPattern);
}

#[test]
fn slice_with_rest() {
    let res = parse("let [first, .., last] = xs;");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (let_declaration (slice_pattern (identifier_pattern) (rest_pattern) (identifier_pattern)) (path_expression (path (path_segment)))))");
}

#[test]
fn literal_and_range_patterns() {
    let res = parse("match n { 1..=5 => a, -1 => b, 'a'..='z' => c, 0.. => d, }");
    assert!(res.is_valid());

    assert_eq!(
        pattern_kinds(&arm_patterns(&res)),
        vec![
            SyntaxKind::RangePattern,
            SyntaxKind::LiteralPattern,
            SyntaxKind::RangePattern,
            SyntaxKind::RangePattern,
        ]
    );
}

#[test]
fn struct_pattern_fields() {
    let res = parse("let S { f, g: 0, ref mut h, .. } = s;");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (let_declaration (struct_pattern (path (path_segment)) (field_pattern) (field_pattern (literal_pattern (integer_literal))) (field_pattern) (rest_pattern)) (path_expression (path (path_segment)))))");
}

#[test]
fn paths_bindings_and_wildcards() {
    let res = parse("match e { E::V => 0, n @ 1..=9 => n, &(a, _) => a, _ => 1 }");
    assert!(res.is_valid());

    let patterns = arm_patterns(&res);
    assert_eq!(
        pattern_kinds(&patterns),
        vec![
            SyntaxKind::PathPattern,
            SyntaxKind::IdentifierPattern,
            SyntaxKind::ReferencePattern,
            SyntaxKind::WildcardPattern,
        ]
    );
    let Pattern::IdentifierPattern(n) = &patterns[1] else {
        panic!("expected a binding");
    };
    assert_eq!(n.name().unwrap().text(), "n");
    assert_eq!(n.subpattern().unwrap().kind(), SyntaxKind::RangePattern);
}

#[test]
fn match_guard() {
    let res = parse("match p { Some(x) if x > 0 => x, _ => 0 }");
    assert!(res.is_valid());

    let arm = first_match(&res).arms().next().unwrap();
    assert_eq!(arm.pattern().unwrap().kind(), SyntaxKind::TupleStructPattern);
    assert_eq!(arm.guard().unwrap().kind(), SyntaxKind::BinaryExpression);
}

#[test]
fn data_mode_on_let_binding() {
    let res = parse("let ghost x = 1;");
    assert!(res.is_valid());

    let decl: LetDeclaration = res
        .syntax()
        .children()
        .find_map(LetDeclaration::cast)
        .unwrap();
    assert_eq!(decl.data_mode().unwrap().kind(), SyntaxKind::GhostKw);
    assert_eq!(let_pattern(&res).kind(), SyntaxKind::IdentifierPattern);

    let named_ghost = parse("let ghost = 1;");
    assert!(named_ghost.is_valid());
    let Pattern::IdentifierPattern(p) = let_pattern(&named_ghost) else {
        panic!("expected a binding");
    };
    assert_eq!(p.name().unwrap().text(), "ghost");

    assert!(!parse_base("let ghost x = 1;").is_valid());
}

#[test]
fn error_free_patterns_have_no_error_nodes() {
    let res = parse("let (a, [b, ..], S { c, .. }, -1..=1) = t;");

    assert!(res.is_valid());
    assert!(res.syntax().descendants().all(|n: SyntaxNode| n.kind() != SyntaxKind::Error));
}
