use crate::DiagnosticKind;
use crate::parser::ast::{Expr, SourceFile};
use crate::parser::tests::{parse, parse_base};

fn tail(tree: &SourceFile) -> Expr {
    tree.tail().expect("source ends with an expression")
}

/// Operator text of a binary, assignment or range expression.
fn op(expr: &Expr) -> String {
    match expr {
        Expr::BinaryExpression(e) => e.operator().unwrap().text().to_string(),
        Expr::RangeExpression(e) => e.operator().unwrap().text().to_string(),
        Expr::AssignmentExpression(_) => "=".to_string(),
        other => panic!("not an infix expression: {:?}", other.kind()),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let res = parse("1 + 2 * 3");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.dump(), @r#"
    SourceFile
      BinaryExpression
        IntegerLiteral
          IntNumber "1"
        Plus "+"
        BinaryExpression
          IntegerLiteral
            IntNumber "2"
          Star "*"
          IntegerLiteral
            IntNumber "3"
    "#);
}

#[test]
fn postfix_chain() {
    let res = parse("a.b()?");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.dump(), @r#"
    SourceFile
      TryExpression
        CallExpression
          FieldExpression
            PathExpression
              Path
                PathSegment
                  Ident "a"
            Dot "."
            Ident "b"
          Arguments
            ParenOpen "("
            ParenClose ")"
        Question "?"
    "#);
}

#[test]
fn conjunction_binds_tighter_than_implication() {
    let res = parse("x ==> y && z");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.dump(), @r#"
    SourceFile
      BinaryExpression
        PathExpression
          Path
            PathSegment
              Ident "x"
        Implies "==>"
        BinaryExpression
          PathExpression
            Path
              PathSegment
                Ident "y"
          AmpAmp "&&"
          PathExpression
            Path
              PathSegment
                Ident "z"
    "#);
}

#[test]
fn implication_is_right_associative() {
    let res = parse("a ==> b ==> c");
    assert!(res.is_valid());

    let Expr::BinaryExpression(outer) = tail(&res.tree()) else {
        panic!("expected a binary expression");
    };
    assert!(matches!(outer.left(), Some(Expr::PathExpression(_))));
    assert_eq!(op(&outer.right().unwrap()), "==>");
}

#[test]
fn subtraction_is_left_associative() {
    let res = parse("a - b - c");

    let Expr::BinaryExpression(outer) = tail(&res.tree()) else {
        panic!("expected a binary expression");
    };
    assert_eq!(op(&outer.left().unwrap()), "-");
    assert!(matches!(outer.right(), Some(Expr::PathExpression(_))));
}

#[test]
fn assignment_is_right_associative() {
    let res = parse("a = b = c;");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (expression_statement (assignment_expression (path_expression (path (path_segment))) (assignment_expression (path_expression (path (path_segment))) (path_expression (path (path_segment)))))))");
}

#[test]
fn unary_and_cast_bind_tighter_than_binary() {
    let res = parse("-a * b as u64 + !c");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (binary_expression (binary_expression (unary_expression (path_expression (path (path_segment)))) (cast_expression (path_expression (path (path_segment))) (path_type (path (path_segment))))) (unary_expression (path_expression (path (path_segment))))))");
}

#[test]
fn double_ampersand_prefix_is_two_references() {
    let res = parse("&&x");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.dump(), @r#"
    SourceFile
      ReferenceExpression
        Amp "&"
        ReferenceExpression
          Amp "&"
          PathExpression
            Path
              PathSegment
                Ident "x"
    "#);
}

#[test]
fn ranges() {
    let res = parse("a..b");
    assert_eq!(op(&tail(&res.tree())), "..");

    let res = parse("..=n");
    let Expr::RangeExpression(range) = tail(&res.tree()) else {
        panic!("expected a range");
    };
    assert_eq!(range.operator().unwrap().text(), "..=");
    assert_eq!(range.operands().count(), 1);
}

#[test]
fn chained_comparison_is_reported_in_base() {
    let res = parse_base("a == b == c");

    assert_eq!(res.diagnostics().kinds(), vec![DiagnosticKind::ChainedNonAssociative]);
    let message = res.diagnostics().iter().next().unwrap().message().to_string();
    assert_eq!(message, "`==` operators cannot be chained");
}

#[test]
fn ordering_chains_are_accepted_with_overlay() {
    assert!(parse("a < b <= c").is_valid());
    assert!(!parse_base("a < b <= c").is_valid());
    assert!(!parse("a == b < c").is_valid());
}

#[test]
fn method_call_with_turbofish() {
    let res = parse("iter.collect::<Vec<_>>()");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (call_expression (generic_function (field_expression (path_expression (path (path_segment)))) (type_arguments (path_type (path (path_segment (type_arguments (inferred_type))))))) (arguments)))");
}

#[test]
fn struct_literal_not_allowed_in_condition() {
    let res = parse("if x == S { a } else { b }");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (expression_statement (if_expression (binary_expression (path_expression (path (path_segment))) (path_expression (path (path_segment)))) (block (path_expression (path (path_segment)))) (else_clause (block (path_expression (path (path_segment))))))))");
}

#[test]
fn let_chain_condition() {
    let res = parse("if let Some(x) = a && x > 0 { x }");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (expression_statement (if_expression (let_chain (let_condition (tuple_struct_pattern (path (path_segment)) (identifier_pattern)) (path_expression (path (path_segment)))) (binary_expression (path_expression (path (path_segment))) (integer_literal))) (block (path_expression (path (path_segment)))))))");
}

#[test]
fn closure_and_call() {
    let res = parse("map(|x| x + 1)");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (call_expression (path_expression (path (path_segment))) (arguments (closure_expression (closure_parameters (identifier_pattern)) (binary_expression (path_expression (path (path_segment))) (integer_literal))))))");
}

#[test]
fn block_like_statement_ends_without_semicolon() {
    let res = parse("fn f() { loop { break; } x }");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (function_item (parameters) (block (expression_statement (loop_expression (block (expression_statement (break_expression))))) (path_expression (path (path_segment))))))");
}
