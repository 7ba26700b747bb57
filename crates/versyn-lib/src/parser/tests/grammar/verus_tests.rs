use indoc::indoc;

use crate::parser::SyntaxKind;
use crate::parser::ast::{
    AssertExpression, BroadcastGroup, BroadcastUse, ExpressionStatement, Expr, Item,
    LetDeclaration,
};
use crate::parser::tests::{parse, parse_base};
use crate::parser::{Parse, SyntaxNode};

fn first_function(res: &Parse) -> crate::parser::ast::FunctionItem {
    match res.tree().items().next() {
        Some(Item::FunctionItem(func)) => func,
        other => panic!("expected a function, got {other:?}"),
    }
}

/// Kinds of the expressions held by the body's expression statements.
fn statement_kinds(res: &Parse) -> Vec<SyntaxKind> {
    first_function(res)
        .body()
        .unwrap()
        .statements()
        .filter_map(ExpressionStatement::cast)
        .filter_map(|s| s.expr())
        .map(|e| e.kind())
        .collect()
}

fn has_kind(res: &Parse, kind: SyntaxKind) -> bool {
    res.syntax().descendants().any(|n: SyntaxNode| n.kind() == kind)
}

#[test]
fn proof_function_with_clauses() {
    let source = indoc! {r#"
    pub proof fn lemma(ghost n: nat) -> (r: nat)
        requires
            n > 0,
        ensures
            &&& r >= n
            &&& r@ == n,
        decreases n when n > 1 via helper
    {
        n
    }
    "#};
    let res = parse(source);
    assert!(res.is_valid());

    let func = first_function(&res);
    assert_eq!(func.mode().unwrap().mode(), Some(SyntaxKind::ProofKw));

    let param = func.parameters().unwrap().parameters().next().unwrap();
    assert_eq!(param.data_mode().unwrap().text(), "ghost");

    let named = func.return_type().unwrap().named().unwrap();
    assert_eq!(named.name().unwrap().text(), "r");

    assert_eq!(func.requires().unwrap().exprs().count(), 1);

    let ensures: Vec<Expr> = func.ensures().unwrap().exprs().collect();
    assert_eq!(ensures.len(), 1);
    let Expr::BigAndExpression(conjunction) = &ensures[0] else {
        panic!("expected a big conjunction");
    };
    let operands: Vec<Expr> = conjunction.operands().collect();
    assert_eq!(operands.len(), 2);
    let Expr::BinaryExpression(eq) = &operands[1] else {
        panic!("expected a comparison");
    };
    assert!(matches!(eq.left(), Some(Expr::ViewExpression(_))));

    let decreases = func.decreases().unwrap();
    assert!(decreases.has_when());
    assert_eq!(decreases.exprs().count(), 2);
    assert_eq!(decreases.via().unwrap().text(), "helper");
}

#[test]
fn proof_statements_in_body() {
    let source = indoc! {r#"
    fn f(x: u64) {
        assert(x >= 0);
        assert(x < 100) by(nonlinear_arith);
        assert(x == x) by {
            reveal(g);
        }
        assert forall|i: int| 0 <= i < 10 implies g(i) by {
            lemma(i);
        }
        assume(x > 1);
        proof {
            let ghost y = x;
        }
    }
    "#};
    let res = parse(source);
    assert!(res.is_valid());

    assert_eq!(
        statement_kinds(&res),
        vec![
            SyntaxKind::AssertExpression,
            SyntaxKind::AssertExpression,
            SyntaxKind::AssertExpression,
            SyntaxKind::AssertForallExpression,
            SyntaxKind::AssumeExpression,
            SyntaxKind::ProofBlock,
        ]
    );

    let asserts: Vec<AssertExpression> = res
        .syntax()
        .descendants()
        .filter_map(AssertExpression::cast)
        .collect();
    assert!(!asserts[0].has_by());
    assert!(asserts[1].has_by());
    assert!(asserts[1].proof().is_none());
    assert!(asserts[2].proof().is_some());

    let ghost_let = res
        .syntax()
        .descendants()
        .find_map(LetDeclaration::cast)
        .unwrap();
    assert_eq!(ghost_let.data_mode().unwrap().kind(), SyntaxKind::GhostKw);
}

#[test]
fn quantifier_with_trigger() {
    let source = indoc! {r#"
    spec fn all_pos(s: Seq<int>) -> bool {
        forall|i: int| #![trigger s[i]] 0 <= i < s.len() ==> s[i] > 0
    }
    "#};
    let res = parse(source);
    assert!(res.is_valid());

    let func = first_function(&res);
    assert_eq!(func.mode().unwrap().mode(), Some(SyntaxKind::SpecKw));
    let Some(Expr::QuantifierExpression(q)) = func.body().unwrap().tail() else {
        panic!("expected a quantifier");
    };
    assert_eq!(q.quantifier().unwrap().kind(), SyntaxKind::ForallKw);
    assert_eq!(q.parameters().unwrap().patterns().count(), 1);
    assert_eq!(q.triggers().count(), 1);
    let Some(Expr::BinaryExpression(body)) = q.body() else {
        panic!("expected an implication");
    };
    assert_eq!(body.operator().unwrap().text(), "==>");
}

#[test]
fn open_spec_checked_mode() {
    let res = parse("open spec(checked) fn f() -> int { 1 }");
    assert!(res.is_valid());

    let mode = first_function(&res).mode().unwrap();
    assert_eq!(mode.opacity(), Some(SyntaxKind::OpenKw));
    assert_eq!(mode.mode(), Some(SyntaxKind::SpecKw));
    assert!(mode.is_checked());
}

#[test]
fn loop_clauses() {
    let source = indoc! {r#"
    fn g() {
        let mut i = 0;
        while i < 10
            invariant i <= 10,
            decreases 10 - i,
        {
            i += 1;
        }
    }
    "#};
    let res = parse(source);
    assert!(res.is_valid());

    assert!(has_kind(&res, SyntaxKind::InvariantClause));
    assert!(has_kind(&res, SyntaxKind::DecreasesClause));
    assert_eq!(statement_kinds(&res), vec![SyntaxKind::WhileExpression]);
}

#[test]
fn broadcast_and_global_items() {
    let source = indoc! {r#"
    broadcast group g_lemmas { lemma_a, m::lemma_b }
    broadcast use g_lemmas, vstd::seq::group_seq_axioms;
    global size_of usize == 8;
    "#};
    let res = parse(source);
    assert!(res.is_valid());

    let kinds: Vec<SyntaxKind> = res.tree().items().map(|i| i.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::BroadcastGroup,
            SyntaxKind::BroadcastUse,
            SyntaxKind::GlobalItem,
        ]
    );

    let group = res
        .syntax()
        .children()
        .find_map(BroadcastGroup::cast)
        .unwrap();
    let members: Vec<String> = group.members().map(|p| p.text()).collect();
    assert_eq!(members, ["lemma_a", "m::lemma_b"]);

    let used = res.syntax().children().find_map(BroadcastUse::cast).unwrap();
    assert_eq!(used.paths().count(), 2);
}

#[test]
fn overlay_words_are_plain_names_in_base() {
    let res = parse_base("fn f(x: u8) requires x > 0 {}");

    assert!(!res.is_valid());
    assert!(
        res.syntax()
            .descendants()
            .all(|n: SyntaxNode| !n.kind().is_overlay_node())
    );

    let verus = parse("fn f(x: u8) requires x > 0 {}");
    assert!(verus.is_valid());
    assert!(has_kind(&verus, SyntaxKind::RequiresClause));
}

#[test]
fn view_needs_the_overlay() {
    assert!(parse("x@").is_valid());
    assert!(!parse_base("x@").is_valid());
}

/// Non-trivia tokens that are direct children of `node`.
fn own_tokens(node: &SyntaxNode) -> Vec<(SyntaxKind, String)> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
        .map(|t| (t.kind(), t.text().to_string()))
        .collect()
}

#[test]
fn adjacent_contextual_keywords_skip_whitespace() {
    let res = parse("broadcast group g { a }");
    assert!(res.is_valid());
    assert_eq!(res.syntax().children().count(), 1);

    let group = res.syntax().children().find_map(BroadcastGroup::cast).unwrap();
    assert_eq!(
        own_tokens(group.as_cst()),
        vec![
            (SyntaxKind::BroadcastKw, "broadcast".to_string()),
            (SyntaxKind::GroupKw, "group".to_string()),
            (SyntaxKind::Ident, "g".to_string()),
            (SyntaxKind::BraceOpen, "{".to_string()),
            (SyntaxKind::BraceClose, "}".to_string()),
        ]
    );

    let res = parse("assert forall|i: int| i == i by {}");
    assert!(res.is_valid());
    let node = res
        .syntax()
        .descendants()
        .find(|n: &SyntaxNode| n.kind() == SyntaxKind::AssertForallExpression)
        .unwrap();
    let tokens = own_tokens(&node);
    assert_eq!(tokens[0], (SyntaxKind::AssertKw, "assert".to_string()));
    assert_eq!(tokens[1], (SyntaxKind::ForallKw, "forall".to_string()));
    assert!(
        node.descendants()
            .all(|n: SyntaxNode| n.kind() != SyntaxKind::QuantifierExpression)
    );
}
