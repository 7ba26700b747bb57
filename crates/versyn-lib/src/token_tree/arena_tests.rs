use proptest::prelude::*;
use rowan::TextRange;

use super::*;
use crate::GrammarConfig;
use crate::parser::SyntaxKind;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

fn parse(source: &str) -> Result<TokenTreeArena, DelimiterError> {
    TokenTreeArena::parse(source, GrammarConfig::verification())
}

#[test]
fn groups_nest_by_delimiter() {
    let arena = parse("f(a, [b]) { c }").unwrap();

    assert_eq!(arena.roots().len(), 3);
    assert_eq!(arena.depth(), 2);
    assert_eq!(arena.render("f(a, [b]) { c }"), "f ( a , [ b ] ) { c }");

    let call = arena.roots()[1];
    let TtNode::Group {
        delimiter, open, ..
    } = arena.get(call)
    else {
        panic!("expected a group");
    };
    assert_eq!(*delimiter, Delimiter::Paren);
    assert_eq!(*open, range(1, 2));
    assert_eq!(arena.children(call).len(), 3);
    assert_eq!(arena.get(call).range(), range(1, 9));
}

#[test]
fn string_literal_is_one_leaf() {
    let source = r#"m!("a b" x)"#;
    let arena = parse(source).unwrap();

    let group = arena.roots()[2];
    let children = arena.children(group);
    assert_eq!(children.len(), 2);
    assert_eq!(
        *arena.get(children[0]),
        TtNode::Leaf {
            kind: SyntaxKind::StringLiteral,
            range: range(3, 8),
        }
    );
    assert_eq!(arena.leaf_text(source, children[0]), Some(r#""a b""#));
    assert_eq!(arena.leaf_text(source, group), None);
}

#[test]
fn trivia_is_dropped() {
    let source = "a /* b */ c // d\n";
    let arena = parse(source).unwrap();

    assert_eq!(arena.len(), 2);
    assert_eq!(arena.render(source), "a c");
}

#[test]
fn empty_source() {
    let arena = parse("").unwrap();

    assert!(arena.is_empty());
    assert_eq!(arena.depth(), 0);
    assert_eq!(arena.render(""), "");
}

#[test]
fn unclosed_reports_innermost_opener() {
    let err = parse("(a [b").unwrap_err();

    assert_eq!(err, DelimiterError::Unclosed { open: range(3, 4) });
    assert_eq!(err.range(), range(3, 4));
    assert_eq!(err.to_string(), "unclosed delimiter at 3..4");
}

#[test]
fn mismatched_reports_opener() {
    let err = parse("(a]").unwrap_err();

    assert_eq!(
        err,
        DelimiterError::Mismatched {
            open: range(0, 1),
            close: range(2, 3),
        }
    );
    assert_eq!(err.range(), range(0, 1));
}

#[test]
fn stray_closer() {
    let err = parse("a)").unwrap_err();

    assert_eq!(err, DelimiterError::UnexpectedClose { close: range(1, 2) });
    assert_eq!(err.to_string(), "unexpected closing delimiter at 1..2");
}

fn token_tree() -> impl Strategy<Value = String> {
    let leaf = prop::sample::select(vec!["a", "1", "+", "::", "=>", "\"s\""]).prop_map(String::from);
    leaf.prop_recursive(4, 32, 5, |inner| {
        (
            prop::sample::select(vec![("(", ")"), ("[", "]"), ("{", "}")]),
            prop::collection::vec(inner, 0..5),
        )
            .prop_map(|((open, close), items)| {
                let mut parts = vec![open.to_string()];
                parts.extend(items);
                parts.push(close.to_string());
                parts.join(" ")
            })
    })
}

fn token_trees() -> impl Strategy<Value = String> {
    prop::collection::vec(token_tree(), 1..4).prop_map(|trees| trees.join(" "))
}

proptest! {
    #[test]
    fn well_nested_sequences_round_trip(source in token_trees()) {
        let arena = parse(&source).unwrap();
        prop_assert_eq!(arena.render(&source), source);
    }

    #[test]
    fn missing_closer_fails_at_an_opener(source in token_trees()) {
        prop_assume!(source.ends_with(')') || source.ends_with(']') || source.ends_with('}'));
        let broken = &source[..source.len() - 1];

        let err = parse(broken).unwrap_err();
        let DelimiterError::Unclosed { open } = err else {
            return Err(TestCaseError::fail(format!("expected unclosed, got {err:?}")));
        };
        let text = &broken[std::ops::Range::<usize>::from(open)];
        prop_assert!(matches!(text, "(" | "[" | "{"), "not an opener: {:?}", text);
    }
}
