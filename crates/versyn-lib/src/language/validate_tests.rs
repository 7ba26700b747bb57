use versyn_core::grammar::dsl::*;
use versyn_core::{Grammar, PrecedenceEntry, Rule, choice, seq};

use super::validate::{check, check_raw};
use super::*;

fn grammar(rules: Vec<(&str, Rule)>) -> Grammar {
    let mut grammar = Grammar::new("test");
    grammar.rules = rules.into_iter().map(|(n, r)| (n.to_string(), r)).collect();
    grammar
}

#[test]
fn minimal_grammar_passes() {
    let g = grammar(vec![
        ("source_file", repeat(sym("item"))),
        ("item", seq!["fn", sym("identifier"), ";"]),
        ("identifier", pattern(r"[a-z]+")),
    ]);

    assert_eq!(check(&g), Ok(()));
}

#[test]
fn empty_grammar() {
    assert_eq!(check(&Grammar::new("test")), Err(GrammarError::Empty));
}

#[test]
fn duplicate_rule() {
    let g = grammar(vec![("a", "x".into()), ("a", "y".into())]);

    assert_eq!(check(&g), Err(GrammarError::DuplicateRule("a".into())));
}

#[test]
fn undefined_symbol() {
    let g = grammar(vec![("a", seq!["x", sym("missing")])]);

    assert_eq!(
        check(&g),
        Err(GrammarError::UndefinedSymbol {
            rule: "a".into(),
            symbol: "missing".into(),
        })
    );
}

#[test]
fn external_symbols_are_defined() {
    let mut g = grammar(vec![("a", seq!["x", sym("string_content")])]);
    g.externals = vec![sym("string_content")];

    assert_eq!(check(&g), Ok(()));
}

#[test]
fn unreachable_rule() {
    let g = grammar(vec![("a", "x".into()), ("orphan", "y".into())]);

    assert_eq!(check(&g), Err(GrammarError::UnreachableRule("orphan".into())));
}

#[test]
fn extras_make_rules_reachable() {
    let mut g = grammar(vec![("a", "x".into()), ("comment", pattern("#.*"))]);
    g.extras = vec![sym("comment")];

    assert_eq!(check(&g), Ok(()));
}

#[test]
fn direct_left_recursion() {
    let g = grammar(vec![(
        "expr",
        choice![seq![sym("expr"), "+", sym("expr")], "x"],
    )]);

    assert_eq!(
        check(&g),
        Err(GrammarError::UnguardedLeftRecursion("expr".into()))
    );
}

#[test]
fn precedence_wrapper_guards_left_recursion() {
    let g = grammar(vec![(
        "expr",
        choice![prec_left(1, seq![sym("expr"), "+", sym("expr")]), "x"],
    )]);

    assert_eq!(check(&g), Ok(()));
}

#[test]
fn left_recursion_through_nullable_prefix() {
    let g = grammar(vec![
        ("a", choice![seq![optional("x"), sym("b")], "z"]),
        ("b", seq![sym("a"), "y"]),
    ]);

    assert_eq!(check(&g), Err(GrammarError::UnguardedLeftRecursion("a".into())));
}

#[test]
fn duplicate_alternative() {
    let g = grammar(vec![("a", choice!["x", sym("b"), "x"]), ("b", "y".into())]);

    assert_eq!(check_raw(&g), Err(GrammarError::DuplicateAlternative("a".into())));
}

#[test]
fn blank_alternatives_are_not_duplicates() {
    let g = grammar(vec![("a", choice!["x", blank(), blank()])]);

    assert_eq!(check_raw(&g), Ok(()));
}

#[test]
fn invalid_pattern() {
    let g = grammar(vec![("a", pattern("[a-"))]);

    let Err(GrammarError::InvalidPattern { rule, pattern, .. }) = check(&g) else {
        panic!("expected invalid pattern");
    };
    assert_eq!(rule, "a");
    assert_eq!(pattern, "[a-");
}

#[test]
fn unknown_precedence_name() {
    let mut g = grammar(vec![("a", prec("tight", "x"))]);
    assert_eq!(
        check(&g),
        Err(GrammarError::UnknownPrecedence {
            rule: "a".into(),
            name: "tight".into(),
        })
    );

    g.precedences = vec![vec![PrecedenceEntry::Name("tight".into())]];
    assert_eq!(check(&g), Ok(()));
}

#[test]
fn conflict_with_unknown_rule() {
    let mut g = grammar(vec![("a", "x".into())]);
    g.conflicts = vec![vec!["a".into(), "ghost".into()]];

    assert_eq!(check(&g), Err(GrammarError::ConflictUnknownRule("ghost".into())));
}

#[test]
fn duplicate_conflict() {
    let mut g = grammar(vec![("a", sym("b")), ("b", "x".into())]);
    g.conflicts = vec![vec!["a".into(), "b".into()], vec!["a".into(), "b".into()]];

    assert_eq!(check(&g), Err(GrammarError::DuplicateConflict("a, b".into())));
}

#[test]
fn missing_supertype() {
    let mut g = grammar(vec![("a", "x".into())]);
    g.supertypes = vec!["_expression".into()];

    assert_eq!(
        check(&g),
        Err(GrammarError::MissingRule {
            what: "supertype",
            name: "_expression".into(),
        })
    );
}

#[test]
fn messages() {
    insta::assert_snapshot!(
        GrammarError::UndefinedSymbol { rule: "a".into(), symbol: "b".into() }.to_string(),
        @"rule `a` references undefined symbol `b`"
    );
    insta::assert_snapshot!(
        GrammarError::PrecedenceCollision { operator: "+".into(), first: "additive", second: "shift" }.to_string(),
        @"operator `+` appears in tiers `additive` and `shift`"
    );
}
