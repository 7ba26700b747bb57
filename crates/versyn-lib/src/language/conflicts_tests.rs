use super::*;
use crate::parser::cst::SyntaxKind;

#[test]
fn overlay_conflicts_only_when_enabled() {
    let base = Conflict::all(GrammarConfig::base());
    let verus = Conflict::all(GrammarConfig::verification());

    assert_eq!(base.len(), 7);
    assert_eq!(verus.len(), 13);
    assert!(base.iter().all(|c| !c.is_overlay()));
    assert_eq!(verus.iter().filter(|c| c.is_overlay()).count(), 6);
}

#[test]
fn names_are_unique() {
    let all = Conflict::all(GrammarConfig::verification());
    for (i, a) in all.iter().enumerate() {
        for b in &all[..i] {
            assert_ne!(a.name(), b.name());
        }
    }
}

#[test]
fn every_conflict_names_rules_of_its_dialect() {
    let verus = Language::build(GrammarConfig::verification()).unwrap();
    let base = Language::build(GrammarConfig::base()).unwrap();

    for conflict in verus.conflicts() {
        for rule in conflict.rules() {
            assert!(verus.grammar().has_rule(rule), "{}: {rule}", conflict.name());
        }
        if conflict.is_overlay() {
            let missing = conflict.rules().iter().any(|r| !base.grammar().has_rule(r));
            assert!(missing, "{} only names base rules", conflict.name());
        }
    }
}

#[test]
fn terminators() {
    assert!(Conflict::TupleOrParenthesized.terminators().contains(SyntaxKind::Comma));
    assert!(Conflict::TupleOrParenthesized.terminators().contains(SyntaxKind::ParenClose));
    assert!(!Conflict::TupleOrParenthesized.terminators().contains(SyntaxKind::Colon));
    assert!(Conflict::StructLiteralOrBlock.terminators().contains(SyntaxKind::BraceOpen));
    assert!(Conflict::QuantifierOrBinary.terminators().contains(SyntaxKind::Pipe));
    assert_eq!(Conflict::DataModeOrIdentifier.terminators(), crate::parser::cst::TokenSet::EMPTY);
}

#[test]
fn description_lists_rule_sets() {
    let verus = Language::build(GrammarConfig::verification()).unwrap();

    insta::assert_snapshot!(
        verus.grammar().conflicts.iter().map(|c| c.join(" ")).collect::<Vec<_>>().join("\n"),
        @r"
    _type _pattern
    unit_type tuple_pattern
    parameters tuple_pattern
    visibility_modifier tuple_type
    tuple_expression parenthesized_expression
    struct_expression block
    path_expression path_type
    requires_clause ensures_clause recommends_clause decreases_clause invariant_clause opens_invariants_clause call_expression
    assert_expression expression_statement
    quantifier_expression binary_expression
    named_return tuple_type
    data_mode identifier_pattern
    function_mode path_expression
    "
    );
}
