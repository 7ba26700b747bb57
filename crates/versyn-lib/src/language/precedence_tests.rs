use super::*;
use crate::parser::cst::SyntaxKind;

fn render(table: &PrecedenceTable) -> String {
    table
        .levels()
        .iter()
        .map(|l| {
            let ops: Vec<&str> = l.operators.iter().map(|op| op.text).collect();
            format!("{} {:?} {}", l.tier.name(), l.assoc, ops.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn verification_scale() {
    let table = PrecedenceTable::new(GrammarConfig::verification()).unwrap();

    insta::assert_snapshot!(render(&table), @r"
    closure Right | || move
    assignment Right = += -= *= /= %= ^= &= |= <<= >>=
    range None .. ..=
    big_connective Right &&& |||
    implication Right ==> <== <==>
    or Left ||
    and Left &&
    comparison None == != < <= > >= === !== =~= !~= =~~= !~~=
    bitor Left |
    bitxor Left ^
    bitand Left &
    shift Left << >>
    additive Left + -
    multiplicative Left * / %
    cast Left as
    unary Right - ! * &
    try Left ? @
    field Left .
    call Left ( [
    ");
}

#[test]
fn base_scale_has_no_overlay_tiers() {
    let table = PrecedenceTable::new(GrammarConfig::base()).unwrap();

    assert!(!table.has_tier(Tier::Implication));
    assert!(!table.has_tier(Tier::BigConnective));
    assert!(table.infix(SyntaxKind::Implies).is_none());
    assert!(table.infix(SyntaxKind::ExtEq).is_none());
    assert!(table.postfix(SyntaxKind::At).is_none());
    assert!(table.levels().iter().all(|l| !l.tier.is_overlay()));
}

#[test]
fn binding_powers() {
    let table = PrecedenceTable::new(GrammarConfig::base()).unwrap();

    // closure 0, assignment 1, range 2, or 3, and 4, comparison 5, ..., additive 10
    assert_eq!(table.binding_power(Tier::Assignment), Some((5, 4)));
    assert_eq!(table.binding_power(Tier::Range), Some((6, 7)));
    assert_eq!(table.binding_power(Tier::Additive), Some((22, 23)));
    assert_eq!(table.binding_power(Tier::Multiplicative), Some((24, 25)));
    assert_eq!(table.binding_power(Tier::Implication), None);

    let verus = PrecedenceTable::new(GrammarConfig::verification()).unwrap();
    assert_eq!(verus.binding_power(Tier::Implication), Some((11, 10)));
    assert_eq!(verus.binding_power(Tier::Or), Some((12, 13)));
}

#[test]
fn tighter_tiers_bind_harder() {
    let table = PrecedenceTable::new(GrammarConfig::verification()).unwrap();
    let levels = table.levels();

    for pair in levels.windows(2) {
        let (low, _) = table.binding_power(pair[0].tier).unwrap();
        let (high, _) = table.binding_power(pair[1].tier).unwrap();
        assert!(low < high, "{} vs {}", pair[0].tier.name(), pair[1].tier.name());
    }
}

#[test]
fn same_token_different_fixity() {
    let table = PrecedenceTable::new(GrammarConfig::base()).unwrap();

    assert_eq!(table.infix(SyntaxKind::Minus).map(|op| op.tier), Some(Tier::Additive));
    assert_eq!(table.prefix(SyntaxKind::Minus).map(|op| op.tier), Some(Tier::Unary));
    assert_eq!(table.infix(SyntaxKind::Pipe).map(|op| op.tier), Some(Tier::BitOr));
    assert_eq!(table.prefix(SyntaxKind::Pipe).map(|op| op.tier), Some(Tier::Closure));
}

#[test]
fn chained_comparisons_only_in_overlay() {
    let base = PrecedenceTable::new(GrammarConfig::base()).unwrap();
    let verus = PrecedenceTable::new(GrammarConfig::verification()).unwrap();

    assert!(!base.allows_chained_comparison(SyntaxKind::Lt, SyntaxKind::LtEq));
    assert!(verus.allows_chained_comparison(SyntaxKind::Lt, SyntaxKind::LtEq));
    assert!(!verus.allows_chained_comparison(SyntaxKind::EqEq, SyntaxKind::EqEq));
}

#[test]
fn precedences_run_tightest_first() {
    let table = PrecedenceTable::new(GrammarConfig::base()).unwrap();
    let order = &table.precedences()[0];

    assert_eq!(order.first(), Some(&versyn_core::PrecedenceEntry::Name("call".into())));
    assert_eq!(order.last(), Some(&versyn_core::PrecedenceEntry::Name("closure".into())));
}

#[test]
fn operator_in_two_tiers_is_rejected() {
    let levels = vec![
        Level::new(Tier::Additive, Assoc::Left).with(Fixity::Infix, &[(SyntaxKind::Plus, "+")]),
        Level::new(Tier::Multiplicative, Assoc::Left)
            .with(Fixity::Infix, &[(SyntaxKind::Plus, "+")]),
    ];

    assert_eq!(
        PrecedenceTable::from_levels(levels).unwrap_err(),
        GrammarError::PrecedenceCollision {
            operator: "+".into(),
            first: "additive",
            second: "multiplicative",
        }
    );
}

#[test]
fn tier_listed_twice_is_rejected() {
    let levels = vec![
        Level::new(Tier::Shift, Assoc::Left),
        Level::new(Tier::Shift, Assoc::Left),
    ];

    assert_eq!(
        PrecedenceTable::from_levels(levels).unwrap_err(),
        GrammarError::DuplicateTier { tier: "shift" }
    );
}

#[test]
fn mixed_associativity_is_rejected() {
    let mut level =
        Level::new(Tier::Additive, Assoc::Left).with(Fixity::Infix, &[(SyntaxKind::Plus, "+")]);
    level.operators.push(Operator {
        token: SyntaxKind::Minus,
        text: "-",
        fixity: Fixity::Infix,
        assoc: Assoc::Right,
        tier: Tier::Additive,
    });

    assert_eq!(
        PrecedenceTable::from_levels(vec![level]).unwrap_err(),
        GrammarError::MixedAssociativity { tier: "additive" }
    );
}
