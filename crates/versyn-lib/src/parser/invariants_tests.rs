use super::core::Parser;
use crate::language::Conflict;
use crate::lexer::lex;
use crate::{GrammarConfig, Language};

#[test]
fn declared_conflicts_pass() {
    let lang = Language::build(GrammarConfig::verification()).unwrap();
    let parser = Parser::new("x", lex("x", GrammarConfig::verification()), &lang);

    parser.assert_declared(Conflict::QuantifierOrBinary);
    parser.assert_declared(Conflict::TupleOrParenthesized);
}

#[test]
#[should_panic(expected = "`quantifier_or_binary` resolved but not declared by the base grammar")]
fn overlay_conflict_in_base_parser() {
    let lang = Language::build(GrammarConfig::base()).unwrap();
    let parser = Parser::new("x", lex("x", GrammarConfig::base()), &lang);

    parser.assert_declared(Conflict::QuantifierOrBinary);
}

#[test]
#[should_panic(expected = "lookahead resolvers peeked without consuming")]
fn endless_lookahead_is_stuck() {
    let lang = Language::build(GrammarConfig::base()).unwrap();
    let parser = Parser::new("x", lex("x", GrammarConfig::base()), &lang);

    loop {
        parser.nth_raw(0);
    }
}
