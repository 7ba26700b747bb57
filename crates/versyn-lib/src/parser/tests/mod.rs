mod grammar;
mod recovery;

use crate::{GrammarConfig, Language, Parse};

pub(super) fn verus() -> Language {
    Language::build(GrammarConfig::verification()).unwrap()
}

pub(super) fn base() -> Language {
    Language::build(GrammarConfig::base()).unwrap()
}

/// Parses with the overlay enabled.
pub(super) fn parse(source: &str) -> Parse {
    verus().parse(source).unwrap()
}

pub(super) fn parse_base(source: &str) -> Parse {
    base().parse(source).unwrap()
}
