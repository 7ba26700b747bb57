use crate::lexer::scanner::{
    RawStringFence, scan_block_comment, scan_escape, scan_number, scan_string_content,
    shebang_len,
};
use crate::parser::cst::SyntaxKind;

#[test]
fn string_content_stops_at_quote_or_escape() {
    assert_eq!(scan_string_content(r#"abc"rest"#), 3);
    assert_eq!(scan_string_content(r"ab\n"), 2);
    assert_eq!(scan_string_content("tail"), 4);
}

#[test]
fn escapes() {
    assert_eq!(scan_escape(r"\n"), 2);
    assert_eq!(scan_escape(r"\x7f!"), 4);
    assert_eq!(scan_escape(r"\u{1F600}x"), 9);
    assert_eq!(scan_escape("\\\n    next"), 6);
    assert_eq!(scan_escape(r"\"), 1);
}

#[test]
fn raw_string_fence_records_hash_count() {
    assert_eq!(RawStringFence::open("r\"").hashes(), 0);
    assert_eq!(RawStringFence::open("br##\"").hashes(), 2);
    assert_eq!(RawStringFence::open("cr#\"").close_len(), 2);
}

#[test]
fn raw_string_fence_requires_exact_length() {
    let fence = RawStringFence::open("r##\"");
    assert_eq!(fence.find_close(r###"a"#b"##"###), Some(4));
    assert_eq!(fence.find_close(r####"a"###"####), None);
    assert_eq!(fence.find_close(r#"a"#), None);

    let bare = RawStringFence::open("r\"");
    assert_eq!(bare.find_close(r##"x"#"##), None);
    assert_eq!(bare.find_close(r#"x" "#), Some(1));
}

#[test]
fn numbers() {
    assert_eq!(scan_number("123abc", false), (SyntaxKind::IntNumber, 6));
    assert_eq!(scan_number("1.2.3", false), (SyntaxKind::FloatNumber, 3));
    assert_eq!(scan_number("1..2", false), (SyntaxKind::IntNumber, 1));
    assert_eq!(scan_number("1.e3", false), (SyntaxKind::IntNumber, 1));
    assert_eq!(scan_number("1_000.0_1", false), (SyntaxKind::FloatNumber, 9));
    assert_eq!(scan_number("1E+7)", false), (SyntaxKind::FloatNumber, 4));
    assert_eq!(scan_number("0o17u32", false), (SyntaxKind::IntNumber, 7));
}

#[test]
fn tuple_index_takes_digits_only() {
    assert_eq!(scan_number("0.1", true), (SyntaxKind::IntNumber, 1));
    assert_eq!(scan_number("12", true), (SyntaxKind::IntNumber, 2));
}

#[test]
fn block_comment_kinds() {
    assert_eq!(
        scan_block_comment("/* x */y"),
        Some((SyntaxKind::BlockComment, 7))
    );
    assert_eq!(
        scan_block_comment("/** x */"),
        Some((SyntaxKind::DocComment, 8))
    );
    assert_eq!(
        scan_block_comment("/*! x */"),
        Some((SyntaxKind::InnerDocComment, 8))
    );
    assert_eq!(
        scan_block_comment("/*** x */"),
        Some((SyntaxKind::BlockComment, 9))
    );
    assert_eq!(
        scan_block_comment("/* /* */ */"),
        Some((SyntaxKind::BlockComment, 11))
    );
    assert_eq!(scan_block_comment("/* /* */"), None);
}

#[test]
fn shebang_lines() {
    assert_eq!(shebang_len("#!/bin/sh\nfn main() {}"), Some(9));
    assert_eq!(shebang_len("#!"), Some(2));
    assert_eq!(shebang_len("#![no_std]"), None);
    assert_eq!(shebang_len("#!  \n [x]"), None);
    assert_eq!(shebang_len("fn"), None);
}
