//! External scanner: recognizers for tokens whose extent depends on context.
//!
//! Each recognizer receives the remaining input (starting at the token) and
//! returns a length or `None` for "no match". None of them fail: the driver in
//! [`super::lex`] decides what an incomplete match becomes.

use crate::parser::cst::SyntaxKind;

/// Length of string body text up to the next `"` or `\`.
pub fn scan_string_content(rest: &str) -> usize {
    rest.find(['"', '\\']).unwrap_or(rest.len())
}

/// Length of the escape sequence at the start of `rest` (which starts with `\`).
///
/// Malformed escapes still produce a token covering the backslash and the
/// following character, so string scanning always makes progress.
pub fn scan_escape(rest: &str) -> usize {
    debug_assert!(rest.starts_with('\\'));
    let mut chars = rest[1..].chars();
    let Some(c) = chars.next() else {
        return 1;
    };
    match c {
        'x' => 2 + count_while(&rest[2..], |c| c.is_ascii_hexdigit()).min(2),
        'u' if rest[2..].starts_with('{') => match rest[3..].find('}') {
            Some(close) => 3 + close + 1,
            None => 3,
        },
        // Line continuation swallows the following whitespace.
        '\n' | '\r' => 1 + count_while(&rest[1..], char::is_whitespace),
        _ => 1 + c.len_utf8(),
    }
}

/// State carried from a raw string start marker to its end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawStringFence {
    hashes: usize,
}

impl RawStringFence {
    /// Fence recorded by a start marker such as `r"`, `br##"` or `cr#"`.
    pub fn open(start: &str) -> Self {
        Self {
            hashes: start.bytes().filter(|&b| b == b'#').count(),
        }
    }

    pub fn hashes(&self) -> usize {
        self.hashes
    }

    /// Length of the end marker: the quote plus the fence.
    pub fn close_len(&self) -> usize {
        1 + self.hashes
    }

    /// Offset of the end marker in `rest`.
    ///
    /// A candidate quote closes the literal only when followed by exactly as
    /// many `#` as the start marker carried; fewer or more keep the literal open.
    pub fn find_close(&self, rest: &str) -> Option<usize> {
        let bytes = rest.as_bytes();
        let mut offset = 0;
        while let Some(found) = rest[offset..].find('"') {
            let quote = offset + found;
            let run = bytes[quote + 1..].iter().take_while(|&&b| b == b'#').count();
            if run == self.hashes {
                return Some(quote);
            }
            offset = quote + 1;
        }
        None
    }
}

/// Scans a numeric literal starting with an ASCII digit.
///
/// With `tuple_index` set (the previous token was `.`), only a plain decimal
/// integer is taken so `t.0.1` stays two field accesses.
pub fn scan_number(rest: &str, tuple_index: bool) -> (SyntaxKind, usize) {
    let bytes = rest.as_bytes();
    debug_assert!(bytes.first().is_some_and(u8::is_ascii_digit));

    if tuple_index {
        return (SyntaxKind::IntNumber, count_while(rest, |c| c.is_ascii_digit()));
    }

    let radix_digits: Option<fn(char) -> bool> = match bytes.get(..2) {
        Some(b"0x") => Some(is_hex_digit as fn(char) -> bool),
        Some(b"0o") => Some(is_octal_digit),
        Some(b"0b") => Some(is_binary_digit),
        _ => None,
    };
    if let Some(digit) = radix_digits {
        let mut len = 2 + count_while(&rest[2..], digit);
        len += scan_suffix(&rest[len..]);
        return (SyntaxKind::IntNumber, len);
    }

    let mut len = count_while(rest, |c| c.is_ascii_digit() || c == '_');
    let mut float = false;

    if bytes.get(len) == Some(&b'.') {
        let after = bytes.get(len + 1).copied();
        let continues = after.is_some_and(|b| b == b'.' || is_ident_start(b));
        if !continues {
            float = true;
            len += 1;
            if after.is_some_and(|b| b.is_ascii_digit()) {
                len += count_while(&rest[len..], |c| c.is_ascii_digit() || c == '_');
            }
        }
    }

    if matches!(bytes.get(len), Some(b'e' | b'E')) {
        let mut exp = len + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        exp += count_while(&rest[exp..], |c| c == '_');
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            float = true;
            len = exp + count_while(&rest[exp..], |c| c.is_ascii_digit() || c == '_');
        }
    }

    // A float ending in `.` takes no suffix: `1.f32` is a field access.
    if !rest[..len].ends_with('.') {
        let suffix = scan_suffix(&rest[len..]);
        if matches!(&rest[len..len + suffix], "f32" | "f64") {
            float = true;
        }
        len += suffix;
    }

    let kind = if float {
        SyntaxKind::FloatNumber
    } else {
        SyntaxKind::IntNumber
    };
    (kind, len)
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit() || c == '_'
}

fn is_octal_digit(c: char) -> bool {
    matches!(c, '0'..='7' | '_')
}

fn is_binary_digit(c: char) -> bool {
    matches!(c, '0' | '1' | '_')
}

fn scan_suffix(rest: &str) -> usize {
    match rest.as_bytes().first() {
        Some(&b) if is_ident_start(b) => count_while(rest, |c| c.is_ascii_alphanumeric() || c == '_'),
        _ => 0,
    }
}

/// Scans a block comment starting at `/*`, honoring nested pairs.
///
/// Returns `None` when the input ends before the outermost pair closes.
pub fn scan_block_comment(rest: &str) -> Option<(SyntaxKind, usize)> {
    debug_assert!(rest.starts_with("/*"));
    let bytes = rest.as_bytes();
    let mut depth = 1usize;
    let mut i = 2;
    while i < bytes.len() {
        match (bytes[i], bytes.get(i + 1)) {
            (b'/', Some(b'*')) => {
                depth += 1;
                i += 2;
            }
            (b'*', Some(b'/')) => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return Some((block_comment_kind(&rest[..i]), i));
                }
            }
            _ => i += 1,
        }
    }
    None
}

fn block_comment_kind(text: &str) -> SyntaxKind {
    let marker = text.as_bytes().get(2).copied();
    let after = text.as_bytes().get(3).copied();
    match marker {
        Some(b'!') => SyntaxKind::InnerDocComment,
        // `/**/` and `/***` are plain comments.
        Some(b'*') if !matches!(after, Some(b'*' | b'/')) => SyntaxKind::DocComment,
        _ => SyntaxKind::BlockComment,
    }
}

/// Classifies a `//` comment by the character after the opening fence.
pub fn line_comment_kind(text: &str) -> SyntaxKind {
    if text.starts_with("//!") {
        SyntaxKind::InnerDocComment
    } else if text.starts_with("///") && !text.starts_with("////") {
        SyntaxKind::DocComment
    } else {
        SyntaxKind::LineComment
    }
}

/// Length of a shebang line at the start of `source`.
///
/// `#!` followed (after whitespace) by `[` opens an inner attribute instead.
pub fn shebang_len(source: &str) -> Option<usize> {
    let rest = source.strip_prefix("#!")?;
    if rest.trim_start().starts_with('[') {
        return None;
    }
    Some(2 + rest.find('\n').unwrap_or(rest.len()))
}

/// Base punctuation that overlay punctuation splits into when the overlay is off.
///
/// Mirrors a greedy base-only tokenization of the same text.
pub fn base_split(kind: SyntaxKind) -> Option<&'static [SyntaxKind]> {
    use SyntaxKind::*;
    let pieces: &'static [SyntaxKind] = match kind {
        Implies => &[EqEq, Gt],
        Explies => &[LtEq, Eq],
        Equiv => &[LtEq, FatArrow],
        EqEqEq => &[EqEq, Eq],
        NotEqEq => &[NotEq, Eq],
        ExtEq => &[Eq, Tilde, Eq],
        NotExtEq => &[Bang, Tilde, Eq],
        DeepExtEq => &[Eq, Tilde, Tilde, Eq],
        NotDeepExtEq => &[Bang, Tilde, Tilde, Eq],
        BigAnd => &[AmpAmp, Amp],
        BigOr => &[PipePipe, Pipe],
        _ => return None,
    };
    Some(pieces)
}

/// Byte length of fixed punctuation produced by [`base_split`].
pub fn punct_len(kind: SyntaxKind) -> usize {
    use SyntaxKind::*;
    match kind {
        EqEq | LtEq | FatArrow | NotEq | AmpAmp | PipePipe => 2,
        _ => 1,
    }
}

pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn count_while(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(s.len(), |(i, _)| i)
}
