//! Lexical contract.
//!
//! Produces span-based tokens without storing text; text is sliced from the
//! source only when needed.
//!
//! Logos recognizes the regular tokens. For string bodies, raw-string fences,
//! numbers, nested block comments and the shebang line it yields only a
//! prefix, and the driver hands the rest to the [`scanner`] recognizers,
//! extending the logos span with `Lexer::bump`.
//!
//! ## Error handling
//!
//! Consecutive unrecognized characters are coalesced into a single
//! `ErrorSentinel` token. An unterminated block comment also becomes a
//! sentinel. Unterminated strings simply lack their closing token; the parser
//! reports them.

pub mod scanner;

#[cfg(test)]
mod scanner_tests;

use std::ops::Range;

use logos::Logos;
use rowan::TextRange;

use crate::config::GrammarConfig;
use crate::parser::cst::SyntaxKind;
use scanner::RawStringFence;

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

struct TokenSink {
    tokens: Vec<Token>,
    /// Previous significant token was `.`, so a number is a tuple index.
    tuple_index: bool,
}

impl TokenSink {
    fn push(&mut self, kind: SyntaxKind, range: Range<usize>) {
        if !kind.is_trivia() {
            self.tuple_index = kind == SyntaxKind::Dot;
        }
        self.tokens.push(Token::new(kind, range_to_text_range(range)));
    }
}

/// Tokenizes source into a vector of span-based tokens.
///
/// Overlay punctuation is kept only when `config` enables the overlay;
/// otherwise it is re-split into base punctuation.
pub fn lex(source: &str, config: GrammarConfig) -> Vec<Token> {
    let mut sink = TokenSink {
        tokens: Vec::new(),
        tuple_index: false,
    };
    let mut lexer = SyntaxKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                let span = lexer.span();
                if let Some(start) = error_start.take() {
                    sink.push(SyntaxKind::ErrorSentinel, start..span.start);
                }

                let end = lex_token(source, kind, span.clone(), config, &mut sink);
                lexer.bump(end - span.end);
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    sink.push(SyntaxKind::ErrorSentinel, start..source.len());
                }
                break;
            }
        }
    }

    sink.tokens
}

/// Pushes the token(s) for one logos match and returns where lexing resumes.
fn lex_token(
    source: &str,
    kind: SyntaxKind,
    span: Range<usize>,
    config: GrammarConfig,
    sink: &mut TokenSink,
) -> usize {
    let start = span.start;
    let rest = &source[start..];

    match kind {
        SyntaxKind::NumberPrefix => {
            let (kind, len) = scanner::scan_number(rest, sink.tuple_index);
            sink.push(kind, start..start + len);
            start + len
        }
        SyntaxKind::StringStart => {
            sink.push(kind, span.clone());
            lex_string_body(source, span.end, sink)
        }
        SyntaxKind::RawStringStart => {
            sink.push(kind, span.clone());
            lex_raw_string_body(source, span, sink)
        }
        SyntaxKind::BlockCommentStart => match scanner::scan_block_comment(rest) {
            Some((kind, len)) => {
                sink.push(kind, start..start + len);
                start + len
            }
            None => {
                sink.push(SyntaxKind::ErrorSentinel, start..source.len());
                source.len()
            }
        },
        SyntaxKind::LineComment => {
            sink.push(scanner::line_comment_kind(&source[span.clone()]), span.clone());
            span.end
        }
        SyntaxKind::Pound if start == 0 => match scanner::shebang_len(source) {
            Some(len) => {
                sink.push(SyntaxKind::Shebang, 0..len);
                len
            }
            None => {
                sink.push(kind, span.clone());
                span.end
            }
        },
        _ if !config.verification && kind.is_overlay_punct() => {
            let mut offset = start;
            for &piece in scanner::base_split(kind).unwrap_or(&[]) {
                let len = scanner::punct_len(piece);
                sink.push(piece, offset..offset + len);
                offset += len;
            }
            span.end
        }
        _ => {
            sink.push(kind, span.clone());
            span.end
        }
    }
}

fn lex_string_body(source: &str, mut pos: usize, sink: &mut TokenSink) -> usize {
    loop {
        let rest = &source[pos..];
        match rest.as_bytes().first() {
            None => return pos,
            Some(b'"') => {
                sink.push(SyntaxKind::StringEnd, pos..pos + 1);
                return pos + 1;
            }
            Some(b'\\') => {
                let len = scanner::scan_escape(rest);
                sink.push(SyntaxKind::EscapeSequence, pos..pos + len);
                pos += len;
            }
            Some(_) => {
                let len = scanner::scan_string_content(rest);
                sink.push(SyntaxKind::StringContent, pos..pos + len);
                pos += len;
            }
        }
    }
}

fn lex_raw_string_body(source: &str, open: Range<usize>, sink: &mut TokenSink) -> usize {
    let fence = RawStringFence::open(&source[open.clone()]);
    let body = open.end;
    let rest = &source[body..];

    let Some(close) = fence.find_close(rest) else {
        if !rest.is_empty() {
            sink.push(SyntaxKind::RawStringContent, body..source.len());
        }
        return source.len();
    };

    if close > 0 {
        sink.push(SyntaxKind::RawStringContent, body..body + close);
    }
    let end = body + close + fence.close_len();
    sink.push(SyntaxKind::RawStringEnd, body + close..end);
    end
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[std::ops::Range::<usize>::from(token.span)]
}
