//! Parser state machine and low-level operations.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::cst::{SyntaxKind, TokenSet};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::language::Language;
use crate::lexer::{Token, token_text};

#[derive(Debug, Clone, Copy)]
pub(super) struct OpenDelimiter {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

/// Trivia tokens are buffered and flushed when starting a new node.
pub(crate) struct Parser<'src, 'lang> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) trivia_buffer: Vec<Token>,
    pub(super) builder: GreenNodeBuilder<'static>,
    pub(super) diagnostics: Diagnostics,
    pub(super) lang: &'lang Language,
    pub(super) depth: u32,
    pub(super) last_diagnostic_pos: Option<TextSize>,
    pub(super) delimiter_stack: Vec<OpenDelimiter>,
    pub(super) debug_fuel: std::cell::Cell<u32>,
    exec_fuel_remaining: Option<u32>,
    recursion_fuel_limit: Option<u32>,
    fatal_error: Option<Error>,
}

impl<'src, 'lang> Parser<'src, 'lang> {
    pub fn new(source: &'src str, tokens: Vec<Token>, lang: &'lang Language) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            trivia_buffer: Vec::with_capacity(4),
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            lang,
            depth: 0,
            last_diagnostic_pos: None,
            delimiter_stack: Vec::with_capacity(8),
            debug_fuel: std::cell::Cell::new(256),
            exec_fuel_remaining: None,
            recursion_fuel_limit: None,
            fatal_error: None,
        }
    }

    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel_remaining = limit;
        self
    }

    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel_limit = limit;
        self
    }

    pub(super) fn finish(mut self) -> Result<(GreenNode, Diagnostics), Error> {
        self.drain_trivia();
        if let Some(err) = self.fatal_error {
            return Err(err);
        }
        Ok((self.builder.finish(), self.diagnostics))
    }

    pub(super) fn verification(&self) -> bool {
        self.lang.verification()
    }

    pub(super) fn has_fatal_error(&self) -> bool {
        self.fatal_error.is_some()
    }

    /// Current significant token; `Eof` past the end.
    pub(super) fn current(&mut self) -> SyntaxKind {
        self.skip_trivia_to_buffer();
        self.nth_raw(0)
    }

    fn reset_debug_fuel(&self) {
        self.debug_fuel.set(256);
    }

    pub(super) fn nth_raw(&self, lookahead: usize) -> SyntaxKind {
        self.ensure_progress();
        self.tokens
            .get(self.pos + lookahead)
            .map_or(SyntaxKind::Eof, |t| t.kind)
    }

    fn consume_exec_fuel(&mut self) {
        if let Some(ref mut remaining) = self.exec_fuel_remaining {
            if *remaining == 0 {
                if self.fatal_error.is_none() {
                    self.fatal_error = Some(Error::ExecFuelExhausted);
                }
                return;
            }
            *remaining -= 1;
        }
    }

    pub(super) fn current_span(&mut self) -> TextRange {
        self.skip_trivia_to_buffer();
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    pub(super) fn current_text(&mut self) -> &'src str {
        self.skip_trivia_to_buffer();
        match self.tokens.get(self.pos) {
            Some(token) => token_text(self.source, token),
            None => "",
        }
    }

    pub(super) fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn should_stop(&mut self) -> bool {
        self.current() == SyntaxKind::Eof || self.has_fatal_error()
    }

    pub(super) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn at_any(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    /// Index of the `n`th significant token at or after the cursor.
    pub(super) fn nth_index(&mut self, n: usize) -> Option<usize> {
        self.skip_trivia_to_buffer();
        let mut count = 0;
        let mut pos = self.pos;
        while pos < self.tokens.len() {
            if !self.tokens[pos].kind.is_trivia() {
                if count == n {
                    return Some(pos);
                }
                count += 1;
            }
            pos += 1;
        }
        None
    }

    /// LL(k) lookahead past trivia.
    pub(super) fn nth(&mut self, n: usize) -> SyntaxKind {
        self.ensure_progress();
        self.nth_index(n)
            .map_or(SyntaxKind::Eof, |i| self.tokens[i].kind)
    }

    pub(super) fn nth_text(&mut self, n: usize) -> &'src str {
        match self.nth_index(n) {
            Some(i) => token_text(self.source, &self.tokens[i]),
            None => "",
        }
    }

    pub(super) fn next_is(&mut self, kind: SyntaxKind) -> bool {
        self.nth(1) == kind
    }

    /// Whether the current token is the contextual keyword `kw`.
    ///
    /// Overlay keywords only match when the overlay is enabled.
    pub(super) fn at_contextual(&mut self, kw: SyntaxKind) -> bool {
        self.nth_is_contextual(0, kw)
    }

    pub(super) fn nth_is_contextual(&mut self, n: usize, kw: SyntaxKind) -> bool {
        if kw.is_overlay_keyword() && !self.verification() {
            return false;
        }
        self.nth(n) == SyntaxKind::Ident && Some(self.nth_text(n)) == kw.contextual_text()
    }

    pub(super) fn skip_trivia_to_buffer(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.trivia_buffer.push(self.tokens[self.pos]);
            self.pos += 1;
        }
    }

    pub(super) fn drain_trivia(&mut self) {
        for token in self.trivia_buffer.drain(..) {
            let text = token_text(self.source, &token);
            self.builder.token(token.kind.into(), text);
        }
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia_to_buffer();
        self.drain_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia_to_buffer();
        self.drain_trivia();
        self.builder.checkpoint()
    }

    pub(super) fn bump(&mut self) {
        let kind = self.current();
        self.bump_as(kind);
    }

    /// Consumes the current token, recording it with `kind`.
    pub(super) fn bump_as(&mut self, kind: SyntaxKind) {
        self.skip_trivia_to_buffer();
        assert!(!self.eof(), "bump called at EOF");
        self.reset_debug_fuel();
        self.consume_exec_fuel();

        self.drain_trivia();

        let token = self.tokens[self.pos];
        let text = token_text(self.source, &token);
        self.builder.token(kind.into(), text);
        self.pos += 1;
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes a contextual keyword, recording its keyword kind.
    pub(super) fn eat_contextual(&mut self, kw: SyntaxKind) -> bool {
        if self.at_contextual(kw) {
            self.bump_as(kw);
            true
        } else {
            false
        }
    }

    /// On mismatch: emit diagnostic but don't consume.
    pub(super) fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error_msg(DiagnosticKind::UnexpectedToken, format!("expected {what}"));
        false
    }

    /// Splits a compound punctuation token in place so that its first
    /// character can be consumed on its own (`>>` closing two generic lists).
    pub(super) fn split_current(&mut self) -> bool {
        self.skip_trivia_to_buffer();
        let Some(&token) = self.tokens.get(self.pos) else {
            return false;
        };
        let Some((first, rest)) = split_first(token.kind) else {
            return false;
        };
        let mid = token.span.start() + TextSize::from(1);
        self.tokens[self.pos] = Token::new(first, TextRange::new(token.span.start(), mid));
        self.tokens
            .insert(self.pos + 1, Token::new(rest, TextRange::new(mid, token.span.end())));
        true
    }

    /// Whether the current token is `kind` or starts with it.
    pub(super) fn at_split(&mut self, kind: SyntaxKind) -> bool {
        let current = self.current();
        current == kind || split_first(current).is_some_and(|(first, _)| first == kind)
    }

    pub(super) fn eat_split(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        if self.at_split(kind) && self.split_current() {
            self.bump();
            return true;
        }
        false
    }

    pub(super) fn expect_split(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat_split(kind) {
            return true;
        }
        self.error_msg(DiagnosticKind::UnexpectedToken, format!("expected {what}"));
        false
    }

    /// Kind of the last significant token consumed.
    pub(super) fn prev_kind(&self) -> Option<SyntaxKind> {
        self.tokens[..self.pos]
            .iter()
            .rev()
            .find(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
    }

    pub(super) fn current_suppression_span(&mut self) -> TextRange {
        self.delimiter_stack
            .last()
            .map(|d| TextRange::new(d.span.start(), self.eof_offset()))
            .unwrap_or_else(|| self.current_span())
    }

    fn should_report(&mut self, pos: TextSize) -> bool {
        if self.last_diagnostic_pos == Some(pos) {
            return false;
        }
        self.last_diagnostic_pos = Some(pos);
        true
    }

    pub(super) fn bump_as_error(&mut self) {
        if !self.eof() {
            self.start_node(SyntaxKind::Error);
            self.bump();
            self.finish_node();
        }
    }

    fn get_error_ranges(&mut self) -> Option<(TextRange, TextRange)> {
        let range = self.current_span();
        if !self.should_report(range.start()) {
            return None;
        }
        let suppression = self.current_suppression_span();
        Some((range, suppression))
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let Some((range, suppression)) = self.get_error_ranges() else {
            return;
        };
        tracing::trace!(?kind, ?range, "syntax error");
        self.diagnostics
            .report(kind, range)
            .suppression_range(suppression)
            .emit();
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let Some((range, suppression)) = self.get_error_ranges() else {
            return;
        };
        tracing::trace!(?kind, ?range, "syntax error");
        self.diagnostics
            .report(kind, range)
            .message(message)
            .suppression_range(suppression)
            .emit();
    }

    /// Reports at an explicit range, bypassing the one-per-position filter.
    pub(super) fn error_at(&mut self, kind: DiagnosticKind, range: TextRange, message: impl Into<String>) {
        self.diagnostics.report(kind, range).message(message).emit();
    }

    pub(super) fn error_and_bump(&mut self, kind: DiagnosticKind) {
        self.error(kind);
        self.bump_as_error();
    }

    pub(super) fn error_and_bump_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.error_msg(kind, message);
        self.bump_as_error();
    }

    /// Reports, then wraps everything up to a token of `recovery` in one
    /// `Error` node.
    pub(super) fn error_recover(&mut self, kind: DiagnosticKind, message: &str, recovery: TokenSet) {
        if self.at_any(recovery) || self.should_stop() {
            self.error_msg(kind, message);
            return;
        }

        self.start_node(SyntaxKind::Error);
        self.error_msg(kind, message);
        while !self.at_any(recovery) && !self.should_stop() {
            self.bump();
        }
        self.finish_node();
        tracing::trace!(?kind, "recovered");
    }

    pub(super) fn enter_recursion(&mut self) -> bool {
        if let Some(limit) = self.recursion_fuel_limit
            && self.depth >= limit
        {
            if self.fatal_error.is_none() {
                self.fatal_error = Some(Error::RecursionLimitExceeded);
            }
            return false;
        }
        self.depth += 1;
        self.reset_debug_fuel();
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.reset_debug_fuel();
    }

    /// Consumes the current opening delimiter and records it.
    pub(super) fn open_delimiter(&mut self) {
        let kind = self.current();
        let span = self.current_span();
        self.delimiter_stack.push(OpenDelimiter { kind, span });
        self.bump();
    }

    /// Consumes the closer matching the innermost open delimiter, or reports
    /// it unclosed.
    pub(super) fn close_delimiter(&mut self) {
        let Some(open) = self.delimiter_stack.pop() else {
            return;
        };
        let Some(close) = open.kind.closing_delimiter() else {
            return;
        };
        if self.eat(close) {
            return;
        }
        let source = self.source;
        let text = &source[std::ops::Range::<usize>::from(open.span)];
        self.error_unclosed_delimiter(text, open.span);
    }

    /// Whether the current token closes a delimiter opened further out.
    pub(super) fn at_outer_closer(&mut self) -> bool {
        let current = self.current();
        self.delimiter_stack
            .iter()
            .any(|d| d.kind.closing_delimiter() == Some(current))
    }

    pub(super) fn error_unclosed_delimiter(&mut self, open_text: &str, open_range: TextRange) {
        let current = self.current_span();
        if !self.should_report(current.start()) {
            return;
        }
        // Use full range for easier downstream error suppression
        let full_range = TextRange::new(open_range.start(), current.end());
        tracing::trace!(delimiter = open_text, ?open_range, "unclosed delimiter");
        self.diagnostics
            .report(DiagnosticKind::UnclosedDelimiter, full_range)
            .message(open_text)
            .related_to("opened here", open_range)
            .emit();
    }
}

/// First character of a compound punctuation token and the token that remains.
pub(super) fn split_first(kind: SyntaxKind) -> Option<(SyntaxKind, SyntaxKind)> {
    use SyntaxKind::*;
    let pair = match kind {
        Shr => (Gt, Gt),
        ShrEq => (Gt, GtEq),
        GtEq => (Gt, Eq),
        Shl => (Lt, Lt),
        ShlEq => (Lt, LtEq),
        LtEq => (Lt, Eq),
        AmpAmp => (Amp, Amp),
        PipePipe => (Pipe, Pipe),
        PipeEq => (Pipe, Eq),
        _ => return None,
    };
    Some(pair)
}
