//! Delimiter-grouped token trees in a flat arena.
//!
//! Groups own their children by [`TtId`] rather than by box, and a broken
//! delimiter sequence is reported at the opener that could not be closed.

use rowan::TextRange;

use crate::config::GrammarConfig;
use crate::lexer::{Token, lex};
use crate::parser::SyntaxKind;

/// Index of a node in a [`TokenTreeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TtId(u32);

impl TtId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    Paren,
    Bracket,
    Brace,
}

impl Delimiter {
    pub fn from_open(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::ParenOpen => Some(Self::Paren),
            SyntaxKind::BracketOpen => Some(Self::Bracket),
            SyntaxKind::BraceOpen => Some(Self::Brace),
            _ => None,
        }
    }

    pub fn from_close(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::ParenClose => Some(Self::Paren),
            SyntaxKind::BracketClose => Some(Self::Bracket),
            SyntaxKind::BraceClose => Some(Self::Brace),
            _ => None,
        }
    }

    pub fn open(self) -> &'static str {
        match self {
            Self::Paren => "(",
            Self::Bracket => "[",
            Self::Brace => "{",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            Self::Paren => ")",
            Self::Bracket => "]",
            Self::Brace => "}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TtNode {
    Group {
        delimiter: Delimiter,
        open: TextRange,
        close: TextRange,
        children: Vec<TtId>,
    },
    /// One token. String literals are a single leaf spanning all their parts.
    Leaf { kind: SyntaxKind, range: TextRange },
}

impl TtNode {
    pub fn range(&self) -> TextRange {
        match self {
            TtNode::Group { open, close, .. } => open.cover(*close),
            TtNode::Leaf { range, .. } => *range,
        }
    }
}

/// Unbalanced delimiters. Ranges point at the offending delimiter tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DelimiterError {
    #[error("unclosed delimiter at {open:?}")]
    Unclosed { open: TextRange },

    #[error("delimiter opened at {open:?} closed by mismatched delimiter at {close:?}")]
    Mismatched { open: TextRange, close: TextRange },

    #[error("unexpected closing delimiter at {close:?}")]
    UnexpectedClose { close: TextRange },
}

impl DelimiterError {
    /// Where the error is reported: the opener when there is one.
    pub fn range(&self) -> TextRange {
        match self {
            DelimiterError::Unclosed { open } | DelimiterError::Mismatched { open, .. } => *open,
            DelimiterError::UnexpectedClose { close } => *close,
        }
    }
}

struct OpenGroup {
    delimiter: Delimiter,
    open: TextRange,
    children: Vec<TtId>,
}

/// Delimiter-balanced token trees over a whole source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTreeArena {
    nodes: Vec<TtNode>,
    roots: Vec<TtId>,
}

impl TokenTreeArena {
    /// Lexes `source` and groups it by delimiters. Trivia is dropped.
    pub fn parse(source: &str, config: GrammarConfig) -> Result<Self, DelimiterError> {
        let tokens: Vec<Token> = lex(source, config)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();

        let mut arena = Self::default();
        let mut stack: Vec<OpenGroup> = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let token = tokens[i];
            i += 1;

            if let Some(delimiter) = Delimiter::from_open(token.kind) {
                stack.push(OpenGroup {
                    delimiter,
                    open: token.span,
                    children: Vec::new(),
                });
                continue;
            }

            let id = if let Some(delimiter) = Delimiter::from_close(token.kind) {
                let Some(group) = stack.pop() else {
                    return Err(DelimiterError::UnexpectedClose { close: token.span });
                };
                if group.delimiter != delimiter {
                    return Err(DelimiterError::Mismatched {
                        open: group.open,
                        close: token.span,
                    });
                }
                arena.push(TtNode::Group {
                    delimiter,
                    open: group.open,
                    close: token.span,
                    children: group.children,
                })
            } else {
                let (kind, range) = match token.kind {
                    SyntaxKind::StringStart => {
                        let end = Self::literal_end(&tokens, &mut i, token.span, SyntaxKind::StringEnd);
                        (SyntaxKind::StringLiteral, end)
                    }
                    SyntaxKind::RawStringStart => {
                        let end =
                            Self::literal_end(&tokens, &mut i, token.span, SyntaxKind::RawStringEnd);
                        (SyntaxKind::RawStringLiteral, end)
                    }
                    kind => (kind, token.span),
                };
                arena.push(TtNode::Leaf { kind, range })
            };

            match stack.last_mut() {
                Some(group) => group.children.push(id),
                None => arena.roots.push(id),
            }
        }

        if let Some(group) = stack.pop() {
            return Err(DelimiterError::Unclosed { open: group.open });
        }

        tracing::trace!(nodes = arena.nodes.len(), roots = arena.roots.len(), "token trees");
        Ok(arena)
    }

    /// Extends a string literal's range over its content and terminator.
    fn literal_end(tokens: &[Token], i: &mut usize, start: TextRange, end: SyntaxKind) -> TextRange {
        let mut range = start;
        while let Some(token) = tokens.get(*i) {
            let part = matches!(
                token.kind,
                SyntaxKind::StringContent | SyntaxKind::EscapeSequence | SyntaxKind::RawStringContent
            );
            if !part && token.kind != end {
                break;
            }
            range = range.cover(token.span);
            *i += 1;
            if token.kind == end {
                break;
            }
        }
        range
    }

    fn push(&mut self, node: TtNode) -> TtId {
        let id = TtId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn roots(&self) -> &[TtId] {
        &self.roots
    }

    pub fn get(&self, id: TtId) -> &TtNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of a group; empty for leaves.
    pub fn children(&self, id: TtId) -> &[TtId] {
        match self.get(id) {
            TtNode::Group { children, .. } => children,
            TtNode::Leaf { .. } => &[],
        }
    }

    /// Deepest group nesting.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(TtId, usize)> = self.roots.iter().map(|&id| (id, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            if let TtNode::Group { children, .. } = self.get(id) {
                max = max.max(depth + 1);
                stack.extend(children.iter().map(|&c| (c, depth + 1)));
            }
        }
        max
    }

    /// Token texts separated by single spaces, delimiters included.
    pub fn render(&self, source: &str) -> String {
        let mut parts: Vec<&str> = Vec::new();
        let mut stack: Vec<Visit> = self.roots.iter().rev().map(|&id| Visit::Enter(id)).collect();
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Close(text) => parts.push(text),
                Visit::Enter(id) => match self.get(id) {
                    TtNode::Leaf { range, .. } => parts.push(slice(source, *range)),
                    TtNode::Group {
                        delimiter,
                        children,
                        ..
                    } => {
                        parts.push(delimiter.open());
                        stack.push(Visit::Close(delimiter.close()));
                        stack.extend(children.iter().rev().map(|&c| Visit::Enter(c)));
                    }
                },
            }
        }
        parts.join(" ")
    }

    /// Source text of a leaf.
    pub fn leaf_text<'s>(&self, source: &'s str, id: TtId) -> Option<&'s str> {
        match self.get(id) {
            TtNode::Leaf { range, .. } => Some(slice(source, *range)),
            TtNode::Group { .. } => None,
        }
    }
}

fn slice(source: &str, range: TextRange) -> &str {
    &source[std::ops::Range::<usize>::from(range)]
}

enum Visit {
    Enter(TtId),
    Close(&'static str),
}
