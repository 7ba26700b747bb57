use indexmap::IndexMap;
use rowan::NodeOrToken;

use super::arena::Delimiter;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::ast::{self, TokenRepetition, TokenRepetitionPattern};
use crate::parser::{SyntaxKind, SyntaxNode, SyntaxToken};

/// Syntactic category a metavariable captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Block,
    Expr,
    Ident,
    Item,
    Lifetime,
    Literal,
    Meta,
    Pattern,
    Path,
    Statement,
    TokenTree,
    Type,
    Visibility,
}

impl FragmentKind {
    /// Kind named by a fragment specifier, including edition variants.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "block" => Self::Block,
            "expr" | "expr_2021" => Self::Expr,
            "ident" => Self::Ident,
            "item" => Self::Item,
            "lifetime" => Self::Lifetime,
            "literal" => Self::Literal,
            "meta" => Self::Meta,
            "pat" | "pat_param" => Self::Pattern,
            "path" => Self::Path,
            "stmt" => Self::Statement,
            "tt" => Self::TokenTree,
            "ty" => Self::Type,
            "vis" => Self::Visibility,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Expr => "expr",
            Self::Ident => "ident",
            Self::Item => "item",
            Self::Lifetime => "lifetime",
            Self::Literal => "literal",
            Self::Meta => "meta",
            Self::Pattern => "pat",
            Self::Path => "path",
            Self::Statement => "stmt",
            Self::TokenTree => "tt",
            Self::Type => "ty",
            Self::Visibility => "vis",
        }
    }
}

/// Repetition operator of `$( .. ) sep? op`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepetitionKind {
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `?`
    ZeroOrOne,
}

impl RepetitionKind {
    fn from_token(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::Star => Some(Self::ZeroOrMore),
            SyntaxKind::Plus => Some(Self::OneOrMore),
            SyntaxKind::Question => Some(Self::ZeroOrOne),
            _ => None,
        }
    }
}

/// One element of a matcher or transcriber.
///
/// Transcribers never contain `Binding`; their metavariable references are
/// `Token`s of kind `Metavariable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternElement {
    Token {
        kind: SyntaxKind,
        text: String,
    },
    Group {
        delimiter: Delimiter,
        elements: Vec<PatternElement>,
    },
    /// `$name:fragment`; `name` is stored without the `$`.
    Binding {
        name: String,
        fragment: FragmentKind,
    },
    Repetition {
        elements: Vec<PatternElement>,
        separator: Option<String>,
        quantifier: RepetitionKind,
    },
}

/// `(matcher) => { transcriber }`. Outer delimiters are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroRule {
    pub pattern: Vec<PatternElement>,
    pub template: Vec<PatternElement>,
}

impl MacroRule {
    /// Metavariables bound by the matcher, in order of appearance.
    /// A repeated name keeps its first fragment kind.
    pub fn bindings(&self) -> IndexMap<String, FragmentKind> {
        let mut out = IndexMap::new();
        collect_bindings(&self.pattern, &mut out);
        out
    }

    /// Metavariable names referenced by the transcriber, without `$`.
    pub fn references(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_references(&self.template, &mut out);
        out
    }
}

fn collect_bindings(elements: &[PatternElement], out: &mut IndexMap<String, FragmentKind>) {
    for element in elements {
        match element {
            PatternElement::Binding { name, fragment } => {
                out.entry(name.clone()).or_insert(*fragment);
            }
            PatternElement::Group { elements, .. } | PatternElement::Repetition { elements, .. } => {
                collect_bindings(elements, out)
            }
            PatternElement::Token { .. } => {}
        }
    }
}

fn collect_references(elements: &[PatternElement], out: &mut Vec<String>) {
    for element in elements {
        match element {
            PatternElement::Token { kind, text } if *kind == SyntaxKind::Metavariable => {
                out.push(text.trim_start_matches('$').to_string());
            }
            PatternElement::Group { elements, .. } | PatternElement::Repetition { elements, .. } => {
                collect_references(elements, out)
            }
            _ => {}
        }
    }
}

/// A lowered `macro_rules!` definition.
#[derive(Debug, Clone)]
pub struct MacroRules {
    pub name: String,
    pub rules: Vec<MacroRule>,
    diagnostics: Diagnostics,
}

impl MacroRules {
    /// Lowers a parsed definition. Rules the parser could not complete are
    /// skipped; unknown fragment specifiers and empty repetitions are reported.
    pub fn from_ast(definition: &ast::MacroDefinition) -> Self {
        let mut lowering = Lowering {
            diagnostics: Diagnostics::new(),
        };
        let name = definition
            .name()
            .map(|t| t.text().to_string())
            .unwrap_or_default();

        let rules = definition
            .rules()
            .filter_map(|rule| {
                let pattern = rule.pattern()?;
                let template = rule.template()?;
                Some(MacroRule {
                    pattern: lowering.delimited(pattern.as_cst()),
                    template: lowering.delimited(template.as_cst()),
                })
            })
            .collect();

        tracing::debug!(macro_name = %name, "lowered macro_rules");
        Self {
            name,
            rules,
            diagnostics: lowering.diagnostics,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// No error diagnostics. Warnings are allowed.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

struct Lowering {
    diagnostics: Diagnostics,
}

impl Lowering {
    /// Contents of a token tree node without its own delimiters.
    fn delimited(&mut self, node: &SyntaxNode) -> Vec<PatternElement> {
        let mut children = significant_children(node);
        let delimiter = children
            .first()
            .and_then(|c| c.as_token())
            .and_then(|t| Delimiter::from_open(t.kind()));
        if delimiter.is_some() {
            children.remove(0);
        }
        if children
            .last()
            .and_then(|c| c.as_token())
            .is_some_and(|t| Delimiter::from_close(t.kind()).is_some())
        {
            children.pop();
        }
        self.elements(children)
    }

    fn elements(&mut self, children: Vec<NodeOrToken<SyntaxNode, SyntaxToken>>) -> Vec<PatternElement> {
        let mut out = Vec::new();
        for child in children {
            match child {
                NodeOrToken::Token(token) => out.push(PatternElement::Token {
                    kind: token.kind(),
                    text: token.text().to_string(),
                }),
                NodeOrToken::Node(node) => {
                    if let Some(element) = self.node(&node) {
                        out.push(element);
                    }
                }
            }
        }
        out
    }

    fn node(&mut self, node: &SyntaxNode) -> Option<PatternElement> {
        match node.kind() {
            SyntaxKind::TokenTree | SyntaxKind::TokenTreePattern => {
                let delimiter = significant_children(node)
                    .first()
                    .and_then(|c| c.as_token())
                    .and_then(|t| Delimiter::from_open(t.kind()))?;
                Some(PatternElement::Group {
                    delimiter,
                    elements: self.delimited(node),
                })
            }
            SyntaxKind::TokenBindingPattern => self.binding(node),
            SyntaxKind::TokenRepetitionPattern | SyntaxKind::TokenRepetition => self.repetition(node),
            SyntaxKind::Lifetime => Some(PatternElement::Token {
                kind: SyntaxKind::LifetimeName,
                text: node.text().to_string(),
            }),
            SyntaxKind::Error => None,
            // Literal nodes keep multi-token strings together.
            kind => Some(PatternElement::Token {
                kind,
                text: node.text().to_string(),
            }),
        }
    }

    fn binding(&mut self, node: &SyntaxNode) -> Option<PatternElement> {
        let binding = ast::TokenBindingPattern::cast(node.clone())?;
        let name = binding.name()?.text().trim_start_matches('$').to_string();
        let fragment = binding.fragment()?;
        let Some(kind) = FragmentKind::from_name(fragment.text()) else {
            self.diagnostics
                .report(DiagnosticKind::UnknownFragmentSpecifier, fragment.text_range())
                .message(fragment.text())
                .emit();
            return None;
        };
        Some(PatternElement::Binding {
            name,
            fragment: kind,
        })
    }

    fn repetition(&mut self, node: &SyntaxNode) -> Option<PatternElement> {
        let (separator, operator) = match node.kind() {
            SyntaxKind::TokenRepetitionPattern => {
                let rep = TokenRepetitionPattern::cast(node.clone())?;
                (rep.separator(), rep.operator())
            }
            _ => {
                let rep = TokenRepetition::cast(node.clone())?;
                (rep.separator(), rep.operator())
            }
        };
        let quantifier = RepetitionKind::from_token(operator?.kind())?;

        // `$ ( inner ) sep? op`: keep what sits between the parentheses.
        let children = significant_children(node);
        let open = children
            .iter()
            .position(|c| c.as_token().is_some_and(|t| t.kind() == SyntaxKind::ParenOpen))?;
        let close = children
            .iter()
            .rposition(|c| c.as_token().is_some_and(|t| t.kind() == SyntaxKind::ParenClose))?;
        let inner: Vec<_> = children
            .into_iter()
            .skip(open + 1)
            .take(close.saturating_sub(open + 1))
            .collect();

        let elements = self.elements(inner);
        if elements.is_empty() {
            self.diagnostics
                .report(DiagnosticKind::EmptyMacroRepetition, node.text_range())
                .emit();
        }
        Some(PatternElement::Repetition {
            elements,
            separator: separator.map(|t| t.text().to_string()),
            quantifier,
        })
    }
}

fn significant_children(node: &SyntaxNode) -> Vec<NodeOrToken<SyntaxNode, SyntaxToken>> {
    node.children_with_tokens()
        .filter(|c| c.as_token().is_none_or(|t| !t.kind().is_trivia()))
        .collect()
}
