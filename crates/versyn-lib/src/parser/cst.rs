//! Syntax kinds for Rust with the verification overlay.
//!
//! `SyntaxKind` serves dual roles: token kinds (from the lexer) and node kinds
//! (from the parser). Logos derives recognition of the regular tokens; tokens
//! whose extent depends on context (string bodies, raw-string fences, numbers,
//! nested comments) are produced by the external scanner in [`crate::lexer`].
//! Node kinds lack token/regex attributes and are named after the grammar rule
//! they correspond to (`FunctionItem` ↔ `function_item`).

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,
    #[token(")")]
    ParenClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,

    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("...")]
    DotDotDot,
    #[token("..=")]
    DotDotEq,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    #[token("#")]
    Pound,
    #[token("$")]
    Dollar,
    #[token("?")]
    Question,
    #[token("@")]
    At,
    #[token("~")]
    Tilde,
    #[token("_", priority = 3)]
    Underscore,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("^=")]
    CaretEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,

    // Overlay punctuation. The lexer re-splits these into base punctuation
    // when the overlay is disabled.
    /// `==>`
    #[token("==>")]
    Implies,
    /// `<==`
    #[token("<==")]
    Explies,
    /// `<==>`
    #[token("<==>")]
    Equiv,
    #[token("===")]
    EqEqEq,
    #[token("!==")]
    NotEqEq,
    /// `=~=`
    #[token("=~=")]
    ExtEq,
    #[token("!~=")]
    NotExtEq,
    /// `=~~=`
    #[token("=~~=")]
    DeepExtEq,
    #[token("!~~=")]
    NotDeepExtEq,
    /// `&&&`
    #[token("&&&")]
    BigAnd,
    /// `|||`
    #[token("|||")]
    BigOr,

    #[token("as")]
    AsKw,
    #[token("async")]
    AsyncKw,
    #[token("await")]
    AwaitKw,
    #[token("break")]
    BreakKw,
    #[token("const")]
    ConstKw,
    #[token("continue")]
    ContinueKw,
    #[token("crate")]
    CrateKw,
    #[token("dyn")]
    DynKw,
    #[token("else")]
    ElseKw,
    #[token("enum")]
    EnumKw,
    #[token("extern")]
    ExternKw,
    #[token("false")]
    FalseKw,
    #[token("fn")]
    FnKw,
    #[token("for")]
    ForKw,
    #[token("if")]
    IfKw,
    #[token("impl")]
    ImplKw,
    #[token("in")]
    InKw,
    #[token("let")]
    LetKw,
    #[token("loop")]
    LoopKw,
    #[token("match")]
    MatchKw,
    #[token("mod")]
    ModKw,
    #[token("move")]
    MoveKw,
    #[token("mut")]
    MutKw,
    #[token("pub")]
    PubKw,
    #[token("ref")]
    RefKw,
    #[token("return")]
    ReturnKw,
    #[token("self")]
    SelfKw,
    #[token("Self")]
    SelfTypeKw,
    #[token("static")]
    StaticKw,
    #[token("struct")]
    StructKw,
    #[token("super")]
    SuperKw,
    #[token("trait")]
    TraitKw,
    #[token("true")]
    TrueKw,
    #[token("try")]
    TryKw,
    #[token("type")]
    TypeKw,
    #[token("unsafe")]
    UnsafeKw,
    #[token("use")]
    UseKw,
    #[token("where")]
    WhereKw,
    #[token("while")]
    WhileKw,
    #[token("yield")]
    YieldKw,

    // Contextual keywords: lexed as `Ident`, remapped by the parser where the
    // surrounding production expects them.
    UnionKw,
    MacroRulesKw,
    AutoKw,
    DefaultKw,

    // Overlay contextual keywords.
    SpecKw,
    ProofKw,
    ExecKw,
    OpenKw,
    ClosedKw,
    CheckedKw,
    BroadcastKw,
    GroupKw,
    GlobalKw,
    SizeOfKw,
    LayoutKw,
    GhostKw,
    TrackedKw,
    RequiresKw,
    EnsuresKw,
    RecommendsKw,
    DecreasesKw,
    WhenKw,
    ViaKw,
    InvariantKw,
    InvariantExceptBreakKw,
    InvariantEnsuresKw,
    OpensInvariantsKw,
    ReturnsKw,
    NoUnwindKw,
    ForallKw,
    ExistsKw,
    ChooseKw,
    AssertKw,
    AssumeKw,
    ImpliesKw,
    ByKw,

    /// Identifier (ASCII), including raw identifiers `r#name`.
    /// Defined after keywords so they take precedence.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    #[regex(r"r#[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    /// `'name` in lifetimes and labels.
    #[regex(r"'[a-zA-Z_][a-zA-Z0-9_]*")]
    LifetimeName,

    /// `$name` inside macro rules.
    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_]*")]
    Metavariable,

    #[regex(r#"b?'(?:[^'\\\n\r\t]|\\[nrt\\0'"]|\\x[0-9a-fA-F]{2}|\\u\{[0-9a-fA-F_]{1,6}\})'"#)]
    CharToken,

    /// First digit of a number. The scanner extends it to the full literal.
    #[regex(r"[0-9]")]
    #[doc(hidden)]
    NumberPrefix,
    IntNumber,
    FloatNumber,

    /// Opening quote of a string, with optional `b`/`c` prefix.
    #[regex(r#"[bc]?""#)]
    StringStart,
    StringContent,
    EscapeSequence,
    StringEnd,

    /// `r#*"` with optional `b`/`c` prefix. The scanner records the fence.
    #[regex(r##"[bc]?r#*""##)]
    RawStringStart,
    RawStringContent,
    RawStringEnd,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    /// `/*`. The scanner extends it over nested pairs.
    #[token("/*")]
    #[doc(hidden)]
    BlockCommentStart,
    BlockComment,
    /// `///` or `/** */`
    DocComment,
    /// `//!` or `/*! */`
    InnerDocComment,
    /// `#!` line at the start of the input.
    Shebang,

    /// Coalesced unrecognized input. Triggers local recovery in the parser.
    ErrorSentinel,
    /// Lookahead past the end of input.
    Eof,

    // --- Node kinds (non-terminals) ---
    SourceFile,

    AttributeItem,
    InnerAttributeItem,
    Attribute,
    VisibilityModifier,

    FunctionItem,
    FunctionSignatureItem,
    FunctionModifiers,
    ExternModifier,
    FunctionMode,
    Parameters,
    Parameter,
    SelfParameter,
    VariadicParameter,
    ReturnType,
    NamedReturn,
    RequiresClause,
    EnsuresClause,
    RecommendsClause,
    DecreasesClause,
    InvariantClause,
    InvariantExceptBreakClause,
    InvariantEnsuresClause,
    OpensInvariantsClause,
    ReturnsClause,
    NoUnwindClause,
    StructItem,
    UnionItem,
    FieldDeclarationList,
    FieldDeclaration,
    OrderedFieldDeclarationList,
    OrderedField,
    EnumItem,
    EnumVariantList,
    EnumVariant,
    TraitItem,
    ImplItem,
    DeclarationList,
    AssociatedType,
    ModItem,
    ForeignModItem,
    UseDeclaration,
    UseTree,
    UseList,
    ConstItem,
    StaticItem,
    TypeItem,
    ExternCrateDeclaration,
    BroadcastGroup,
    BroadcastUse,
    GlobalItem,
    DataMode,

    MacroDefinition,
    MacroRule,
    TokenTreePattern,
    TokenBindingPattern,
    FragmentSpecifier,
    TokenRepetitionPattern,
    TokenTree,
    TokenRepetition,
    MacroInvocation,

    TypeParameters,
    LifetimeParameter,
    TypeParameter,
    ConstParameter,
    TraitBounds,
    WhereClause,
    WherePredicate,
    HigherRankedTraitBound,
    Lifetime,

    PathType,
    Path,
    PathSegment,
    TypeArguments,
    TypeBinding,
    ReferenceType,
    PointerType,
    ArrayType,
    TupleType,
    UnitType,
    FunctionType,
    AbstractType,
    DynamicType,
    NeverType,
    QualifiedType,
    InferredType,

    EmptyStatement,
    LetDeclaration,
    ExpressionStatement,

    PathExpression,
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    RawStringLiteral,
    CharLiteral,
    BooleanLiteral,
    BinaryExpression,
    UnaryExpression,
    ReferenceExpression,
    CastExpression,
    TryExpression,
    AwaitExpression,
    FieldExpression,
    GenericFunction,
    CallExpression,
    Arguments,
    IndexExpression,
    RangeExpression,
    AssignmentExpression,
    CompoundAssignmentExpr,
    ClosureExpression,
    ClosureParameters,
    Block,
    UnsafeBlock,
    AsyncBlock,
    ConstBlock,
    TryBlock,
    IfExpression,
    LetCondition,
    LetChain,
    ElseClause,
    MatchExpression,
    MatchBlock,
    MatchArm,
    MatchPattern,
    LoopExpression,
    WhileExpression,
    ForExpression,
    Label,
    BreakExpression,
    ContinueExpression,
    ReturnExpression,
    YieldExpression,
    StructExpression,
    FieldInitializerList,
    FieldInitializer,
    ShorthandFieldInitializer,
    BaseFieldInitializer,
    TupleExpression,
    UnitExpression,
    ArrayExpression,
    ParenthesizedExpression,
    QuantifierExpression,
    AssertExpression,
    AssertForallExpression,
    AssumeExpression,
    ProofBlock,
    BigAndExpression,
    BigOrExpression,
    ViewExpression,

    IdentifierPattern,
    WildcardPattern,
    LiteralPattern,
    PathPattern,
    TuplePattern,
    TupleStructPattern,
    StructPattern,
    FieldPattern,
    SlicePattern,
    OrPattern,
    RangePattern,
    ReferencePattern,
    RestPattern,

    Error,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Whitespace | LineComment | BlockComment | DocComment | InnerDocComment | Shebang
        )
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | ErrorSentinel)
    }

    #[inline]
    pub fn is_node(self) -> bool {
        self >= SourceFile && self < __LAST
    }

    /// Strict keywords reserved by the lexer.
    #[inline]
    pub fn is_keyword(self) -> bool {
        self >= AsKw && self <= YieldKw
    }

    /// Keywords recognized only in specific positions.
    #[inline]
    pub fn is_contextual_keyword(self) -> bool {
        self >= UnionKw && self <= ByKw
    }

    #[inline]
    pub fn is_delimiter(self) -> bool {
        matches!(
            self,
            ParenOpen | ParenClose | BracketOpen | BracketClose | BraceOpen | BraceClose
        )
    }

    /// Closing delimiter for an opening one.
    pub fn closing_delimiter(self) -> Option<SyntaxKind> {
        match self {
            ParenOpen => Some(ParenClose),
            BracketOpen => Some(BracketClose),
            BraceOpen => Some(BraceClose),
            _ => None,
        }
    }

    /// Node kinds that exist only with the verification overlay.
    pub fn is_overlay_node(self) -> bool {
        matches!(
            self,
            FunctionMode
                | NamedReturn
                | RequiresClause
                | EnsuresClause
                | RecommendsClause
                | DecreasesClause
                | InvariantClause
                | InvariantExceptBreakClause
                | InvariantEnsuresClause
                | OpensInvariantsClause
                | ReturnsClause
                | NoUnwindClause
                | BroadcastGroup
                | BroadcastUse
                | GlobalItem
                | DataMode
                | QuantifierExpression
                | AssertExpression
                | AssertForallExpression
                | AssumeExpression
                | ProofBlock
                | BigAndExpression
                | BigOrExpression
                | ViewExpression
        )
    }

    /// Contextual keywords that exist only with the verification overlay.
    #[inline]
    pub fn is_overlay_keyword(self) -> bool {
        self >= SpecKw && self <= ByKw
    }

    /// Source spelling of a contextual keyword.
    pub fn contextual_text(self) -> Option<&'static str> {
        let text = match self {
            UnionKw => "union",
            MacroRulesKw => "macro_rules",
            AutoKw => "auto",
            DefaultKw => "default",
            SpecKw => "spec",
            ProofKw => "proof",
            ExecKw => "exec",
            OpenKw => "open",
            ClosedKw => "closed",
            CheckedKw => "checked",
            BroadcastKw => "broadcast",
            GroupKw => "group",
            GlobalKw => "global",
            SizeOfKw => "size_of",
            LayoutKw => "layout",
            GhostKw => "ghost",
            TrackedKw => "tracked",
            RequiresKw => "requires",
            EnsuresKw => "ensures",
            RecommendsKw => "recommends",
            DecreasesKw => "decreases",
            WhenKw => "when",
            ViaKw => "via",
            InvariantKw => "invariant",
            InvariantExceptBreakKw => "invariant_except_break",
            InvariantEnsuresKw => "invariant_ensures",
            OpensInvariantsKw => "opens_invariants",
            ReturnsKw => "returns",
            NoUnwindKw => "no_unwind",
            ForallKw => "forall",
            ExistsKw => "exists",
            ChooseKw => "choose",
            AssertKw => "assert",
            AssumeKw => "assume",
            ImpliesKw => "implies",
            ByKw => "by",
            _ => return None,
        };
        Some(text)
    }

    /// Statements that end with a block and so terminate without `;`.
    pub fn is_block_like(self) -> bool {
        matches!(
            self,
            Block
                | UnsafeBlock
                | AsyncBlock
                | ConstBlock
                | TryBlock
                | IfExpression
                | MatchExpression
                | LoopExpression
                | WhileExpression
                | ForExpression
                | ProofBlock
        )
    }

    /// Punctuation that exists only with the verification overlay.
    pub fn is_overlay_punct(self) -> bool {
        self >= Implies && self <= BigOr
    }

    /// Every node kind, in declaration order.
    pub fn node_kinds() -> impl Iterator<Item = SyntaxKind> {
        (SourceFile as u16..__LAST as u16).map(|raw| VersynLang::kind_from_raw(rowan::SyntaxKind(raw)))
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersynLang {}

impl Language for VersynLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<VersynLang>;
pub type SyntaxToken = rowan::SyntaxToken<VersynLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

const TOKEN_SET_WORDS: usize = 4;
const TOKEN_SET_CAPACITY: u16 = 64 * TOKEN_SET_WORDS as u16;

/// 256-bit bitset of token `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet([u64; TOKEN_SET_WORDS]);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet([0; TOKEN_SET_WORDS]);

    /// Panics at compile time if any kind's discriminant exceeds the capacity.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = [0u64; TOKEN_SET_WORDS];
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < TOKEN_SET_CAPACITY, "SyntaxKind value exceeds TokenSet capacity");
            bits[(kind / 64) as usize] |= 1 << (kind % 64);
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        Self::new(&[kind])
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= TOKEN_SET_CAPACITY {
            return false;
        }
        self.0[(kind / 64) as usize] & (1 << (kind % 64)) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        let mut bits = self.0;
        let mut i = 0;
        while i < TOKEN_SET_WORDS {
            bits[i] |= other.0[i];
            i += 1;
        }
        TokenSet(bits)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for raw in 0..TOKEN_SET_CAPACITY.min(__LAST as u16) {
            let kind = VersynLang::kind_from_raw(rowan::SyntaxKind(raw));
            if self.contains(kind) {
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    pub const TRIVIA: TokenSet = TokenSet::new(&[
        Whitespace,
        LineComment,
        BlockComment,
        DocComment,
        InnerDocComment,
        Shebang,
    ]);

    pub const LITERAL_FIRST: TokenSet = TokenSet::new(&[
        IntNumber,
        FloatNumber,
        StringStart,
        RawStringStart,
        CharToken,
        TrueKw,
        FalseKw,
    ]);

    pub const PATH_FIRST: TokenSet = TokenSet::new(&[
        Ident,
        SelfKw,
        SelfTypeKw,
        SuperKw,
        CrateKw,
        ColonColon,
        Lt,
        Shl,
    ]);

    /// FIRST set of expressions (overlay keywords arrive as `Ident`).
    pub const EXPR_FIRST: TokenSet = LITERAL_FIRST.union(PATH_FIRST).union(TokenSet::new(&[
        ParenOpen,
        BracketOpen,
        BraceOpen,
        Minus,
        Bang,
        Star,
        Amp,
        AmpAmp,
        Pipe,
        PipePipe,
        DotDot,
        DotDotEq,
        MoveKw,
        StaticKw,
        AsyncKw,
        UnsafeKw,
        ConstKw,
        TryKw,
        IfKw,
        MatchKw,
        LoopKw,
        WhileKw,
        ForKw,
        BreakKw,
        ContinueKw,
        ReturnKw,
        YieldKw,
        LifetimeName,
        BigAnd,
        BigOr,
    ]));

    pub const TYPE_FIRST: TokenSet = PATH_FIRST.union(TokenSet::new(&[
        ParenOpen,
        BracketOpen,
        Amp,
        AmpAmp,
        Star,
        Bang,
        Underscore,
        FnKw,
        UnsafeKw,
        ExternKw,
        ForKw,
        ImplKw,
        DynKw,
        Question,
        LifetimeName,
    ]));

    pub const PATTERN_FIRST: TokenSet = LITERAL_FIRST.union(PATH_FIRST).union(TokenSet::new(&[
        ParenOpen,
        BracketOpen,
        Amp,
        AmpAmp,
        Minus,
        Underscore,
        DotDot,
        RefKw,
        MutKw,
        Pipe,
    ]));

    /// Tokens that begin an item regardless of context.
    pub const ITEM_FIRST: TokenSet = TokenSet::new(&[
        FnKw,
        StructKw,
        EnumKw,
        TraitKw,
        ImplKw,
        ModKw,
        UseKw,
        StaticKw,
        TypeKw,
        ExternKw,
        PubKw,
        Pound,
    ]);

    pub const ASSIGNMENT_OPS: TokenSet = TokenSet::new(&[
        PlusEq, MinusEq, StarEq, SlashEq, PercentEq, CaretEq, AmpEq, PipeEq, ShlEq, ShrEq,
    ]);

    /// Synchronization points after a lexical error.
    pub const STATEMENT_RECOVERY: TokenSet = TokenSet::new(&[Semicolon, BraceClose]);

    pub const ITEM_RECOVERY: TokenSet = TokenSet::new(&[
        FnKw, StructKw, EnumKw, TraitKw, ImplKw, ModKw, UseKw, PubKw, BraceClose,
    ]);

    pub const CLOSING_DELIMITERS: TokenSet = TokenSet::new(&[ParenClose, BracketClose, BraceClose]);
}
