//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` of the same kind and provides typed
//! accessors named after the grammar's fields. Accessors return `None` for
//! parts the parser had to recover from; cast never fails for the right kind.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
    ($($name:ident),+ $(,)?) => {
        $(ast_node!($name, $name);)+
    };
}

/// Sum type over node structs whose names equal their kinds.
macro_rules! ast_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant($variant),)+
        }

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                match node.kind() {
                    $(SyntaxKind::$variant => Some(Self::$variant($variant(node))),)+
                    _ => None,
                }
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                match self {
                    $(Self::$variant(n) => n.as_cst(),)+
                }
            }

            pub fn kind(&self) -> SyntaxKind {
                self.as_cst().kind()
            }
        }
    };
}

ast_node!(SourceFile, SourceFile);

ast_node![
    AttributeItem,
    InnerAttributeItem,
    Attribute,
    VisibilityModifier,
    FunctionItem,
    FunctionSignatureItem,
    FunctionModifiers,
    FunctionMode,
    Parameters,
    Parameter,
    SelfParameter,
    ReturnType,
    NamedReturn,
    DataMode,
    RequiresClause,
    EnsuresClause,
    RecommendsClause,
    DecreasesClause,
    InvariantClause,
    StructItem,
    UnionItem,
    FieldDeclarationList,
    FieldDeclaration,
    EnumItem,
    EnumVariant,
    TraitItem,
    ImplItem,
    DeclarationList,
    AssociatedType,
    ModItem,
    ForeignModItem,
    UseDeclaration,
    UseTree,
    ConstItem,
    StaticItem,
    TypeItem,
    ExternCrateDeclaration,
    BroadcastGroup,
    BroadcastUse,
    GlobalItem,
];

ast_node![
    MacroDefinition,
    MacroRule,
    TokenTreePattern,
    TokenBindingPattern,
    TokenRepetitionPattern,
    TokenTree,
    TokenRepetition,
    MacroInvocation,
];

ast_node![
    TypeParameters,
    WhereClause,
    Path,
    PathSegment,
    TypeArguments,
    PathType,
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
];

ast_node![EmptyStatement, LetDeclaration, ExpressionStatement, ElseClause, LetCondition];

ast_node![
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
    MatchExpression,
    MatchArm,
    LoopExpression,
    WhileExpression,
    ForExpression,
    BreakExpression,
    ContinueExpression,
    ReturnExpression,
    YieldExpression,
    StructExpression,
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
];

ast_node![
    IdentifierPattern,
    WildcardPattern,
    LiteralPattern,
    PathPattern,
    TuplePattern,
    TupleStructPattern,
    StructPattern,
    SlicePattern,
    OrPattern,
    RangePattern,
    ReferencePattern,
    RestPattern,
];

ast_enum! {
    /// Declarations that may appear at module level or in declaration lists.
    Item {
        FunctionItem,
        FunctionSignatureItem,
        StructItem,
        UnionItem,
        EnumItem,
        TraitItem,
        ImplItem,
        ModItem,
        ForeignModItem,
        UseDeclaration,
        ConstItem,
        StaticItem,
        TypeItem,
        AssociatedType,
        ExternCrateDeclaration,
        MacroDefinition,
        MacroInvocation,
        BroadcastGroup,
        BroadcastUse,
        GlobalItem,
    }
}

ast_enum! {
    /// Expression: any node of the `_expression` supertype.
    Expr {
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
        IndexExpression,
        RangeExpression,
        AssignmentExpression,
        CompoundAssignmentExpr,
        ClosureExpression,
        Block,
        UnsafeBlock,
        AsyncBlock,
        ConstBlock,
        TryBlock,
        IfExpression,
        MatchExpression,
        LoopExpression,
        WhileExpression,
        ForExpression,
        BreakExpression,
        ContinueExpression,
        ReturnExpression,
        YieldExpression,
        StructExpression,
        TupleExpression,
        UnitExpression,
        ArrayExpression,
        ParenthesizedExpression,
        MacroInvocation,
        QuantifierExpression,
        AssertExpression,
        AssertForallExpression,
        AssumeExpression,
        ProofBlock,
        BigAndExpression,
        BigOrExpression,
        ViewExpression,
    }
}

ast_enum! {
    Literal {
        IntegerLiteral,
        FloatLiteral,
        StringLiteral,
        RawStringLiteral,
        CharLiteral,
        BooleanLiteral,
    }
}

ast_enum! {
    Type {
        PathType,
        ReferenceType,
        PointerType,
        ArrayType,
        TupleType,
        UnitType,
        FunctionType,
        AbstractType,
        DynamicType,
        NeverType,
        InferredType,
        MacroInvocation,
    }
}

ast_enum! {
    Pattern {
        IdentifierPattern,
        WildcardPattern,
        LiteralPattern,
        PathPattern,
        TuplePattern,
        TupleStructPattern,
        StructPattern,
        SlicePattern,
        OrPattern,
        RangePattern,
        ReferencePattern,
        RestPattern,
        MacroInvocation,
    }
}

fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == kind)
}

/// First significant token that is a direct child of `node`.
fn first_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| !t.kind().is_trivia())
}

/// First child node following the direct child token of `kind`.
fn node_after(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children_with_tokens()
        .skip_while(|it| it.kind() != kind)
        .skip(1)
        .find_map(|it| it.into_node())
}

fn name(node: &SyntaxNode) -> Option<SyntaxToken> {
    token(node, SyntaxKind::Ident)
}

fn mode_keyword(node: &SyntaxNode) -> Option<SyntaxToken> {
    let mode = node.children().find(|c| c.kind() == SyntaxKind::DataMode)?;
    first_token(&mode)
}

impl SourceFile {
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.children().filter_map(Item::cast)
    }

    pub fn attributes(&self) -> impl Iterator<Item = InnerAttributeItem> + '_ {
        self.0.children().filter_map(InnerAttributeItem::cast)
    }

    /// Trailing expression without `;`.
    pub fn tail(&self) -> Option<Expr> {
        self.0.children().last().and_then(Expr::cast)
    }
}

impl Item {
    /// The declared name, for items that have one.
    pub fn name(&self) -> Option<SyntaxToken> {
        match self {
            Item::ImplItem(_) | Item::ForeignModItem(_) | Item::UseDeclaration(_) => None,
            Item::MacroInvocation(m) => m.path().and_then(|p| p.segments().last()?.name()),
            _ => name(self.as_cst()),
        }
    }

    pub fn visibility(&self) -> Option<VisibilityModifier> {
        self.as_cst().children().find_map(VisibilityModifier::cast)
    }
}

impl AttributeItem {
    pub fn attribute(&self) -> Option<Attribute> {
        self.0.children().find_map(Attribute::cast)
    }
}

impl InnerAttributeItem {
    pub fn attribute(&self) -> Option<Attribute> {
        self.0.children().find_map(Attribute::cast)
    }
}

impl Attribute {
    pub fn path(&self) -> Option<Path> {
        self.0.children().find_map(Path::cast)
    }

    pub fn arguments(&self) -> Option<TokenTree> {
        self.0.children().find_map(TokenTree::cast)
    }

    /// `#[doc = "..."]` value, or the overlay's trigger expressions.
    pub fn values(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl VisibilityModifier {
    /// Whether the modifier is restricted (`pub(crate)`, `pub(in path)`, ...).
    pub fn is_restricted(&self) -> bool {
        token(&self.0, SyntaxKind::ParenOpen).is_some()
    }
}

/// Accessors shared by function items and bodiless signatures.
macro_rules! signature_accessors {
    ($name:ident) => {
        impl $name {
            pub fn name(&self) -> Option<SyntaxToken> {
                name(&self.0)
            }

            pub fn modifiers(&self) -> Option<FunctionModifiers> {
                self.0.children().find_map(FunctionModifiers::cast)
            }

            pub fn mode(&self) -> Option<FunctionMode> {
                self.0.children().find_map(FunctionMode::cast)
            }

            pub fn type_parameters(&self) -> Option<TypeParameters> {
                self.0.children().find_map(TypeParameters::cast)
            }

            pub fn parameters(&self) -> Option<Parameters> {
                self.0.children().find_map(Parameters::cast)
            }

            pub fn return_type(&self) -> Option<ReturnType> {
                self.0.children().find_map(ReturnType::cast)
            }

            pub fn where_clause(&self) -> Option<WhereClause> {
                self.0.children().find_map(WhereClause::cast)
            }

            pub fn requires(&self) -> Option<RequiresClause> {
                self.0.children().find_map(RequiresClause::cast)
            }

            pub fn ensures(&self) -> Option<EnsuresClause> {
                self.0.children().find_map(EnsuresClause::cast)
            }

            pub fn decreases(&self) -> Option<DecreasesClause> {
                self.0.children().find_map(DecreasesClause::cast)
            }
        }
    };
}

signature_accessors!(FunctionItem);
signature_accessors!(FunctionSignatureItem);

impl FunctionItem {
    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl FunctionModifiers {
    pub fn tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| !t.kind().is_trivia())
    }
}

impl FunctionMode {
    /// `SpecKw`, `ProofKw` or `ExecKw`.
    pub fn mode(&self) -> Option<SyntaxKind> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .map(|t| t.kind())
            .find(|k| matches!(k, SyntaxKind::SpecKw | SyntaxKind::ProofKw | SyntaxKind::ExecKw))
    }

    pub fn is_checked(&self) -> bool {
        token(&self.0, SyntaxKind::CheckedKw).is_some()
    }

    /// `OpenKw` or `ClosedKw`.
    pub fn opacity(&self) -> Option<SyntaxKind> {
        token(&self.0, SyntaxKind::OpenKw)
            .or_else(|| token(&self.0, SyntaxKind::ClosedKw))
            .map(|t| t.kind())
    }
}

impl Parameters {
    pub fn self_parameter(&self) -> Option<SelfParameter> {
        self.0.children().find_map(SelfParameter::cast)
    }

    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        self.0.children().filter_map(Parameter::cast)
    }

    /// Bare types, as in `fn(u8, u16)`.
    pub fn types(&self) -> impl Iterator<Item = Type> + '_ {
        self.0.children().filter_map(Type::cast)
    }
}

impl Parameter {
    /// `GhostKw` or `TrackedKw` token.
    pub fn data_mode(&self) -> Option<SyntaxToken> {
        mode_keyword(&self.0)
    }

    pub fn pattern(&self) -> Option<Pattern> {
        self.0.children().find_map(Pattern::cast)
    }

    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }
}

impl SelfParameter {
    pub fn is_reference(&self) -> bool {
        token(&self.0, SyntaxKind::Amp).is_some()
    }

    pub fn is_mut(&self) -> bool {
        token(&self.0, SyntaxKind::MutKw).is_some()
    }
}

impl ReturnType {
    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn named(&self) -> Option<NamedReturn> {
        self.0.children().find_map(NamedReturn::cast)
    }
}

impl NamedReturn {
    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }

    pub fn data_mode(&self) -> Option<SyntaxToken> {
        mode_keyword(&self.0)
    }

    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }
}

impl RequiresClause {
    pub fn exprs(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl EnsuresClause {
    pub fn exprs(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl RecommendsClause {
    pub fn exprs(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl InvariantClause {
    pub fn exprs(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl DecreasesClause {
    /// Measures, then the `when` condition if present.
    pub fn exprs(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }

    pub fn has_when(&self) -> bool {
        token(&self.0, SyntaxKind::WhenKw).is_some()
    }

    /// Proof function named by `via`.
    pub fn via(&self) -> Option<Path> {
        self.0.children().find_map(Path::cast)
    }
}

impl StructItem {
    pub fn fields(&self) -> impl Iterator<Item = FieldDeclaration> + '_ {
        self.0
            .children()
            .filter_map(FieldDeclarationList::cast)
            .flat_map(|list| list.fields().collect::<Vec<_>>())
    }

    pub fn is_tuple(&self) -> bool {
        self.0
            .children()
            .any(|c| c.kind() == SyntaxKind::OrderedFieldDeclarationList)
    }
}

impl FieldDeclarationList {
    pub fn fields(&self) -> impl Iterator<Item = FieldDeclaration> + '_ {
        self.0.children().filter_map(FieldDeclaration::cast)
    }
}

impl FieldDeclaration {
    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }

    pub fn data_mode(&self) -> Option<SyntaxToken> {
        mode_keyword(&self.0)
    }

    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }
}

impl EnumItem {
    pub fn variants(&self) -> impl Iterator<Item = EnumVariant> + '_ {
        self.0
            .children()
            .filter(|c| c.kind() == SyntaxKind::EnumVariantList)
            .flat_map(|list| list.children().filter_map(EnumVariant::cast).collect::<Vec<_>>())
    }
}

impl EnumVariant {
    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }

    pub fn discriminant(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl TraitItem {
    pub fn body(&self) -> Option<DeclarationList> {
        self.0.children().find_map(DeclarationList::cast)
    }
}

impl ImplItem {
    /// Implemented trait, when the impl has a `for`.
    pub fn trait_type(&self) -> Option<Type> {
        token(&self.0, SyntaxKind::ForKw)?;
        self.0.children().find_map(Type::cast)
    }

    /// Self type.
    pub fn self_type(&self) -> Option<Type> {
        self.0.children().filter_map(Type::cast).last()
    }

    pub fn is_negative(&self) -> bool {
        token(&self.0, SyntaxKind::Bang).is_some()
    }

    pub fn body(&self) -> Option<DeclarationList> {
        self.0.children().find_map(DeclarationList::cast)
    }
}

impl DeclarationList {
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.children().filter_map(Item::cast)
    }
}

impl ModItem {
    pub fn body(&self) -> Option<DeclarationList> {
        self.0.children().find_map(DeclarationList::cast)
    }
}

impl UseDeclaration {
    pub fn tree(&self) -> Option<UseTree> {
        self.0.children().find_map(UseTree::cast)
    }
}

impl UseTree {
    pub fn path(&self) -> Option<Path> {
        self.0.children().find_map(Path::cast)
    }

    pub fn is_glob(&self) -> bool {
        token(&self.0, SyntaxKind::Star).is_some()
    }

    /// Nested trees of a `{ .. }` list.
    pub fn children(&self) -> impl Iterator<Item = UseTree> + '_ {
        self.0
            .children()
            .filter(|c| c.kind() == SyntaxKind::UseList)
            .flat_map(|list| list.children().filter_map(UseTree::cast).collect::<Vec<_>>())
    }

    pub fn alias(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::AsKw)?;
        name(&self.0).or_else(|| token(&self.0, SyntaxKind::Underscore))
    }
}

impl ConstItem {
    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl StaticItem {
    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }

    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl TypeItem {
    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }
}

impl BroadcastGroup {
    pub fn members(&self) -> impl Iterator<Item = Path> + '_ {
        self.0.children().filter_map(Path::cast)
    }
}

impl BroadcastUse {
    pub fn paths(&self) -> impl Iterator<Item = Path> + '_ {
        self.0.children().filter_map(Path::cast)
    }
}

impl MacroDefinition {
    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }

    pub fn rules(&self) -> impl Iterator<Item = MacroRule> + '_ {
        self.0.children().filter_map(MacroRule::cast)
    }
}

impl MacroRule {
    pub fn pattern(&self) -> Option<TokenTreePattern> {
        self.0.children().find_map(TokenTreePattern::cast)
    }

    pub fn template(&self) -> Option<TokenTree> {
        self.0.children().find_map(TokenTree::cast)
    }
}

impl TokenTreePattern {
    /// Opening delimiter kind.
    pub fn delimiter(&self) -> Option<SyntaxKind> {
        first_token(&self.0).map(|t| t.kind())
    }
}

impl TokenBindingPattern {
    /// `$name` token.
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Metavariable)
    }

    /// Text of the fragment specifier (`expr`, `ident`, ...).
    pub fn fragment(&self) -> Option<SyntaxToken> {
        let specifier = self
            .0
            .children()
            .find(|c| c.kind() == SyntaxKind::FragmentSpecifier)?;
        first_token(&specifier)
    }
}

impl TokenRepetitionPattern {
    /// Repetition operator: `*`, `+` or `?`.
    pub fn operator(&self) -> Option<SyntaxToken> {
        repetition_parts(&self.0).1
    }

    pub fn separator(&self) -> Option<SyntaxToken> {
        repetition_parts(&self.0).0
    }
}

impl TokenRepetition {
    pub fn operator(&self) -> Option<SyntaxToken> {
        repetition_parts(&self.0).1
    }

    pub fn separator(&self) -> Option<SyntaxToken> {
        repetition_parts(&self.0).0
    }
}

/// Separator and operator: the significant tokens after the closing `)`.
fn repetition_parts(node: &SyntaxNode) -> (Option<SyntaxToken>, Option<SyntaxToken>) {
    let tail: Vec<SyntaxToken> = node
        .children_with_tokens()
        .filter_map(|it| it.into_token())
        .filter(|t| !t.kind().is_trivia())
        .skip_while(|t| t.kind() != SyntaxKind::ParenClose)
        .skip(1)
        .collect();
    match tail.as_slice() {
        [op] => (None, Some(op.clone())),
        [sep, op] => (Some(sep.clone()), Some(op.clone())),
        _ => (None, None),
    }
}

impl TokenTree {
    /// Opening delimiter kind.
    pub fn delimiter(&self) -> Option<SyntaxKind> {
        first_token(&self.0).map(|t| t.kind())
    }
}

impl MacroInvocation {
    pub fn path(&self) -> Option<Path> {
        self.0.children().find_map(Path::cast)
    }

    pub fn token_tree(&self) -> Option<TokenTree> {
        self.0.children().find_map(TokenTree::cast)
    }
}

impl Path {
    pub fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
        self.0.children().filter_map(PathSegment::cast)
    }

    pub fn qualifier(&self) -> Option<QualifiedType> {
        self.0.children().find_map(QualifiedType::cast)
    }

    /// Segment names joined with `::`.
    pub fn text(&self) -> String {
        self.segments()
            .filter_map(|s| s.name())
            .map(|t| t.text().to_string())
            .collect::<Vec<_>>()
            .join("::")
    }
}

impl PathSegment {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0).filter(|t| {
            matches!(
                t.kind(),
                SyntaxKind::Ident
                    | SyntaxKind::SelfKw
                    | SyntaxKind::SelfTypeKw
                    | SyntaxKind::SuperKw
                    | SyntaxKind::CrateKw
            )
        })
    }

    pub fn type_arguments(&self) -> Option<TypeArguments> {
        self.0.children().find_map(TypeArguments::cast)
    }
}

impl TypeArguments {
    pub fn types(&self) -> impl Iterator<Item = Type> + '_ {
        self.0.children().filter_map(Type::cast)
    }
}

impl PathType {
    pub fn path(&self) -> Option<Path> {
        self.0.children().find_map(Path::cast)
    }
}

impl ReferenceType {
    pub fn is_mut(&self) -> bool {
        token(&self.0, SyntaxKind::MutKw).is_some()
    }

    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }
}

impl TupleType {
    pub fn elements(&self) -> impl Iterator<Item = Type> + '_ {
        self.0.children().filter_map(Type::cast)
    }
}

impl Block {
    pub fn label(&self) -> Option<SyntaxToken> {
        let label = self.0.children().find(|c| c.kind() == SyntaxKind::Label)?;
        first_token(&label)
    }

    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.children().filter_map(Item::cast)
    }

    /// Direct children that are statements or the tail expression.
    pub fn statements(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|c| c.kind() != SyntaxKind::Label)
    }

    pub fn tail(&self) -> Option<Expr> {
        self.0.children().last().and_then(Expr::cast)
    }
}

impl LetDeclaration {
    pub fn data_mode(&self) -> Option<SyntaxToken> {
        mode_keyword(&self.0)
    }

    pub fn pattern(&self) -> Option<Pattern> {
        self.0
            .children()
            .find(|c| c.kind() != SyntaxKind::DataMode)
            .and_then(Pattern::cast)
    }

    pub fn ty(&self) -> Option<Type> {
        node_after(&self.0, SyntaxKind::Colon).and_then(Type::cast)
    }

    pub fn value(&self) -> Option<Expr> {
        node_after(&self.0, SyntaxKind::Eq).and_then(Expr::cast)
    }

    pub fn else_clause(&self) -> Option<ElseClause> {
        self.0.children().find_map(ElseClause::cast)
    }
}

impl ExpressionStatement {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn has_semicolon(&self) -> bool {
        token(&self.0, SyntaxKind::Semicolon).is_some()
    }
}

impl BinaryExpression {
    pub fn left(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn operator(&self) -> Option<SyntaxToken> {
        first_token(&self.0)
    }

    pub fn right(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }
}

impl UnaryExpression {
    pub fn operator(&self) -> Option<SyntaxToken> {
        first_token(&self.0)
    }

    pub fn operand(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl AssignmentExpression {
    pub fn left(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn right(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }
}

impl RangeExpression {
    pub fn operator(&self) -> Option<SyntaxToken> {
        first_token(&self.0)
    }

    pub fn operands(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl CastExpression {
    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn ty(&self) -> Option<Type> {
        self.0.children().find_map(Type::cast)
    }
}

impl TryExpression {
    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl ViewExpression {
    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl FieldExpression {
    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// Field name or tuple index.
    pub fn field(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| matches!(t.kind(), SyntaxKind::Ident | SyntaxKind::IntNumber))
    }
}

impl CallExpression {
    pub fn function(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn arguments(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0
            .children()
            .filter_map(Arguments::cast)
            .flat_map(|args| args.0.children().filter_map(Expr::cast).collect::<Vec<_>>())
    }
}

impl IndexExpression {
    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn index(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }
}

impl ClosureExpression {
    pub fn parameters(&self) -> Option<ClosureParameters> {
        self.0.children().find_map(ClosureParameters::cast)
    }

    pub fn body(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl ClosureParameters {
    pub fn patterns(&self) -> impl Iterator<Item = Pattern> + '_ {
        self.0.children().filter_map(|c| match c.kind() {
            SyntaxKind::Parameter => c.children().find_map(Pattern::cast),
            _ => Pattern::cast(c),
        })
    }
}

impl IfExpression {
    /// Condition, unless it is a `let` condition or chain.
    pub fn condition(&self) -> Option<Expr> {
        self.0.children().next().and_then(Expr::cast)
    }

    pub fn let_condition(&self) -> Option<LetCondition> {
        self.0.children().find_map(LetCondition::cast)
    }

    pub fn consequence(&self) -> Option<Block> {
        self.0.children().skip(1).find_map(Block::cast)
    }

    pub fn alternative(&self) -> Option<ElseClause> {
        self.0.children().find_map(ElseClause::cast)
    }
}

impl LetCondition {
    pub fn pattern(&self) -> Option<Pattern> {
        self.0.children().find_map(Pattern::cast)
    }

    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl MatchExpression {
    pub fn scrutinee(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn arms(&self) -> impl Iterator<Item = MatchArm> + '_ {
        self.0
            .children()
            .filter(|c| c.kind() == SyntaxKind::MatchBlock)
            .flat_map(|block| block.children().filter_map(MatchArm::cast).collect::<Vec<_>>())
    }
}

impl MatchArm {
    pub fn pattern(&self) -> Option<Pattern> {
        let pattern = self
            .0
            .children()
            .find(|c| c.kind() == SyntaxKind::MatchPattern)?;
        pattern.children().find_map(Pattern::cast)
    }

    pub fn guard(&self) -> Option<Expr> {
        let pattern = self
            .0
            .children()
            .find(|c| c.kind() == SyntaxKind::MatchPattern)?;
        pattern.children().find_map(Expr::cast)
    }

    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl StructExpression {
    pub fn path(&self) -> Option<Path> {
        self.0.children().find_map(Path::cast)
    }
}

impl QuantifierExpression {
    /// `ForallKw`, `ExistsKw` or `ChooseKw`.
    pub fn quantifier(&self) -> Option<SyntaxToken> {
        first_token(&self.0)
    }

    pub fn parameters(&self) -> Option<ClosureParameters> {
        self.0.children().find_map(ClosureParameters::cast)
    }

    /// `#![trigger ..]` attributes.
    pub fn triggers(&self) -> impl Iterator<Item = InnerAttributeItem> + '_ {
        self.0.children().filter_map(InnerAttributeItem::cast)
    }

    pub fn body(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl AssertExpression {
    pub fn condition(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn has_by(&self) -> bool {
        token(&self.0, SyntaxKind::ByKw).is_some()
    }

    pub fn proof(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl BigAndExpression {
    pub fn operands(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl BigOrExpression {
    pub fn operands(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl StringLiteral {
    /// Source text between the quotes, escapes left as written.
    pub fn contents(&self) -> String {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| matches!(t.kind(), SyntaxKind::StringContent | SyntaxKind::EscapeSequence))
            .map(|t| t.text().to_string())
            .collect()
    }

    pub fn is_terminated(&self) -> bool {
        token(&self.0, SyntaxKind::StringEnd).is_some()
    }
}

impl RawStringLiteral {
    pub fn contents(&self) -> String {
        token(&self.0, SyntaxKind::RawStringContent)
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    pub fn is_terminated(&self) -> bool {
        token(&self.0, SyntaxKind::RawStringEnd).is_some()
    }
}

impl IntegerLiteral {
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}

impl BooleanLiteral {
    pub fn value(&self) -> bool {
        token(&self.0, SyntaxKind::TrueKw).is_some()
    }
}

impl IdentifierPattern {
    pub fn name(&self) -> Option<SyntaxToken> {
        name(&self.0)
    }

    pub fn data_mode(&self) -> Option<SyntaxToken> {
        mode_keyword(&self.0)
    }

    pub fn is_ref(&self) -> bool {
        token(&self.0, SyntaxKind::RefKw).is_some()
    }

    pub fn is_mut(&self) -> bool {
        token(&self.0, SyntaxKind::MutKw).is_some()
    }

    /// Sub-pattern after `@`.
    pub fn subpattern(&self) -> Option<Pattern> {
        self.0.children().find_map(Pattern::cast)
    }
}

impl OrPattern {
    pub fn alternatives(&self) -> impl Iterator<Item = Pattern> + '_ {
        self.0.children().filter_map(Pattern::cast)
    }
}

impl TupleStructPattern {
    pub fn path(&self) -> Option<Path> {
        self.0.children().find_map(Path::cast)
    }

    pub fn elements(&self) -> impl Iterator<Item = Pattern> + '_ {
        self.0.children().filter_map(Pattern::cast)
    }
}

impl TuplePattern {
    pub fn elements(&self) -> impl Iterator<Item = Pattern> + '_ {
        self.0.children().filter_map(Pattern::cast)
    }
}
