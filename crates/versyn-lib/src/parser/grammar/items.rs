//! Items and declaration lists.
//!
//! Every item takes a checkpoint before its visibility so the modifier ends up
//! inside the item node once the keyword decides which item it is.

use rowan::Checkpoint;

use crate::diagnostics::DiagnosticKind;
use crate::parser::ambiguity::ParamShape;
use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind::*;
use crate::parser::cst::token_sets::{ITEM_RECOVERY, PATH_FIRST, TYPE_FIRST};
use crate::parser::grammar::PathMode;

/// Words that may open a function signature.
const FUNCTION_WORDS: &[&str] = &["default", "open", "closed", "broadcast", "spec", "proof", "exec"];

impl Parser<'_, '_> {
    /// Whether the statement at the cursor is an item.
    pub(super) fn at_item_start(&mut self) -> bool {
        match self.current() {
            Pound | FnKw | StructKw | EnumKw | TraitKw | ImplKw | ModKw | UseKw | TypeKw
            | PubKw | ExternKw => true,
            StaticKw => matches!(self.nth(1), Ident | MutKw),
            ConstKw => {
                (matches!(self.nth(1), Ident | Underscore) && self.nth(2) == Colon)
                    || self.at_function_item()
            }
            UnsafeKw => {
                matches!(self.nth(1), ImplKw | TraitKw)
                    || self.nth_is_contextual(1, AutoKw)
                    || self.at_function_item()
            }
            AsyncKw => self.at_function_item(),
            Ident => self.at_contextual_item(),
            _ => false,
        }
    }

    fn at_contextual_item(&mut self) -> bool {
        let text = self.current_text();
        match text {
            "union" => self.next_is(Ident),
            "macro_rules" => self.next_is(Bang),
            "auto" => self.next_is(TraitKw),
            "broadcast"
                if self.verification()
                    && (self.next_is(UseKw) || self.nth_is_contextual(1, GroupKw)) =>
            {
                true
            }
            "global" => {
                self.nth_is_contextual(1, SizeOfKw) || self.nth_is_contextual(1, LayoutKw)
            }
            _ if FUNCTION_WORDS.contains(&text) => self.at_function_item(),
            _ => false,
        }
    }

    pub(super) fn parse_item(&mut self) {
        if self.at(Pound) {
            self.parse_attribute_item();
            return;
        }

        let checkpoint = self.checkpoint();
        let has_visibility = self.at(PubKw);
        if has_visibility {
            self.parse_visibility();
        }

        if self.at_function_item() {
            self.parse_function(checkpoint);
            return;
        }
        match self.current() {
            StructKw => self.parse_struct(checkpoint),
            EnumKw => self.parse_enum(checkpoint),
            TraitKw => self.parse_trait(checkpoint),
            UnsafeKw if self.next_is(ImplKw) => self.parse_impl(checkpoint),
            UnsafeKw if matches!(self.nth(1), TraitKw | Ident) => self.parse_trait(checkpoint),
            ImplKw => self.parse_impl(checkpoint),
            ModKw => self.parse_mod(checkpoint),
            UseKw => self.parse_use(checkpoint),
            TypeKw => self.parse_type_item(checkpoint),
            ConstKw => self.parse_const(checkpoint),
            StaticKw => self.parse_static(checkpoint),
            ExternKw if self.next_is(CrateKw) => self.parse_extern_crate(checkpoint),
            ExternKw => self.parse_foreign_mod(checkpoint),
            Ident if self.at_contextual_item() => match self.current_text() {
                "union" => self.parse_union(checkpoint),
                "macro_rules" => self.parse_macro_definition(checkpoint),
                "auto" => self.parse_trait(checkpoint),
                "broadcast" if self.next_is(UseKw) => self.parse_broadcast_use(checkpoint),
                "broadcast" => self.parse_broadcast_group(checkpoint),
                _ => self.parse_global_item(checkpoint),
            },
            _ if has_visibility => {
                self.start_node_at(checkpoint, Error);
                self.error(DiagnosticKind::ExpectedItem);
                self.finish_node();
            }
            _ => self.error_and_bump(DiagnosticKind::ExpectedItem),
        }
    }

    /// Function with a body, or a signature ending in `;`.
    fn parse_function(&mut self, checkpoint: Checkpoint) {
        self.parse_function_modifiers();
        self.parse_function_mode();
        self.expect(FnKw, "`fn`");
        self.expect_name();
        if self.at(Lt) {
            self.parse_type_parameters();
        }
        self.parse_parameters();
        if self.at(Arrow) {
            self.parse_return_type();
        }
        if self.at(WhereKw) {
            self.parse_where_clause();
        }
        self.parse_spec_clauses();

        let kind = if self.at(BraceOpen) {
            self.parse_block();
            FunctionItem
        } else {
            self.expect(Semicolon, "`;` or a block");
            FunctionSignatureItem
        };
        self.start_node_at(checkpoint, kind);
        self.finish_node();
    }

    /// `async`, `const`, `unsafe`, `default` and `extern "abi"`, in any order.
    pub(super) fn parse_function_modifiers(&mut self) {
        let at_modifier = |p: &mut Self| {
            matches!(p.current(), AsyncKw | ConstKw | UnsafeKw | ExternKw)
                || p.at_contextual(DefaultKw)
        };
        if !at_modifier(self) {
            return;
        }
        self.start_node(FunctionModifiers);
        while at_modifier(self) {
            match self.current() {
                ExternKw => self.parse_extern_modifier(),
                Ident => self.bump_as(DefaultKw),
                _ => self.bump(),
            }
        }
        self.finish_node();
    }

    fn parse_extern_modifier(&mut self) {
        self.start_node(ExternModifier);
        self.bump();
        if matches!(self.current(), StringStart | RawStringStart) {
            self.parse_literal();
        }
        self.finish_node();
    }

    pub(super) fn parse_parameters(&mut self) {
        if !self.at(ParenOpen) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `(`");
            return;
        }
        self.start_node(Parameters);
        self.open_delimiter();
        self.comma_list(ParenClose, "a parameter", |p| {
            p.parse_outer_attributes();
            p.parse_parameter();
        });
        self.close_delimiter();
        self.finish_node();
    }

    fn parse_parameter(&mut self) {
        if !self.at_any(TYPE_FIRST) && !matches!(self.current(), DotDotDot | MutKw | RefKw) {
            return;
        }
        match self.parameter_shape() {
            ParamShape::Variadic => self.token_node(VariadicParameter),
            ParamShape::SelfParam => {
                self.start_node(SelfParameter);
                if self.at_data_mode(true) {
                    self.parse_data_mode();
                }
                if self.eat(Amp) && self.at(LifetimeName) {
                    self.token_node(Lifetime);
                }
                self.eat(MutKw);
                self.expect(SelfKw, "`self`");
                if self.eat(Colon) {
                    self.parse_type();
                }
                self.finish_node();
            }
            ParamShape::Typed => {
                self.start_node(Parameter);
                if self.at_data_mode(true) {
                    self.parse_data_mode();
                }
                self.parse_single_pattern();
                self.expect(Colon, "`:`");
                self.parse_type();
                self.finish_node();
            }
            ParamShape::Type => {
                self.parse_type();
            }
        }
    }

    /// `-> Type`, or `-> (name: Type)` with the overlay.
    pub(super) fn parse_return_type(&mut self) {
        self.start_node(ReturnType);
        self.expect(Arrow, "`->`");
        if self.at_named_return() {
            self.parse_named_return();
        } else {
            self.parse_type();
        }
        self.finish_node();
    }

    fn parse_struct(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, StructItem);
        self.bump();
        self.expect_name();
        if self.at(Lt) {
            self.parse_type_parameters();
        }
        match self.current() {
            WhereKw => {
                self.parse_where_clause();
                self.parse_field_declaration_list();
            }
            BraceOpen => self.parse_field_declaration_list(),
            ParenOpen => {
                self.parse_ordered_field_declaration_list();
                if self.at(WhereKw) {
                    self.parse_where_clause();
                }
                self.expect(Semicolon, "`;`");
            }
            Semicolon => self.bump(),
            _ => self.error_msg(DiagnosticKind::UnexpectedToken, "expected `{`, `(` or `;`"),
        }
        self.finish_node();
    }

    fn parse_union(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, UnionItem);
        self.bump_as(UnionKw);
        self.expect_name();
        if self.at(Lt) {
            self.parse_type_parameters();
        }
        if self.at(WhereKw) {
            self.parse_where_clause();
        }
        self.parse_field_declaration_list();
        self.finish_node();
    }

    fn parse_field_declaration_list(&mut self) {
        if !self.at(BraceOpen) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `{`");
            return;
        }
        self.start_node(FieldDeclarationList);
        self.open_delimiter();
        self.comma_list(BraceClose, "a field", |p| {
            p.parse_outer_attributes();
            p.parse_field_declaration();
        });
        self.close_delimiter();
        self.finish_node();
    }

    fn parse_field_declaration(&mut self) {
        if !self.at(PubKw) && !self.at(Ident) {
            return;
        }
        self.start_node(FieldDeclaration);
        if self.at(PubKw) {
            self.parse_visibility();
        }
        if self.at_data_mode(false) {
            self.parse_data_mode();
        }
        self.expect_name();
        self.expect(Colon, "`:`");
        self.parse_type();
        self.finish_node();
    }

    fn parse_ordered_field_declaration_list(&mut self) {
        self.start_node(OrderedFieldDeclarationList);
        self.open_delimiter();
        self.comma_list(ParenClose, "a field type", |p| p.parse_ordered_field());
        self.close_delimiter();
        self.finish_node();
    }

    fn parse_ordered_field(&mut self) {
        if !self.at(Pound) && !self.at(PubKw) && !self.at_any(TYPE_FIRST) {
            return;
        }
        self.start_node(OrderedField);
        self.parse_outer_attributes();
        if self.at(PubKw) {
            self.parse_visibility();
        }
        if self.at_data_mode(true) {
            self.parse_data_mode();
        }
        self.parse_type();
        self.finish_node();
    }

    fn parse_enum(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, EnumItem);
        self.bump();
        self.expect_name();
        if self.at(Lt) {
            self.parse_type_parameters();
        }
        if self.at(WhereKw) {
            self.parse_where_clause();
        }
        if self.at(BraceOpen) {
            self.start_node(EnumVariantList);
            self.open_delimiter();
            self.comma_list(BraceClose, "a variant", |p| {
                p.parse_outer_attributes();
                p.parse_enum_variant();
            });
            self.close_delimiter();
            self.finish_node();
        } else {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `{`");
        }
        self.finish_node();
    }

    fn parse_enum_variant(&mut self) {
        if !self.at(PubKw) && !self.at(Ident) {
            return;
        }
        self.start_node(EnumVariant);
        if self.at(PubKw) {
            self.parse_visibility();
        }
        self.expect_name();
        match self.current() {
            BraceOpen => self.parse_field_declaration_list(),
            ParenOpen => self.parse_ordered_field_declaration_list(),
            _ => {}
        }
        if self.eat(Eq) {
            self.parse_expr();
        }
        self.finish_node();
    }

    /// `[unsafe] [auto] trait Name<..>: Bounds where .. { .. }`.
    fn parse_trait(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, TraitItem);
        self.eat(UnsafeKw);
        self.eat_contextual(AutoKw);
        self.expect(TraitKw, "`trait`");
        self.expect_name();
        if self.at(Lt) {
            self.parse_type_parameters();
        }
        if self.at(Colon) {
            self.parse_trait_bounds();
        }
        if self.at(WhereKw) {
            self.parse_where_clause();
        }
        self.parse_declaration_list();
        self.finish_node();
    }

    /// `[unsafe] impl<..> [!]Trait for Type where .. { .. }` or an inherent impl.
    fn parse_impl(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, ImplItem);
        self.eat(UnsafeKw);
        self.bump();
        if self.at(Lt) {
            self.parse_type_parameters();
        }
        let negative = self.eat(Bang);
        self.parse_type();
        if self.eat(ForKw) {
            self.parse_type();
        } else if negative {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `for`");
        }
        if self.at(WhereKw) {
            self.parse_where_clause();
        }
        self.parse_declaration_list();
        self.finish_node();
    }

    /// `{ items }` of traits, impls, modules and foreign modules.
    fn parse_declaration_list(&mut self) {
        if !self.at(BraceOpen) {
            self.error(DiagnosticKind::ExpectedBlock);
            return;
        }
        self.start_node(DeclarationList);
        self.open_delimiter();
        while !self.at(BraceClose) && !self.should_stop() && !self.at_outer_closer() {
            let before = self.progress_mark();
            match self.current() {
                Semicolon => self.token_node(EmptyStatement),
                _ if self.at_item_start() => self.parse_item(),
                _ if self.at_any(PATH_FIRST) => self.parse_item_macro(),
                _ => self.error_recover(
                    DiagnosticKind::ExpectedItem,
                    "expected an item",
                    ITEM_RECOVERY,
                ),
            }
            if self.progress_mark() == before && !self.should_stop() {
                self.error_and_bump(DiagnosticKind::ExpectedItem);
            }
        }
        self.close_delimiter();
        self.finish_node();
    }

    /// `path!(..);` or `path! { .. }` among items.
    fn parse_item_macro(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_path(PathMode::Expr);
        if !(self.at(Bang) && matches!(self.nth(1), ParenOpen | BracketOpen | BraceOpen)) {
            self.start_node_at(checkpoint, Error);
            self.error(DiagnosticKind::ExpectedItem);
            self.finish_node();
            return;
        }
        self.start_node_at(checkpoint, MacroInvocation);
        self.bump();
        self.parse_token_tree();
        self.finish_node();
        if self.prev_kind() != Some(BraceClose) && !self.at(Semicolon) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `;`");
        }
    }

    /// `type Name = Type;`, or `type Name: Bounds;` in traits.
    fn parse_type_item(&mut self, checkpoint: Checkpoint) {
        self.bump();
        self.expect_name();
        if self.at(Lt) {
            self.parse_type_parameters();
        }
        if self.at(Colon) {
            self.parse_trait_bounds();
        }
        if self.at(WhereKw) {
            self.parse_where_clause();
        }
        let kind = if self.eat(Eq) {
            self.parse_type();
            if self.at(WhereKw) {
                self.parse_where_clause();
            }
            TypeItem
        } else {
            AssociatedType
        };
        self.expect(Semicolon, "`;`");
        self.start_node_at(checkpoint, kind);
        self.finish_node();
    }

    fn parse_mod(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, ModItem);
        self.bump();
        self.expect_name();
        if self.at(BraceOpen) {
            self.parse_declaration_list();
        } else {
            self.expect(Semicolon, "`;` or `{`");
        }
        self.finish_node();
    }

    fn parse_foreign_mod(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, ForeignModItem);
        self.parse_extern_modifier();
        if self.at(BraceOpen) {
            self.parse_declaration_list();
        } else {
            self.expect(Semicolon, "`;` or `{`");
        }
        self.finish_node();
    }

    fn parse_extern_crate(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, ExternCrateDeclaration);
        self.bump();
        self.bump();
        if !self.eat(SelfKw) {
            self.expect_name();
        }
        if self.eat(AsKw) && !self.eat(Underscore) {
            self.expect_name();
        }
        self.expect(Semicolon, "`;`");
        self.finish_node();
    }

    fn parse_use(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, UseDeclaration);
        self.bump();
        self.parse_use_tree();
        self.expect(Semicolon, "`;`");
        self.finish_node();
    }

    fn at_use_tree(&mut self) -> bool {
        matches!(
            self.current(),
            Ident | SelfKw | SuperKw | CrateKw | SelfTypeKw | ColonColon | Star | BraceOpen
        )
    }

    fn parse_use_tree(&mut self) {
        if !self.at_use_tree() {
            self.error(DiagnosticKind::ExpectedIdentifier);
            return;
        }
        self.start_node(UseTree);
        if self.at(ColonColon) && matches!(self.nth(1), Star | BraceOpen) {
            self.bump();
        }
        match self.current() {
            Star => self.bump(),
            BraceOpen => self.parse_use_list(),
            _ => {
                self.parse_path(PathMode::Use);
                if self.at(ColonColon) {
                    self.bump();
                    if self.at(BraceOpen) {
                        self.parse_use_list();
                    } else {
                        self.expect(Star, "`*` or `{`");
                    }
                } else if self.eat(AsKw) && !self.eat(Underscore) {
                    self.expect_name();
                }
            }
        }
        self.finish_node();
    }

    fn parse_use_list(&mut self) {
        self.start_node(UseList);
        self.open_delimiter();
        self.comma_list(BraceClose, "a use tree", |p| {
            if p.at_use_tree() {
                p.parse_use_tree();
            }
        });
        self.close_delimiter();
        self.finish_node();
    }

    fn parse_const(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, ConstItem);
        self.bump();
        if !self.eat(Underscore) {
            self.expect_name();
        }
        self.expect(Colon, "`:`");
        self.parse_type();
        if self.eat(Eq) {
            self.parse_expr();
        }
        self.expect(Semicolon, "`;`");
        self.finish_node();
    }

    fn parse_static(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, StaticItem);
        self.bump();
        self.eat(MutKw);
        self.expect_name();
        self.expect(Colon, "`:`");
        self.parse_type();
        if self.eat(Eq) {
            self.parse_expr();
        }
        self.expect(Semicolon, "`;`");
        self.finish_node();
    }
}
