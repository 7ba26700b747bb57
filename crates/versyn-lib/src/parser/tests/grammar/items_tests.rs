use indoc::indoc;

use crate::parser::SyntaxKind;
use crate::parser::ast::{AttributeItem, Expr, Item, Type};
use crate::parser::tests::{parse, parse_base};

fn kinds(items: impl Iterator<Item = Item>) -> Vec<SyntaxKind> {
    items.map(|item| item.kind()).collect()
}

#[test]
fn struct_with_named_fields() {
    let res = parse("struct Point { x: i32, pub y: i32 }");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (struct_item (field_declaration_list (field_declaration (path_type (path (path_segment)))) (field_declaration (visibility_modifier) (path_type (path (path_segment)))))))");
}

#[test]
fn tuple_struct_with_restricted_visibility() {
    let res = parse("pub(crate) struct Pair(pub u8, u16);");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (struct_item (visibility_modifier) (ordered_field_declaration_list (ordered_field (visibility_modifier) (path_type (path (path_segment)))) (ordered_field (path_type (path (path_segment)))))))");

    let item = res.tree().items().next().unwrap();
    assert!(item.visibility().unwrap().is_restricted());
    let Item::StructItem(st) = item else {
        panic!("expected a struct");
    };
    assert!(st.is_tuple());
    assert_eq!(st.fields().count(), 0);
}

#[test]
fn enum_variants() {
    let res = parse("enum Shape { Unit = 1, Tuple(u8), Named { x: u8 } }");
    assert!(res.is_valid());

    let Some(Item::EnumItem(e)) = res.tree().items().next() else {
        panic!("expected an enum");
    };
    let names: Vec<String> = e
        .variants()
        .map(|v| v.name().unwrap().text().to_string())
        .collect();
    assert_eq!(names, ["Unit", "Tuple", "Named"]);

    let variants: Vec<_> = e.variants().collect();
    assert!(matches!(variants[0].discriminant(), Some(Expr::IntegerLiteral(_))));
    assert!(variants[1].discriminant().is_none());
}

#[test]
fn trait_with_associated_items() {
    let res = parse("unsafe trait T: Clone { type Out; fn f(&self) -> u8; const N: usize = 3; }");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (trait_item (trait_bounds (path_type (path (path_segment)))) (declaration_list (associated_type) (function_signature_item (parameters (self_parameter)) (return_type (path_type (path (path_segment))))) (const_item (path_type (path (path_segment))) (integer_literal)))))");
}

#[test]
fn negative_impl() {
    let res = parse("impl !Send for Foo {}");
    assert!(res.is_valid());

    let Some(Item::ImplItem(imp)) = res.tree().items().next() else {
        panic!("expected an impl");
    };
    assert!(imp.is_negative());
    let Some(Type::PathType(tr)) = imp.trait_type() else {
        panic!("expected a trait path");
    };
    assert_eq!(tr.path().unwrap().text(), "Send");
}

#[test]
fn inherent_impl_has_no_trait() {
    let res = parse("impl<T> Stack<T> { pub fn push(&mut self, value: T) {} }");
    assert!(res.is_valid());

    let Some(Item::ImplItem(imp)) = res.tree().items().next() else {
        panic!("expected an impl");
    };
    assert!(imp.trait_type().is_none());
    let Some(Item::FunctionItem(push)) = imp.body().unwrap().items().next() else {
        panic!("expected a method");
    };
    let params = push.parameters().unwrap();
    let receiver = params.self_parameter().unwrap();
    assert!(receiver.is_reference());
    assert!(receiver.is_mut());
    assert_eq!(params.parameters().count(), 1);
}

#[test]
fn module_with_glob_use_and_path_visibility() {
    let res = parse("mod inner { use super::*; pub(in crate::a) fn g() {} }");
    assert!(res.is_valid());

    let Some(Item::ModItem(m)) = res.tree().items().next() else {
        panic!("expected a module");
    };
    let items: Vec<Item> = m.body().unwrap().items().collect();
    assert_eq!(items.len(), 2);

    let Item::UseDeclaration(decl) = &items[0] else {
        panic!("expected a use declaration");
    };
    let tree = decl.tree().unwrap();
    assert!(tree.is_glob());
    assert_eq!(tree.path().unwrap().text(), "super");

    assert!(items[1].visibility().unwrap().is_restricted());
    assert_eq!(items[1].name().unwrap().text(), "g");
}

#[test]
fn declarations() {
    let source = indoc! {r#"
    const _: () = ();
    static mut COUNT: u32 = 0;
    type Alias<T> = Vec<T>;
    extern crate alloc as a;
    union U { a: u8, b: f32 }
    "#};
    let res = parse(source);
    assert!(res.is_valid());

    assert_eq!(
        kinds(res.tree().items()),
        vec![
            SyntaxKind::ConstItem,
            SyntaxKind::StaticItem,
            SyntaxKind::TypeItem,
            SyntaxKind::ExternCrateDeclaration,
            SyntaxKind::UnionItem,
        ]
    );

    let Some(Item::ConstItem(c)) = res.tree().items().next() else {
        panic!("expected a const");
    };
    assert_eq!(c.ty().unwrap().kind(), SyntaxKind::UnitType);
    assert_eq!(c.value().unwrap().kind(), SyntaxKind::UnitExpression);
}

#[test]
fn generics_and_where_clause() {
    let res = parse("fn f<'a, T: Clone + 'a, const N: usize>(x: &'a T) -> [T; N] where T: Copy { todo!() }");
    assert!(res.is_valid());

    let Some(Item::FunctionItem(func)) = res.tree().items().next() else {
        panic!("expected a function");
    };
    let params: Vec<SyntaxKind> = func
        .type_parameters()
        .unwrap()
        .as_cst()
        .children()
        .map(|c| c.kind())
        .collect();
    assert_eq!(
        params,
        vec![
            SyntaxKind::LifetimeParameter,
            SyntaxKind::TypeParameter,
            SyntaxKind::ConstParameter,
        ]
    );

    let x = func.parameters().unwrap().parameters().next().unwrap();
    assert_eq!(x.ty().unwrap().kind(), SyntaxKind::ReferenceType);
    assert_eq!(
        func.return_type().unwrap().ty().unwrap().kind(),
        SyntaxKind::ArrayType
    );
    assert!(func.where_clause().is_some());
    assert!(matches!(
        func.body().unwrap().tail(),
        Some(Expr::MacroInvocation(_))
    ));
}

#[test]
fn function_modifiers() {
    let res = parse(r#"pub const unsafe extern "C" fn raw() {}"#);
    assert!(res.is_valid());

    let Some(Item::FunctionItem(func)) = res.tree().items().next() else {
        panic!("expected a function");
    };
    assert_eq!(
        func.modifiers().unwrap().as_cst().text(),
        r#"const unsafe extern "C""#
    );
    assert!(func.mode().is_none());
}

#[test]
fn attributes_stay_beside_their_item() {
    let source = indoc! {r#"
    #![allow(dead_code)]
    #[derive(Debug)]
    struct S;
    "#};
    let res = parse(source);
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (inner_attribute_item (attribute (path (path_segment)) (token_tree))) (attribute_item (attribute (path (path_segment)) (token_tree))) (struct_item))");

    let tree = res.tree();
    assert_eq!(tree.attributes().count(), 1);
    assert_eq!(kinds(tree.items()), vec![SyntaxKind::StructItem]);
    let outer = res
        .syntax()
        .children()
        .find_map(AttributeItem::cast)
        .unwrap();
    assert_eq!(outer.attribute().unwrap().path().unwrap().text(), "derive");
}

#[test]
fn attribute_with_value() {
    let res = parse(r#"#[doc = "x"] fn f() {}"#);
    assert!(res.is_valid());

    let outer = res
        .syntax()
        .children()
        .find_map(AttributeItem::cast)
        .unwrap();
    let values: Vec<Expr> = outer.attribute().unwrap().values().collect();
    assert_eq!(values.len(), 1);
    assert!(matches!(values[0], Expr::StringLiteral(_)));
}

#[test]
fn mode_words_are_identifiers_in_base() {
    let res = parse_base("fn spec() {} fn main() { spec(); }");
    assert!(res.is_valid());

    let tree = res.tree();
    let names: Vec<String> = tree
        .items()
        .map(|i| i.name().unwrap().text().to_string())
        .collect();
    assert_eq!(names, ["spec", "main"]);
}
