use crate::parser::SyntaxKind;
use crate::parser::ast::{Item, LetDeclaration, Type, TypeItem};
use crate::parser::tests::parse;
use crate::parser::{Parse, SyntaxNode};

/// Type of the first `type X = ..;` item.
fn alias_type(res: &Parse) -> Type {
    res.syntax()
        .descendants()
        .find_map(TypeItem::cast)
        .and_then(|t| t.ty())
        .expect("source has a type alias")
}

#[test]
fn reference_to_array() {
    let res = parse("let r: &'a mut [u8; 4] = x;");
    assert!(res.is_valid());

    let decl = res
        .syntax()
        .descendants()
        .find_map(LetDeclaration::cast)
        .unwrap();
    let Some(Type::ReferenceType(reference)) = decl.ty() else {
        panic!("expected a reference type");
    };
    assert!(reference.is_mut());
    assert_eq!(reference.ty().unwrap().kind(), SyntaxKind::ArrayType);
    assert!(reference.as_cst().children().any(|c| c.kind() == SyntaxKind::Lifetime));
}

#[test]
fn function_pointer_type() {
    let res = parse("type F = fn(u8, u16) -> bool;");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (type_item (function_type (parameters (path_type (path (path_segment))) (path_type (path (path_segment)))) (return_type (path_type (path (path_segment)))))))");
}

#[test]
fn boxed_closure_trait_object() {
    let res = parse("type B = Box<dyn Fn(u8) -> u8 + Send>;");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (type_item (path_type (path (path_segment (type_arguments (dynamic_type (function_type (path (path_segment)) (parameters (path_type (path (path_segment)))) (return_type (path_type (path (path_segment))))) (path_type (path (path_segment))))))))))");
}

#[test]
fn tuple_elements() {
    let res = parse("type T = (u8, *const u8, !, ());");
    assert!(res.is_valid());

    let Type::TupleType(tuple) = alias_type(&res) else {
        panic!("expected a tuple type");
    };
    let kinds: Vec<SyntaxKind> = tuple.elements().map(|t| t.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::PathType,
            SyntaxKind::PointerType,
            SyntaxKind::NeverType,
            SyntaxKind::UnitType,
        ]
    );
}

#[test]
fn parenthesized_type_is_a_one_element_tuple() {
    let res = parse("type P = (u8);");
    assert!(res.is_valid());

    let Type::TupleType(tuple) = alias_type(&res) else {
        panic!("expected a tuple type");
    };
    assert_eq!(tuple.elements().count(), 1);
}

#[test]
fn nested_generics_split_shift() {
    let res = parse("type V = Vec<Vec<u8>>;");
    assert!(res.is_valid());

    let Type::PathType(outer) = alias_type(&res) else {
        panic!("expected a path type");
    };
    let segment = outer.path().unwrap().segments().next().unwrap();
    let args: Vec<Type> = segment.type_arguments().unwrap().types().collect();
    assert_eq!(args.len(), 1);
    let Type::PathType(inner) = &args[0] else {
        panic!("expected a path type");
    };
    let inner_segment = inner.path().unwrap().segments().next().unwrap();
    assert_eq!(inner_segment.name().unwrap().text(), "Vec");
    assert_eq!(inner_segment.type_arguments().unwrap().types().count(), 1);
}

#[test]
fn qualified_path() {
    let res = parse("type X = <T as Trait>::Out;");
    assert!(res.is_valid());

    insta::assert_snapshot!(res.to_sexp(), @"(source_file (type_item (path_type (path (qualified_type (path_type (path (path_segment))) (path_type (path (path_segment)))) (path_segment)))))");

    let Type::PathType(ty) = alias_type(&res) else {
        panic!("expected a path type");
    };
    let path = ty.path().unwrap();
    assert!(path.qualifier().is_some());
    assert_eq!(path.text(), "Out");
}

#[test]
fn impl_trait_with_binding() {
    let res = parse("fn f(x: impl Iterator<Item = u8>) {}");
    assert!(res.is_valid());

    let Some(Item::FunctionItem(func)) = res.tree().items().next() else {
        panic!("expected a function");
    };
    let param = func.parameters().unwrap().parameters().next().unwrap();
    let Some(Type::AbstractType(ty)) = param.ty() else {
        panic!("expected an impl type");
    };
    let bindings = ty
        .as_cst()
        .descendants()
        .filter(|n: &SyntaxNode| n.kind() == SyntaxKind::TypeBinding)
        .count();
    assert_eq!(bindings, 1);
}

#[test]
fn higher_ranked_function_type() {
    let res = parse("type F = for<'a> fn(&'a u8) -> &'a u8;");
    assert!(res.is_valid());

    let Type::FunctionType(func) = alias_type(&res) else {
        panic!("expected a function type");
    };
    let children: Vec<SyntaxKind> = func.as_cst().children().map(|c| c.kind()).collect();
    assert_eq!(
        children,
        vec![
            SyntaxKind::TypeParameters,
            SyntaxKind::Parameters,
            SyntaxKind::ReturnType,
        ]
    );
}

#[test]
fn missing_type_is_reported() {
    let res = parse("type X = ;");

    assert!(!res.is_valid());
    assert_eq!(
        res.diagnostics().kinds(),
        vec![crate::DiagnosticKind::ExpectedType]
    );
}
