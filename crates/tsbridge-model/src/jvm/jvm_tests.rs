#![allow(non_snake_case)]

use super::*;
use proptest::prelude::*;

#[test]
fn parse_field_signature___generic_list___class_with_argument() {
    let ty = parse_field_signature("Ljava/util/List<Ljava/lang/String;>;").unwrap();

    assert_eq!(
        ty,
        JvmType::Class(JvmClassType {
            name: "java.util.List".to_string(),
            type_arguments: vec![JvmTypeArgument::Exact(JvmType::class("java.lang.String"))],
        })
    );
}

#[test]
fn parse_field_signature___nested_map___keeps_argument_order() {
    let ty = parse_field_signature(
        "Ljava/util/Map<Ljava/lang/String;Ljava/util/List<TT;>;>;",
    )
    .unwrap();

    let JvmType::Class(map) = ty else {
        panic!("expected class type");
    };
    assert_eq!(map.type_arguments.len(), 2);
    let JvmTypeArgument::Exact(JvmType::Class(list)) = &map.type_arguments[1] else {
        panic!("expected list argument");
    };
    assert_eq!(
        list.type_arguments,
        vec![JvmTypeArgument::Exact(JvmType::TypeVariable("T".to_string()))]
    );
}

#[test]
fn parse_field_signature___wildcards___all_forms() {
    let ty = parse_field_signature(
        "Lcom/example/Triple<*+Ljava/lang/Number;-Ljava/lang/Integer;>;",
    )
    .unwrap();

    let JvmType::Class(class) = ty else {
        panic!("expected class type");
    };
    assert_eq!(
        class.type_arguments,
        vec![
            JvmTypeArgument::Any,
            JvmTypeArgument::Extends(JvmType::class("java.lang.Number")),
            JvmTypeArgument::Super(JvmType::class("java.lang.Integer")),
        ]
    );
}

#[test]
fn parse_field_signature___inner_class___dollar_name_and_inner_arguments() {
    let ty = parse_field_signature("Lcom/example/Outer<TT;>.Inner<TU;>;").unwrap();

    assert_eq!(
        ty,
        JvmType::Class(JvmClassType {
            name: "com.example.Outer$Inner".to_string(),
            type_arguments: vec![JvmTypeArgument::Exact(JvmType::TypeVariable("U".to_string()))],
        })
    );
}

#[test]
fn parse_field_signature___array_of_arrays___nested_arrays() {
    let ty = parse_field_signature("[[I").unwrap();

    assert_eq!(
        ty,
        JvmType::Array(Box::new(JvmType::Array(Box::new(JvmType::Base(BaseType::Int)))))
    );
}

#[test]
fn parse_field_signature___void___rejected() {
    let result = parse_field_signature("V");

    assert!(matches!(result, Err(ModelError::MalformedSignature { .. })));
}

#[test]
fn parse_field_signature___trailing_characters___rejected() {
    let result = parse_field_signature("IJ");

    assert!(matches!(
        result,
        Err(ModelError::MalformedSignature { position: 1, .. })
    ));
}

#[test]
fn parse_class_signature___bounded_parameters___class_and_interface_bounds() {
    let signature = parse_class_signature(
        "<T:Ljava/lang/Number;:Ljava/lang/Comparable<TT;>;U::Ljava/io/Serializable;>Lcom/example/Base<TT;>;Ljava/io/Serializable;",
    )
    .unwrap();

    assert_eq!(signature.type_parameters.len(), 2);
    assert_eq!(signature.type_parameters[0].name, "T");
    assert_eq!(
        signature.type_parameters[0].class_bound,
        Some(JvmType::class("java.lang.Number"))
    );
    assert_eq!(signature.type_parameters[0].interface_bounds.len(), 1);
    assert_eq!(signature.type_parameters[1].class_bound, None);
    assert_eq!(signature.type_parameters[1].bounds().count(), 1);
    assert_eq!(signature.interfaces, vec![JvmType::class("java.io.Serializable")]);
}

#[test]
fn parse_method_signature___generic_method___parameters_result_and_throws() {
    let signature = parse_method_signature(
        "<T:Ljava/lang/Object;>(TT;I[Ljava/lang/String;)Ljava/util/List<TT;>;^Ljava/io/IOException;^TE;",
    )
    .unwrap();

    assert_eq!(signature.type_parameters[0].name, "T");
    assert_eq!(signature.parameters.len(), 3);
    assert_eq!(signature.parameters[1], JvmType::Base(BaseType::Int));
    assert_eq!(
        signature.throws,
        vec![
            JvmType::class("java.io.IOException"),
            JvmType::TypeVariable("E".to_string())
        ]
    );
}

#[test]
fn parse_method_signature___plain_descriptor___void_result() {
    let signature = parse_method_signature("(JLjava/lang/String;)V").unwrap();

    assert!(signature.type_parameters.is_empty());
    assert_eq!(signature.parameters.len(), 2);
    assert_eq!(signature.result, JvmType::Base(BaseType::Void));
}

#[test]
fn parse_method_signature___missing_close_paren___rejected() {
    assert!(parse_method_signature("(I").is_err());
}

#[test]
fn JvmType___display___renders_signature_form() {
    let ty = parse_field_signature("Ljava/util/Map<Ljava/lang/String;[TT;>;").unwrap();

    assert_eq!(ty.to_string(), "Ljava/util/Map<Ljava/lang/String;[TT;>;");
}

fn arb_type() -> impl Strategy<Value = JvmType> {
    let leaf = prop_oneof![
        prop::sample::select(vec!['B', 'C', 'D', 'F', 'I', 'J', 'S', 'Z'])
            .prop_map(|c| JvmType::Base(BaseType::from_descriptor(c).unwrap())),
        "[A-Z][a-z]{0,5}".prop_map(JvmType::TypeVariable),
        "[a-z]{1,4}\\.[A-Z][a-z]{0,5}".prop_map(JvmType::class),
    ];
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|t| JvmType::Array(Box::new(t))),
            (
                "[a-z]{1,4}\\.[A-Z][a-z]{0,5}",
                prop::collection::vec(inner, 1..3)
            )
                .prop_map(|(name, args)| {
                    let type_arguments = args
                        .into_iter()
                        .filter(|a| !matches!(a, JvmType::Base(_)))
                        .map(JvmTypeArgument::Exact)
                        .collect();
                    JvmType::Class(JvmClassType {
                        name,
                        type_arguments,
                    })
                }),
        ]
    })
}

proptest! {
    #[test]
    fn parse_field_signature___arbitrary_input___never_panics(text in "\\PC{0,40}") {
        let _ = parse_field_signature(&text);
        let _ = parse_class_signature(&text);
        let _ = parse_method_signature(&text);
    }

    #[test]
    fn parse_field_signature___rendered_type___parses_back(ty in arb_type()) {
        let rendered = ty.to_string();

        prop_assert_eq!(parse_field_signature(&rendered).unwrap(), ty);
    }
}
