use crate::ValuePath;
use crate::types::TypeAnnotation;
use crate::types::TypeAnnotationParseError;
use crate::types::type_annotation::MAX_LIST_DEPTH;
use proptest::prelude::*;
use serde_json::json;

fn check(annot: &str, value: serde_json::Value) -> Result<(), String> {
    TypeAnnotation::parse(annot)
        .unwrap()
        .check_value(&value, &mut ValuePath::new())
        .map_err(|e| e.to_string())
}

#[test]
fn parses_nested_non_null_lists() {
    let annot = TypeAnnotation::parse("[[ID!]]!").unwrap();
    assert!(!annot.nullable());

    let outer = annot.as_list_annotation().unwrap();
    let middle = outer.inner_type_annotation().as_list_annotation().unwrap();
    assert!(middle.nullable());

    let innermost = annot.innermost_named_type_annotation();
    assert_eq!(innermost.graphql_type_name(), "ID");
    assert!(!innermost.nullable());
}

#[test]
fn display_is_canonical_graphql() {
    let annot = TypeAnnotation::parse("  [ String ! ] ").unwrap();
    assert_eq!(annot.to_string(), "[String!]");
}

#[test]
fn serde_uses_source_form() {
    let annot: TypeAnnotation = serde_json::from_value(json!("[TimeRange!]!")).unwrap();
    assert_eq!(
        annot,
        TypeAnnotation::list(TypeAnnotation::named("TimeRange", false), false),
    );
    assert_eq!(serde_json::to_value(&annot).unwrap(), json!("[TimeRange!]!"));
}

#[test]
fn rejects_malformed_annotations() {
    assert_eq!(TypeAnnotation::parse("   "), Err(TypeAnnotationParseError::Empty));
    assert!(matches!(
        TypeAnnotation::parse("[ID!"),
        Err(TypeAnnotationParseError::UnclosedList { position: 0, .. }),
    ));
    assert!(matches!(
        TypeAnnotation::parse("ID!!"),
        Err(TypeAnnotationParseError::TrailingInput { position: 3, .. }),
    ));
    assert!(matches!(
        TypeAnnotation::parse("1D"),
        Err(TypeAnnotationParseError::InvalidName { position: 0, .. }),
    ));
}

#[test]
fn list_nesting_is_capped() {
    let at_limit = format!("{}ID{}", "[".repeat(MAX_LIST_DEPTH), "]".repeat(MAX_LIST_DEPTH));
    assert!(TypeAnnotation::parse(&at_limit).is_ok());

    let too_deep = format!("[{at_limit}]");
    assert!(matches!(
        TypeAnnotation::parse(&too_deep),
        Err(TypeAnnotationParseError::TooDeeplyNested { max_depth: MAX_LIST_DEPTH, position: MAX_LIST_DEPTH, .. }),
    ));

    let unbalanced = "[".repeat(200_000);
    assert!(matches!(
        TypeAnnotation::parse(&unbalanced),
        Err(TypeAnnotationParseError::TooDeeplyNested { input_len: 200_000, .. }),
    ));
}

#[test]
fn null_only_fits_nullable_types() {
    assert!(check("String", json!(null)).is_ok());
    assert_eq!(
        check("String!", json!(null)),
        Err("expected `String!` at `<root>` but found null".to_string()),
    );
}

#[test]
fn scalar_where_list_declared_is_a_mismatch() {
    assert_eq!(
        check("[ID!]!", json!("project-1")),
        Err("expected `[ID!]!` at `<root>` but found a string".to_string()),
    );
}

#[test]
fn list_items_are_checked_with_their_index() {
    let mut path = ValuePath::new();
    path.push_key("$");
    path.push_key("ids");
    let err = TypeAnnotation::parse("[Int!]")
        .unwrap()
        .check_value(&json!([1, 2, null]), &mut path)
        .unwrap_err();
    assert_eq!(err.path.to_string(), "$ids[2]");
    assert_eq!(err.expected, "Int!");
    assert_eq!(err.found, "null");
}

#[test]
fn builtin_scalars_check_json_kind() {
    assert!(check("Boolean", json!(true)).is_ok());
    assert!(check("Boolean", json!("true")).is_err());
    assert!(check("Float", json!(1)).is_ok());
    assert!(check("Float", json!(1.5)).is_ok());
    assert!(check("ID", json!("UHJvamVjdDox")).is_ok());
    assert!(check("ID", json!(42)).is_ok());
    assert!(check("ID", json!(4.2)).is_err());
    assert!(check("Int", json!(2.5)).is_err());
    assert!(check("Int", json!(i64::from(i32::MAX) + 1)).is_err());
    assert!(check("String", json!(7)).is_err());
}

#[test]
fn opaque_named_types_accept_any_non_list_value() {
    assert!(check("TimeRange", json!({"start": "2024-01-01", "end": null})).is_ok());
    assert!(check("SortDir", json!("desc")).is_ok());
    assert!(check("TimeRange", json!([{"start": "2024-01-01"}])).is_err());
}

proptest! {
    #[test]
    fn every_i32_is_an_int(n in any::<i32>()) {
        prop_assert!(check("Int!", json!(n)).is_ok());
    }

    #[test]
    fn integers_beyond_i32_are_not_ints(n in (i64::from(i32::MAX) + 1)..i64::MAX) {
        prop_assert!(check("Int", json!(n)).is_err());
    }
}
