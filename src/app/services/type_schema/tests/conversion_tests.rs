//! Tests for raw value coercion

use super::*;
use crate::app::services::type_schema::{SemanticType, TypedField, convert};

const ALL_TYPES: [SemanticType; 11] = [
    SemanticType::Int,
    SemanticType::Float,
    SemanticType::Numeric,
    SemanticType::DateTime,
    SemanticType::Str,
    SemanticType::StrOrList,
    SemanticType::ListOfStr,
    SemanticType::ListOfInt,
    SemanticType::ListOfFloat,
    SemanticType::ListOfNumeric,
    SemanticType::Any,
];

fn seps() -> SeparatorSet {
    SeparatorSet::default()
}

#[test]
fn test_empty_scalar_yields_sentinel_for_every_type() {
    for ty in ALL_TYPES {
        let converted = convert(&FieldValue::default(), ty, &seps()).unwrap();
        assert!(converted.is_missing(), "{} sentinel expected", ty);
    }
}

#[test]
fn test_parsed_values_are_not_sentinels() {
    let cases = [
        ("0", SemanticType::Int),
        ("0.0", SemanticType::Float),
        ("7", SemanticType::Numeric),
        ("20240115120000", SemanticType::DateTime),
        ("x", SemanticType::Str),
        ("x", SemanticType::ListOfStr),
        ("3", SemanticType::ListOfNumeric),
    ];
    for (text, ty) in cases {
        let converted = convert(&FieldValue::from(text), ty, &seps()).unwrap();
        assert!(!converted.is_missing(), "{} parsed as {} looked missing", text, ty);
    }
}

#[test]
fn test_numeric_scalar_picks_int_or_float() {
    assert_eq!(
        convert(&FieldValue::from("72"), SemanticType::Numeric, &seps()).unwrap(),
        TypedField::Int(72)
    );
    assert_eq!(
        convert(&FieldValue::from("36.6"), SemanticType::Numeric, &seps()).unwrap(),
        TypedField::Float(36.6)
    );
}

#[test]
fn test_scalar_wrapped_for_list_types() {
    assert_eq!(
        convert(&FieldValue::from("mmHg"), SemanticType::ListOfStr, &seps()).unwrap(),
        TypedField::StrList(vec!["mmHg".to_string()])
    );
    assert_eq!(
        convert(&FieldValue::from("5"), SemanticType::ListOfNumeric, &seps()).unwrap(),
        TypedField::IntList(vec![5])
    );
    assert_eq!(
        convert(&FieldValue::from("5.5"), SemanticType::ListOfFloat, &seps()).unwrap(),
        TypedField::FloatList(vec![5.5])
    );
}

#[test]
fn test_numeric_list_promotes_to_float_when_any_element_has_a_point() {
    let ints = FieldValue::list_of(&["1", "-2", "3"]);
    assert_eq!(
        convert(&ints, SemanticType::ListOfNumeric, &seps()).unwrap(),
        TypedField::IntList(vec![1, -2, 3])
    );

    let mixed = FieldValue::list_of(&["1", "2.5", "3"]);
    assert_eq!(
        convert(&mixed, SemanticType::ListOfNumeric, &seps()).unwrap(),
        TypedField::FloatList(vec![1.0, 2.5, 3.0])
    );
}

#[test]
fn test_numeric_list_with_empty_element_is_rejected() {
    let holes = FieldValue::list_of(&["1", "", "3"]);
    let err = convert(&holes, SemanticType::ListOfNumeric, &seps()).unwrap_err();
    assert_eq!(err.kind(), "unsupported_conversion");
}

#[test]
fn test_list_joined_for_str_with_message_separator() {
    let value = FieldValue::list_of(&["69121", "MDC_OBS_WAVE_CTS", "MDC"]);
    assert_eq!(
        convert(&value, SemanticType::Str, &seps()).unwrap(),
        TypedField::Str("69121^MDC_OBS_WAVE_CTS^MDC".to_string())
    );

    let custom = SeparatorSet {
        component: '#',
        ..SeparatorSet::default()
    };
    assert_eq!(
        convert(&value, SemanticType::Str, &custom).unwrap(),
        TypedField::Str("69121#MDC_OBS_WAVE_CTS#MDC".to_string())
    );
}

#[test]
fn test_list_kept_for_string_list_types() {
    let value = FieldValue::list_of(&["SMITH", "JOHN"]);
    let expected = TypedField::StrList(vec!["SMITH".to_string(), "JOHN".to_string()]);
    assert_eq!(
        convert(&value, SemanticType::StrOrList, &seps()).unwrap(),
        expected
    );
    assert_eq!(
        convert(&value, SemanticType::ListOfStr, &seps()).unwrap(),
        expected
    );
}

#[test]
fn test_list_to_scalar_numeric_or_time_is_rejected() {
    let value = FieldValue::list_of(&["1", "2"]);
    for ty in [
        SemanticType::Int,
        SemanticType::Float,
        SemanticType::Numeric,
        SemanticType::DateTime,
    ] {
        let err = convert(&value, ty, &seps()).unwrap_err();
        assert_eq!(err.kind(), "unsupported_conversion");
    }
}

#[test]
fn test_nested_list_only_passes_through_str_or_list() {
    let nested = FieldValue::List(vec![
        FieldValue::list_of(&["a", "b"]),
        FieldValue::list_of(&["c", "d"]),
    ]);

    assert_eq!(
        convert(&nested, SemanticType::StrOrList, &seps()).unwrap(),
        TypedField::Raw(nested.clone())
    );
    assert!(convert(&nested, SemanticType::Str, &seps()).is_err());
    assert!(convert(&nested, SemanticType::ListOfStr, &seps()).is_err());
}

#[test]
fn test_any_passes_value_through_unchanged() {
    let value = FieldValue::list_of(&["1", "2"]);
    assert_eq!(
        convert(&value, SemanticType::Any, &seps()).unwrap(),
        TypedField::Raw(value.clone())
    );
}

#[test]
fn test_unparseable_numbers_are_rejected() {
    assert!(convert(&FieldValue::from("abc"), SemanticType::Int, &seps()).is_err());
    assert!(convert(&FieldValue::from("1.2.3"), SemanticType::Numeric, &seps()).is_err());
    assert!(convert(&FieldValue::from("x"), SemanticType::ListOfFloat, &seps()).is_err());
}
