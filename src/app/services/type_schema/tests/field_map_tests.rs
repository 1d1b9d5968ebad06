//! Tests for the position and value-type tables

use super::*;
use crate::app::services::type_schema::{
    SemanticType, TypedField, field_type, observation_value_type,
};

#[test]
fn test_registered_positions() {
    assert_eq!(field_type("MSH", 6), Some(SemanticType::DateTime));
    assert_eq!(field_type("MSH", 20), Some(SemanticType::StrOrList));
    assert_eq!(field_type("PID", 18), Some(SemanticType::StrOrList));
    assert_eq!(field_type("OBR", 3), Some(SemanticType::ListOfStr));
    assert_eq!(field_type("OBX", 5), Some(SemanticType::Any));
    assert_eq!(field_type("OBX", 6), Some(SemanticType::ListOfStr));
    assert_eq!(field_type("PID", 99), None);
    assert_eq!(field_type("ZZZ", 1), None);
}

#[test]
fn test_observation_value_types() {
    assert_eq!(observation_value_type("ST"), SemanticType::Str);
    assert_eq!(observation_value_type("NM"), SemanticType::Numeric);
    assert_eq!(observation_value_type("NA"), SemanticType::ListOfNumeric);
    assert_eq!(observation_value_type("NR"), SemanticType::ListOfNumeric);
    assert_eq!(observation_value_type("CWE"), SemanticType::StrOrList);
    assert_eq!(observation_value_type("TX"), SemanticType::Str);
}

#[test]
fn test_position_past_end_yields_sentinel() {
    let pv1 = scalar_segment("PV1", &["", "I"]);
    assert_eq!(pv1.typed(2).unwrap(), TypedField::Str("I".to_string()));
    assert_eq!(pv1.typed(19).unwrap(), TypedField::Str(String::new()));

    let obr = scalar_segment("OBR", &["1"]);
    assert_eq!(obr.typed(7).unwrap(), TypedField::Timestamp(None));
    assert_eq!(obr.typed(3).unwrap(), TypedField::StrList(Vec::new()));
}

#[test]
fn test_unregistered_position_is_an_error() {
    let pid = scalar_segment("PID", &["1"]);
    let err = pid.typed(7).unwrap_err();
    assert_eq!(err.kind(), "configuration");
}

#[test]
fn test_observation_value_comes_from_tokenizer_coercion() {
    let mut obx = scalar_segment("OBX", &["1", "NM", "HR", "1", "72"]);
    obx.observation_value = Some(TypedField::Int(72));
    assert_eq!(obx.typed(5).unwrap(), TypedField::Int(72));

    obx.observation_value = None;
    assert_eq!(
        obx.typed(5).unwrap(),
        TypedField::Raw(FieldValue::from("72"))
    );
}

#[test]
fn test_header_time_is_parsed() {
    let msh = scalar_segment(
        "MSH",
        &["^~\\&", "MONITOR", "", "", "", "20240315120000-0400"],
    );
    assert_eq!(
        msh.typed(6).unwrap(),
        TypedField::Timestamp(Some(utc(2024, 3, 15, 16, 0, 0)))
    );
}
