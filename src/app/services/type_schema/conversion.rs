//! Coercion of raw field values to semantic types
//!
//! The raw shape decides how a type is applied: a scalar is wrapped or parsed,
//! a flat list is joined, passed through or parsed element-wise, and deeper
//! nesting is only accepted by the pass-through types.

use super::datatypes::{SemanticType, TypedField};
use super::timestamp::parse_timestamp;
use crate::app::models::{FieldValue, SeparatorSet};
use crate::{Error, Result};

/// Convert a raw field value to the given semantic type
///
/// The empty scalar always maps to the type's sentinel.
pub fn convert(value: &FieldValue, ty: SemanticType, separators: &SeparatorSet) -> Result<TypedField> {
    if ty == SemanticType::Any {
        return Ok(TypedField::Raw(value.clone()));
    }
    if value.is_empty() {
        return Ok(ty.sentinel());
    }

    match value {
        FieldValue::Scalar(text) => convert_scalar(text, ty),
        FieldValue::List(_) => match value.as_string_list() {
            Some(items) => convert_string_list(&items, ty, separators),
            None => convert_nested(value, ty, separators),
        },
    }
}

fn convert_scalar(text: &str, ty: SemanticType) -> Result<TypedField> {
    let converted = match ty {
        SemanticType::Str | SemanticType::StrOrList => TypedField::Str(text.to_string()),
        SemanticType::Int => TypedField::Int(parse_int(text)?),
        SemanticType::Float => TypedField::Float(parse_float(text)?),
        SemanticType::Numeric => {
            if text.contains('.') {
                TypedField::Float(parse_float(text)?)
            } else {
                TypedField::Int(parse_int(text)?)
            }
        }
        SemanticType::DateTime => TypedField::Timestamp(Some(parse_timestamp(text)?)),
        SemanticType::ListOfStr => TypedField::StrList(vec![text.to_string()]),
        SemanticType::ListOfInt => TypedField::IntList(vec![parse_int(text)?]),
        SemanticType::ListOfFloat => TypedField::FloatList(vec![parse_float(text)?]),
        SemanticType::ListOfNumeric => parse_numeric_list(&[text])?,
        SemanticType::Any => TypedField::Raw(FieldValue::Scalar(text.to_string())),
    };
    Ok(converted)
}

fn convert_string_list(
    items: &[&str],
    ty: SemanticType,
    separators: &SeparatorSet,
) -> Result<TypedField> {
    match ty {
        SemanticType::Str => Ok(TypedField::Str(
            items.join(&separators.component.to_string()),
        )),
        SemanticType::StrOrList | SemanticType::ListOfStr => Ok(TypedField::StrList(
            items.iter().map(|s| s.to_string()).collect(),
        )),
        SemanticType::ListOfNumeric => parse_numeric_list(items),
        SemanticType::ListOfInt => items
            .iter()
            .map(|s| parse_int(s))
            .collect::<Result<Vec<_>>>()
            .map(TypedField::IntList),
        SemanticType::ListOfFloat => items
            .iter()
            .map(|s| parse_float(s))
            .collect::<Result<Vec<_>>>()
            .map(TypedField::FloatList),
        SemanticType::Int
        | SemanticType::Float
        | SemanticType::Numeric
        | SemanticType::DateTime => Err(Error::unsupported_conversion(
            items.join(&separators.component.to_string()),
            ty.name(),
            "target is not a list type",
        )),
        SemanticType::Any => Ok(TypedField::Raw(FieldValue::list_of(items))),
    }
}

fn convert_nested(value: &FieldValue, ty: SemanticType, separators: &SeparatorSet) -> Result<TypedField> {
    match ty {
        SemanticType::StrOrList => Ok(TypedField::Raw(value.clone())),
        _ => Err(Error::unsupported_conversion(
            value.flatten_text(separators),
            ty.name(),
            "nested lists are only kept by str_or_list",
        )),
    }
}

/// Parse a list as ints, or as floats when any element has a decimal point
fn parse_numeric_list(items: &[&str]) -> Result<TypedField> {
    if items.iter().any(|s| s.contains('.')) {
        items
            .iter()
            .map(|s| parse_float(s))
            .collect::<Result<Vec<_>>>()
            .map(TypedField::FloatList)
    } else {
        items
            .iter()
            .map(|s| parse_int(s))
            .collect::<Result<Vec<_>>>()
            .map(TypedField::IntList)
    }
}

fn parse_int(text: &str) -> Result<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|e| Error::unsupported_conversion(text, "int", e.to_string()))
}

fn parse_float(text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|e| Error::unsupported_conversion(text, "float", e.to_string()))
}
