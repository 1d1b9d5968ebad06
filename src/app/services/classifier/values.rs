//! Text views of typed values
//!
//! Identity and coded fields arrive as `Str`, `StrList` or (for nested
//! repetitions) `Raw`; these helpers read them by top-level element.

use crate::app::models::{FieldValue, SeparatorSet};
use crate::app::services::type_schema::TypedField;

/// Top-level elements of a list-shaped value as text, `None` for scalars
pub fn list_elements(value: &TypedField, separators: &SeparatorSet) -> Option<Vec<String>> {
    match value {
        TypedField::StrList(items) => Some(items.clone()),
        TypedField::Raw(FieldValue::List(items)) => Some(
            items
                .iter()
                .map(|item| item.flatten_text(separators))
                .collect(),
        ),
        _ => None,
    }
}

/// Whole value as one string
///
/// Lists are joined with the component separator and numbers are printed;
/// sentinels render as the empty string.
pub fn value_text(value: &TypedField, separators: &SeparatorSet) -> String {
    if value.is_missing() {
        return String::new();
    }
    let join = separators.component.to_string();
    match value {
        TypedField::Str(s) => s.clone(),
        TypedField::Int(v) => v.to_string(),
        TypedField::Float(v) => v.to_string(),
        TypedField::Timestamp(t) => t.map(|t| t.to_rfc3339()).unwrap_or_default(),
        TypedField::StrList(items) => items.join(&join),
        TypedField::IntList(items) => items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(&join),
        TypedField::FloatList(items) => items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(&join),
        TypedField::Raw(raw) => raw.flatten_text(separators),
    }
}

/// Scalar numeric reading of a value, `None` for lists, text and sentinels
pub fn numeric_value(value: &TypedField) -> Option<f64> {
    match value {
        TypedField::Int(v) if !value.is_missing() => Some(*v as f64),
        TypedField::Float(v) if !v.is_nan() => Some(*v),
        _ => None,
    }
}
