//! Semantic types and typed field values
//!
//! Each semantic type has exactly one missing-value sentinel. Sentinels are
//! distinguishable from every legitimately parsed value of the same type
//! (see [`TypedField::is_missing`]).

use crate::app::models::FieldValue;
use crate::constants::{MISSING_FLOAT, MISSING_INT, MISSING_STR};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Target type of a field position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Int,
    Float,
    /// Int or float, decided by the presence of a decimal point
    Numeric,
    DateTime,
    Str,
    /// Keeps whatever shape the raw field had
    StrOrList,
    ListOfStr,
    ListOfInt,
    ListOfFloat,
    /// List of ints, or of floats when any element has a decimal point
    ListOfNumeric,
    /// Pass-through
    Any,
}

impl SemanticType {
    /// Missing-value sentinel for this type
    pub fn sentinel(self) -> TypedField {
        match self {
            SemanticType::Int => TypedField::Int(MISSING_INT),
            SemanticType::Float | SemanticType::Numeric => TypedField::Float(MISSING_FLOAT),
            SemanticType::DateTime => TypedField::Timestamp(None),
            SemanticType::Str | SemanticType::StrOrList => {
                TypedField::Str(MISSING_STR.to_string())
            }
            SemanticType::ListOfStr => TypedField::StrList(Vec::new()),
            SemanticType::ListOfInt => TypedField::IntList(Vec::new()),
            SemanticType::ListOfFloat | SemanticType::ListOfNumeric => {
                TypedField::FloatList(Vec::new())
            }
            SemanticType::Any => TypedField::Raw(FieldValue::default()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SemanticType::Int => "int",
            SemanticType::Float => "float",
            SemanticType::Numeric => "numeric",
            SemanticType::DateTime => "datetime",
            SemanticType::Str => "str",
            SemanticType::StrOrList => "str_or_list",
            SemanticType::ListOfStr => "list_of_str",
            SemanticType::ListOfInt => "list_of_int",
            SemanticType::ListOfFloat => "list_of_float",
            SemanticType::ListOfNumeric => "list_of_numeric",
            SemanticType::Any => "any",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coerced value of a field
///
/// `Timestamp(None)` is the not-a-time sentinel. Serializes untagged, so
/// float sentinels and missing timestamps appear as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedField {
    Int(i64),
    Float(f64),
    Timestamp(Option<DateTime<Utc>>),
    Str(String),
    StrList(Vec<String>),
    IntList(Vec<i64>),
    FloatList(Vec<f64>),
    /// Unconverted value (pass-through types and nested string-or-list fields)
    Raw(FieldValue),
}

impl TypedField {
    /// Whether this is the sentinel of its type
    pub fn is_missing(&self) -> bool {
        match self {
            TypedField::Int(v) => *v == MISSING_INT,
            TypedField::Float(v) => v.is_nan(),
            TypedField::Timestamp(t) => t.is_none(),
            TypedField::Str(s) => s.is_empty(),
            TypedField::StrList(v) => v.is_empty(),
            TypedField::IntList(v) => v.is_empty(),
            TypedField::FloatList(v) => v.is_empty(),
            TypedField::Raw(raw) => raw.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedField::Str(s) => Some(s),
            _ => None,
        }
    }

    /// String content of a `Str`, or the missing string for any other variant
    pub fn to_text(&self) -> String {
        self.as_str().unwrap_or(MISSING_STR).to_string()
    }

    pub fn as_str_list(&self) -> Option<&[String]> {
        match self {
            TypedField::StrList(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            TypedField::Timestamp(t) => *t,
            _ => None,
        }
    }

    /// Number of elements carried by a list value (1 for a non-missing scalar)
    pub fn element_count(&self) -> usize {
        match self {
            TypedField::StrList(v) => v.len(),
            TypedField::IntList(v) => v.len(),
            TypedField::FloatList(v) => v.len(),
            TypedField::Raw(raw) if raw.is_empty() => 0,
            TypedField::Raw(raw) => raw.arity(),
            other if other.is_missing() => 0,
            _ => 1,
        }
    }
}

impl fmt::Display for TypedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedField::Int(v) => write!(f, "{}", v),
            TypedField::Float(v) => write!(f, "{}", v),
            TypedField::Timestamp(Some(t)) => write!(f, "{}", t.to_rfc3339()),
            TypedField::Timestamp(None) => f.write_str("NaT"),
            TypedField::Str(s) => f.write_str(s),
            TypedField::StrList(v) => write!(f, "{:?}", v),
            TypedField::IntList(v) => write!(f, "{:?}", v),
            TypedField::FloatList(v) => write!(f, "{:?}", v),
            TypedField::Raw(raw) => write!(f, "{:?}", raw),
        }
    }
}
