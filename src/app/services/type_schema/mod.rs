//! Semantic type schema for HL7 field positions
//!
//! Raw fields come out of the tokenizer as strings or nested lists of
//! strings. This module coerces them to typed values on demand, keyed by
//! (segment kind, field position), and supplies the missing-value sentinel
//! for each type.
//!
//! ## Architecture
//!
//! - [`datatypes`] - Semantic types, typed values and their sentinels
//! - [`conversion`] - Shape-aware coercion of raw field values
//! - [`timestamp`] - Device-clock offset repair and timestamp parsing
//! - [`field_map`] - Field position and observation value-type tables
//!
//! ## Usage
//!
//! ```rust
//! use hl7_processor::app::models::{FieldValue, SeparatorSet};
//! use hl7_processor::app::services::type_schema::{convert, SemanticType, TypedField};
//!
//! let value = FieldValue::list_of(&["1.5", "2", "3"]);
//! let typed = convert(&value, SemanticType::ListOfNumeric, &SeparatorSet::default()).unwrap();
//! assert_eq!(typed, TypedField::FloatList(vec![1.5, 2.0, 3.0]));
//! ```

pub mod conversion;
pub mod datatypes;
pub mod field_map;
pub mod timestamp;

#[cfg(test)]
pub mod tests;

pub use conversion::convert;
pub use datatypes::{SemanticType, TypedField};
pub use field_map::{field_type, observation_value_type};
pub use timestamp::{fix_time, parse_timestamp};
