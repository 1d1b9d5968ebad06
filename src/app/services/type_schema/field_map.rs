//! Field position and value-type tables
//!
//! Positions are indices into [`Segment::fields`], where index 0 is the
//! segment label. Header positions are shifted by one against their HL7
//! field numbers because the field separator is not a list element.

use super::conversion::convert;
use super::datatypes::{SemanticType, TypedField};
use crate::app::models::Segment;
use crate::constants::{segments, value_types};
use crate::{Error, Result};

/// Semantic type of a known (segment label, position) pair
pub fn field_type(segment: &str, position: usize) -> Option<SemanticType> {
    use SemanticType::*;

    let ty = match (segment, position) {
        (segments::MSH, 2) => Str,        // MSH.3 sending application
        (segments::MSH, 6) => DateTime,   // MSH.7 message time
        (segments::MSH, 8) => StrOrList,  // MSH.9 message type
        (segments::MSH, 9) => Str,        // MSH.10 control id
        (segments::MSH, 10) => Str,       // MSH.11 processing id
        (segments::MSH, 20) => StrOrList, // MSH.21 message profile

        (segments::PID, 3) => StrOrList,  // identifier list
        (segments::PID, 5) => StrOrList,  // patient name
        (segments::PID, 18) => StrOrList, // account / visit number

        (segments::PV1, 2) => Str,       // patient class
        (segments::PV1, 3) => StrOrList, // assigned location
        (segments::PV1, 19) => Str,      // visit number

        (segments::OBR, 3) => ListOfStr,  // filler order number
        (segments::OBR, 4) => StrOrList,  // universal service identifier
        (segments::OBR, 7) => DateTime,   // observation start
        (segments::OBR, 8) => DateTime,   // observation end
        (segments::OBR, 10) => StrOrList, // collector identifier
        (segments::OBR, 13) => Str,       // environment
        (segments::OBR, 21) => Str,       // sending device

        (segments::OBX, 2) => Str,        // value type
        (segments::OBX, 3) => StrOrList,  // observation identifier
        (segments::OBX, 4) => Str,        // sub-id
        (segments::OBX, 5) => Any,        // value, coerced at tokenization
        (segments::OBX, 6) => ListOfStr,  // units
        (segments::OBX, 7) => Str,        // reference range
        (segments::OBX, 14) => DateTime,  // observation time
        (segments::OBX, 21) => Str,       // observation source

        _ => return None,
    };
    Some(ty)
}

/// Semantic type for an observation value-type code (OBX.2)
///
/// Unrecognized codes are read as strings.
pub fn observation_value_type(code: &str) -> SemanticType {
    match code {
        value_types::STRING => SemanticType::Str,
        value_types::NUMERIC => SemanticType::Numeric,
        value_types::NUMERIC_ARRAY | value_types::NUMERIC_RANGE => SemanticType::ListOfNumeric,
        value_types::CODED => SemanticType::StrOrList,
        _ => SemanticType::Str,
    }
}

impl Segment {
    /// Typed value at a registered position
    ///
    /// Positions past the end of the segment yield the type's sentinel. The
    /// observation value (OBX position 5) returns the value coerced during
    /// tokenization.
    pub fn typed(&self, position: usize) -> Result<TypedField> {
        let ty = field_type(self.label(), position).ok_or_else(|| {
            Error::configuration(format!(
                "No field type registered for {} position {}",
                self.label(),
                position
            ))
        })?;

        if ty == SemanticType::Any {
            if let Some(value) = &self.observation_value {
                return Ok(value.clone());
            }
        }

        match self.field(position) {
            Some(value) => convert(value, ty, &self.separators),
            None => Ok(ty.sentinel()),
        }
    }

    /// Typed value rendered as a string (`Str` content or the missing string)
    pub fn typed_text(&self, position: usize) -> Result<String> {
        Ok(self.typed(position)?.to_text())
    }
}
