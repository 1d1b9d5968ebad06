//! Attribute fields of one observation segment

use super::values::{list_elements, value_text};
use crate::app::models::{Attribute, Segment};
use crate::constants::NO_SCHEME;
use crate::{Error, Result};

const OBX_VALUE_TYPE: usize = 2;
const OBX_IDENTIFIER: usize = 3;
const OBX_SUB_ID: usize = 4;
const OBX_VALUE: usize = 5;
const OBX_UNITS: usize = 6;
const OBX_REFERENCE_RANGE: usize = 7;
const OBX_OBSERVED_AT: usize = 14;
const OBX_SOURCE: usize = 21;

/// Observation name and "scheme:code" from the coded identifier (OBX.3)
///
/// | parts | name            | code            |
/// |-------|-----------------|-----------------|
/// | 1     | part 0          | `NO_SCHEME:`0   |
/// | 2     | part 1          | `NO_SCHEME:`0   |
/// | 3     | part 1, or code | part 2 `:` 0    |
pub fn name_and_code(observation: &Segment) -> Result<(String, String)> {
    let separators = &observation.separators;
    let identifier = observation.typed(OBX_IDENTIFIER)?;

    let parts = match list_elements(&identifier, separators) {
        Some(parts) => parts,
        None => vec![identifier.to_text()],
    };

    match parts.as_slice() {
        [only] => Ok((only.clone(), format!("{}:{}", NO_SCHEME, only))),
        [code, name] => Ok((name.clone(), format!("{}:{}", NO_SCHEME, code))),
        [code, name, scheme] => {
            let code = format!("{}:{}", scheme, code);
            let name = if name.is_empty() { code.clone() } else { name.clone() };
            Ok((name, code))
        }
        _ => Err(Error::unsupported_conversion(
            value_text(&identifier, separators),
            "observation identifier",
            format!("expected 1 to 3 components, found {}", parts.len()),
        )),
    }
}

/// Sub-id and source joined with ':'
pub fn channel_id(observation: &Segment) -> Result<String> {
    Ok(format!(
        "{}:{}",
        observation.typed_text(OBX_SUB_ID)?,
        observation.typed_text(OBX_SOURCE)?
    ))
}

/// Unit of measure from OBX.6: the only part, or the name of a coded triple
pub fn unit(observation: &Segment) -> Result<String> {
    let units = observation.typed(OBX_UNITS)?;
    let parts = units.as_str_list().unwrap_or_default();
    match parts {
        [] => Ok(String::new()),
        [unit] => Ok(unit.clone()),
        [_, name, _] => Ok(name.clone()),
        _ => Err(Error::unsupported_conversion(
            parts.join(&observation.separators.component.to_string()),
            "unit of measure",
            format!("expected 1 or 3 components, found {}", parts.len()),
        )),
    }
}

/// Build the attribute contributed by one observation
pub fn build_attribute(observation: &Segment) -> Result<Attribute> {
    let (name, code) = name_and_code(observation)?;
    Ok(Attribute {
        value_type: observation.typed_text(OBX_VALUE_TYPE)?,
        name,
        code,
        channel_id: channel_id(observation)?,
        observed_at: observation.typed(OBX_OBSERVED_AT)?.as_timestamp(),
        unit: unit(observation)?,
        value: observation.typed(OBX_VALUE)?,
        reference_range: observation.typed_text(OBX_REFERENCE_RANGE)?,
    })
}
