//! Source-system location encodings
//!
//! The shape of the raw location field identifies its encoding:
//!
//! | shape            | encoding                                             |
//! |------------------|------------------------------------------------------|
//! | 11 components    | department record (`dept^room^bed^facility^...^DEPID`) |
//! | 9 components     | monitor gateway (`dept^room^bed^facility^^^^^MON`)   |
//! | 4 or 5 components| facility record (`unit^room^bed^facility`)           |
//! | 2 components     | unit/bed pair (`G5ICU^G505`, `EUHM^4107-06`)         |
//! | 1 component / scalar | composite string (`EUH-4TN-T434`)                |

use super::tables::LocationTables;
use super::wildcard::canonicalize_bed;
use crate::app::models::FieldValue;
use crate::constants::MISSING_STR;
use crate::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Two-digit ICU room suffix, e.g. `4107-06`
static ICU_ROOM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(410\d)-(\d\d)$").unwrap());

const DEPARTMENT_RECORD_AUTHORITY: &str = "DEPID";
const DEPARTMENT_ID_PREFIX: &str = "100";
const FACILITY_NAME_SUFFIX: &str = "Hospital";
const PICU_BED_PREFIX: &str = "PICU L";
const TEST_LOCATION: &str = "WH-TEST";
const CART_TOKEN: &str = "CART";

/// Hospital, unit and bed as read from one encoding, before table lookup
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawLocation {
    pub hospital: String,
    pub unit: String,
    pub bed: String,
}

impl RawLocation {
    fn new(hospital: impl Into<String>, unit: impl Into<String>, bed: impl Into<String>) -> Self {
        Self {
            hospital: hospital.into(),
            unit: unit.into(),
            bed: bed.into(),
        }
    }
}

/// Read the raw triple from a location field
///
/// `location_text` is the field's text, used in error messages.
pub fn extract(
    value: &FieldValue,
    tables: &LocationTables,
    location_text: &str,
) -> Result<RawLocation> {
    let unrecognized = || Error::unrecognized_location_format(location_text);

    match value {
        FieldValue::Scalar(text) if text.is_empty() => Err(unrecognized()),
        FieldValue::Scalar(text) => from_composite(text).ok_or_else(unrecognized),
        FieldValue::List(_) => {
            let parts = value.as_string_list().ok_or_else(unrecognized)?;
            match parts.len() {
                11 => from_department_record(&parts).ok_or_else(unrecognized),
                9 => from_gateway(&parts).ok_or_else(unrecognized),
                4 | 5 => Ok(from_facility_record(&parts)),
                2 => Ok(from_unit_bed_pair(&parts, tables)),
                1 if parts[0].is_empty() => Err(unrecognized()),
                1 => from_composite(parts[0]).ok_or_else(unrecognized),
                _ => Err(unrecognized()),
            }
        }
    }
}

/// Department record: facility at 4, department name at 9, bed at 3
fn from_department_record(parts: &[&str]) -> Option<RawLocation> {
    if parts[10] != DEPARTMENT_RECORD_AUTHORITY {
        return None;
    }
    Some(RawLocation::new(parts[3], parts[8], parts[2]))
}

/// Monitor gateway: either a department-id record or a composite string in the first component
fn from_gateway(parts: &[&str]) -> Option<RawLocation> {
    if parts[0].starts_with(DEPARTMENT_ID_PREFIX) {
        Some(from_facility_record(parts))
    } else if parts[0].contains(CART_TOKEN) || parts[0].contains("4TN") {
        from_composite(parts[0])
    } else {
        None
    }
}

fn from_facility_record(parts: &[&str]) -> RawLocation {
    if parts[3].ends_with(FACILITY_NAME_SUFFIX) {
        let hospital = parts[3];
        let unit = parts[0];
        let mut bed = parts[2].to_string();
        // PACU bays are numbered per hospital
        if unit == "PACU" {
            match hospital {
                "Emory Johns Creek Hospital" => bed = format!("JC{}", bed),
                "Emory St Joseph's Hospital" => bed = format!("SJ{}", bed),
                _ => {}
            }
        }
        RawLocation::new(hospital, unit, bed)
    } else if parts[0].starts_with(DEPARTMENT_ID_PREFIX) {
        RawLocation::new(parts[3], parts[0], parts[2])
    } else {
        RawLocation::new(MISSING_STR, parts[0], parts[1])
    }
}

fn from_unit_bed_pair(parts: &[&str], tables: &LocationTables) -> RawLocation {
    let (first, bed) = (parts[0], parts[1]);

    if !tables.is_canonical_hospital(first) {
        let (unit, bed) = match first {
            "NLIC" => ("NLICU".to_string(), format!("NL{}", bed)),
            "POHA" => ("EHPOHA".to_string(), format!("EHPOHA{}", bed)),
            "NLPACU" => (first.to_string(), format!("NLPACU{}", bed)),
            _ => (first.to_string(), bed.to_string()),
        };
        return RawLocation::new(MISSING_STR, unit, canonicalize_bed(&bed));
    }

    if let Some(room) = bed.strip_prefix(PICU_BED_PREFIX) {
        let bed = if room.chars().count() == 2 {
            format!("MHPICUL1{}", room)
        } else {
            format!("MHPICUL{}", room)
        };
        return RawLocation::new(first, "PICU", bed);
    }

    if bed.starts_with("4107") || bed.starts_with("4108") {
        let bed = match ICU_ROOM_RE.captures(bed) {
            Some(caps) => match caps[2].parse::<u32>() {
                Ok(room) => format!("{}-{}", &caps[1], room * 100),
                Err(_) => bed.to_string(),
            },
            None => bed.to_string(),
        };
        return RawLocation::new(first, "41ICU", bed);
    }

    let unit = match tables.unit_for_bed(bed) {
        Some(unit) => unit.to_string(),
        None if bed.contains('-') => bed.split('-').next().unwrap_or_default().to_string(),
        None => bed.split(' ').next().unwrap_or_default().to_string(),
    };
    RawLocation::new(first, unit, bed)
}

/// Composite string such as `EUH-4TN-T434` or `ESJH-ANES-CART-AD`
fn from_composite(text: &str) -> Option<RawLocation> {
    if text == TEST_LOCATION {
        return Some(RawLocation::new(MISSING_STR, text, text));
    }

    let tokens: Vec<&str> = text.split('-').collect();
    if tokens.len() == 3 {
        Some(RawLocation::new(
            tokens[0],
            tokens[1],
            canonicalize_bed(tokens[2]),
        ))
    } else if tokens.len() > 3 && tokens[2] == CART_TOKEN {
        Some(RawLocation::new(tokens[0], tokens[..3].join("-"), text))
    } else {
        None
    }
}
