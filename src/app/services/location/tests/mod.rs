//! Test fixtures for location canonicalization

use crate::app::models::{CanonicalLocation, FieldValue, SeparatorSet};
use crate::app::services::location::LocationTables;


/// Tables compiled into the crate
pub fn tables() -> LocationTables {
    LocationTables::embedded().unwrap()
}

/// Canonicalize a field written in HL7 text form (`^`-separated components)
pub fn canonicalize(text: &str) -> crate::Result<CanonicalLocation> {
    let value = if text.contains('^') {
        FieldValue::list_of(&text.split('^').collect::<Vec<_>>())
    } else {
        FieldValue::from(text)
    };
    tables().canonicalize(&value, &SeparatorSet::default())
}

pub fn location(hospital: &str, unit: &str, bed: &str) -> CanonicalLocation {
    CanonicalLocation::new(hospital, unit, bed)
}

/// Minimal table file for loader tests
pub const SMALL_TABLES_JSON: &str = r#"{
    "bed_wildcard_to_unit": {"A1??": "UNIT_A"},
    "unit_to_canonical": {"UNIT_A": ["HOSP", "A"], "B": ["OTHER", "B"]},
    "hospital_to_canonical": {"Hospital of Somewhere": "HOSP"}
}"#;
