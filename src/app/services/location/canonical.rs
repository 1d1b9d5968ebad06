//! Resolution of raw locations through the lookup tables

use super::encodings::{RawLocation, extract};
use super::tables::LocationTables;
use crate::Result;
use crate::app::models::{CanonicalLocation, FieldValue, SeparatorSet};
use crate::constants::MISSING_STR;
use tracing::{debug, warn};

/// Unit prefix used by admission-system virtual units
const VIRTUAL_UNIT_PREFIX: &str = "V ";

impl LocationTables {
    /// Canonicalize a raw location field
    ///
    /// Fails with `UnrecognizedLocationFormat` when the field's shape matches
    /// no known encoding. Once the shape is recognized, parts that cannot be
    /// resolved are returned as the missing string.
    pub fn canonicalize(
        &self,
        value: &FieldValue,
        separators: &SeparatorSet,
    ) -> Result<CanonicalLocation> {
        let location_text = value.flatten_text(separators);
        let raw = extract(value, self, &location_text)?;
        Ok(self.resolve(&raw, &location_text))
    }

    /// Map a raw triple to canonical hospital and unit; the bed is kept as is
    pub fn resolve(&self, raw: &RawLocation, location_text: &str) -> CanonicalLocation {
        // Admission-system units are already canonical
        let first_word = raw.unit.split(' ').next().unwrap_or_default();
        let admission_unit =
            self.is_canonical_hospital(first_word) || raw.unit.starts_with(VIRTUAL_UNIT_PREFIX);

        let lookup_unit = if raw.unit.is_empty() {
            let unit = self.unit_for_bed(&raw.bed).unwrap_or(MISSING_STR);
            if unit.is_empty() {
                warn!(
                    "Hospital and unit missing in '{}', bed '{}' has no unit mapping",
                    location_text, raw.bed
                );
            } else {
                debug!("Unit for '{}' looked up from bed '{}'", location_text, raw.bed);
            }
            unit.to_string()
        } else {
            raw.unit.clone()
        };

        let (hospital, unit) = if admission_unit {
            let hospital = self.canonical_hospital(&raw.hospital).unwrap_or(MISSING_STR);
            (hospital.to_string(), lookup_unit)
        } else {
            let resolved = self.canonical_unit(&lookup_unit).or_else(|| {
                debug!(
                    "Unit '{}' has no canonical mapping, trying bed '{}'",
                    raw.unit, raw.bed
                );
                self.unit_for_bed(&raw.bed)
                    .and_then(|unit| self.canonical_unit(unit))
            });
            match resolved {
                Some((hospital, unit)) => (hospital.to_string(), unit.to_string()),
                None => {
                    warn!(
                        "Unit in '{}' unresolved: '{}' not in unit mapping",
                        location_text, raw.unit
                    );
                    (MISSING_STR.to_string(), MISSING_STR.to_string())
                }
            }
        };

        if !raw.hospital.is_empty() {
            let named = self.canonical_hospital(&raw.hospital).unwrap_or(MISSING_STR);
            if named != hospital {
                debug!(
                    "'{}': hospital from unit '{}' differs from hospital lookup '{}'",
                    location_text, hospital, named
                );
            }
        }

        CanonicalLocation::new(hospital, unit, raw.bed.clone())
    }
}
