//! HL7 timestamp handling
//!
//! Device clocks drift by a minute around the hour boundary, producing
//! offsets such as `-0359`. Those are snapped back to whole hours before
//! parsing. Timestamps without an offset are local hospital time.

use crate::constants::{
    HL7_DATETIME, HL7_DATETIME_FRACTION, HL7_DATETIME_FRACTION_OFFSET, HL7_DATETIME_OFFSET,
    LOCAL_TIME_ZONE, OFFSET_CORRECTIONS,
};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Byte position of the fractional-second dot in `YYYYMMDDHHMMSS.f`
const FRACTION_DOT_POSITION: usize = 14;

/// Length of a `+HHMM` / `-HHMM` offset suffix
const OFFSET_SUFFIX_LEN: usize = 5;

/// Replace a drifted offset suffix with the corresponding whole-hour offset
///
/// Strings ending in `00` or `30` are returned unchanged.
pub fn fix_time(text: &str) -> String {
    if text.ends_with("00") || text.ends_with("30") {
        return text.to_string();
    }
    for (drifted, corrected) in OFFSET_CORRECTIONS {
        if let Some(prefix) = text.strip_suffix(drifted) {
            return format!("{}{}", prefix, corrected);
        }
    }
    text.to_string()
}

/// Parse an HL7 `YYYYMMDDHHMMSS[.f][+/-HHMM]` timestamp to UTC
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    let fixed = fix_time(text);
    let bytes = fixed.as_bytes();

    let has_offset = bytes.len() >= OFFSET_SUFFIX_LEN
        && matches!(bytes[bytes.len() - OFFSET_SUFFIX_LEN], b'+' | b'-');
    let has_fraction =
        bytes.len() > FRACTION_DOT_POSITION && bytes[FRACTION_DOT_POSITION] == b'.';

    let invalid = |reason: String| Error::unsupported_conversion(text, "datetime", reason);

    if has_offset {
        let layout = if has_fraction {
            HL7_DATETIME_FRACTION_OFFSET
        } else {
            HL7_DATETIME_OFFSET
        };
        return DateTime::parse_from_str(&fixed, layout)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| invalid(e.to_string()));
    }

    let layout = if has_fraction {
        HL7_DATETIME_FRACTION
    } else {
        HL7_DATETIME
    };
    let naive =
        NaiveDateTime::parse_from_str(&fixed, layout).map_err(|e| invalid(e.to_string()))?;

    // Ambiguous wall times at the end of daylight saving resolve to the earlier instant
    LOCAL_TIME_ZONE
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| invalid(format!("{} does not exist in {}", naive, LOCAL_TIME_ZONE)))
}
