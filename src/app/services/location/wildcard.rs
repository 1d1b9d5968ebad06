//! Bed-id rewriting
//!
//! Bed ids vary by room number inside a unit, so unit lookup goes through a
//! wildcard form where the varying room digits become `??`.

use regex::Regex;
use std::sync::LazyLock;

/// `ER1201`, `PA05-01`: emergency and PACU bays
static BAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)\d{2}(-?)01$").unwrap());

/// `T434`, `T434-01`: letter, floor digit, two room digits
static FLOOR_ROOM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]\d)\d{2}(-01)?$").unwrap());

/// Trailing digit and bed letter of NICU bays
static NICU_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[A-Za-z]$").unwrap());

static TRAILING_DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{1,2}$").unwrap());

/// Single-bed room without its bed suffix
static ROOM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]\d{3}$").unwrap());

const WILDCARD: &str = "??";

/// Wildcard form of a bed id used for unit lookup
///
/// Returns `None` when a bed looks like a bay or floor-room id but does not
/// follow that pattern.
pub fn bed_wildcard(bed: &str) -> Option<String> {
    let first_two: String = bed.chars().take(2).collect();
    let mut chars = bed.chars();
    let leading_letter_digit = matches!(
        (chars.next(), chars.next()),
        (Some(a), Some(d)) if a.is_alphabetic() && d.is_ascii_digit()
    );

    if first_two == "ER" || first_two == "PA" {
        let caps = BAY_RE.captures(bed)?;
        Some(format!("{}{}{}01", &caps[1], WILDCARD, &caps[2]))
    } else if bed.chars().count() >= 4 && leading_letter_digit {
        let caps = FLOOR_ROOM_RE.captures(bed)?;
        let suffix = caps.get(2).map_or("", |m| m.as_str());
        Some(format!("{}{}{}", &caps[1], WILDCARD, suffix))
    } else if bed.starts_with("EMS") {
        Some("EMS?".to_string())
    } else if bed.starts_with("NICU") && (bed.ends_with('A') || bed.ends_with('B')) {
        Some(NICU_SUFFIX_RE.replace(bed, WILDCARD).into_owned())
    } else {
        Some(TRAILING_DIGITS_RE.replace(bed, WILDCARD).into_owned())
    }
}

/// Append the `-01` bed suffix to a bare room id such as `T434`
pub fn canonicalize_bed(bed: &str) -> String {
    if ROOM_RE.is_match(bed) {
        format!("{}-01", bed)
    } else {
        bed.to_string()
    }
}
