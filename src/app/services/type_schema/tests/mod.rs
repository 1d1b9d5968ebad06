//! Test helpers for the type schema
//!
//! Shared constructors for segments and expected timestamps.

use crate::app::models::{FieldValue, Segment, SegmentKind, SeparatorSet};
use chrono::{DateTime, TimeZone, Utc};

mod conversion_tests;
mod field_map_tests;
mod timestamp_tests;

/// Build a segment whose fields are all scalars
pub fn scalar_segment(label: &str, fields: &[&str]) -> Segment {
    let mut values = vec![FieldValue::from(label)];
    values.extend(fields.iter().map(|f| FieldValue::from(*f)));
    Segment::new(
        SegmentKind::from_label(label),
        values,
        SeparatorSet::default(),
    )
}

/// UTC instant from calendar parts
pub fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec).unwrap()
}
