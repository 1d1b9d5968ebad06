//! Tests for timestamp repair and parsing

use super::*;
use crate::app::services::type_schema::{fix_time, parse_timestamp};

#[test]
fn test_fix_time_snaps_drifted_offsets() {
    assert_eq!(fix_time("20240315120000-0359"), "20240315120000-0400");
    assert_eq!(fix_time("20240315120000-0401"), "20240315120000-0400");
    assert_eq!(fix_time("20240115120000-0459"), "20240115120000-0500");
    assert_eq!(fix_time("20240115120000-0501"), "20240115120000-0500");
}

#[test]
fn test_fix_time_leaves_whole_and_half_hours() {
    assert_eq!(fix_time("20240315120000-0400"), "20240315120000-0400");
    assert_eq!(fix_time("20240315120000+0530"), "20240315120000+0530");
    assert_eq!(fix_time("20240315120000"), "20240315120000");
    assert_eq!(fix_time("20240315120001-0700"), "20240315120001-0700");
}

#[test]
fn test_drifted_offset_equals_corrected_instant() {
    let drifted = parse_timestamp("20240315120000-0359").unwrap();
    let corrected = parse_timestamp("20240315120000-0400").unwrap();
    assert_eq!(drifted, corrected);
    assert_eq!(corrected, utc(2024, 3, 15, 16, 0, 0));
}

#[test]
fn test_fractional_seconds_with_offset() {
    let parsed = parse_timestamp("20240115120000.250-0500").unwrap();
    assert_eq!(parsed.timestamp_millis(), utc(2024, 1, 15, 17, 0, 0).timestamp_millis() + 250);
}

#[test]
fn test_naive_times_are_local_hospital_time() {
    // EST in winter, EDT in summer
    assert_eq!(
        parse_timestamp("20240115120000").unwrap(),
        utc(2024, 1, 15, 17, 0, 0)
    );
    assert_eq!(
        parse_timestamp("20240715120000").unwrap(),
        utc(2024, 7, 15, 16, 0, 0)
    );

    let fractional = parse_timestamp("20240715120000.5").unwrap();
    assert_eq!(
        fractional.timestamp_millis(),
        utc(2024, 7, 15, 16, 0, 0).timestamp_millis() + 500
    );
}

#[test]
fn test_ambiguous_local_time_takes_earlier_instant() {
    // 01:30 happens twice on 2024-11-03; the first is still EDT
    assert_eq!(
        parse_timestamp("20241103013000").unwrap(),
        utc(2024, 11, 3, 5, 30, 0)
    );
}

#[test]
fn test_nonexistent_local_time_is_rejected() {
    let err = parse_timestamp("20240310023000").unwrap_err();
    assert_eq!(err.kind(), "unsupported_conversion");
}

#[test]
fn test_garbage_timestamp_is_rejected() {
    assert!(parse_timestamp("not a time").is_err());
    assert!(parse_timestamp("2024").is_err());
}
