//! Test fixtures for the tokenizer

use crate::app::models::{FieldValue, SeparatorSet};

mod message_tests;

/// Minimal header segment with default separators
pub const HEADER: &str =
    "MSH|^~\\&|DATACAPTOR||||20250228155959.885-0500||ORU^R01^ORU_R01|AWS_Data_0001|P|2.6";

/// Join segments with CR
pub fn message(segments: &[&str]) -> String {
    segments.join("\r")
}

pub fn scalar(text: &str) -> FieldValue {
    FieldValue::from(text)
}

pub fn default_separators() -> SeparatorSet {
    SeparatorSet::default()
}
