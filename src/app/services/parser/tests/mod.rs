//! Test utilities for file parsing
//!
//! Message bodies come from the classifier fixtures; these helpers join them
//! into feed text and temporary files.

use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

use crate::app::services::classifier::tests::{
    admission_message, alarm_message, vitals_message, waveform_message,
};
use crate::app::services::location::LocationTables;
use crate::app::services::parser::Hl7Parser;


pub fn message_text(lines: &[String]) -> String {
    lines.join("\r")
}

/// A feed with one message of every kind plus one broken message, in that order
pub fn mixed_feed(boundary: &str) -> String {
    [
        message_text(&waveform_message(10)),
        message_text(&alarm_message()),
        "MSH|^~\\&|X||||20250228155959-0500||ORU^R01|9|P|2.6\rOBR|1".to_string(),
        message_text(&vitals_message()),
        message_text(&admission_message()),
    ]
    .join(boundary)
}

pub fn parser() -> Hl7Parser {
    Hl7Parser::new(Arc::new(LocationTables::embedded().unwrap()))
}

pub fn temp_feed(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
