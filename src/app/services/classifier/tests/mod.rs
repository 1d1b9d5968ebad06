//! Test fixtures for classification
//!
//! Messages are built from `(position, text)` pairs so field positions in the
//! tests read the same as in the extraction code.

use crate::Result;
use crate::app::models::{MessageTree, TypedRecord};
use crate::app::services::assembler::assemble;
use crate::app::services::classifier::Classifier;
use crate::app::services::location::LocationTables;
use crate::app::services::tokenizer::tokenize;
use std::sync::Arc;

mod classifier_tests;

pub const WAVEFORM_START: &str = "20250228155958.138-0500";
pub const WAVEFORM_END: &str = "20250228155959.137-0500";

/// One segment line with the given fields set and every other field empty
pub fn segment(label: &str, fields: &[(usize, &str)]) -> String {
    let len = fields.iter().map(|(p, _)| *p).max().unwrap_or(0) + 1;
    let mut parts = vec![String::new(); len];
    parts[0] = label.to_string();
    for (position, value) in fields {
        parts[*position] = value.to_string();
    }
    parts.join("|")
}

pub fn header(message_type: &str) -> String {
    segment(
        "MSH",
        &[
            (1, "^~\\&"),
            (2, "DATACAPTOR"),
            (6, "20250228155959.885-0500"),
            (8, message_type),
            (9, "AWS_Data_0001"),
            (10, "P"),
            (11, "2.6"),
            (20, "IHE_PCD_ORU_R01^IHE PCD^1.3.6.1.4.1.19376.1.6.1.1.1^ISO"),
        ],
    )
}

pub fn patient() -> String {
    segment(
        "PID",
        &[(3, "MRN123^^^HOSP^MR"), (5, "DOE^JANE^Q^^^^L"), (18, "ACCT9")],
    )
}

pub fn visit(location: &str) -> String {
    segment("PV1", &[(2, "I"), (3, location), (19, "VISIT7")])
}

pub fn group(service: &str, source: &str) -> String {
    segment(
        "OBR",
        &[
            (1, "1"),
            (3, "DC1^DATACAPTOR"),
            (4, service),
            (7, WAVEFORM_START),
            (8, WAVEFORM_END),
            (21, source),
        ],
    )
}

/// Observation with value type, coded identifier, value and unit
pub fn observation(value_type: &str, identifier: &str, value: &str, unit: &str) -> String {
    segment(
        "OBX",
        &[
            (1, "1"),
            (2, value_type),
            (3, identifier),
            (4, "1.1.1.1"),
            (5, value),
            (6, unit),
            (14, WAVEFORM_START),
            (21, "SRC"),
        ],
    )
}

pub fn samples(count: usize) -> String {
    (0..count)
        .map(|i| format!("{}.5", i))
        .collect::<Vec<_>>()
        .join("^")
}

pub fn waveform_message(sample_count: usize) -> Vec<String> {
    vec![
        header("ORU^R01^ORU_R01"),
        patient(),
        visit("EUH-4TN-T435"),
        group("69121^MDC_OBS_WAVE_CTS^MDC", "DATACAPTOR_DEV"),
        observation(
            "NA",
            "150452^MDC_PRESS_BLD_ART_ABP^MDC",
            &samples(sample_count),
            "266016^MDC_DIM_MMHG^MDC",
        ),
        observation(
            "NM",
            "0^MDC_ATTR_TIME_PD_SAMP^MDC",
            "10",
            "264338^MDC_DIM_MILLI_SEC^MDC",
        ),
    ]
}

pub fn vitals_message() -> Vec<String> {
    vec![
        header("ORU^R01^ORU_R01"),
        patient(),
        visit("EUH-4TN-T435"),
        group("182777000^monitoring of patient^SCT", "PhilipsL_Intellivue"),
        observation("ST", "1929^MRN^CAPSULE", "MRN555", ""),
        observation("ST", "1930^PATNAME^CAPSULE", "SMITH^JOHN", ""),
        observation("ST", "8338^FIRSTNAME^CAPSULE", "U", ""),
        observation("ST", "6544^VISIT^CAPSULE", "V100", ""),
        observation("NM", "147842^MDC_ECG_HEART_RATE^MDC", "72", "264864^bpm^MDC"),
    ]
}

pub fn alarm_message() -> Vec<String> {
    vec![
        header("ORU^R40^ORU_R40"),
        patient(),
        visit("EUH-4TN-T435"),
        group("196616^MDC_EVT_ALARM^MDC", "DATACAPTOR_DEV"),
        observation("ST", "196650^MDC_EVT_ALARM_TEXT^MDC", "HR HIGH", ""),
        observation("ST", "", "unnamed", ""),
    ]
}

pub fn admission_message() -> Vec<String> {
    vec![header("ADT^A01"), patient(), visit("EUH-4TN-T435")]
}

pub fn tree(lines: &[String]) -> Result<MessageTree> {
    let tokenized = tokenize(&lines.join("\r"))?;
    assemble(tokenized.segments, &tokenized.kinds)
}

pub fn classifier() -> Classifier {
    Classifier::new(Arc::new(LocationTables::embedded().unwrap()))
}

pub fn classify(lines: &[String]) -> Result<TypedRecord> {
    classifier().classify(&tree(lines)?)
}
