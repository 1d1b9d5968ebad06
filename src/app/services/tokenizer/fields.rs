//! Segment and field splitting
//!
//! Repetition and subcomponent separators route a field through the full
//! repetition → component → subcomponent chain; a field with only component
//! separators becomes a flat list; anything else stays a scalar.

use crate::app::models::{FieldValue, Segment, SegmentKind, SeparatorSet};
use crate::app::services::type_schema::{TypedField, convert, observation_value_type};
use crate::constants::value_types;
use crate::Result;
use std::collections::BTreeSet;
use tracing::trace;

/// Position of the value-type field in an observation segment
const OBSERVATION_TYPE_POSITION: usize = 2;

/// Position of the value field in an observation segment
const OBSERVATION_VALUE_POSITION: usize = 5;

/// Segments of one message with the set of labels present
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizedMessage {
    pub segments: Vec<Segment>,
    /// Upper-cased segment labels
    pub kinds: BTreeSet<String>,
    pub separators: SeparatorSet,
}

/// Tokenize one message
///
/// Segments are separated by CR or LF; blank lines are skipped.
pub fn tokenize(text: &str) -> Result<TokenizedMessage> {
    let separators = SeparatorSet::from_header(text)?;
    let encoding = separators.encoding_characters();

    let segments = text
        .split(['\r', '\n'])
        .filter(|line| !line.trim().is_empty())
        .map(|line| tokenize_segment(line, &separators, &encoding))
        .collect::<Result<Vec<_>>>()?;

    let kinds = segments
        .iter()
        .map(|segment| segment.label().to_string())
        .collect();

    trace!("Tokenized {} segments", segments.len());

    Ok(TokenizedMessage {
        segments,
        kinds,
        separators,
    })
}

fn tokenize_segment(line: &str, separators: &SeparatorSet, encoding: &str) -> Result<Segment> {
    let mut raw_fields = line.split(separators.field);
    let label = raw_fields.next().unwrap_or_default();

    let mut fields = vec![FieldValue::Scalar(label.to_string())];
    fields.extend(raw_fields.map(|field| {
        if field == encoding {
            FieldValue::Scalar(field.to_string())
        } else {
            split_field(field, separators)
        }
    }));

    let kind = SegmentKind::from_label(&label.to_uppercase());
    let mut segment = Segment::new(kind, fields, *separators);

    if segment.kind == SegmentKind::Observation && segment.len() > OBSERVATION_VALUE_POSITION {
        segment.observation_value = Some(coerce_observation_value(&segment)?);
    }

    Ok(segment)
}

/// Coerce the observation value using the sibling value-type code
fn coerce_observation_value(segment: &Segment) -> Result<TypedField> {
    let declared = segment.scalar(OBSERVATION_TYPE_POSITION);
    let code = if declared.is_empty() {
        value_types::STRING
    } else {
        declared
    };

    let value = &segment.fields[OBSERVATION_VALUE_POSITION];
    convert(value, observation_value_type(code), &segment.separators)
}

/// Split one raw field by the separators present in it
pub fn split_field(field: &str, separators: &SeparatorSet) -> FieldValue {
    if field.contains(separators.repetition) || field.contains(separators.subcomponent) {
        split_repetitions(field, separators)
    } else if field.contains(separators.component) {
        FieldValue::List(
            field
                .split(separators.component)
                .map(|c| FieldValue::Scalar(c.to_string()))
                .collect(),
        )
    } else {
        FieldValue::Scalar(field.to_string())
    }
}

fn split_repetitions(field: &str, separators: &SeparatorSet) -> FieldValue {
    if !field.contains(separators.repetition) {
        return split_components(field, separators);
    }
    FieldValue::List(
        field
            .split(separators.repetition)
            .map(|repetition| split_components(repetition, separators))
            .collect(),
    )
}

fn split_components(text: &str, separators: &SeparatorSet) -> FieldValue {
    if !text.contains(separators.component) {
        return split_subcomponents(text, separators);
    }
    FieldValue::List(
        text.split(separators.component)
            .map(|component| split_subcomponents(component, separators))
            .collect(),
    )
}

fn split_subcomponents(text: &str, separators: &SeparatorSet) -> FieldValue {
    if !text.contains(separators.subcomponent) {
        return FieldValue::Scalar(text.to_string());
    }
    FieldValue::List(
        text.split(separators.subcomponent)
            .map(|s| FieldValue::Scalar(s.to_string()))
            .collect(),
    )
}
