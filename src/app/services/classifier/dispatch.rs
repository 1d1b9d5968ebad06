//! Two-level dispatch and record construction

use super::identity::{extract_patient, observed_identity};
use super::signal::{build_signal, service_identifier};
use super::values::{list_elements, value_text};
use crate::app::models::{
    CanonicalLocation, FieldValue, MessageHeader, MessageTree, RecordKind, TypedRecord,
};
use crate::app::services::location::LocationTables;
use crate::app::services::type_schema::TypedField;
use crate::constants::{message_types, service_codes};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, warn};

const MSH_SENDING_APPLICATION: usize = 2;
const MSH_TIME: usize = 6;
const MSH_MESSAGE_TYPE: usize = 8;
const MSH_CONTROL_ID: usize = 9;
const MSH_PROFILE: usize = 20;
const PV1_PATIENT_CLASS: usize = 2;
const PV1_LOCATION: usize = 3;

/// Classify a message tree by header message type, then by the first
/// observation group's service code
pub fn record_kind(tree: &MessageTree) -> Result<RecordKind> {
    let message_type = tree.header.typed(MSH_MESSAGE_TYPE)?;
    let family = match list_elements(&message_type, &tree.header.separators) {
        Some(parts) => parts.into_iter().next().unwrap_or_default(),
        None => message_type.to_text(),
    };

    match family.as_str() {
        message_types::ORU => {
            let group = tree.groups.first().ok_or_else(|| {
                Error::malformed_message("Observation result without observation groups")
            })?;
            let (code, _) = service_identifier(&group.group)?;
            match code.as_str() {
                service_codes::VITALS => Ok(RecordKind::Vitals),
                service_codes::ALARM => Ok(RecordKind::Alarm),
                service_codes::WAVEFORM => Ok(RecordKind::Waveform),
                _ => Err(Error::unknown_observation_type(code)),
            }
        }
        message_types::ADT => Ok(RecordKind::Admission),
        _ => Err(Error::unknown_message_profile(value_text(
            &message_type,
            &tree.header.separators,
        ))),
    }
}

/// Builds typed records from assembled message trees
#[derive(Debug, Clone)]
pub struct Classifier {
    tables: Arc<LocationTables>,
    strict_location: bool,
}

impl Classifier {
    pub fn new(tables: Arc<LocationTables>) -> Self {
        Self {
            tables,
            strict_location: false,
        }
    }

    /// Fail the whole message when its location shape is unrecognized
    pub fn with_strict_location(mut self, strict: bool) -> Self {
        self.strict_location = strict;
        self
    }

    pub fn tables(&self) -> &LocationTables {
        &self.tables
    }

    pub fn classify(&self, tree: &MessageTree) -> Result<TypedRecord> {
        let kind = record_kind(tree)?;
        let header = self.header_summary(tree, kind)?;
        let patient = extract_patient(&tree.patient, &tree.visit)?;
        let patient_class = tree.visit.typed_text(PV1_PATIENT_CLASS)?;

        let separators = &tree.visit.separators;
        let empty = FieldValue::default();
        let location_field = tree.visit.field(PV1_LOCATION).unwrap_or(&empty);
        let raw_location = location_field.flatten_text(separators);

        let (location, location_error) = match self.tables.canonicalize(location_field, separators)
        {
            Ok(location) => (location, None),
            Err(e @ Error::UnrecognizedLocationFormat { .. }) if !self.strict_location => {
                warn!(
                    "Message {}: {}, continuing with missing location",
                    header.control_id, e
                );
                (CanonicalLocation::missing(), Some(e.to_string()))
            }
            Err(e) => return Err(e),
        };

        let mut signals = Vec::new();
        if kind != RecordKind::Admission {
            for group in &tree.groups {
                let mut signal = build_signal(group, &self.tables)?;
                if kind == RecordKind::Waveform {
                    signal.apply_waveform_metrics();
                }
                signals.push(signal);
            }
        }

        let observed_identity = match (kind, tree.groups.first()) {
            (RecordKind::Vitals, Some(group)) => Some(observed_identity(group)?),
            _ => None,
        };

        debug!(
            "Classified message {} as {} with {} signals at {}",
            header.control_id,
            kind,
            signals.len(),
            location
        );

        Ok(TypedRecord {
            kind,
            header,
            patient,
            patient_class,
            raw_location,
            location,
            location_error,
            signals,
            observed_identity,
        })
    }

    fn header_summary(&self, tree: &MessageTree, kind: RecordKind) -> Result<MessageHeader> {
        let header = &tree.header;
        let separators = &header.separators;
        let message_type = value_text(&header.typed(MSH_MESSAGE_TYPE)?, separators);

        let profile = match kind {
            RecordKind::Waveform | RecordKind::Vitals => {
                match header.typed(MSH_PROFILE)? {
                    // Repeated profiles: the first repetition
                    TypedField::Raw(FieldValue::List(repetitions)) => repetitions
                        .first()
                        .map(|first| first.flatten_text(separators))
                        .unwrap_or_default(),
                    other => value_text(&other, separators),
                }
            }
            RecordKind::Alarm | RecordKind::Admission => message_type.clone(),
        };

        Ok(MessageHeader {
            time: header.typed(MSH_TIME)?.as_timestamp(),
            sending_application: header.typed_text(MSH_SENDING_APPLICATION)?,
            control_id: header.typed_text(MSH_CONTROL_ID)?,
            message_type,
            profile,
        })
    }
}
