//! Location assertions and per-channel rows
//!
//! Row expansion differs by record kind: observation-result kinds emit one
//! row per named attribute, waveforms one row per signal for the sample
//! array. Each kind supplies that expansion and its channel-type fallback
//! through a [`RowStrategy`].

use crate::app::models::{
    Attribute, ChannelRow, LocationAssertion, PatientIdentity, RecordKind, Signal, TypedRecord,
};
use crate::app::services::type_schema::TypedField;
use crate::constants::{DEFAULT_CHANNEL_TYPE, DEFAULT_WAVEFORM_CHANNEL_TYPE, channel_type};
use crate::{Error, Result};
use chrono::{DateTime, Utc};

/// Per-kind row expansion
pub trait RowStrategy {
    /// Channel type used when the channel name is not in the channel table
    fn default_channel_type(&self) -> &'static str;

    /// Rows contributed by one signal
    fn rows(&self, record: &TypedRecord, signal: &Signal) -> Vec<ChannelRow>;
}

/// One row per named attribute, each a single sample
pub struct AttributeRows;

/// One row per signal for the numeric-array channel
pub struct WaveformRows;

impl RowStrategy for AttributeRows {
    fn default_channel_type(&self) -> &'static str {
        DEFAULT_CHANNEL_TYPE
    }

    fn rows(&self, record: &TypedRecord, signal: &Signal) -> Vec<ChannelRow> {
        signal
            .attributes
            .iter()
            .filter(|attribute| !attribute.name.is_empty())
            .map(|attribute| {
                let mut row = base_row(record, signal, self.default_channel_type());
                fill_channel(&mut row, attribute, self.default_channel_type());
                row.values = as_list(&attribute.value);
                row.nsamp = 1;
                row
            })
            .collect()
    }
}

impl RowStrategy for WaveformRows {
    fn default_channel_type(&self) -> &'static str {
        DEFAULT_WAVEFORM_CHANNEL_TYPE
    }

    fn rows(&self, record: &TypedRecord, signal: &Signal) -> Vec<ChannelRow> {
        let mut row = base_row(record, signal, self.default_channel_type());
        row.end_t = signal.end_t;
        row.pd_samp_ms = signal.sample_interval_ms;

        match signal.waveform_channel() {
            Some(channel) => {
                fill_channel(&mut row, channel, self.default_channel_type());
                row.values = channel.value.clone();
                row.nsamp = signal
                    .nsamples
                    .unwrap_or_else(|| channel.value.element_count());
            }
            None => row.nsamp = signal.nsamples.unwrap_or(0),
        }
        vec![row]
    }
}

/// Row strategy for a record kind; admissions have no channels
pub fn strategy(kind: RecordKind) -> Option<&'static dyn RowStrategy> {
    match kind {
        RecordKind::Waveform => Some(&WaveformRows),
        RecordKind::Alarm | RecordKind::Vitals => Some(&AttributeRows),
        RecordKind::Admission => None,
    }
}

fn base_row(record: &TypedRecord, signal: &Signal, default_type: &str) -> ChannelRow {
    ChannelRow {
        msh_time: record.header.time,
        msh_send_app: record.header.sending_application.clone(),
        profile: record.header.profile.clone(),
        control_id: record.header.control_id.clone(),
        hospital: record.location.hospital.clone(),
        bed_unit: record.location.unit.clone(),
        bed_id: record.location.bed.clone(),
        pid: record.patient.mrn.clone(),
        visit_id: record.patient.visit_id.clone(),
        patient_last_name: record.patient.last_name.clone(),
        patient_first_name: record.patient.first_name.clone(),
        src: signal.source_system.clone(),
        msg_type: signal.signal_type.as_str().to_string(),
        start_t: signal.start_t,
        end_t: None,
        channel: String::new(),
        id: String::new(),
        channel_type: default_type.to_string(),
        obx_start_t: None,
        values: TypedField::FloatList(Vec::new()),
        value_type: String::new(),
        unit: String::new(),
        ref_range: String::new(),
        pd_samp_ms: None,
        nsamp: 0,
    }
}

fn fill_channel(row: &mut ChannelRow, attribute: &Attribute, default_type: &str) {
    row.channel = attribute.name.clone();
    row.id = attribute.channel_id.clone();
    row.channel_type = channel_type(&attribute.name)
        .unwrap_or(default_type)
        .to_string();
    row.obx_start_t = attribute.observed_at;
    row.value_type = attribute.value_type.clone();
    row.unit = attribute.unit.clone();
    row.ref_range = attribute.reference_range.clone();
}

/// Scalars become one-element lists so every row carries a list of values
fn as_list(value: &TypedField) -> TypedField {
    match value {
        TypedField::Int(v) => TypedField::IntList(vec![*v]),
        TypedField::Float(v) => TypedField::FloatList(vec![*v]),
        TypedField::Str(s) => TypedField::StrList(vec![s.clone()]),
        other => other.clone(),
    }
}

fn assertion(
    record: &TypedRecord,
    identity: &PatientIdentity,
    start_t: Option<DateTime<Utc>>,
) -> LocationAssertion {
    LocationAssertion {
        hospital: record.location.hospital.clone(),
        bed_unit: record.location.unit.clone(),
        bed_id: record.location.bed.clone(),
        pid: identity.mrn.clone(),
        visit_id: identity.visit_id.clone(),
        first_name: identity.first_name.clone(),
        last_name: identity.last_name.clone(),
        middle_initial: identity.middle_initial.clone(),
        start_t,
        end_t: None,
    }
}

impl TypedRecord {
    /// Patient-at-location assertions for occupancy reconciliation
    ///
    /// Every record asserts its patient identity from the header time. Vitals
    /// add the identity found in observations, from the first group's start.
    pub fn location_assertions(&self) -> Vec<LocationAssertion> {
        let mut assertions = vec![assertion(self, &self.patient, self.header.time)];
        if let Some(observed) = &self.observed_identity {
            assertions.push(assertion(self, &observed.identity, observed.start_t));
        }
        assertions
    }

    /// Flatten the record's signals into one row per channel
    pub fn channel_rows(&self) -> Vec<ChannelRow> {
        match strategy(self.kind) {
            Some(strategy) => self
                .signals
                .iter()
                .flat_map(|signal| strategy.rows(self, signal))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Channel rows as a JSON array, or the empty string when there are none
    pub fn to_row_json(&self) -> Result<String> {
        let rows = self.channel_rows();
        if rows.is_empty() {
            return Ok(String::new());
        }
        serde_json::to_string(&rows).map_err(|e| {
            Error::serialization(
                format!("Failed to encode rows of message {}", self.header.control_id),
                e,
            )
        })
    }
}
