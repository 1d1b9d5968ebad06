//! Data models for HL7 processing
//!
//! This module contains the core data structures shared by the parsing
//! pipeline: the tokenized field and segment shapes, the per-message tree,
//! and the typed records (signals, locations, identities) built from it.

use crate::app::services::type_schema::TypedField;
use crate::constants::{
    self, DEFAULT_COMPONENT_SEPARATOR, DEFAULT_ESCAPE_CHARACTER, DEFAULT_FIELD_SEPARATOR,
    DEFAULT_REPETITION_SEPARATOR, DEFAULT_SUBCOMPONENT_SEPARATOR, MISSING_STR, segments,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Separators and Field Values
// =============================================================================

/// Separator characters declared by one message's header segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparatorSet {
    pub field: char,
    pub component: char,
    pub repetition: char,
    pub escape: char,
    pub subcomponent: char,
}

impl Default for SeparatorSet {
    fn default() -> Self {
        Self {
            field: DEFAULT_FIELD_SEPARATOR,
            component: DEFAULT_COMPONENT_SEPARATOR,
            repetition: DEFAULT_REPETITION_SEPARATOR,
            escape: DEFAULT_ESCAPE_CHARACTER,
            subcomponent: DEFAULT_SUBCOMPONENT_SEPARATOR,
        }
    }
}

impl SeparatorSet {
    /// The four encoding characters as they appear in MSH.2
    pub fn encoding_characters(&self) -> String {
        [self.component, self.repetition, self.escape, self.subcomponent]
            .iter()
            .collect()
    }

    /// Whether the text contains any of the four data separators
    pub fn has_data_separator(&self, text: &str) -> bool {
        text.contains(|c| {
            c == self.field || c == self.component || c == self.repetition || c == self.subcomponent
        })
    }
}

/// Raw value of one field, shaped by the separators present in its text
///
/// A field without any separator stays a scalar. Lists only appear where
/// the corresponding separator occurs, so the nesting depth reflects the
/// raw text and is never padded with singleton layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<FieldValue>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Scalar(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

impl FieldValue {
    /// Build a flat list of scalar values
    pub fn list_of<S: AsRef<str>>(items: &[S]) -> Self {
        FieldValue::List(
            items
                .iter()
                .map(|s| FieldValue::Scalar(s.as_ref().to_string()))
                .collect(),
        )
    }

    /// True for the empty scalar
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Scalar(s) if s.is_empty())
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FieldValue::List(_))
    }

    /// Scalar text, if this value is a scalar
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    /// Elements, if this value is a list
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Scalar(_) => None,
            FieldValue::List(items) => Some(items),
        }
    }

    /// Number of top-level elements (1 for a scalar)
    pub fn arity(&self) -> usize {
        match self {
            FieldValue::Scalar(_) => 1,
            FieldValue::List(items) => items.len(),
        }
    }

    /// Elements as plain strings when the value is a list of scalars
    pub fn as_string_list(&self) -> Option<Vec<&str>> {
        self.as_list()?.iter().map(FieldValue::as_scalar).collect()
    }

    /// Text of the value with nested levels re-joined
    ///
    /// Top-level lists are joined with the component separator and deeper
    /// levels with the subcomponent separator. Repeated fields therefore do
    /// not round-trip exactly; this is meant for diagnostics and keys.
    pub fn flatten_text(&self, separators: &SeparatorSet) -> String {
        self.flatten_at(separators, 0)
    }

    fn flatten_at(&self, separators: &SeparatorSet, depth: usize) -> String {
        match self {
            FieldValue::Scalar(s) => s.clone(),
            FieldValue::List(items) => {
                let sep = if depth == 0 {
                    separators.component
                } else {
                    separators.subcomponent
                };
                items
                    .iter()
                    .map(|item| item.flatten_at(separators, depth + 1))
                    .collect::<Vec<_>>()
                    .join(&sep.to_string())
            }
        }
    }
}

// =============================================================================
// Segments
// =============================================================================

/// Kind of a segment, from its three-letter label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SegmentKind {
    Header,
    PatientIdentity,
    Visit,
    VisitExtension,
    Event,
    ObservationGroup,
    Observation,
    Diagnosis,
    Other(String),
}

impl SegmentKind {
    /// Classify an upper-cased segment label
    pub fn from_label(label: &str) -> Self {
        match label {
            segments::MSH => SegmentKind::Header,
            segments::PID => SegmentKind::PatientIdentity,
            segments::PV1 => SegmentKind::Visit,
            segments::PV2 => SegmentKind::VisitExtension,
            segments::EVN => SegmentKind::Event,
            segments::OBR => SegmentKind::ObservationGroup,
            segments::OBX => SegmentKind::Observation,
            segments::DG1 => SegmentKind::Diagnosis,
            other => SegmentKind::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SegmentKind::Header => segments::MSH,
            SegmentKind::PatientIdentity => segments::PID,
            SegmentKind::Visit => segments::PV1,
            SegmentKind::VisitExtension => segments::PV2,
            SegmentKind::Event => segments::EVN,
            SegmentKind::ObservationGroup => segments::OBR,
            SegmentKind::Observation => segments::OBX,
            SegmentKind::Diagnosis => segments::DG1,
            SegmentKind::Other(label) => label,
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One tokenized line of a message
///
/// `fields[0]` is the segment label. For the header segment `fields[1]` is
/// the unsplit encoding-characters field, so header positions are one less
/// than their HL7 field numbers (MSH.7 is `fields[6]`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub fields: Vec<FieldValue>,
    pub separators: SeparatorSet,
    /// Observation value coerced by its declared value type (observation segments only)
    pub observation_value: Option<TypedField>,
}

impl Segment {
    pub fn new(kind: SegmentKind, fields: Vec<FieldValue>, separators: SeparatorSet) -> Self {
        Self {
            kind,
            fields,
            separators,
            observation_value: None,
        }
    }

    pub fn label(&self) -> &str {
        self.kind.label()
    }

    /// Raw field at a list position
    pub fn field(&self, position: usize) -> Option<&FieldValue> {
        self.fields.get(position)
    }

    /// Raw scalar text at a position, empty when absent or not a scalar
    pub fn scalar(&self, position: usize) -> &str {
        self.field(position)
            .and_then(FieldValue::as_scalar)
            .unwrap_or(MISSING_STR)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// =============================================================================
// Message Tree
// =============================================================================

/// An observation-group segment with its child observation segments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationGroup {
    pub group: Segment,
    pub observations: Vec<Segment>,
}

/// Per-message tree assembled from the flat segment list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageTree {
    pub header: Segment,
    pub patient: Segment,
    pub visit: Segment,
    pub groups: Vec<ObservationGroup>,
    pub event: Option<Segment>,
    pub visit_extension: Option<Segment>,
    pub diagnoses: Vec<Segment>,
}

impl MessageTree {
    /// Indented outline of the tree, one segment label per line
    pub fn outline(&self) -> String {
        let mut lines = vec![
            self.header.label().to_string(),
            format!("  {}", self.patient.label()),
            format!("  {}", self.visit.label()),
        ];
        for optional in [&self.event, &self.visit_extension].into_iter().flatten() {
            lines.push(format!("  {}", optional.label()));
        }
        for diagnosis in &self.diagnoses {
            lines.push(format!("  {} {}", diagnosis.label(), diagnosis.scalar(1)));
        }
        for group in &self.groups {
            lines.push(format!("  {} {}", group.group.label(), group.group.scalar(1)));
            for observation in &group.observations {
                lines.push(format!(
                    "    {} {}",
                    observation.label(),
                    observation.scalar(1)
                ));
            }
        }
        lines.join("\n")
    }
}

// =============================================================================
// Locations and Identities
// =============================================================================

/// Normalized (hospital, unit, bed) identity of a patient location
///
/// Unresolved parts hold the string-missing sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CanonicalLocation {
    pub hospital: String,
    pub unit: String,
    pub bed: String,
}

impl CanonicalLocation {
    pub fn new(
        hospital: impl Into<String>,
        unit: impl Into<String>,
        bed: impl Into<String>,
    ) -> Self {
        Self {
            hospital: hospital.into(),
            unit: unit.into(),
            bed: bed.into(),
        }
    }

    /// Location with every part missing
    pub fn missing() -> Self {
        Self::default()
    }

    /// Whether hospital and unit both resolved
    pub fn is_resolved(&self) -> bool {
        self.hospital != MISSING_STR && self.unit != MISSING_STR
    }
}

impl fmt::Display for CanonicalLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.hospital, self.unit, self.bed)
    }
}

/// Patient identity fields extracted from a message
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PatientIdentity {
    /// Medical record number
    pub mrn: String,
    /// Visit / account number
    pub visit_id: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: String,
}

/// Identity found inside vitals observations, with its effective start
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservedIdentity {
    pub identity: PatientIdentity,
    pub start_t: Option<DateTime<Utc>>,
}

// =============================================================================
// Signals
// =============================================================================

/// Classification of one observation group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalType {
    Waveform,
    Monitoring,
    Alarm,
    /// Unrecognized service name; the group carries no attributes
    Other(String),
}

impl SignalType {
    pub fn from_service_name(name: &str) -> Self {
        match name {
            constants::service_names::WAVEFORM => SignalType::Waveform,
            constants::service_names::MONITORING => SignalType::Monitoring,
            constants::service_names::ALARM => SignalType::Alarm,
            other => SignalType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SignalType::Waveform => constants::service_names::WAVEFORM,
            SignalType::Monitoring => constants::service_names::MONITORING,
            SignalType::Alarm => constants::service_names::ALARM,
            SignalType::Other(name) => name,
        }
    }
}

/// One observation's contribution to a signal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    /// Declared value type (OBX.2)
    pub value_type: String,
    /// Derived observation name
    pub name: String,
    /// "scheme:code" of the observation identifier
    pub code: String,
    /// Observation sub-id and source joined with ':'
    pub channel_id: String,
    pub observed_at: Option<DateTime<Utc>>,
    pub unit: String,
    pub value: TypedField,
    pub reference_range: String,
}

/// Attributes keyed by observation name, in first-seen order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct AttributeMap {
    entries: Vec<Attribute>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert by name; a repeated name replaces the earlier attribute in place
    /// and the replaced attribute is returned
    pub fn insert(&mut self, attribute: Attribute) -> Option<Attribute> {
        match self.entries.iter_mut().find(|a| a.name == attribute.name) {
            Some(existing) => Some(std::mem::replace(existing, attribute)),
            None => {
                self.entries.push(attribute);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.entries.iter().find(|a| a.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One observation group with its attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    pub signal_type: SignalType,
    pub start_t: Option<DateTime<Utc>>,
    pub end_t: Option<DateTime<Utc>>,
    /// Placer/filler source identifiers (OBR.3)
    pub source: Vec<String>,
    /// Sending device/driver description (OBR.21)
    pub source_system: String,
    /// Raw collector identifier (OBR.10)
    pub collector: String,
    /// Environment (OBR.13)
    pub environment: String,
    /// Canonical form of the collector identifier when it is a known encoding
    pub location: Option<CanonicalLocation>,
    pub attributes: AttributeMap,
    /// Sample count of the numeric-array channel (waveform records)
    pub nsamples: Option<usize>,
    /// Sampling interval in milliseconds (waveform records)
    pub sample_interval_ms: Option<f64>,
}

// =============================================================================
// Typed Records
// =============================================================================

/// Kind of a classified message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordKind {
    Waveform,
    Alarm,
    Vitals,
    Admission,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Waveform => "Waveform",
            RecordKind::Alarm => "Alarm",
            RecordKind::Vitals => "Vitals",
            RecordKind::Admission => "ADT",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header summary of a message
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MessageHeader {
    /// MSH.7
    pub time: Option<DateTime<Utc>>,
    /// MSH.3
    pub sending_application: String,
    /// MSH.10
    pub control_id: String,
    /// MSH.9 joined
    pub message_type: String,
    pub profile: String,
}

/// Top-level parsed message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedRecord {
    pub kind: RecordKind,
    pub header: MessageHeader,
    pub patient: PatientIdentity,
    /// PV1.2
    pub patient_class: String,
    /// PV1.3 as received
    pub raw_location: String,
    pub location: CanonicalLocation,
    /// Why the location could not be resolved, when its shape was unrecognized
    pub location_error: Option<String>,
    pub signals: Vec<Signal>,
    /// Identity carried by vitals observations
    pub observed_identity: Option<ObservedIdentity>,
}

/// Patient-at-location assertion consumed by occupancy reconciliation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationAssertion {
    pub hospital: String,
    pub bed_unit: String,
    pub bed_id: String,
    pub pid: String,
    pub visit_id: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: String,
    pub start_t: Option<DateTime<Utc>>,
    pub end_t: Option<DateTime<Utc>>,
}

/// One flattened channel row for columnar export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelRow {
    pub msh_time: Option<DateTime<Utc>>,
    pub msh_send_app: String,
    pub profile: String,
    pub control_id: String,
    pub hospital: String,
    pub bed_unit: String,
    pub bed_id: String,
    pub pid: String,
    pub visit_id: String,
    pub patient_last_name: String,
    pub patient_first_name: String,
    pub src: String,
    pub msg_type: String,
    pub start_t: Option<DateTime<Utc>>,
    pub end_t: Option<DateTime<Utc>>,
    pub channel: String,
    pub id: String,
    pub channel_type: String,
    pub obx_start_t: Option<DateTime<Utc>>,
    pub values: TypedField,
    pub value_type: String,
    #[serde(rename = "UoM")]
    pub unit: String,
    pub ref_range: String,
    pub pd_samp_ms: Option<f64>,
    pub nsamp: usize,
}
