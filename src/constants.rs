//! Application constants for the HL7 processor
//!
//! This module contains segment labels, classification codes, separator
//! defaults, missing-value sentinels and the small static tables used
//! throughout the parsing pipeline.

use chrono_tz::Tz;

// =============================================================================
// Segment Labels
// =============================================================================

/// Segment kind labels as they appear at the start of each segment line
pub mod segments {
    /// Message header
    pub const MSH: &str = "MSH";
    /// Patient identification
    pub const PID: &str = "PID";
    /// Patient visit
    pub const PV1: &str = "PV1";
    /// Patient visit, additional information
    pub const PV2: &str = "PV2";
    /// Event type
    pub const EVN: &str = "EVN";
    /// Observation request (observation group)
    pub const OBR: &str = "OBR";
    /// Observation result
    pub const OBX: &str = "OBX";
    /// Diagnosis
    pub const DG1: &str = "DG1";

    /// Segments that every message must carry
    pub const REQUIRED: &[&str] = &[MSH, PID, PV1];
}

// =============================================================================
// Separators and Message Framing
// =============================================================================

/// Default field separator (MSH.1)
pub const DEFAULT_FIELD_SEPARATOR: char = '|';

/// Default component separator
pub const DEFAULT_COMPONENT_SEPARATOR: char = '^';

/// Default repetition separator
pub const DEFAULT_REPETITION_SEPARATOR: char = '~';

/// Default escape character
pub const DEFAULT_ESCAPE_CHARACTER: char = '\\';

/// Default subcomponent separator
pub const DEFAULT_SUBCOMPONENT_SEPARATOR: char = '&';

/// Character offset of the field separator inside the header segment
pub const HEADER_SEPARATOR_OFFSET: usize = 3;

/// Number of characters declaring separators (field, component, repetition, escape, subcomponent)
pub const HEADER_SEPARATOR_COUNT: usize = 5;

/// Index of the encoding-characters field in a tokenized header segment
pub const HEADER_ENCODING_FIELD: usize = 1;

// =============================================================================
// Message Classification
// =============================================================================

/// Message type codes found in the first component of MSH.9
pub mod message_types {
    /// Observation result (waveform, alarm, vitals)
    pub const ORU: &str = "ORU";
    /// Admission, discharge, transfer
    pub const ADT: &str = "ADT";
}

/// Observation-group service identifier codes (OBR.4 component 1)
pub mod service_codes {
    /// 182777000^monitoring of patient^SCT
    pub const VITALS: &str = "182777000";
    /// 196616^MDC_EVT_ALARM^MDC
    pub const ALARM: &str = "196616";
    /// 69121^MDC_OBS_WAVE_CTS^MDC
    pub const WAVEFORM: &str = "69121";
}

/// Observation-group service identifier names (OBR.4 component 2)
pub mod service_names {
    pub const WAVEFORM: &str = "MDC_OBS_WAVE_CTS";
    pub const MONITORING: &str = "monitoring of patient";
    pub const ALARM: &str = "MDC_EVT_ALARM";
}

/// Observation value type codes (OBX.2)
pub mod value_types {
    /// String
    pub const STRING: &str = "ST";
    /// Numeric
    pub const NUMERIC: &str = "NM";
    /// Numeric array
    pub const NUMERIC_ARRAY: &str = "NA";
    /// Numeric range
    pub const NUMERIC_RANGE: &str = "NR";
    /// Coded with exceptions
    pub const CODED: &str = "CWE";
}

/// Token identifying the sampling-period attribute of a waveform group
pub const SAMPLE_PERIOD_MARKER: &str = "TIME_PD_SAMP";

/// Coding-scheme label used when an observation identifier carries no scheme
pub const NO_SCHEME: &str = "NO_SCHEME";

/// Patient identifier placeholder some senders use for "unknown"
pub const PLACEHOLDER_MRN: &str = "I";

/// Name placeholders some monitors send for an unknown patient
pub const PLACEHOLDER_NAMES: &[&str] = &["\"\"", "U"];

// =============================================================================
// Missing-Value Sentinels
// =============================================================================

/// Missing string value
pub const MISSING_STR: &str = "";

/// Missing strict-integer value
pub const MISSING_INT: i64 = i64::MIN;

/// Missing float value
pub const MISSING_FLOAT: f64 = f64::NAN;

// =============================================================================
// Time Handling
// =============================================================================

/// Zone used to interpret timestamps sent without an explicit offset
pub const LOCAL_TIME_ZONE: Tz = chrono_tz::America::New_York;

/// Offset suffixes produced by drifting device clocks and their corrections
pub const OFFSET_CORRECTIONS: &[(&str, &str)] = &[
    ("-0359", "-0400"),
    ("-0401", "-0400"),
    ("-0459", "-0500"),
    ("-0501", "-0500"),
];

/// Timestamp layout with fractional seconds and offset
pub const HL7_DATETIME_FRACTION_OFFSET: &str = "%Y%m%d%H%M%S%.f%z";

/// Timestamp layout with offset
pub const HL7_DATETIME_OFFSET: &str = "%Y%m%d%H%M%S%z";

/// Local timestamp layout with fractional seconds
pub const HL7_DATETIME_FRACTION: &str = "%Y%m%d%H%M%S%.f";

/// Local timestamp layout
pub const HL7_DATETIME: &str = "%Y%m%d%H%M%S";

// =============================================================================
// Processing Configuration Defaults
// =============================================================================

/// Default extension of message files discovered under a directory
pub const DEFAULT_FILE_EXTENSION: &str = "hl7";

/// Number of individual error messages retained in parse statistics
pub const MAX_RECORDED_ERRORS: usize = 50;

/// Lookup tables compiled into the crate
pub const DEFAULT_LOCATION_TABLES_JSON: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/data/bed_location_mappings.json"
));

// =============================================================================
// Channel Types
// =============================================================================

/// Channel type for attributes of monitoring and alarm groups with no mapping
pub const DEFAULT_CHANNEL_TYPE: &str = "other";

/// Channel type for waveform channels with no mapping
pub const DEFAULT_WAVEFORM_CHANNEL_TYPE: &str = "other_waveform";

/// Map an observation name to a coarse channel type
pub fn channel_type(channel: &str) -> Option<&'static str> {
    let channel_type = match channel {
        "MDC_ECG_LEAD_I" | "MDC_ECG_LEAD_II" | "MDC_ECG_LEAD_III" | "MDC_ECG_LEAD_AVR"
        | "MDC_ECG_LEAD_AVL" | "MDC_ECG_LEAD_AVF" | "MDC_ECG_LEAD_V" | "MDC_ECG_LEAD_V1"
        | "MDC_ECG_LEAD_V2" | "MDC_ECG_LEAD_V3" | "MDC_ECG_LEAD_V4" | "MDC_ECG_LEAD_V5"
        | "MDC_ECG_LEAD_V6" => "ecg",
        "MDC_PRESS_BLD_ART" | "MDC_PRESS_BLD_ART_ABP" | "MDC_PRESS_BLD_ART_FEMORAL" => "abp",
        "MDC_PRESS_BLD_VEN_CENT" => "cvp",
        "MDC_PRESS_BLD_ART_PULM" => "pap",
        "MDC_PULS_OXIM_PLETH" => "pleth",
        "MDC_IMPED_TTHOR" | "MDC_RESP" | "MDC_AWAY_FLOW" => "resp",
        "MDC_AWAY_CO2" | "MDC_CONC_AWAY_CO2" => "co2",
        "MDC_PRESS_INTRA_CRAN" => "icp",
        "MDC_ECG_HEART_RATE" | "MDC_PULS_RATE" => "heart_rate",
        "MDC_PULS_OXIM_SAT_O2" => "spo2",
        "MDC_PRESS_CUFF_SYS" | "MDC_PRESS_CUFF_DIA" | "MDC_PRESS_CUFF_MEAN" => "nibp",
        "MDC_TEMP" | "MDC_TEMP_BLD" | "MDC_TEMP_SKIN" => "temperature",
        "MDC_RESP_RATE" | "MDC_AWAY_RESP_RATE" => "resp_rate",
        _ => return None,
    };
    Some(channel_type)
}

// =============================================================================
// Observation-Derived Patient Identity
// =============================================================================

/// Observation codes that carry patient identity for one device family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityCodes {
    pub mrn: &'static str,
    pub visit: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    /// Combined "last^first^..." name
    pub name: &'static str,
}

/// Length of the OBR.21 source prefix that selects a device family
pub const IDENTITY_SOURCE_PREFIX_LEN: usize = 9;

/// Identity codes used when the source family is not listed
pub const DEFAULT_IDENTITY_CODES: IdentityCodes = IdentityCodes {
    mrn: "CAPSULE:3426",
    visit: "CAPSULE:9569",
    first_name: "MDC:67933",
    last_name: "MDC:67932",
    name: "",
};

/// Identity codes by OBR.21 source prefix
pub fn identity_codes(source: &str) -> IdentityCodes {
    let prefix: String = source.chars().take(IDENTITY_SOURCE_PREFIX_LEN).collect();
    match prefix.as_str() {
        "GECaresca" => IdentityCodes {
            mrn: "CAPSULE:50101",
            visit: "CAPSULE:50113",
            first_name: "",
            last_name: "",
            name: "CAPSULE:50102",
        },
        "GEUnityIS" => IdentityCodes {
            mrn: "CAPSULE:1929",
            visit: "",
            first_name: "CAPSULE:2901",
            last_name: "CAPSULE:3185",
            name: "",
        },
        "PhillipsI" | "PhilipsL_" => IdentityCodes {
            mrn: "CAPSULE:1929",
            visit: "CAPSULE:6544",
            first_name: "CAPSULE:8338",
            last_name: "CAPSULE:8340",
            name: "CAPSULE:1930",
        },
        _ => DEFAULT_IDENTITY_CODES,
    }
}
