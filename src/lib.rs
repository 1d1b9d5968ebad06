//! HL7 Processor Library
//!
//! A Rust library for turning bedside-monitor and admission HL7 v2 feeds into
//! typed, queryable records.
//!
//! This library provides tools for:
//! - Tokenizing messages using each message's own declared separators
//! - Coercing field positions to semantic types with per-type missing sentinels
//! - Assembling the flat segment list into a per-message tree
//! - Classifying messages into waveform, alarm, vitals and admission records
//! - Canonicalizing hospital-specific bed encodings into (hospital, unit, bed)
//! - Batch parsing of message files with per-message failure isolation

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod assembler;
        pub mod batch;
        pub mod classifier;
        pub mod location;
        pub mod parser;
        pub mod tokenizer;
        pub mod type_schema;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    CanonicalLocation, FieldValue, MessageTree, RecordKind, Segment, Signal, TypedRecord,
};
pub use app::services::parser::Hl7Parser;
pub use config::Config;

/// Result type alias for the HL7 processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for HL7 parsing operations
///
/// Every parsing error is scoped to a single message; batch callers count
/// and log them and continue with the next message.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Structural violation: missing header, bad separator declaration
    #[error("Malformed message: {message}")]
    MalformedMessage { message: String },

    /// Header, patient-identity or visit segment absent
    #[error("Missing required segment(s): {}", segments.join(", "))]
    MissingRequiredSegment { segments: Vec<String> },

    /// Observation-group service identifier not recognized
    #[error("Unknown observation type: {code}")]
    UnknownObservationType { code: String },

    /// Message type in the header not recognized
    #[error("Unknown message profile: {profile}")]
    UnknownMessageProfile { profile: String },

    /// Location field shape is not one of the known encodings
    #[error("Unrecognized location format: {location}")]
    UnrecognizedLocationFormat { location: String },

    /// Raw field shape or text incompatible with its semantic type
    #[error("Unsupported conversion of '{value}' to {target}: {reason}")]
    UnsupportedConversion {
        value: String,
        target: String,
        reason: String,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration or lookup table error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Row serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a malformed message error
    pub fn malformed_message(message: impl Into<String>) -> Self {
        Self::MalformedMessage {
            message: message.into(),
        }
    }

    /// Create a missing required segment error
    pub fn missing_required_segment(segments: Vec<String>) -> Self {
        Self::MissingRequiredSegment { segments }
    }

    /// Create an unknown observation type error
    pub fn unknown_observation_type(code: impl Into<String>) -> Self {
        Self::UnknownObservationType { code: code.into() }
    }

    /// Create an unknown message profile error
    pub fn unknown_message_profile(profile: impl Into<String>) -> Self {
        Self::UnknownMessageProfile {
            profile: profile.into(),
        }
    }

    /// Create an unrecognized location format error
    pub fn unrecognized_location_format(location: impl Into<String>) -> Self {
        Self::UnrecognizedLocationFormat {
            location: location.into(),
        }
    }

    /// Create an unsupported conversion error
    pub fn unsupported_conversion(
        value: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnsupportedConversion {
            value: value.into(),
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Short stable label used when counting failures by kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedMessage { .. } => "malformed_message",
            Self::MissingRequiredSegment { .. } => "missing_required_segment",
            Self::UnknownObservationType { .. } => "unknown_observation_type",
            Self::UnknownMessageProfile { .. } => "unknown_message_profile",
            Self::UnrecognizedLocationFormat { .. } => "unrecognized_location_format",
            Self::UnsupportedConversion { .. } => "unsupported_conversion",
            Self::Io { .. } => "io",
            Self::Configuration { .. } => "configuration",
            Self::Serialization { .. } => "serialization",
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_stable() {
        assert_eq!(
            Error::malformed_message("x").kind(),
            "malformed_message"
        );
        assert_eq!(
            Error::missing_required_segment(vec!["PID".to_string()]).kind(),
            "missing_required_segment"
        );
        assert_eq!(
            Error::unrecognized_location_format("a^b^c").kind(),
            "unrecognized_location_format"
        );
    }

    #[test]
    fn test_missing_segment_message_lists_all() {
        let err = Error::missing_required_segment(vec!["PID".to_string(), "PV1".to_string()]);
        assert_eq!(err.to_string(), "Missing required segment(s): PID, PV1");
    }
}
