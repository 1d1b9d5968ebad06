//! Location canonicalization
//!
//! Patient locations arrive in half a dozen source-system encodings. The raw
//! field's shape selects the encoding, the encoding's rules produce a raw
//! (hospital, unit, bed) triple, and static lookup tables turn that triple
//! into a canonical [`CanonicalLocation`].
//!
//! ## Architecture
//!
//! - [`tables`] - Lookup tables loaded once and shared read-only
//! - [`encodings`] - Shape dispatch and per-encoding field rules
//! - [`wildcard`] - Bed-id rewriting (wildcards, room suffixes)
//! - [`canonical`] - Table lookups that resolve the raw triple
//!
//! ## Usage
//!
//! ```rust
//! use hl7_processor::app::models::{FieldValue, SeparatorSet};
//! use hl7_processor::app::services::location::LocationTables;
//!
//! let tables = LocationTables::embedded().unwrap();
//! let location = tables
//!     .canonicalize(&FieldValue::from("EUH-4TN-T434"), &SeparatorSet::default())
//!     .unwrap();
//! assert_eq!(location.bed, "T434-01");
//! ```
//!
//! [`CanonicalLocation`]: crate::app::models::CanonicalLocation

pub mod canonical;
pub mod encodings;
pub mod tables;
pub mod wildcard;

#[cfg(test)]
pub mod tests;

pub use encodings::RawLocation;
pub use tables::LocationTables;
pub use wildcard::{bed_wildcard, canonicalize_bed};
