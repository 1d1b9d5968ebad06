//! Message classification and signal extraction
//!
//! Turns an assembled [`MessageTree`] into a [`TypedRecord`]. Dispatch is two
//! levels deep: the header's message type selects observation results or
//! admissions, and for observation results the first group's service code
//! selects vitals, alarm or waveform.
//!
//! ## Architecture
//!
//! - [`dispatch`] - Dispatch and record construction
//! - [`identity`] - Patient identity from PID/PV1 and from vitals observations
//! - [`observation`] - Per-observation attribute fields (name, channel, unit)
//! - [`signal`] - Observation groups as signals, waveform sample metrics
//! - [`rows`] - Location assertions and per-channel row flattening
//! - [`values`] - Text views of typed values
//!
//! [`MessageTree`]: crate::app::models::MessageTree
//! [`TypedRecord`]: crate::app::models::TypedRecord

pub mod dispatch;
pub mod identity;
pub mod observation;
pub mod rows;
pub mod signal;
pub mod values;

#[cfg(test)]
pub mod tests;

pub use dispatch::{Classifier, record_kind};
pub use identity::{extract_patient, observed_identity};
pub use signal::build_signal;
