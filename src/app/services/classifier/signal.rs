//! Observation groups as signals

use super::observation::build_attribute;
use super::values::{list_elements, numeric_value, value_text};
use crate::Result;
use crate::app::models::{Attribute, AttributeMap, ObservationGroup, Segment, Signal, SignalType};
use crate::app::services::location::LocationTables;
use crate::constants::{SAMPLE_PERIOD_MARKER, value_types};
use tracing::{debug, error, warn};

const OBR_SOURCE_IDS: usize = 3;
const OBR_SERVICE: usize = 4;
const OBR_START: usize = 7;
const OBR_END: usize = 8;
const OBR_COLLECTOR: usize = 10;
const OBR_ENVIRONMENT: usize = 13;
const OBR_SOURCE_SYSTEM: usize = 21;

/// Service code and name from the universal service identifier (OBR.4)
///
/// A scalar identifier is all code and no name.
pub fn service_identifier(group: &Segment) -> Result<(String, String)> {
    let service = group.typed(OBR_SERVICE)?;
    Ok(match list_elements(&service, &group.separators) {
        Some(parts) => {
            let mut parts = parts.into_iter();
            let code = parts.next().unwrap_or_default();
            let name = parts.next().unwrap_or_default();
            (code, name)
        }
        None => (service.to_text(), String::new()),
    })
}

/// Build the signal for one observation group
///
/// Groups whose service name is not a known signal type keep their metadata
/// but carry no attributes.
pub fn build_signal(group: &ObservationGroup, tables: &LocationTables) -> Result<Signal> {
    let segment = &group.group;
    let separators = &segment.separators;

    let (code, name) = service_identifier(segment)?;
    let signal_type = SignalType::from_service_name(&name);

    let collector = value_text(&segment.typed(OBR_COLLECTOR)?, separators);
    let location = match segment.field(OBR_COLLECTOR) {
        Some(value) if !value.is_empty() => match tables.canonicalize(value, separators) {
            Ok(location) => Some(location),
            Err(e) => {
                debug!("Collector '{}' is not a location: {}", collector, e);
                None
            }
        },
        _ => None,
    };

    let mut attributes = AttributeMap::new();
    if let SignalType::Other(ref unknown) = signal_type {
        warn!(
            "Unknown signal type '{}' (service code '{}'), skipping {} observations",
            unknown,
            code,
            group.observations.len()
        );
    } else {
        for observation in &group.observations {
            let attribute = build_attribute(observation)?;
            if let Some(replaced) = attributes.insert(attribute) {
                warn!(
                    "Duplicate observation '{}' in {} group, later value replaces earlier",
                    replaced.name,
                    signal_type.as_str()
                );
            }
        }
    }

    Ok(Signal {
        signal_type,
        start_t: segment.typed(OBR_START)?.as_timestamp(),
        end_t: segment.typed(OBR_END)?.as_timestamp(),
        source: segment
            .typed(OBR_SOURCE_IDS)?
            .as_str_list()
            .map(<[String]>::to_vec)
            .unwrap_or_default(),
        source_system: segment.typed_text(OBR_SOURCE_SYSTEM)?,
        collector,
        environment: segment.typed_text(OBR_ENVIRONMENT)?,
        location,
        attributes,
        nsamples: None,
        sample_interval_ms: None,
    })
}

impl Signal {
    /// The numeric-array attribute (the last one when several are declared)
    pub fn waveform_channel(&self) -> Option<&Attribute> {
        self.attributes
            .iter()
            .filter(|a| a.value_type == value_types::NUMERIC_ARRAY)
            .last()
    }

    /// Sampling interval from the attribute named with the sample-period marker
    pub fn sample_period(&self) -> Option<f64> {
        self.attributes
            .iter()
            .filter(|a| a.value_type != value_types::NUMERIC_ARRAY)
            .filter(|a| a.name.contains(SAMPLE_PERIOD_MARKER))
            .last()
            .and_then(|a| numeric_value(&a.value))
    }

    /// Fill sample count and interval from the signal's attributes
    pub fn apply_waveform_metrics(&mut self) {
        let nsamples = self
            .waveform_channel()
            .map(|channel| channel.value.element_count())
            .unwrap_or(0);

        match nsamples {
            0 => error!(
                "Waveform signal starting {:?} has no samples",
                self.start_t
            ),
            1 => warn!(
                "Waveform signal starting {:?} has a single sample",
                self.start_t
            ),
            _ => {}
        }

        self.nsamples = Some(nsamples);
        self.sample_interval_ms = self.sample_period();
    }
}
