//! Patient identity extraction
//!
//! The patient-identity segment is the primary source. Vitals messages also
//! carry identity inside observation values, keyed by device-family codes.

use super::observation::name_and_code;
use super::values::{list_elements, value_text};
use crate::app::models::{ObservationGroup, ObservedIdentity, PatientIdentity, Segment};
use crate::constants::{PLACEHOLDER_MRN, PLACEHOLDER_NAMES, identity_codes};
use crate::{Error, Result};
use tracing::{debug, warn};

const PID_IDENTIFIER: usize = 3;
const PID_NAME: usize = 5;
const PID_ACCOUNT: usize = 18;
const PV1_VISIT: usize = 19;
const OBR_START: usize = 7;
const OBR_SOURCE: usize = 21;
const OBX_VALUE: usize = 5;

/// Identity from the patient-identity segment, falling back to the visit
/// segment's visit number when the account number is empty
pub fn extract_patient(patient: &Segment, visit: &Segment) -> Result<PatientIdentity> {
    let separators = &patient.separators;

    let identifier = patient.typed(PID_IDENTIFIER)?;
    let mrn = match list_elements(&identifier, separators) {
        Some(parts) if parts.len() == 1 || parts.len() == 5 => parts[0].clone(),
        Some(parts) => {
            return Err(Error::unsupported_conversion(
                value_text(&identifier, separators),
                "patient identifier",
                format!("expected 1 or 5 components, found {}", parts.len()),
            ));
        }
        None => {
            let text = identifier.to_text();
            if text == PLACEHOLDER_MRN { String::new() } else { text }
        }
    };

    let name = patient.typed(PID_NAME)?;
    let (last_name, first_name) = match list_elements(&name, separators) {
        Some(parts) => match parts.len() {
            1 => (parts[0].clone(), String::new()),
            2 | 7 => (parts[0].clone(), parts[1].clone()),
            n => {
                return Err(Error::unsupported_conversion(
                    value_text(&name, separators),
                    "patient name",
                    format!("expected 1, 2 or 7 components, found {}", n),
                ));
            }
        },
        None => (name.to_text(), String::new()),
    };

    let account = patient.typed(PID_ACCOUNT)?;
    let mut visit_id = match list_elements(&account, separators) {
        Some(parts) if parts.len() == 1 || parts.len() == 5 => parts[0].clone(),
        Some(parts) => {
            warn!(
                "Account number '{}' has {} components, treating as missing",
                value_text(&account, separators),
                parts.len()
            );
            String::new()
        }
        None => account.to_text(),
    };

    if visit_id.is_empty() {
        visit_id = visit.typed_text(PV1_VISIT)?;
    }

    Ok(PatientIdentity {
        mrn,
        visit_id,
        first_name,
        last_name,
        middle_initial: String::new(),
    })
}

/// Identity carried by the observations of a vitals group
///
/// The observation codes to look for depend on the sending device family
/// (OBR.21). Names are first-wins, the record number is last-wins.
pub fn observed_identity(group: &ObservationGroup) -> Result<ObservedIdentity> {
    let source = group.group.typed_text(OBR_SOURCE)?;
    let start_t = group.group.typed(OBR_START)?.as_timestamp();
    let codes = identity_codes(&source);
    let separators = &group.group.separators;

    let matches = |code: &str, wanted: &str| !wanted.is_empty() && code == wanted;
    let mut identity = PatientIdentity::default();

    for observation in &group.observations {
        let (_, code) = name_and_code(observation)?;
        let data = value_text(&observation.typed(OBX_VALUE)?, separators);

        if matches(&code, codes.first_name) {
            if identity.first_name.is_empty() {
                identity.first_name = data;
            }
        } else if matches(&code, codes.last_name) {
            if identity.last_name.is_empty() {
                identity.last_name = data;
            }
        } else if matches(&code, codes.name) {
            let mut tokens = data.split(separators.component);
            let last = tokens.next().unwrap_or_default();
            let first = tokens.next().unwrap_or_default();
            if identity.last_name.is_empty() {
                identity.last_name = last.to_string();
            }
            if identity.first_name.is_empty() {
                identity.first_name = first.to_string();
            }
        } else if matches(&code, codes.mrn) {
            identity.mrn = data;
        } else if matches(&code, codes.visit) && identity.visit_id.is_empty() {
            identity.visit_id = data;
        }

        for name in [&mut identity.first_name, &mut identity.last_name] {
            if PLACEHOLDER_NAMES.contains(&name.as_str()) {
                name.clear();
            }
        }
    }

    debug!(
        "Observed identity from '{}': mrn '{}', visit '{}'",
        source, identity.mrn, identity.visit_id
    );

    Ok(ObservedIdentity { identity, start_t })
}
