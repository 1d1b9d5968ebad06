//! Hierarchical message assembly
//!
//! Groups a message's flat segment list into a [`MessageTree`] in one ordered
//! pass. Observation segments attach to the most recent observation group;
//! segment kinds the tree has no slot for are dropped.

use crate::app::models::{MessageTree, ObservationGroup, Segment, SegmentKind};
use crate::constants::segments;
use crate::{Error, Result};
use std::collections::BTreeSet;
use tracing::trace;

/// Assemble the segments of one message into a tree
///
/// `kinds` is the set of upper-cased labels present, as produced by the
/// tokenizer. Header, patient-identity and visit segments are required; when
/// one occurs more than once the last occurrence is kept.
pub fn assemble(segments: Vec<Segment>, kinds: &BTreeSet<String>) -> Result<MessageTree> {
    let missing: Vec<String> = segments::REQUIRED
        .iter()
        .filter(|label| !kinds.contains(**label))
        .map(|label| label.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::missing_required_segment(missing));
    }

    let mut header = None;
    let mut patient = None;
    let mut visit = None;
    let mut event = None;
    let mut visit_extension = None;
    let mut groups: Vec<ObservationGroup> = Vec::new();
    let mut diagnoses = Vec::new();

    for segment in segments {
        match segment.kind {
            SegmentKind::Header => header = Some(segment),
            SegmentKind::PatientIdentity => patient = Some(segment),
            SegmentKind::Visit => visit = Some(segment),
            SegmentKind::Event => event = Some(segment),
            SegmentKind::VisitExtension => visit_extension = Some(segment),
            SegmentKind::Diagnosis => diagnoses.push(segment),
            SegmentKind::ObservationGroup => groups.push(ObservationGroup {
                group: segment,
                observations: Vec::new(),
            }),
            SegmentKind::Observation => match groups.last_mut() {
                Some(group) => group.observations.push(segment),
                None => {
                    return Err(Error::malformed_message(format!(
                        "{} segment before any {} segment",
                        segments::OBX,
                        segments::OBR
                    )));
                }
            },
            SegmentKind::Other(ref label) => {
                trace!("Dropping {} segment", label);
            }
        }
    }

    match (header, patient, visit) {
        (Some(header), Some(patient), Some(visit)) => Ok(MessageTree {
            header,
            patient,
            visit,
            groups,
            event,
            visit_extension,
            diagnoses,
        }),
        (header, patient, visit) => {
            let missing = [
                (segments::MSH, header.is_none()),
                (segments::PID, patient.is_none()),
                (segments::PV1, visit.is_none()),
            ]
            .iter()
            .filter(|(_, absent)| *absent)
            .map(|(label, _)| label.to_string())
            .collect();
            Err(Error::missing_required_segment(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::tokenizer::tokenize;

    const HEADER: &str = "MSH|^~\\&|DATACAPTOR||||20250228155959.885-0500||ORU^R01|1|P|2.6";

    fn assemble_text(segments: &[&str]) -> Result<MessageTree> {
        let tokenized = tokenize(&segments.join("\r"))?;
        assemble(tokenized.segments, &tokenized.kinds)
    }

    #[test]
    fn test_observations_attach_to_latest_group() {
        let tree = assemble_text(&[
            HEADER,
            "PID|||1",
            "PV1||I|X",
            "OBR|1",
            "OBX|1|ST|A||a",
            "OBX|2|ST|B||b",
            "OBR|2",
            "OBX|1|ST|C||c",
        ])
        .unwrap();

        assert_eq!(tree.groups.len(), 2);
        assert_eq!(tree.groups[0].observations.len(), 2);
        assert_eq!(tree.groups[1].observations.len(), 1);
        assert_eq!(tree.groups[1].group.scalar(1), "2");
        assert_eq!(tree.groups[1].observations[0].scalar(3), "C");
    }

    #[test]
    fn test_missing_required_segments_are_all_reported() {
        let err = assemble_text(&[HEADER, "OBR|1"]).unwrap_err();
        match err {
            Error::MissingRequiredSegment { segments } => {
                assert_eq!(segments, vec!["PID".to_string(), "PV1".to_string()]);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_secondary_segments_and_unknown_kinds() {
        let tree = assemble_text(&[
            HEADER,
            "EVN|A01|20240101000000",
            "PID|||1",
            "PV1||I|X",
            "PV2|||reason",
            "DG1|1||I10",
            "DG1|2||E11",
            "ZPD|local",
            "AL1|1",
        ])
        .unwrap();

        assert!(tree.event.is_some());
        assert!(tree.visit_extension.is_some());
        assert_eq!(tree.diagnoses.len(), 2);
        assert!(tree.groups.is_empty());
    }

    #[test]
    fn test_repeated_top_level_segment_keeps_last() {
        let tree = assemble_text(&[HEADER, "PID|||1", "PID|||2", "PV1||I|X"]).unwrap();
        assert_eq!(tree.patient.scalar(3), "2");
    }

    #[test]
    fn test_observation_before_group_is_malformed() {
        let err = assemble_text(&[HEADER, "PID|||1", "PV1||I|X", "OBX|1|ST|A||a"]).unwrap_err();
        assert_eq!(err.kind(), "malformed_message");
    }

    #[test]
    fn test_outline_lists_nesting() {
        let tree = assemble_text(&[HEADER, "PID|||1", "PV1||I|X", "OBR|1", "OBX|1|ST|A||a"])
            .unwrap();
        assert_eq!(tree.outline(), "MSH\n  PID\n  PV1\n  OBR 1\n    OBX 1");
    }
}
