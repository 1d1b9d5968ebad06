use super::*;
use crate::Error;
use crate::app::models::{CanonicalLocation, RecordKind, SignalType};
use crate::app::services::classifier::record_kind;

#[test]
fn test_waveform_record_sample_count_and_duration() {
    let record = classify(&waveform_message(100)).unwrap();

    assert_eq!(record.kind, RecordKind::Waveform);
    assert_eq!(record.signals.len(), 1);

    let signal = &record.signals[0];
    assert_eq!(signal.signal_type, SignalType::Waveform);
    assert_eq!(signal.nsamples, Some(100));
    assert_eq!(signal.sample_interval_ms, Some(10.0));

    let duration = signal.end_t.unwrap() - signal.start_t.unwrap();
    assert_eq!(duration.num_milliseconds(), 999);

    assert_eq!(record.location, CanonicalLocation::new("EUH", "4TN", "T435-01"));
    assert!(record.location_error.is_none());
}

#[test]
fn test_header_summary() {
    let record = classify(&waveform_message(3)).unwrap();

    assert_eq!(record.header.sending_application, "DATACAPTOR");
    assert_eq!(record.header.control_id, "AWS_Data_0001");
    assert_eq!(record.header.message_type, "ORU^R01^ORU_R01");
    assert_eq!(
        record.header.profile,
        "IHE_PCD_ORU_R01^IHE PCD^1.3.6.1.4.1.19376.1.6.1.1.1^ISO"
    );
    assert!(record.header.time.is_some());
    assert_eq!(record.patient_class, "I");
    assert_eq!(record.raw_location, "EUH-4TN-T435");
}

#[test]
fn test_alarm_profile_is_message_type() {
    let record = classify(&alarm_message()).unwrap();
    assert_eq!(record.kind, RecordKind::Alarm);
    assert_eq!(record.header.profile, "ORU^R40^ORU_R40");
    assert_eq!(record.signals[0].signal_type, SignalType::Alarm);
    assert!(record.signals[0].nsamples.is_none());
}

#[test]
fn test_vitals_record_carries_observed_identity() {
    let record = classify(&vitals_message()).unwrap();
    assert_eq!(record.kind, RecordKind::Vitals);
    assert_eq!(record.signals[0].signal_type, SignalType::Monitoring);
    assert_eq!(record.signals[0].attributes.len(), 5);

    let observed = record.observed_identity.unwrap();
    assert_eq!(observed.identity.mrn, "MRN555");
    assert_eq!(observed.identity.last_name, "SMITH");
    assert_eq!(observed.identity.first_name, "JOHN");
    assert_eq!(observed.identity.visit_id, "V100");
    assert_eq!(observed.start_t, record.signals[0].start_t);
}

#[test]
fn test_admission_has_no_signals() {
    let record = classify(&admission_message()).unwrap();
    assert_eq!(record.kind, RecordKind::Admission);
    assert_eq!(record.kind.as_str(), "ADT");
    assert!(record.signals.is_empty());
    assert_eq!(record.header.profile, "ADT^A01");
    assert_eq!(record.patient.mrn, "MRN123");
}

#[test]
fn test_unknown_service_code_fails() {
    let mut lines = waveform_message(3);
    lines[3] = group("12345^SOMETHING^MDC", "X");
    let err = classify(&lines).unwrap_err();
    assert!(matches!(err, Error::UnknownObservationType { ref code } if code == "12345"));
}

#[test]
fn test_unknown_message_family_fails() {
    let lines = vec![header("ORM^O01"), patient(), visit("EUH-4TN-T435")];
    let err = classify(&lines).unwrap_err();
    assert_eq!(err.kind(), "unknown_message_profile");
}

#[test]
fn test_observation_result_without_groups_is_malformed() {
    let lines = vec![header("ORU^R01"), patient(), visit("EUH-4TN-T435")];
    let tree = tree(&lines).unwrap();
    assert_eq!(record_kind(&tree).unwrap_err().kind(), "malformed_message");
}

#[test]
fn test_unrecognized_location_degrades_unless_strict() {
    let mut lines = waveform_message(3);
    lines[2] = visit("A^B^C");

    let record = classify(&lines).unwrap();
    assert_eq!(record.location, CanonicalLocation::missing());
    assert!(record.location_error.unwrap().contains("A^B^C"));

    let strict = classifier().with_strict_location(true);
    let err = strict.classify(&tree(&lines).unwrap()).unwrap_err();
    assert_eq!(err.kind(), "unrecognized_location_format");
}

#[test]
fn test_unknown_signal_name_keeps_metadata_only() {
    let mut lines = waveform_message(3);
    lines.push(group("69121^MDC_SOMETHING_ELSE^MDC", "DEV2"));
    lines.push(observation("NM", "1^X^MDC", "5", ""));

    let record = classify(&lines).unwrap();
    let other = &record.signals[1];
    assert_eq!(
        other.signal_type,
        SignalType::Other("MDC_SOMETHING_ELSE".to_string())
    );
    assert!(other.attributes.is_empty());
    assert_eq!(other.source_system, "DEV2");
    assert_eq!(other.source, vec!["DC1".to_string(), "DATACAPTOR".to_string()]);
}

#[test]
fn test_duplicate_observation_name_replaces_earlier() {
    let mut lines = alarm_message();
    lines.push(observation("ST", "196650^MDC_EVT_ALARM_TEXT^MDC", "HR LOW", ""));

    let record = classify(&lines).unwrap();
    let attributes = &record.signals[0].attributes;
    assert_eq!(attributes.len(), 2);
    let text = attributes.get("MDC_EVT_ALARM_TEXT").unwrap();
    assert_eq!(text.value.as_str(), Some("HR LOW"));
    assert_eq!(attributes.iter().next().unwrap().name, "MDC_EVT_ALARM_TEXT");
}

#[test]
fn test_collector_location_is_canonicalized_when_recognized() {
    let mut lines = alarm_message();
    lines[3] = segment(
        "OBR",
        &[(1, "1"), (4, "196616^MDC_EVT_ALARM^MDC"), (10, "EUH-4TN-T435")],
    );
    let record = classify(&lines).unwrap();
    let signal = &record.signals[0];
    assert_eq!(signal.collector, "EUH-4TN-T435");
    assert_eq!(
        signal.location,
        Some(CanonicalLocation::new("EUH", "4TN", "T435-01"))
    );

    let record = classify(&alarm_message()).unwrap();
    assert!(record.signals[0].location.is_none());
}

#[test]
fn test_classification_is_deterministic() {
    let lines = vitals_message();
    assert_eq!(classify(&lines).unwrap(), classify(&lines).unwrap());
}
