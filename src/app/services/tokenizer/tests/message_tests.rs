//! Tests for message boundary detection

use crate::app::services::tokenizer::split_messages;

#[test]
fn test_split_on_all_blank_line_conventions() {
    let text = "MSH|a\r\nPID|1\r\n\r\nMSH|b\nPID|2\n\nMSH|c\r\nPID|3\r\n\nMSH|d";
    let messages = split_messages(text);
    assert_eq!(messages.len(), 4);
    assert!(messages[0].starts_with("MSH|a"));
    assert!(messages[1].starts_with("MSH|b"));
    assert!(messages[2].starts_with("MSH|c"));
    assert_eq!(messages[3], "MSH|d");
}

#[test]
fn test_single_carriage_returns_stay_inside_a_message() {
    let text = "MSH|a\rPID|1\rPV1|2\r";
    let messages = split_messages(text);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0], "MSH|a\nPID|1\nPV1|2\n");
}

#[test]
fn test_double_carriage_return_is_a_boundary() {
    let messages = split_messages("MSH|a\rPID|1\r\rMSH|b\rPID|2");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], "MSH|a\nPID|1");
    assert_eq!(messages[1], "MSH|b\nPID|2");
}

#[test]
fn test_extra_blank_lines_are_dropped() {
    let text = "\n\nMSH|a\n\n\n\nMSH|b\n\n  \n\n";
    let messages = split_messages(text);
    assert_eq!(messages, vec!["MSH|a".to_string(), "MSH|b".to_string()]);
}
