#![allow(clippy::unwrap_used, clippy::expect_used)]

use menuver_core::errors::MenuError;
use menuver_core::logging_facility::init_test_capture;
use menuver_core::{log_op_end, log_op_error, log_op_start};
use menuver_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, account_id = "acct-log-1");

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field("account_id"), Some("acct-log-1"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = MenuError::HasChildren {
        node_id: "n1".to_string(),
        child_count: 2,
    };
    log_op_error!(op_name, &err, duration_ms = 10, node_id = "n1");

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(event.field("err_kind"), Some("HasChildren"));
    assert_eq!(event.field("err_code"), Some("ERR_HAS_CHILDREN"));
    assert_eq!(event.field("node_id"), Some("n1"));
}

#[test]
fn test_component_is_module_path() {
    let capture = init_test_capture();
    let op_name = "test_component_unique_4";

    log_op_start!(op_name);

    let events = capture.events_for_op(op_name);
    assert_eq!(events[0].field("component"), Some("logging_facility_tests"));
}
