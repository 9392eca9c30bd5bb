#![allow(clippy::unwrap_used, clippy::expect_used)]

use evplan_core::errors::{ExError, ExErrorKind};
use evplan_core::logging_facility::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND,
    FIELD_RECORD_ID,
};
use evplan_core::logging_facility::test_capture::init_test_capture;
use evplan_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, kind = "event", record_id = 7);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event(), Some(EVENT_START));
    assert_eq!(events[0].kind(), Some("event"));
    assert_eq!(events[0].field(FIELD_RECORD_ID), Some("7"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42, found = false);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].event(), Some(EVENT_END));
    assert_eq!(events[0].field(FIELD_DURATION_MS), Some("42"));
    assert_eq!(events[0].field("found"), Some("false"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = ExError::new(ExErrorKind::ConstraintViolation).with_message("UNIQUE failed");
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.lifecycle(op_name, EVENT_END_ERROR);
    assert_eq!(events.len(), 1, "Should have exactly one error event");
    assert_eq!(events[0].level, tracing::Level::ERROR);
    assert_eq!(events[0].field(FIELD_ERR_CODE), Some("ERR_CONSTRAINT_VIOLATION"));
    assert_eq!(events[0].field(FIELD_ERR_KIND), Some("ConstraintViolation"));
}

#[test]
fn test_single_start_and_end_per_operation() {
    let capture = init_test_capture();
    let op_name = "test_boundary_unique_4";

    log_op_start!(op_name, record_id = 1);
    log_op_end!(op_name, duration_ms = 1);

    let starts = capture.lifecycle(op_name, EVENT_START).len();
    let ends = capture.lifecycle(op_name, EVENT_END).len();
    assert_eq!((starts, ends), (1, 1));
}
