//! Custom assertion helpers over session event trails.

use inq_protocol::{SessionEvent, SessionEventType};

/// Names of stages that emitted a stage_start event, in order.
#[allow(dead_code)]
pub fn started_stages(events: &[SessionEvent]) -> Vec<String> {
    events
        .iter()
        .filter(|e| e.event_type == SessionEventType::StageStart)
        .map(|e| e.metadata["stage"].as_str().unwrap().to_string())
        .collect()
}

/// Assert the trail opens with run_start and closes with run_complete.
#[allow(dead_code)]
pub fn assert_run_brackets(events: &[SessionEvent]) {
    assert!(!events.is_empty(), "Event trail is empty");
    assert_eq!(
        events[0].event_type,
        SessionEventType::RunStart,
        "First event should be run_start, got: {:?}",
        events[0].event_type
    );
    assert_eq!(
        events.last().unwrap().event_type,
        SessionEventType::RunComplete,
        "Last event should be run_complete, got: {:?}",
        events.last().unwrap().event_type
    );
}

/// Assert the run_complete event carries the expected success flag.
#[allow(dead_code)]
pub fn assert_run_outcome(events: &[SessionEvent], success: bool) {
    let complete = events
        .iter()
        .find(|e| e.event_type == SessionEventType::RunComplete)
        .expect("no run_complete event in trail");
    assert_eq!(complete.metadata["success"], serde_json::json!(success));
}

/// Assert every event in the trail carries the same session id.
#[allow(dead_code)]
pub fn assert_single_session(events: &[SessionEvent]) {
    let Some(first) = events.first() else {
        panic!("Event trail is empty");
    };
    for event in events {
        assert_eq!(
            event.session_id, first.session_id,
            "Trail mixes session ids"
        );
    }
}
