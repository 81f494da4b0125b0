//! Serialization round-trip tests for the wire-facing protocol types.

use chrono::Utc;
use inq_protocol::{
    Depth, InvestigateRequest, InvestigateResponse, RecentReport, Run, RunStatus, SessionEvent,
    SessionEventType, StageSpec,
};
use uuid::Uuid;

#[test]
fn run_round_trips_through_json() {
    let run = Run {
        id: Uuid::new_v4(),
        topic: "web scraping MCP tool".to_string(),
        depth: Depth::Standard,
        session_id: "1a2b3c4d".to_string(),
        started_at: Utc::now(),
        completed_at: None,
        status: RunStatus::Running,
    };

    let json = serde_json::to_string(&run).unwrap();
    assert!(json.contains("\"RUNNING\""));

    let back: Run = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, run.id);
    assert_eq!(back.status, RunStatus::Running);
    assert!(back.completed_at.is_none());
}

#[test]
fn stage_spec_preserves_dependency_order() {
    let spec = StageSpec {
        name: "documentation".to_string(),
        role: "Technical Writer".to_string(),
        expected_output: "A final report in markdown".to_string(),
        dependencies: vec![
            "research".to_string(),
            "technical-analysis".to_string(),
            "architecture".to_string(),
        ],
    };

    let json = serde_json::to_string(&spec).unwrap();
    let back: StageSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back.dependencies, spec.dependencies);
}

#[test]
fn session_event_metadata_survives_round_trip() {
    let mut metadata = serde_json::Map::new();
    metadata.insert("from_stage".to_string(), serde_json::json!("research"));
    metadata.insert(
        "to_stage".to_string(),
        serde_json::json!("technical-analysis"),
    );
    metadata.insert("data_length".to_string(), serde_json::json!(480));

    let event = SessionEvent {
        timestamp: Utc::now(),
        session_id: "deadbeef".to_string(),
        event_type: SessionEventType::StageTransition,
        message: "Transitioning from research to technical-analysis".to_string(),
        metadata,
    };

    let json = serde_json::to_string_pretty(&event).unwrap();
    let back: SessionEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
    assert_eq!(back.metadata["data_length"], serde_json::json!(480));
}

#[test]
fn investigate_request_carries_depth_verbatim() {
    // Depth validation happens at the orchestration layer, not in serde
    let request =
        serde_json::from_str::<InvestigateRequest>(r#"{"topic":"mcp","depth":"exhaustive"}"#)
            .unwrap();
    assert_eq!(request.depth, "exhaustive");
    assert!(request.depth.parse::<Depth>().is_err());
}

#[test]
fn investigate_response_wire_fields() {
    let now = Utc::now();
    let response = InvestigateResponse {
        report: "# Report".to_string(),
        topic: "mcp".to_string(),
        depth: Depth::Quick,
        run_id: Uuid::new_v4(),
        started_at: now,
        completed_at: now,
        duration_seconds: 12.5,
        status: RunStatus::Completed,
    };

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["depth"], "quick");
    assert_eq!(value["status"], "COMPLETED");
    assert_eq!(value["duration_seconds"], 12.5);
}

#[test]
fn recent_report_round_trips() {
    let meta = RecentReport {
        topic: "web scraping MCP tool".to_string(),
        filename: "investigation_web_scraping_MCP_tool_20250101_120000.md".to_string(),
        timestamp: Utc::now(),
        size_kb: 4.2,
    };

    let json = serde_json::to_string(&meta).unwrap();
    let back: RecentReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, meta);
}
