//! End-to-end tests for the investigation facade.
//!
//! These exercise the whole orchestration path: validation, run lifecycle,
//! pipeline execution, report persistence, and session export.

mod common;

use std::sync::Arc;

use common::assertions::*;
use common::fixtures::*;
use inq_core::executor::MockExecutor;
use inq_core::investigate::{InvestigateError, Investigator};
use inq_core::state::RunRegistry;
use inq_protocol::RunStatus;

#[tokio::test]
async fn test_successful_investigation_produces_one_report() {
    let workspace = test_workspace();
    let executor = MockExecutor::success().with_response("documentation", "# MCP Report\n\nBody");
    let investigator = Investigator::new(test_config(&workspace), Arc::new(executor));

    let result = investigator
        .investigate("mcp servers", "comprehensive")
        .await
        .unwrap();

    assert_eq!(result.run.status, RunStatus::Completed);
    assert_eq!(result.report, "# MCP Report\n\nBody");

    // Exactly one report artifact, named after the topic
    let reports = report_files(&workspace);
    assert_eq!(reports.len(), 1);
    assert!(reports[0].starts_with("investigation_mcp_servers_"));
    assert!(reports[0].ends_with(".md"));

    // Session trail exported: one .log and one _events.json
    let sessions = session_files(&workspace);
    assert_eq!(sessions.len(), 2);
    assert!(sessions.iter().any(|f| f.ends_with("_events.json")));
    assert!(sessions.iter().any(|f| f.ends_with(".log")));
}

#[tokio::test]
async fn test_session_trail_brackets_the_run() {
    let workspace = test_workspace();
    let investigator = Investigator::new(
        test_config(&workspace),
        Arc::new(MockExecutor::success()),
    );

    let result = investigator.investigate("mcp", "standard").await.unwrap();

    let events_file = workspace
        .path()
        .join("logs")
        .join(format!("session_{}_events.json", result.run.session_id));
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(events_file).unwrap()).unwrap();

    let events: Vec<inq_protocol::SessionEvent> =
        serde_json::from_value(json["events"].clone()).unwrap();

    assert_run_brackets(&events);
    assert_run_outcome(&events, true);
    assert_single_session(&events);

    // All four stages appear in the trail
    assert_eq!(
        started_stages(&events),
        vec![
            "research",
            "technical-analysis",
            "architecture",
            "documentation"
        ]
    );
}

#[tokio::test]
async fn test_failed_investigation_leaves_failure_trail() {
    let workspace = test_workspace();
    let executor = MockExecutor::success().with_failure_on("technical-analysis");
    let investigator = Investigator::new(test_config(&workspace), Arc::new(executor));

    let err = investigator.investigate("mcp", "standard").await.unwrap_err();
    assert!(matches!(err, InvestigateError::StageExecutionFailure(_)));

    // No report artifact
    assert!(report_files(&workspace).is_empty());

    // But the session trail was still exported, ending in failure
    let sessions = session_files(&workspace);
    let events_file = sessions
        .iter()
        .find(|f| f.ends_with("_events.json"))
        .expect("no events export for failed run");
    let json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(workspace.path().join("logs").join(events_file)).unwrap(),
    )
    .unwrap();
    let events: Vec<inq_protocol::SessionEvent> =
        serde_json::from_value(json["events"].clone()).unwrap();

    assert_run_brackets(&events);
    assert_run_outcome(&events, false);
}

#[tokio::test]
async fn test_invalid_input_leaves_no_artifacts() {
    let workspace = test_workspace();
    let investigator = Investigator::new(
        test_config(&workspace),
        Arc::new(MockExecutor::success()),
    );

    let err = investigator.investigate("", "standard").await.unwrap_err();
    assert!(matches!(err, InvestigateError::InvalidArgument(_)));

    let err = investigator.investigate("mcp", "ultra").await.unwrap_err();
    assert!(matches!(err, InvestigateError::InvalidArgument(_)));

    assert!(report_files(&workspace).is_empty());
    assert!(session_files(&workspace).is_empty());
}

#[tokio::test]
async fn test_topic_sanitized_into_filename() {
    let workspace = test_workspace();
    let investigator = Investigator::new(
        test_config(&workspace),
        Arc::new(MockExecutor::success()),
    );

    investigator
        .investigate("web scraping: MCP tool!", "quick")
        .await
        .unwrap();

    let reports = report_files(&workspace);
    assert_eq!(reports.len(), 1);
    assert!(reports[0].starts_with("investigation_web_scraping_MCP_tool_"));
}

#[tokio::test]
async fn test_registry_observes_full_lifecycle() {
    let workspace = test_workspace();
    let registry = RunRegistry::new();
    let investigator = Investigator::new(
        test_config(&workspace),
        Arc::new(MockExecutor::success()),
    )
    .with_registry(registry.clone());

    let result = investigator.investigate("mcp", "quick").await.unwrap();

    let progress = registry.get(result.run.id).await.unwrap();
    assert_eq!(progress.topic, "mcp");
    assert_eq!(progress.status, RunStatus::Completed);
    assert_eq!(progress.phase, "finished");
    assert!(progress.message.contains("investigation_mcp_"));
}

#[tokio::test]
async fn test_concurrent_runs_get_distinct_sessions_and_reports() {
    let workspace = test_workspace();
    let config = test_config(&workspace);
    let investigator = Arc::new(Investigator::new(
        config,
        Arc::new(MockExecutor::success()),
    ));

    let a = {
        let inv = Arc::clone(&investigator);
        tokio::spawn(async move { inv.investigate("mcp", "quick").await })
    };
    let b = {
        let inv = Arc::clone(&investigator);
        tokio::spawn(async move { inv.investigate("mcp", "quick").await })
    };

    let first = a.await.unwrap().unwrap();
    let second = b.await.unwrap().unwrap();

    assert_ne!(first.run.id, second.run.id);
    assert_ne!(first.run.session_id, second.run.session_id);

    // Two event exports, one per session
    let exports = session_files(&workspace)
        .into_iter()
        .filter(|f| f.ends_with("_events.json"))
        .count();
    assert_eq!(exports, 2);
}

#[tokio::test]
async fn test_run_start_event_names_topic_and_depth() {
    let workspace = test_workspace();
    let investigator = Investigator::new(
        test_config(&workspace),
        Arc::new(MockExecutor::success()),
    );

    let result = investigator.investigate("rust async", "quick").await.unwrap();

    let events_file = workspace
        .path()
        .join("logs")
        .join(format!("session_{}_events.json", result.run.session_id));
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(events_file).unwrap()).unwrap();

    let first = &json["events"][0];
    assert_eq!(first["event_type"], "run_start");
    assert_eq!(first["metadata"]["topic"], "rust async");
    assert_eq!(first["metadata"]["depth"], "quick");
}
