//! Integration tests for the subprocess-backed executor.
//!
//! These use small shell commands as stand-in agents, so they only run
//! where a POSIX shell is available (the same assumption the rest of the
//! suite makes about `cat` and `false`).

mod common;

use std::sync::Arc;

use common::fixtures::*;
use inq_core::config::ExecutorConfig;
use inq_core::executor::{
    collect_output, CommandExecutor, ExecutionRequest, ExecutorError, StageExecutor,
};
use inq_core::investigate::Investigator;
use inq_protocol::RunStatus;

fn shell_agent(script: &str) -> CommandExecutor {
    CommandExecutor::new(&ExecutorConfig {
        command: "sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        model: String::new(),
    })
}

fn request(stage: &str, prompt: &str) -> ExecutionRequest {
    ExecutionRequest {
        stage: stage.to_string(),
        role: "Agent".to_string(),
        prompt: prompt.to_string(),
        expected_output: "a report".to_string(),
        model: String::new(),
    }
}

#[tokio::test]
async fn test_shell_agent_output_is_collected() {
    let executor = shell_agent("cat >/dev/null; printf 'line one\\nline two\\n'");

    let stream = executor
        .execute(&request("research", "investigate"))
        .await
        .unwrap();
    let text = collect_output(stream, "research").await.unwrap();

    assert_eq!(text, "line one\nline two\n");
}

#[tokio::test]
async fn test_agent_sees_prompt_on_stdin() {
    // Echo stdin back so we can inspect what the agent received
    let executor = shell_agent("cat");

    let stream = executor
        .execute(&request("research", "TOPIC-MARKER prompt body"))
        .await
        .unwrap();
    let text = collect_output(stream, "research").await.unwrap();

    assert!(text.contains("TOPIC-MARKER prompt body"));
    assert!(text.contains("# Expected output"));
    assert!(text.contains("a report"));
}

#[tokio::test]
async fn test_large_prompt_is_streamed_without_blocking() {
    // `cat` echoes stdin straight back, so both pipes carry the full
    // prompt at once. Collection has to overlap the stdin write or the
    // two processes wedge each other once the pipe buffers fill.
    let executor = shell_agent("cat");
    let prompt = "x".repeat(1_048_576);

    let stream = executor
        .execute(&request("research", &prompt))
        .await
        .unwrap();
    let text = tokio::time::timeout(
        std::time::Duration::from_secs(10),
        collect_output(stream, "research"),
    )
    .await
    .expect("output collection stalled on a large prompt")
    .unwrap();

    assert!(text.contains(&prompt));
}

#[tokio::test]
async fn test_undecodable_output_fails_the_stage() {
    // Line reads surface invalid UTF-8 as an I/O error; that must fail
    // the stage rather than silently truncating its output.
    let executor = shell_agent("cat >/dev/null; printf 'ok\\n\\377\\376\\n'");

    let stream = executor
        .execute(&request("research", "investigate"))
        .await
        .unwrap();
    let err = collect_output(stream, "research").await.unwrap_err();
    assert!(matches!(err, ExecutorError::ExecutionFailed(_)));
}

#[tokio::test]
async fn test_full_investigation_through_subprocess_agent() {
    let workspace = test_workspace();
    let mut config = test_config(&workspace);
    config.executor = ExecutorConfig {
        command: "sh".to_string(),
        args: vec![
            "-c".to_string(),
            "cat >/dev/null; echo '# Stage output'".to_string(),
        ],
        model: String::new(),
    };

    let executor = CommandExecutor::new(&config.executor);
    let investigator = Investigator::new(config, Arc::new(executor));

    let result = investigator.investigate("mcp", "quick").await.unwrap();

    assert_eq!(result.run.status, RunStatus::Completed);
    assert_eq!(result.report, "# Stage output\n");
    assert_eq!(report_files(&workspace).len(), 1);
}

#[tokio::test]
async fn test_failing_agent_fails_the_investigation() {
    let workspace = test_workspace();
    let mut config = test_config(&workspace);
    config.executor = ExecutorConfig {
        command: "sh".to_string(),
        args: vec!["-c".to_string(), "cat >/dev/null; exit 3".to_string()],
        model: String::new(),
    };

    let executor = CommandExecutor::new(&config.executor);
    let investigator = Investigator::new(config, Arc::new(executor));

    investigator.investigate("mcp", "quick").await.unwrap_err();
    assert!(report_files(&workspace).is_empty());
}
