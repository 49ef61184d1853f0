use adp_cli::commands::cli::{OutputFormat, StatusArgs, TaskArgs};
use adp_cli::commands::task;
use adp_core::api::{AppConfig, Session};
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const EXECUTION_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

fn session(base_url: String) -> Session {
    let mut cfg = AppConfig::default();
    cfg.adp.base_url = base_url;
    cfg.adp.username = "alice".into();
    cfg.adp.password = "s3cret".into();
    adp_plugins::factory::build_session(&cfg).unwrap()
}

fn task_args(key: &str, set: &[&str]) -> TaskArgs {
    TaskArgs {
        key: key.to_string(),
        config: None,
        set: set.iter().map(|s| s.to_string()).collect(),
        call_timeout_ms: None,
        headers: vec!["X-Trace=cli".to_string()],
    }
}

#[tokio::test]
async fn run_prints_result_as_json() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("PUT", "/adp/rest/api/task/executeAdpTask")
        .match_header("X-Trace", "cli")
        .match_body(Matcher::PartialJson(json!({
            "taskType": "Query Engine",
            "taskConfiguration": {"adp_queryEngine_engineQuery": "rm_main:x"}
        })))
        .with_status(200)
        .with_body(
            json!({
                "executionId": EXECUTION_ID,
                "executionStatus": "SUCCESS",
                "executionMetaData": {
                    "adp_query_engine_aggregated_value": 12,
                    "adp_query_engine_documents_count": "3"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let out = task::handle_run(
        task_args("query_engine", &["adp_queryEngine_engineQuery=rm_main:x"]),
        &session(server.url()),
        OutputFormat::Json,
    )
    .await
    .unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["adp_query_engine_documents_count"], json!(3));
    m.assert_async().await;
}

#[tokio::test]
async fn failed_task_exits_with_task_code() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("PUT", "/adp/rest/api/task/executeAdpTask")
        .with_status(200)
        .with_body(
            json!({
                "executionId": EXECUTION_ID,
                "executionStatus": "FAILED",
                "errorMessage": "no such engine"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let err = task::handle_run(
        task_args("query_engine", &[]),
        &session(server.url()),
        OutputFormat::Text,
    )
    .await
    .unwrap_err();
    assert_eq!(err.exit_code(), 30);
    assert!(err.to_string().contains("no such engine"));
}

#[tokio::test]
async fn submit_then_status() {
    let mut server = Server::new_async().await;
    let _submit = server
        .mock("PUT", "/adp/rest/api/task/executeAdpTaskAsync")
        .with_status(200)
        .with_body(
            json!({"executionId": EXECUTION_ID, "executionStatus": "SUCCESS"}).to_string(),
        )
        .create_async()
        .await;
    let _status = server
        .mock("PUT", "/adp/rest/api/task/statusAndProgress")
        .match_body(Matcher::PartialJson(json!({
            "taskType": "Create OCR Job",
            "taskConfiguration": {"executionId": EXECUTION_ID}
        })))
        .with_status(200)
        .with_body(
            json!({
                "executionId": EXECUTION_ID,
                "executionStatus": "RUNNING",
                "progressCurrent": 1,
                "progressMax": 2
            })
            .to_string(),
        )
        .create_async()
        .await;

    let session = session(server.url());
    let id = task::handle_submit(
        task_args("create_ocr_job", &["adp_createOcrJob_engineName=engine-01"]),
        &session,
        OutputFormat::Text,
    )
    .await
    .unwrap();
    assert_eq!(id, EXECUTION_ID);

    let status = task::handle_status(
        StatusArgs {
            key: "create_ocr_job".to_string(),
            execution_id: id.parse().unwrap(),
        },
        &session,
        OutputFormat::Text,
    )
    .await
    .unwrap();
    assert_eq!(status, format!("{EXECUTION_ID}: RUNNING (50%)"));
}

#[tokio::test]
async fn unreachable_service_exits_with_transport_code() {
    let err = task::handle_run(
        task_args("start_application", &[]),
        &session("http://127.0.0.1:1".to_string()),
        OutputFormat::Text,
    )
    .await
    .unwrap_err();
    assert_eq!(err.exit_code(), 20);
}
