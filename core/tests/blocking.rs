mod common;

use adp_core::api::*;
use common::{session, success, MockTransport, Reply, EXECUTION_ID};
use serde_json::json;

#[test]
fn blocking_session_runs_typed_tasks() {
    let mock = MockTransport::replying(success(json!({
        "adp_exportDocuments_searchResultSize": "42",
        "adp_exportDocuments_exportFileName": "export.csv",
        "adp_exportDocuments_exportPath": "/exports"
    })));
    let blocking = BlockingSession::new(session(&mock)).unwrap();

    let result = blocking
        .export_documents(ExportDocumentsTaskConfig::default(), &CallOptions::default())
        .unwrap();
    assert_eq!(result.adp_exportDocuments_searchResultSize, Some(42));
    assert_eq!(result.adp_exportDocuments_exportFileName.as_deref(), Some("export.csv"));
    assert_eq!(mock.last_call().endpoint, Endpoint::ExecuteSync);
}

#[test]
fn blocking_session_reports_failures() {
    let mock = MockTransport::new();
    let blocking = BlockingSession::new(session(&mock)).unwrap();
    let mut cfg = ExportDocumentsTaskConfig::default();
    let err = blocking
        .run_task("export", &mut cfg, &CallOptions::default())
        .unwrap_err();
    assert!(matches!(err, AdpError::UnknownTask(_)));
    assert!(mock.calls().is_empty());
}

#[test]
fn blocking_session_submits_async_tasks() {
    let mock = MockTransport::replying(json!({
        "executionId": EXECUTION_ID,
        "executionStatus": "SUCCESS"
    }));
    let blocking = BlockingSession::new(session(&mock)).unwrap();
    let id = blocking
        .create_ocr_job(CreateOcrJobTaskConfig::default(), &CallOptions::default())
        .unwrap();
    assert_eq!(id.to_string(), EXECUTION_ID);
    assert_eq!(mock.last_call().endpoint, Endpoint::ExecuteAsync);
}

#[test]
fn blocking_session_is_shared_across_threads() {
    let mock = MockTransport::new();
    for i in 0..4 {
        mock.push(Reply::Body(Some(success(json!({
            "adp_started_application_url": format!("http://h/{i}")
        })))));
    }
    let blocking = BlockingSession::new(session(&mock)).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    blocking.start_application(
                        StartApplicationTaskConfig::for_application("app-01"),
                        &CallOptions::default(),
                    )
                })
            })
            .collect();
        for handle in handles {
            let result = handle.join().unwrap().unwrap();
            assert!(result.adp_started_application_url.is_some());
        }
    });
    assert_eq!(mock.calls().len(), 4);
}
