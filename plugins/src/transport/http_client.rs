use std::time::Duration;

use adp_core::api::{
    AdpServiceConfig, AdpTransport, Endpoint, Headers, TaskRequest, TransportError,
    TransportErrorKind,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde_json::Value;

const BODY_PREVIEW_LIMIT: usize = 512;

fn from_reqwest(err: reqwest::Error, url: &str) -> TransportError {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_connect() {
        TransportErrorKind::Connect
    } else if err.is_request() || err.is_builder() {
        TransportErrorKind::Request
    } else if err.is_body() {
        TransportErrorKind::Body
    } else if err.is_decode() {
        TransportErrorKind::Decode
    } else {
        TransportErrorKind::Unknown
    };
    let status = err.status().map(|s| s.as_u16());
    TransportError::new(kind, err.to_string())
        .with_status(status)
        .with_url(url)
        .with_source(err)
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out = String::new();
    let mut truncated = false;
    for (idx, ch) in trimmed.chars().enumerate() {
        if idx >= BODY_PREVIEW_LIMIT {
            truncated = true;
            break;
        }
        out.push(ch);
    }

    if truncated {
        out.push_str("...");
    }

    out
}

/// Reads the body of a response. Non-2xx is an error; a 2xx body that is
/// empty, `null` or not JSON yields `None`.
async fn parse_json_response(
    resp: reqwest::Response,
    debug: bool,
) -> Result<Option<Value>, TransportError> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp.text().await.map_err(|err| from_reqwest(err, &url))?;

    if debug {
        tracing::debug!(
            target: "adp.http",
            stage = "http.put.body",
            status = %status,
            body = %body
        );
    }

    if !status.is_success() {
        return Err(TransportError::status_error(
            status.as_u16(),
            url,
            preview_body(&body),
        ));
    }

    if body.trim().is_empty() {
        tracing::warn!(target: "adp.http", stage = "http.put.empty", url = %url);
        return Ok(None);
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(Value::Null) => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(err) => {
            tracing::warn!(
                target: "adp.http",
                stage = "http.put.decode",
                url = %url,
                error = %err,
                body = %preview_body(&body)
            );
            Ok(None)
        }
    }
}

fn default_headers(extra: &Headers) -> anyhow::Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| anyhow::anyhow!("invalid header name {name:?}: {e}"))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| anyhow::anyhow!("invalid value for header {name}: {e}"))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// reqwest-backed transport for the three ADP task endpoints.
///
/// Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    debug: bool,
    // Pre-built endpoint URLs
    url_execute: String,
    url_execute_async: String,
    url_status: String,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("url_execute", &self.url_execute)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    pub fn new(cfg: &AdpServiceConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .danger_accept_invalid_certs(cfg.ignore_tls)
            .default_headers(default_headers(&cfg.headers)?)
            .build()?;
        let normalized = cfg.base_url.trim_end_matches('/');
        if cfg.ignore_tls {
            tracing::warn!(
                target: "adp.http",
                base_url = %normalized,
                "TLS certificate verification disabled"
            );
        }
        Ok(Self {
            http,
            debug: cfg.debug,
            url_execute: format!("{}{}", normalized, Endpoint::ExecuteSync.path()),
            url_execute_async: format!("{}{}", normalized, Endpoint::ExecuteAsync.path()),
            url_status: format!("{}{}", normalized, Endpoint::StatusAndProgress.path()),
        })
    }

    pub fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::ExecuteSync => &self.url_execute,
            Endpoint::ExecuteAsync => &self.url_execute_async,
            Endpoint::StatusAndProgress => &self.url_status,
        }
    }
}

#[async_trait]
impl AdpTransport for HttpTransport {
    async fn put(
        &self,
        endpoint: Endpoint,
        request: &TaskRequest,
        headers: &Headers,
        timeout: Option<Duration>,
    ) -> Result<Option<Value>, TransportError> {
        let url = self.url(endpoint);
        tracing::debug!(
            target: "adp.http",
            stage = "http.put.in",
            url = %url,
            task_type = %request.task_type,
            headers = headers.len()
        );
        if self.debug {
            let payload = serde_json::to_string(request).unwrap_or_default();
            tracing::debug!(target: "adp.http", stage = "http.put.payload", payload = %payload);
        }

        let mut req = self.http.put(url).json(request);
        for (name, value) in headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = timeout {
            req = req.timeout(timeout);
        }

        let resp = req.send().await.map_err(|err| from_reqwest(err, url))?;
        let status = resp.status();
        let body = parse_json_response(resp, self.debug).await?;
        tracing::debug!(
            target: "adp.http",
            stage = "http.put.out",
            status = %status,
            has_body = body.is_some()
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn transport(base_url: String) -> HttpTransport {
        HttpTransport::new(&AdpServiceConfig {
            base_url,
            timeout_ms: 2_000,
            ..Default::default()
        })
        .unwrap()
    }

    fn credentials() -> Headers {
        [
            ("Auth-Username".to_string(), "alice".to_string()),
            ("Auth-Password".to_string(), "s3cret".to_string()),
        ]
        .into_iter()
        .collect()
    }

    fn request() -> TaskRequest {
        TaskRequest::new("List Entities", json!({"adp_listEntities_type": "singleMindServer"}))
    }

    #[test]
    fn preview_body_empty() {
        assert_eq!(preview_body("   "), "<empty body>");
    }

    #[test]
    fn preview_body_truncates() {
        let body = "a".repeat(BODY_PREVIEW_LIMIT + 10);
        let preview = preview_body(&body);
        assert!(preview.ends_with("..."));
        assert!(preview.len() <= BODY_PREVIEW_LIMIT + 3);
    }

    #[test]
    fn urls_are_prebuilt_from_base() {
        let t = transport("https://adp.example.com/".to_string());
        assert_eq!(
            t.url(Endpoint::ExecuteSync),
            "https://adp.example.com/adp/rest/api/task/executeAdpTask"
        );
        assert_eq!(
            t.url(Endpoint::StatusAndProgress),
            "https://adp.example.com/adp/rest/api/task/statusAndProgress"
        );
    }

    #[test]
    fn invalid_configured_header_is_rejected() {
        let mut cfg = AdpServiceConfig::default();
        cfg.headers.insert("bad header".into(), "v".into());
        assert!(HttpTransport::new(&cfg).is_err());
    }

    #[tokio::test]
    async fn put_sends_envelope_with_headers() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("PUT", "/adp/rest/api/task/executeAdpTask")
            .match_header("content-type", "application/json")
            .match_header("Auth-Username", "alice")
            .match_header("Auth-Password", "s3cret")
            .match_body(Matcher::PartialJson(json!({
                "taskType": "List Entities",
                "taskConfiguration": {"adp_listEntities_type": "singleMindServer"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"executionId":"123e4567-e89b-12d3-a456-426614174000","executionStatus":"SUCCESS"}"#)
            .create_async()
            .await;

        let body = transport(server.url())
            .execute_sync(&request(), &credentials(), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(body["executionStatus"], json!("SUCCESS"));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn each_endpoint_uses_its_path() {
        let mut server = Server::new_async().await;
        let async_mock = server
            .mock("PUT", "/adp/rest/api/task/executeAdpTaskAsync")
            .with_status(200)
            .with_body(r#"{"executionStatus":"SUCCESS"}"#)
            .create_async()
            .await;
        let status_mock = server
            .mock("PUT", "/adp/rest/api/task/statusAndProgress")
            .with_status(200)
            .with_body(r#"{"executionStatus":"RUNNING"}"#)
            .create_async()
            .await;

        let t = transport(server.url());
        t.execute_async(&request(), &credentials(), None)
            .await
            .unwrap();
        let status = t
            .poll_status(&request(), &credentials(), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(status["executionStatus"], json!("RUNNING"));
        async_mock.assert_async().await;
        status_mock.assert_async().await;
    }

    #[tokio::test]
    async fn configured_headers_are_sent_by_default() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("PUT", "/adp/rest/api/task/executeAdpTask")
            .match_header("X-Tenant", "t1")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let mut cfg = AdpServiceConfig {
            base_url: server.url(),
            ..Default::default()
        };
        cfg.headers.insert("X-Tenant".into(), "t1".into());
        HttpTransport::new(&cfg)
            .unwrap()
            .execute_sync(&request(), &Headers::new(), None)
            .await
            .unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn empty_null_and_non_json_bodies_are_none() {
        for body in ["", "null", "<html>oops</html>"] {
            let mut server = Server::new_async().await;
            let _m = server
                .mock("PUT", "/adp/rest/api/task/executeAdpTask")
                .with_status(200)
                .with_body(body)
                .create_async()
                .await;
            let result = transport(server.url())
                .execute_sync(&request(), &credentials(), None)
                .await
                .unwrap();
            assert_eq!(result, None, "body {body:?}");
        }
    }

    #[tokio::test]
    async fn non_2xx_is_status_error_with_preview() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PUT", "/adp/rest/api/task/executeAdpTask")
            .with_status(401)
            .with_body("invalid credentials")
            .create_async()
            .await;

        let err = transport(server.url())
            .execute_sync(&request(), &credentials(), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), TransportErrorKind::Status);
        assert_eq!(err.status(), Some(401));
        assert!(err
            .url()
            .unwrap_or_default()
            .ends_with("/adp/rest/api/task/executeAdpTask"));
        assert!(err.message().contains("invalid credentials"));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn debug_mode_logs_the_whole_body() {
        let blob = "x".repeat(BODY_PREVIEW_LIMIT * 2);
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PUT", "/adp/rest/api/task/executeAdpTask")
            .with_status(200)
            .with_body(
                json!({
                    "executionId": "123e4567-e89b-12d3-a456-426614174000",
                    "executionStatus": "SUCCESS",
                    "executionMetaData": {"blob": blob}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let t = HttpTransport::new(&AdpServiceConfig {
            base_url: server.url(),
            timeout_ms: 2_000,
            debug: true,
            ..Default::default()
        })
        .unwrap();
        t.execute_sync(&request(), &credentials(), None)
            .await
            .unwrap();

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("http.put.body"));
        assert!(logs.contains(&blob));
    }

    #[tokio::test]
    async fn refused_connection_is_connect_error() {
        let err = transport("http://127.0.0.1:1".to_string())
            .execute_sync(&request(), &credentials(), Some(Duration::from_millis(500)))
            .await
            .unwrap_err();
        assert!(matches!(
            err.kind(),
            TransportErrorKind::Connect | TransportErrorKind::Timeout
        ));
        assert!(err.url().is_some());
    }
}
