use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::envelope::TaskRequest;
use crate::error::TransportError;

/// Header name → value. Later inserts win, so callers merge by extending.
pub type Headers = BTreeMap<String, String>;

/// The three PUT operations the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ExecuteSync,
    ExecuteAsync,
    StatusAndProgress,
}

impl Endpoint {
    pub const ALL: [Endpoint; 3] = [
        Endpoint::ExecuteSync,
        Endpoint::ExecuteAsync,
        Endpoint::StatusAndProgress,
    ];

    /// Path relative to the service base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::ExecuteSync => "/adp/rest/api/task/executeAdpTask",
            Self::ExecuteAsync => "/adp/rest/api/task/executeAdpTaskAsync",
            Self::StatusAndProgress => "/adp/rest/api/task/statusAndProgress",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Sends task envelopes to the service.
///
/// `Ok(None)` means the service answered with no usable JSON body.
#[async_trait]
pub trait AdpTransport: Send + Sync {
    async fn put(
        &self,
        endpoint: Endpoint,
        request: &TaskRequest,
        headers: &Headers,
        timeout: Option<Duration>,
    ) -> Result<Option<Value>, TransportError>;

    async fn execute_sync(
        &self,
        request: &TaskRequest,
        headers: &Headers,
        timeout: Option<Duration>,
    ) -> Result<Option<Value>, TransportError> {
        self.put(Endpoint::ExecuteSync, request, headers, timeout)
            .await
    }

    async fn execute_async(
        &self,
        request: &TaskRequest,
        headers: &Headers,
        timeout: Option<Duration>,
    ) -> Result<Option<Value>, TransportError> {
        self.put(Endpoint::ExecuteAsync, request, headers, timeout)
            .await
    }

    async fn poll_status(
        &self,
        request: &TaskRequest,
        headers: &Headers,
        timeout: Option<Duration>,
    ) -> Result<Option<Value>, TransportError> {
        self.put(Endpoint::StatusAndProgress, request, headers, timeout)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths() {
        assert_eq!(
            Endpoint::ExecuteSync.path(),
            "/adp/rest/api/task/executeAdpTask"
        );
        assert_eq!(
            Endpoint::ExecuteAsync.path(),
            "/adp/rest/api/task/executeAdpTaskAsync"
        );
        assert_eq!(
            Endpoint::StatusAndProgress.path(),
            "/adp/rest/api/task/statusAndProgress"
        );
    }
}
