#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use adp_core::api::{
    AdpTransport, Endpoint, Headers, Session, TaskRequest, TransportError, TransportErrorKind,
};
use async_trait::async_trait;
use serde_json::{json, Value};

pub const EXECUTION_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// One request the mock received.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub endpoint: Endpoint,
    pub request: TaskRequest,
    pub headers: Headers,
    pub timeout: Option<Duration>,
}

pub enum Reply {
    Body(Option<Value>),
    Fail(TransportErrorKind),
}

/// Transport that answers from a queue and records every call.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn replying(body: Value) -> Arc<Self> {
        let mock = Self::new();
        mock.push(Reply::Body(Some(body)));
        mock
    }

    pub fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("no call recorded")
    }
}

#[async_trait]
impl AdpTransport for MockTransport {
    async fn put(
        &self,
        endpoint: Endpoint,
        request: &TaskRequest,
        headers: &Headers,
        timeout: Option<Duration>,
    ) -> Result<Option<Value>, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            endpoint,
            request: request.clone(),
            headers: headers.clone(),
            timeout,
        });
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Fail(kind)) => Err(TransportError::new(kind, "mock failure")
                .with_url(format!("http://mock{}", endpoint.path()))),
            None => Ok(None),
        }
    }
}

pub fn session(mock: &Arc<MockTransport>) -> Session {
    Session::new(mock.clone(), "alice", "s3cret")
}

pub fn success(metadata: Value) -> Value {
    json!({
        "executionId": EXECUTION_ID,
        "taskType": "any",
        "executionStatus": "SUCCESS",
        "executionMetaData": metadata
    })
}
