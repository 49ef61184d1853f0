use std::future::Future;

use serde_json::Value;
use uuid::Uuid;

use crate::envelope::TaskRequest;
use crate::error::AdpError;
use crate::models::{CreateOcrJobTaskConfig, TaskConfig};
use crate::registry::TaskResult;
use crate::session::{CallOptions, Session};

/// Synchronous facade over [`Session`].
///
/// Owns a small multi-thread runtime and drives the async dispatch with
/// `block_on`, so it can be shared across OS threads. Must not be used from
/// inside another tokio runtime.
#[derive(Debug)]
pub struct BlockingSession {
    runtime: tokio::runtime::Runtime,
    inner: Session,
}

impl BlockingSession {
    pub fn new(session: Session) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("adp-blocking")
            .enable_all()
            .build()?;
        Ok(Self {
            runtime,
            inner: session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.inner
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn run(&self, request: &TaskRequest, opts: &CallOptions) -> Result<Option<Value>, AdpError> {
        self.block_on(self.inner.run(request, opts))
    }

    pub fn run_async(
        &self,
        request: &TaskRequest,
        opts: &CallOptions,
    ) -> Result<Option<Value>, AdpError> {
        self.block_on(self.inner.run_async(request, opts))
    }

    pub fn status_and_progress(
        &self,
        request: &TaskRequest,
        opts: &CallOptions,
    ) -> Result<Option<Value>, AdpError> {
        self.block_on(self.inner.status_and_progress(request, opts))
    }

    pub fn run_task<C: TaskConfig>(
        &self,
        key: &str,
        config: &mut C,
        opts: &CallOptions,
    ) -> Result<TaskResult, AdpError> {
        self.block_on(self.inner.run_task(key, config, opts))
    }

    pub fn run_task_async<C: TaskConfig>(
        &self,
        key: &str,
        config: &mut C,
        opts: &CallOptions,
    ) -> Result<Uuid, AdpError> {
        self.block_on(self.inner.run_task_async(key, config, opts))
    }

    pub fn create_ocr_job(
        &self,
        config: CreateOcrJobTaskConfig,
        opts: &CallOptions,
    ) -> Result<Uuid, AdpError> {
        self.block_on(self.inner.create_ocr_job(config, opts))
    }
}
