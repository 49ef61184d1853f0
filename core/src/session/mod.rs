//! Authenticated dispatch of registered tasks.
//!
//! A [`Session`] wraps a shared transport with the two credential headers and
//! runs the dispatch protocol: resolve the registry entry, validate, apply
//! default overrides, build the envelope, send, check `executionStatus`,
//! extract `executionMetaData` and parse it into a typed result.

mod blocking;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use uuid::Uuid;

use crate::envelope::{is_success_status, TaskRequest, TaskResponse};
use crate::error::{AdpError, ParseError, ValidationError};
use crate::models::coerce::metadata_from_value;
use crate::models::{
    CreateDataSourceResult, CreateDataSourceTaskConfig, CreateOcrJobTaskConfig,
    ExportDocumentsResult, ExportDocumentsTaskConfig, ListEntitiesResult, ListEntitiesTaskConfig,
    ManageHostRolesResult, ManageHostRolesTaskConfig, ManageUsersAndGroupsResult,
    ManageUsersAndGroupsTaskConfig, Metadata, QueryEngineResult, QueryEngineTaskConfig,
    ReadConfigurationResult, ReadConfigurationTaskConfig, ReadServiceAlertsResult,
    ReadServiceAlertsTaskConfig, StartApplicationResult, StartApplicationTaskConfig, TaskConfig,
    TaxonomyStatisticResult, TaxonomyStatisticTaskConfig,
};
use crate::registry::{apply_overrides, lookup, TaskResult, TaskSpec};
use crate::transport::{AdpTransport, Headers};

pub use blocking::BlockingSession;

pub const AUTH_USERNAME_HEADER: &str = "Auth-Username";
pub const AUTH_PASSWORD_HEADER: &str = "Auth-Password";

/// Per-call headers and timeout. Headers here win over session headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
    pub headers: Headers,
    pub timeout: Option<Duration>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        set_header(&mut self.headers, name.into(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Inserts a header, dropping any existing entry whose name differs only in case.
fn set_header(headers: &mut Headers, name: String, value: String) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
    headers.insert(name, value);
}

#[derive(Clone)]
pub struct Session {
    transport: Arc<dyn AdpTransport>,
    base_headers: Headers,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Credentials stay out of logs.
        f.debug_struct("Session")
            .field("headers", &self.base_headers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(
        transport: Arc<dyn AdpTransport>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let mut base_headers = Headers::new();
        base_headers.insert(AUTH_USERNAME_HEADER.to_string(), username.into());
        base_headers.insert(AUTH_PASSWORD_HEADER.to_string(), password.into());
        Self {
            transport,
            base_headers,
        }
    }

    /// Adds session-wide headers. They may replace the credential headers.
    pub fn with_extra_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            set_header(&mut self.base_headers, name.into(), value.into());
        }
        self
    }

    pub fn transport(&self) -> &Arc<dyn AdpTransport> {
        &self.transport
    }

    pub fn base_headers(&self) -> &Headers {
        &self.base_headers
    }

    fn merged_headers(&self, opts: &CallOptions) -> Headers {
        let mut headers = self.base_headers.clone();
        for (name, value) in &opts.headers {
            set_header(&mut headers, name.clone(), value.clone());
        }
        headers
    }

    /// Sends an envelope to the synchronous endpoint and returns the raw body.
    pub async fn run(
        &self,
        request: &TaskRequest,
        opts: &CallOptions,
    ) -> Result<Option<Value>, AdpError> {
        let headers = self.merged_headers(opts);
        Ok(self
            .transport
            .execute_sync(request, &headers, opts.timeout)
            .await?)
    }

    /// Sends an envelope to the asynchronous endpoint and returns the raw body.
    pub async fn run_async(
        &self,
        request: &TaskRequest,
        opts: &CallOptions,
    ) -> Result<Option<Value>, AdpError> {
        let headers = self.merged_headers(opts);
        Ok(self
            .transport
            .execute_async(request, &headers, opts.timeout)
            .await?)
    }

    /// Polls the status endpoint. The body is returned as is; use
    /// [`TaskResponse::from_value`] to decode it.
    pub async fn status_and_progress(
        &self,
        request: &TaskRequest,
        opts: &CallOptions,
    ) -> Result<Option<Value>, AdpError> {
        let headers = self.merged_headers(opts);
        tracing::debug!(
            target: "adp.session",
            stage = "session.status.in",
            task_type = %request.task_type
        );
        Ok(self
            .transport
            .poll_status(request, &headers, opts.timeout)
            .await?)
    }

    fn prepare<C: TaskConfig>(
        &self,
        key: &str,
        config: &mut C,
    ) -> Result<(&'static TaskSpec, TaskRequest), AdpError> {
        let spec = lookup(key)?;
        if config.kind() != spec.kind {
            return Err(ValidationError::KindMismatch {
                config: config.kind().key().to_string(),
                task: spec.key().to_string(),
            }
            .into());
        }
        config.validate()?;
        apply_overrides(spec, config)?;
        let request = TaskRequest::for_task(spec, config).map_err(|e| {
            ValidationError::Shape {
                task: spec.key().to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok((spec, request))
    }

    /// Runs a registered task synchronously and returns its parsed result.
    ///
    /// Overrides are applied to `config` in place, so the caller sees the
    /// configuration exactly as it was sent.
    pub async fn run_task<C: TaskConfig>(
        &self,
        key: &str,
        config: &mut C,
        opts: &CallOptions,
    ) -> Result<TaskResult, AdpError> {
        let (spec, request) = self.prepare(key, config)?;
        tracing::debug!(
            target: "adp.session",
            stage = "session.run_task.in",
            task = spec.key(),
            task_type = spec.task_type
        );

        let body = self
            .run(&request, opts)
            .await?
            .ok_or_else(|| AdpError::NoResponse {
                task_type: spec.task_type.to_string(),
            })?;
        ensure_success(spec, &body)?;
        let metadata = extract_metadata(spec, &body)?;
        let result = spec
            .parse(&metadata)
            .map_err(|e| AdpError::parse(spec.task_type, e))?;

        tracing::debug!(
            target: "adp.session",
            stage = "session.run_task.out",
            task = spec.key(),
            metadata_keys = metadata.len()
        );
        Ok(result)
    }

    /// Submits a registered task for asynchronous execution and returns its
    /// execution id. Poll it with [`Session::status_and_progress`].
    pub async fn run_task_async<C: TaskConfig>(
        &self,
        key: &str,
        config: &mut C,
        opts: &CallOptions,
    ) -> Result<Uuid, AdpError> {
        let (spec, request) = self.prepare(key, config)?;
        tracing::debug!(
            target: "adp.session",
            stage = "session.run_task_async.in",
            task = spec.key(),
            task_type = spec.task_type
        );

        let body = self
            .run_async(&request, opts)
            .await?
            .ok_or_else(|| AdpError::NoResponse {
                task_type: spec.task_type.to_string(),
            })?;
        ensure_success(spec, &body)?;
        let response =
            TaskResponse::from_value(&body).map_err(|e| AdpError::parse(spec.task_type, e))?;

        tracing::info!(
            target: "adp.session",
            stage = "session.run_task_async.out",
            task = spec.key(),
            execution_id = %response.execution_id
        );
        Ok(response.execution_id)
    }

    /// Runs the task matching the configuration's kind and converts the result.
    pub async fn execute<C, R>(&self, config: &mut C, opts: &CallOptions) -> Result<R, AdpError>
    where
        C: TaskConfig,
        R: TryFrom<TaskResult, Error = ParseError>,
    {
        let key = config.kind().key();
        let result = self.run_task(key, config, opts).await?;
        let task_type = config.kind().spec().task_type;
        R::try_from(result).map_err(|e| AdpError::parse(task_type, e))
    }

    /// Submits an OCR job asynchronously.
    pub async fn create_ocr_job(
        &self,
        mut config: CreateOcrJobTaskConfig,
        opts: &CallOptions,
    ) -> Result<Uuid, AdpError> {
        self.run_task_async(CreateOcrJobTaskConfig::KIND.key(), &mut config, opts)
            .await
    }
}

fn ensure_success(spec: &TaskSpec, body: &Value) -> Result<(), AdpError> {
    let status = body.get("executionStatus");
    let status_text = status.and_then(Value::as_str);
    if is_success_status(status_text) {
        return Ok(());
    }
    let status = match status {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    };
    let message = body
        .get("errorMessage")
        .and_then(Value::as_str)
        .map(str::to_string);
    tracing::warn!(
        target: "adp.session",
        stage = "session.status.failed",
        task_type = spec.task_type,
        status = ?status,
        error_message = ?message
    );
    Err(AdpError::TaskFailed {
        task_type: spec.task_type.to_string(),
        status,
        message,
    })
}

fn extract_metadata(spec: &TaskSpec, body: &Value) -> Result<Metadata, AdpError> {
    let empty = || AdpError::EmptyMetadata {
        task_type: spec.task_type.to_string(),
    };
    let raw = match body.get("executionMetaData") {
        None | Some(Value::Null) => return Err(empty()),
        Some(Value::String(s)) if s.trim().is_empty() => return Err(empty()),
        Some(Value::Array(a)) if a.is_empty() => return Err(empty()),
        Some(raw) => raw,
    };
    let metadata = metadata_from_value(raw).map_err(|e| AdpError::parse(spec.task_type, e))?;
    if metadata.is_empty() {
        return Err(empty());
    }
    Ok(metadata)
}

macro_rules! typed_tasks {
    ($( $(#[$meta:meta])* $name:ident($config:ty) -> $result:ty; )*) => {
        impl Session {
            $(
                $(#[$meta])*
                pub async fn $name(
                    &self,
                    mut config: $config,
                    opts: &CallOptions,
                ) -> Result<$result, AdpError> {
                    self.execute::<$config, $result>(&mut config, opts).await
                }
            )*
        }

        impl BlockingSession {
            $(
                $(#[$meta])*
                pub fn $name(&self, config: $config, opts: &CallOptions) -> Result<$result, AdpError> {
                    self.block_on(self.session().$name(config, opts))
                }
            )*
        }
    };
}

typed_tasks! {
    /// Lists entities of the configured type.
    list_entities(ListEntitiesTaskConfig) -> ListEntitiesResult;
    manage_host_roles(ManageHostRolesTaskConfig) -> ManageHostRolesResult;
    /// Reads configuration trees into JSON.
    read_configuration(ReadConfigurationTaskConfig) -> ReadConfigurationResult;
    query_engine(QueryEngineTaskConfig) -> QueryEngineResult;
    /// Category counts for one or more taxonomies.
    taxonomy_statistic(TaxonomyStatisticTaskConfig) -> TaxonomyStatisticResult;
    export_documents(ExportDocumentsTaskConfig) -> ExportDocumentsResult;
    create_data_source(CreateDataSourceTaskConfig) -> CreateDataSourceResult;
    manage_users_and_groups(ManageUsersAndGroupsTaskConfig) -> ManageUsersAndGroupsResult;
    read_service_alerts(ReadServiceAlertsTaskConfig) -> ReadServiceAlertsResult;
    /// Starts an application and reports its URL.
    start_application(StartApplicationTaskConfig) -> StartApplicationResult;
}
