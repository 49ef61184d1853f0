//! Tracing setup for the `adp` binary.

use std::path::PathBuf;

use adp_core::api::LoggingConfig;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Prefix shared by this client's crate names and its `adp.*` log targets.
pub const TARGET_PREFIX: &str = "adp";

/// Turns the configured level into filter directives.
///
/// A bare level such as `debug` applies to the client's own targets while
/// dependencies stay at `warn`. Anything else is taken as a full directive string.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        return format!("warn,{TARGET_PREFIX}=info");
    }
    match level.parse::<LevelFilter>() {
        Ok(LevelFilter::OFF) => "off".to_string(),
        Ok(_) => format!("warn,{TARGET_PREFIX}={}", level.to_ascii_lowercase()),
        Err(_) => level.to_string(),
    }
}

/// `RUST_LOG`, when set and non-blank, replaces the configured level.
pub fn build_filter(level: &str, rust_log: Option<&str>) -> Result<EnvFilter, String> {
    let directives = match rust_log.map(str::trim) {
        Some(env) if !env.is_empty() => env.to_string(),
        _ => filter_directives(level),
    };
    EnvFilter::try_new(&directives).map_err(|e| format!("invalid log filter {directives:?}: {e}"))
}

pub fn log_dir(logging: &LoggingConfig) -> PathBuf {
    logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("adp-cli"))
}

/// Installs the global subscriber.
///
/// The returned guard flushes the log file when dropped; keep it alive until
/// the process is done logging.
pub fn init(logging: &LoggingConfig) -> Result<Option<WorkerGuard>, String> {
    if !logging.enabled {
        return Ok(None);
    }
    if !logging.console && !logging.file {
        return Err("logging enabled but both console and file output are off".to_string());
    }

    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(&logging.level, rust_log.as_deref())?;

    let mut guard = None;
    let file_layer = if logging.file {
        let dir = log_dir(logging);
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("cannot create log directory {}: {e}", dir.display()))?;
        let appender =
            tracing_appender::rolling::never(dir, format!("adp.{}.log", std::process::id()));
        let (writer, file_guard) = tracing_appender::non_blocking(appender);
        guard = Some(file_guard);
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
    } else {
        None
    };

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| e.to_string())?;
    Ok(guard)
}
