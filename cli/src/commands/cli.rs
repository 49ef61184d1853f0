use std::path::PathBuf;

use adp_core::api::AppConfig;
use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "adp", version, about = "Run typed tasks against an ADP service")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

/// Connection flags. Each one, when given, wins over config files and `ADP_*`.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ConnectionArgs {
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[arg(long, global = true)]
    pub username: Option<String>,

    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Skip TLS certificate verification.
    #[arg(long, global = true)]
    pub ignore_tls: bool,

    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Log request payloads and response bodies.
    #[arg(long, global = true)]
    pub debug: bool,
}

impl ConnectionArgs {
    pub fn apply(&self, cfg: &mut AppConfig) {
        if let Some(v) = &self.base_url {
            cfg.adp.base_url = v.clone();
        }
        if let Some(v) = &self.username {
            cfg.adp.username = v.clone();
        }
        if let Some(v) = &self.password {
            cfg.adp.password = v.clone();
        }
        if self.ignore_tls {
            cfg.adp.ignore_tls = true;
        }
        if let Some(v) = self.timeout_ms {
            cfg.adp.timeout_ms = v;
        }
        if self.debug {
            cfg.adp.debug = true;
        }
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ListEntitiesArgs {
    /// Entity type, e.g. `singleMindServer`.
    #[arg(long = "type")]
    pub entity_type: String,

    #[arg(long)]
    pub id: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TaskArgs {
    /// Registry key, e.g. `list_entities`.
    pub key: String,

    /// JSON or TOML file holding task configuration fields.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Set one configuration field (FIELD=VALUE). Can be repeated.
    #[arg(long, action = clap::ArgAction::Append)]
    pub set: Vec<String>,

    /// Per-call timeout in milliseconds.
    #[arg(long)]
    pub call_timeout_ms: Option<u64>,

    /// Extra request header (NAME=VALUE). Can be repeated.
    #[arg(long = "header", action = clap::ArgAction::Append)]
    pub headers: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct StatusArgs {
    /// Registry key of the submitted task.
    pub key: String,

    #[arg(long)]
    pub execution_id: uuid::Uuid,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the registered tasks.
    Tasks,
    ListEntities(ListEntitiesArgs),
    /// Run a task synchronously and print its result.
    Run(TaskArgs),
    /// Submit a task for asynchronous execution and print its execution id.
    Submit(TaskArgs),
    /// Poll status and progress of a submitted task.
    Status(StatusArgs),
}
