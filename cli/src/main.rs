use std::process::ExitCode;

use adp_cli::commands::cli::{self, Commands};
use adp_cli::commands::task;
use adp_cli::logging;
use adp_core::api::{AppConfig, CliError};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    match real_main().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn real_main() -> Result<(), CliError> {
    let args = cli::Args::parse();
    let mut cfg =
        adp_core::api::load_default().map_err(|e| CliError::Config(e.to_string()))?;
    args.connection.apply(&mut cfg);
    // Dropped on return, which flushes the log file.
    let _log_guard = logging::init(&cfg.logging).map_err(CliError::Command)?;
    tracing::debug!(target: "adp.cli", adp = ?cfg.adp, "configuration loaded");

    let output = dispatch(args, &cfg).await?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

async fn dispatch(args: cli::Args, cfg: &AppConfig) -> Result<String, CliError> {
    let format = args.format;
    if let Commands::Tasks = args.command {
        return task::handle_tasks(format);
    }

    let session = adp_plugins::factory::build_session(cfg)
        .map_err(|e| CliError::Config(e.to_string()))?;
    match args.command {
        Commands::Tasks => task::handle_tasks(format),
        Commands::ListEntities(a) => task::handle_list_entities(a, &session, format).await,
        Commands::Run(a) => task::handle_run(a, &session, format).await,
        Commands::Submit(a) => task::handle_submit(a, &session, format).await,
        Commands::Status(a) => task::handle_status(a, &session, format).await,
    }
}
