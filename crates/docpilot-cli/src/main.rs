//! Docpilot CLI
//!
//! Summaries, tags and answers for plain-text documents, with ordered
//! fallback across AI providers.

use anyhow::Result;
use clap::Parser;
use docpilot_core::error::exit_codes;
use docpilot_core::{CapabilityRequest, Config, DocpilotError, Orchestrator};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let code = err
                .downcast_ref::<DocpilotError>()
                .map_or(exit_codes::GENERAL_ERROR, DocpilotError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,docpilot=debug,docpilot_core=debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let orchestrator = Orchestrator::from_config(&config)?;

    match cli.command {
        Commands::Summarize(args) => {
            commands::capability::run(
                &orchestrator,
                &args.file,
                CapabilityRequest::Summarize,
                cli.format,
            )
            .await
        }
        Commands::Tag(args) => {
            commands::capability::run(&orchestrator, &args.file, CapabilityRequest::Tag, cli.format)
                .await
        }
        Commands::Query(args) => {
            let request = CapabilityRequest::query(args.question());
            commands::capability::run(&orchestrator, &args.file, request, cli.format).await
        }
        Commands::Process(args) => commands::process::run(orchestrator, &args.file, cli.format).await,
        Commands::Providers => commands::providers::run(&orchestrator, cli.format),
    }
}
