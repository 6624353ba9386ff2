//! credex CLI entrypoint.

use clap::Parser;
use credex_core::Error;
use std::io::Write;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod handlers;
mod host;

use commands::Commands;
use host::GitHubActionsHost;

#[derive(Parser)]
#[command(name = "credex")]
#[command(author, version, about = "Exchange CI job identity for short-lived credentials", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Logs go to stderr so stdout stays reserved for workflow commands.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let debug = std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1");
        EnvFilter::new(if debug { "debug" } else { "warn" })
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// First line of a clap error, without its `error: ` prefix.
fn usage_error(err: &clap::Error) -> Error {
    let rendered = err.to_string();
    let line = rendered.lines().next().unwrap_or_default();
    Error::InvalidInput(line.trim_start_matches("error: ").to_string())
}

/// Run a parsed invocation and report any failure to the runner.
async fn run<W: Write>(parsed: Result<Cli, clap::Error>, host: &GitHubActionsHost<W>) -> ExitCode {
    let result = match parsed {
        Ok(cli) => match cli.command {
            Commands::GithubAppToken(args) => handlers::github_app_token(args, host).await,
            Commands::AwsAssumeRole(args) => handlers::aws_assume_role(args, host).await,
            Commands::Cleanup => {
                handlers::cleanup(host).await;
                Ok(())
            }
        },
        Err(e) => Err(usage_error(&e)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "credential exchange failed");
            host.set_failed(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let parsed = Cli::try_parse();
    if let Err(e) = &parsed {
        // Help and version requests are not failures.
        if !e.use_stderr() {
            e.exit();
        }
    }

    let host = GitHubActionsHost::from_env();
    run(parsed, &host).await
}
