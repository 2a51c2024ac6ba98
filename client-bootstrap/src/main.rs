use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use client_bootstrap::Overrides;
use client_interfaces_cli::{CliError, Route};

const LOG_FILE_NAME: &str = "eventhub-client.log";

#[derive(Parser, Debug)]
#[command(name = "eventhub-client")]
#[command(about = "EventHub terminal client", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Base URL of the event service
    #[arg(long)]
    api_url: Option<String>,

    /// Write logs to this directory instead of stderr
    #[arg(long, env = "EVENTHUB_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    route: Route,
}

fn init_tracing(log_dir: Option<&PathBuf>) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_dir {
        Some(dir) => {
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, LOG_FILE_NAME));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let guard = init_tracing(args.log_dir.as_ref());

    if let Some(config) = args.config {
        std::env::set_var("EVENTHUB_CONFIG", config);
    }
    let overrides = Overrides {
        api_url: args.api_url,
        mode: None,
    };

    match client_bootstrap::run(overrides, args.route).await {
        Ok(()) => Ok(()),
        Err(err) => match err.downcast_ref::<CliError>() {
            Some(cli) => {
                eprintln!("error: {}", cli);
                let code = cli.exit_code();
                drop(guard);
                std::process::exit(code);
            }
            None => Err(err),
        },
    }
}
