#![forbid(unsafe_code)]

//! `insighter` — local launcher for the Insighter container.
//!
//! Verifies the Docker daemon is reachable, provisions the persistent
//! volumes, pulls the image when needed, (re)creates and starts the
//! container, opens the browser once the app reports ready, and streams
//! container logs until interrupted.

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use insighter_launcher::config::{self, LaunchConfig};
use insighter_launcher::launcher::{reconcile, Launcher};
use insighter_launcher::runtime::{ContainerRuntime, DockerRuntime};
use insighter_launcher::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "insighter", about = "Run and manage Insighter", version, long_about = None)]
struct Cli {
    /// Run Insighter in detached mode (do not attach to its logs).
    #[arg(short, long)]
    detach: bool,

    /// Image reference override.
    #[arg(long, default_value = config::DEFAULT_IMAGE, hide = true)]
    image: String,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    if let Err(err) = init_tracing(args.log_format) {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Error: failed to build tokio runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<()> {
    // ── Runtime connectivity check ──────────────────────
    let docker = DockerRuntime::connect()
        .map_err(|_| AppError::Runtime("Docker is not running".into()))?;
    docker
        .ping()
        .await
        .map_err(|_| AppError::Runtime("Docker is not running".into()))?;
    info!("container runtime reachable");

    let config = LaunchConfig::new(&args.image, args.detach);
    let launcher = Launcher::new(docker, config);

    // ── Existing-instance reconciliation ────────────────
    // This path fully replaces startup and has its own exit points, so
    // the interrupt listener below is never registered for it.
    if launcher.is_running().await? {
        let action = reconcile::prompt_action().await?;
        return launcher.reconcile(action).await;
    }

    // ── Interrupt handling for the fresh-start path ─────
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    launcher.start(cancel).await
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter).with_writer(std::io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
