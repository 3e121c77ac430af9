//! Handling for an already-running container instance.
//!
//! When the named container is found running at startup, the operator is
//! prompted for one of three choices instead of the normal launch path:
//! leave it running (empty reply), stop it, or restart it. Any other
//! reply is an error and the process exits non-zero without touching the
//! container.

use std::io::Write;

use crate::config::LaunchConfig;
use crate::launcher::logs;
use crate::runtime::ContainerRuntime;
use crate::{AppError, Result};

/// Operator choice for a running instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExistingAction {
    /// Leave the container running and exit.
    Leave,
    /// Stop the container and exit.
    Stop,
    /// Restart the container; stream logs first unless detached.
    Restart,
}

impl ExistingAction {
    /// Parse a prompt reply. Empty input means leave-it-running.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidAction` for any reply other than the
    /// empty string, `stop`, or `restart`.
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim() {
            "" => Ok(Self::Leave),
            "stop" => Ok(Self::Stop),
            "restart" => Ok(Self::Restart),
            other => Err(AppError::InvalidAction(other.to_owned())),
        }
    }
}

/// Print the already-running notice, prompt the operator, and parse the
/// reply.
///
/// The stdin read runs on the blocking pool so the async runtime is not
/// stalled while the operator types.
///
/// # Errors
///
/// Returns `AppError::Io` when the terminal read fails and
/// `AppError::InvalidAction` for an unrecognized reply.
pub async fn prompt_action() -> Result<ExistingAction> {
    eprintln!("Error: Insighter is already running.");
    print!("Do you want to stop or restart it?\nPress enter to leave it running.\n[stop/restart]: ");
    std::io::stdout().flush()?;

    let reply = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|_| line)
    })
    .await
    .map_err(|err| AppError::Io(format!("prompt task failed: {err}")))??;

    ExistingAction::parse(&reply)
}

/// Apply the operator's choice to the running container.
///
/// # Errors
///
/// Propagates runtime failures from the stop/restart/attach calls.
pub async fn handle_existing<R: ContainerRuntime>(
    runtime: &R,
    config: &LaunchConfig,
    action: ExistingAction,
) -> Result<()> {
    match action {
        ExistingAction::Leave => Ok(()),
        ExistingAction::Stop => {
            println!("Stopping Insighter...");
            runtime.stop_container(&config.container_name).await?;
            println!("Insighter stopped.");
            Ok(())
        }
        ExistingAction::Restart => {
            println!("Restarting Insighter...");
            runtime.restart_container(&config.container_name).await?;
            if !config.detach {
                let stream = runtime.attach(&config.container_name).await?;
                logs::forward(stream).await?;
            }
            Ok(())
        }
    }
}
