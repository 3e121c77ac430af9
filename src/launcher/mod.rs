//! Launch orchestration for the Insighter container.
//!
//! [`Launcher`] strings the individual steps together in order: volume
//! provisioning, host port selection, image pull, container replacement,
//! background readiness watch, and the foreground log attach. Interrupt
//! handling is cooperative — a shared [`CancellationToken`] is observed
//! at the blocking points and the container is stopped from the main
//! flow, never from a signal callback.

pub mod image;
pub mod logs;
pub mod ports;
pub mod readiness;
pub mod reconcile;
pub mod volumes;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::LaunchConfig;
use crate::runtime::{ContainerRuntime, ContainerSpec, ContainerState};
use crate::Result;

/// Drives the container lifecycle against a [`ContainerRuntime`].
#[derive(Debug)]
pub struct Launcher<R: ContainerRuntime> {
    runtime: R,
    config: LaunchConfig,
}

impl<R: ContainerRuntime> Launcher<R> {
    /// Bundle a runtime client with the resolved launch configuration.
    pub fn new(runtime: R, config: LaunchConfig) -> Self {
        Self { runtime, config }
    }

    /// The underlying runtime client.
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Whether the named container is currently running.
    ///
    /// # Errors
    ///
    /// Propagates runtime inspection failures.
    pub async fn is_running(&self) -> Result<bool> {
        Ok(self
            .runtime
            .container_state(&self.config.container_name)
            .await?
            == Some(ContainerState::Running))
    }

    /// Apply an operator choice to the already-running instance.
    ///
    /// # Errors
    ///
    /// Propagates runtime failures from the chosen action.
    pub async fn reconcile(&self, action: reconcile::ExistingAction) -> Result<()> {
        reconcile::handle_existing(&self.runtime, &self.config, action).await
    }

    /// Run the fresh-start path to completion.
    ///
    /// Provisions volumes, picks a free host port, makes the image
    /// available, replaces any existing container, then races the
    /// foreground log attach against the cancellation token while a
    /// background task watches for readiness and opens the browser.
    /// The watcher is joined at exactly one point before returning.
    ///
    /// # Errors
    ///
    /// Propagates fatal startup failures (runtime calls, unrecoverable
    /// image pull, log stream errors). Cancellation is a graceful path:
    /// the container is stopped and `Ok(())` is returned.
    pub async fn start(&self, cancel: CancellationToken) -> Result<()> {
        volumes::ensure_volumes(&self.runtime, &self.config.volumes).await?;

        let host_port = ports::find_free_port(self.config.base_port);
        info!(host_port, "selected free host port");

        image::ensure_image(&self.runtime, &self.config.image).await?;

        self.replace_container(host_port).await?;
        info!(container = %self.config.container_name, "container started");

        let mut watch = readiness::spawn_ready_watch(
            host_port,
            readiness::POLL_INTERVAL,
            cancel.clone(),
            |web_url| {
                if let Err(err) = webbrowser::open(web_url) {
                    warn!(%err, web_url, "could not open browser");
                }
            },
        );

        if !self.config.detach {
            let stream = self.runtime.attach(&self.config.container_name).await?;
            tokio::select! {
                result = logs::forward(stream) => result?,
                () = cancel.cancelled() => {
                    self.stop_on_interrupt().await?;
                    let _ = watch.await;
                    return Ok(());
                }
            }
        }

        // The attach stream closed (or we never attached); wait for the
        // readiness watcher unless an interrupt arrives first.
        let interrupted = tokio::select! {
            biased;
            () = cancel.cancelled() => true,
            _ = &mut watch => false,
        };
        if interrupted {
            self.stop_on_interrupt().await?;
            let _ = watch.await;
        }

        Ok(())
    }

    /// Stop and remove any same-named container, then create and start a
    /// fresh one with the current port, volumes, and environment.
    ///
    /// Ports, volumes, and environment cannot be remapped on an existing
    /// container, so replacement is the only update mechanism.
    async fn replace_container(&self, host_port: u16) -> Result<()> {
        let name = &self.config.container_name;

        if self.runtime.container_state(name).await?.is_some() {
            info!(container = %name, "removing existing container before recreation");
            self.runtime.stop_container(name).await?;
            self.runtime.remove_container(name).await?;
        }

        let spec = ContainerSpec {
            name: name.clone(),
            image: self.config.image.clone(),
            env: self.config.env.clone(),
            binds: self
                .config
                .volumes
                .iter()
                .map(|mapping| format!("{}:{}", mapping.name, mapping.mount_path))
                .collect(),
            host_port,
            container_port: self.config.container_port,
        };

        self.runtime.create_container(&spec).await?;
        self.runtime.start_container(name).await
    }

    /// Interrupt path: stop the container and confirm on the terminal.
    async fn stop_on_interrupt(&self) -> Result<()> {
        println!("\nCTRL-C detected. Stopping Insighter...");
        self.runtime
            .stop_container(&self.config.container_name)
            .await?;
        println!("Insighter stopped.");
        Ok(())
    }
}
