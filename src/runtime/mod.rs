//! Container runtime client abstraction.
//!
//! The [`ContainerRuntime`] trait decouples the launch flow from the
//! Docker API client so every flow (reconcile, provisioning, pull,
//! recreate, attach) can be exercised against a recording mock. The
//! production implementation lives in [`docker`].

pub mod docker;

use bytes::Bytes;
use futures_util::stream::BoxStream;

use crate::Result;

pub use docker::DockerRuntime;

/// Observed state of the named container.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContainerState {
    /// The container exists and its process is running.
    Running,
    /// The container exists but is not running (created, exited, paused).
    Stopped,
}

/// Everything needed to create the application container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    /// Container name.
    pub name: String,
    /// Normalized image reference.
    pub image: String,
    /// `KEY=VALUE` environment entries.
    pub env: Vec<String>,
    /// `volume:/mount/path` bind entries.
    pub binds: Vec<String>,
    /// Host port the container port is published on.
    pub host_port: u16,
    /// In-container port being published.
    pub container_port: u16,
}

/// One message from the streamed image pull.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullProgress {
    /// Layer identifier, absent for whole-image status lines.
    pub layer_id: Option<String>,
    /// Current status text (`Downloading`, `Extracting`, ...).
    pub status: String,
    /// Progress bar text, when the daemon provides one.
    pub progress: String,
    /// In-band error reported by the daemon for this layer.
    pub error: Option<String>,
}

/// A demultiplexed chunk of container output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogChunk {
    /// Chunk from the container's standard output.
    Stdout(Bytes),
    /// Chunk from the container's standard error.
    Stderr(Bytes),
}

/// Client contract against the local container engine.
///
/// Every method maps to one engine API call and blocks its caller for
/// the call's duration. Implementations must map a "no such container"
/// response from state inspection to `Ok(None)` rather than an error.
#[allow(async_fn_in_trait)]
pub trait ContainerRuntime {
    /// Lightweight engine liveness check.
    async fn ping(&self) -> Result<()>;

    /// Names of all volumes known to the engine.
    async fn list_volume_names(&self) -> Result<Vec<String>>;

    /// Create a named volume.
    async fn create_volume(&self, name: &str) -> Result<()>;

    /// State of the named container, or `None` when it does not exist.
    async fn container_state(&self, name: &str) -> Result<Option<ContainerState>>;

    /// Create (but do not start) a container from the spec.
    async fn create_container(&self, spec: &ContainerSpec) -> Result<()>;

    /// Start a created container.
    async fn start_container(&self, name: &str) -> Result<()>;

    /// Stop a running container.
    async fn stop_container(&self, name: &str) -> Result<()>;

    /// Restart a container in place.
    async fn restart_container(&self, name: &str) -> Result<()>;

    /// Remove a stopped container.
    async fn remove_container(&self, name: &str) -> Result<()>;

    /// Whether any local image matches the reference.
    async fn has_local_image(&self, reference: &str) -> Result<bool>;

    /// Begin pulling the image, yielding per-layer progress messages.
    async fn pull_image(&self, reference: &str) -> Result<BoxStream<'static, Result<PullProgress>>>;

    /// Attach to the container's combined output, demultiplexed.
    async fn attach(&self, name: &str) -> Result<BoxStream<'static, Result<LogChunk>>>;
}
