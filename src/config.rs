//! Launch configuration assembled once at startup.
//!
//! All container parameters — name, image, ports, volume mounts, and the
//! environment passthrough — are captured into a [`LaunchConfig`] before
//! any runtime call is made. Nothing downstream reads the process
//! environment ad hoc.

use std::env;

/// Name of the managed container instance.
pub const CONTAINER_NAME: &str = "insighter";

/// Default published image reference used when `--image` is not given.
pub const DEFAULT_IMAGE: &str = "insightercloud/insighter";

/// First host port probed when publishing the web port.
pub const BASE_PORT: u16 = 3000;

/// Port the application listens on inside the container.
pub const CONTAINER_PORT: u16 = 3000;

/// Environment variables copied verbatim into the container when set.
///
/// Unset names are omitted; nothing outside this list is forwarded.
pub const ENV_PASSTHROUGH: &[&str] = &[
    "LOG_LEVEL",
    "ALLOW_HTTP",
    "POSTGRES_USERNAME",
    "POSTGRES_PASSWORD",
    "POSTGRES_HOSTNAME",
    "POSTGRES_PORT",
    "POSTGRES_DATABASE",
    "AI_API_URL",
    "AI_API_USERNAME",
    "AI_API_PASSWORD",
    "JUPYTER_HOST",
    "JUPYTER_PORT",
    "JUPYTER_TOKEN",
    "DISABLE_CUSTOM_OAI_KEY",
];

/// A named volume and its in-container mount path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeMapping {
    /// Name of the persistent volume.
    pub name: &'static str,
    /// Absolute path the volume is mounted at inside the container.
    pub mount_path: &'static str,
}

/// The three persistent volumes the container depends on.
///
/// Created on demand, never deleted by the launcher; data survives
/// container recreation.
pub const VOLUMES: &[VolumeMapping] = &[
    VolumeMapping {
        name: "insighter_psql_data",
        mount_path: "/var/lib/postgresql/data",
    },
    VolumeMapping {
        name: "insighter_jupyter_data",
        mount_path: "/home/jupyteruser",
    },
    VolumeMapping {
        name: "insighter_insighter_data",
        mount_path: "/home/insighter",
    },
];

/// Fully resolved launch parameters, built once in `main`.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Container instance name.
    pub container_name: String,
    /// Normalized image reference (tag appended where needed).
    pub image: String,
    /// First host port to probe.
    pub base_port: u16,
    /// In-container application port.
    pub container_port: u16,
    /// Whether to skip the foreground log attach.
    pub detach: bool,
    /// `KEY=VALUE` pairs captured from the allow-list.
    pub env: Vec<String>,
    /// Named volume mounts.
    pub volumes: Vec<VolumeMapping>,
}

impl LaunchConfig {
    /// Assemble the launch configuration from CLI arguments and the
    /// current process environment.
    #[must_use]
    pub fn new(image: &str, detach: bool) -> Self {
        Self {
            container_name: CONTAINER_NAME.to_owned(),
            image: resolve_image_tag(image),
            base_port: BASE_PORT,
            container_port: CONTAINER_PORT,
            detach,
            env: capture_passthrough_env(),
            volumes: VOLUMES.to_vec(),
        }
    }
}

/// Normalize an image reference for pull and run.
///
/// A reference with a registry/namespace path but no explicit tag gets
/// `:latest` appended; bare names and already-tagged references are
/// returned unchanged.
#[must_use]
pub fn resolve_image_tag(image: &str) -> String {
    if image.contains('/') && !image.contains(':') {
        format!("{image}:latest")
    } else {
        image.to_owned()
    }
}

/// Split an image reference into repository and optional tag.
///
/// A colon inside the registry host (`localhost:5000/app`) is not a tag
/// separator.
#[must_use]
pub fn split_image_tag(reference: &str) -> (&str, Option<&str>) {
    match reference.rsplit_once(':') {
        Some((repo, tag)) if !tag.contains('/') => (repo, Some(tag)),
        _ => (reference, None),
    }
}

/// Copy the allow-listed environment variables into `KEY=VALUE` pairs.
///
/// Variables absent from the environment are skipped.
#[must_use]
pub fn capture_passthrough_env() -> Vec<String> {
    ENV_PASSTHROUGH
        .iter()
        .filter_map(|name| env::var(name).ok().map(|value| format!("{name}={value}")))
        .collect()
}
