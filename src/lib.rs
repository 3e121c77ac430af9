#![forbid(unsafe_code)]

//! Library surface of the `insighter` launcher.
//!
//! Everything the binary does — runtime health check, volume
//! provisioning, image pull, container replacement, readiness watch,
//! log attach — lives here behind the [`runtime::ContainerRuntime`]
//! seam so it can be tested without a live Docker daemon.

pub mod config;
pub mod errors;
pub mod launcher;
pub mod runtime;

pub use config::LaunchConfig;
pub use errors::{AppError, Result};
