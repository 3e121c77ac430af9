//! Persistent volume provisioning.

use tracing::debug;

use crate::config::VolumeMapping;
use crate::runtime::ContainerRuntime;
use crate::Result;

/// Create each named volume that is not already present.
///
/// Idempotent: volumes that exist are left untouched, and nothing is
/// ever deleted here — the volumes are what carries data across
/// container recreation.
///
/// # Errors
///
/// Propagates runtime failures from the volume listing or creation.
pub async fn ensure_volumes<R: ContainerRuntime>(
    runtime: &R,
    volumes: &[VolumeMapping],
) -> Result<()> {
    let existing = runtime.list_volume_names().await?;
    for mapping in volumes {
        if existing.iter().any(|name| name == mapping.name) {
            debug!(volume = mapping.name, "volume already present");
        } else {
            runtime.create_volume(mapping.name).await?;
            debug!(volume = mapping.name, "volume created");
        }
    }
    Ok(())
}
