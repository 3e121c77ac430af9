//! Image resolution, pull, and layer-progress rendering.

use std::io::Write;

use futures_util::StreamExt;
use tracing::warn;

use crate::config::split_image_tag;
use crate::runtime::{ContainerRuntime, PullProgress};
use crate::{AppError, Result};

/// Whether the reference must be pulled before the container can start.
///
/// A namespaced reference tagged `latest` is always refreshed; anything
/// else is pulled only when no local copy exists.
#[must_use]
pub fn needs_pull(reference: &str, has_local: bool) -> bool {
    let (repo, tag) = split_image_tag(reference);
    (repo.contains('/') && tag == Some("latest")) || !has_local
}

/// Make sure a usable copy of the image exists locally, pulling when
/// required.
///
/// A failed pull is downgraded to a stderr warning when a cached copy of
/// the image is already present; startup then continues on the cache.
///
/// # Errors
///
/// Returns `AppError::Image` when the pull fails and there is no cached
/// copy to fall back on.
pub async fn ensure_image<R: ContainerRuntime>(runtime: &R, reference: &str) -> Result<()> {
    let has_local = runtime.has_local_image(reference).await?;
    if !needs_pull(reference, has_local) {
        return Ok(());
    }

    println!("Downloading image {reference}...");

    match pull(runtime, reference).await {
        Ok(()) => {
            println!("Successfully pulled image {reference}.");
            Ok(())
        }
        Err(err) if has_local => {
            warn!(%err, reference, "image pull failed, continuing on cached copy");
            eprintln!("Error: failed to download image {reference}. Using cached version.");
            Ok(())
        }
        Err(err) => Err(AppError::Image(format!(
            "failed to download image {reference}: {err}"
        ))),
    }
}

/// Consume the pull stream, rendering per-layer progress to stdout.
async fn pull<R: ContainerRuntime>(runtime: &R, reference: &str) -> Result<()> {
    let mut stream = runtime.pull_image(reference).await?;
    let mut renderer = ProgressRenderer::new();
    let mut stdout = std::io::stdout();

    while let Some(message) = stream.next().await {
        let progress = message?;
        if let Some(error) = progress.error {
            return Err(AppError::Image(error));
        }
        renderer.render(&progress, &mut stdout)?;
    }

    Ok(())
}

/// In-place terminal renderer for layer pull progress.
///
/// Each layer gets one line; subsequent updates for a known layer move
/// the cursor back up to its line with ANSI escapes, clear it, and
/// rewrite it. Cosmetic only — rendering failures are surfaced as `Io`
/// but nothing depends on the screen state.
#[derive(Debug, Default)]
pub struct ProgressRenderer {
    layer_order: Vec<String>,
}

impl ProgressRenderer {
    /// Create an empty renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render one progress message. Messages without a layer id are
    /// ignored (whole-image status lines).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` when the writer fails.
    pub fn render<W: Write>(&mut self, progress: &PullProgress, out: &mut W) -> Result<()> {
        let Some(layer_id) = &progress.layer_id else {
            return Ok(());
        };

        let line = format!(
            "Layer {layer_id}: {} {}",
            progress.status, progress.progress
        );

        if let Some(index) = self.layer_order.iter().position(|id| id == layer_id) {
            let up = self.layer_order.len() - index;
            write!(out, "\x1b[{up}A\x1b[K")?;
            writeln!(out, "{line}")?;
            write!(out, "\x1b[{up}B")?;
        } else {
            self.layer_order.push(layer_id.clone());
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        Ok(())
    }
}
