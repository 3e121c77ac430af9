//! Background readiness polling and browser launch.
//!
//! One cancellable task polls the application's readiness endpoint until
//! it answers 200, confirms the web root also answers 200, then fires
//! the injected ready action exactly once and finishes. Connection
//! failures and non-200 answers are retried forever — this task is a
//! convenience, never a startup dependency, and it reports nothing
//! upward.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Delay between readiness probes.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Path polled until the application reports it finished initializing.
pub const READY_PATH: &str = "/api/readyz";

/// Spawn the readiness watcher for the published host port.
///
/// `on_ready` receives the web root URL once both probes succeed. The
/// task exits when it fires or when `cancel` is triggered; the caller
/// joins the returned handle at its single wait point.
pub fn spawn_ready_watch<F>(
    port: u16,
    interval: Duration,
    cancel: CancellationToken,
    on_ready: F,
) -> JoinHandle<()>
where
    F: FnOnce(&str) + Send + 'static,
{
    let web_url = format!("http://localhost:{port}");
    tokio::spawn(watch(web_url, interval, cancel, on_ready))
}

async fn watch<F>(web_url: String, interval: Duration, cancel: CancellationToken, on_ready: F)
where
    F: FnOnce(&str) + Send + 'static,
{
    let client = reqwest::Client::new();
    let ready_url = format!("{web_url}{READY_PATH}");

    loop {
        if probe_ok(&client, &ready_url).await && probe_ok(&client, &web_url).await {
            debug!(%web_url, "application ready");
            on_ready(&web_url);
            return;
        }

        tokio::select! {
            () = cancel.cancelled() => return,
            () = tokio::time::sleep(interval) => {}
        }
    }
}

/// One GET probe; any transport error or non-200 status counts as not
/// ready.
async fn probe_ok(client: &reqwest::Client, url: &str) -> bool {
    match client.get(url).send().await {
        Ok(response) => response.status() == reqwest::StatusCode::OK,
        Err(err) => {
            debug!(%err, url, "readiness probe not reachable yet");
            false
        }
    }
}
