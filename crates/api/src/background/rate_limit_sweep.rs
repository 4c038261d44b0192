//! Periodic eviction of expired rate-limit windows.
//!
//! The limiter never deletes entries on its own; this task is the only
//! eviction path.

use std::sync::Arc;
use std::time::Duration;

use ambassadors_core::rate_limit::RateLimitStore;
use tokio_util::sync::CancellationToken;

/// Run the sweep loop every `interval` until `cancel` is triggered.
pub async fn run(store: Arc<dyn RateLimitStore>, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Rate limit sweep started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Rate limit sweep stopping");
                break;
            }
            _ = ticker.tick() => {
                match store.sweep().await {
                    Ok(removed) if removed > 0 => {
                        tracing::debug!(removed, "Rate limit sweep: evicted expired windows");
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::error!(error = %e, "Rate limit sweep failed");
                    }
                }
            }
        }
    }
}
