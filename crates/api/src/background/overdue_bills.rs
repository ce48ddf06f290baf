//! Periodic sweep that flips past-due pending bills to `overdue`.
//!
//! Runs on a fixed interval using `tokio::time::interval` until the
//! cancellation token fires. The sweep itself is a single UPDATE, so a missed
//! tick (server restart) is caught up on the next run.

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use veranda_db::repositories::BillRepo;

/// How often the sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the overdue-bill sweep loop until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Overdue bill sweep started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Overdue bill sweep stopping");
                break;
            }
            _ = interval.tick() => {
                match BillRepo::mark_overdue(&pool).await {
                    Ok(flipped) => {
                        if flipped > 0 {
                            tracing::info!(flipped, "Overdue bill sweep: bills marked overdue");
                        } else {
                            tracing::debug!("Overdue bill sweep: nothing past due");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Overdue bill sweep failed");
                    }
                }
            }
        }
    }
}
