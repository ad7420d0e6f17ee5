use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use crate::state::AppState;

const SWEEP_INTERVAL_SECS: u64 = 600;

/// Periodic maintenance: drops expired password-reset tickets and re-runs the
/// vendor rating reconciliation as a backstop for the write-path recompute.
pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting background maintenance worker...");

    loop {
        async {
            match state.account_repo.clear_expired_reset_tickets(Utc::now()).await {
                Ok(0) => {}
                Ok(n) => info!("Cleared {} expired reset tickets", n),
                Err(e) => error!("Reset ticket sweep failed: {:?}", e),
            }

            match state.review_repo.reconcile_vendor_aggregates().await {
                Ok(0) => {}
                Ok(n) => info!("Reconciled rating aggregates for {} vendors", n),
                Err(e) => error!("Vendor aggregate reconciliation failed: {:?}", e),
            }
        }
            .instrument(info_span!("maintenance_sweep"))
            .await;

        sleep(Duration::from_secs(SWEEP_INTERVAL_SECS)).await;
    }
}
