use super::models::StoreFailure;
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Publish a store failure on the out-of-band channel.
///
/// Failures are always logged; forwarding to the subscriber is best-effort so
/// a full or dropped receiver never stalls the actor. The widget has already
/// been updated optimistically by the time this runs, so there is nothing to
/// roll back here.
pub async fn report_failure(failure_tx: &mpsc::Sender<StoreFailure>, failure: StoreFailure) {
    error!("Store request failed: {}", failure);

    if failure_tx.try_send(failure).is_err() {
        debug!("No active failure subscriber; report dropped after logging");
    }
}
