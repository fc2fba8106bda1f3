mod actor;
mod handle;
pub mod models;
mod notifications;

pub use handle::StoreHandle;
pub use models::{EventWrite, StoreFailure, StoreOperation};

use crate::components::widget::models::ServerId;
use crate::error::CalResult;
use async_trait::async_trait;

/// The backing event store, as seen by an edit session.
///
/// Both operations are fire-and-forget: they return once the request has been
/// handed to the transport, never awaiting its outcome. An `Err` means the
/// request could not even be issued; request-level failures are reported
/// through the out-of-band [`StoreFailure`] channel instead.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Issue a `PUT /calendar_event` carrying the full event payload.
    async fn persist_event(&self, write: EventWrite) -> CalResult<()>;

    /// Issue a `DELETE /calendar_event?id={server_id}`.
    async fn delete_event(&self, server_id: ServerId) -> CalResult<()>;
}
