use caldialog::components::widget::models::{CalendarEvent, ClientId, EventKey, ServerId};
use caldialog::components::widget::{CalendarWidget, InMemoryWidget};
use caldialog::components::StoreHandle;
use caldialog::session::EventEditSession;
use caldialog::startup;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Scripted walkthrough of the edit session against the configured store:
/// one optimistic edit, one deletion. Store failures show up through the
/// out-of-band channel rather than the session results.
#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting caldialog demo");

    // Load configuration
    let config = startup::load_config().await?;

    // Spawn the store actor and drain its failure channel in the background
    let (store, mut failure_rx) = StoreHandle::new(Arc::clone(&config)).await;
    let store = Arc::new(store);

    tokio::spawn(async move {
        while let Some(failure) = failure_rx.recv().await {
            // Stand-in for a UI toast
            warn!("Store reported a failure: {}", failure);
        }
    });

    // Seed the widget the way a calendar page would after its initial fetch
    let start = Utc::now();
    let widget = Arc::new(RwLock::new(InMemoryWidget::new(vec![CalendarEvent {
        client_id: ClientId::new("c1"),
        server_id: Some(ServerId(42)),
        person: "alice".to_string(),
        start_time: start,
        end_time: Some(start + Duration::hours(1)),
    }])));

    // Edit the event's assignee
    let mut session = EventEditSession::new(
        EventKey::Server(ServerId(42)),
        Arc::clone(&widget),
        Arc::clone(&store),
    );
    session.update_draft("bob")?;
    session.submit().await?;
    info!(
        "Widget now shows: {:?}",
        widget.read().await.list_live_events()
    );

    // Reopen for the same event and delete it
    let mut session = EventEditSession::new(
        EventKey::Server(ServerId(42)),
        Arc::clone(&widget),
        Arc::clone(&store),
    );
    session.delete_event().await?;
    info!(
        "Widget after deletion: {:?}",
        widget.read().await.list_live_events()
    );

    // Give in-flight requests a moment before tearing the actor down
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    store.shutdown().await?;

    Ok(())
}
