use crate::components::store::{EventStore, EventWrite};
use crate::components::widget::models::{CalendarEvent, EventKey};
use crate::components::widget::CalendarWidget;
use crate::error::{invalid_state_error, not_found_error, validation_error, CalResult};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Lifecycle of an edit session.
///
/// A session is bound to one opening of the dialog for one event: it accepts
/// any number of draft updates while `Editing` and becomes `Closed` once a
/// submit or deletion has gone through. A closed session rejects everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Editing,
    Closed,
}

/// Edit session for a single calendar event.
///
/// Owns the in-progress draft of the event's assigned person, and reconciles
/// it on submit against the widget's live list and the backing store. The
/// session never keeps a copy of the event; it re-resolves the canonical
/// instance from the widget on every submit/delete so the mutation always
/// lands on the one live object the widget is tracking.
///
/// Widget updates are synchronous and optimistic; store requests are issued
/// fire-and-forget, with failures reported on the store's out-of-band channel.
pub struct EventEditSession<W, S> {
    key: EventKey,
    widget: Arc<RwLock<W>>,
    store: Arc<S>,
    draft: String,
    state: SessionState,
}

impl<W, S> EventEditSession<W, S>
where
    W: CalendarWidget,
    S: EventStore,
{
    /// Open a session for the event identified by `key`. The draft starts
    /// empty.
    pub fn new(key: EventKey, widget: Arc<RwLock<W>>, store: Arc<S>) -> Self {
        Self {
            key,
            widget,
            store,
            draft: String::new(),
            state: SessionState::Editing,
        }
    }

    /// The current draft text
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Whether the session has been closed by a submit or deletion
    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Replace the draft with `text`.
    ///
    /// Touches only the session's own state; the widget sees nothing until
    /// submit. Accepts any string, including empty.
    pub fn update_draft(&mut self, text: impl Into<String>) -> CalResult<()> {
        self.ensure_editing("update_draft")?;
        self.draft = text.into();
        Ok(())
    }

    /// Submit the draft: update the widget synchronously, then persist.
    ///
    /// Returns `Ok(true)` once the widget has been updated, meaning a form's
    /// default submission must be suppressed. The store request is issued but
    /// never awaited; its outcome cannot affect the result.
    pub async fn submit(&mut self) -> CalResult<bool> {
        self.ensure_editing("submit")?;

        let mut widget = self.widget.write().await;
        let canonical = resolve(&*widget, &self.key)?;

        let person = self.draft.trim();
        if person.is_empty() {
            return Err(validation_error(
                "an event must have a non-empty assignee",
            ));
        }

        // Resolve canonical, build a modified copy, replace explicitly
        let mut updated = canonical;
        updated.person = person.to_string();
        widget.update_event(updated.clone());
        widget.render(&updated);
        drop(widget);

        self.state = SessionState::Closed;

        match updated.server_id {
            Some(server_id) => {
                let write = EventWrite {
                    id: server_id,
                    person: updated.person,
                    start_time: updated.start_time,
                    end_time: updated.end_time,
                };
                if let Err(e) = self.store.persist_event(write).await {
                    // Widget is already updated; failure to even issue the
                    // request is handled like any other store failure
                    warn!("Could not issue event update for {}: {}", server_id, e);
                }
            }
            None => {
                debug!(
                    "Event {} has no server id yet, skipping persistence",
                    updated.client_id
                );
            }
        }

        Ok(true)
    }

    /// Delete the event: issue the store deletion, then drop the event from
    /// the widget.
    ///
    /// The store request is issued first; the widget removal is a consequence
    /// of a deletion already in flight, never a precondition for it. There is
    /// no rollback if the request later fails.
    pub async fn delete_event(&mut self) -> CalResult<()> {
        self.ensure_editing("delete_event")?;

        let canonical = {
            let widget = self.widget.read().await;
            resolve(&*widget, &self.key)?
        };

        match canonical.server_id {
            Some(server_id) => {
                if let Err(e) = self.store.delete_event(server_id).await {
                    warn!("Could not issue event deletion for {}: {}", server_id, e);
                }
            }
            None => {
                debug!(
                    "Event {} has no server id yet, skipping store deletion",
                    canonical.client_id
                );
            }
        }

        // Widget removal is keyed by client id; the widget knows nothing
        // about server identifiers
        self.widget
            .write()
            .await
            .remove_events(&[canonical.client_id]);

        self.state = SessionState::Closed;
        Ok(())
    }

    fn ensure_editing(&self, operation: &str) -> CalResult<()> {
        match self.state {
            SessionState::Editing => Ok(()),
            SessionState::Closed => Err(invalid_state_error(&format!(
                "{} called on a closed session",
                operation
            ))),
        }
    }
}

/// Linear scan of the widget's live list for the session's event. The
/// identifier uniqueness invariant rules out ties.
fn resolve<W: CalendarWidget>(widget: &W, key: &EventKey) -> CalResult<CalendarEvent> {
    widget
        .list_live_events()
        .into_iter()
        .find(|event| key.matches(event))
        .ok_or_else(|| not_found_error(&format!("no live event with {}", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::widget::models::{ClientId, ServerId};
    use crate::components::widget::InMemoryWidget;
    use crate::error::Error;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    /// Store double that accepts everything and remembers nothing
    struct NullStore;

    #[async_trait]
    impl EventStore for NullStore {
        async fn persist_event(&self, _write: EventWrite) -> CalResult<()> {
            Ok(())
        }

        async fn delete_event(&self, _server_id: ServerId) -> CalResult<()> {
            Ok(())
        }
    }

    fn sample_event() -> CalendarEvent {
        CalendarEvent {
            client_id: ClientId::new("c1"),
            server_id: Some(ServerId(42)),
            person: "alice".to_string(),
            start_time: Utc.with_ymd_and_hms(2023, 5, 1, 9, 0, 0).unwrap(),
            end_time: Some(Utc.with_ymd_and_hms(2023, 5, 1, 10, 0, 0).unwrap()),
        }
    }

    fn session_for(
        key: EventKey,
    ) -> (
        EventEditSession<InMemoryWidget, NullStore>,
        Arc<RwLock<InMemoryWidget>>,
    ) {
        let widget = Arc::new(RwLock::new(InMemoryWidget::new(vec![sample_event()])));
        let session = EventEditSession::new(key, Arc::clone(&widget), Arc::new(NullStore));
        (session, widget)
    }

    #[tokio::test]
    async fn test_draft_is_session_local_until_submit() {
        let (mut session, widget) = session_for(EventKey::Server(ServerId(42)));

        session.update_draft("bob").unwrap();
        session.update_draft("carol").unwrap();
        assert_eq!(session.draft(), "carol");

        // Nothing reached the widget yet
        assert_eq!(widget.read().await.list_live_events()[0].person, "alice");
    }

    #[tokio::test]
    async fn test_submit_applies_trimmed_draft() {
        let (mut session, widget) = session_for(EventKey::Server(ServerId(42)));

        session.update_draft("  bob  ").unwrap();
        assert!(session.submit().await.unwrap());

        assert_eq!(widget.read().await.list_live_events()[0].person, "bob");
        assert_eq!(widget.read().await.render_requests(), 1);
    }

    #[tokio::test]
    async fn test_submit_resolves_by_client_id_fallback() {
        let (mut session, widget) = session_for(EventKey::Client(ClientId::new("c1")));

        session.update_draft("bob").unwrap();
        session.submit().await.unwrap();

        assert_eq!(widget.read().await.list_live_events()[0].person, "bob");
    }

    #[tokio::test]
    async fn test_whitespace_draft_is_rejected_before_mutation() {
        let (mut session, widget) = session_for(EventKey::Server(ServerId(42)));

        session.update_draft("   ").unwrap();
        let err = session.submit().await.unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(widget.read().await.list_live_events()[0].person, "alice");
        assert_eq!(widget.read().await.render_requests(), 0);
        // Rejected submit leaves the dialog usable
        assert!(!session.is_closed());
    }

    #[tokio::test]
    async fn test_missing_event_fails_not_found() {
        let (mut session, widget) = session_for(EventKey::Server(ServerId(99)));

        session.update_draft("bob").unwrap();
        let err = session.submit().await.unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(widget.read().await.list_live_events().len(), 1);
        assert!(!session.is_closed());
    }

    #[tokio::test]
    async fn test_delete_removes_event_from_live_list() {
        let (mut session, widget) = session_for(EventKey::Server(ServerId(42)));

        session.delete_event().await.unwrap();

        assert!(widget.read().await.list_live_events().is_empty());
        assert!(session.is_closed());
    }

    #[tokio::test]
    async fn test_operations_after_close_are_invalid_state() {
        let (mut session, _widget) = session_for(EventKey::Server(ServerId(42)));

        session.update_draft("bob").unwrap();
        session.submit().await.unwrap();
        assert!(session.is_closed());

        assert!(matches!(
            session.update_draft("x").unwrap_err(),
            Error::InvalidState(_)
        ));
        assert!(matches!(
            session.submit().await.unwrap_err(),
            Error::InvalidState(_)
        ));
        assert!(matches!(
            session.delete_event().await.unwrap_err(),
            Error::InvalidState(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_after_delete_is_invalid_state() {
        let (mut session, _widget) = session_for(EventKey::Server(ServerId(42)));

        session.delete_event().await.unwrap();

        assert!(matches!(
            session.delete_event().await.unwrap_err(),
            Error::InvalidState(_)
        ));
    }
}
