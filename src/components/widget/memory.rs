use super::models::{CalendarEvent, ClientId};
use super::CalendarWidget;

/// Vec-backed calendar widget used by the demo binary and in tests.
///
/// Upholds the one-event-per-client-id invariant: inserting or updating an
/// event replaces any live event with the same client id.
#[derive(Debug, Default)]
pub struct InMemoryWidget {
    events: Vec<CalendarEvent>,
    render_requests: usize,
}

impl InMemoryWidget {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        let mut widget = Self::default();
        for event in events {
            widget.insert(event);
        }
        widget
    }

    /// Add an event, replacing any existing event with the same client id
    pub fn insert(&mut self, event: CalendarEvent) {
        match self.events.iter_mut().find(|e| e.client_id == event.client_id) {
            Some(slot) => *slot = event,
            None => self.events.push(event),
        }
    }

    /// How many redraws have been requested since creation
    pub fn render_requests(&self) -> usize {
        self.render_requests
    }
}

impl CalendarWidget for InMemoryWidget {
    fn list_live_events(&self) -> Vec<CalendarEvent> {
        self.events.clone()
    }

    fn update_event(&mut self, event: CalendarEvent) {
        self.insert(event);
    }

    fn render(&mut self, _event: &CalendarEvent) {
        self.render_requests += 1;
    }

    fn remove_events(&mut self, client_ids: &[ClientId]) {
        self.events.retain(|e| !client_ids.contains(&e.client_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::widget::models::ServerId;
    use chrono::{TimeZone, Utc};

    fn event(client: &str, person: &str) -> CalendarEvent {
        CalendarEvent {
            client_id: ClientId::new(client),
            server_id: Some(ServerId(1)),
            person: person.to_string(),
            start_time: Utc.with_ymd_and_hms(2023, 5, 1, 9, 0, 0).unwrap(),
            end_time: Some(Utc.with_ymd_and_hms(2023, 5, 1, 10, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_update_replaces_instead_of_duplicating() {
        let mut widget = InMemoryWidget::new(vec![event("c1", "alice")]);

        widget.update_event(event("c1", "bob"));

        let live = widget.list_live_events();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].person, "bob");
    }

    #[test]
    fn test_update_of_unknown_event_adds_it() {
        let mut widget = InMemoryWidget::default();
        widget.update_event(event("c1", "alice"));
        assert_eq!(widget.list_live_events().len(), 1);
    }

    #[test]
    fn test_remove_events_by_client_id() {
        let mut widget = InMemoryWidget::new(vec![event("c1", "alice"), event("c2", "bob")]);

        widget.remove_events(&[ClientId::new("c1")]);

        let live = widget.list_live_events();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].client_id, ClientId::new("c2"));

        // Removing an absent id is a no-op
        widget.remove_events(&[ClientId::new("c1")]);
        assert_eq!(widget.list_live_events().len(), 1);
    }

    #[test]
    fn test_render_is_counted() {
        let mut widget = InMemoryWidget::new(vec![event("c1", "alice")]);
        let e = widget.list_live_events()[0].clone();

        widget.render(&e);
        widget.render(&e);

        assert_eq!(widget.render_requests(), 2);
    }
}
