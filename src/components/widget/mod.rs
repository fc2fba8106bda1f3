mod memory;
pub mod models;

pub use memory::InMemoryWidget;
pub use models::{CalendarEvent, ClientId, EventKey, ServerId};

/// The calendar rendering widget, as seen by an edit session.
///
/// All operations are synchronous and always succeed; internal consistency of
/// the event list is the widget's own contract. The session only ever mutates
/// the list through `update_event` and `remove_events`.
pub trait CalendarWidget: Send + Sync {
    /// Snapshot of the widget's current live event list.
    fn list_live_events(&self) -> Vec<CalendarEvent>;

    /// Replace the live event carrying `event.client_id` with `event`.
    fn update_event(&mut self, event: CalendarEvent);

    /// Request a redraw of the given event.
    fn render(&mut self, event: &CalendarEvent);

    /// Drop every live event whose client id appears in `client_ids`.
    fn remove_events(&mut self, client_ids: &[ClientId]);
}
