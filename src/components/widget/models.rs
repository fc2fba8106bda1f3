use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Widget-local event identifier, stable for the widget's lifetime.
/// Never transmitted to the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned event identifier, used in all persistence requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerId(pub i64);

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identifier space an edit session resolves its event in.
///
/// Sessions prefer the server identifier; the widget-local identifier is the
/// fallback for events the store does not know about yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKey {
    Server(ServerId),
    Client(ClientId),
}

impl EventKey {
    /// Whether `event` is the one this key refers to. Each variant searches
    /// exactly one identifier space.
    pub fn matches(&self, event: &CalendarEvent) -> bool {
        match self {
            EventKey::Server(id) => event.server_id == Some(*id),
            EventKey::Client(id) => event.client_id == *id,
        }
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKey::Server(id) => write!(f, "server id {}", id),
            EventKey::Client(id) => write!(f, "client id {}", id),
        }
    }
}

/// The canonical event record as held by the widget's live list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub client_id: ClientId,
    /// None for an event the store has not assigned an identifier to yet
    pub server_id: Option<ServerId>,
    /// Display title / assigned person
    pub person: String,
    pub start_time: DateTime<Utc>,
    /// None for a point-in-time marker with no end
    pub end_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(client: &str, server: Option<i64>) -> CalendarEvent {
        CalendarEvent {
            client_id: ClientId::new(client),
            server_id: server.map(ServerId),
            person: "alice".to_string(),
            start_time: Utc.with_ymd_and_hms(2023, 5, 1, 9, 0, 0).unwrap(),
            end_time: None,
        }
    }

    #[test]
    fn test_event_key_matches_one_space_only() {
        let e = event("c1", Some(42));

        assert!(EventKey::Server(ServerId(42)).matches(&e));
        assert!(!EventKey::Server(ServerId(43)).matches(&e));

        assert!(EventKey::Client(ClientId::new("c1")).matches(&e));
        assert!(!EventKey::Client(ClientId::new("42")).matches(&e));
    }

    #[test]
    fn test_server_key_never_matches_unpersisted_event() {
        let e = event("c1", None);
        assert!(!EventKey::Server(ServerId(42)).matches(&e));
        assert!(EventKey::Client(ClientId::new("c1")).matches(&e));
    }
}
