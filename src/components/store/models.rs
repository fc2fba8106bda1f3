use crate::components::widget::models::ServerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of a `PUT /calendar_event` request.
///
/// `end_time` is serialized as an explicit `null` for point-in-time events;
/// the store distinguishes "no end" from "field missing".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventWrite {
    pub id: ServerId,
    pub person: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

/// Which store request a failure report refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Persist,
    Delete,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOperation::Persist => write!(f, "persist"),
            StoreOperation::Delete => write!(f, "delete"),
        }
    }
}

/// Out-of-band report of a failed store request.
///
/// The widget is never rolled back on failure; these reports exist so the
/// embedding UI can still surface the problem (toast, status line).
#[derive(Debug, Clone)]
pub struct StoreFailure {
    pub operation: StoreOperation,
    pub server_id: ServerId,
    pub message: String,
}

impl fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of event {} failed: {}",
            self.operation, self.server_id, self.message
        )
    }
}
