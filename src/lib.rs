pub mod components;
pub mod config;
pub mod error;
pub mod session;
pub mod startup;

pub use components::store::{EventStore, StoreHandle};
pub use components::widget::{CalendarEvent, CalendarWidget, ClientId, EventKey, ServerId};
pub use session::EventEditSession;
