// Export components
pub mod store;
pub mod widget;

// Re-export the store handle and widget seam
pub use store::{EventStore, StoreHandle};
pub use widget::{CalendarWidget, InMemoryWidget};
