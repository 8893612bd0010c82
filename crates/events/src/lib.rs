//! Upward event channel for the car admin panel.
//!
//! Cards never call back into their parent. They publish
//! [`AdminEvent`]s on an [`EventBus`] instead, and whichever container
//! owns the car list subscribes and reacts (refetching, showing the
//! notification).

pub mod bus;
pub mod notification;

pub use bus::{AdminEvent, EventBus};
pub use notification::{Notification, NotificationColor};
