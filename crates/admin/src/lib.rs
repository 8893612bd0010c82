//! Car admin panel: the car card view-model and the list panel it
//! reports to.
//!
//! A [`CarCard`](card::CarCard) renders one car and drives its edit and
//! delete modals through a [`CarService`](rental_client::CarService).
//! Results travel upward as [`AdminEvent`](rental_events::AdminEvent)s,
//! which the [`CarListPanel`](panel::CarListPanel) consumes to refetch
//! the list and surface notifications.

pub mod card;
pub mod config;
pub mod panel;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;
