//! The car list that cards report to.
//!
//! [`CarListPanel`] owns the fetched cars and one [`CarCard`] per car.
//! It subscribes to the shared [`EventBus`], keeps the most recent
//! notification (last write wins) and refetches the list when a card
//! asks for it.

use std::sync::Arc;

use chrono::FixedOffset;
use rental_client::{ApiOutcome, CarService};
use rental_core::error::CoreError;
use rental_core::form::CarForm;
use rental_core::types::DbId;
use rental_events::{AdminEvent, EventBus, Notification};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::broadcast::Receiver;

use crate::card::{ActionOutcome, CarCard};
use crate::config::utc;

pub struct CarListPanel {
    service: Arc<dyn CarService>,
    events: Arc<EventBus>,
    receiver: Receiver<AdminEvent>,
    cards: Vec<CarCard>,
    notification: Option<Notification>,
    needs_refresh: bool,
    display_offset: FixedOffset,
}

impl CarListPanel {
    /// Create an empty panel. It starts out needing a refresh.
    pub fn new(service: Arc<dyn CarService>, events: Arc<EventBus>) -> Self {
        let receiver = events.subscribe();
        Self {
            service,
            events,
            receiver,
            cards: Vec::new(),
            notification: None,
            needs_refresh: true,
            display_offset: utc(),
        }
    }

    pub fn with_display_offset(mut self, offset: FixedOffset) -> Self {
        self.display_offset = offset;
        self
    }

    pub fn cards(&self) -> &[CarCard] {
        &self.cards
    }

    pub fn card_mut(&mut self, id: DbId) -> Result<&mut CarCard, CoreError> {
        self.cards
            .iter_mut()
            .find(|card| card.car_id() == id)
            .ok_or(CoreError::NotFound { entity: "car", id })
    }

    /// The latest notification raised by the panel or any of its cards.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    /// Refetch the car list and rebuild the cards.
    ///
    /// A rejected fetch raises a red notification and keeps the current
    /// cards. A transport failure is logged only.
    pub async fn refresh(&mut self) -> ActionOutcome {
        self.needs_refresh = false;

        match self.service.get_car_list().await {
            Ok(ApiOutcome::Success(cars)) => {
                tracing::debug!(count = cars.len(), "Car list loaded");
                self.cards = cars
                    .into_iter()
                    .map(|car| {
                        CarCard::new(car, Arc::clone(&self.service), Arc::clone(&self.events))
                            .with_display_offset(self.display_offset)
                    })
                    .collect();
                ActionOutcome::Completed
            }
            Ok(ApiOutcome::Failure(message)) => {
                tracing::info!(%message, "Car list rejected");
                self.notification = Some(Notification::red(message));
                ActionOutcome::Rejected
            }
            Err(e) => {
                tracing::error!(error = %e, "Car list request failed");
                ActionOutcome::TransportFailed
            }
        }
    }

    /// Submit a new car.
    ///
    /// Outcomes travel over the bus like a card's, so they are picked up
    /// by the next [`drain_events`](Self::drain_events).
    pub async fn add_car(&mut self, form: &CarForm) -> ActionOutcome {
        if let Err(e) = form.check() {
            tracing::info!(error = %e, "Car form rejected before submit");
            self.events
                .publish(AdminEvent::Notify(Notification::red(e.to_string())));
            return ActionOutcome::Rejected;
        }

        match self.service.add_car(form).await {
            Ok(ApiOutcome::Success(message)) => {
                tracing::info!(model = %form.model, "Car added");
                self.events
                    .publish_mutation(Notification::green(message), None);
                ActionOutcome::Completed
            }
            Ok(ApiOutcome::Failure(message)) => {
                tracing::info!(%message, "Add car failed");
                self.events
                    .publish(AdminEvent::Notify(Notification::red(message)));
                ActionOutcome::Rejected
            }
            Err(e) => {
                tracing::error!(error = %e, "Add car request failed");
                ActionOutcome::TransportFailed
            }
        }
    }

    /// Apply every pending event. Returns how many were consumed.
    pub fn drain_events(&mut self) -> usize {
        let mut consumed = 0;

        loop {
            match self.receiver.try_recv() {
                Ok(AdminEvent::Notify(notification)) => {
                    self.notification = Some(notification);
                    consumed += 1;
                }
                Ok(AdminEvent::RefreshRequested { car_id }) => {
                    tracing::debug!(?car_id, "Refresh requested");
                    self.needs_refresh = true;
                    consumed += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    // Lost events may have included a refresh request.
                    tracing::warn!(skipped, "Admin events dropped");
                    self.needs_refresh = true;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }

        consumed
    }

    /// Drain pending events and refetch if any of them asked for it.
    pub async fn sync(&mut self) -> Option<ActionOutcome> {
        self.drain_events();
        if self.needs_refresh {
            Some(self.refresh().await)
        } else {
            None
        }
    }
}
