//! View-model for a single car card and its edit/delete modals.
//!
//! The card never touches the list it belongs to. After a mutation it
//! publishes a notification and a refresh request on the shared
//! [`EventBus`] and leaves the refetch to whoever owns the list.

use std::fmt;
use std::sync::Arc;

use chrono::FixedOffset;
use rental_client::{ApiOutcome, CarService};
use rental_core::car::Car;
use rental_core::form::CarForm;
use rental_core::types::DbId;
use rental_events::{AdminEvent, EventBus, Notification};

use crate::config::utc;
use crate::view::CardView;

/// Fixed notification shown after a delete.
pub const DELETED_MESSAGE: &str = "Data Berhasil Dihapus";

/// Which modal, if any, the card has open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Idle,
    EditOpen,
    DeleteOpen,
}

/// Which branch a confirm handler took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The request resolved and the parent was asked to refresh.
    Completed,
    /// The server or local validation rejected the request.
    Rejected,
    /// The request never produced a response; only logged.
    TransportFailed,
}

pub struct CarCard {
    car: Car,
    modal: ModalState,
    service: Arc<dyn CarService>,
    events: Arc<EventBus>,
    display_offset: FixedOffset,
}

impl fmt::Debug for CarCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarCard")
            .field("car_id", &self.car.id())
            .field("modal", &self.modal)
            .finish_non_exhaustive()
    }
}

impl CarCard {
    pub fn new(car: Car, service: Arc<dyn CarService>, events: Arc<EventBus>) -> Self {
        Self {
            car,
            modal: ModalState::Idle,
            service,
            events,
            display_offset: utc(),
        }
    }

    pub fn with_display_offset(mut self, offset: FixedOffset) -> Self {
        self.display_offset = offset;
        self
    }

    pub fn car(&self) -> &Car {
        &self.car
    }

    pub fn car_id(&self) -> DbId {
        self.car.id()
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    pub fn view(&self) -> CardView {
        CardView::new(&self.car, &self.display_offset)
    }

    // ---- modal state ----

    /// Open the edit modal, replacing any open modal.
    pub fn open_edit(&mut self) {
        self.modal = ModalState::EditOpen;
    }

    /// Open the delete confirmation, replacing any open modal.
    pub fn open_delete(&mut self) {
        self.modal = ModalState::DeleteOpen;
    }

    /// Cancel whichever modal is open.
    pub fn close_modal(&mut self) {
        self.modal = ModalState::Idle;
    }

    /// Form the edit modal starts from.
    pub fn edit_form(&self) -> CarForm {
        CarForm::from_car(&self.car)
    }

    // ---- confirm handlers ----

    /// Save the edit modal.
    ///
    /// Accepted: modal closes, green notification with the server
    /// message, refresh requested. Rejected (by the server or by local
    /// validation): red notification, modal stays open. Transport
    /// failure: logged, nothing else changes.
    pub async fn handle_update(&mut self, form: CarForm) -> ActionOutcome {
        let car_id = self.car.id();

        if let Err(e) = form.check() {
            tracing::info!(car_id, error = %e, "Car form rejected before submit");
            self.events
                .publish(AdminEvent::Notify(Notification::red(e.to_string())));
            return ActionOutcome::Rejected;
        }

        match self.service.update_car(car_id, &form).await {
            Ok(ApiOutcome::Success(message)) => {
                tracing::info!(car_id, "Car updated");
                self.modal = ModalState::Idle;
                self.events
                    .publish_mutation(Notification::green(message), Some(car_id));
                ActionOutcome::Completed
            }
            Ok(ApiOutcome::Failure(message)) => {
                tracing::info!(car_id, %message, "Update car failed");
                self.events
                    .publish(AdminEvent::Notify(Notification::red(message)));
                ActionOutcome::Rejected
            }
            Err(e) => {
                tracing::error!(car_id, error = %e, "Update car request failed");
                ActionOutcome::TransportFailed
            }
        }
    }

    /// Confirm the delete modal.
    ///
    /// Any resolved response counts as done: the envelope is not
    /// branched on, so a rejected delete still closes the modal, shows
    /// [`DELETED_MESSAGE`] and requests a refresh (the refetch then shows
    /// the car is still there). Transport failure is logged only.
    pub async fn handle_delete(&mut self) -> ActionOutcome {
        let car_id = self.car.id();

        match self.service.delete_car(car_id).await {
            Ok(outcome) => {
                if let ApiOutcome::Failure(message) = &outcome {
                    tracing::warn!(car_id, %message, "Delete resolved with a rejection");
                } else {
                    tracing::info!(car_id, "Car deleted");
                }
                self.modal = ModalState::Idle;
                self.events
                    .publish_mutation(Notification::black(DELETED_MESSAGE), Some(car_id));
                ActionOutcome::Completed
            }
            Err(e) => {
                tracing::error!(car_id, error = %e, "Delete car request failed");
                ActionOutcome::TransportFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use tokio::sync::broadcast::error::TryRecvError;
    use tokio::sync::broadcast::Receiver;

    use super::*;
    use crate::testing::{transport_error, ScriptedService};

    fn card_with(service: ScriptedService) -> (CarCard, Arc<ScriptedService>, Receiver<AdminEvent>) {
        let service = Arc::new(service);
        let events = Arc::new(EventBus::default());
        let rx = events.subscribe();
        let car = Car::new(11, "Avanza", "2021", 350000.0);
        let card = CarCard::new(car, service.clone(), events);
        (card, service, rx)
    }

    fn drain(rx: &mut Receiver<AdminEvent>) -> Vec<AdminEvent> {
        let mut events = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => return events,
                Err(e) => panic!("unexpected receive error: {e}"),
            }
        }
    }

    #[test]
    fn modals_start_closed_and_are_exclusive() {
        let (mut card, _, _) = card_with(ScriptedService::default());
        assert_eq!(card.modal(), ModalState::Idle);

        card.open_edit();
        assert_eq!(card.modal(), ModalState::EditOpen);

        card.open_delete();
        assert_eq!(card.modal(), ModalState::DeleteOpen);

        card.close_modal();
        assert_eq!(card.modal(), ModalState::Idle);
    }

    #[test]
    fn debug_output_names_car_and_modal() {
        let (mut card, _, _) = card_with(ScriptedService::default());
        card.open_delete();
        assert_eq!(
            format!("{card:?}"),
            "CarCard { car_id: 11, modal: DeleteOpen, .. }"
        );
    }

    #[test]
    fn edit_form_is_seeded_from_the_car() {
        let (card, _, _) = card_with(ScriptedService::default());
        let form = card.edit_form();
        assert_eq!(form.model, "Avanza");
        assert_eq!(form.price, 350000.0);
    }

    #[tokio::test]
    async fn successful_update_closes_modal_and_requests_refresh() {
        let (mut card, service, mut rx) = card_with(
            ScriptedService::default().on_update(Ok(ApiOutcome::Success("Car updated".into()))),
        );
        card.open_edit();

        let form = card.edit_form();
        let outcome = card.handle_update(form).await;

        assert_eq!(outcome, ActionOutcome::Completed);
        assert_eq!(card.modal(), ModalState::Idle);
        assert_eq!(service.calls(), vec!["update:11"]);
        assert_eq!(
            drain(&mut rx),
            vec![
                AdminEvent::Notify(Notification::green("Car updated")),
                AdminEvent::refresh_for(11),
            ]
        );
    }

    #[tokio::test]
    async fn rejected_update_keeps_modal_open_with_red_notification() {
        let (mut card, _, mut rx) = card_with(
            ScriptedService::default()
                .on_update(Ok(ApiOutcome::Failure("Model sudah terdaftar".into()))),
        );
        card.open_edit();

        let form = card.edit_form();
        let outcome = card.handle_update(form).await;

        assert_eq!(outcome, ActionOutcome::Rejected);
        assert_eq!(card.modal(), ModalState::EditOpen);
        assert_eq!(
            drain(&mut rx),
            vec![AdminEvent::Notify(Notification::red("Model sudah terdaftar"))]
        );
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_service() {
        let (mut card, service, mut rx) = card_with(ScriptedService::default());
        card.open_edit();

        let mut form = card.edit_form();
        form.model.clear();
        let outcome = card.handle_update(form).await;

        assert_eq!(outcome, ActionOutcome::Rejected);
        assert_eq!(card.modal(), ModalState::EditOpen);
        assert!(service.calls().is_empty());
        let events = drain(&mut rx);
        assert_matches!(
            events.as_slice(),
            [AdminEvent::Notify(n)] if n.color == rental_events::NotificationColor::Red
                && n.message.contains("Model is required")
        );
    }

    #[tokio::test]
    async fn update_transport_failure_is_swallowed() {
        let (mut card, _, mut rx) =
            card_with(ScriptedService::default().on_update(Err(transport_error())));
        card.open_edit();

        let form = card.edit_form();
        let outcome = card.handle_update(form).await;

        assert_eq!(outcome, ActionOutcome::TransportFailed);
        assert_eq!(card.modal(), ModalState::EditOpen);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn delete_emits_fixed_message_and_refresh() {
        let (mut card, service, mut rx) = card_with(
            ScriptedService::default().on_delete(Ok(ApiOutcome::Success("deleted".into()))),
        );
        card.open_delete();

        let outcome = card.handle_delete().await;

        assert_eq!(outcome, ActionOutcome::Completed);
        assert_eq!(card.modal(), ModalState::Idle);
        assert_eq!(service.calls(), vec!["delete:11"]);
        assert_eq!(
            drain(&mut rx),
            vec![
                AdminEvent::Notify(Notification::black(DELETED_MESSAGE)),
                AdminEvent::refresh_for(11),
            ]
        );
    }

    #[tokio::test]
    async fn delete_does_not_branch_on_rejection() {
        let (mut card, _, mut rx) = card_with(
            ScriptedService::default().on_delete(Ok(ApiOutcome::Failure("Car is rented".into()))),
        );
        card.open_delete();

        let outcome = card.handle_delete().await;

        assert_eq!(outcome, ActionOutcome::Completed);
        assert_eq!(card.modal(), ModalState::Idle);
        assert_eq!(
            drain(&mut rx),
            vec![
                AdminEvent::Notify(Notification::black(DELETED_MESSAGE)),
                AdminEvent::refresh_for(11),
            ]
        );
    }

    #[tokio::test]
    async fn delete_transport_failure_is_swallowed() {
        let (mut card, _, mut rx) =
            card_with(ScriptedService::default().on_delete(Err(transport_error())));
        card.open_delete();

        let outcome = card.handle_delete().await;

        assert_eq!(outcome, ActionOutcome::TransportFailed);
        assert_eq!(card.modal(), ModalState::DeleteOpen);
        assert!(drain(&mut rx).is_empty());
    }
}
