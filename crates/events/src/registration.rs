//! Registration workflows.
//!
//! [`RegistrationCoordinator`] owns the register / unregister state
//! transitions and the notifications that follow them. The store write is
//! the only step that can fail the call; everything after it is
//! best-effort.

use std::sync::Arc;

use chrono::Utc;
use eventhub_core::error::CoreError;
use eventhub_core::types::DbId;
use eventhub_db::models::event::Event;
use eventhub_db::models::registration::{CreateRegistration, NewRegistration, Registration};
use eventhub_db::{EventStore, RegistrationStore};

use crate::compose::{self, RegistrationChange};
use crate::directory::DirectoryClient;
use crate::dispatcher::NotificationDispatcher;

/// Coordinates registrations and their notifications.
pub struct RegistrationCoordinator {
    events: Arc<dyn EventStore>,
    registrations: Arc<dyn RegistrationStore>,
    directory: DirectoryClient,
    dispatcher: NotificationDispatcher,
}

impl RegistrationCoordinator {
    pub fn new(
        events: Arc<dyn EventStore>,
        registrations: Arc<dyn RegistrationStore>,
        directory: DirectoryClient,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            events,
            registrations,
            directory,
            dispatcher,
        }
    }

    /// Register a participant to an event.
    ///
    /// 1. Reject an existing `(event, participant)` pair with `Conflict`.
    /// 2. Persist with `registered_at = now`, status defaulting to
    ///    `REGISTERED`. The store's unique index is the final guard against
    ///    concurrent duplicates and also yields `Conflict`.
    /// 3. Notify the participant, then the organizer if the event has one.
    pub async fn register(&self, input: NewRegistration) -> Result<Registration, CoreError> {
        let existing = self
            .registrations
            .find_by_event_and_participant(input.event_id, input.participant_id)
            .await?;
        if existing.is_some() {
            return Err(CoreError::Conflict(format!(
                "participant {} is already registered to event {}",
                input.participant_id, input.event_id
            )));
        }

        let saved = self
            .registrations
            .create_registration(&CreateRegistration {
                event_id: input.event_id,
                participant_id: input.participant_id,
                registered_at: Utc::now(),
                status: input.status.unwrap_or_default(),
            })
            .await?;

        tracing::info!(
            registration_id = saved.id,
            event_id = saved.event_id,
            participant_id = saved.participant_id,
            "Registration created"
        );

        self.notify(RegistrationChange::Registered, &saved).await;
        Ok(saved)
    }

    /// Remove a registration and notify the affected parties.
    ///
    /// The row is hard-deleted; no `CANCELLED` row is retained.
    pub async fn unregister(&self, registration_id: DbId) -> Result<(), CoreError> {
        let not_found = || CoreError::NotFound {
            entity: "Registration",
            id: registration_id,
        };

        let registration = self
            .registrations
            .find_registration(registration_id)
            .await?
            .ok_or_else(not_found)?;

        // Lost a race with a concurrent unregister.
        if !self.registrations.delete_registration(registration_id).await? {
            return Err(not_found());
        }

        tracing::info!(
            registration_id,
            event_id = registration.event_id,
            participant_id = registration.participant_id,
            "Registration deleted"
        );

        self.notify(RegistrationChange::Unregistered, &registration)
            .await;
        Ok(())
    }

    /// Send the participant notification and, when the event has an
    /// organizer, the organizer notification. Never fails.
    async fn notify(&self, change: RegistrationChange, registration: &Registration) {
        let event = self.resolve_event(registration.event_id).await;
        let title = compose::event_title(registration.event_id, event.as_ref());

        self.dispatcher
            .send(
                registration.participant_id,
                Some(registration.event_id),
                change.participant_type(),
                compose::participant_message(change, &title),
            )
            .await;

        let Some(organizer_id) = event.as_ref().and_then(|e| e.organizer_id) else {
            return;
        };

        let profile = self
            .directory
            .fetch_profile(registration.participant_id)
            .await;
        let message = compose::organizer_message(
            change,
            &title,
            registration.participant_id,
            profile.as_ref(),
        );

        self.dispatcher
            .send(
                organizer_id,
                Some(registration.event_id),
                change.organizer_type(),
                message,
            )
            .await;
    }

    /// Best-effort event lookup for message composition.
    async fn resolve_event(&self, event_id: DbId) -> Option<Event> {
        match self.events.find_event(event_id).await {
            Ok(event) => {
                if event.is_none() {
                    tracing::debug!(event_id, "Registration refers to an unknown event");
                }
                event
            }
            Err(e) => {
                tracing::warn!(
                    event_id,
                    error = %e,
                    "Event lookup failed, notifying with fallback title"
                );
                None
            }
        }
    }
}
