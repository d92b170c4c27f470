//! Event publication workflow.
//!
//! [`EventPublicationCoordinator`] persists a new event and announces it to
//! every directory participant. The announcement is a bounded-concurrency
//! fan-out joined before `publish` returns; its outcome is never visible
//! to the caller.

use std::sync::Arc;

use eventhub_core::error::CoreError;
use eventhub_core::notification::NotificationType;
use eventhub_core::roles::Role;
use eventhub_core::validation::validate_event_draft;
use eventhub_db::models::event::{CreateEvent, Event};
use eventhub_db::EventStore;

use crate::compose;
use crate::delivery::sink::NewNotification;
use crate::directory::DirectoryClient;
use crate::dispatcher::NotificationDispatcher;

/// Coordinates event creation and the "new event" fan-out.
pub struct EventPublicationCoordinator {
    events: Arc<dyn EventStore>,
    directory: DirectoryClient,
    dispatcher: NotificationDispatcher,
}

impl EventPublicationCoordinator {
    pub fn new(
        events: Arc<dyn EventStore>,
        directory: DirectoryClient,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            events,
            directory,
            dispatcher,
        }
    }

    /// Validate and persist an event, then announce it.
    ///
    /// Fails only on validation or on the store write.
    pub async fn publish(&self, draft: CreateEvent) -> Result<Event, CoreError> {
        validate_event_draft(&draft.title, draft.starts_at, draft.ends_at)?;

        let event = self.events.create_event(&draft).await?;
        tracing::info!(
            event_id = event.id,
            organizer_id = ?event.organizer_id,
            "Event published"
        );

        self.announce(&event).await;
        Ok(event)
    }

    /// Send one `NEW_EVENT` notification per participant with an id.
    async fn announce(&self, event: &Event) {
        let participants = self.directory.fetch_by_role(Role::Participant).await;
        if participants.is_empty() {
            tracing::debug!(event_id = event.id, "No participants to notify");
            return;
        }

        let organizer_name = match event.organizer_id {
            Some(organizer_id) => self
                .directory
                .fetch_profile(organizer_id)
                .await
                .and_then(|profile| profile.display_name),
            None => None,
        };
        let message = compose::new_event_message(&event.title, organizer_name.as_deref());

        let notifications: Vec<NewNotification> = participants
            .iter()
            .filter_map(|participant| participant.id)
            .map(|recipient_id| {
                NewNotification::new(
                    recipient_id,
                    Some(event.id),
                    NotificationType::NewEvent,
                    message.clone(),
                )
            })
            .collect();

        let skipped = participants.len() - notifications.len();
        if skipped > 0 {
            tracing::warn!(
                event_id = event.id,
                skipped,
                "Directory returned participants without id, skipping them"
            );
        }

        tracing::debug!(
            event_id = event.id,
            recipients = notifications.len(),
            "Announcing new event"
        );
        self.dispatcher.fan_out(notifications).await;
    }
}
