#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use eventhub_core::roles::Role;
use eventhub_core::types::DbId;
use eventhub_db::models::event::{CreateEvent, Event};
use eventhub_db::models::registration::{CreateRegistration, Registration};
use eventhub_db::{EventStore, MemoryStore, RegistrationStore, StoreError};
use eventhub_events::{
    Directory, DirectoryClient, DirectoryError, EventPublicationCoordinator, NewNotification,
    NotificationDispatcher, NotificationSink, ParticipantProfile, RegistrationCoordinator,
    SinkError,
};

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Sink that records every submitted notification.
#[derive(Default)]
pub struct RecordingSink {
    received: Mutex<Vec<NewNotification>>,
}

impl RecordingSink {
    pub fn received(&self) -> Vec<NewNotification> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn submit(&self, notification: &NewNotification) -> Result<(), SinkError> {
        self.received.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Sink that rejects every submission.
pub struct FailingSink;

#[async_trait]
impl NotificationSink for FailingSink {
    async fn submit(&self, _notification: &NewNotification) -> Result<(), SinkError> {
        Err(SinkError::HttpStatus(502))
    }
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

/// In-process directory with a switchable outage.
#[derive(Default)]
pub struct StubDirectory {
    profiles: HashMap<DbId, ParticipantProfile>,
    participants: Vec<ParticipantProfile>,
    unreachable: AtomicBool,
}

impl StubDirectory {
    pub fn with_profile(mut self, id: DbId, name: &str, email: &str) -> Self {
        let profile = ParticipantProfile {
            id: Some(id),
            email: Some(email.to_string()),
            display_name: Some(name.to_string()),
            role: Some(Role::Participant.as_str().to_string()),
        };
        self.profiles.insert(id, profile.clone());
        self.participants.push(profile);
        self
    }

    /// Add a profile that resolves by id but is not listed as a participant.
    pub fn with_organizer(mut self, id: DbId, name: &str) -> Self {
        self.profiles.insert(
            id,
            ParticipantProfile {
                id: Some(id),
                email: None,
                display_name: Some(name.to_string()),
                role: Some(Role::Organizer.as_str().to_string()),
            },
        );
        self
    }

    /// List a participant entry that has no id.
    pub fn with_anonymous_participant(mut self) -> Self {
        self.participants.push(ParticipantProfile::default());
        self
    }

    pub fn unreachable(self) -> Self {
        self.unreachable.store(true, Ordering::SeqCst);
        self
    }

    fn check(&self) -> Result<(), DirectoryError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(DirectoryError::HttpStatus(503));
        }
        Ok(())
    }
}

#[async_trait]
impl Directory for StubDirectory {
    async fn profile(&self, id: DbId) -> Result<Option<ParticipantProfile>, DirectoryError> {
        self.check()?;
        Ok(self.profiles.get(&id).cloned())
    }

    async fn profiles_with_role(
        &self,
        role: Role,
    ) -> Result<Vec<ParticipantProfile>, DirectoryError> {
        self.check()?;
        Ok(match role {
            Role::Participant => self.participants.clone(),
            Role::Organizer => Vec::new(),
        })
    }
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// Registration store whose pair lookup never finds a row, so only the
/// underlying store's uniqueness check stands between a duplicate request
/// and a second row.
pub struct BlindLookupStore(pub Arc<MemoryStore>);

#[async_trait]
impl RegistrationStore for BlindLookupStore {
    async fn create_registration(
        &self,
        input: &CreateRegistration,
    ) -> Result<Registration, StoreError> {
        self.0.create_registration(input).await
    }

    async fn find_registration(&self, id: DbId) -> Result<Option<Registration>, StoreError> {
        self.0.find_registration(id).await
    }

    async fn find_by_event_and_participant(
        &self,
        _event_id: DbId,
        _participant_id: DbId,
    ) -> Result<Option<Registration>, StoreError> {
        Ok(None)
    }

    async fn list_by_event(&self, event_id: DbId) -> Result<Vec<Registration>, StoreError> {
        self.0.list_by_event(event_id).await
    }

    async fn list_by_participant(
        &self,
        participant_id: DbId,
    ) -> Result<Vec<Registration>, StoreError> {
        self.0.list_by_participant(participant_id).await
    }

    async fn delete_registration(&self, id: DbId) -> Result<bool, StoreError> {
        self.0.delete_registration(id).await
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// Coordinators wired to a shared in-memory store.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub dispatcher: NotificationDispatcher,
    pub registrations: RegistrationCoordinator,
    pub publications: EventPublicationCoordinator,
}

pub fn harness(directory: StubDirectory, sink: Arc<dyn NotificationSink>) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let directory = DirectoryClient::new(Arc::new(directory));
    let dispatcher = NotificationDispatcher::new(sink);

    Harness {
        registrations: RegistrationCoordinator::new(
            store.clone(),
            store.clone(),
            directory.clone(),
            dispatcher.clone(),
        ),
        publications: EventPublicationCoordinator::new(
            store.clone(),
            directory,
            dispatcher.clone(),
        ),
        dispatcher,
        store,
    }
}

/// Insert an event directly, bypassing the announcement.
pub async fn seed_event(store: &MemoryStore, title: &str, organizer_id: Option<DbId>) -> Event {
    store
        .create_event(&CreateEvent {
            title: title.to_string(),
            organizer_id,
            ..Default::default()
        })
        .await
        .unwrap()
}
