//! In-memory implementation of the store seams.
//!
//! Intended for tests and local development without PostgreSQL. Enforces
//! the same `(event_id, participant_id)` uniqueness as
//! `uq_registrations_event_participant`, under a single write lock.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use eventhub_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::event::{CreateEvent, Event, EventFilter};
use crate::models::registration::{CreateRegistration, Registration};
use crate::store::{EventStore, RegistrationStore, StoreError};

/// Constraint name reported on duplicate registrations.
const UQ_EVENT_PARTICIPANT: &str = "uq_registrations_event_participant";

#[derive(Debug, Default)]
struct Tables {
    events: BTreeMap<DbId, Event>,
    registrations: BTreeMap<DbId, Registration>,
    next_event_id: DbId,
    next_registration_id: DbId,
}

/// Store backed by ordered maps behind an async lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with [`StoreError::Backend`]
    /// until switched back, simulating a database outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("store unavailable".into()));
        }
        Ok(())
    }

    /// Number of stored registrations.
    pub async fn registration_count(&self) -> usize {
        self.tables.read().await.registrations.len()
    }
}

fn build_event(id: DbId, input: &CreateEvent, created_at: chrono::DateTime<Utc>) -> Event {
    Event {
        id,
        title: input.title.clone(),
        description: input.description.clone(),
        location: input.location.clone(),
        starts_at: input.starts_at,
        ends_at: input.ends_at,
        category: input.category.clone(),
        image_url: input.image_url.clone(),
        programme_url: input.programme_url.clone(),
        organizer_id: input.organizer_id,
        created_at,
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn create_event(&self, input: &CreateEvent) -> Result<Event, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        tables.next_event_id += 1;
        let id = tables.next_event_id;
        let event = build_event(id, input, Utc::now());
        tables.events.insert(id, event.clone());
        Ok(event)
    }

    async fn find_event(&self, id: DbId) -> Result<Option<Event>, StoreError> {
        self.check_available()?;
        Ok(self.tables.read().await.events.get(&id).cloned())
    }

    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        self.check_available()?;
        Ok(self.tables.read().await.events.values().cloned().collect())
    }

    async fn search_events(&self, filter: &EventFilter) -> Result<Vec<Event>, StoreError> {
        self.check_available()?;
        Ok(self
            .tables
            .read()
            .await
            .events
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }

    async fn update_event(
        &self,
        id: DbId,
        input: &CreateEvent,
    ) -> Result<Option<Event>, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.events.get_mut(&id) else {
            return Ok(None);
        };
        *existing = build_event(id, input, existing.created_at);
        Ok(Some(existing.clone()))
    }

    async fn event_exists(&self, id: DbId) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self.tables.read().await.events.contains_key(&id))
    }

    async fn delete_event(&self, id: DbId) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self.tables.write().await.events.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn create_registration(
        &self,
        input: &CreateRegistration,
    ) -> Result<Registration, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let duplicate = tables.registrations.values().any(|r| {
            r.event_id == input.event_id && r.participant_id == input.participant_id
        });
        if duplicate {
            return Err(StoreError::Duplicate(UQ_EVENT_PARTICIPANT.to_string()));
        }
        tables.next_registration_id += 1;
        let registration = Registration {
            id: tables.next_registration_id,
            event_id: input.event_id,
            participant_id: input.participant_id,
            registered_at: input.registered_at,
            status: input.status,
        };
        tables
            .registrations
            .insert(registration.id, registration.clone());
        Ok(registration)
    }

    async fn find_registration(&self, id: DbId) -> Result<Option<Registration>, StoreError> {
        self.check_available()?;
        Ok(self.tables.read().await.registrations.get(&id).cloned())
    }

    async fn find_by_event_and_participant(
        &self,
        event_id: DbId,
        participant_id: DbId,
    ) -> Result<Option<Registration>, StoreError> {
        self.check_available()?;
        Ok(self
            .tables
            .read()
            .await
            .registrations
            .values()
            .find(|r| r.event_id == event_id && r.participant_id == participant_id)
            .cloned())
    }

    async fn list_by_event(&self, event_id: DbId) -> Result<Vec<Registration>, StoreError> {
        self.check_available()?;
        Ok(self
            .tables
            .read()
            .await
            .registrations
            .values()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn list_by_participant(
        &self,
        participant_id: DbId,
    ) -> Result<Vec<Registration>, StoreError> {
        self.check_available()?;
        Ok(self
            .tables
            .read()
            .await
            .registrations
            .values()
            .filter(|r| r.participant_id == participant_id)
            .cloned()
            .collect())
    }

    async fn delete_registration(&self, id: DbId) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self.tables.write().await.registrations.remove(&id).is_some())
    }
}
