use std::sync::Arc;

use eventhub_db::{EventStore, RegistrationStore};
use eventhub_events::{
    Directory, DirectoryClient, EventPublicationCoordinator, NotificationDispatcher,
    NotificationSink, RegistrationCoordinator,
};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Event persistence.
    pub events: Arc<dyn EventStore>,
    /// Registration persistence.
    pub registrations: Arc<dyn RegistrationStore>,
    /// Register / unregister workflows.
    pub registration_coordinator: Arc<RegistrationCoordinator>,
    /// Publish workflow.
    pub publication_coordinator: Arc<EventPublicationCoordinator>,
    /// Shared dispatcher, kept for its outcome counters.
    pub dispatcher: NotificationDispatcher,
}

impl AppState {
    /// Wire the coordinators around one store and the two remote transports.
    pub fn new<S>(
        config: ServerConfig,
        store: Arc<S>,
        directory: Arc<dyn Directory>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self
    where
        S: EventStore + RegistrationStore + 'static,
    {
        let dispatcher = NotificationDispatcher::new(sink)
            .with_timeout(config.notifications.dispatch_timeout)
            .with_concurrency(config.notifications.fanout_concurrency);
        let directory = DirectoryClient::new(directory);

        let events: Arc<dyn EventStore> = store.clone();
        let registrations: Arc<dyn RegistrationStore> = store;

        Self {
            config: Arc::new(config),
            registration_coordinator: Arc::new(RegistrationCoordinator::new(
                events.clone(),
                registrations.clone(),
                directory.clone(),
                dispatcher.clone(),
            )),
            publication_coordinator: Arc::new(EventPublicationCoordinator::new(
                events.clone(),
                directory,
                dispatcher.clone(),
            )),
            events,
            registrations,
            dispatcher,
        }
    }
}
