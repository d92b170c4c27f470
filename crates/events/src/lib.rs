//! Notification fan-out for the event registration platform.
//!
//! This crate turns registration and publication workflows into
//! best-effort notifications:
//!
//! - [`DirectoryClient`]: soft-failing participant directory lookups.
//! - [`NotificationDispatcher`]: soft-failing, time-bounded delivery to
//!   the notification sink, with outcome counters.
//! - [`compose`]: message templates per workflow and audience.
//! - [`RegistrationCoordinator`]: register / unregister workflows.
//! - [`EventPublicationCoordinator`]: new-event announcement workflow.
//!
//! Store writes are authoritative; directory and sink failures are logged
//! and never surface to callers.

pub mod compose;
pub mod delivery;
pub mod directory;
pub mod dispatcher;
pub mod publication;
pub mod registration;

pub use delivery::sink::{HttpNotificationSink, NewNotification, NotificationSink, SinkError};
pub use directory::{Directory, DirectoryClient, DirectoryError, HttpDirectory, ParticipantProfile};
pub use dispatcher::{DispatchSnapshot, DispatchStats, NotificationDispatcher};
pub use publication::EventPublicationCoordinator;
pub use registration::RegistrationCoordinator;
