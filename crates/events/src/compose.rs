//! Notification message templates.
//!
//! One template per (workflow, audience). Substitution is plain string
//! formatting in a single language. Whenever a richer identity is missing
//! the message degrades to an id-based phrasing; a notification is never
//! dropped for lack of identity data.

use eventhub_core::notification::NotificationType;
use eventhub_core::types::DbId;
use eventhub_db::models::event::Event;

use crate::directory::ParticipantProfile;

/// Title used in announcements when the event has no usable title.
const UNTITLED_EVENT: &str = "a new event";

/// Substitute for a profile without an email address.
const UNKNOWN_EMAIL: &str = "unknown email";

/// Which registration workflow a message describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationChange {
    Registered,
    Unregistered,
}

/// Template data for one registration workflow.
struct RegistrationTemplate {
    /// Completes "Your registration to {title} ...".
    participant_outcome: &'static str,
    /// Completes "{who} ... {title}".
    organizer_verb: &'static str,
    participant_type: NotificationType,
    organizer_type: NotificationType,
}

const REGISTERED: RegistrationTemplate = RegistrationTemplate {
    participant_outcome: "is confirmed",
    organizer_verb: "registered for",
    participant_type: NotificationType::RegistrationConfirmed,
    organizer_type: NotificationType::NewRegistrationForOrganizer,
};

const UNREGISTERED: RegistrationTemplate = RegistrationTemplate {
    participant_outcome: "has been cancelled",
    organizer_verb: "unregistered from",
    participant_type: NotificationType::RegistrationCancelled,
    organizer_type: NotificationType::UnregistrationForOrganizer,
};

impl RegistrationChange {
    fn template(self) -> &'static RegistrationTemplate {
        match self {
            RegistrationChange::Registered => &REGISTERED,
            RegistrationChange::Unregistered => &UNREGISTERED,
        }
    }

    /// Type tag of the participant-facing notification.
    pub fn participant_type(self) -> NotificationType {
        self.template().participant_type
    }

    /// Type tag of the organizer-facing notification.
    pub fn organizer_type(self) -> NotificationType {
        self.template().organizer_type
    }
}

/// Display title of the event a registration refers to.
///
/// The stored title is used as is. Falls back to `"event {id}"` when the
/// event could not be resolved or has a blank title.
pub fn event_title(event_id: DbId, event: Option<&Event>) -> String {
    match event
        .map(|e| e.title.as_str())
        .filter(|t| !t.trim().is_empty())
    {
        Some(title) => title.to_string(),
        None => format!("event {event_id}"),
    }
}

/// Message for the participant whose registration changed.
pub fn participant_message(change: RegistrationChange, event_title: &str) -> String {
    format!(
        "Your registration to {event_title} {}.",
        change.template().participant_outcome
    )
}

/// Message for the organizer of the event.
///
/// With a resolved profile:
/// `"Ana (ana@example.org) registered for Workshop (id 4)."`
///
/// Without one:
/// `"The participant (id 4) registered for Workshop."`
pub fn organizer_message(
    change: RegistrationChange,
    event_title: &str,
    participant_id: DbId,
    profile: Option<&ParticipantProfile>,
) -> String {
    let verb = change.template().organizer_verb;
    match profile {
        Some(profile) => {
            let name = profile.display_name.clone().unwrap_or_else(|| {
                format!("Participant {}", profile.id.unwrap_or(participant_id))
            });
            let email = profile.email.as_deref().unwrap_or(UNKNOWN_EMAIL);
            format!("{name} ({email}) {verb} {event_title} (id {participant_id}).")
        }
        None => format!("The participant (id {participant_id}) {verb} {event_title}."),
    }
}

/// Announcement sent to every participant when an event is published.
pub fn new_event_message(title: &str, organizer_name: Option<&str>) -> String {
    let title = match title.trim() {
        "" => UNTITLED_EVENT,
        t => t,
    };
    match organizer_name {
        Some(name) => format!("New event published by {name}: {title}."),
        None => format!("New event published: {title}."),
    }
}
