//! Notification type tags understood by the notification sink.

use serde::{Deserialize, Serialize};

/// Kind of notification handed to the sink.
///
/// Serialized with the sink's wire tags, e.g. `"NEW_EVENT"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// A new event was published; sent to every directory participant.
    NewEvent,
    /// Sent to the participant after a successful registration.
    RegistrationConfirmed,
    /// Sent to the participant after unregistration.
    RegistrationCancelled,
    /// Sent to the event organizer when someone registers.
    NewRegistrationForOrganizer,
    /// Sent to the event organizer when someone unregisters.
    UnregistrationForOrganizer,
}

impl NotificationType {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationType::NewEvent => "NEW_EVENT",
            NotificationType::RegistrationConfirmed => "REGISTRATION_CONFIRMED",
            NotificationType::RegistrationCancelled => "REGISTRATION_CANCELLED",
            NotificationType::NewRegistrationForOrganizer => "NEW_REGISTRATION_FOR_ORGANIZER",
            NotificationType::UnregistrationForOrganizer => "UNREGISTRATION_FOR_ORGANIZER",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_tag_matches_as_str() {
        for kind in [
            NotificationType::NewEvent,
            NotificationType::RegistrationConfirmed,
            NotificationType::RegistrationCancelled,
            NotificationType::NewRegistrationForOrganizer,
            NotificationType::UnregistrationForOrganizer,
        ] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
        }
    }
}
