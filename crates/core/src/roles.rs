//! Directory role names.
//!
//! These must match the role values served by the participant directory.

use serde::{Deserialize, Serialize};

pub const ROLE_PARTICIPANT: &str = "PARTICIPANT";
pub const ROLE_ORGANIZER: &str = "ORGANIZER";

/// A role held by a directory user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Participant,
    Organizer,
}

impl Role {
    /// Wire name used in directory queries (`?role=...`).
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Participant => ROLE_PARTICIPANT,
            Role::Organizer => ROLE_ORGANIZER,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
