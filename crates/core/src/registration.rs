//! Registration status values.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status stored on a registration row.
///
/// Unregistration deletes the row, so `Cancelled` is accepted on input but
/// never produced by the registration workflow itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    #[default]
    Registered,
    Cancelled,
    Pending,
}

impl RegistrationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "REGISTERED",
            RegistrationStatus::Cancelled => "CANCELLED",
            RegistrationStatus::Pending => "PENDING",
        }
    }
}

/// Error returned when a stored status column holds an unknown value.
#[derive(Debug, thiserror::Error)]
#[error("Unknown registration status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for RegistrationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGISTERED" => Ok(RegistrationStatus::Registered),
            "CANCELLED" => Ok(RegistrationStatus::Cancelled),
            "PENDING" => Ok(RegistrationStatus::Pending),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for RegistrationStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
