//! Event entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use eventhub_core::types::{DbId, Timestamp};

/// A row from the `events` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    /// Free-form kind of event (conference, training, ...).
    pub category: Option<String>,
    /// Poster image.
    pub image_url: Option<String>,
    /// Programme document.
    pub programme_url: Option<String>,
    /// Directory user id of the organizer, if known.
    pub organizer_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an event, and for replacing all fields of one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub programme_url: Option<String>,
    pub organizer_id: Option<DbId>,
}

/// Search criteria for events. Every field is optional; unset fields
/// match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    /// Case-insensitive substring of the title.
    pub keyword: Option<String>,
    /// Case-insensitive substring of the location.
    pub location: Option<String>,
    /// Case-insensitive substring of the category.
    pub category: Option<String>,
    /// Only events starting at or after this instant.
    pub starts_after: Option<Timestamp>,
    /// Only events ending at or before this instant.
    pub ends_before: Option<Timestamp>,
}

impl EventFilter {
    /// Evaluate the filter against an in-memory event.
    ///
    /// Mirrors the SQL in [`EventRepo::search`](crate::repositories::EventRepo::search):
    /// text criteria match literally, blank text criteria are ignored, and a
    /// date bound excludes events that have no value for the bounded column.
    pub fn matches(&self, event: &Event) -> bool {
        contains_ci(Some(&event.title), self.keyword.as_deref())
            && contains_ci(event.location.as_deref(), self.location.as_deref())
            && contains_ci(event.category.as_deref(), self.category.as_deref())
            && self
                .starts_after
                .is_none_or(|after| event.starts_at.is_some_and(|start| start >= after))
            && self
                .ends_before
                .is_none_or(|before| event.ends_at.is_some_and(|end| end <= before))
    }

    /// Text criteria with surrounding whitespace and blank values dropped.
    pub(crate) fn text_criterion(value: Option<&str>) -> Option<&str> {
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    /// `ILIKE ... ESCAPE '\'` pattern for a text criterion: wildcards in the
    /// user's text are escaped so it matches as a plain substring.
    pub(crate) fn like_pattern(value: Option<&str>) -> Option<String> {
        Self::text_criterion(value).map(|v| {
            let mut pattern = String::with_capacity(v.len() + 2);
            pattern.push('%');
            for c in v.chars() {
                if matches!(c, '\\' | '%' | '_') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }
}

fn contains_ci(haystack: Option<&str>, needle: Option<&str>) -> bool {
    match EventFilter::text_criterion(needle) {
        None => true,
        Some(needle) => haystack
            .is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase())),
    }
}
