//! Field-level validation for event drafts.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Maximum accepted length of an event title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Check the fields of an event draft before it is persisted.
///
/// - the title must not be blank and must not exceed [`MAX_TITLE_LEN`];
/// - when both bounds are given, the end must not precede the start.
pub fn validate_event_draft(
    title: &str,
    starts_at: Option<Timestamp>,
    ends_at: Option<Timestamp>,
) -> Result<(), CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("title must not be blank".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    if let (Some(start), Some(end)) = (starts_at, ends_at) {
        if end < start {
            return Err(CoreError::Validation(
                "ends_at must not be before starts_at".into(),
            ));
        }
    }
    Ok(())
}
