use crate::types::DbId;

/// Domain-level error shared by every workflow.
///
/// Only primary-path failures end up here. Directory and notification
/// sink failures are absorbed at their client boundary and never
/// converted into a `CoreError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "Registration",
            id: 12,
        };
        assert_eq!(err.to_string(), "Entity not found: Registration with id 12");
    }

    #[test]
    fn storage_display() {
        let err = CoreError::Storage("connection reset".into());
        assert_eq!(err.to_string(), "Storage error: connection reset");
    }
}
