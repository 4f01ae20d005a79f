use uuid::Uuid;

/// All errors that can be returned by a ToggleStore implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No toggle with the given id.
    #[error("toggle not found: {id}")]
    ToggleNotFound { id: Uuid },

    /// Toggle keys are unique per account; this one is already taken.
    #[error("duplicate toggle key '{key}' for account {account_id}")]
    DuplicateKey { account_id: Uuid, key: String },

    /// A backend-specific storage error (connection, serialization, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}
