use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StorageError;
use crate::record::{Toggle, ToggleUpdate};

/// The persistence boundary for toggles.
///
/// The resolver only ever calls `list_toggles`; the rest is the CRUD
/// surface a management API drives. Implementations must be
/// `Send + Sync + 'static` so they can sit behind shared application state
/// and cross async task boundaries.
#[async_trait]
pub trait ToggleStore: Send + Sync + 'static {
    /// Persist a new toggle and return its id.
    ///
    /// Returns [`StorageError::DuplicateKey`] if the account already has a
    /// toggle with the same key.
    async fn create_toggle(&self, toggle: Toggle) -> Result<Uuid, StorageError>;

    /// Fetch a toggle by id.
    ///
    /// Returns [`StorageError::ToggleNotFound`] if there is none.
    async fn fetch_toggle(&self, id: Uuid) -> Result<Toggle, StorageError>;

    /// Apply a partial update. Absent fields are left unchanged and
    /// `updated_at` is stamped.
    async fn update_toggle(&self, update: ToggleUpdate) -> Result<(), StorageError>;

    /// List every toggle owned by an account. An unknown account is an
    /// empty list, not an error.
    async fn list_toggles(&self, account_id: Uuid) -> Result<Vec<Toggle>, StorageError>;

    /// Delete a toggle by id.
    async fn delete_toggle(&self, id: Uuid) -> Result<(), StorageError>;
}
