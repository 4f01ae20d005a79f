//! In-memory reference implementation of the persistence boundary.
//!
//! Backs tests and any deployment that does not need a real database.
//! Enforces the same invariants a backed store would: per-account key
//! uniqueness and `updated_at` stamping on every successful update.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StorageError;
use crate::record::{Toggle, ToggleUpdate};
use crate::traits::ToggleStore;

/// A `ToggleStore` backed by a `HashMap` behind an async `RwLock`.
#[derive(Default)]
pub struct MemoryToggleStore {
    toggles: RwLock<HashMap<Uuid, Toggle>>,
}

impl MemoryToggleStore {
    pub fn new() -> MemoryToggleStore {
        MemoryToggleStore::default()
    }
}

#[async_trait]
impl ToggleStore for MemoryToggleStore {
    async fn create_toggle(&self, toggle: Toggle) -> Result<Uuid, StorageError> {
        let mut toggles = self.toggles.write().await;
        if toggles
            .values()
            .any(|t| t.account_id == toggle.account_id && t.key == toggle.key)
        {
            return Err(StorageError::DuplicateKey {
                account_id: toggle.account_id,
                key: toggle.key,
            });
        }

        let id = toggle.id;
        toggles.insert(id, toggle);
        Ok(id)
    }

    async fn fetch_toggle(&self, id: Uuid) -> Result<Toggle, StorageError> {
        self.toggles
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StorageError::ToggleNotFound { id })
    }

    async fn update_toggle(&self, update: ToggleUpdate) -> Result<(), StorageError> {
        let mut toggles = self.toggles.write().await;

        if let Some(key) = &update.key {
            let taken = toggles
                .values()
                .any(|t| t.account_id == update.account_id && &t.key == key && t.id != update.id);
            if taken {
                return Err(StorageError::DuplicateKey {
                    account_id: update.account_id,
                    key: key.clone(),
                });
            }
        }

        let toggle = toggles
            .get_mut(&update.id)
            .ok_or(StorageError::ToggleNotFound { id: update.id })?;

        if let Some(key) = update.key {
            toggle.key = key;
        }
        if let Some(description) = update.description {
            toggle.description = description;
        }
        if let Some(active) = update.active {
            toggle.active = active;
        }
        if let Some(rules) = update.rules {
            toggle.rules = rules;
        }
        toggle.updated_at = OffsetDateTime::now_utc();

        Ok(())
    }

    async fn list_toggles(&self, account_id: Uuid) -> Result<Vec<Toggle>, StorageError> {
        let toggles = self.toggles.read().await;
        Ok(toggles
            .values()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect())
    }

    async fn delete_toggle(&self, id: Uuid) -> Result<(), StorageError> {
        self.toggles
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::ToggleNotFound { id })
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_fetch() {
        let store = MemoryToggleStore::new();
        let toggle = Toggle::new(Uuid::new_v4(), "admin-feature");

        let id = store.create_toggle(toggle.clone()).await.unwrap();
        assert_eq!(id, toggle.id);
        assert_eq!(store.fetch_toggle(id).await.unwrap(), toggle);
    }

    #[tokio::test]
    async fn duplicate_key_within_account_is_rejected() {
        let store = MemoryToggleStore::new();
        let account_id = Uuid::new_v4();

        store
            .create_toggle(Toggle::new(account_id, "checkout"))
            .await
            .unwrap();
        let err = store
            .create_toggle(Toggle::new(account_id, "checkout"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::DuplicateKey { .. }));

        // The same key under another account is fine.
        store
            .create_toggle(Toggle::new(Uuid::new_v4(), "checkout"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields_alone() {
        let store = MemoryToggleStore::new();
        let toggle = Toggle::new(Uuid::new_v4(), "checkout").with_description("v1");
        let id = store.create_toggle(toggle.clone()).await.unwrap();

        store
            .update_toggle(ToggleUpdate {
                id,
                account_id: toggle.account_id,
                description: Some("v2".into()),
                ..ToggleUpdate::default()
            })
            .await
            .unwrap();

        let updated = store.fetch_toggle(id).await.unwrap();
        assert_eq!(updated.description, "v2");
        assert_eq!(updated.key, "checkout");
        assert!(updated.active);
        assert!(updated.updated_at >= toggle.updated_at);
    }

    #[tokio::test]
    async fn update_to_a_taken_key_is_rejected() {
        let store = MemoryToggleStore::new();
        let account_id = Uuid::new_v4();

        store
            .create_toggle(Toggle::new(account_id, "a"))
            .await
            .unwrap();
        let second = Toggle::new(account_id, "b");
        let id = store.create_toggle(second.clone()).await.unwrap();

        let err = store
            .update_toggle(ToggleUpdate {
                id,
                account_id,
                key: Some("a".into()),
                ..ToggleUpdate::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::DuplicateKey { .. }));
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = MemoryToggleStore::new();
        let id = Uuid::new_v4();

        assert!(matches!(
            store.fetch_toggle(id).await.unwrap_err(),
            StorageError::ToggleNotFound { .. }
        ));
        assert!(matches!(
            store.delete_toggle(id).await.unwrap_err(),
            StorageError::ToggleNotFound { .. }
        ));
        assert!(matches!(
            store
                .update_toggle(ToggleUpdate {
                    id,
                    ..ToggleUpdate::default()
                })
                .await
                .unwrap_err(),
            StorageError::ToggleNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn list_is_scoped_to_the_account() {
        let store = MemoryToggleStore::new();
        let account_a = Uuid::new_v4();
        let account_b = Uuid::new_v4();

        store
            .create_toggle(Toggle::new(account_a, "one"))
            .await
            .unwrap();
        store
            .create_toggle(Toggle::new(account_a, "two"))
            .await
            .unwrap();
        store
            .create_toggle(Toggle::new(account_b, "one"))
            .await
            .unwrap();

        assert_eq!(store.list_toggles(account_a).await.unwrap().len(), 2);
        assert_eq!(store.list_toggles(account_b).await.unwrap().len(), 1);
        assert!(store.list_toggles(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_the_toggle() {
        let store = MemoryToggleStore::new();
        let toggle = Toggle::new(Uuid::new_v4(), "checkout");
        let id = store.create_toggle(toggle).await.unwrap();

        store.delete_toggle(id).await.unwrap();
        assert!(store.fetch_toggle(id).await.is_err());
    }
}
