//! Toggle provider trait and implementations.
//!
//! A `ToggleProvider` asynchronously supplies the rule-bearing toggle set
//! for an account. The resolver needs only this narrow read view; the full
//! CRUD surface lives behind [`ToggleStore`], and every store doubles as a
//! provider through the blanket impl below.

use std::fmt;

use async_trait::async_trait;
use switchyard_storage::{Toggle, ToggleStore};
use uuid::Uuid;

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Errors that can occur when a provider lists toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// A provider-specific error occurred.
    Provider(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Provider(msg) => write!(f, "toggle provider error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

// ──────────────────────────────────────────────
// Trait
// ──────────────────────────────────────────────

/// Asynchronous source of an account's toggle set.
#[async_trait]
pub trait ToggleProvider: Send + Sync {
    /// List the current rule-bearing toggle set for an account.
    async fn list_toggles(&self, account_id: Uuid) -> Result<Vec<Toggle>, ProviderError>;
}

/// Every store is a provider; storage failures surface as opaque provider
/// errors.
#[async_trait]
impl<S: ToggleStore> ToggleProvider for S {
    async fn list_toggles(&self, account_id: Uuid) -> Result<Vec<Toggle>, ProviderError> {
        ToggleStore::list_toggles(self, account_id)
            .await
            .map_err(|err| ProviderError::Provider(err.to_string()))
    }
}

// ──────────────────────────────────────────────
// StaticToggleProvider
// ──────────────────────────────────────────────

/// A provider over a fixed set of toggles.
///
/// Returns the subset owned by the requested account on every call.
/// Useful for tests and for embedding a known toggle set without a store.
pub struct StaticToggleProvider {
    toggles: Vec<Toggle>,
}

impl StaticToggleProvider {
    pub fn new(toggles: Vec<Toggle>) -> StaticToggleProvider {
        StaticToggleProvider { toggles }
    }

    pub fn empty() -> StaticToggleProvider {
        StaticToggleProvider {
            toggles: Vec::new(),
        }
    }
}

#[async_trait]
impl ToggleProvider for StaticToggleProvider {
    async fn list_toggles(&self, account_id: Uuid) -> Result<Vec<Toggle>, ProviderError> {
        Ok(self
            .toggles
            .iter()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect())
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
