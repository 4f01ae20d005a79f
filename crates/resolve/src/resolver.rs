//! The toggle resolver.
//!
//! Resolution turns an account's stored toggle set plus a caller-supplied
//! metadata context into a flat map of boolean decisions. Evaluating any
//! single toggle cannot fail; the only failure mode is the toggle fetch
//! itself, which aborts the whole call. A partially-resolved toggle set is
//! never returned.

use std::collections::BTreeMap;
use std::fmt;

use switchyard_core::{evaluate_rules, Metadata};
use tracing::debug;
use uuid::Uuid;

use crate::provider::{ProviderError, ToggleProvider};

/// Toggle key to decision map returned to the caller. Serializes as a flat
/// JSON object of booleans.
pub type ResolvedToggles = BTreeMap<String, bool>;

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Errors that can occur during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The toggle-listing collaborator failed.
    Provider(ProviderError),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Provider(err) => write!(f, "failed to list toggles: {}", err),
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::Provider(err) => Some(err),
        }
    }
}

impl From<ProviderError> for ResolveError {
    fn from(err: ProviderError) -> ResolveError {
        ResolveError::Provider(err)
    }
}

// ──────────────────────────────────────────────
// Resolver
// ──────────────────────────────────────────────

/// Resolves an account's toggles through a [`ToggleProvider`].
pub struct Resolver<P> {
    provider: P,
}

impl<P: ToggleProvider> Resolver<P> {
    pub fn new(provider: P) -> Resolver<P> {
        Resolver { provider }
    }

    /// Resolve every toggle for `account_id` against `metadata`.
    ///
    /// Each toggle's rule list folds independently into one decision.
    /// Should the provider hand back two toggles with the same key, the
    /// later one wins; order is whatever the provider returns.
    pub async fn resolve(
        &self,
        account_id: Uuid,
        metadata: &Metadata,
    ) -> Result<ResolvedToggles, ResolveError> {
        debug!(%account_id, "resolving toggles");
        let toggles = self.provider.list_toggles(account_id).await?;

        let mut resolved = ResolvedToggles::new();
        for toggle in &toggles {
            let decision = evaluate_rules(metadata, &toggle.rules);
            debug!(key = %toggle.key, decision, "toggle resolved");
            resolved.insert(toggle.key.clone(), decision);
        }

        Ok(resolved)
    }
}
