//! switchyard-resolve: toggle resolution.
//!
//! Ties the rule engine to the toggle set: a [`Resolver`] fetches an
//! account's toggles through a [`ToggleProvider`] and folds each toggle's
//! rules against the request's metadata context into a
//! [`ResolvedToggles`] map. Any [`switchyard_storage::ToggleStore`] can
//! serve as the provider directly.

pub mod provider;
pub mod resolver;

pub use provider::{ProviderError, StaticToggleProvider, ToggleProvider};
pub use resolver::{ResolveError, ResolvedToggles, Resolver};
