//! Toggle records exchanged with the persistence boundary.
//!
//! Field names follow the service's JSON convention (camelCase), and
//! timestamps serialize as RFC 3339. The rules column round-trips through
//! the expression wire codec in `switchyard-core`.

use serde::{Deserialize, Serialize};
use switchyard_core::Rules;
use time::OffsetDateTime;
use uuid::Uuid;

/// A named, account-scoped feature flag and the ordered rules that decide
/// its value at resolution time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toggle {
    pub id: Uuid,
    pub account_id: Uuid,
    /// Unique per account.
    pub key: String,
    #[serde(default)]
    pub description: String,
    pub active: bool,
    #[serde(default)]
    pub rules: Rules,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Toggle {
    /// A fresh toggle with a new id, empty rule list, and current
    /// timestamps. New toggles start active.
    pub fn new(account_id: Uuid, key: impl Into<String>) -> Toggle {
        let now = OffsetDateTime::now_utc();
        Toggle {
            id: Uuid::new_v4(),
            account_id,
            key: key.into(),
            description: String::new(),
            active: true,
            rules: Rules::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Toggle {
        self.description = description.into();
        self
    }

    pub fn with_rules(mut self, rules: Rules) -> Toggle {
        self.rules = rules;
        self
    }
}

/// A partial update for a toggle. `None` fields are left unchanged, which
/// distinguishes an omitted field from an update to the zero value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleUpdate {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Rules>,
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
