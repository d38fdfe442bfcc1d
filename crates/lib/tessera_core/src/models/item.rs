//! Item domain models.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A stored item. Created once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Time-derived numeric identifier (see [`crate::record_id`]).
    pub item_id: String,
    pub item_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    /// Subject of the caller that created the item.
    pub user_id: String,
}

/// Listing projection of an [`Item`]. Never carries the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub item_id: String,
    pub item_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl From<Item> for ItemSummary {
    fn from(item: Item) -> Self {
        Self {
            item_id: item.item_id,
            item_name: item.item_name,
            description: item.description,
            created_at: item.created_at,
        }
    }
}

/// Current time truncated to millisecond precision, the resolution
/// `createdAt` is stored and rendered with.
pub fn created_at_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// ISO-8601 with milliseconds and a `Z` suffix, e.g. `2026-10-15T09:12:33.481Z`.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(dt: &DateTime<Utc>) -> String {
        dt.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
