//! The listed item and the request body used to create or edit one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A good listed on the board.
///
/// Serialized with camelCase field names, so the on-disk document and the
/// HTTP bodies read `{"id":1,"title":"Book","deadline":"2025-01-01","isSold":false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique id, assigned by the store.
    pub id: u64,
    /// Trimmed title, 2 to 20 characters.
    pub title: String,
    /// Calendar date the listing runs until.
    pub deadline: NaiveDate,
    /// Whether the item has been sold.
    #[serde(default)]
    pub is_sold: bool,
}

/// Body of a create or update request.
///
/// Both fields are optional on the wire so that a missing field surfaces as
/// a validation error instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    /// Raw, untrimmed title.
    #[serde(default)]
    pub title: Option<String>,
    /// Raw deadline text, expected as `YYYY-MM-DD`.
    #[serde(default)]
    pub deadline: Option<String>,
}

impl ItemDraft {
    /// Draft with both fields set.
    pub fn new(title: impl Into<String>, deadline: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            deadline: Some(deadline.into()),
        }
    }
}
