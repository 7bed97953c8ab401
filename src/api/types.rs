//! Wire types for the Stockroom backend REST API
//!
//! Response shapes mirror the backend serializers field for field;
//! request bodies serialize only the fields the caller set, matching
//! what the endpoints accept.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Token pair returned by `POST /api/token/` on login.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer token authorizing API calls.
    pub access: String,
    /// Longer-lived token exchanged for new access tokens.
    pub refresh: String,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// An inventory item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub serial_number: String,
    pub category: String,
    /// One of `available`, `in_use`, `maintenance`, `damaged`, `lost`,
    /// `abandoned`, `prohibited`.
    pub status: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    /// Monetary value; the backend serializes its decimal field as a
    /// string to avoid float rounding.
    #[serde(default)]
    pub value: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present when the item is currently borrowed.
    #[serde(default)]
    pub current_user: Option<CurrentUser>,
}

/// The borrower currently holding an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    #[serde(default)]
    pub contact: String,
}

/// Item detail view: the item plus its most recent usage records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDetail {
    #[serde(flatten)]
    pub item: Item,
    #[serde(default)]
    pub usage_history: Vec<ItemUsage>,
}

/// Body for creating or updating an item.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub serial_number: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Body for `POST /api/items/{id}/borrow/`.
#[derive(Debug, Clone, Serialize)]
pub struct BorrowRequest {
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_before: Option<String>,
}

impl BorrowRequest {
    /// Builds a borrow request for the named user with everything else
    /// left unset.
    pub fn for_user(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            user_contact: None,
            purpose: None,
            notes: None,
            condition_before: None,
        }
    }
}

/// Body for `POST /api/items/{id}/return_item/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReturnRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Usage records
// ---------------------------------------------------------------------------

/// One borrow/return record for an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemUsage {
    pub id: i64,
    /// Item ID this record belongs to.
    pub item: i64,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub item_serial: String,
    /// Borrower name.
    pub user: String,
    #[serde(default)]
    pub borrower_contact: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub notes: String,
    pub is_returned: bool,
    #[serde(default)]
    pub condition_before: String,
    #[serde(default)]
    pub condition_after: String,
    #[serde(default)]
    pub expected_return_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Body for creating or updating a usage record directly.
#[derive(Debug, Clone, Serialize)]
pub struct UsagePayload {
    pub item: i64,
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrower_contact: Option<String>,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub purpose: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_return_time: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Categories and users
// ---------------------------------------------------------------------------

/// An item category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Body for creating or updating a category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A backend user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}
