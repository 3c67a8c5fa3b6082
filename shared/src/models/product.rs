//! Product Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Product entity
///
/// Owned by exactly one user at a time. Ownership only moves through a
/// handover performed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub origin: String,
    pub current_status: String,
    pub current_location: String,
    /// Backend local time, no zone
    pub created_date: NaiveDateTime,
    /// Assigned server-side from the authenticated principal
    pub owner_user_id: i64,
}
