//! Event Model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::UnknownVariant;

/// Supply-chain event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Shipped,
    Received,
    QualityCheck,
    Damaged,
    Sold,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Shipped,
        EventType::Received,
        EventType::QualityCheck,
        EventType::Damaged,
        EventType::Sold,
    ];

    /// Wire name (e.g. `QUALITY_CHECK`)
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Shipped => "SHIPPED",
            EventType::Received => "RECEIVED",
            EventType::QualityCheck => "QUALITY_CHECK",
            EventType::Damaged => "DAMAGED",
            EventType::Sold => "SOLD",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| UnknownVariant {
                kind: "event type",
                value: s.to_string(),
            })
    }
}

/// Event entity
///
/// Immutable once recorded; belongs to exactly one product's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub event_type: EventType,
    pub event_description: String,
    pub location: String,
    pub timestamp: NaiveDateTime,
    /// Derived by the backend from the authenticated identity
    pub actor_user_id: i64,
}
