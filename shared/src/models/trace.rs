//! Product trace (read-only composite)

use serde::{Deserialize, Serialize};

use super::{Event, Product};

/// Current product state plus its full event history
///
/// `event_history` keeps the backend's order; consumers display it as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTrace {
    pub product: Product,
    #[serde(default)]
    pub event_history: Vec<Event>,
}
