//! Request payloads sent by the client
//!
//! Bodies of the mutating endpoints. Response bodies live in [`crate::models`].

use serde::{Deserialize, Serialize};

use crate::models::{EventType, Role};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Registration request (`POST /register`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

// =============================================================================
// Product API DTOs
// =============================================================================

/// Create product payload (`POST /products`)
///
/// The owner is never sent; the backend assigns the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub origin: String,
    pub initial_location: String,
}

/// Log event payload (`POST /products/{id}/log-event`)
///
/// Carries no actor: the backend records the authenticated identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEventRequest {
    pub event_type: EventType,
    pub event_description: String,
    pub location: String,
}

/// Handover payload (`POST /products/{id}/handover`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoverRequest {
    pub new_owner_user_id: i64,
    pub handover_location: String,
    pub handover_description: String,
}
