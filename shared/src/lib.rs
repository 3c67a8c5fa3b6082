//! Shared types for the supply-chain trace client
//!
//! Wire-level data model exchanged with the trace backend: products,
//! events, traces, user roles, request payloads and the error payload
//! shapes the backend may answer with.

pub mod client;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{CreateProductRequest, HandoverRequest, LogEventRequest, RegisterRequest};
pub use models::{Event, EventType, Product, ProductTrace, Role, UnknownVariant};
pub use response::{MessagePayload, QrCodeData};
