//! Response shapes that are not domain models
//!
//! The backend has no response envelope. Successful calls answer with the
//! bare document. Failures, and the message-only successes (registration,
//! handover), answer with either a plain string or an object carrying a
//! `message` field.

use serde::{Deserialize, Serialize};

/// QR payload wrapper (`GET /products/{id}/qrcode-data`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeData {
    /// The product id rendered as text
    pub qr_code_data: String,
}

/// Message body returned by the backend, on errors and message-only successes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessagePayload {
    /// `{"message": "..."}` plus whatever else the backend adds
    Structured { message: String },
    /// A bare JSON string
    Text(String),
}

impl MessagePayload {
    /// Parse a message body.
    ///
    /// Non-JSON bodies are taken as plain text, kept verbatim. Blank bodies,
    /// and JSON that carries no usable message, yield `None`.
    pub fn parse(body: &str) -> Option<Self> {
        if body.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => serde_json::from_value::<MessagePayload>(value)
                .ok()
                .filter(|p| !p.message().trim().is_empty()),
            Err(_) => Some(MessagePayload::Text(body.to_string())),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            MessagePayload::Structured { message } | MessagePayload::Text(message) => message,
        }
    }

    pub fn into_message(self) -> String {
        match self {
            MessagePayload::Structured { message } | MessagePayload::Text(message) => message,
        }
    }
}
