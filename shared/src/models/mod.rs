//! Data models
//!
//! Mirrors the JSON documents served by the trace backend. Field names are
//! camelCase on the wire, all IDs are `i64`.

pub mod event;
pub mod product;
pub mod trace;
pub mod user;

// Re-exports
pub use event::*;
pub use product::*;
pub use trace::*;
pub use user::*;

/// Text did not name a known enum variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
