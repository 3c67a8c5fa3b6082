//! Trace Client - HTTP client for the supply-chain trace backend
//!
//! Provides the session store that holds the logged-in user's credentials
//! and the API layer that turns every backend capability into a typed call
//! with a uniform error contract.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod http;
pub mod scan;
pub mod scope;
pub mod session;

pub use api::{LoginOutcome, TraceClient};
pub use app::{ErrorAction, InputError, LoginForm, RegisterForm, Route};
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use scan::{DecodeError, LineDecoder, QrDecoder, ScanError, ScanSession, parse_product_id, route_for_scan};
pub use scope::ViewScope;
pub use session::{Credentials, FileSessionStore, MemorySessionStore, SessionError, SessionStore};

// Re-export shared types for convenience
pub use shared::{Event, EventType, Product, ProductTrace, Role};
