//! API access layer
//!
//! One typed method per backend capability. Every method funnels failures
//! into [`ClientError`](crate::ClientError); none retries.

mod auth;
mod products;

use std::sync::Arc;

pub use auth::LoginOutcome;

use crate::http::HttpClient;
use crate::session::SessionStore;
use crate::{ClientConfig, ClientError, FileSessionStore, MemorySessionStore};

/// Client for the trace backend
///
/// Cheap to clone; clones share the HTTP connection pool and the session.
#[derive(Debug, Clone)]
pub struct TraceClient {
    http: HttpClient,
}

impl TraceClient {
    /// Build a client over an injected session store
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        Ok(Self {
            http: HttpClient::new(config, session)?,
        })
    }

    /// Build a client whose session lives where the configuration says:
    /// a file when `session_path` is set, memory otherwise
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let session: Arc<dyn SessionStore> = match &config.session_path {
            Some(path) => Arc::new(FileSessionStore::open(path)),
            None => Arc::new(MemorySessionStore::new()),
        };
        Self::new(config, session)
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        self.http.session()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session().is_logged_in()
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}
