//! Auth API: register, login check, logout

use shared::{RegisterRequest, Role};

use super::TraceClient;
use crate::error::{ClientError, ClientResult};
use crate::http::Auth;
use crate::session::{Credentials, SessionError};

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub message: String,
    pub username: String,
}

fn session_write_failed(e: SessionError) -> ClientError {
    tracing::error!("Failed to persist session: {e}");
    ClientError::Application(format!("Could not save the session: {e}"))
}

impl TraceClient {
    /// Register a new account; returns the backend's message
    pub async fn register(&self, username: &str, password: &str, role: Role) -> ClientResult<String> {
        let request = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            role,
        };
        let message = self
            .http
            .post_message("/register", &request, Auth::None, "during registration")
            .await?;
        tracing::info!(username, %role, "Registered");
        Ok(message)
    }

    /// Verify the pair against a protected endpoint and, on success, store it
    ///
    /// A rejected pair leaves the current session untouched.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginOutcome> {
        const CONTEXT: &str = "during login";

        // An incomplete pair can never authenticate; let the backend say so.
        let Ok(candidate) = Credentials::new(username, password) else {
            self.http
                .get_empty("/protected/data", Auth::None, CONTEXT)
                .await?;
            return Err(ClientError::Unauthorized);
        };

        self.http
            .get_empty("/protected/data", Auth::With(&candidate), CONTEXT)
            .await?;

        self.session()
            .set_credentials(candidate)
            .map_err(session_write_failed)?;
        tracing::info!(username, "Logged in");

        Ok(LoginOutcome {
            message: "Login successful!".to_string(),
            username: username.to_string(),
        })
    }

    /// Forget the stored credentials. There is no server-side session.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.session().clear()?;
        tracing::info!("Logged out");
        Ok(())
    }
}
