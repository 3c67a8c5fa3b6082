//! Front-end support: navigation targets, form validation and the single
//! error-handling pattern views share.
//!
//! Input problems are caught here before any request is made.

use std::fmt;

use shared::Role;
use thiserror::Error;

use crate::error::ClientError;
use crate::session::{Credentials, SessionStore};

/// Client-side validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please input your {0}!")]
    MissingField(&'static str),

    #[error("The two passwords that you entered do not match!")]
    PasswordMismatch,

    #[error("Invalid QR code: '{0}' is not a product ID")]
    InvalidProductId(String),
}

/// Navigation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Products,
    Trace(i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Products => "/products".to_string(),
            Route::Trace(id) => format!("/products/{id}/trace"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Login form input
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, InputError> {
        Credentials::new(self.username.trim(), self.password.as_str())
    }
}

/// Registration form input
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm: String,
    pub role: Option<Role>,
}

impl RegisterForm {
    /// Check required fields and the password confirmation
    pub fn validate(&self) -> Result<(Credentials, Role), InputError> {
        let credentials = Credentials::new(self.username.trim(), self.password.as_str())?;
        if self.confirm.is_empty() {
            return Err(InputError::MissingField("password confirmation"));
        }
        if self.confirm != self.password {
            return Err(InputError::PasswordMismatch);
        }
        let role = self.role.ok_or(InputError::MissingField("role"))?;
        Ok((credentials, role))
    }
}

/// What a view should do with a failed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorAction {
    /// Text to show the user
    pub message: String,
    /// Where to navigate, if anywhere
    pub redirect: Option<Route>,
}

impl ErrorAction {
    /// Decide how to react to `err`.
    ///
    /// A 401 is the only signal that stored credentials went stale, so it
    /// clears the session and sends the user to login.
    pub fn resolve(err: &ClientError, session: &dyn SessionStore) -> Self {
        match err {
            ClientError::Unauthorized => {
                if let Err(e) = session.clear() {
                    tracing::error!("Failed to clear session after 401: {e}");
                }
                Self {
                    message: "Authentication required. Please log in.".to_string(),
                    redirect: Some(Route::Login),
                }
            }
            ClientError::Application(message) => Self {
                message: message.clone(),
                redirect: None,
            },
            ClientError::Network { .. } => Self {
                message: err.to_string(),
                redirect: None,
            },
        }
    }

    /// Guard for views that need a logged-in user, checked before any call
    pub fn require_login(session: &dyn SessionStore) -> Result<Credentials, Self> {
        session.credentials().ok_or_else(|| Self {
            message: "Please log in to continue.".to_string(),
            redirect: Some(Route::Login),
        })
    }
}
