//! Session store - holds the logged-in user's credentials
//!
//! The backend authenticates every request with HTTP Basic credentials, so
//! the raw pair is kept for the whole session. It is isolated here so the
//! rest of the client never reaches into storage directly.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app::InputError;

/// Session persistence error
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A complete username/password pair
///
/// Cannot be built with a missing half, so a store never holds partial
/// credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self, InputError> {
        let username = username.into();
        let password = password.into();
        if username.trim().is_empty() {
            return Err(InputError::MissingField("username"));
        }
        if password.is_empty() {
            return Err(InputError::MissingField("password"));
        }
        Ok(Self { username, password })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Source of truth for "who is logged in"
///
/// Written only by the login/logout flow; read by every authenticated call.
pub trait SessionStore: Send + Sync {
    /// Current pair, if any
    fn credentials(&self) -> Option<Credentials>;

    /// Store both values as one unit
    fn set_credentials(&self, credentials: Credentials) -> Result<(), SessionError>;

    /// Forget both values
    fn clear(&self) -> Result<(), SessionError>;

    fn username(&self) -> Option<String> {
        self.credentials().map(|c| c.username)
    }

    fn password(&self) -> Option<String> {
        self.credentials().map(|c| c.password)
    }

    fn is_logged_in(&self) -> bool {
        self.credentials().is_some()
    }
}

/// In-memory session, lost when the process exits
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<Credentials>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start already logged in
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: RwLock::new(Some(credentials)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn credentials(&self) -> Option<Credentials> {
        self.inner.read().clone()
    }

    fn set_credentials(&self, credentials: Credentials) -> Result<(), SessionError> {
        *self.inner.write() = Some(credentials);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.inner.write() = None;
        Ok(())
    }
}

/// Durable session kept in a JSON file
///
/// Survives restarts until an explicit logout. The pair is written to a
/// sibling temp file and renamed into place, so readers see the old pair or
/// the new one, never a mix.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    cached: RwLock<Option<Credentials>>,
}

impl FileSessionStore {
    /// Open the store at `path`, loading any saved session
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = Self::load(&path);
        tracing::debug!(path = %path.display(), restored = cached.is_some(), "Session store opened");
        Self {
            path,
            cached: RwLock::new(cached),
        }
    }

    /// A missing, unreadable or partial file counts as "no session"
    fn load(path: &Path) -> Option<Credentials> {
        let json = fs::read_to_string(path).ok()?;
        #[derive(Deserialize)]
        struct Stored {
            username: String,
            password: String,
        }
        match serde_json::from_str::<Stored>(&json) {
            Ok(stored) => Credentials::new(stored.username, stored.password).ok(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Ignoring unreadable session file: {e}");
                None
            }
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write(&self, credentials: &Credentials) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(credentials)?;
        let tmp = self.temp_path();
        let written =
            write_private(&tmp, json.as_bytes()).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Create `path` readable by the owner only, then fill it. The file never
/// exists with wider permissions.
fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl SessionStore for FileSessionStore {
    fn credentials(&self) -> Option<Credentials> {
        self.cached.read().clone()
    }

    fn set_credentials(&self, credentials: Credentials) -> Result<(), SessionError> {
        let mut cached = self.cached.write();
        self.write(&credentials)?;
        tracing::debug!(username = %credentials.username(), "Session saved");
        *cached = Some(credentials);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut cached = self.cached.write();
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        *cached = None;
        tracing::debug!("Session cleared");
        Ok(())
    }
}
