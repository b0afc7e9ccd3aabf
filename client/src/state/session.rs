//! Session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns one `SessionStore` inside an `RwSignal` context. Route guards,
//! the login page, and the logout button all go through it, and it is the
//! only writer of the persisted `user` entry, so the in-memory user and the
//! stored user cannot drift apart.
//!
//! ERROR HANDLING
//! ==============
//! A persisted value that no longer parses is treated as "logged out": the
//! entry is removed and `initialize` reports `SessionError::Malformed` so the
//! caller can log it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::User;
use crate::util::storage::{BrowserStorage, KeyValueStorage, StorageError};

/// Storage key holding the JSON-encoded logged-in user.
pub const SESSION_KEY: &str = "user";

/// Session store used by the running shell.
pub type AppSession = SessionStore<BrowserStorage>;

/// Errors from session persistence.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The persisted user could not be decoded; the session was reset.
    #[error("persisted session is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The user could not be written to storage.
    #[error("session not persisted: {0}")]
    Storage(#[from] StorageError),
}

/// Current user plus the storage it is mirrored to.
///
/// `is_authenticated` is derived from `user`, so the two can never disagree.
#[derive(Clone, Debug, Default)]
pub struct SessionStore<S> {
    storage: S,
    user: Option<User>,
    initialized: bool,
}

impl<S: KeyValueStorage> SessionStore<S> {
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self { storage, user: None, initialized: false }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether `initialize` has run. Guards wait for this before redirecting.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Record a successful login and persist it.
    ///
    /// The in-memory session is set even if persisting fails; the error only
    /// means the login will not survive a reload.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the storage write is rejected.
    pub fn login(&mut self, user: User) -> Result<(), SessionError> {
        let encoded = serde_json::to_string(&user)?;
        self.user = Some(user);
        self.initialized = true;
        self.storage.set(SESSION_KEY, &encoded)?;
        Ok(())
    }

    /// Clear the session and its persisted entry.
    pub fn logout(&mut self) {
        self.user = None;
        self.initialized = true;
        self.storage.remove(SESSION_KEY);
    }

    /// Restore the session from storage.
    ///
    /// Returns the restored user, or `None` when nothing was persisted.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Malformed`] when the stored value does not
    /// decode. The entry is removed and the session stays logged out.
    pub fn initialize(&mut self) -> Result<Option<&User>, SessionError> {
        self.initialized = true;
        self.user = None;
        let Some(raw) = self.storage.get(SESSION_KEY) else {
            return Ok(None);
        };
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => {
                self.user = Some(user);
                Ok(self.user.as_ref())
            }
            Err(e) => {
                self.storage.remove(SESSION_KEY);
                Err(SessionError::Malformed(e))
            }
        }
    }

    /// Decode whatever is currently persisted, treating garbage as no user.
    #[must_use]
    pub fn persisted_user(&self) -> Option<User> {
        self.storage
            .get(SESSION_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }
}
