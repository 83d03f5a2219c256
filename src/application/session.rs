//! Session manager: pseudo-login, registration and logout.
//!
//! There is no credential check. A submit that passes form validation
//! fabricates a session and persists it under the session key.

use std::sync::Arc;

use crate::adapters::StorageError;
use crate::domain::{Credentials, Registration, Role, User};
use crate::ports::{keys, KeyValueStore};
use crate::VerolixError;

use super::persist;

/// Service owning the single current-user session.
pub struct SessionManager<S>
where
    S: KeyValueStore,
{
    storage: Arc<S>,
}

impl<S> SessionManager<S>
where
    S: KeyValueStore,
    S::Error: Into<StorageError>,
{
    /// Create a new session manager.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Log in under the chosen role tab.
    ///
    /// The session name is the email local part; only patients get a
    /// patient id.
    ///
    /// # Errors
    /// Returns a validation error for bad input, or a storage error.
    pub fn login(&self, role: Role, credentials: &Credentials) -> Result<User, VerolixError> {
        credentials.validate()?;

        let user = User::new(credentials.email.clone(), credentials.display_name(), role);
        persist::save_json(self.storage.as_ref(), keys::SESSION, &user)?;

        tracing::info!(role = %user.role, "Session started");
        Ok(user)
    }

    /// Register a new account. Registration always yields a patient.
    ///
    /// # Errors
    /// Returns a validation error for bad input, or a storage error.
    pub fn register(&self, registration: &Registration) -> Result<User, VerolixError> {
        registration.validate()?;

        let user = User::new(
            registration.credentials.email.clone(),
            registration.name.clone(),
            Role::Patient,
        );
        persist::save_json(self.storage.as_ref(), keys::SESSION, &user)?;

        tracing::info!("Account registered");
        Ok(user)
    }

    /// End the current session.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn logout(&self) -> Result<(), VerolixError> {
        persist::remove(self.storage.as_ref(), keys::SESSION)?;
        tracing::info!("Session ended");
        Ok(())
    }

    /// The current session, if any.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn current(&self) -> Result<Option<User>, VerolixError> {
        persist::load_json(self.storage.as_ref(), keys::SESSION)
    }
}
