//! Session lifecycle.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use tracing::{info, instrument, warn};

use crate::auth::{
    AuthError, AuthService, Credentials, ProfileUpdate, Registration, Session, SessionStore,
};

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";
const UPDATE_FAILED: &str = "Update failed";

/// Owns the current [`Session`] and keeps the store in step with it.
pub struct SessionManager {
    auth: Arc<dyn AuthService>,
    store: Arc<dyn SessionStore>,
    current: Option<Session>,
}

impl SessionManager {
    /// Signed-out manager; call [`Self::restore`] to pick up a cached session.
    #[must_use]
    pub fn new(auth: Arc<dyn AuthService>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            auth,
            store,
            current: None,
        }
    }

    /// The signed-in session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Rehydrate the session from the store.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Store`] when the store cannot be read; the manager
    /// stays signed out.
    pub async fn restore(&mut self) -> Result<Option<&Session>, AuthError> {
        let user = self.store.load().await.inspect_err(|error| {
            warn!(error = %error, "failed to restore session");
        })?;

        self.current = user.map(Session::new);

        Ok(self.current.as_ref())
    }

    /// Sign in and persist the session.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Rejected`]: the backend refused the credentials.
    /// - [`AuthError::Store`]: the session could not be persisted.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(&mut self, credentials: Credentials) -> Result<&Session, AuthError> {
        let user = self
            .auth
            .login(credentials)
            .await
            .map_err(|error| AuthError::rejected(error, LOGIN_FAILED))?;

        info!(user = %user.id, "signed in");

        self.establish(Session::new(user)).await
    }

    /// Create an account, sign in and persist the session.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Rejected`]: the backend refused the registration.
    /// - [`AuthError::Store`]: the session could not be persisted.
    #[instrument(skip_all, fields(email = %registration.email))]
    pub async fn register(&mut self, registration: Registration) -> Result<&Session, AuthError> {
        let user = self
            .auth
            .register(registration)
            .await
            .map_err(|error| AuthError::rejected(error, REGISTRATION_FAILED))?;

        info!(user = %user.id, "registered");

        self.establish(Session::new(user)).await
    }

    /// Forget the session locally and in the store.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Store`] when the store cannot be cleared. The
    /// in-memory session is dropped regardless.
    pub async fn logout(&mut self) -> Result<(), AuthError> {
        self.current = None;

        self.store.clear().await?;

        Ok(())
    }

    /// Update profile fields and merge the backend's answer into the session.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotAuthenticated`]: nobody is signed in.
    /// - [`AuthError::Rejected`]: the backend refused the update.
    /// - [`AuthError::Store`]: the merged session could not be persisted.
    #[instrument(skip_all)]
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> Result<&Session, AuthError> {
        let Some(current) = &self.current else {
            return Err(AuthError::NotAuthenticated);
        };

        let patch = self
            .auth
            .update_profile(current.user_id(), update)
            .await
            .map_err(|error| AuthError::rejected(error, UPDATE_FAILED))?;

        let mut user = current.user().clone();

        user.apply(patch);

        self.establish(Session::new(user)).await
    }

    async fn establish(&mut self, session: Session) -> Result<&Session, AuthError> {
        self.store.save(session.user()).await?;

        Ok(self.current.insert(session))
    }
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SessionManager")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
