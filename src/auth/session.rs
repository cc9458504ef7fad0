//! Session and credential persistence.
//!
//! [`SessionManager`] owns the current authenticated identity. It keeps an
//! in-memory copy and mirrors every change into a [`KeyValueStore`] under
//! the `"session"` and `"credential"` keys.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

use crate::api::SessionResponse;
use crate::error::SeiunResult;
use crate::traits::{KeyValueStore, StoreError};

const SESSION_KEY: &str = "session";
const CREDENTIAL_KEY: &str = "credential";

/// An authenticated identity on one service host.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub service_host: String,
    pub handle: String,
    pub did: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl Session {
    /// Build a session from a createSession/createAccount/refreshSession
    /// response.
    pub fn from_response(service_host: &str, response: SessionResponse) -> Self {
        Self {
            service_host: service_host.to_string(),
            handle: response.handle,
            did: response.did,
            access_token: response.access_jwt,
            refresh_token: response.refresh_jwt,
        }
    }
}

// Tokens stay out of logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("service_host", &self.service_host)
            .field("handle", &self.handle)
            .field("did", &self.did)
            .finish_non_exhaustive()
    }
}

/// Login secret kept for re-authentication.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub service_host: String,
    pub handle: String,
    pub password: String,
}

impl Credential {
    pub fn new(
        service_host: impl Into<String>,
        handle: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            service_host: service_host.into(),
            handle: handle.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("service_host", &self.service_host)
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

/// Holds, persists and restores the current session.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    current: RwLock<Option<Session>>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            current: RwLock::new(None),
        }
    }

    /// In-memory copy of the current session.
    pub fn current(&self) -> Option<Session> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_current(&self, session: Option<Session>) {
        match self.current.write() {
            Ok(mut guard) => *guard = session,
            Err(poisoned) => *poisoned.into_inner() = session,
        }
    }

    /// Load the persisted session and make it current.
    ///
    /// Returns `None` if nothing is stored or the stored data cannot be read.
    pub async fn restore(&self) -> Option<Session> {
        let session: Option<Session> = self.load_json(SESSION_KEY).await;
        match &session {
            Some(s) => debug!("Restored session for {}", s.handle),
            None => debug!("No stored session"),
        }
        self.set_current(session.clone());
        session
    }

    /// Persist `session`, replacing any previous one, and make it current.
    pub async fn save(&self, session: &Session) -> SeiunResult<()> {
        let json = serde_json::to_string(session)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.save(SESSION_KEY, &json).await?;
        self.set_current(Some(session.clone()));
        info!("Saved session for {}", session.handle);
        Ok(())
    }

    /// Remove the persisted session and credential.
    ///
    /// Both deletes are attempted; the first failure is returned. The
    /// in-memory session is dropped only once its stored copy is gone.
    pub async fn clear(&self) -> SeiunResult<()> {
        let session = self.store.delete(SESSION_KEY).await;
        let credential = self.store.delete(CREDENTIAL_KEY).await;

        if session.is_ok() {
            self.set_current(None);
        }
        session?;
        credential?;
        info!("Cleared session and credential");
        Ok(())
    }

    pub async fn save_credential(&self, credential: &Credential) -> SeiunResult<()> {
        let json = serde_json::to_string(credential)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.save(CREDENTIAL_KEY, &json).await?;
        Ok(())
    }

    /// Load the stored credential; `None` if missing or unreadable.
    pub async fn load_credential(&self) -> Option<Credential> {
        self.load_json(CREDENTIAL_KEY).await
    }

    async fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.load(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read stored {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding corrupt stored {}: {}", key, e);
                None
            }
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("current", &self.current())
            .finish()
    }
}
