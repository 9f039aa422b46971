//! Sessions and token persistence
//!
//! A [`Session`] is an explicit value: the bearer token, the role it was
//! issued for, and the profile once loaded. [`SessionManager`] owns the
//! current [`SessionState`] and keeps it in step with a [`TokenStore`].

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use domain_case::Role;
use interface_api::dto::UserResponse;

use crate::api::PortalClient;
use crate::error::ClientError;

/// What survives a restart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: String,
    pub role: Role,
}

/// Credentials of a logged-in user
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    /// Filled in once `/api/auth/me` answers
    pub user: Option<UserResponse>,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
            user: None,
        }
    }
}

impl From<StoredToken> for Session {
    fn from(stored: StoredToken) -> Self {
        Session::new(stored.token, stored.role)
    }
}

/// Where the session stands
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// A stored token is being checked
    Loading,
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Persistence for the bearer token
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<StoredToken>, ClientError>;
    fn save(&self, token: &StoredToken) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

/// Token store living only as long as the process
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<StoredToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: StoredToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<StoredToken>>, ClientError> {
        self.token
            .lock()
            .map_err(|_| ClientError::TokenStore("token lock poisoned".to_string()))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<StoredToken>, ClientError> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, token: &StoredToken) -> Result<(), ClientError> {
        *self.lock()? = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.lock()? = None;
        Ok(())
    }
}

/// Token store backed by a JSON file
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<StoredToken>, ClientError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ClientError::TokenStore(e.to_string())),
        };

        match serde_json::from_slice(&bytes) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding unreadable token file");
                Ok(None)
            }
        }
    }

    fn save(&self, token: &StoredToken) -> Result<(), ClientError> {
        let json = serde_json::to_vec(token).map_err(|e| ClientError::TokenStore(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| ClientError::TokenStore(e.to_string()))
    }

    fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::TokenStore(e.to_string())),
        }
    }
}

/// Drives login, hydration from a stored token, and logout
pub struct SessionManager<S: TokenStore> {
    api: PortalClient,
    store: S,
    state: SessionState,
}

impl<S: TokenStore> SessionManager<S> {
    /// Starts in [`SessionState::Loading`] until [`SessionManager::hydrate`] runs
    pub fn new(api: PortalClient, store: S) -> Self {
        Self {
            api,
            store,
            state: SessionState::Loading,
        }
    }

    pub fn api(&self) -> &PortalClient {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The active session, or `NotLoggedIn`
    pub fn current(&self) -> Result<Session, ClientError> {
        self.state.session().cloned().ok_or(ClientError::NotLoggedIn)
    }

    /// Restores a session from the stored token
    ///
    /// Any failure to load the profile drops the token.
    pub async fn hydrate(&mut self) -> Result<&SessionState, ClientError> {
        let Some(stored) = self.store.load()? else {
            self.state = SessionState::Anonymous;
            return Ok(&self.state);
        };

        let mut session = Session::from(stored);
        match self.api.me(&session).await {
            Ok(user) => {
                debug!(user_id = %user.id, "Session restored");
                session.role = user.role;
                session.user = Some(user);
                self.state = SessionState::Authenticated(session);
            }
            Err(e) => {
                warn!(error = %e, "Stored token rejected, clearing session");
                self.clear()?;
            }
        }
        Ok(&self.state)
    }

    /// Logs in, persists the token and loads the profile
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Role, ClientError> {
        let response = self.api.login(email, password).await?;
        let stored = StoredToken {
            token: response.access_token,
            role: response.role,
        };
        self.store.save(&stored)?;

        let mut session = Session::from(stored);
        let user = self.track(self.api.me(&session).await)?;
        session.user = Some(user);
        self.state = SessionState::Authenticated(session);

        info!(user_id = %response.user_id, role = %response.role, "Logged in");
        Ok(response.role)
    }

    pub fn logout(&mut self) -> Result<(), ClientError> {
        info!("Logged out");
        self.clear()
    }

    /// Passes a result through, dropping the session on `Unauthorized`
    pub fn track<T>(&mut self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if let Err(e) = &result {
            if e.is_unauthorized() {
                warn!("Session rejected by the server, clearing token");
                self.clear()?;
            }
        }
        result
    }

    fn clear(&mut self) -> Result<(), ClientError> {
        self.state = SessionState::Anonymous;
        self.store.clear()
    }
}
