//! The signed-in user's session.
//!
//! [`SessionContext`] is the single place the client keeps its access token
//! and user. Access functions read the token from it on every call, and
//! signing out clears it so later calls go out unauthenticated.

use std::sync::RwLock;

use serde::Deserialize;
use tracareer_core::types::UserId;

/// User as reported by `GET /api/v1/auth/user`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    /// Filled in once the server has confirmed the token.
    pub user: Option<SessionUser>,
}

#[derive(Debug, Default)]
pub struct SessionContext {
    inner: RwLock<Option<Session>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from a token handed back by the OAuth callback.
    pub fn sign_in_with_token(&self, access_token: impl Into<String>) {
        *self.write() = Some(Session {
            access_token: access_token.into(),
            user: None,
        });
    }

    /// Record the server's view of the user. `None` means the token was
    /// rejected, which ends the session.
    pub fn set_user(&self, user: Option<SessionUser>) {
        let mut guard = self.write();
        match user {
            Some(user) => {
                if let Some(session) = guard.as_mut() {
                    session.user = Some(user);
                }
            }
            None => *guard = None,
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.access_token.clone())
    }

    pub fn is_signed_in(&self) -> bool {
        self.read().is_some()
    }

    /// Drop the session.
    pub fn invalidate(&self) {
        *self.write() = None;
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        // A panic while holding the lock leaves plain data behind; keep using it.
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
