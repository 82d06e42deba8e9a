//! Dashboard session gate.
//!
//! A login flag plus its issue time, kept in a local JSON file. This is a
//! convenience check only; nothing verifies it server-side.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::error::SessionError;

/// How long a login stays valid.
pub const SESSION_TTL: Duration = Duration::hours(24);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub authenticated: bool,
    pub issued_at: DateTime<Utc>,
}

impl SessionState {
    pub fn issue(now: DateTime<Utc>) -> Self {
        Self {
            authenticated: true,
            issued_at: now,
        }
    }

    /// Valid while authenticated and no more than [`SESSION_TTL`] old.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.authenticated && now - self.issued_at <= SESSION_TTL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Valid,
    Missing,
    Expired,
}

/// Where the session flag lives.
pub trait SessionStore {
    fn load(&self) -> Result<Option<SessionState>, SessionError>;
    fn save(&self, state: &SessionState) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// Stores the session as a small JSON file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SessionState>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, state: &SessionState) -> Result<(), SessionError> {
        std::fs::write(&self.path, serde_json::to_string(state)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Checks the stored session, clearing it when it has expired.
///
/// A session that cannot be read counts as missing and is cleared.
pub fn check_session<S: SessionStore>(
    store: &S,
    now: DateTime<Utc>,
) -> Result<SessionStatus, SessionError> {
    let state = match store.load() {
        Ok(Some(state)) => state,
        Ok(None) => return Ok(SessionStatus::Missing),
        Err(e) => {
            warn!(error = %e, "Unreadable session, login required");
            if let Err(e) = store.clear() {
                warn!(error = %e, "Failed to clear unreadable session");
            }
            return Ok(SessionStatus::Missing);
        }
    };

    if !state.authenticated {
        return Ok(SessionStatus::Missing);
    }

    if state.is_valid_at(now) {
        Ok(SessionStatus::Valid)
    } else {
        warn!(issued_at = %state.issued_at, "Session expired");
        store.clear()?;
        Ok(SessionStatus::Expired)
    }
}

/// Issues a new session when `supplied` equals `expected`.
pub fn login<S: SessionStore>(
    store: &S,
    supplied: &str,
    expected: &str,
    now: DateTime<Utc>,
) -> Result<SessionState, SessionError> {
    if supplied != expected {
        warn!("Login rejected");
        return Err(SessionError::WrongPassword);
    }

    let state = SessionState::issue(now);
    store.save(&state)?;
    info!("Session issued");
    Ok(state)
}

pub fn logout<S: SessionStore>(store: &S) -> Result<(), SessionError> {
    store.clear()?;
    info!("Session cleared");
    Ok(())
}
