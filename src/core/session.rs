//! # Conversation Identity
//!
//! A `Session` names one logical conversation. The id is an opaque UUID v4
//! string sent to the backend (when the profile asks for it) so the server
//! can correlate turns. Sessions live only in memory.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: new_session_id(),
            created_at: Utc::now(),
        }
    }

    /// A fresh session whose id is guaranteed to differ from `previous`.
    pub fn succeeding(previous: &Session) -> Self {
        let mut next = Self::new();
        while next.id == previous.id {
            next.id = new_session_id();
        }
        next
    }

    /// First 8 characters of the id, for display.
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a new UUID v4 session ID.
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
