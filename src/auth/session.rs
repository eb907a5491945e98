//! Server-held sessions keyed by an opaque bearer token.
//!
//! The client holds the token (in a cookie); the server keeps only its
//! SHA-256 hash. Sessions expire after a period of inactivity and are
//! purged lazily when the store is touched.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::models::{Role, User};

/// Authenticated identity for one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            signed_in_at: Utc::now(),
        }
    }

    /// Whole minutes since sign-in, never negative.
    pub fn minutes_signed_in(&self, now: DateTime<Utc>) -> i64 {
        (now - self.signed_in_at).num_minutes().max(0)
    }
}

struct SessionEntry {
    session: Session,
    last_seen: Instant,
}

/// Hash a session token using SHA-256.
pub fn hash_token(token: &str) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

/// Generate a random session token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// In-memory session table with idle expiry.
pub struct SessionStore {
    sessions: HashMap<[u8; 32], SessionEntry>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl,
        }
    }

    /// Register a session and return the token that identifies it.
    pub fn create(&mut self, session: Session) -> String {
        self.purge_expired();
        let token = generate_token();
        self.sessions.insert(
            hash_token(&token),
            SessionEntry {
                session,
                last_seen: Instant::now(),
            },
        );
        token
    }

    /// Look up a live session and refresh its idle timer.
    pub fn get(&mut self, token: &str) -> Option<Session> {
        let key = hash_token(token);
        let now = Instant::now();
        let expired = match self.sessions.get_mut(&key) {
            Some(entry) if now.duration_since(entry.last_seen) < self.ttl => {
                entry.last_seen = now;
                return Some(entry.session.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.sessions.remove(&key);
        }
        None
    }

    /// Drop the session for `token`, returning it if one existed.
    pub fn remove(&mut self, token: &str) -> Option<Session> {
        self.sessions.remove(&hash_token(token)).map(|entry| entry.session)
    }

    pub fn purge_expired(&mut self) {
        let now = Instant::now();
        let ttl = self.ttl;
        self.sessions
            .retain(|_, entry| now.duration_since(entry.last_seen) < ttl);
    }

    /// Number of sessions held, expired ones included until purged.
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }
}
