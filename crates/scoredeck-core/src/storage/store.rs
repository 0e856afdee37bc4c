//! SQLite-backed key/value store for persisted session records.
//!
//! The store is a plain string key/value table; the expiry policy is
//! enforced here at read time, not by the store itself. Each save is a
//! complete atomic replacement of the whole record, never a partial
//! patch, so last-writer-wins cannot corrupt a record.

use chrono::{DateTime, Local, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::data_dir;
use crate::error::{Result, StorageError};
use crate::session::SessionState;

/// Key prefix for persisted session records; the session id is appended
/// verbatim.
pub const KEY_PREFIX: &str = "session_state_";

/// Key holding the pinned active session id, so repeat invocations stay
/// on the session the operator chose.
const ACTIVE_SESSION_KEY: &str = "active_session";

fn store_key(session_id: &str) -> String {
    format!("{KEY_PREFIX}{session_id}")
}

/// Time-based invalidation rule for persisted sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// Stale after `hours` since the last save.
    RollingTtl { hours: u64 },
    /// Stale once the local calendar day of the last save has passed.
    CalendarDay,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        ExpiryPolicy::RollingTtl { hours: 6 }
    }
}

impl ExpiryPolicy {
    pub fn is_expired(&self, saved_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match *self {
            ExpiryPolicy::RollingTtl { hours } => {
                now.signed_duration_since(saved_at) > chrono::Duration::hours(hours as i64)
            }
            ExpiryPolicy::CalendarDay => {
                saved_at.with_timezone(&Local).date_naive() < now.with_timezone(&Local).date_naive()
            }
        }
    }
}

/// What actually goes into the store: the state plus its save timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub state: SessionState,
    pub saved_at: DateTime<Utc>,
}

/// SQLite store for session records, keyed by session id.
pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    /// Open the store at `~/.config/scoredeck/scoredeck.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("scoredeck.db");
        Self::open_at(&path)
    }

    /// Open the store at an explicit path (used by tests with tempdirs).
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    // ── Raw key/value access ─────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    // ── Session records ──────────────────────────────────────────────

    /// Persist the state, replacing any prior record for its session.
    pub fn save(&self, state: &SessionState, saved_at: DateTime<Utc>) -> Result<()> {
        let record = PersistedRecord {
            state: state.clone(),
            saved_at,
        };
        let json = serde_json::to_string(&record)?;
        self.kv_set(&store_key(&state.session_id), &json)
    }

    /// Load the session, applying the expiry policy.
    ///
    /// An absent record yields a fresh default state without writing
    /// anything. An expired or unreadable record is deleted and likewise
    /// yields a fresh default; a corrupt record never crashes a session.
    pub fn load(
        &self,
        session_id: &str,
        policy: ExpiryPolicy,
        now: DateTime<Utc>,
    ) -> Result<SessionState> {
        let key = store_key(session_id);
        let Some(json) = self.kv_get(&key)? else {
            return Ok(SessionState::fresh(session_id));
        };
        let record: PersistedRecord = match serde_json::from_str(&json) {
            Ok(record) => record,
            Err(_) => {
                self.kv_delete(&key)?;
                return Ok(SessionState::fresh(session_id));
            }
        };
        if policy.is_expired(record.saved_at, now) {
            self.kv_delete(&key)?;
            return Ok(SessionState::fresh(session_id));
        }
        Ok(record.state)
    }

    /// Remove the persisted record for a session.
    pub fn delete(&self, session_id: &str) -> Result<()> {
        self.kv_delete(&store_key(session_id))
    }

    /// Whether a record currently exists for a session.
    pub fn contains(&self, session_id: &str) -> Result<bool> {
        Ok(self.kv_get(&store_key(session_id))?.is_some())
    }

    // ── Active-session pinning ───────────────────────────────────────

    pub fn active_session(&self) -> Result<Option<String>> {
        self.kv_get(ACTIVE_SESSION_KEY)
    }

    /// Pin the given session id; `None` clears the pin.
    pub fn set_active_session(&self, session_id: Option<&str>) -> Result<()> {
        match session_id {
            Some(id) => self.kv_set(ACTIVE_SESSION_KEY, id),
            None => self.kv_delete(ACTIVE_SESSION_KEY),
        }
    }
}
