//! Session persistence for the browser's tabs.
//!
//! Stores registry snapshots (ordered tabs with thumbnails, active id) as JSON in
//! SQLite so the previous run's tabs can be reopened at startup.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::params;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::connection::Database;
use crate::managers::tab_registry::{TabRegistry, TabRegistryTrait};
use crate::types::errors::SessionError;
use crate::types::session::SessionData;

/// Number of snapshots kept; older ones are pruned on save.
pub const SESSION_HISTORY_LIMIT: i64 = 5;

/// Source of the tabs the browser starts with, and sink for the ones it leaves with.
pub trait SessionStore {
    fn load_initial_tabs(&self) -> Result<Option<SessionData>, SessionError>;
    fn save_session(&self, data: &SessionData) -> Result<(), SessionError>;
    fn has_session(&self) -> bool;
    fn clear_session(&self) -> Result<(), SessionError>;
}

/// Session store backed by SQLite.
pub struct SessionManager {
    db: Arc<Database>,
}

impl SessionManager {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Builds a snapshot of the registry stamped with the current time.
    pub fn snapshot(registry: &TabRegistry) -> SessionData {
        SessionData {
            tabs: registry.list(),
            active_tab_id: registry.active_tab_id(),
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs() as i64,
        }
    }

    fn prune(&self) -> Result<(), SessionError> {
        self.db
            .connection()
            .execute(
                "DELETE FROM sessions WHERE rowid NOT IN (
                     SELECT rowid FROM sessions ORDER BY timestamp DESC, rowid DESC LIMIT ?1
                 )",
                params![SESSION_HISTORY_LIMIT],
            )
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

impl SessionStore for SessionManager {
    /// Returns the most recent snapshot, or `None` on first launch.
    fn load_initial_tabs(&self) -> Result<Option<SessionData>, SessionError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare("SELECT data FROM sessions ORDER BY timestamp DESC, rowid DESC LIMIT 1")
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        let json: String = match stmt.query_row([], |row| row.get(0)) {
            Ok(json) => json,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(SessionError::DatabaseError(e.to_string())),
        };

        let data: SessionData = serde_json::from_str(&json)
            .map_err(|e| SessionError::SerializationError(e.to_string()))?;
        info!(tabs = data.tabs.len(), "loaded saved session");
        Ok(Some(data))
    }

    fn save_session(&self, data: &SessionData) -> Result<(), SessionError> {
        let json = serde_json::to_string(data)
            .map_err(|e| SessionError::SerializationError(e.to_string()))?;

        self.db
            .connection()
            .execute(
                "INSERT INTO sessions (id, data, active_tab_id, tab_count, timestamp) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    Uuid::new_v4().to_string(),
                    json,
                    data.active_tab_id.map(|id| id.to_string()),
                    data.tabs.len() as i64,
                    data.timestamp
                ],
            )
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?;
        debug!(tabs = data.tabs.len(), "session saved");

        self.prune()
    }

    fn has_session(&self) -> bool {
        self.db
            .connection()
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get::<_, i64>(0))
            .map(|count| count > 0)
            .unwrap_or(false)
    }

    fn clear_session(&self) -> Result<(), SessionError> {
        self.db
            .connection()
            .execute("DELETE FROM sessions", [])
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}
