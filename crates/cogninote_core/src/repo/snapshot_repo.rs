//! Snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the full tree-store snapshot under three fixed keys, plus
//!   the session marker gating autosave.
//! - Decode persisted snapshots back into domain collections, reporting
//!   undecodable state instead of failing unpredictably at first access.
//!
//! # Invariants
//! - Collection payloads are JSON envelopes carrying a format version.
//! - A save writes all snapshot keys in one transaction; a reader never
//!   observes a half-written snapshot.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::note::Note;
use crate::model::project::Project;
use crate::store::tree::Snapshot;
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Key holding the serialized project collection.
pub const PROJECTS_KEY: &str = "cogni_projects";
/// Key holding the serialized note collection.
pub const NOTES_KEY: &str = "cogni_notes";
/// Key holding the active note id (empty string when none).
pub const ACTIVE_NOTE_KEY: &str = "cogni_active_note_id";
/// Key marking a signed-in session; autosave is gated on its presence.
pub const SESSION_KEY: &str = "cogni_auth_session";

/// Current snapshot envelope format version.
pub const SNAPSHOT_VERSION: u32 = 1;

const SESSION_ACTIVE_VALUE: &str = "active";

/// Result type used by snapshot repository operations.
pub type SnapshotRepoResult<T> = Result<T, SnapshotRepoError>;

/// Errors from snapshot repository operations.
#[derive(Debug)]
pub enum SnapshotRepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// In-memory state could not be serialized for persistence.
    Encode(serde_json::Error),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
}

impl Display for SnapshotRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "snapshot repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "snapshot repository requires table `{table}`")
            }
        }
    }
}

impl Error for SnapshotRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for SnapshotRepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SnapshotRepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for SnapshotRepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Outcome of reading the persisted snapshot keys.
#[derive(Debug)]
pub enum SnapshotLoad {
    /// No snapshot has been persisted yet; callers seed first-run data.
    Missing,
    /// Stored payload exists but cannot be decoded; callers fall back to
    /// seed data. Carries a human-readable reason for logging.
    Invalid(String),
    /// Fully decoded snapshot.
    Loaded(Snapshot),
}

/// Repository interface for snapshot persistence.
pub trait SnapshotRepository {
    /// Reads the persisted snapshot keys back into domain collections.
    fn load_snapshot(&self) -> SnapshotRepoResult<SnapshotLoad>;
    /// Writes the full snapshot under the fixed keys, atomically.
    fn save_snapshot(&self, snapshot: &Snapshot) -> SnapshotRepoResult<()>;
    /// Reports whether a signed-in session marker is present.
    fn session_active(&self) -> SnapshotRepoResult<bool>;
    /// Sets or clears the session marker.
    fn set_session_active(&self, active: bool) -> SnapshotRepoResult<()>;
}

/// Versioned wrapper around persisted collection payloads.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// SQLite-backed snapshot repository over the `snapshot_kv` table.
#[derive(Debug)]
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> SnapshotRepoResult<Self> {
        ensure_snapshot_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn get(&self, key: &str) -> SnapshotRepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM snapshot_kv WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load_snapshot(&self) -> SnapshotRepoResult<SnapshotLoad> {
        let (Some(projects_raw), Some(notes_raw)) =
            (self.get(PROJECTS_KEY)?, self.get(NOTES_KEY)?)
        else {
            return Ok(SnapshotLoad::Missing);
        };

        let projects: Vec<Project> = match decode_envelope(PROJECTS_KEY, &projects_raw) {
            Ok(data) => data,
            Err(reason) => return Ok(SnapshotLoad::Invalid(reason)),
        };
        let notes: Vec<Note> = match decode_envelope(NOTES_KEY, &notes_raw) {
            Ok(data) => data,
            Err(reason) => return Ok(SnapshotLoad::Invalid(reason)),
        };
        let active_note_id = self
            .get(ACTIVE_NOTE_KEY)?
            .filter(|value| !value.is_empty());

        Ok(SnapshotLoad::Loaded(Snapshot {
            projects,
            notes,
            active_note_id,
        }))
    }

    fn save_snapshot(&self, snapshot: &Snapshot) -> SnapshotRepoResult<()> {
        let started_at = Instant::now();
        let projects_payload = serde_json::to_string(&Envelope {
            version: SNAPSHOT_VERSION,
            data: &snapshot.projects,
        })?;
        let notes_payload = serde_json::to_string(&Envelope {
            version: SNAPSHOT_VERSION,
            data: &snapshot.notes,
        })?;
        let active_payload = snapshot.active_note_id.as_deref().unwrap_or_default();

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        for (key, value) in [
            (PROJECTS_KEY, projects_payload.as_str()),
            (NOTES_KEY, notes_payload.as_str()),
            (ACTIVE_NOTE_KEY, active_payload),
        ] {
            put_kv(&tx, key, value)?;
        }
        tx.commit()?;

        info!(
            "event=snapshot_save module=repo status=ok projects={} notes={} duration_ms={}",
            snapshot.projects.len(),
            snapshot.notes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn session_active(&self) -> SnapshotRepoResult<bool> {
        Ok(self.get(SESSION_KEY)?.as_deref() == Some(SESSION_ACTIVE_VALUE))
    }

    fn set_session_active(&self, active: bool) -> SnapshotRepoResult<()> {
        if active {
            put_kv(self.conn, SESSION_KEY, SESSION_ACTIVE_VALUE)?;
        } else {
            self.conn
                .execute("DELETE FROM snapshot_kv WHERE key = ?1;", [SESSION_KEY])?;
        }
        Ok(())
    }
}

fn put_kv(conn: &Connection, key: &str, value: &str) -> SnapshotRepoResult<()> {
    conn.execute(
        "INSERT INTO snapshot_kv (key, value)
         VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET
             value = excluded.value,
             updated_at = (strftime('%s', 'now') * 1000);",
        params![key, value],
    )?;
    Ok(())
}

fn decode_envelope<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T, String> {
    let envelope: Envelope<T> = serde_json::from_str(raw)
        .map_err(|err| format!("undecodable payload under `{key}`: {err}"))?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(format!(
            "unsupported snapshot version {} under `{key}`, expected {SNAPSHOT_VERSION}",
            envelope.version
        ));
    }
    Ok(envelope.data)
}

fn ensure_snapshot_connection_ready(conn: &Connection) -> SnapshotRepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(SnapshotRepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'snapshot_kv'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists != 1 {
        return Err(SnapshotRepoError::MissingRequiredTable("snapshot_kv"));
    }

    Ok(())
}
