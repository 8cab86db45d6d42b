//! Snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Load and store the opaque serialized lexicon state by key.
//! - Surface decode failures as typed errors instead of masking them.
//!
//! # Invariants
//! - `save_lexicon` always overwrites the previous snapshot atomically.
//! - Read paths reject undecodable persisted state.

use crate::db::DbError;
use crate::lexicon::Lexicon;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key under which the live knowledge base is stored.
const LEXICON_KEY: &str = "lexicon";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// The stored blob could not be decoded back into a lexicon.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted snapshot: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// Storage contract for the serialized knowledge base.
pub trait SnapshotRepository {
    fn save_lexicon(&self, lexicon: &Lexicon) -> RepoResult<()>;
    /// `None` when no snapshot has been written yet.
    fn load_lexicon(&self) -> RepoResult<Option<Lexicon>>;
}

/// SQLite-backed snapshot repository over the `snapshots` table.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn save_lexicon(&self, lexicon: &Lexicon) -> RepoResult<()> {
        let body = lexicon.to_snapshot()?;
        self.conn.execute(
            "INSERT INTO snapshots (key, body, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at;",
            params![LEXICON_KEY, body],
        )?;
        Ok(())
    }

    fn load_lexicon(&self) -> RepoResult<Option<Lexicon>> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM snapshots WHERE key = ?1;",
                params![LEXICON_KEY],
                |row| row.get(0),
            )
            .optional()?;
        match body {
            Some(body) => Ok(Some(Lexicon::from_snapshot(&body)?)),
            None => Ok(None),
        }
    }
}
