//! Sermon and series persistence backed by SQLite.

use crate::error::{StorageError, StorageResult};
use ministry_model::{NewSeries, NewSermon, PopulatedSermon, Sermon, SermonPatch, SermonSeries};
use ministry_types::{SeriesId, SermonId, Timestamp, UserId};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Which series to return from [`SermonStore::list_series`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeriesFilter {
    #[default]
    All,
    Active,
    Archived,
}

impl SeriesFilter {
    /// Maps an `active=true|false` query value; anything else means all.
    pub fn from_query(active: Option<&str>) -> Self {
        match active {
            Some("true") => Self::Active,
            Some("false") => Self::Archived,
            _ => Self::All,
        }
    }
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS sermon_series (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        active INTEGER NOT NULL,
        created_at INTEGER NOT NULL,
        doc TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_series_owner
        ON sermon_series (user_id, created_at);

    CREATE TABLE IF NOT EXISTS sermons (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        series_id TEXT,
        created_at INTEGER NOT NULL,
        doc TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_sermons_owner
        ON sermons (user_id, created_at);
";

// The series is joined only when it belongs to the sermon's owner.
const POPULATED_SELECT: &str = "
    SELECT s.doc, ss.doc
    FROM sermons s
    LEFT JOIN sermon_series ss
        ON ss.id = s.series_id AND ss.user_id = s.user_id
";

/// Persistent store for sermons and sermon series.
pub struct SermonStore {
    conn: Mutex<Connection>,
}

impl SermonStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        debug!("opened sermon store at {}", path.display());
        Self::init(conn)
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StorageResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    // ── Series ───────────────────────────────────────────────────

    /// Creates an active series for `user`.
    pub fn create_series(&self, user: UserId, input: NewSeries) -> StorageResult<SermonSeries> {
        let series = SermonSeries::new(user, input, Timestamp::now())?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO sermon_series (id, user_id, active, created_at, doc)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                series.id.to_string(),
                user.to_string(),
                series.active,
                series.created_at.as_millis(),
                serde_json::to_string(&series)?,
            ],
        )?;
        debug!("created series {} for {}", series.id, user);
        Ok(series)
    }

    /// Lists the user's series, newest first.
    pub fn list_series(
        &self,
        user: UserId,
        filter: SeriesFilter,
    ) -> StorageResult<Vec<SermonSeries>> {
        let conn = self.conn()?;
        let active = match filter {
            SeriesFilter::All => None,
            SeriesFilter::Active => Some(true),
            SeriesFilter::Archived => Some(false),
        };
        let mut stmt = conn.prepare(
            "SELECT doc FROM sermon_series
             WHERE user_id = ?1 AND (?2 IS NULL OR active = ?2)
             ORDER BY created_at DESC, id DESC",
        )?;
        let docs = stmt
            .query_map(params![user.to_string(), active], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        docs.iter().map(|doc| decode(doc)).collect()
    }

    /// Fetches one of the user's series.
    pub fn get_series(&self, user: UserId, id: SeriesId) -> StorageResult<SermonSeries> {
        let conn = self.conn()?;
        load_series(&conn, user, id)?.ok_or_else(|| series_not_found(id))
    }

    /// Archives (`active = false`) or reactivates a series.
    pub fn set_series_active(
        &self,
        user: UserId,
        id: SeriesId,
        active: bool,
    ) -> StorageResult<SermonSeries> {
        let conn = self.conn()?;
        let mut series = load_series(&conn, user, id)?.ok_or_else(|| series_not_found(id))?;
        series.set_active(active, Timestamp::now());
        conn.execute(
            "UPDATE sermon_series SET active = ?1, doc = ?2 WHERE id = ?3 AND user_id = ?4",
            params![
                active,
                serde_json::to_string(&series)?,
                id.to_string(),
                user.to_string(),
            ],
        )?;
        debug!(
            "series {} {}",
            id,
            if active { "unarchived" } else { "archived" }
        );
        Ok(series)
    }

    // ── Sermons ──────────────────────────────────────────────────

    /// Creates a sermon and returns it with its series joined.
    ///
    /// A referenced series must belong to `user`.
    pub fn create_sermon(&self, user: UserId, input: NewSermon) -> StorageResult<PopulatedSermon> {
        let sermon = Sermon::new(user, input, Timestamp::now())?;
        let conn = self.conn()?;
        let series = match sermon.series_id {
            Some(series_id) => {
                let series = load_series(&conn, user, series_id)?
                    .ok_or_else(|| series_not_found(series_id))?;
                Some(series)
            }
            None => None,
        };
        conn.execute(
            "INSERT INTO sermons (id, user_id, series_id, created_at, doc)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                sermon.id.to_string(),
                user.to_string(),
                sermon.series_id.map(|id| id.to_string()),
                sermon.created_at.as_millis(),
                serde_json::to_string(&sermon)?,
            ],
        )?;
        debug!("created sermon {} for {}", sermon.id, user);
        Ok(sermon.populate(series))
    }

    /// Lists the user's sermons with series joined, newest first.
    pub fn list_sermons(&self, user: UserId) -> StorageResult<Vec<PopulatedSermon>> {
        let conn = self.conn()?;
        let sql = format!(
            "{POPULATED_SELECT} WHERE s.user_id = ?1 ORDER BY s.created_at DESC, s.id DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![user.to_string()], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.iter()
            .map(|(sermon, series)| populate(sermon, series.as_deref()))
            .collect()
    }

    /// Fetches one of the user's sermons with its series joined.
    pub fn get_sermon(&self, user: UserId, id: SermonId) -> StorageResult<PopulatedSermon> {
        let conn = self.conn()?;
        load_populated(&conn, user, id)?.ok_or_else(|| sermon_not_found(id))
    }

    /// Applies a partial update and returns the updated, joined sermon.
    pub fn patch_sermon(
        &self,
        user: UserId,
        id: SermonId,
        patch: SermonPatch,
    ) -> StorageResult<PopulatedSermon> {
        let conn = self.conn()?;
        let mut sermon = load_sermon(&conn, user, id)?.ok_or_else(|| sermon_not_found(id))?;

        if let Some(Some(series_id)) = patch.series_id {
            if load_series(&conn, user, series_id)?.is_none() {
                return Err(series_not_found(series_id));
            }
        }

        sermon.apply_patch(patch, Timestamp::now())?;
        conn.execute(
            "UPDATE sermons SET series_id = ?1, doc = ?2 WHERE id = ?3 AND user_id = ?4",
            params![
                sermon.series_id.map(|s| s.to_string()),
                serde_json::to_string(&sermon)?,
                id.to_string(),
                user.to_string(),
            ],
        )?;
        debug!("patched sermon {}", id);

        load_populated(&conn, user, id)?.ok_or_else(|| sermon_not_found(id))
    }

    /// Deletes one of the user's sermons.
    pub fn delete_sermon(&self, user: UserId, id: SermonId) -> StorageResult<()> {
        let conn = self.conn()?;
        let removed = conn.execute(
            "DELETE FROM sermons WHERE id = ?1 AND user_id = ?2",
            params![id.to_string(), user.to_string()],
        )?;
        if removed == 0 {
            return Err(sermon_not_found(id));
        }
        debug!("deleted sermon {}", id);
        Ok(())
    }
}

fn decode<T: serde::de::DeserializeOwned>(doc: &str) -> StorageResult<T> {
    serde_json::from_str(doc).map_err(|e| StorageError::InvalidData(e.to_string()))
}

fn populate(sermon: &str, series: Option<&str>) -> StorageResult<PopulatedSermon> {
    let sermon: Sermon = decode(sermon)?;
    let series = series.map(decode::<SermonSeries>).transpose()?;
    Ok(sermon.populate(series))
}

fn load_series(
    conn: &Connection,
    user: UserId,
    id: SeriesId,
) -> StorageResult<Option<SermonSeries>> {
    conn.query_row(
        "SELECT doc FROM sermon_series WHERE id = ?1 AND user_id = ?2",
        params![id.to_string(), user.to_string()],
        |row| row.get::<_, String>(0),
    )
    .optional()?
    .map(|doc| decode(&doc))
    .transpose()
}

fn load_sermon(conn: &Connection, user: UserId, id: SermonId) -> StorageResult<Option<Sermon>> {
    conn.query_row(
        "SELECT doc FROM sermons WHERE id = ?1 AND user_id = ?2",
        params![id.to_string(), user.to_string()],
        |row| row.get::<_, String>(0),
    )
    .optional()?
    .map(|doc| decode(&doc))
    .transpose()
}

fn load_populated(
    conn: &Connection,
    user: UserId,
    id: SermonId,
) -> StorageResult<Option<PopulatedSermon>> {
    let sql = format!("{POPULATED_SELECT} WHERE s.id = ?1 AND s.user_id = ?2");
    conn.query_row(&sql, params![id.to_string(), user.to_string()], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
    })
    .optional()?
    .map(|(sermon, series)| populate(&sermon, series.as_deref()))
    .transpose()
}

fn sermon_not_found(id: SermonId) -> StorageError {
    StorageError::NotFound(format!("sermon {id}"))
}

fn series_not_found(id: SeriesId) -> StorageError {
    StorageError::NotFound(format!("series {id}"))
}
