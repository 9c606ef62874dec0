use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, Row, params};
use thiserror::Error;

use super::Verse;
use crate::playback::PlaybackSpeed;

/// Default filename for the catalog database inside the application directory.
pub const CATALOG_DB_FILE_NAME: &str = "aya.db";

/// Errors returned when reading or writing the catalog database.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog holds no verses.
    #[error("The verse catalog is empty")]
    Empty,
    #[error("Could not create catalog directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Catalog database is busy, please retry")]
    Busy,
    #[error("Catalog query failed: {0}")]
    Sql(#[from] rusqlite::Error),
}

/// Persisted playback settings (a single logical row).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackSettings {
    pub current_verse_id: i64,
    pub speed: PlaybackSpeed,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            current_verse_id: 1,
            speed: PlaybackSpeed::NORMAL,
        }
    }
}

/// SQLite storage for the verse table and the playback settings row.
pub struct CatalogDatabase {
    pub(super) connection: Connection,
    media_root: PathBuf,
}

impl CatalogDatabase {
    /// Open (or create) the database at `path`. Relative media paths resolve against `media_root`.
    pub fn open(path: &Path, media_root: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        create_parent_if_needed(path)?;
        let connection = Connection::open(path)?;
        Self::from_connection(connection, media_root.into())
    }

    pub fn open_in_memory(media_root: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let connection = Connection::open_in_memory()?;
        Self::from_connection(connection, media_root.into())
    }

    fn from_connection(connection: Connection, media_root: PathBuf) -> Result<Self, CatalogError> {
        let db = Self {
            connection,
            media_root,
        };
        db.apply_pragmas()?;
        db.apply_schema()?;
        db.ensure_settings_row()?;
        Ok(db)
    }

    /// All verses ordered by id.
    pub fn load_all(&self) -> Result<Vec<Verse>, CatalogError> {
        let mut stmt = self
            .connection
            .prepare(
                "SELECT id, audio, image, sura, aya, aya_suffix, sura_name
                 FROM all_aya
                 ORDER BY id",
            )
            .map_err(map_sql_error)?;
        let rows = stmt
            .query_map([], |row| self.verse_from_row(row))
            .map_err(map_sql_error)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(map_sql_error)
    }

    /// Insert one verse row. Paths are stored as given.
    pub fn insert_verse(&self, verse: &Verse) -> Result<(), CatalogError> {
        self.connection
            .execute(
                "INSERT INTO all_aya (id, audio, image, sura, aya, aya_suffix, sura_name)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    verse.id,
                    verse.audio_path.to_string_lossy(),
                    verse.image_path.to_string_lossy(),
                    verse.sura_number,
                    verse.aya_number,
                    verse.aya_suffix,
                    verse.sura_name,
                ],
            )
            .map_err(map_sql_error)?;
        Ok(())
    }

    pub fn settings(&self) -> Result<PlaybackSettings, CatalogError> {
        let row: Option<(Option<i64>, Option<f64>)> = self
            .connection
            .query_row(
                "SELECT current_aya, speed FROM current_aya LIMIT 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(map_sql_error)?;
        let defaults = PlaybackSettings::default();
        let Some((current, speed)) = row else {
            return Ok(defaults);
        };
        let stored_speed = speed.unwrap_or(1.0);
        let speed = PlaybackSpeed::new(stored_speed);
        if speed.value() != stored_speed {
            tracing::warn!(stored = stored_speed, used = speed.value(), "Stored speed normalized");
        }
        Ok(PlaybackSettings {
            current_verse_id: current.unwrap_or(defaults.current_verse_id),
            speed,
        })
    }

    pub fn current_verse_id(&self) -> Result<i64, CatalogError> {
        Ok(self.settings()?.current_verse_id)
    }

    pub fn set_current_verse_id(&self, id: i64) -> Result<(), CatalogError> {
        self.ensure_settings_row()?;
        self.connection
            .execute("UPDATE current_aya SET current_aya = ?1", params![id])
            .map_err(map_sql_error)?;
        Ok(())
    }

    pub fn speed(&self) -> Result<PlaybackSpeed, CatalogError> {
        Ok(self.settings()?.speed)
    }

    pub fn set_speed(&self, speed: PlaybackSpeed) -> Result<(), CatalogError> {
        self.ensure_settings_row()?;
        self.connection
            .execute("UPDATE current_aya SET speed = ?1", params![speed.value()])
            .map_err(map_sql_error)?;
        Ok(())
    }

    fn verse_from_row(&self, row: &Row<'_>) -> rusqlite::Result<Verse> {
        let audio: String = row.get(1)?;
        let image: String = row.get(2)?;
        Ok(Verse {
            id: row.get(0)?,
            audio_path: self.resolve(&audio),
            image_path: self.resolve(&image),
            sura_number: row.get(3)?,
            aya_number: row.get(4)?,
            aya_suffix: row.get(5)?,
            sura_name: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        })
    }

    fn resolve(&self, stored: &str) -> PathBuf {
        let path = Path::new(stored);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.media_root.join(path)
        }
    }
}

pub(crate) fn map_sql_error(err: rusqlite::Error) -> CatalogError {
    match err {
        rusqlite::Error::SqliteFailure(sql_err, _)
            if sql_err.extended_code == rusqlite::ffi::SQLITE_BUSY =>
        {
            CatalogError::Busy
        }
        other => CatalogError::Sql(other),
    }
}

fn create_parent_if_needed(path: &Path) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|source| CatalogError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
