use rusqlite::OptionalExtension;

use super::db::{CatalogDatabase, CatalogError, map_sql_error};

impl CatalogDatabase {
    pub(super) fn apply_pragmas(&self) -> Result<(), CatalogError> {
        self.connection
            .execute_batch(
                "PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout=5000;
                 PRAGMA temp_store=MEMORY;",
            )
            .map_err(map_sql_error)
    }

    /// Create the catalog tables with the column layout of existing `aya.db` files.
    pub(super) fn apply_schema(&self) -> Result<(), CatalogError> {
        self.connection
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS current_aya (
                    current_aya INTEGER,
                    speed REAL DEFAULT 1.0
                );
                 CREATE TABLE IF NOT EXISTS all_aya (
                    id INTEGER,
                    audio TEXT,
                    image TEXT,
                    sura INTEGER,
                    aya INTEGER,
                    aya_suffix INTEGER,
                    sura_name TEXT
                );",
            )
            .map_err(map_sql_error)
    }

    /// Insert the default settings row when the table is empty.
    pub(super) fn ensure_settings_row(&self) -> Result<(), CatalogError> {
        let existing: Option<i64> = self
            .connection
            .query_row("SELECT rowid FROM current_aya LIMIT 1", [], |row| row.get(0))
            .optional()
            .map_err(map_sql_error)?;
        if existing.is_none() {
            tracing::info!("Initializing playback settings row");
            self.connection
                .execute(
                    "INSERT INTO current_aya (current_aya, speed) VALUES (1, 1.0)",
                    [],
                )
                .map_err(map_sql_error)?;
        }
        Ok(())
    }
}
