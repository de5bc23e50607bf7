//! The SQLite database that keeps a snapshot of the store between runs.

mod migrations;

use crate::store::PersistedState;
use crate::Result;
use anyhow::{bail, Context};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone)]
pub(crate) struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Creates a new database file at `path` and brings its schema up to date. Fails if the file
    /// already exists.
    pub(crate) async fn init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            bail!("A database already exists at {}", path.display());
        }
        Self::open(path, true).await
    }

    /// Opens the existing database at `path`, migrating its schema if it is out of date.
    pub(crate) async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            bail!("The database is missing '{}'", path.display());
        }
        Self::open(path, false).await
    }

    async fn open(path: &Path, create: bool) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(create);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Unable to open SQLite database {}", path.display()))?;

        migrations::bootstrap(&pool).await?;
        let version = migrations::version(&pool).await?;
        migrations::run(&pool, version, migrations::CURRENT_VERSION).await?;
        debug!("Opened database {}", path.display());
        Ok(Self { pool })
    }

    /// Replaces the stored snapshot, one row per slice.
    pub(crate) async fn save_snapshot(&self, snapshot: &PersistedState) -> Result<()> {
        let saved_at = Utc::now().to_rfc3339();
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin snapshot transaction")?;
        for (slice, json) in snapshot.to_rows()? {
            sqlx::query(
                "INSERT INTO slice_snapshots (slice, json, saved_at) VALUES (?, ?, ?) \
                 ON CONFLICT(slice) DO UPDATE \
                 SET json = excluded.json, saved_at = excluded.saved_at",
            )
            .bind(&slice)
            .bind(json)
            .bind(&saved_at)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to save the {slice} slice"))?;
        }
        tx.commit()
            .await
            .context("Failed to commit snapshot transaction")
    }

    /// The stored snapshot, or `None` if nothing was saved yet.
    pub(crate) async fn load_snapshot(&self) -> Result<Option<PersistedState>> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT slice, json FROM slice_snapshots")
            .fetch_all(&self.pool)
            .await
            .context("Failed to read the snapshot")?;
        if rows.is_empty() {
            return Ok(None);
        }
        PersistedState::from_rows(rows).map(Some)
    }

    pub(crate) async fn clear_snapshots(&self) -> Result<()> {
        sqlx::query("DELETE FROM slice_snapshots")
            .execute(&self.pool)
            .await
            .context("Failed to clear the snapshot")?;
        Ok(())
    }
}
