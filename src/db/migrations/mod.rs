//! Schema migrations for the snapshot database.
//!
//! Each schema version `NN` has a pair of scripts next to this file: `migration_NN_up.sql`
//! moves the schema from `NN-1` to `NN`, `migration_NN_down.sql` moves it back.

use crate::Result;
use anyhow::{bail, Context};
use sqlx::{Executor, SqlitePool};
use tracing::debug;

/// The schema version this build expects.
pub(crate) const CURRENT_VERSION: i32 = 1;

struct Migration {
    version: i32,
    up: &'static str,
    down: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    up: include_str!("migration_01_up.sql"),
    down: include_str!("migration_01_down.sql"),
}];

/// Creates the `schema_version` table at version 0 if the database has none.
pub(crate) async fn bootstrap(pool: &SqlitePool) -> Result<()> {
    sqlx::query("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)")
        .execute(pool)
        .await
        .context("Failed to create schema_version table")?;
    let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM schema_version")
        .fetch_one(pool)
        .await
        .context("Failed to read schema_version")?;
    if rows == 0 {
        sqlx::query("INSERT INTO schema_version (version) VALUES (0)")
            .execute(pool)
            .await
            .context("Failed to initialize schema_version")?;
    }
    Ok(())
}

pub(crate) async fn version(pool: &SqlitePool) -> Result<i32> {
    let (version,): (i32,) = sqlx::query_as("SELECT MAX(version) FROM schema_version")
        .fetch_one(pool)
        .await
        .context("Failed to query the schema version")?;
    Ok(version)
}

/// Moves the schema from version `from` to version `to`, one migration at a time. Every step
/// runs in its own transaction together with the `schema_version` update.
pub(crate) async fn run(pool: &SqlitePool, from: i32, to: i32) -> Result<()> {
    if from == to {
        debug!("Schema is at version {to}");
        return Ok(());
    }
    let steps = plan(from, to)?;
    for (migration, up) in steps {
        let (sql, target) = if up {
            (migration.up, migration.version)
        } else {
            (migration.down, migration.version - 1)
        };
        debug!(
            "Migrating schema {} to version {target:02}",
            if up { "up" } else { "down" }
        );
        apply(pool, sql, target).await?;
    }
    debug!("Schema migrated from version {from} to {to}");
    Ok(())
}

/// The migrations needed to go from `from` to `to` and whether each runs up. Fails before
/// anything runs if one of them is missing.
fn plan(from: i32, to: i32) -> Result<Vec<(&'static Migration, bool)>> {
    let up = from < to;
    let versions: Vec<i32> = if up {
        (from + 1..=to).collect()
    } else {
        (to + 1..=from).rev().collect()
    };
    versions
        .into_iter()
        .map(|version| match MIGRATIONS.iter().find(|m| m.version == version) {
            Some(migration) => Ok((migration, up)),
            None => bail!("Migration {version} is required to go from version {from} to {to}"),
        })
        .collect()
}

async fn apply(pool: &SqlitePool, sql: &str, version: i32) -> Result<()> {
    let mut tx = pool
        .begin()
        .await
        .context("Failed to begin migration transaction")?;
    tx.execute(sql)
        .await
        .context("Failed to execute migration SQL")?;
    sqlx::query("UPDATE schema_version SET version = ?")
        .bind(version)
        .execute(&mut *tx)
        .await
        .context("Failed to update schema_version")?;
    tx.commit()
        .await
        .context("Failed to commit migration transaction")
}
