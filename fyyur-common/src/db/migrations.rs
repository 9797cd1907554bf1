//! Database schema migrations
//!
//! Versioned, idempotent upgrades tracked in the `schema_version` table.
//! Fresh databases are created with the current layout by
//! [`create_schema`](crate::db::init::create_schema), so each migration
//! first checks whether the old shape is actually present.
//!
//! # Migration Guidelines
//!
//! 1. **Never modify existing migrations** - They must remain stable for users upgrading from older versions
//! 2. **Always add new migrations** - Create a new migration function for each schema change
//! 3. **Check before changing** - Probe `pragma_table_info` so a rerun is a no-op

use crate::genres::split_genres;
use crate::Result;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{info, warn};

/// Current schema version
///
/// **IMPORTANT:** Increment this when adding new migrations
pub const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Get current schema version from database
///
/// Returns 0 if schema_version table doesn't exist or has no rows
pub async fn get_schema_version(pool: &SqlitePool) -> Result<i32> {
    let table_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type='table' AND name='schema_version'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(pool)
            .await?;

    Ok(version.unwrap_or(0))
}

async fn set_schema_version(conn: &mut SqliteConnection, version: i32) -> Result<()> {
    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(version)
        .execute(conn)
        .await?;

    Ok(())
}

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let current_version = get_schema_version(pool).await?;

    if current_version == CURRENT_SCHEMA_VERSION {
        info!("Database schema is up to date (v{})", current_version);
        return Ok(());
    }

    if current_version > CURRENT_SCHEMA_VERSION {
        warn!(
            "Database schema version ({}) is newer than code version ({})",
            current_version, CURRENT_SCHEMA_VERSION
        );
        return Ok(());
    }

    info!(
        "Running database migrations: v{} -> v{}",
        current_version, CURRENT_SCHEMA_VERSION
    );

    if current_version < 1 {
        let mut tx = pool.begin().await?;
        migrate_v1(&mut *tx).await?;
        set_schema_version(&mut *tx, 1).await?;
        tx.commit().await?;
        info!("Migration v1 completed");
    }

    if current_version < 2 {
        let mut tx = pool.begin().await?;
        migrate_v2(&mut *tx).await?;
        set_schema_version(&mut *tx, 2).await?;
        tx.commit().await?;
        info!("Migration v2 completed");
    }

    Ok(())
}

async fn has_column(conn: &mut SqliteConnection, table: &str, column: &str) -> Result<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info(?) WHERE name = ?")
            .bind(table)
            .bind(column)
            .fetch_one(conn)
            .await?;

    Ok(count > 0)
}

/// Migration v1: move single-string genres into the join tables
///
/// **Background:** Venues and artists used to keep their genres in a
/// `genres` TEXT column holding a stringified list such as
/// `{Jazz,Reggae}`. Each value is decoded and written as ordered rows in
/// `venue_genres` / `artist_genres`, then the old column is dropped.
async fn migrate_v1(conn: &mut SqliteConnection) -> Result<()> {
    info!("Running migration v1: import legacy genres columns");

    import_legacy_genres(conn, "venues", "venue_genres", "venue_id").await?;
    import_legacy_genres(conn, "artists", "artist_genres", "artist_id").await?;

    Ok(())
}

async fn import_legacy_genres(
    conn: &mut SqliteConnection,
    owner_table: &str,
    genre_table: &str,
    owner_column: &str,
) -> Result<()> {
    if !has_column(conn, owner_table, "genres").await? {
        info!("  {}.genres not present - skipping", owner_table);
        return Ok(());
    }

    let rows: Vec<(i64, Option<String>)> =
        sqlx::query_as(&format!("SELECT id, genres FROM {}", owner_table))
            .fetch_all(&mut *conn)
            .await?;

    let insert = format!(
        "INSERT OR IGNORE INTO {} ({}, position, genre) VALUES (?, ?, ?)",
        genre_table, owner_column
    );

    let mut imported = 0usize;
    for (owner_id, raw) in rows {
        let Some(raw) = raw else { continue };

        for (position, genre) in split_genres(&raw).into_iter().enumerate() {
            sqlx::query(&insert)
                .bind(owner_id)
                .bind(position as i64)
                .bind(genre)
                .execute(&mut *conn)
                .await?;
            imported += 1;
        }
    }

    sqlx::query(&format!("ALTER TABLE {} DROP COLUMN genres", owner_table))
        .execute(&mut *conn)
        .await?;

    info!("  Imported {} genre rows from {}.genres", imported, owner_table);
    Ok(())
}

/// Migration v2: rename `shows.dt` to `shows.start_time`
async fn migrate_v2(conn: &mut SqliteConnection) -> Result<()> {
    info!("Running migration v2: rename shows.dt");

    if !has_column(conn, "shows", "dt").await? {
        info!("  shows.dt not present - skipping");
        return Ok(());
    }

    sqlx::query("ALTER TABLE shows RENAME COLUMN dt TO start_time")
        .execute(&mut *conn)
        .await?;

    info!("  Renamed shows.dt to shows.start_time");
    Ok(())
}
