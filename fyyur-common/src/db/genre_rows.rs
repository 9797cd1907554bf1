//! Ordered genre rows for venues and artists

use std::collections::HashMap;

use sqlx::{SqliteConnection, SqlitePool};

use crate::Result;

/// Which join table a genre list lives in
#[derive(Debug, Clone, Copy)]
pub(crate) enum GenreTable {
    Venue,
    Artist,
}

impl GenreTable {
    fn table(self) -> &'static str {
        match self {
            GenreTable::Venue => "venue_genres",
            GenreTable::Artist => "artist_genres",
        }
    }

    fn owner_column(self) -> &'static str {
        match self {
            GenreTable::Venue => "venue_id",
            GenreTable::Artist => "artist_id",
        }
    }
}

/// Replace the whole genre list of one owner
pub(crate) async fn replace(
    conn: &mut SqliteConnection,
    table: GenreTable,
    owner_id: i64,
    genres: &[String],
) -> Result<()> {
    sqlx::query(&format!(
        "DELETE FROM {} WHERE {} = ?",
        table.table(),
        table.owner_column()
    ))
    .bind(owner_id)
    .execute(&mut *conn)
    .await?;

    let insert = format!(
        "INSERT INTO {} ({}, position, genre) VALUES (?, ?, ?)",
        table.table(),
        table.owner_column()
    );

    for (position, genre) in genres.iter().enumerate() {
        sqlx::query(&insert)
            .bind(owner_id)
            .bind(position as i64)
            .bind(genre)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// Genres of one owner, in submitted order
pub(crate) async fn load(pool: &SqlitePool, table: GenreTable, owner_id: i64) -> Result<Vec<String>> {
    let genres: Vec<String> = sqlx::query_scalar(&format!(
        "SELECT genre FROM {} WHERE {} = ? ORDER BY position",
        table.table(),
        table.owner_column()
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(genres)
}

/// Genres of every owner, keyed by owner id
pub(crate) async fn load_all(pool: &SqlitePool, table: GenreTable) -> Result<HashMap<i64, Vec<String>>> {
    let rows: Vec<(i64, String)> = sqlx::query_as(&format!(
        "SELECT {owner}, genre FROM {table} ORDER BY {owner}, position",
        owner = table.owner_column(),
        table = table.table()
    ))
    .fetch_all(pool)
    .await?;

    let mut by_owner: HashMap<i64, Vec<String>> = HashMap::new();
    for (owner_id, genre) in rows {
        by_owner.entry(owner_id).or_default().push(genre);
    }

    Ok(by_owner)
}
