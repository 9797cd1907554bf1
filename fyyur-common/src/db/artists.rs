//! Artist persistence
//!
//! Same transaction discipline as [`venues`](crate::db::venues).

use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::db::genre_rows::{self, GenreTable};
use crate::db::models::{Artist, ArtistFields, ArtistRef, Show};
use crate::db::shows;
use crate::{Error, Result};

const SELECT_ARTIST: &str = r#"
    SELECT id, name, city, state, phone, image_link, facebook_link,
           seeking, seeking_desc, website
    FROM artists
"#;

/// Insert an artist with its genres, returning the new id
pub async fn create(pool: &SqlitePool, fields: &ArtistFields) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO artists (
            name, city, state, phone, image_link, facebook_link,
            seeking, seeking_desc, website
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.phone)
    .bind(&fields.image_link)
    .bind(&fields.facebook_link)
    .bind(fields.seeking)
    .bind(&fields.seeking_desc)
    .bind(&fields.website)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    genre_rows::replace(&mut *tx, GenreTable::Artist, id, &fields.genres).await?;

    tx.commit().await?;
    info!("Created artist {} ({})", id, fields.name);

    Ok(id)
}

/// Load one artist with genres and shows
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Artist>> {
    let artist: Option<Artist> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_ARTIST))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(mut artist) = artist else {
        debug!("Artist {} not found", id);
        return Ok(None);
    };

    artist.genres = genre_rows::load(pool, GenreTable::Artist, id).await?;
    artist.shows = shows::for_artist(pool, id).await?;

    Ok(Some(artist))
}

/// Load one artist or fail with [`Error::NotFound`]
pub async fn require(pool: &SqlitePool, id: i64) -> Result<Artist> {
    get(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Artist with ID {} does not exist", id)))
}

/// All artists ordered by id, with genres and shows attached
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let artists: Vec<Artist> = sqlx::query_as(&format!("{} ORDER BY id", SELECT_ARTIST))
        .fetch_all(pool)
        .await?;

    attach(pool, artists).await
}

async fn attach(pool: &SqlitePool, mut artists: Vec<Artist>) -> Result<Vec<Artist>> {
    let mut genres = genre_rows::load_all(pool, GenreTable::Artist).await?;

    let mut shows_by_artist: HashMap<i64, Vec<Show>> = HashMap::new();
    for show in shows::list_all(pool).await? {
        shows_by_artist.entry(show.artist_id).or_default().push(show);
    }

    for artist in &mut artists {
        artist.genres = genres.remove(&artist.id).unwrap_or_default();
        artist.shows = shows_by_artist.remove(&artist.id).unwrap_or_default();
    }

    Ok(artists)
}

/// Artists booked at one venue, keyed by id
pub async fn refs_for_venue(pool: &SqlitePool, venue_id: i64) -> Result<HashMap<i64, ArtistRef>> {
    let rows: Vec<ArtistRef> = sqlx::query_as(
        r#"
        SELECT DISTINCT a.id, a.name, a.image_link
        FROM artists a
        JOIN shows s ON s.artist_id = a.id
        WHERE s.venue_id = ?
        "#,
    )
    .bind(venue_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|artist| (artist.id, artist)).collect())
}

/// Overwrite an artist's columns and genres
pub async fn update(pool: &SqlitePool, id: i64, fields: &ArtistFields) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE artists SET
            name = ?, city = ?, state = ?, phone = ?,
            image_link = ?, facebook_link = ?, seeking = ?, seeking_desc = ?,
            website = ?
        WHERE id = ?
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.phone)
    .bind(&fields.image_link)
    .bind(&fields.facebook_link)
    .bind(fields.seeking)
    .bind(&fields.seeking_desc)
    .bind(&fields.website)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Artist with ID {} was not found", id)));
    }

    genre_rows::replace(&mut *tx, GenreTable::Artist, id, &fields.genres).await?;

    tx.commit().await?;
    info!("Updated artist {} ({})", id, fields.name);

    Ok(())
}

/// Delete an artist by id, returning the number of artist rows removed
///
/// Commits only when exactly one row matched. Its shows and genre rows are
/// removed by `ON DELETE CASCADE`.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64> {
    let mut tx = pool.begin().await?;

    let count = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if count == 1 {
        tx.commit().await?;
        info!("Deleted artist {}", id);
    } else {
        tx.rollback().await?;
        warn!("Delete of artist {} matched {} rows, rolled back", id, count);
    }

    Ok(count)
}
