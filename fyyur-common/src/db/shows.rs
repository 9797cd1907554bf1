//! Show persistence
//!
//! Shows are only ever created or removed with their artist or venue.
//! There is no update path.

use sqlx::SqlitePool;
use tracing::info;

use crate::db::models::{NewShow, Show, ShowWithParties};
use crate::{Error, Result};

/// Book a show, returning the new id
///
/// The artist and venue are looked up inside the write transaction so a
/// missing party is reported as [`Error::NotFound`]. The foreign keys on
/// `shows` still reject the insert if a party vanishes concurrently.
pub async fn create(pool: &SqlitePool, show: &NewShow) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let artist_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)")
            .bind(show.artist_id)
            .fetch_one(&mut *tx)
            .await?;
    if !artist_exists {
        return Err(Error::NotFound(format!(
            "Artist with ID {} does not exist",
            show.artist_id
        )));
    }

    let venue_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)")
            .bind(show.venue_id)
            .fetch_one(&mut *tx)
            .await?;
    if !venue_exists {
        return Err(Error::NotFound(format!(
            "Venue with ID {} does not exist",
            show.venue_id
        )));
    }

    let id = sqlx::query("INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?, ?, ?)")
        .bind(show.artist_id)
        .bind(show.venue_id)
        .bind(show.start_time)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    tx.commit().await?;
    info!(
        "Created show {} (artist {} at venue {}, {})",
        id, show.artist_id, show.venue_id, show.start_time
    );

    Ok(id)
}

/// Every show, ordered by start time
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Show>> {
    let shows: Vec<Show> = sqlx::query_as(
        "SELECT id, artist_id, venue_id, start_time FROM shows ORDER BY start_time, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(shows)
}

/// Shows hosted by one venue
pub async fn for_venue(pool: &SqlitePool, venue_id: i64) -> Result<Vec<Show>> {
    let shows: Vec<Show> = sqlx::query_as(
        "SELECT id, artist_id, venue_id, start_time FROM shows WHERE venue_id = ? ORDER BY start_time, id",
    )
    .bind(venue_id)
    .fetch_all(pool)
    .await?;

    Ok(shows)
}

/// Shows played by one artist
pub async fn for_artist(pool: &SqlitePool, artist_id: i64) -> Result<Vec<Show>> {
    let shows: Vec<Show> = sqlx::query_as(
        "SELECT id, artist_id, venue_id, start_time FROM shows WHERE artist_id = ? ORDER BY start_time, id",
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    Ok(shows)
}

/// Every show joined with its venue and artist names
pub async fn list_with_parties(pool: &SqlitePool) -> Result<Vec<ShowWithParties>> {
    let shows: Vec<ShowWithParties> = sqlx::query_as(
        r#"
        SELECT s.id, s.start_time,
               v.id AS venue_id, v.name AS venue_name,
               a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        JOIN artists a ON a.id = s.artist_id
        ORDER BY s.start_time, s.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(shows)
}

/// Number of booked shows
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
