//! Venue persistence
//!
//! Every write runs in its own transaction. Returning early drops the
//! transaction, which rolls it back and hands the connection back to the
//! pool, so no exit path leaks a half-applied write.

use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::db::genre_rows::{self, GenreTable};
use crate::db::models::{Show, Venue, VenueFields, VenueRef};
use crate::db::shows;
use crate::{Error, Result};

const SELECT_VENUE: &str = r#"
    SELECT id, name, city, state, address, phone, image_link, facebook_link,
           seeking, seeking_desc, website
    FROM venues
"#;

/// Insert a venue with its genres, returning the new id
pub async fn create(pool: &SqlitePool, fields: &VenueFields) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO venues (
            name, city, state, address, phone, image_link, facebook_link,
            seeking, seeking_desc, website
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.address)
    .bind(&fields.phone)
    .bind(&fields.image_link)
    .bind(&fields.facebook_link)
    .bind(fields.seeking)
    .bind(&fields.seeking_desc)
    .bind(&fields.website)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    genre_rows::replace(&mut *tx, GenreTable::Venue, id, &fields.genres).await?;

    tx.commit().await?;
    info!("Created venue {} ({})", id, fields.name);

    Ok(id)
}

/// Load one venue with genres and shows
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Venue>> {
    let venue: Option<Venue> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_VENUE))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(mut venue) = venue else {
        debug!("Venue {} not found", id);
        return Ok(None);
    };

    venue.genres = genre_rows::load(pool, GenreTable::Venue, id).await?;
    venue.shows = shows::for_venue(pool, id).await?;

    Ok(Some(venue))
}

/// Load one venue or fail with [`Error::NotFound`]
pub async fn require(pool: &SqlitePool, id: i64) -> Result<Venue> {
    get(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Venue with ID {} does not exist", id)))
}

/// All venues ordered by city, with genres and shows attached
pub async fn list_by_city(pool: &SqlitePool) -> Result<Vec<Venue>> {
    let venues: Vec<Venue> = sqlx::query_as(&format!("{} ORDER BY city, id", SELECT_VENUE))
        .fetch_all(pool)
        .await?;

    attach(pool, venues).await
}

/// All venues ordered by id, with genres and shows attached
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Venue>> {
    let venues: Vec<Venue> = sqlx::query_as(&format!("{} ORDER BY id", SELECT_VENUE))
        .fetch_all(pool)
        .await?;

    attach(pool, venues).await
}

async fn attach(pool: &SqlitePool, mut venues: Vec<Venue>) -> Result<Vec<Venue>> {
    let mut genres = genre_rows::load_all(pool, GenreTable::Venue).await?;

    let mut shows_by_venue: HashMap<i64, Vec<Show>> = HashMap::new();
    for show in shows::list_all(pool).await? {
        shows_by_venue.entry(show.venue_id).or_default().push(show);
    }

    for venue in &mut venues {
        venue.genres = genres.remove(&venue.id).unwrap_or_default();
        venue.shows = shows_by_venue.remove(&venue.id).unwrap_or_default();
    }

    Ok(venues)
}

/// Venues an artist has been booked at, keyed by id
pub async fn refs_for_artist(pool: &SqlitePool, artist_id: i64) -> Result<HashMap<i64, VenueRef>> {
    let rows: Vec<VenueRef> = sqlx::query_as(
        r#"
        SELECT DISTINCT v.id, v.name, v.image_link
        FROM venues v
        JOIN shows s ON s.venue_id = v.id
        WHERE s.artist_id = ?
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|venue| (venue.id, venue)).collect())
}

/// Overwrite a venue's columns and genres
pub async fn update(pool: &SqlitePool, id: i64, fields: &VenueFields) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE venues SET
            name = ?, city = ?, state = ?, address = ?, phone = ?,
            image_link = ?, facebook_link = ?, seeking = ?, seeking_desc = ?,
            website = ?
        WHERE id = ?
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.address)
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
        return Err(Error::NotFound(format!("Venue with ID {} was not found", id)));
    }

    genre_rows::replace(&mut *tx, GenreTable::Venue, id, &fields.genres).await?;

    tx.commit().await?;
    info!("Updated venue {} ({})", id, fields.name);

    Ok(())
}

/// Delete a venue by id, returning the number of venue rows removed
///
/// Commits only when exactly one row matched. Its shows and genre rows are
/// removed by `ON DELETE CASCADE`.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64> {
    let mut tx = pool.begin().await?;

    let count = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if count == 1 {
        tx.commit().await?;
        info!("Deleted venue {}", id);
    } else {
        tx.rollback().await?;
        warn!("Delete of venue {} matched {} rows, rolled back", id, count);
    }

    Ok(count)
}
